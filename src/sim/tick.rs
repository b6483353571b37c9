//! Fixed-step simulation tick
//!
//! One call advances the session by exactly one logical tick. Update order
//! inside a tick is fixed: triggers, sky, ground, avatar, obstacles or
//! boss, power-ups, particles, collisions.

use glam::Vec2;

use super::collision::HITBOX_INSET;
use super::powerup::PowerUpKind;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::settings::GameConfig;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump, or start a session when idle / after game over
    pub action: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode: the game plays itself
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, config: &GameConfig, input: &TickInput) {
    if input.pause {
        if state.phase == GamePhase::Paused {
            resume(state);
        } else if pause(state) {
            return;
        }
    }

    if input.action || (input.autopilot && autopilot_wants_action(state)) {
        handle_action(state, config);
    }

    if state.phase.is_active() {
        step(state, config);
    }
}

/// The single player action: start from idle/game over, jump while playing.
/// Ignored while paused.
pub fn handle_action(state: &mut GameState, config: &GameConfig) {
    match state.phase {
        GamePhase::Idle | GamePhase::GameOver => state.start_session(config),
        GamePhase::Running | GamePhase::Boss => {
            if state.avatar.jump() {
                let avatar = &state.avatar;
                let at = Vec2::new(avatar.pos.x + 10.0, avatar.pos.y + avatar.height);
                state.particles.dust_puff(&mut state.fx_rng, at);
                state.events.push(GameEvent::Jumped);
            }
        }
        GamePhase::Paused => {}
    }
}

/// Freeze a running session. Returns whether the phase changed.
pub fn pause(state: &mut GameState) -> bool {
    if !state.phase.is_active() {
        return false;
    }
    state.resume_phase = state.phase;
    state.set_phase(GamePhase::Paused);
    true
}

/// Continue a paused session in the sub-mode it was paused from.
/// Returns whether the phase changed.
pub fn resume(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Paused {
        return false;
    }
    let phase = if state.boss.is_active() && state.resume_phase == GamePhase::Boss {
        GamePhase::Boss
    } else {
        GamePhase::Running
    };
    state.set_phase(phase);
    true
}

/// One active tick
fn step(state: &mut GameState, config: &GameConfig) {
    let preset = config.preset();
    let shown_before = state.displayed_score();
    let mut events = Vec::new();

    state.time_ticks += 1;
    state.speed = preset.base_speed + state.time_ticks as f32 * preset.speed_increment;
    let world_speed = if state.slow_motion {
        state.speed * SLOW_MOTION_FACTOR
    } else {
        state.speed
    };

    state.score += SCORE_PER_TICK * state.score_factor();

    check_triggers(state, config, &mut events);
    apply_events(state, &mut events);

    state.flash_ticks = state.flash_ticks.saturating_sub(1);

    state.sky.update();
    state.ground.update(world_speed, &state.viewport);

    let was_grounded = state.avatar.grounded;
    state.avatar.update(&preset);
    if !was_grounded && state.avatar.grounded {
        let avatar = &state.avatar;
        let at = Vec2::new(avatar.pos.x + 10.0, avatar.pos.y + avatar.height);
        state.particles.land_thud(&mut state.fx_rng, at);
        state.events.push(GameEvent::Landed);
    }

    if state.boss.is_active() {
        state.boss.update(world_speed, &state.viewport, &mut events);
    } else {
        state
            .obstacles
            .update(world_speed, config, &state.viewport, &mut state.rng);
    }
    apply_events(state, &mut events);

    state
        .powerups
        .update(world_speed, &state.viewport, &mut state.rng, &mut events);
    apply_events(state, &mut events);

    state.particles.update();

    resolve_collisions(state, &mut events);
    apply_events(state, &mut events);

    let shown = state.displayed_score();
    if shown != shown_before {
        state.events.push(GameEvent::ScoreChanged(shown));
    }
}

/// Milestone and boss thresholds, each firing once per boundary
fn check_triggers(state: &mut GameState, config: &GameConfig, events: &mut Vec<GameEvent>) {
    let shown = state.displayed_score();

    let milestone = shown / MILESTONE_INTERVAL;
    if milestone > state.milestone_mark {
        state.milestone_mark = milestone;
        state.flash_ticks = MILESTONE_FLASH_TICKS;
        let center = Vec2::new(state.viewport.width / 2.0, state.viewport.height / 2.0);
        state.particles.score_sparkle(&mut state.fx_rng, center);
        events.push(GameEvent::Milestone(milestone * MILESTONE_INTERVAL));
    }

    let boss_index = shown / BOSS_INTERVAL;
    if boss_index > state.boss_mark {
        state.boss_mark = boss_index;
        if state.boss.is_active() {
            log::debug!("Boss threshold {} reached during an encounter", shown);
        } else {
            state.boss.start(&state.viewport, events);
            state.obstacles.reset(&config.preset(), &mut state.rng);
        }
    }
}

/// Apply cross-component effects, then forward each event to the outbox
fn apply_events(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for event in events.drain(..) {
        state.events.push(event);
        match event {
            GameEvent::BossArrived(_) => state.set_phase(GamePhase::Boss),
            GameEvent::BossDefeated { bonus, center, .. } => {
                state.score += bonus as f64;
                state.particles.boss_burst(&mut state.fx_rng, center);
                if state.phase == GamePhase::Boss {
                    state.set_phase(GamePhase::Running);
                }
            }
            GameEvent::ShieldCollected => {
                state.avatar.activate_shield();
                let at = Vec2::new(state.avatar.pos.x + 22.0, state.avatar.pos.y);
                state.particles.power_up_collect(&mut state.fx_rng, at);
                log::info!("Shield collected");
            }
            GameEvent::EffectStarted(kind) => {
                set_effect(state, kind, true);
                log::info!("Power-up started: {}", kind.label());
            }
            GameEvent::EffectEnded(kind) => {
                set_effect(state, kind, false);
                log::debug!("Power-up ended: {}", kind.label());
            }
            _ => {}
        }
    }
}

fn set_effect(state: &mut GameState, kind: PowerUpKind, on: bool) {
    match kind {
        PowerUpKind::SlowMotion => state.slow_motion = on,
        PowerUpKind::ScoreMultiplier => state.score_multiplier = on,
        PowerUpKind::Shield => {}
    }
}

/// Obstacles, then the boss, then pickups. A fatal hit stops further checks.
fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let avatar = state.avatar.bounds();

    for i in 0..state.obstacles.obstacles.len() {
        let obstacle = &state.obstacles.obstacles[i];
        if !obstacle.active || !avatar.overlaps(&obstacle.bounds(), HITBOX_INSET) {
            continue;
        }
        if !state.avatar.consume_shield() {
            trigger_game_over(state);
            return;
        }
        // The absorbed obstacle is spent so it cannot hit again next tick
        state.obstacles.obstacles[i].active = false;
        events.push(GameEvent::ShieldAbsorbed);
    }
    state.obstacles.obstacles.retain(|o| o.active);

    match state.boss.bounds() {
        Some(boss) if avatar.overlaps(&boss, HITBOX_INSET) => {
            if !state.boss_contact {
                if !state.avatar.consume_shield() {
                    trigger_game_over(state);
                    return;
                }
                state.boss_contact = true;
                events.push(GameEvent::ShieldAbsorbed);
            }
        }
        _ => state.boss_contact = false,
    }

    state.powerups.check_collision(&avatar, events);
}

/// End the session: hit face, debris, game over, high score bookkeeping
pub fn trigger_game_over(state: &mut GameState) {
    state.avatar.mark_hit();
    state.set_phase(GamePhase::GameOver);
    let avatar = &state.avatar;
    let at = Vec2::new(avatar.pos.x + 22.0, avatar.pos.y + 26.0);
    state.particles.hit_debris(&mut state.fx_rng, at);

    let score = state.displayed_score();
    log::info!("Game over at {} (tick {})", score, state.time_ticks);
    state.events.push(GameEvent::GameOver { score });
    if score > state.high_score {
        state.high_score = score;
        log::info!("New high score: {}", score);
        state.events.push(GameEvent::NewHighScore(score));
    }
}

/// Demo mode: start when idle, jump when a ground-level hazard is close
fn autopilot_wants_action(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Idle | GamePhase::GameOver => true,
        GamePhase::Running | GamePhase::Boss => {
            let avatar = &state.avatar;
            if !avatar.grounded {
                return false;
            }
            let avatar_left = avatar.pos.x + HITBOX_INSET;
            let avatar_right = avatar.pos.x + avatar.width - HITBOX_INSET;
            let avatar_top = avatar.rest_y() + HITBOX_INSET;
            let reach = state.speed * 10.0;

            state.obstacles.obstacles.iter().any(|o| {
                let b = o.bounds();
                let left = b.x + HITBOX_INSET;
                let right = b.right() - HITBOX_INSET;
                let bottom = b.bottom() - HITBOX_INSET;
                // Birds flying above head height are safer to run under
                bottom > avatar_top && right > avatar_left && left - avatar_right < reach
            })
        }
        GamePhase::Paused => false,
    }
}
