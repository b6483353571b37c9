//! Game session state and the events it reports
//!
//! Everything the per-tick update touches lives in `GameState`. Components
//! never call back into the session; they push `GameEvent`s that the tick
//! applies in order and then hands to the presentation layer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ambient::DayNightCycle;
use super::avatar::Avatar;
use super::boss::{BossController, BossKind};
use super::ground::Ground;
use super::particles::ParticleSystem;
use super::powerup::{PowerUpKind, PowerUpSpawner};
use super::spawner::ObstacleSpawner;
use super::world::Viewport;
use crate::settings::GameConfig;

/// Offset mixed into the seed of the cosmetic RNG
const FX_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first action
    Idle,
    Running,
    Paused,
    /// Running with a boss on screen
    Boss,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::Boss => "boss",
            GamePhase::GameOver => "gameover",
        }
    }

    /// Phases in which the simulation advances
    pub fn is_active(&self) -> bool {
        matches!(self, GamePhase::Running | GamePhase::Boss)
    }
}

/// Notifications produced during a tick, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Displayed (floored) score changed
    ScoreChanged(u64),
    PhaseChanged(GamePhase),
    Jumped,
    Landed,
    /// Score boundary reached (multiple of 100)
    Milestone(u64),
    ShieldCollected,
    EffectStarted(PowerUpKind),
    EffectEnded(PowerUpKind),
    /// A shield soaked up an otherwise fatal hit
    ShieldAbsorbed,
    BossArrived(BossKind),
    BossDefeated {
        kind: BossKind,
        bonus: u64,
        center: Vec2,
    },
    GameOver {
        score: u64,
    },
    NewHighScore(u64),
}

/// Complete session state (deterministic for a given seed and input)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub seed: u64,
    /// Gameplay randomness (spawns, kinds, intervals)
    pub rng: Pcg32,
    /// Cosmetic randomness (particles, stars, flowers)
    pub fx_rng: Pcg32,
    pub phase: GamePhase,
    /// Phase to return to when resuming from pause
    pub resume_phase: GamePhase,
    /// Active ticks this session
    pub time_ticks: u64,
    /// Scroll speed before slow motion
    pub speed: f32,
    /// Accumulated score (fractional)
    pub score: f64,
    pub high_score: u64,
    pub slow_motion: bool,
    pub score_multiplier: bool,
    /// Remaining ticks of the milestone flash
    pub flash_ticks: u32,
    /// Last 100-point boundary index already celebrated
    pub milestone_mark: u64,
    /// Last 500-point boundary index already handled
    pub boss_mark: u64,
    /// Set while the avatar is still inside a boss whose hit a shield absorbed
    pub boss_contact: bool,
    pub viewport: Viewport,
    pub avatar: Avatar,
    pub obstacles: ObstacleSpawner,
    pub powerups: PowerUpSpawner,
    pub boss: BossController,
    pub particles: ParticleSystem,
    pub sky: DayNightCycle,
    pub ground: Ground,
    /// Outbox drained by the presentation layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session
    pub fn new(seed: u64, config: &GameConfig, viewport: Viewport, high_score: u64) -> Self {
        let preset = config.preset();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut fx_rng = Pcg32::seed_from_u64(seed ^ FX_SEED_SALT);
        let obstacles = ObstacleSpawner::new(&preset, &mut rng);
        let powerups = PowerUpSpawner::new(&mut rng);
        let sky = DayNightCycle::new(&viewport, &mut fx_rng);
        let ground = Ground::new(&viewport, &mut fx_rng);

        Self {
            seed,
            rng,
            fx_rng,
            phase: GamePhase::Idle,
            resume_phase: GamePhase::Running,
            time_ticks: 0,
            speed: preset.base_speed,
            score: 0.0,
            high_score,
            slow_motion: false,
            score_multiplier: false,
            flash_ticks: 0,
            milestone_mark: 0,
            boss_mark: 0,
            boss_contact: false,
            viewport,
            avatar: Avatar::new(viewport.ground_y(), &preset),
            obstacles,
            powerups,
            boss: BossController::new(),
            particles: ParticleSystem::new(),
            sky,
            ground,
            events: Vec::new(),
        }
    }

    /// Reset every per-session value and enter `Running`.
    /// The high score, viewport, sky and ground carry over.
    pub fn start_session(&mut self, config: &GameConfig) {
        let preset = config.preset();
        self.time_ticks = 0;
        self.speed = preset.base_speed;
        self.score = 0.0;
        self.slow_motion = false;
        self.score_multiplier = false;
        self.flash_ticks = 0;
        self.milestone_mark = 0;
        self.boss_mark = 0;
        self.boss_contact = false;
        self.avatar = Avatar::new(self.viewport.ground_y(), &preset);
        self.obstacles.reset(&preset, &mut self.rng);
        self.powerups.reset(&mut self.rng);
        self.boss.reset();
        self.particles.clear();

        log::info!(
            "Session started: difficulty={} theme={}",
            config.difficulty.as_str(),
            config.obstacle_theme.as_str()
        );
        self.events.push(GameEvent::ScoreChanged(0));
        self.set_phase(GamePhase::Running);
    }

    /// Score as shown to the player
    #[inline]
    pub fn displayed_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    /// Change phase, reporting it if it actually changed
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    /// Surface resized: re-derive everything that depends on its geometry
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.sky.regenerate_stars(&viewport, &mut self.fx_rng);
        self.ground.regenerate(&viewport, &mut self.fx_rng);
        self.avatar.set_ground_y(viewport.ground_y());
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
    }

    /// Take everything reported since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Multiplier applied to per-tick score
    pub fn score_factor(&self) -> f64 {
        if self.score_multiplier { 2.0 } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(42, &GameConfig::default(), Viewport::default(), 77)
    }

    #[test]
    fn test_new_is_idle() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Idle);
        assert_eq!(s.high_score, 77);
        assert_eq!(s.displayed_score(), 0);
        assert!(s.avatar.grounded);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_start_session_resets() {
        let mut s = state();
        s.score = 321.7;
        s.slow_motion = true;
        s.milestone_mark = 3;
        s.phase = GamePhase::GameOver;
        s.avatar.mark_hit();
        s.start_session(&GameConfig::default());

        assert_eq!(s.phase, GamePhase::Running);
        assert_eq!(s.score, 0.0);
        assert!(!s.slow_motion);
        assert_eq!(s.milestone_mark, 0);
        assert_eq!(s.high_score, 77);
        assert_eq!(
            s.drain_events(),
            vec![
                GameEvent::ScoreChanged(0),
                GameEvent::PhaseChanged(GamePhase::Running)
            ]
        );
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_set_phase_reports_changes_only() {
        let mut s = state();
        s.set_phase(GamePhase::Idle);
        assert!(s.events.is_empty());
        s.set_phase(GamePhase::Running);
        assert_eq!(s.events, vec![GameEvent::PhaseChanged(GamePhase::Running)]);
    }

    #[test]
    fn test_displayed_score_floors() {
        let mut s = state();
        s.score = 99.99;
        assert_eq!(s.displayed_score(), 99);
        s.score = 100.0;
        assert_eq!(s.displayed_score(), 100);
    }

    #[test]
    fn test_resize_moves_ground() {
        let mut s = state();
        s.resize(Viewport::from_width(1200.0));
        assert_eq!(s.avatar.pos.y, 260.0 - s.avatar.height);
        assert_eq!(s.ground.flowers.len(), 24);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(GamePhase::GameOver.as_str(), "gameover");
        assert!(GamePhase::Boss.is_active());
        assert!(!GamePhase::Paused.is_active());
    }
}
