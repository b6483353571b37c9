//! Power-up pickups and the timed effect slot
//!
//! Shield applies instantly and lives on the avatar. Slow motion and the
//! score multiplier share a single timed slot: collecting a timed pickup
//! while another is running replaces it, and the displaced effect reports
//! its end first.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, HITBOX_INSET};
use super::state::GameEvent;
use super::world::Viewport;
use crate::random_int_in_range;

/// Pickup badge edge length
pub const POWERUP_SIZE: f32 = 36.0;
/// Spawn interval range in ticks (independent of difficulty)
pub const POWERUP_SPAWN_MIN: u32 = 800;
pub const POWERUP_SPAWN_MAX: u32 = 1500;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    SlowMotion,
    ScoreMultiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::SlowMotion,
        PowerUpKind::ScoreMultiplier,
    ];

    /// Length of the timed effect; None for instant kinds
    pub fn duration_ticks(&self) -> Option<u32> {
        match self {
            PowerUpKind::Shield => None,
            PowerUpKind::SlowMotion => Some(300),
            PowerUpKind::ScoreMultiplier => Some(600),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "SHIELD",
            PowerUpKind::SlowMotion => "SLOW",
            PowerUpKind::ScoreMultiplier => "x2",
        }
    }
}

/// A collectible on screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpItem {
    pub id: u32,
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
    pub active: bool,
    /// Ticks since spawn, drives the bob animation
    pub bob_frame: u32,
}

impl PowerUpItem {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, POWERUP_SIZE, POWERUP_SIZE)
    }

    /// Vertical draw offset of the bob animation
    pub fn bob_offset(&self) -> f32 {
        (self.bob_frame as f32 * 0.08).sin() * 4.0
    }
}

/// The single timed effect slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub ticks_left: u32,
    pub total_ticks: u32,
}

impl ActiveEffect {
    /// Remaining fraction (1 = just collected)
    pub fn progress(&self) -> f32 {
        if self.total_ticks == 0 {
            0.0
        } else {
            self.ticks_left as f32 / self.total_ticks as f32
        }
    }
}

/// Spawns pickups and times the active effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpSpawner {
    pub items: Vec<PowerUpItem>,
    pub active_effect: Option<ActiveEffect>,
    spawn_countdown: u32,
    next_id: u32,
}

impl PowerUpSpawner {
    pub fn new(rng: &mut Pcg32) -> Self {
        Self {
            items: Vec::new(),
            active_effect: None,
            spawn_countdown: random_int_in_range(rng, POWERUP_SPAWN_MIN, POWERUP_SPAWN_MAX),
            next_id: 1,
        }
    }

    /// Advance one tick: spawn, scroll, prune and run down the effect timer
    pub fn update(
        &mut self,
        speed: f32,
        viewport: &Viewport,
        rng: &mut Pcg32,
        events: &mut Vec<GameEvent>,
    ) {
        self.spawn_countdown = self.spawn_countdown.saturating_sub(1);
        if self.spawn_countdown == 0 {
            self.spawn(viewport, rng);
            self.spawn_countdown =
                random_int_in_range(rng, POWERUP_SPAWN_MIN, POWERUP_SPAWN_MAX);
        }

        for item in &mut self.items {
            item.x -= speed;
            item.bob_frame = item.bob_frame.wrapping_add(1);
            if item.x + 40.0 < 0.0 {
                item.active = false;
            }
        }
        self.items.retain(|i| i.active);

        if let Some(effect) = &mut self.active_effect {
            effect.ticks_left = effect.ticks_left.saturating_sub(1);
            if effect.ticks_left == 0 {
                let kind = effect.kind;
                self.active_effect = None;
                events.push(GameEvent::EffectEnded(kind));
            }
        }
    }

    fn spawn(&mut self, viewport: &Viewport, rng: &mut Pcg32) {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let y = viewport.ground_y() - 80.0 - rng.random::<f32>() * 40.0;
        self.items.push(PowerUpItem {
            id: self.next_id,
            kind,
            x: viewport.spawn_x(),
            y,
            active: true,
            bob_frame: 0,
        });
        self.next_id = self.next_id.wrapping_add(1);
    }

    /// Collect the first pickup touching the avatar, if any
    pub fn check_collision(
        &mut self,
        avatar: &Bounds,
        events: &mut Vec<GameEvent>,
    ) -> Option<PowerUpKind> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.active && avatar.overlaps(&i.bounds(), HITBOX_INSET))?;
        item.active = false;
        let kind = item.kind;
        self.items.retain(|i| i.active);
        self.apply_effect(kind, events);
        Some(kind)
    }

    fn apply_effect(&mut self, kind: PowerUpKind, events: &mut Vec<GameEvent>) {
        let Some(duration) = kind.duration_ticks() else {
            events.push(GameEvent::ShieldCollected);
            return;
        };
        if let Some(previous) = self.active_effect.take() {
            if previous.kind != kind {
                events.push(GameEvent::EffectEnded(previous.kind));
            }
        }
        self.active_effect = Some(ActiveEffect {
            kind,
            ticks_left: duration,
            total_ticks: duration,
        });
        events.push(GameEvent::EffectStarted(kind));
    }

    /// Whether a timed effect of `kind` is running
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.active_effect.is_some_and(|e| e.kind == kind)
    }

    /// Drop pickups and the effect, restart the spawn countdown
    pub fn reset(&mut self, rng: &mut Pcg32) {
        self.items.clear();
        self.active_effect = None;
        self.spawn_countdown = random_int_in_range(rng, POWERUP_SPAWN_MIN, POWERUP_SPAWN_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn spawner() -> (PowerUpSpawner, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(11);
        (PowerUpSpawner::new(&mut rng), rng)
    }

    fn item_at(kind: PowerUpKind, x: f32, y: f32) -> PowerUpItem {
        PowerUpItem {
            id: 100,
            kind,
            x,
            y,
            active: true,
            bob_frame: 0,
        }
    }

    const AVATAR: Bounds = Bounds::new(60.0, 108.0, 44.0, 52.0);

    #[test]
    fn test_spawns_within_interval() {
        let (mut s, mut rng) = spawner();
        let vp = Viewport::default();
        let mut events = Vec::new();
        for _ in 0..POWERUP_SPAWN_MAX {
            s.update(0.0, &vp, &mut rng, &mut events);
        }
        assert_eq!(s.items.len(), 1);
        let item = &s.items[0];
        assert!(item.y <= vp.ground_y() - 80.0 && item.y >= vp.ground_y() - 120.0);
    }

    #[test]
    fn test_shield_is_instant() {
        let (mut s, _) = spawner();
        s.items.push(item_at(PowerUpKind::Shield, 60.0, 108.0));
        let mut events = Vec::new();
        assert_eq!(s.check_collision(&AVATAR, &mut events), Some(PowerUpKind::Shield));
        assert_eq!(events, vec![GameEvent::ShieldCollected]);
        assert!(s.active_effect.is_none());
        assert!(s.items.is_empty());
    }

    #[test]
    fn test_timed_effect_expires_with_notice() {
        let (mut s, mut rng) = spawner();
        let vp = Viewport::default();
        s.items.push(item_at(PowerUpKind::SlowMotion, 60.0, 108.0));
        let mut events = Vec::new();
        s.check_collision(&AVATAR, &mut events);
        assert_eq!(events, vec![GameEvent::EffectStarted(PowerUpKind::SlowMotion)]);
        assert!(s.is_active(PowerUpKind::SlowMotion));

        events.clear();
        for _ in 0..299 {
            s.update(0.0, &vp, &mut rng, &mut events);
        }
        assert!(s.is_active(PowerUpKind::SlowMotion));
        s.update(0.0, &vp, &mut rng, &mut events);
        assert!(!s.is_active(PowerUpKind::SlowMotion));
        assert!(events.contains(&GameEvent::EffectEnded(PowerUpKind::SlowMotion)));
    }

    #[test]
    fn test_new_timed_effect_replaces_old() {
        let (mut s, _) = spawner();
        let mut events = Vec::new();
        s.items.push(item_at(PowerUpKind::SlowMotion, 60.0, 108.0));
        s.check_collision(&AVATAR, &mut events);
        s.active_effect.as_mut().unwrap().ticks_left = 10;

        events.clear();
        s.items.push(item_at(PowerUpKind::ScoreMultiplier, 60.0, 108.0));
        s.check_collision(&AVATAR, &mut events);
        assert_eq!(
            events,
            vec![
                GameEvent::EffectEnded(PowerUpKind::SlowMotion),
                GameEvent::EffectStarted(PowerUpKind::ScoreMultiplier),
            ]
        );
        let effect = s.active_effect.unwrap();
        assert_eq!(effect.kind, PowerUpKind::ScoreMultiplier);
        assert_eq!(effect.ticks_left, 600);
    }

    #[test]
    fn test_same_effect_refreshes_duration() {
        let (mut s, _) = spawner();
        let mut events = Vec::new();
        s.items.push(item_at(PowerUpKind::ScoreMultiplier, 60.0, 108.0));
        s.check_collision(&AVATAR, &mut events);
        s.active_effect.as_mut().unwrap().ticks_left = 5;
        events.clear();
        s.items.push(item_at(PowerUpKind::ScoreMultiplier, 60.0, 108.0));
        s.check_collision(&AVATAR, &mut events);
        assert_eq!(events, vec![GameEvent::EffectStarted(PowerUpKind::ScoreMultiplier)]);
        assert_eq!(s.active_effect.unwrap().ticks_left, 600);
    }

    #[test]
    fn test_miss_and_prune() {
        let (mut s, mut rng) = spawner();
        let vp = Viewport::default();
        let mut events = Vec::new();
        s.items.push(item_at(PowerUpKind::Shield, 400.0, 108.0));
        assert_eq!(s.check_collision(&AVATAR, &mut events), None);
        s.items[0].x = -35.0;
        s.update(6.0, &vp, &mut rng, &mut events);
        assert!(s.items.is_empty());
    }

    #[test]
    fn test_reset() {
        let (mut s, mut rng) = spawner();
        let mut events = Vec::new();
        s.items.push(item_at(PowerUpKind::SlowMotion, 60.0, 108.0));
        s.check_collision(&AVATAR, &mut events);
        s.items.push(item_at(PowerUpKind::Shield, 300.0, 108.0));
        s.reset(&mut rng);
        assert!(s.items.is_empty());
        assert!(s.active_effect.is_none());
    }
}
