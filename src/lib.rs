//! Dino Dash - An endless-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar physics, spawners, boss, collisions)
//! - `renderer`: Back-to-front draw pass over a 2D canvas
//! - `game`: Orchestrator facade driven once per display refresh
//! - `platform`: Frame scheduling abstraction
//! - `persistence`: Key/value storage (LocalStorage on web)

pub mod audio;
pub mod color;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use color::Color;
pub use game::{Game, SessionListener};
pub use settings::{Difficulty, DifficultyPreset, GameConfig, ObstacleTheme};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Real-time gap between frames (ms) beyond which the tick is skipped
    pub const MAX_FRAME_GAP_MS: f64 = 100.0;

    /// Surface width used before the canvas reports a size
    pub const DEFAULT_SURFACE_WIDTH: f32 = 800.0;
    /// Surface height as a fraction of its width
    pub const SURFACE_ASPECT: f32 = 0.25;
    /// Minimum surface height
    pub const MIN_SURFACE_HEIGHT: f32 = 100.0;
    /// Distance from the bottom of the surface to the ground line
    pub const GROUND_MARGIN: f32 = 40.0;
    /// New obstacles and pickups appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 20.0;

    /// Avatar defaults
    pub const AVATAR_X: f32 = 60.0;
    pub const AVATAR_WIDTH: f32 = 44.0;
    pub const AVATAR_HEIGHT: f32 = 52.0;
    /// Shield duration (3s)
    pub const SHIELD_TICKS: u32 = 180;

    /// Collision forgiveness applied to every side of both boxes
    pub const HITBOX_INSET: f32 = 8.0;

    /// Score gained per tick before multipliers
    pub const SCORE_PER_TICK: f64 = 0.1;
    /// Cosmetic milestone every N points
    pub const MILESTONE_INTERVAL: u64 = 100;
    /// Boss encounter every N points
    pub const BOSS_INTERVAL: u64 = 500;
    /// Flash overlay length after a milestone
    pub const MILESTONE_FLASH_TICKS: u32 = 10;
    /// World speed multiplier while slow motion is active
    pub const SLOW_MOTION_FACTOR: f32 = 0.5;
}

/// Uniform float in `[min, max)`
#[inline]
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..max)
}

/// Uniform integer in `[min, max]` (both ends inclusive)
#[inline]
pub fn random_int_in_range<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}
