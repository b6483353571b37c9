//! Obstacle spawner
//!
//! Counts down a random interval, builds an obstacle from the active theme
//! just past the right edge, scrolls everything left and prunes what has
//! left the screen.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{FlightBand, Obstacle, ObstacleKind};
use super::world::Viewport;
use crate::random_int_in_range;
use crate::settings::{DifficultyPreset, GameConfig, ObstacleTheme};

/// Pick an obstacle kind for a theme
pub fn choose_kind(theme: ObstacleTheme, rng: &mut Pcg32) -> ObstacleKind {
    match theme {
        ObstacleTheme::Classic => {
            if rng.random_bool(0.4) {
                ObstacleKind::SmallCactus
            } else {
                ObstacleKind::LargeCactus
            }
        }
        ObstacleTheme::Birds => {
            let band = FlightBand::ALL[rng.random_range(0..FlightBand::ALL.len())];
            ObstacleKind::Bird(band)
        }
        ObstacleTheme::Mixed => {
            if rng.random_bool(0.5) {
                choose_kind(ObstacleTheme::Classic, rng)
            } else {
                choose_kind(ObstacleTheme::Birds, rng)
            }
        }
        ObstacleTheme::Urban => {
            if rng.random_bool(0.5) {
                ObstacleKind::Car
            } else {
                ObstacleKind::RoadSign
            }
        }
    }
}

/// Owns the live obstacles (in spawn order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSpawner {
    pub obstacles: Vec<Obstacle>,
    /// Ticks until the next spawn
    spawn_countdown: u32,
    /// Length of the interval currently counting down
    spawn_interval: u32,
    next_id: u32,
}

impl ObstacleSpawner {
    pub fn new(preset: &DifficultyPreset, rng: &mut Pcg32) -> Self {
        let mut spawner = Self {
            obstacles: Vec::new(),
            spawn_countdown: 0,
            spawn_interval: 0,
            next_id: 1,
        };
        spawner.roll_interval(preset, rng);
        spawner
    }

    fn roll_interval(&mut self, preset: &DifficultyPreset, rng: &mut Pcg32) {
        let interval = random_int_in_range(rng, preset.min_spawn, preset.max_spawn).max(1);
        self.spawn_interval = interval;
        self.spawn_countdown = interval;
    }

    /// Interval drawn for the pending spawn
    pub fn spawn_interval(&self) -> u32 {
        self.spawn_interval
    }

    /// Advance one tick. Returns the kind spawned this tick, if any.
    pub fn update(
        &mut self,
        speed: f32,
        config: &GameConfig,
        viewport: &Viewport,
        rng: &mut Pcg32,
    ) -> Option<ObstacleKind> {
        self.spawn_countdown = self.spawn_countdown.saturating_sub(1);
        let spawned = if self.spawn_countdown == 0 {
            let kind = choose_kind(config.obstacle_theme, rng);
            let obstacle = Obstacle::new(
                self.next_id,
                kind,
                viewport.spawn_x(),
                viewport.ground_y(),
            );
            self.next_id = self.next_id.wrapping_add(1);
            log::trace!("Spawned {:?} #{}", kind, obstacle.id);
            self.obstacles.push(obstacle);
            self.roll_interval(&config.preset(), rng);
            Some(kind)
        } else {
            None
        };

        for obstacle in &mut self.obstacles {
            obstacle.update(speed);
        }
        self.obstacles.retain(|o| o.active);

        spawned
    }

    /// Drop every obstacle and restart the countdown
    pub fn reset(&mut self, preset: &DifficultyPreset, rng: &mut Pcg32) {
        self.obstacles.clear();
        self.roll_interval(preset, rng);
    }
}
