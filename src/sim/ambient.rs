//! Day/night cycle
//!
//! Purely environmental: flips between day and night every
//! `DAY_NIGHT_CYCLE_TICKS` and eases the sky colors over the first
//! `TRANSITION_TICKS` of each half.

use std::f32::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::world::Viewport;
use crate::color::Color;

/// Ticks between day/night flips
pub const DAY_NIGHT_CYCLE_TICKS: u64 = 700;
/// Ticks spent blending into the new sky
pub const TRANSITION_TICKS: u64 = 80;
pub const STAR_COUNT: usize = 30;

pub const DAY_TOP: Color = Color::rgb(0xc8, 0xb4, 0xe8);
pub const DAY_BOTTOM: Color = Color::rgb(0xf7, 0xc5, 0xd0);
pub const NIGHT_TOP: Color = Color::rgb(0x1a, 0x0a, 0x3c);
pub const NIGHT_BOTTOM: Color = Color::rgb(0x3c, 0x1a, 0x5c);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
    pub twinkle: f32,
    pub twinkle_speed: f32,
}

impl Star {
    /// Brightness before the night fade is applied
    pub fn brightness(&self) -> f32 {
        self.alpha * (0.7 + 0.3 * self.twinkle.sin())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayNightCycle {
    frame: u64,
    is_night: bool,
    /// 0 = full day, 1 = full night
    transition: f32,
    pub stars: Vec<Star>,
}

impl DayNightCycle {
    pub fn new(viewport: &Viewport, rng: &mut Pcg32) -> Self {
        let mut cycle = Self {
            frame: 0,
            is_night: false,
            transition: 0.0,
            stars: Vec::with_capacity(STAR_COUNT),
        };
        cycle.regenerate_stars(viewport, rng);
        cycle
    }

    /// Scatter a fresh star field over the upper part of the sky
    pub fn regenerate_stars(&mut self, viewport: &Viewport, rng: &mut Pcg32) {
        self.stars.clear();
        for _ in 0..STAR_COUNT {
            self.stars.push(Star {
                x: rng.random::<f32>() * viewport.width,
                y: rng.random::<f32>() * viewport.height * 0.65,
                size: 0.5 + rng.random::<f32>() * 2.0,
                alpha: 0.5 + rng.random::<f32>() * 0.5,
                twinkle: rng.random::<f32>() * TAU,
                twinkle_speed: 0.02 + rng.random::<f32>() * 0.04,
            });
        }
    }

    pub fn update(&mut self) {
        self.frame += 1;
        if self.frame % DAY_NIGHT_CYCLE_TICKS == 0 {
            self.is_night = !self.is_night;
        }

        let phase_frame = self.frame % DAY_NIGHT_CYCLE_TICKS;
        self.transition = if phase_frame < TRANSITION_TICKS {
            let t = phase_frame as f32 / TRANSITION_TICKS as f32;
            if self.is_night { t } else { 1.0 - t }
        } else if self.is_night {
            1.0
        } else {
            0.0
        };

        for star in &mut self.stars {
            star.twinkle += star.twinkle_speed;
        }
    }

    pub fn is_night(&self) -> bool {
        self.is_night
    }

    /// Blend factor toward night, in [0, 1]
    pub fn night_amount(&self) -> f32 {
        self.transition
    }

    /// Sky gradient (top, bottom)
    pub fn sky_colors(&self) -> (Color, Color) {
        let t = self.transition;
        (DAY_TOP.lerp(NIGHT_TOP, t), DAY_BOTTOM.lerp(NIGHT_BOTTOM, t))
    }

    pub fn stars_visible(&self) -> bool {
        self.transition > 0.05
    }

    pub fn sun_visible(&self) -> bool {
        self.transition < 0.95
    }
}
