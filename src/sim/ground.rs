//! Scrolling ground scenery

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::world::Viewport;
use crate::color::Color;

pub const FLOWER_COLORS: [Color; 5] = [
    Color::rgb(0xf9, 0xa8, 0xc9),
    Color::rgb(0xf7, 0xe0, 0x7a),
    Color::rgb(0xb8, 0xf0, 0xa0),
    Color::rgb(0xa0, 0xd4, 0xf8),
    Color::rgb(0xe8, 0xb0, 0xf8),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flower {
    pub x: f32,
    /// Position at zero scroll
    pub home_x: f32,
    pub y: f32,
    pub color: Color,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ground {
    /// Scroll offset, wraps at the surface width
    pub offset: f32,
    pub flowers: Vec<Flower>,
}

impl Ground {
    pub fn new(viewport: &Viewport, rng: &mut Pcg32) -> Self {
        let mut ground = Self {
            offset: 0.0,
            flowers: Vec::new(),
        };
        ground.regenerate(viewport, rng);
        ground
    }

    /// Spread flowers evenly along the strip below the ground line
    pub fn regenerate(&mut self, viewport: &Viewport, rng: &mut Pcg32) {
        let count = (viewport.width / 60.0).floor() as usize + 4;
        let spacing = viewport.width / count as f32;
        let ground_y = viewport.ground_y();
        self.flowers = (0..count)
            .map(|i| {
                let home_x = i as f32 * spacing + rng.random::<f32>() * 30.0;
                Flower {
                    x: home_x,
                    home_x,
                    y: ground_y + 8.0 + rng.random::<f32>() * 10.0,
                    color: FLOWER_COLORS[rng.random_range(0..FLOWER_COLORS.len())],
                    size: 3.0 + rng.random::<f32>() * 3.0,
                }
            })
            .collect();
    }

    pub fn update(&mut self, speed: f32, viewport: &Viewport) {
        self.offset = (self.offset + speed) % viewport.width;
        for flower in &mut self.flowers {
            flower.x = flower.home_x - self.offset;
            if flower.x < -20.0 {
                flower.x += viewport.width + 40.0;
            }
        }
    }
}
