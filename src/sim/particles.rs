//! Fire-and-forget particles for visual feedback
//!
//! Particles never take part in collisions. They draw from the cosmetic RNG
//! so spawning them cannot shift gameplay randomness.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::random_in_range;

/// Hard cap on live particles
pub const MAX_PARTICLES: usize = 512;

/// Horizontal velocity kept per tick
const DRAG: f32 = 0.96;

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left
    pub life: f32,
    pub max_life: f32,
    pub color: Color,
    pub size: f32,
    pub gravity: f32,
}

impl Particle {
    /// Fade factor (1 = fresh, 0 = gone)
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Parameters for one burst
struct Burst<'a> {
    count: usize,
    colors: &'a [Color],
    speed: f32,
    size: (f32, f32),
    life: (f32, f32),
    /// Emission angle range in radians (screen space, y down)
    angle: (f32, f32),
    gravity: f32,
}

const DUST: [Color; 4] = [
    Color::rgb(0xd4, 0xb8, 0xa0),
    Color::rgb(0xe8, 0xc8, 0xb0),
    Color::rgb(0xc0, 0xa0, 0x80),
    Color::rgb(0xf0, 0xd8, 0xc0),
];
const THUD: [Color; 3] = [
    Color::rgb(0xc8, 0xa8, 0x80),
    Color::rgb(0xd4, 0xb8, 0x90),
    Color::rgb(0xb0, 0x90, 0x70),
];
const SPARKLE: [Color; 6] = [
    Color::rgb(0xf7, 0xe0, 0x7a),
    Color::rgb(0xf7, 0xc0, 0xd0),
    Color::rgb(0xb8, 0xf0, 0xa0),
    Color::rgb(0xa0, 0xd4, 0xf8),
    Color::rgb(0xe8, 0xb0, 0xf8),
    Color::WHITE,
];
const DEBRIS: [Color; 6] = [
    Color::rgb(0xf4, 0xa0, 0xa0),
    Color::rgb(0xf7, 0xc0, 0xd0),
    Color::rgb(0xf7, 0xe0, 0x7a),
    Color::rgb(0xb8, 0xf0, 0xa0),
    Color::rgb(0xa0, 0xd4, 0xf8),
    Color::rgb(0x55, 0x55, 0x55),
];
const CONFETTI: [Color; 8] = [
    Color::rgb(0xf7, 0xe0, 0x7a),
    Color::rgb(0xf7, 0xc0, 0xd0),
    Color::rgb(0xb8, 0xf0, 0xa0),
    Color::rgb(0xa0, 0xd4, 0xf8),
    Color::rgb(0xe8, 0xb0, 0xf8),
    Color::rgb(0xf4, 0xa0, 0xa0),
    Color::WHITE,
    Color::rgb(0xff, 0xb3, 0x47),
];
const PICKUP: [Color; 4] = [
    Color::rgb(0xf7, 0xe0, 0x7a),
    Color::WHITE,
    Color::rgb(0xe8, 0xb0, 0xf8),
    Color::rgb(0xa0, 0xd4, 0xf8),
];

/// Pool of live particles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&mut self, rng: &mut Pcg32, origin: Vec2, burst: Burst<'_>) {
        for _ in 0..burst.count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = random_in_range(rng, burst.angle.0, burst.angle.1);
            let speed = (0.5 + rng.random::<f32>()) * burst.speed;
            let life = random_in_range(rng, burst.life.0, burst.life.1);
            let color = burst.colors[rng.random_range(0..burst.colors.len())];
            let size = random_in_range(rng, burst.size.0, burst.size.1);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life,
                max_life: burst.life.1,
                color,
                size,
                gravity: burst.gravity,
            });
        }
    }

    /// Kicked-up dust when jumping
    pub fn dust_puff(&mut self, rng: &mut Pcg32, at: Vec2) {
        self.emit(rng, at, Burst {
            count: 8,
            colors: &DUST,
            speed: 2.5,
            size: (2.0, 5.0),
            life: (15.0, 25.0),
            angle: (PI * 0.9, PI * 2.1),
            gravity: 0.05,
        });
    }

    /// Landing impact
    pub fn land_thud(&mut self, rng: &mut Pcg32, at: Vec2) {
        self.emit(rng, at, Burst {
            count: 12,
            colors: &THUD,
            speed: 3.5,
            size: (2.0, 6.0),
            life: (10.0, 20.0),
            angle: (PI * 0.7, PI * 2.3),
            gravity: 0.08,
        });
    }

    /// Milestone celebration
    pub fn score_sparkle(&mut self, rng: &mut Pcg32, at: Vec2) {
        self.emit(rng, at, Burst {
            count: 16,
            colors: &SPARKLE,
            speed: 4.0,
            size: (3.0, 7.0),
            life: (25.0, 40.0),
            angle: (0.0, TAU),
            gravity: 0.06,
        });
    }

    /// Game over debris around the avatar
    pub fn hit_debris(&mut self, rng: &mut Pcg32, at: Vec2) {
        self.emit(rng, at, Burst {
            count: 20,
            colors: &DEBRIS,
            speed: 5.0,
            size: (2.0, 8.0),
            life: (20.0, 35.0),
            angle: (0.0, TAU),
            gravity: 0.15,
        });
    }

    /// Boss defeated
    pub fn boss_burst(&mut self, rng: &mut Pcg32, at: Vec2) {
        self.emit(rng, at, Burst {
            count: 60,
            colors: &CONFETTI,
            speed: 8.0,
            size: (4.0, 14.0),
            life: (30.0, 60.0),
            angle: (0.0, TAU),
            gravity: 0.12,
        });
    }

    /// Power-up collected
    pub fn power_up_collect(&mut self, rng: &mut Pcg32, at: Vec2) {
        self.emit(rng, at, Burst {
            count: 12,
            colors: &PICKUP,
            speed: 3.0,
            size: (2.0, 6.0),
            life: (20.0, 30.0),
            angle: (0.0, TAU),
            gravity: 0.04,
        });
    }

    /// Integrate one tick and drop dead particles
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += p.gravity;
            p.vel.x *= DRAG;
            p.life -= 1.0;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_burst_counts() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ps = ParticleSystem::new();
        ps.boss_burst(&mut rng, Vec2::ZERO);
        assert_eq!(ps.count(), 60);
        ps.hit_debris(&mut rng, Vec2::ZERO);
        assert_eq!(ps.count(), 80);
    }

    #[test]
    fn test_life_strictly_decreases_until_pruned() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut ps = ParticleSystem::new();
        ps.dust_puff(&mut rng, Vec2::new(70.0, 160.0));
        let before: Vec<f32> = ps.particles.iter().map(|p| p.life).collect();
        ps.update();
        for (p, life) in ps.particles.iter().zip(before) {
            assert!(p.life < life);
        }
        // Longest dust life is 25 ticks
        for _ in 0..25 {
            ps.update();
        }
        assert_eq!(ps.count(), 0);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut ps = ParticleSystem::new();
        ps.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            life: 10.0,
            max_life: 10.0,
            color: Color::WHITE,
            size: 2.0,
            gravity: 0.5,
        });
        ps.update();
        ps.update();
        let p = &ps.particles[0];
        assert!(p.vel.y > 0.0);
        assert!(p.vel.x < 1.0);
        assert!((p.alpha() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_cap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ps = ParticleSystem::new();
        for _ in 0..20 {
            ps.boss_burst(&mut rng, Vec2::ZERO);
        }
        assert_eq!(ps.count(), MAX_PARTICLES);
    }
}
