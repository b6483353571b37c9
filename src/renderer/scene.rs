//! Background layers: sky, ground strip, particles

use std::f32::consts::TAU;

use glam::Vec2;

use super::Canvas;
use crate::color::Color;
use crate::sim::ambient::{DayNightCycle, NIGHT_TOP};
use crate::sim::ground::Ground;
use crate::sim::particles::ParticleSystem;
use crate::sim::world::Viewport;

const GROUND_FILL: Color = Color::rgb(0xe8, 0xd5, 0xc0);
const GROUND_LINE: Color = Color::rgb(0xc4, 0xa8, 0x82);
const TRACK_DASH: Color = Color::rgba(180, 150, 110, 77);
const FLOWER_CENTER: Color = Color::rgb(0xff, 0xf9, 0xa0);

pub fn draw_sky(canvas: &mut dyn Canvas, sky: &DayNightCycle, viewport: &Viewport) {
    let t = sky.night_amount();
    let (top, bottom) = sky.sky_colors();
    canvas.fill_vertical_gradient(0.0, 0.0, viewport.width, viewport.height, top, bottom);

    if sky.stars_visible() {
        for star in &sky.stars {
            let color = Color::WHITE.with_alpha(t * star.brightness());
            canvas.fill_circle(Vec2::new(star.x, star.y), star.size, color);
        }

        let moon = Vec2::new(viewport.width * 0.85, viewport.height * 0.15);
        let moon_alpha = (t * 2.0).min(1.0);
        canvas.fill_circle(moon, 18.0, Color::rgb(255, 255, 220).with_alpha(moon_alpha * 0.9));
        // Crescent
        let shadow = NIGHT_TOP.lerp(Color::BLACK, 0.15).with_alpha(moon_alpha * 0.85);
        canvas.fill_circle(moon - Vec2::new(6.0, 0.0), 16.0, shadow);
    }

    if sky.sun_visible() {
        let sun_alpha = 1.0 - t;
        let sun = Vec2::new(viewport.width * 0.88, viewport.height * 0.12);
        canvas.fill_circle(sun, 22.0, Color::rgb(255, 230, 100).with_alpha(sun_alpha * 0.9));
        let ray = Color::rgb(255, 220, 80).with_alpha(sun_alpha * 0.5);
        for i in 0..8 {
            let angle = i as f32 / 8.0 * TAU;
            let dir = Vec2::new(angle.cos(), angle.sin());
            canvas.stroke_line(sun + dir * 28.0, sun + dir * 36.0, 2.0, ray);
        }
    }
}

pub fn draw_ground(canvas: &mut dyn Canvas, ground: &Ground, viewport: &Viewport) {
    let gy = viewport.ground_y();
    canvas.fill_rect(0.0, gy, viewport.width, viewport.height - gy, GROUND_FILL);
    canvas.stroke_line(Vec2::new(0.0, gy), Vec2::new(viewport.width, gy), 2.0, GROUND_LINE);

    // Running-track dashes scroll with the world
    let dash_y = gy + 8.0;
    let mut x = -(ground.offset % 24.0);
    while x < viewport.width {
        canvas.stroke_line(Vec2::new(x, dash_y), Vec2::new(x + 8.0, dash_y), 1.0, TRACK_DASH);
        x += 24.0;
    }

    for flower in &ground.flowers {
        let center = Vec2::new(flower.x, flower.y);
        for i in 0..5 {
            let angle = i as f32 / 5.0 * TAU;
            let petal = center + Vec2::new(angle.cos(), angle.sin()) * flower.size;
            canvas.fill_ellipse(
                petal,
                Vec2::new(flower.size * 0.9, flower.size * 0.6),
                angle,
                flower.color,
            );
        }
        canvas.fill_circle(center, flower.size * 0.55, FLOWER_CENTER);
    }
}

pub fn draw_particles(canvas: &mut dyn Canvas, particles: &ParticleSystem) {
    for p in &particles.particles {
        let alpha = p.alpha();
        canvas.fill_circle(p.pos, p.size * alpha.max(0.3), p.color.with_alpha(alpha));
    }
}
