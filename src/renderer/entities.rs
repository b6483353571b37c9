//! Per-entity draw routines
//!
//! Obstacles dispatch on their kind; every kind shares the same geometry
//! record so only the art differs.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::{Canvas, TextAlign};
use crate::color::Color;
use crate::sim::avatar::{Avatar, AvatarMood};
use crate::sim::boss::{Boss, BossKind, BossPhase, TimerBand};
use crate::sim::obstacle::{Obstacle, ObstacleKind};
use crate::sim::powerup::{POWERUP_SIZE, PowerUpKind, PowerUpSpawner};

const CACTUS: Color = Color::rgb(0x5a, 0x9e, 0x6f);
const CACTUS_DARK: Color = Color::rgb(0x4d, 0x8c, 0x60);
const CACTUS_LIGHT: Color = Color::rgb(0x5f, 0xb8, 0x75);
const BIRD: Color = Color::rgb(0xf4, 0xa0, 0xb8);
const BEAK: Color = Color::rgb(0xf0, 0xc0, 0x30);
const CAR: Color = Color::rgb(0xa0, 0xd4, 0xf8);
const SIGN: Color = Color::rgb(0xf7, 0xe0, 0x7a);
const POLE: Color = Color::rgb(0x88, 0x88, 0x88);
const BLUSH: Color = Color::rgba(255, 150, 150, 102);
const SHIELD_BUBBLE: Color = Color::rgba(100, 180, 255, 77);

fn draw_eyes(canvas: &mut dyn Canvas, cx: f32, y: f32, spacing: f32, radius: f32) {
    for dx in [-spacing, spacing] {
        canvas.fill_circle(Vec2::new(cx + dx, y), radius, Color::INK);
        canvas.fill_circle(
            Vec2::new(cx + dx + radius * 0.3, y - radius * 0.3),
            radius * 0.4,
            Color::WHITE,
        );
    }
}

pub fn draw_obstacle(canvas: &mut dyn Canvas, o: &Obstacle) {
    let (x, y, w, h) = (o.x, o.y, o.w, o.h);
    let cx = x + w / 2.0;
    match o.kind {
        ObstacleKind::SmallCactus => {
            canvas.fill_round_rect(x + 8.0, y + 12.0, w - 16.0, h - 12.0, 4.0, CACTUS);
            canvas.fill_round_rect(x, y + 12.0, 10.0, 20.0, 3.0, CACTUS);
            canvas.fill_round_rect(x + w - 10.0, y + 16.0, 10.0, 20.0, 3.0, CACTUS);
            draw_eyes(canvas, cx, y + 24.0, 5.0, 3.0);
            canvas.fill_ellipse(Vec2::new(cx - 8.0, y + 29.0), Vec2::new(4.0, 3.0), 0.0, BLUSH);
            canvas.fill_ellipse(Vec2::new(cx + 8.0, y + 29.0), Vec2::new(4.0, 3.0), 0.0, BLUSH);
        }
        ObstacleKind::LargeCactus => {
            canvas.fill_round_rect(x + 10.0, y + 8.0, w - 20.0, h - 8.0, 5.0, CACTUS_DARK);
            canvas.fill_round_rect(x, y + 14.0, 12.0, 28.0, 4.0, CACTUS_DARK);
            canvas.fill_round_rect(x + w - 12.0, y + 22.0, 12.0, 28.0, 4.0, CACTUS_DARK);
            canvas.fill_round_rect(cx - 10.0, y + 12.0, 20.0, 28.0, 4.0, CACTUS_LIGHT);
            draw_eyes(canvas, cx, y + 26.0, 6.0, 4.0);
        }
        ObstacleKind::Bird(_) => {
            let wing_y = if o.wings_up() { y - 6.0 } else { y + h - 4.0 };
            canvas.fill_polygon(
                &[
                    Vec2::new(x + 14.0, y + h / 2.0),
                    Vec2::new(x + 30.0, wing_y),
                    Vec2::new(x + 40.0, y + h / 2.0),
                ],
                BIRD.lighten(-20),
            );
            canvas.fill_ellipse(
                Vec2::new(cx, y + h / 2.0),
                Vec2::new(w / 2.0 - 6.0, h / 2.0 - 4.0),
                0.0,
                BIRD,
            );
            canvas.fill_polygon(
                &[
                    Vec2::new(x + 2.0, y + h / 2.0 - 3.0),
                    Vec2::new(x + 10.0, y + h / 2.0),
                    Vec2::new(x + 2.0, y + h / 2.0 + 3.0),
                ],
                BEAK,
            );
            canvas.fill_circle(Vec2::new(x + 14.0, y + h / 2.0 - 4.0), 2.5, Color::INK);
        }
        ObstacleKind::Car => {
            canvas.fill_round_rect(x, y + 14.0, w, h - 24.0, 8.0, CAR);
            canvas.fill_round_rect(x + 12.0, y, w - 26.0, 20.0, 8.0, CAR.lighten(-20));
            canvas.fill_round_rect(
                x + 18.0,
                y + 4.0,
                14.0,
                12.0,
                3.0,
                Color::WHITE.with_alpha(0.7),
            );
            let angle = o.wheel_angle();
            for wx in [x + 14.0, x + w - 14.0] {
                let hub = Vec2::new(wx, y + h - 10.0);
                canvas.fill_circle(hub, 9.0, Color::INK);
                let spoke = Vec2::new(angle.cos(), angle.sin()) * 6.0;
                canvas.stroke_line(hub - spoke, hub + spoke, 2.0, Color::rgb(0xbb, 0xbb, 0xbb));
            }
        }
        ObstacleKind::RoadSign => {
            canvas.fill_rect(cx - 3.0, y + 30.0, 6.0, h - 30.0, POLE);
            let center = Vec2::new(cx, y + 18.0);
            let points: Vec<Vec2> = (0..8)
                .map(|i| {
                    let a = i as f32 / 8.0 * TAU + PI / 8.0;
                    center + Vec2::new(a.cos(), a.sin()) * 20.0
                })
                .collect();
            canvas.fill_polygon(&points, SIGN);
            draw_eyes(canvas, cx, y + 16.0, 6.0, 3.0);
        }
    }
}

pub fn draw_boss(canvas: &mut dyn Canvas, boss: &Boss) {
    let alpha = if boss.flashing() { 0.6 } else { 1.0 };
    let (x, y, w, h) = (boss.pos.x, boss.pos.y, boss.w, boss.h);
    let cx = x + w / 2.0;
    let tint = |c: Color| c.with_alpha(alpha);

    match boss.kind {
        BossKind::GiantCactus => {
            let arm_bob = (boss.frame as f32 * 0.1).sin() * 4.0;
            canvas.fill_round_rect(
                x + 20.0,
                y + 20.0,
                w - 40.0,
                h - 20.0,
                10.0,
                tint(Color::rgb(0x3d, 0x7a, 0x50)),
            );
            canvas.fill_round_rect(x, y + 22.0 + arm_bob, 22.0, 46.0, 8.0, tint(CACTUS_DARK));
            canvas.fill_round_rect(
                x + w - 22.0,
                y + 30.0 - arm_bob,
                22.0,
                46.0,
                8.0,
                tint(CACTUS_DARK),
            );
            canvas.fill_round_rect(cx - 22.0, y + 14.0, 44.0, 52.0, 10.0, tint(CACTUS_LIGHT));
        }
        BossKind::MegaPterodactyl => {
            let wing = (boss.frame as f32 * 0.15).sin() * 18.0;
            let purple = tint(Color::rgb(0x7a, 0x5c, 0xc0));
            canvas.fill_polygon(
                &[
                    Vec2::new(cx - 10.0, y + h / 2.0),
                    Vec2::new(x, y + h / 2.0 - 20.0 + wing),
                    Vec2::new(cx - 30.0, y + h / 2.0 + 10.0),
                ],
                purple,
            );
            canvas.fill_polygon(
                &[
                    Vec2::new(cx + 10.0, y + h / 2.0),
                    Vec2::new(x + w, y + h / 2.0 - 20.0 + wing),
                    Vec2::new(cx + 30.0, y + h / 2.0 + 10.0),
                ],
                purple,
            );
            canvas.fill_ellipse(
                Vec2::new(cx, y + h / 2.0),
                Vec2::new(30.0, 22.0),
                0.0,
                tint(Color::rgb(0x6a, 0x4f, 0xa8)),
            );
            canvas.fill_ellipse(
                Vec2::new(cx, y + h / 2.0 + 4.0),
                Vec2::new(18.0, 12.0),
                0.0,
                tint(Color::rgb(0x9b, 0x7f, 0xd4)),
            );
            canvas.fill_polygon(
                &[
                    Vec2::new(x + 14.0, y + h / 2.0 - 14.0),
                    Vec2::new(cx - 22.0, y + h / 2.0 - 18.0),
                    Vec2::new(cx - 22.0, y + h / 2.0 - 8.0),
                ],
                tint(BEAK),
            );
        }
    }
    // Angry eyes
    for dx in [-10.0, 10.0] {
        canvas.fill_circle(Vec2::new(cx + dx, y + 34.0), 6.0, tint(Color::WHITE));
        canvas.fill_circle(Vec2::new(cx + dx, y + 35.0), 3.0, tint(Color::rgb(0xcc, 0x00, 0x00)));
    }

    if boss.phase != BossPhase::Exiting {
        let bar_y = y - 18.0;
        canvas.fill_round_rect(x, bar_y, w, 10.0, 3.0, Color::rgba(0, 0, 0, 102));
        let fill = match boss.timer_band() {
            TimerBand::Plenty => Color::rgb(0x88, 0xd8, 0xa0),
            TimerBand::Half => Color::rgb(0xf7, 0xe0, 0x7a),
            TimerBand::Low => Color::rgb(0xf4, 0xa0, 0xa0),
        };
        canvas.fill_round_rect(x, bar_y, w * boss.progress(), 10.0, 3.0, fill);
    }
}

pub fn badge_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Shield => Color::rgb(0x93, 0xc4, 0xf5),
        PowerUpKind::SlowMotion => Color::rgb(0xc4, 0xa0, 0xe8),
        PowerUpKind::ScoreMultiplier => Color::rgb(0xf7, 0xe0, 0x7a),
    }
}

/// Pickups plus the active-effect timer bar in the top-left corner
pub fn draw_powerups(canvas: &mut dyn Canvas, powerups: &PowerUpSpawner) {
    for item in &powerups.items {
        let x = item.x;
        let y = item.y + item.bob_offset();
        let color = badge_color(item.kind);
        canvas.fill_round_rect(x, y, POWERUP_SIZE, POWERUP_SIZE, 8.0, color);
        canvas.stroke_round_rect(
            x,
            y,
            POWERUP_SIZE,
            POWERUP_SIZE,
            8.0,
            2.0,
            Color::WHITE.with_alpha(0.6),
        );
        let center = Vec2::new(x + POWERUP_SIZE / 2.0, y + POWERUP_SIZE / 2.0);
        canvas.fill_text(item.kind.label(), center, 10.0, true, TextAlign::Center, Color::INK);
        canvas.fill_ellipse(
            Vec2::new(center.x, y + POWERUP_SIZE + 6.0),
            Vec2::new(12.0, 4.0),
            0.0,
            Color::WHITE.with_alpha(0.15),
        );
    }

    if let Some(effect) = &powerups.active_effect {
        let (bx, by, bar_w) = (10.0, 10.0, 80.0);
        canvas.fill_round_rect(bx, by, bar_w, 14.0, 4.0, Color::rgba(0, 0, 0, 77));
        canvas.fill_round_rect(
            bx,
            by,
            bar_w * effect.progress(),
            14.0,
            4.0,
            badge_color(effect.kind),
        );
        canvas.fill_text(
            effect.kind.label(),
            Vec2::new(bx + bar_w / 2.0, by + 7.0),
            9.0,
            true,
            TextAlign::Center,
            Color::WHITE,
        );
    }
}

pub fn draw_avatar(canvas: &mut dyn Canvas, avatar: &Avatar, color: Color) {
    let (x, y, w, h) = (avatar.pos.x, avatar.pos.y, avatar.width, avatar.height);

    if avatar.shield_bubble_visible() {
        canvas.fill_ellipse(
            Vec2::new(x + w / 2.0, y + h / 2.0),
            Vec2::new(w * 0.8, h * 0.7),
            0.0,
            SHIELD_BUBBLE,
        );
    }

    // Body, head, belly
    canvas.fill_round_rect(x + 4.0, y + 8.0, w - 8.0, h - 16.0, 8.0, color);
    canvas.fill_round_rect(x + 10.0, y, w - 8.0, 32.0, 10.0, color);
    canvas.fill_rect(x + 10.0, y + 20.0, w - 16.0, 16.0, color);
    canvas.fill_round_rect(x + 8.0, y + 22.0, w - 20.0, h - 34.0, 6.0, color.lighten(40));

    // Tail
    canvas.fill_polygon(
        &[
            Vec2::new(x + 4.0, y + h - 20.0),
            Vec2::new(x - 10.0, y + h - 26.0),
            Vec2::new(x + 4.0, y + h - 16.0),
        ],
        color,
    );

    // Legs
    let (front, back) = if avatar.grounded {
        if avatar.legs_up() { (8.0, 16.0) } else { (16.0, 8.0) }
    } else {
        (16.0, 16.0)
    };
    canvas.fill_rect(x + 12.0, y + h - 16.0, 10.0, front, color);
    canvas.fill_rect(x + 24.0, y + h - 16.0, 10.0, back, color);

    // Face
    let cx = x + w / 2.0 + 6.0;
    match avatar.mood {
        AvatarMood::Hit => {
            for dx in [-7.0, 5.0] {
                let c = Vec2::new(cx + dx, y + 11.0);
                canvas.stroke_line(c - Vec2::splat(3.0), c + Vec2::splat(3.0), 2.0, Color::INK);
                canvas.stroke_line(
                    c + Vec2::new(-3.0, 3.0),
                    c + Vec2::new(3.0, -3.0),
                    2.0,
                    Color::INK,
                );
            }
        }
        AvatarMood::Neutral | AvatarMood::Jumping | AvatarMood::Shielded => {
            draw_eyes(canvas, cx - 1.0, y + 11.0, 6.0, 3.0);
            if avatar.mood == AvatarMood::Jumping {
                canvas.fill_circle(Vec2::new(cx - 1.0, y + 19.0), 3.0, Color::INK);
            }
        }
    }
    canvas.fill_ellipse(
        Vec2::new(cx - 12.0, y + 16.0),
        Vec2::new(4.0, 2.5),
        0.0,
        Color::rgba(255, 150, 170, 128),
    );
}
