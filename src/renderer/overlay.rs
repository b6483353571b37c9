//! Phase-specific overlays drawn above everything else

use glam::Vec2;

use super::{Canvas, TextAlign};
use crate::color::Color;
use crate::sim::GameState;
use crate::sim::world::Viewport;

const PANEL: Color = Color::rgba(255, 255, 255, 46);
const GAME_OVER_RED: Color = Color::rgb(0xc0, 0x30, 0x50);
const SUBTLE: Color = Color::rgb(0x55, 0x55, 0x55);

/// White tint after a milestone, fading with the remaining flash ticks
pub fn draw_flash(canvas: &mut dyn Canvas, viewport: &Viewport, flash_ticks: u32) {
    let alpha = (flash_ticks as f32 * 0.06).min(1.0);
    canvas.fill_rect(0.0, 0.0, viewport.width, viewport.height, Color::WHITE.with_alpha(alpha));
}

pub fn draw_idle_prompt(canvas: &mut dyn Canvas, viewport: &Viewport) {
    let (bw, bh) = (200.0, 44.0);
    let bx = viewport.width / 2.0 - bw / 2.0;
    let by = viewport.height / 2.0 - bh / 2.0 + 10.0;
    canvas.fill_round_rect(bx, by, bw, bh, 12.0, Color::rgba(255, 255, 255, 38));
    canvas.fill_text(
        "Press Space / Tap to Start",
        Vec2::new(viewport.width / 2.0, by + bh / 2.0),
        16.0,
        true,
        TextAlign::Center,
        Color::INK,
    );
}

pub fn draw_game_over(canvas: &mut dyn Canvas, viewport: &Viewport, state: &GameState) {
    let (bw, bh) = (220.0, 70.0);
    let cx = viewport.width / 2.0;
    let bx = cx - bw / 2.0;
    let by = viewport.height / 2.0 - bh / 2.0;
    canvas.fill_round_rect(bx, by, bw, bh, 14.0, PANEL);
    canvas.fill_text(
        "Game Over!",
        Vec2::new(cx, by + 22.0),
        22.0,
        true,
        TextAlign::Center,
        GAME_OVER_RED,
    );
    canvas.fill_text(
        "Press Space / Tap to Retry",
        Vec2::new(cx, by + 52.0),
        14.0,
        false,
        TextAlign::Center,
        SUBTLE,
    );
    canvas.fill_text(
        &format!("{}  HI {}", state.displayed_score(), state.high_score),
        Vec2::new(viewport.width - 12.0 - 90.0, 18.0),
        12.0,
        true,
        TextAlign::Left,
        Color::INK,
    );
}

pub fn draw_paused(canvas: &mut dyn Canvas, viewport: &Viewport) {
    canvas.fill_rect(0.0, 0.0, viewport.width, viewport.height, Color::rgba(0, 0, 0, 64));
    canvas.fill_text(
        "Paused",
        Vec2::new(viewport.width / 2.0, viewport.height / 2.0),
        20.0,
        true,
        TextAlign::Center,
        Color::WHITE,
    );
}
