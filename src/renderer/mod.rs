//! 2D rendering
//!
//! The renderer only reads the session state. It talks to the drawing
//! surface through the small `Canvas` trait so the same draw pass runs
//! against the browser canvas, a recording canvas in tests, or nothing.

pub mod entities;
pub mod overlay;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2d;

use glam::Vec2;

use crate::color::Color;
use crate::sim::{GamePhase, GameState};

/// Draw layers in back-to-front order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Ground,
    Particles,
    Obstacles,
    Boss,
    PowerUps,
    Avatar,
    Overlay,
}

impl Layer {
    pub const ORDER: [Layer; 8] = [
        Layer::Background,
        Layer::Ground,
        Layer::Particles,
        Layer::Obstacles,
        Layer::Boss,
        Layer::PowerUps,
        Layer::Avatar,
        Layer::Overlay,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Drawing surface port
pub trait Canvas {
    /// Marks the start of a layer. Backends may ignore it.
    fn begin_layer(&mut self, _layer: Layer) {}

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color);

    fn stroke_round_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        line_width: f32,
        color: Color,
    );

    /// Rectangle filled with a top-to-bottom gradient
    fn fill_vertical_gradient(&mut self, x: f32, y: f32, w: f32, h: f32, top: Color, bottom: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Color);

    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Color);

    /// Text vertically centered on `pos.y`
    fn fill_text(
        &mut self,
        text: &str,
        pos: Vec2,
        size_px: f32,
        bold: bool,
        align: TextAlign,
        color: Color,
    );
}

/// Canvas that draws nothing (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn fill_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: Color) {}
    fn fill_round_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: Color) {}
    fn stroke_round_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32, _: Color) {}
    fn fill_vertical_gradient(&mut self, _: f32, _: f32, _: f32, _: f32, _: Color, _: Color) {}
    fn fill_circle(&mut self, _: Vec2, _: f32, _: Color) {}
    fn fill_ellipse(&mut self, _: Vec2, _: Vec2, _: f32, _: Color) {}
    fn fill_polygon(&mut self, _: &[Vec2], _: Color) {}
    fn stroke_line(&mut self, _: Vec2, _: Vec2, _: f32, _: Color) {}
    fn fill_text(&mut self, _: &str, _: Vec2, _: f32, _: bool, _: TextAlign, _: Color) {}
}

/// Draw one full frame, back to front. Runs in every phase.
pub fn draw_frame(canvas: &mut dyn Canvas, state: &GameState, avatar_color: Color) {
    let viewport = &state.viewport;

    canvas.begin_layer(Layer::Background);
    scene::draw_sky(canvas, &state.sky, viewport);

    canvas.begin_layer(Layer::Ground);
    scene::draw_ground(canvas, &state.ground, viewport);

    canvas.begin_layer(Layer::Particles);
    scene::draw_particles(canvas, &state.particles);

    canvas.begin_layer(Layer::Obstacles);
    for obstacle in &state.obstacles.obstacles {
        entities::draw_obstacle(canvas, obstacle);
    }

    canvas.begin_layer(Layer::Boss);
    if let Some(boss) = &state.boss.boss {
        entities::draw_boss(canvas, boss);
    }

    canvas.begin_layer(Layer::PowerUps);
    entities::draw_powerups(canvas, &state.powerups);

    canvas.begin_layer(Layer::Avatar);
    entities::draw_avatar(canvas, &state.avatar, avatar_color);

    canvas.begin_layer(Layer::Overlay);
    if state.flash_ticks > 0 {
        overlay::draw_flash(canvas, viewport, state.flash_ticks);
    }
    match state.phase {
        GamePhase::Idle => overlay::draw_idle_prompt(canvas, viewport),
        GamePhase::GameOver => overlay::draw_game_over(canvas, viewport, state),
        GamePhase::Paused => overlay::draw_paused(canvas, viewport),
        GamePhase::Running | GamePhase::Boss => {}
    }
}
