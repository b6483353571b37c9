//! Surface geometry shared by every entity
//!
//! The canvas can be resized at any time; everything that depends on the
//! ground line or the right edge reads it from here instead of caching it.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Size of the drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_width(DEFAULT_SURFACE_WIDTH)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Derive the surface size from the laid-out width of the canvas.
    /// A zero or unknown width falls back to the default.
    pub fn from_width(width: f32) -> Self {
        let width = if width.is_finite() && width >= 1.0 {
            width.floor()
        } else {
            DEFAULT_SURFACE_WIDTH
        };
        let height = (width * SURFACE_ASPECT).floor().max(MIN_SURFACE_HEIGHT);
        Self { width, height }
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_MARGIN
    }

    /// X coordinate where new obstacles and pickups appear
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.width + SPAWN_MARGIN
    }
}
