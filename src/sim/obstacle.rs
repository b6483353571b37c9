//! Obstacles: one shared geometry record plus a closed set of kinds
//!
//! Kinds differ only in size, vertical placement and how they are drawn;
//! movement and retirement are shared.

use serde::{Deserialize, Serialize};

use super::collision::Bounds;

/// Retire an obstacle once its right edge is this far past the left edge
pub const OBSTACLE_EXIT_MARGIN: f32 = 50.0;

/// Bird flight band, measured as the bird's top edge above the ground line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightBand {
    Low,
    Mid,
    High,
}

impl FlightBand {
    pub const ALL: [FlightBand; 3] = [FlightBand::Low, FlightBand::Mid, FlightBand::High];

    /// Distance from the ground line up to the bird's top edge
    pub fn altitude(&self) -> f32 {
        match self {
            FlightBand::Low => 40.0,
            FlightBand::Mid => 90.0,
            FlightBand::High => 140.0,
        }
    }
}

/// Obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    SmallCactus,
    LargeCactus,
    Bird(FlightBand),
    Car,
    RoadSign,
}

impl ObstacleKind {
    /// Width and height in pixels
    pub fn size(&self) -> (f32, f32) {
        match self {
            ObstacleKind::SmallCactus => (28.0, 48.0),
            ObstacleKind::LargeCactus => (36.0, 72.0),
            ObstacleKind::Bird(_) => (52.0, 28.0),
            ObstacleKind::Car => (68.0, 44.0),
            ObstacleKind::RoadSign => (44.0, 70.0),
        }
    }

    /// Top edge for an obstacle standing on (or flying above) `ground_y`
    pub fn top_for_ground(&self, ground_y: f32) -> f32 {
        match self {
            ObstacleKind::Bird(band) => ground_y - band.altitude(),
            _ => ground_y - self.size().1,
        }
    }

    pub fn is_aerial(&self) -> bool {
        matches!(self, ObstacleKind::Bird(_))
    }
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Cleared once off-screen; never set again
    pub active: bool,
    /// Ticks since spawn (drives wing flaps and wheel spin)
    pub frame: u32,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, x: f32, ground_y: f32) -> Self {
        let (w, h) = kind.size();
        Self {
            id,
            kind,
            x,
            y: kind.top_for_ground(ground_y),
            w,
            h,
            active: true,
            frame: 0,
        }
    }

    /// Scroll left by `speed` and retire once far enough off-screen
    pub fn update(&mut self, speed: f32) {
        if !self.active {
            return;
        }
        self.x -= speed;
        self.frame = self.frame.wrapping_add(1);
        if self.x + self.w < -OBSTACLE_EXIT_MARGIN {
            self.active = false;
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.w, self.h)
    }

    /// Bird wings alternate every 12 ticks
    pub fn wings_up(&self) -> bool {
        (self.frame / 12) % 2 == 0
    }

    /// Car wheel rotation in radians
    pub fn wheel_angle(&self) -> f32 {
        (self.frame as f32 * 0.25) % std::f32::consts::TAU
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f32 = 160.0;

    #[test]
    fn test_ground_kinds_stand_on_ground() {
        for kind in [
            ObstacleKind::SmallCactus,
            ObstacleKind::LargeCactus,
            ObstacleKind::Car,
            ObstacleKind::RoadSign,
        ] {
            let o = Obstacle::new(1, kind, 820.0, GROUND);
            assert_eq!(o.y + o.h, GROUND, "{:?}", kind);
            assert!(!kind.is_aerial());
        }
    }

    #[test]
    fn test_bird_bands() {
        let low = Obstacle::new(1, ObstacleKind::Bird(FlightBand::Low), 0.0, GROUND);
        let high = Obstacle::new(2, ObstacleKind::Bird(FlightBand::High), 0.0, GROUND);
        assert_eq!(low.y, GROUND - 40.0);
        assert_eq!(high.y, GROUND - 140.0);
        assert_eq!((low.w, low.h), (52.0, 28.0));
    }

    #[test]
    fn test_retires_and_never_revives() {
        let mut o = Obstacle::new(1, ObstacleKind::LargeCactus, 820.0, GROUND);
        let mut ticks = 0;
        while o.active {
            o.update(6.0);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert!(o.x + o.w < -OBSTACLE_EXIT_MARGIN);
        let x = o.x;
        for _ in 0..10 {
            o.update(6.0);
            assert!(!o.active);
        }
        assert_eq!(o.x, x);
    }

    #[test]
    fn test_wing_flap_period() {
        let mut o = Obstacle::new(1, ObstacleKind::Bird(FlightBand::Mid), 0.0, GROUND);
        assert!(o.wings_up());
        for _ in 0..12 {
            o.update(1.0);
        }
        assert!(!o.wings_up());
    }
}
