//! Axis-aligned collision detection
//!
//! Every hazard in the runner is a box. Boxes are shrunk by a fixed inset
//! before testing, so grazing contact with the decorative edges of a sprite
//! does not end the run.

use serde::{Deserialize, Serialize};

pub use crate::consts::HITBOX_INSET;

/// Axis-aligned box in surface pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Inset overlap test against another box
    #[inline]
    pub fn overlaps(&self, other: &Bounds, inset: f32) -> bool {
        overlaps(self, other, inset)
    }
}

/// True when `a` and `b`, each shrunk by `inset` on all sides, intersect on
/// both axes. Boxes meeting exactly at the shrunk edge do not overlap.
pub fn overlaps(a: &Bounds, b: &Bounds, inset: f32) -> bool {
    let ax1 = a.x + inset;
    let ay1 = a.y + inset;
    let ax2 = a.x + a.w - inset;
    let ay2 = a.y + a.h - inset;
    let bx1 = b.x + inset;
    let by1 = b.y + inset;
    let bx2 = b.x + b.w - inset;
    let by2 = b.y + b.h - inset;
    ax1 < bx2 && ax2 > bx1 && ay1 < by2 && ay2 > by1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clear_overlap() {
        let a = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let b = Bounds::new(20.0, 20.0, 50.0, 50.0);
        assert!(overlaps(&a, &b, HITBOX_INSET));
    }

    #[test]
    fn test_raw_overlap_hidden_by_inset() {
        // Raw boxes overlap by 10px; insets remove 16px of it
        let a = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let b = Bounds::new(40.0, 0.0, 50.0, 50.0);
        assert!(overlaps(&a, &b, 0.0));
        assert!(!overlaps(&a, &b, HITBOX_INSET));
    }

    #[test]
    fn test_touching_at_inset_boundary_is_not_overlap() {
        // a's shrunk right edge = 42, b's shrunk left edge = 34 + 8 = 42
        let a = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let b = Bounds::new(34.0, 0.0, 50.0, 50.0);
        assert!(!overlaps(&a, &b, HITBOX_INSET));
        let b = Bounds::new(33.9, 0.0, 50.0, 50.0);
        assert!(overlaps(&a, &b, HITBOX_INSET));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let b = Bounds::new(10.0, 200.0, 50.0, 50.0);
        assert!(!overlaps(&a, &b, HITBOX_INSET));
    }

    fn arb_bounds() -> impl Strategy<Value = Bounds> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Bounds::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_bounds(), b in arb_bounds(), inset in 0.0f32..20.0) {
            prop_assert_eq!(overlaps(&a, &b, inset), overlaps(&b, &a, inset));
        }

        #[test]
        fn overlap_matches_interval_definition(a in arb_bounds(), b in arb_bounds()) {
            let i = HITBOX_INSET;
            let x_hit = a.x + i < b.x + b.w - i && a.x + a.w - i > b.x + i;
            let y_hit = a.y + i < b.y + b.h - i && a.y + a.h - i > b.y + i;
            prop_assert_eq!(overlaps(&a, &b, i), x_hit && y_hit);
        }

        #[test]
        fn larger_inset_never_creates_overlap(
            a in arb_bounds(),
            b in arb_bounds(),
            inset in 0.0f32..20.0,
        ) {
            if overlaps(&a, &b, inset + 1.0) {
                prop_assert!(overlaps(&a, &b, inset));
            }
        }
    }
}
