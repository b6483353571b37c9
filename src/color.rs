//! RGBA colors with hex parsing and interpolation

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const INK: Self = Self::rgb(0x33, 0x33, 0x33);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` (leading `#` optional). Returns None for anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let clean = hex.trim().trim_start_matches('#');
        if clean.len() != 6 {
            return None;
        }
        let num = u32::from_str_radix(clean, 16).ok()?;
        Some(Self::rgb(
            ((num >> 16) & 0xff) as u8,
            ((num >> 8) & 0xff) as u8,
            (num & 0xff) as u8,
        ))
    }

    /// Hex string without alpha (`#rrggbb`)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS color string, `rgba()` when translucent
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            self.to_hex()
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }

    /// Same color with alpha scaled by `alpha` (0-1)
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * self.a as f32).round() as u8;
        Self { a, ..self }
    }

    /// Shift every channel by `amount`, saturating at 0 and 255
    pub fn lighten(self, amount: i16) -> Self {
        let shift = |c: u8| (c as i16 + amount).clamp(0, 255) as u8;
        Self {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
            a: self.a,
        }
    }

    /// Linear interpolation between two colors (`t` clamped to [0, 1])
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hex_round_trip_and_rejects() {
        let c = Color::from_hex("#c8b4e8").unwrap();
        assert_eq!(c, Color::rgb(0xc8, 0xb4, 0xe8));
        assert_eq!(c.to_hex(), "#c8b4e8");
        assert_eq!(Color::from_hex("535353"), Some(Color::rgb(0x53, 0x53, 0x53)));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_lerp_endpoints() {
        let day = Color::from_hex("#c8b4e8").unwrap();
        let night = Color::from_hex("#1a0a3c").unwrap();
        assert_eq!(day.lerp(night, 0.0), day);
        assert_eq!(day.lerp(night, 1.0), night);
        assert_eq!(day.lerp(night, 7.0), night);
    }

    #[test]
    fn test_css_translucent() {
        assert_eq!(Color::WHITE.to_css(), "#ffffff");
        assert_eq!(Color::WHITE.with_alpha(0.5).to_css(), "rgba(255,255,255,0.502)");
    }

    proptest! {
        #[test]
        fn lerp_stays_between_channels(
            a in any::<(u8, u8, u8)>(),
            b in any::<(u8, u8, u8)>(),
            t in 0.0f32..=1.0,
        ) {
            let ca = Color::rgb(a.0, a.1, a.2);
            let cb = Color::rgb(b.0, b.1, b.2);
            let m = ca.lerp(cb, t);
            prop_assert!(m.r >= ca.r.min(cb.r) && m.r <= ca.r.max(cb.r));
            prop_assert!(m.g >= ca.g.min(cb.g) && m.g <= ca.g.max(cb.g));
            prop_assert!(m.b >= ca.b.min(cb.b) && m.b <= ca.b.max(cb.b));
        }
    }
}
