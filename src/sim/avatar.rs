//! The player's avatar
//!
//! The avatar never moves horizontally; the world scrolls past it. Vertical
//! motion is constant-acceleration kinematics in screen space (y grows
//! downward, so a jump is a negative velocity).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use crate::consts::*;
use crate::settings::DifficultyPreset;

/// Visual state tag used to pick the avatar's face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AvatarMood {
    #[default]
    Neutral,
    Jumping,
    /// Sticky until the session is restarted
    Hit,
    Shielded,
}

/// The avatar entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub grounded: bool,
    pub mood: AvatarMood,
    pub shield_active: bool,
    /// Ticks of shield remaining
    pub shield_ticks: u32,
    ground_y: f32,
    jump_velocity: f32,
    gravity: f32,
    leg_frame: u32,
    legs_up: bool,
}

impl Avatar {
    /// Create an avatar standing on the ground line
    pub fn new(ground_y: f32, preset: &DifficultyPreset) -> Self {
        Self {
            pos: Vec2::new(AVATAR_X, ground_y - AVATAR_HEIGHT),
            vel: Vec2::ZERO,
            width: AVATAR_WIDTH,
            height: AVATAR_HEIGHT,
            grounded: true,
            mood: AvatarMood::Neutral,
            shield_active: false,
            shield_ticks: 0,
            ground_y,
            jump_velocity: preset.jump_velocity,
            gravity: preset.gravity,
            leg_frame: 0,
            legs_up: false,
        }
    }

    /// Y of the avatar's top edge when standing
    #[inline]
    pub fn rest_y(&self) -> f32 {
        self.ground_y - self.height
    }

    /// Start a jump. No-op while airborne. Returns whether a jump started.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel.y = self.jump_velocity;
        self.grounded = false;
        if self.mood != AvatarMood::Hit {
            self.mood = AvatarMood::Jumping;
        }
        true
    }

    /// Raise a fresh shield, replacing any remaining duration
    pub fn activate_shield(&mut self) {
        self.shield_active = true;
        self.shield_ticks = SHIELD_TICKS;
        if self.mood != AvatarMood::Hit {
            self.mood = AvatarMood::Shielded;
        }
    }

    /// Spend the shield to absorb one collision.
    /// Returns false when there was no shield to spend.
    pub fn consume_shield(&mut self) -> bool {
        if !self.shield_active {
            return false;
        }
        self.shield_active = false;
        self.shield_ticks = 0;
        self.mood = self.derive_mood();
        true
    }

    /// Freeze the face on the hit expression
    pub fn mark_hit(&mut self) {
        self.mood = AvatarMood::Hit;
    }

    /// Advance one tick of physics and timers
    pub fn update(&mut self, preset: &DifficultyPreset) {
        self.jump_velocity = preset.jump_velocity;
        self.gravity = preset.gravity;

        if !self.grounded {
            self.vel.y += self.gravity;
            self.pos.y += self.vel.y;
        }

        let rest = self.rest_y();
        if self.pos.y >= rest {
            self.pos.y = rest;
            self.vel.y = 0.0;
            self.grounded = true;
        }

        if self.shield_active {
            self.shield_ticks = self.shield_ticks.saturating_sub(1);
            if self.shield_ticks == 0 {
                self.shield_active = false;
            }
        }

        self.mood = self.derive_mood();

        self.leg_frame += 1;
        if self.leg_frame % 8 == 0 {
            self.legs_up = !self.legs_up;
        }
    }

    fn derive_mood(&self) -> AvatarMood {
        if self.mood == AvatarMood::Hit {
            AvatarMood::Hit
        } else if self.shield_active {
            AvatarMood::Shielded
        } else if !self.grounded {
            AvatarMood::Jumping
        } else {
            AvatarMood::Neutral
        }
    }

    /// Move the ground line (surface resize). A standing avatar follows it.
    pub fn set_ground_y(&mut self, ground_y: f32) {
        self.ground_y = ground_y;
        if self.grounded {
            self.pos.y = self.rest_y();
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Leg animation phase (presentational)
    pub fn legs_up(&self) -> bool {
        self.legs_up
    }

    /// Shield bubble blinks in 6-tick halves
    pub fn shield_bubble_visible(&self) -> bool {
        self.shield_active && (self.shield_ticks / 6) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f32 = 160.0;

    fn avatar() -> Avatar {
        Avatar::new(GROUND, &DifficultyPreset::MEDIUM)
    }

    #[test]
    fn test_starts_grounded_on_line() {
        let a = avatar();
        assert!(a.grounded);
        assert_eq!(a.pos.y, GROUND - AVATAR_HEIGHT);
        assert_eq!(a.pos.x, AVATAR_X);
    }

    #[test]
    fn test_jump_arc_lands_exactly_on_ground() {
        let preset = DifficultyPreset::MEDIUM;
        let mut a = avatar();
        let rest = a.rest_y();
        assert!(a.jump());
        assert_eq!(a.vel.y, preset.jump_velocity);

        a.update(&preset);
        assert!(a.pos.y < rest, "first airborne tick must rise");

        let mut prev_vel = a.vel.y;
        let mut ticks = 0;
        while !a.grounded {
            a.update(&preset);
            assert!(a.pos.y <= rest, "never recorded below the ground line");
            if !a.grounded {
                assert!(a.vel.y > prev_vel, "gravity accumulates");
                prev_vel = a.vel.y;
            }
            ticks += 1;
            assert!(ticks < 200);
        }
        assert_eq!(a.pos.y, rest);
        assert_eq!(a.vel.y, 0.0);
    }

    #[test]
    fn test_no_double_jump() {
        let preset = DifficultyPreset::MEDIUM;
        let mut a = avatar();
        a.jump();
        a.update(&preset);
        let vel = a.vel.y;
        assert!(!a.jump());
        assert_eq!(a.vel.y, vel);
    }

    #[test]
    fn test_shield_consumed_once() {
        let mut a = avatar();
        a.activate_shield();
        assert_eq!(a.mood, AvatarMood::Shielded);
        assert!(a.consume_shield());
        assert!(!a.consume_shield());
        assert!(!a.consume_shield());
        assert_eq!(a.mood, AvatarMood::Neutral);
        a.activate_shield();
        assert!(a.consume_shield());
    }

    #[test]
    fn test_shield_expires() {
        let preset = DifficultyPreset::MEDIUM;
        let mut a = avatar();
        a.activate_shield();
        for _ in 0..SHIELD_TICKS - 1 {
            a.update(&preset);
        }
        assert!(a.shield_active);
        a.update(&preset);
        assert!(!a.shield_active);
        assert_eq!(a.mood, AvatarMood::Neutral);
        assert!(!a.consume_shield());
    }

    #[test]
    fn test_hit_mood_is_sticky() {
        let preset = DifficultyPreset::MEDIUM;
        let mut a = avatar();
        a.mark_hit();
        a.activate_shield();
        a.jump();
        a.update(&preset);
        assert_eq!(a.mood, AvatarMood::Hit);
    }

    #[test]
    fn test_physics_follows_preset_each_tick() {
        let mut a = avatar();
        a.update(&DifficultyPreset::EASY);
        a.jump();
        assert_eq!(a.vel.y, DifficultyPreset::EASY.jump_velocity);
    }

    #[test]
    fn test_resize_keeps_standing_avatar_on_ground() {
        let mut a = avatar();
        a.set_ground_y(300.0);
        assert_eq!(a.pos.y, 300.0 - AVATAR_HEIGHT);
        a.jump();
        a.update(&DifficultyPreset::MEDIUM);
        let y = a.pos.y;
        a.set_ground_y(400.0);
        assert_eq!(a.pos.y, y);
    }

    #[test]
    fn test_legs_toggle_every_eight_ticks() {
        let preset = DifficultyPreset::MEDIUM;
        let mut a = avatar();
        let start = a.legs_up();
        for _ in 0..7 {
            a.update(&preset);
        }
        assert_eq!(a.legs_up(), start);
        a.update(&preset);
        assert_ne!(a.legs_up(), start);
    }
}
