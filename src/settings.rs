//! Game configuration and difficulty presets
//!
//! Owned outside the simulation and persisted in LocalStorage. The core only
//! reads it, once per tick, through a `ConfigSource`.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::persistence::KeyValueStore;

/// Which obstacle family the spawner draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleTheme {
    #[default]
    Classic,
    Birds,
    Mixed,
    Urban,
}

impl ObstacleTheme {
    pub const ALL: [ObstacleTheme; 4] = [
        ObstacleTheme::Classic,
        ObstacleTheme::Birds,
        ObstacleTheme::Mixed,
        ObstacleTheme::Urban,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleTheme::Classic => "classic",
            ObstacleTheme::Birds => "birds",
            ObstacleTheme::Mixed => "mixed",
            ObstacleTheme::Urban => "urban",
        }
    }

    /// Following theme, wrapping around
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(ObstacleTheme::Classic),
            "birds" | "bird" => Some(ObstacleTheme::Birds),
            "mixed" => Some(ObstacleTheme::Mixed),
            "urban" | "city" => Some(ObstacleTheme::Urban),
            _ => None,
        }
    }
}

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Custom,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Custom,
    ];

    /// Following tier, wrapping around
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&d| d == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Custom => "custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "custom" => Some(Difficulty::Custom),
            _ => None,
        }
    }
}

/// Physics and pacing numbers for one difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyPreset {
    /// Scroll speed at tick 0 (px/tick)
    pub base_speed: f32,
    /// Speed added per elapsed tick
    pub speed_increment: f32,
    /// Shortest gap between obstacles (ticks)
    pub min_spawn: u32,
    /// Longest gap between obstacles (ticks)
    pub max_spawn: u32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_velocity: f32,
    /// Downward acceleration (px/tick²)
    pub gravity: f32,
}

impl DifficultyPreset {
    pub const EASY: Self = Self {
        base_speed: 4.0,
        speed_increment: 0.0005,
        min_spawn: 90,
        max_spawn: 150,
        jump_velocity: -17.0,
        gravity: 0.7,
    };
    pub const MEDIUM: Self = Self {
        base_speed: 6.0,
        speed_increment: 0.001,
        min_spawn: 60,
        max_spawn: 120,
        jump_velocity: -15.0,
        gravity: 0.8,
    };
    pub const HARD: Self = Self {
        base_speed: 10.0,
        speed_increment: 0.002,
        min_spawn: 40,
        max_spawn: 80,
        jump_velocity: -14.0,
        gravity: 0.9,
    };

    /// Preset for custom sliders. Inputs are clamped to their slider ranges.
    pub fn custom(speed: f32, frequency: f32) -> Self {
        let speed = sanitize(speed, CUSTOM_SPEED_RANGE, DEFAULT_CUSTOM_SPEED);
        let freq = sanitize(frequency, CUSTOM_FREQUENCY_RANGE, DEFAULT_CUSTOM_FREQUENCY);
        Self {
            base_speed: speed,
            speed_increment: 0.001,
            min_spawn: (110.0 - freq * 8.0).floor() as u32,
            max_spawn: (160.0 - freq * 5.0).floor() as u32,
            jump_velocity: Self::MEDIUM.jump_velocity,
            gravity: Self::MEDIUM.gravity,
        }
    }
}

pub const CUSTOM_SPEED_RANGE: (f32, f32) = (1.0, 20.0);
pub const CUSTOM_FREQUENCY_RANGE: (f32, f32) = (1.0, 10.0);
const DEFAULT_CUSTOM_SPEED: f32 = 6.0;
const DEFAULT_CUSTOM_FREQUENCY: f32 = 5.0;
const DEFAULT_AVATAR_COLOR: Color = Color::rgb(0x53, 0x53, 0x53);

fn sanitize(value: f32, range: (f32, f32), fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(range.0, range.1)
    } else {
        fallback
    }
}

/// Player-facing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Avatar body color as `#rrggbb`
    pub avatar_color: String,
    pub obstacle_theme: ObstacleTheme,
    pub difficulty: Difficulty,
    /// Base speed for `Difficulty::Custom` (1-20)
    pub custom_speed: f32,
    /// Spawn frequency for `Difficulty::Custom` (1-10)
    pub custom_frequency: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            avatar_color: DEFAULT_AVATAR_COLOR.to_hex(),
            obstacle_theme: ObstacleTheme::Classic,
            difficulty: Difficulty::Medium,
            custom_speed: DEFAULT_CUSTOM_SPEED,
            custom_frequency: DEFAULT_CUSTOM_FREQUENCY,
        }
    }
}

impl GameConfig {
    /// Resolve the active difficulty preset
    pub fn preset(&self) -> DifficultyPreset {
        match self.difficulty {
            Difficulty::Easy => DifficultyPreset::EASY,
            Difficulty::Medium => DifficultyPreset::MEDIUM,
            Difficulty::Hard => DifficultyPreset::HARD,
            Difficulty::Custom => {
                DifficultyPreset::custom(self.custom_speed, self.custom_frequency)
            }
        }
    }

    /// Avatar color, falling back to the default gray when unparsable
    pub fn avatar_color(&self) -> Color {
        Color::from_hex(&self.avatar_color).unwrap_or(DEFAULT_AVATAR_COLOR)
    }

    /// Storage key
    const STORAGE_KEY: &'static str = "dino_dash_settings";

    /// Load from storage, falling back to defaults on any failure
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded settings from storage");
                    return config;
                }
                Err(e) => log::warn!("Stored settings unreadable: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Settings storage unavailable: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save to storage (best effort)
    pub fn save(&self, store: &impl KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Settings not serializable: {}", e);
                return;
            }
        };
        match store.set_item(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}

/// Read accessor for the live configuration, polled once per tick
pub trait ConfigSource {
    fn current(&self) -> GameConfig;
}

impl ConfigSource for GameConfig {
    fn current(&self) -> GameConfig {
        self.clone()
    }
}

/// Shared cell edited by the settings UI; edits apply on the next read
impl ConfigSource for Rc<RefCell<GameConfig>> {
    fn current(&self) -> GameConfig {
        self.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_presets_by_tier() {
        let mut config = GameConfig::default();
        assert_eq!(config.preset(), DifficultyPreset::MEDIUM);
        config.difficulty = Difficulty::Easy;
        assert_eq!(config.preset().base_speed, 4.0);
        config.difficulty = Difficulty::Hard;
        assert_eq!(config.preset().max_spawn, 80);
    }

    #[test]
    fn test_custom_spawn_formula() {
        let low = DifficultyPreset::custom(6.0, 1.0);
        assert_eq!((low.min_spawn, low.max_spawn), (102, 155));
        let high = DifficultyPreset::custom(6.0, 10.0);
        assert_eq!((high.min_spawn, high.max_spawn), (30, 110));
    }

    #[test]
    fn test_custom_values_clamped() {
        let p = DifficultyPreset::custom(99.0, -4.0);
        assert_eq!(p.base_speed, 20.0);
        assert_eq!(p.min_spawn, 102);
        let p = DifficultyPreset::custom(f32::NAN, f32::INFINITY);
        assert_eq!(p.base_speed, 6.0);
        assert_eq!(p.min_spawn, 70);
    }

    #[test]
    fn test_bad_color_falls_back() {
        let config = GameConfig {
            avatar_color: "chartreuse".into(),
            ..Default::default()
        };
        assert_eq!(config.avatar_color(), Color::rgb(0x53, 0x53, 0x53));
    }

    #[test]
    fn test_enum_names() {
        for theme in ObstacleTheme::ALL {
            assert_eq!(ObstacleTheme::from_str(theme.as_str()), Some(theme));
        }
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_next_cycles_through_all() {
        let mut d = Difficulty::Easy;
        for expected in [
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Custom,
            Difficulty::Easy,
        ] {
            d = d.next();
            assert_eq!(d, expected);
        }
        assert_eq!(ObstacleTheme::Urban.next(), ObstacleTheme::Classic);
        assert_eq!(ObstacleTheme::Classic.next(), ObstacleTheme::Birds);
    }

    #[test]
    fn test_load_save() {
        let store = MemoryStore::new();
        assert_eq!(GameConfig::load(&store), GameConfig::default());

        let config = GameConfig {
            obstacle_theme: ObstacleTheme::Urban,
            difficulty: Difficulty::Custom,
            custom_frequency: 9.0,
            ..Default::default()
        };
        config.save(&store);
        assert_eq!(GameConfig::load(&store), config);

        store.set_item(GameConfig::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(GameConfig::load(&store), GameConfig::default());
    }

    #[test]
    fn test_shared_cell_edits_visible_on_next_read() {
        let cell = Rc::new(RefCell::new(GameConfig::default()));
        let source: Box<dyn ConfigSource> = Box::new(cell.clone());
        cell.borrow_mut().difficulty = Difficulty::Hard;
        assert_eq!(source.current().difficulty, Difficulty::Hard);
    }
}
