//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Entities kept in creation order
//! - No rendering or platform dependencies

pub mod ambient;
pub mod avatar;
pub mod boss;
pub mod collision;
pub mod ground;
pub mod obstacle;
pub mod particles;
pub mod powerup;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod world;

pub use avatar::{Avatar, AvatarMood};
pub use boss::{Boss, BossController, BossKind, BossPhase};
pub use collision::{Bounds, overlaps};
pub use obstacle::{FlightBand, Obstacle, ObstacleKind};
pub use powerup::{ActiveEffect, PowerUpItem, PowerUpKind, PowerUpSpawner};
pub use spawner::ObstacleSpawner;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, handle_action, pause, resume, tick, trigger_game_over};
pub use world::Viewport;
