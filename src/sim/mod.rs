//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod body;
pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use body::PlayerBody;
pub use collision::{Aabb, check};
pub use obstacle::{Obstacle, ObstacleField, ObstacleGeometry, ObstacleKind, SpawnPattern};
pub use snapshot::{ObstacleSnapshot, PlayerSnapshot, RenderSnapshot, background_tint};
pub use state::{GameEvent, GameState, SessionPhase};
pub use tick::{TickResult, tick};
