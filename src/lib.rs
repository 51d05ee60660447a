//! Spike Dash - A side-scrolling spike-jumping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawns, session state)
//! - `game`: Session driver binding the simulation to its collaborators
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Presentation/input interfaces and native helpers
//! - `highscores`: Best-effort high score persistence
//! - `settings`: Player preferences

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, TickOutcome};
pub use highscores::HighScoreStore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Visible field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    /// Top of the ground strip
    pub const GROUND_Y: f32 = FIELD_HEIGHT - 80.0;

    /// Player defaults - fixed column, center rests 16 above the ground line
    pub const PLAYER_X: f32 = 120.0;
    pub const PLAYER_Y_ON_GROUND: f32 = GROUND_Y - 16.0;
    pub const PLAYER_HALF_SIZE: f32 = 15.0;

    /// Gravity (units/tick²)
    pub const GRAVITY: f32 = 0.6;
    /// Vertical velocity applied on jump (units/tick, negative is up)
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Cosmetic spin while airborne (degrees/tick)
    pub const ROTATION_STEP: f32 = 12.0;

    /// Obstacle spawn column, just past the right edge
    pub const SPAWN_X: f32 = FIELD_WIDTH + 50.0;
    /// Horizontal spacing between obstacles of one group
    pub const GROUP_SPACING: f32 = 32.0;
    /// Obstacles at or left of `-PRUNE_MARGIN` are removed
    pub const PRUNE_MARGIN: f32 = 50.0;

    /// Difficulty ramp
    pub const BASE_SPEED: u32 = 5;
    pub const SPEED_STEP_POINTS: u32 = 10;
    pub const BASE_SPAWN_INTERVAL: u32 = 70;
    pub const MIN_SPAWN_INTERVAL: u32 = 40;
    pub const INTERVAL_STEP_POINTS: u32 = 5;
}
