//! WebGPU rendering module
//!
//! Flat-shaded primitives only: a sprite-free field, triangles for spikes and
//! a spinning square for the player.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{SceneOptions, build, clear_color};
