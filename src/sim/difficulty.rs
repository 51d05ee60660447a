//! Difficulty ramp as pure functions of score

use crate::consts::*;

/// Scroll speed in units/tick: +1 every 10 points
pub fn speed(score: u32) -> f32 {
    (BASE_SPEED + score / SPEED_STEP_POINTS) as f32
}

/// Ticks between spawns: -1 every 5 points, floored
pub fn spawn_interval(score: u32) -> u32 {
    BASE_SPAWN_INTERVAL
        .saturating_sub(score / INTERVAL_STEP_POINTS)
        .max(MIN_SPAWN_INTERVAL)
}
