//! Game state and session types
//!
//! The session exclusively owns the player and the obstacle field.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::PlayerBody;
use super::difficulty;
use super::obstacle::{ObstacleField, SpawnPattern};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen, waiting for start input
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen, same key resumes
    Paused,
    /// Hit a spike, waiting for restart input
    Dead,
}

/// Side effects produced by a tick, consumed by the session driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Menu left, run started
    Started,
    /// Player left the ground
    Jumped,
    /// A spawn group entered the field
    Spawned(SpawnPattern),
    /// High score raised to the given value (persist it)
    HighScore(u32),
    /// Run ended with the given score
    Died { score: u32 },
    /// Fresh run after death
    Restarted,
    Paused,
    Resumed,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    pub player: PlayerBody,
    pub obstacles: ObstacleField,
    pub score: u32,
    pub high_score: u32,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
    /// Scroll speed, recomputed from score every playing tick
    pub speed: f32,
    /// Playing ticks in the current run (pauses excluded)
    pub time_ticks: u64,
}

impl GameState {
    /// Create a session sitting at the menu
    pub fn new(seed: u64, high_score: u32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Menu,
            player: PlayerBody::new(),
            obstacles: ObstacleField::new(),
            score: 0,
            high_score,
            spawn_timer: 0,
            speed: difficulty::speed(0),
            time_ticks: 0,
        }
    }

    /// Back to the start of a run. High score, RNG stream and the spawn
    /// timer carry over, so the first group after a restart arrives early.
    pub fn reset(&mut self) {
        self.player.reset();
        self.obstacles.clear();
        self.score = 0;
        self.speed = difficulty::speed(0);
        self.time_ticks = 0;
    }

    /// Raise the high score if the current score beats it
    pub fn commit_high_score(&mut self) -> Option<u32> {
        if self.score > self.high_score {
            self.high_score = self.score;
            Some(self.high_score)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.phase == SessionPhase::Dead
    }
}
