//! Native frame pacing: sleep away whatever is left of each tick

use std::thread;
use std::time::{Duration, Instant};

pub struct FrameLimiter {
    frame_duration: Duration,
    frame_start: Instant,
}

impl FrameLimiter {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / ticks_per_second.max(1) as f64),
            frame_start: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Block until the current frame's budget is spent, then start the next
    pub fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_duration {
            thread::sleep(self.frame_duration - elapsed);
        }
        self.frame_start = Instant::now();
    }
}
