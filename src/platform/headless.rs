//! Presenter without a window: logs what would be drawn and heard

use super::{Cue, Presenter};
use crate::sim::{RenderSnapshot, SessionPhase};

/// Logs phase changes and score milestones, keeps counters for inspection
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    pub frames: u64,
    pub cues: Vec<Cue>,
    pub music_playing: bool,
    last_phase: Option<SessionPhase>,
    last_score: u32,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for HeadlessPresenter {
    fn render(&mut self, snapshot: &RenderSnapshot) {
        self.frames += 1;

        if self.last_phase != Some(snapshot.phase) {
            match snapshot.phase {
                SessionPhase::Menu => {
                    log::info!("SPIKE DASH - record {} - press to start", snapshot.high_score)
                }
                SessionPhase::Playing => log::info!("GO!"),
                SessionPhase::Paused => log::info!("[PAUSED] press P to resume"),
                SessionPhase::Dead => log::info!(
                    "GAME OVER - score {} - record {}",
                    snapshot.score,
                    snapshot.high_score
                ),
            }
            self.last_phase = Some(snapshot.phase);
        }

        if snapshot.score != self.last_score {
            if snapshot.score % 10 == 0 && snapshot.score > 0 {
                log::info!("Score {} (record {})", snapshot.score, snapshot.high_score);
            }
            self.last_score = snapshot.score;
        }
    }

    fn play_cue(&mut self, cue: Cue) {
        log::debug!("cue: {}", cue.as_str());
        self.cues.push(cue);
    }

    fn start_music(&mut self) {
        self.music_playing = true;
    }

    fn stop_music(&mut self) {
        self.music_playing = false;
    }
}
