//! Platform abstraction layer
//!
//! The simulation talks to the outside world through these interfaces:
//! - Input events (re-exported from `sim`)
//! - Presentation: frame rendering, sound cues, music
//! - Frame pacing for the native loop

pub mod headless;
#[cfg(not(target_arch = "wasm32"))]
pub mod limiter;

pub use crate::sim::tick::InputEvent;
pub use headless::HeadlessPresenter;
#[cfg(not(target_arch = "wasm32"))]
pub use limiter::FrameLimiter;

use crate::sim::{RenderSnapshot, SessionPhase};

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Death,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Jump => "jump",
            Cue::Death => "death",
        }
    }
}

/// Everything the session needs from its presentation layer. All calls are
/// fire-and-forget: implementations degrade (no draw, silence) instead of
/// failing.
pub trait Presenter {
    fn render(&mut self, snapshot: &RenderSnapshot);
    fn play_cue(&mut self, cue: Cue);
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

/// Make sure the session ends up paused once `pending` is drained, e.g. when
/// the window loses focus. Returns whether a pause toggle was queued.
///
/// A resume the player queued while paused is dropped instead of countered.
pub fn queue_auto_pause(phase: SessionPhase, pending: &mut Vec<InputEvent>) -> bool {
    let toggles = pending
        .iter()
        .filter(|e| **e == InputEvent::PauseToggle)
        .count();

    match phase {
        SessionPhase::Paused => {
            pending.retain(|e| *e != InputEvent::PauseToggle);
            false
        }
        SessionPhase::Playing if toggles % 2 == 0 => {
            pending.push(InputEvent::PauseToggle);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, tick};

    #[test]
    fn test_auto_pause_while_playing() {
        let mut pending = vec![InputEvent::PrimaryAction];
        assert!(queue_auto_pause(SessionPhase::Playing, &mut pending));
        assert_eq!(pending, vec![InputEvent::PrimaryAction, InputEvent::PauseToggle]);

        // Already queued: no double toggle
        assert!(!queue_auto_pause(SessionPhase::Playing, &mut pending));
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn test_auto_pause_drops_queued_resume() {
        let mut state = GameState::new(7, 0);
        tick(&mut state, &[InputEvent::PrimaryAction]);
        tick(&mut state, &[InputEvent::PauseToggle]);
        assert_eq!(state.phase, SessionPhase::Paused);

        // Player pressed resume, then focus was lost before the next tick
        let mut pending = vec![InputEvent::PauseToggle];
        assert!(!queue_auto_pause(state.phase, &mut pending));
        tick(&mut state, &pending);
        assert_eq!(state.phase, SessionPhase::Paused);
    }

    #[test]
    fn test_auto_pause_ignored_outside_play() {
        for phase in [SessionPhase::Menu, SessionPhase::Dead] {
            let mut pending = Vec::new();
            assert!(!queue_auto_pause(phase, &mut pending));
            assert!(pending.is_empty());
        }
    }
}
