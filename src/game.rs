//! Session driver
//!
//! Owns the simulation state and its collaborators. The outer loop (browser
//! animation frame or native frame limiter) calls [`Game::tick`] once per
//! fixed timestep with the input drained since the last tick.

use crate::highscores::HighScoreStore;
use crate::platform::{Cue, InputEvent, Presenter};
use crate::sim::{self, GameEvent, GameState, RenderSnapshot, SessionPhase};

/// Result of one driven tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Keep looping; the frame that was presented
    Continue(RenderSnapshot),
    /// Quit/exit requested, tear down
    Quit,
}

pub struct Game<P: Presenter, S: HighScoreStore> {
    state: GameState,
    presenter: P,
    store: S,
    /// Background tint follows score (off with reduced motion)
    tint_cycle: bool,
}

impl<P: Presenter, S: HighScoreStore> Game<P, S> {
    /// Load the record, sit at the menu and start the music
    pub fn new(seed: u64, mut presenter: P, store: S) -> Self {
        let high_score = store.load_or_default();
        presenter.start_music();
        Self {
            state: GameState::new(seed, high_score),
            presenter,
            store,
            tint_cycle: true,
        }
    }

    pub fn with_tint_cycle(mut self, enabled: bool) -> Self {
        self.tint_cycle = enabled;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Advance one fixed timestep and present the resulting frame
    pub fn tick(&mut self, input: &[InputEvent]) -> TickOutcome {
        let result = sim::tick(&mut self.state, input);

        for event in &result.events {
            self.dispatch(*event);
        }
        if result.quit {
            self.presenter.stop_music();
            return TickOutcome::Quit;
        }

        let snapshot = self.snapshot();
        self.presenter.render(&snapshot);
        TickOutcome::Continue(snapshot)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state, self.tint_cycle)
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Jumped => self.presenter.play_cue(Cue::Jump),
            GameEvent::Died { .. } => {
                self.presenter.stop_music();
                self.presenter.play_cue(Cue::Death);
            }
            GameEvent::Restarted => self.presenter.start_music(),
            GameEvent::HighScore(score) => {
                // Best effort: the next record-beating event retries
                if let Err(err) = self.store.save(score) {
                    log::warn!("High score {} not saved: {err:#}", score);
                }
            }
            GameEvent::Started
            | GameEvent::Spawned(_)
            | GameEvent::Paused
            | GameEvent::Resumed => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryHighScoreStore;
    use crate::platform::HeadlessPresenter;
    use crate::sim::{Obstacle, ObstacleKind};

    fn new_game(store: MemoryHighScoreStore) -> Game<HeadlessPresenter, MemoryHighScoreStore> {
        Game::new(42, HeadlessPresenter::new(), store)
    }

    #[test]
    fn test_new_loads_record_and_starts_music() {
        let game = new_game(MemoryHighScoreStore::with_value(17));
        assert_eq!(game.state().high_score, 17);
        assert_eq!(game.phase(), SessionPhase::Menu);
        assert!(game.presenter().music_playing);

        let fresh = new_game(MemoryHighScoreStore::default());
        assert_eq!(fresh.state().high_score, 0);
    }

    #[test]
    fn test_tick_renders_every_frame() {
        let mut game = new_game(MemoryHighScoreStore::default());
        for _ in 0..5 {
            assert!(matches!(game.tick(&[]), TickOutcome::Continue(_)));
        }
        assert_eq!(game.presenter().frames, 5);
    }

    #[test]
    fn test_jump_plays_cue() {
        let mut game = new_game(MemoryHighScoreStore::default());
        game.tick(&[InputEvent::PrimaryAction]);
        game.tick(&[InputEvent::PrimaryAction]);
        assert_eq!(game.presenter().cues, vec![Cue::Jump]);
    }

    #[test]
    fn test_death_stops_music_and_persists() {
        let mut game = new_game(MemoryHighScoreStore::with_value(0));
        game.tick(&[InputEvent::PrimaryAction]);
        game.state.score = 3;
        game.state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 130.0));

        let TickOutcome::Continue(frame) = game.tick(&[]) else {
            panic!("unexpected quit");
        };
        assert_eq!(frame.phase, SessionPhase::Dead);
        assert_eq!(game.presenter().cues, vec![Cue::Death]);
        assert!(!game.presenter().music_playing);
        assert_eq!(game.store().writes, vec![3]);

        // Restart brings the music back
        game.tick(&[InputEvent::PrimaryAction]);
        assert_eq!(game.phase(), SessionPhase::Playing);
        assert!(game.presenter().music_playing);
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let store = MemoryHighScoreStore {
            fail_saves: true,
            ..MemoryHighScoreStore::default()
        };
        let mut game = new_game(store);
        game.tick(&[InputEvent::PrimaryAction]);
        for _ in 0..200 {
            game.tick(&[]);
            game.state.obstacles.clear();
        }
        assert_eq!(game.phase(), SessionPhase::Playing);
        assert!(game.state().high_score >= 2);
        assert!(game.store().writes.is_empty());
    }

    #[test]
    fn test_mid_run_records_are_written() {
        let mut game = new_game(MemoryHighScoreStore::with_value(1));
        game.tick(&[InputEvent::PrimaryAction]);
        for _ in 0..300 {
            game.tick(&[]);
            game.state.obstacles.clear();
        }
        // Scores 1..=4 spawned, only 2..=4 beat the stored record
        assert_eq!(game.store().writes, vec![2, 3, 4]);
    }

    #[test]
    fn test_quit() {
        let mut game = new_game(MemoryHighScoreStore::default());
        assert_eq!(game.tick(&[InputEvent::Quit]), TickOutcome::Quit);
        assert!(!game.presenter().music_playing);
        assert_eq!(game.presenter().frames, 0);
    }
}
