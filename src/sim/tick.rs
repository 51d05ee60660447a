//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::collision;
use super::difficulty;
use super::state::{GameEvent, GameState, SessionPhase};
use crate::consts::SIM_DT;

/// Discrete input events, drained once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window/page closed
    Quit,
    /// Tap, click, Space or Up: start, jump or restart depending on phase
    PrimaryAction,
    /// Pause key, toggles Playing <-> Paused
    PauseToggle,
    /// Escape
    Exit,
}

/// What a tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Side effects in the order they happened
    pub events: Vec<GameEvent>,
    /// Quit or exit was requested, nothing past it was simulated
    pub quit: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &[InputEvent]) -> TickResult {
    let mut result = TickResult::default();

    for event in input {
        match (*event, state.phase) {
            (InputEvent::Quit | InputEvent::Exit, _) => {
                log::info!("Exit requested ({:?})", state.phase);
                result.quit = true;
                return result;
            }
            (InputEvent::PrimaryAction, SessionPhase::Menu) => {
                state.phase = SessionPhase::Playing;
                log::info!("Run started (seed {})", state.seed);
                result.events.push(GameEvent::Started);
            }
            (InputEvent::PrimaryAction, SessionPhase::Playing) => {
                if state.player.jump() {
                    result.events.push(GameEvent::Jumped);
                }
            }
            (InputEvent::PrimaryAction, SessionPhase::Dead) => {
                state.reset();
                state.phase = SessionPhase::Playing;
                log::info!("Run restarted");
                result.events.push(GameEvent::Restarted);
            }
            (InputEvent::PauseToggle, SessionPhase::Playing) => {
                state.phase = SessionPhase::Paused;
                result.events.push(GameEvent::Paused);
            }
            (InputEvent::PauseToggle, SessionPhase::Paused) => {
                state.phase = SessionPhase::Playing;
                result.events.push(GameEvent::Resumed);
            }
            // Jump while paused, pause while dead or at the menu
            _ => {}
        }
    }

    match state.phase {
        SessionPhase::Menu => return result,
        SessionPhase::Playing => step_playing(state, &mut result.events),
        SessionPhase::Paused | SessionPhase::Dead => {}
    }

    // Draw-pass cleanup runs even while frozen
    state.obstacles.prune();

    result
}

fn step_playing(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;
    state.player.integrate();

    state.speed = difficulty::speed(state.score);
    state.spawn_timer += 1;
    if state.spawn_timer > difficulty::spawn_interval(state.score) {
        let pattern = state.obstacles.spawn(&mut state.rng);
        state.spawn_timer = 0;
        state.score += 1;
        log::debug!("Spawned {:?} (score {})", pattern, state.score);
        events.push(GameEvent::Spawned(pattern));
        if let Some(high) = state.commit_high_score() {
            events.push(GameEvent::HighScore(high));
        }
    }

    state.obstacles.advance(state.speed);

    if collision::check(&state.player.hitbox(), state.obstacles.as_slice()) {
        state.phase = SessionPhase::Dead;
        log::info!(
            "Died with score {} after {:.1}s (record {})",
            state.score,
            state.time_ticks as f32 * SIM_DT,
            state.high_score
        );
        events.push(GameEvent::Died { score: state.score });
        if let Some(high) = state.commit_high_score() {
            events.push(GameEvent::HighScore(high));
        }
    }
}
