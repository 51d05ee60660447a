//! Idle/demo mode - the game plays itself
//!
//! Jumps when the nearest obstacle ahead is 3-4 ticks from reaching the
//! player's hitbox. The cube is above spike height from the 3rd airborne
//! tick to the 36th, long enough for a triple group at base speed.

use super::difficulty;
use super::state::{GameState, SessionPhase};
use super::tick::InputEvent;

/// Ticks of lead before the first overlapping tick
const LEAD_TICKS: f32 = 4.0;

/// Pick the input for the next tick, if any
pub fn decide(state: &GameState) -> Option<InputEvent> {
    match state.phase {
        SessionPhase::Menu | SessionPhase::Dead => Some(InputEvent::PrimaryAction),
        SessionPhase::Paused => None,
        SessionPhase::Playing => {
            if !state.player.grounded {
                return None;
            }
            let player = state.player.hitbox();
            let speed = difficulty::speed(state.score);

            let gap = state
                .obstacles
                .iter()
                .map(|o| o.hitbox())
                .filter(|hb| hb.max().x > player.min.x)
                .map(|hb| hb.min.x - player.max().x)
                .fold(f32::INFINITY, f32::min);

            (gap < LEAD_TICKS * speed).then_some(InputEvent::PrimaryAction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, ObstacleKind, tick};

    #[test]
    fn test_starts_and_restarts() {
        let mut state = GameState::new(1, 0);
        assert_eq!(decide(&state), Some(InputEvent::PrimaryAction));
        state.phase = SessionPhase::Dead;
        assert_eq!(decide(&state), Some(InputEvent::PrimaryAction));
        state.phase = SessionPhase::Paused;
        assert_eq!(decide(&state), None);
    }

    #[test]
    fn test_waits_for_close_obstacle() {
        let mut state = GameState::new(1, 0);
        state.phase = SessionPhase::Playing;
        assert_eq!(decide(&state), None);

        state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 600.0));
        assert_eq!(decide(&state), None);

        state.obstacles.clear();
        // Hitbox left edge 11 past the player's right edge (135)
        state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 138.0));
        assert_eq!(decide(&state), Some(InputEvent::PrimaryAction));
    }

    #[test]
    fn test_ignores_passed_obstacles() {
        let mut state = GameState::new(1, 0);
        state.phase = SessionPhase::Playing;
        state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 50.0));
        assert_eq!(decide(&state), None);
    }

    #[test]
    fn test_survives_long_run() {
        let mut state = GameState::new(0xBEEF, 0);
        let mut deaths = 0;
        for _ in 0..5_000 {
            let input: Vec<InputEvent> = decide(&state).into_iter().collect();
            let was_dead = state.is_dead();
            tick(&mut state, &input);
            if !was_dead && state.is_dead() {
                deaths += 1;
            }
        }
        assert_eq!(deaths, 0, "autopilot died at score {}", state.score);
        assert!(state.score > 50);
    }
}
