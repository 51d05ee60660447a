//! Render-ready view of the session, handed to the presenter each tick

use glam::Vec2;

use super::collision::Aabb;
use super::obstacle::ObstacleKind;
use super::state::{GameState, SessionPhase};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub center: Vec2,
    /// Degrees, counter-clockwise negative
    pub rotation: f32,
    pub hitbox: Aabb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSnapshot {
    pub kind: ObstacleKind,
    pub bounds: Aabb,
    pub hitbox: Aabb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub player: PlayerSnapshot,
    pub obstacles: Vec<ObstacleSnapshot>,
    pub score: u32,
    pub high_score: u32,
    pub phase: SessionPhase,
    /// Background RGB
    pub background: [u8; 3],
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, tint_cycle: bool) -> Self {
        let player = &state.player;
        Self {
            player: PlayerSnapshot {
                center: player.center(),
                rotation: player.rotation,
                hitbox: player.hitbox(),
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleSnapshot {
                    kind: o.kind,
                    bounds: o.bounds(),
                    hitbox: o.hitbox(),
                })
                .collect(),
            score: state.score,
            high_score: state.high_score,
            phase: state.phase,
            background: if tint_cycle {
                background_tint(state.score)
            } else {
                background_tint(0)
            },
        }
    }
}

/// Background shifts toward red as the score climbs, wrapping every 40 points
pub fn background_tint(score: u32) -> [u8; 3] {
    let red = 60 + (score.wrapping_mul(3) % 120);
    [red as u8, 60, 80]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, ObstacleKind};

    #[test]
    fn test_background_tint() {
        assert_eq!(background_tint(0), [60, 60, 80]);
        assert_eq!(background_tint(10), [90, 60, 80]);
        assert_eq!(background_tint(39), [177, 60, 80]);
        assert_eq!(background_tint(40), [60, 60, 80]);
    }

    #[test]
    fn test_capture_preserves_spawn_order() {
        let mut state = GameState::new(1, 8);
        state.score = 10;
        state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 400.0));
        state.obstacles.push(Obstacle::new(ObstacleKind::MiniSpike, 200.0));

        let snap = RenderSnapshot::capture(&state, true);
        assert_eq!(snap.obstacles.len(), 2);
        assert_eq!(snap.obstacles[0].kind, ObstacleKind::Spike);
        assert_eq!(snap.obstacles[1].bounds.min.x, 200.0);
        assert_eq!(snap.high_score, 8);
        assert_eq!(snap.phase, SessionPhase::Menu);
        assert_eq!(snap.background, [90, 60, 80]);

        let calm = RenderSnapshot::capture(&state, false);
        assert_eq!(calm.background, [60, 60, 80]);
    }
}
