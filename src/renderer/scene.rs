//! Builds the frame's vertex list from a render snapshot

use super::shapes;
use super::vertex::{Vertex, colors, rgb};
use crate::consts::*;
use crate::sim::{Aabb, ObstacleKind, RenderSnapshot, SessionPhase};

/// Per-frame drawing options
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneOptions {
    pub debug_hitboxes: bool,
}

/// Background clear color for the snapshot
pub fn clear_color(snapshot: &RenderSnapshot) -> [f32; 4] {
    let [r, g, b] = snapshot.background;
    rgb(r, g, b)
}

/// Field-space triangles, back to front: ground, obstacles, player, overlays
pub fn build(snapshot: &RenderSnapshot, options: SceneOptions) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6 * (snapshot.obstacles.len() + 4));

    vertices.extend(shapes::rect(
        &Aabb::new(0.0, GROUND_Y, FIELD_WIDTH, FIELD_HEIGHT - GROUND_Y),
        colors::GROUND,
    ));

    for o in &snapshot.obstacles {
        let color = match o.kind {
            ObstacleKind::Spike => colors::SPIKE,
            ObstacleKind::MiniSpike => colors::MINI_SPIKE,
        };
        vertices.extend(shapes::spike(&o.bounds, color));
    }

    let player = &snapshot.player;
    vertices.extend(shapes::rotated_square(
        player.center,
        PLAYER_HALF_SIZE,
        player.rotation,
        colors::PLAYER,
    ));

    if options.debug_hitboxes {
        for o in &snapshot.obstacles {
            vertices.extend(shapes::outline(&o.hitbox, 1.0, colors::HITBOX));
        }
        vertices.extend(shapes::outline(&player.hitbox, 1.0, colors::HITBOX));
    }

    // Menu, pause and game-over text sits on a dimmed field
    if snapshot.phase != SessionPhase::Playing {
        vertices.extend(shapes::rect(
            &Aabb::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT),
            colors::DIM,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, Obstacle};

    #[test]
    fn test_vertex_counts() {
        let mut state = GameState::new(1, 0);
        state.phase = SessionPhase::Playing;
        state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 300.0));
        state.obstacles.push(Obstacle::new(ObstacleKind::MiniSpike, 340.0));
        let snap = RenderSnapshot::capture(&state, true);

        // ground 6 + 2 spikes * 3 + player 6
        let plain = build(&snap, SceneOptions::default());
        assert_eq!(plain.len(), 18);

        // + 3 outlines * 24
        let debug = build(&snap, SceneOptions { debug_hitboxes: true });
        assert_eq!(debug.len(), 18 + 72);
    }

    #[test]
    fn test_overlay_when_not_playing() {
        let state = GameState::new(1, 0);
        let snap = RenderSnapshot::capture(&state, true);
        let verts = build(&snap, SceneOptions::default());
        assert_eq!(verts.len(), 6 + 6 + 6);
        assert_eq!(verts.last().map(|v| v.color), Some(colors::DIM));
    }

    #[test]
    fn test_clear_color_tracks_tint() {
        let mut state = GameState::new(1, 0);
        state.score = 20;
        let snap = RenderSnapshot::capture(&state, true);
        let c = clear_color(&snap);
        assert!((c[0] - 120.0 / 255.0).abs() < 1e-6);
    }
}
