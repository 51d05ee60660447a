//! Scrolling obstacles and spawn patterns

use rand::Rng;

use super::collision::Aabb;
use crate::consts::*;

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Full height ground spike
    Spike,
    /// Half height spike with a narrower hitbox
    MiniSpike,
}

/// Per-variant geometry. Hitbox offsets are relative to the obstacle's
/// top-left corner `(x, top)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleGeometry {
    /// Top edge of the visual footprint
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub hitbox_offset: (f32, f32),
    pub hitbox_size: (f32, f32),
}

const SPIKE_GEOMETRY: ObstacleGeometry = ObstacleGeometry {
    top: GROUND_Y - 32.0,
    width: 32.0,
    height: 32.0,
    hitbox_offset: (8.0, 8.0),
    hitbox_size: (16.0, 24.0),
};

const MINI_SPIKE_GEOMETRY: ObstacleGeometry = ObstacleGeometry {
    top: GROUND_Y - 16.0,
    width: 32.0,
    height: 16.0,
    hitbox_offset: (10.0, 4.0),
    hitbox_size: (12.0, 12.0),
};

impl ObstacleKind {
    pub fn geometry(self) -> &'static ObstacleGeometry {
        match self {
            ObstacleKind::Spike => &SPIKE_GEOMETRY,
            ObstacleKind::MiniSpike => &MINI_SPIKE_GEOMETRY,
        }
    }
}

/// A single obstacle entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Left edge of the visual footprint
    pub x: f32,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f32) -> Self {
        Self { kind, x }
    }

    /// Top edge (fixed per variant)
    #[inline]
    pub fn y(&self) -> f32 {
        self.kind.geometry().top
    }

    /// Scroll left by `speed` units
    #[inline]
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    /// Collision rectangle, inset from the visual footprint
    pub fn hitbox(&self) -> Aabb {
        let g = self.kind.geometry();
        Aabb::new(
            self.x + g.hitbox_offset.0,
            g.top + g.hitbox_offset.1,
            g.hitbox_size.0,
            g.hitbox_size.1,
        )
    }

    /// Visual footprint
    pub fn bounds(&self) -> Aabb {
        let g = self.kind.geometry();
        Aabb::new(self.x, g.top, g.width, g.height)
    }

    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.x <= -PRUNE_MARGIN
    }
}

/// Outcome of a single spawn roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnPattern {
    Single,
    Double,
    Triple,
    Mini,
}

impl SpawnPattern {
    /// Uniform d6: 1-3 single, 4 double, 5 triple, 6 mini
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(1..=6u8) {
            1..=3 => SpawnPattern::Single,
            4 => SpawnPattern::Double,
            5 => SpawnPattern::Triple,
            _ => SpawnPattern::Mini,
        }
    }

    /// Number of obstacles this pattern inserts
    pub fn len(self) -> usize {
        match self {
            SpawnPattern::Single | SpawnPattern::Mini => 1,
            SpawnPattern::Double => 2,
            SpawnPattern::Triple => 3,
        }
    }

    pub fn kind(self) -> ObstacleKind {
        match self {
            SpawnPattern::Mini => ObstacleKind::MiniSpike,
            _ => ObstacleKind::Spike,
        }
    }
}

/// The scrolling obstacle collection, kept in spawn order
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll every obstacle left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for o in &mut self.obstacles {
            o.advance(speed);
        }
    }

    /// Drop obstacles that have scrolled past the left threshold
    pub fn prune(&mut self) {
        self.obstacles.retain(|o| !o.is_offscreen());
    }

    /// Roll a pattern and append its group at the spawn column
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SpawnPattern {
        let pattern = SpawnPattern::roll(rng);
        self.push_group(pattern, SPAWN_X);
        pattern
    }

    /// Append a group with its first obstacle at `base_x`
    pub fn push_group(&mut self, pattern: SpawnPattern, base_x: f32) {
        let kind = pattern.kind();
        for i in 0..pattern.len() {
            self.obstacles
                .push(Obstacle::new(kind, base_x + i as f32 * GROUP_SPACING));
        }
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spike_hitbox_inset() {
        let spike = Obstacle::new(ObstacleKind::Spike, 100.0);
        let hb = spike.hitbox();
        assert_eq!(hb, Aabb::new(108.0, GROUND_Y - 24.0, 16.0, 24.0));

        let bounds = spike.bounds();
        assert!(hb.min.x > bounds.min.x && hb.max().x < bounds.max().x);
        assert!(hb.min.y > bounds.min.y);
    }

    #[test]
    fn test_mini_spike_geometry() {
        let mini = Obstacle::new(ObstacleKind::MiniSpike, 0.0);
        assert_eq!(mini.y(), GROUND_Y - 16.0);
        assert_eq!(mini.hitbox(), Aabb::new(10.0, GROUND_Y - 12.0, 12.0, 12.0));
    }

    #[test]
    fn test_group_layout() {
        let mut field = ObstacleField::new();
        field.push_group(SpawnPattern::Triple, SPAWN_X);
        let xs: Vec<f32> = field.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![SPAWN_X, SPAWN_X + 32.0, SPAWN_X + 64.0]);
        assert!(field.iter().all(|o| o.kind == ObstacleKind::Spike));

        field.push_group(SpawnPattern::Mini, SPAWN_X);
        assert_eq!(field.len(), 4);
        assert_eq!(field.as_slice()[3].kind, ObstacleKind::MiniSpike);
    }

    #[test]
    fn test_spawn_appends_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = ObstacleField::new();
        let pattern = field.spawn(&mut rng);
        assert_eq!(field.len(), pattern.len());
        assert_eq!(field.as_slice()[0].x, SPAWN_X);
        assert!(SPAWN_X > FIELD_WIDTH);
    }

    #[test]
    fn test_prune_threshold() {
        let mut field = ObstacleField::new();
        field.push(Obstacle::new(ObstacleKind::Spike, -49.0));
        field.push(Obstacle::new(ObstacleKind::Spike, -50.0));
        field.push(Obstacle::new(ObstacleKind::MiniSpike, -80.0));
        field.prune();
        assert_eq!(field.len(), 1);
        assert_eq!(field.as_slice()[0].x, -49.0);
    }

    #[test]
    fn test_spawn_distribution() {
        let mut rng = Pcg32::seed_from_u64(0xD1CE);
        let n = 6000;
        let (mut single, mut double, mut triple, mut mini) = (0u32, 0u32, 0u32, 0u32);
        for _ in 0..n {
            match SpawnPattern::roll(&mut rng) {
                SpawnPattern::Single => single += 1,
                SpawnPattern::Double => double += 1,
                SpawnPattern::Triple => triple += 1,
                SpawnPattern::Mini => mini += 1,
            }
        }
        let freq = |c: u32| c as f64 / n as f64;
        // ~5 standard deviations for n = 6000
        assert!((freq(single) - 0.5).abs() < 0.035, "single {}", freq(single));
        for (name, c) in [("double", double), ("triple", triple), ("mini", mini)] {
            assert!((freq(c) - 1.0 / 6.0).abs() < 0.025, "{name} {}", freq(c));
        }
    }

    proptest! {
        #[test]
        fn prop_advance_then_prune_leaves_nothing_offscreen(
            xs in proptest::collection::vec(-200.0f32..900.0, 0..20),
            speed in 0.0f32..40.0,
        ) {
            let mut field = ObstacleField::new();
            for x in &xs {
                field.push(Obstacle::new(ObstacleKind::Spike, *x));
            }
            field.advance(speed);
            field.prune();
            prop_assert!(field.iter().all(|o| o.x > -PRUNE_MARGIN));
        }

        #[test]
        fn prop_advance_moves_left(x in -40.0f32..900.0, speed in 1.0f32..20.0) {
            let mut o = Obstacle::new(ObstacleKind::MiniSpike, x);
            o.advance(speed);
            prop_assert!(o.x < x);
        }
    }
}
