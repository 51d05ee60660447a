//! Axis-aligned collision detection
//!
//! Every entity exposes a hitbox rectangle. Obstacle hitboxes are inset from
//! their visual footprint, so grazing a spike's slope is survivable.

use glam::Vec2;

use super::obstacle::Obstacle;

/// Axis-aligned bounding box in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Box of the given half extents around a center point
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            size: half * 2.0,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Strict overlap on both axes. Boxes that only share an edge don't
    /// intersect, and an empty box never intersects anything.
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Returns true if the player box hits any obstacle hitbox
pub fn check(player_box: &Aabb, obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .any(|o| o.hitbox().intersects(player_box))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ObstacleKind;
    use proptest::prelude::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_touching_edges_miss() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::new(10.0, 0.0, 10.0, 10.0);
        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        // Overlaps horizontally, clear vertically
        let b = Aabb::new(2.0, 30.0, 4.0, 4.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_empty_box_never_hits() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let empty = Aabb::new(5.0, 5.0, 0.0, 3.0);
        assert!(!a.intersects(&empty));
        assert!(!empty.intersects(&a));
    }

    #[test]
    fn test_from_center() {
        let b = Aabb::from_center(Vec2::new(120.0, 304.0), Vec2::splat(15.0));
        assert_eq!(b.min, Vec2::new(105.0, 289.0));
        assert_eq!(b.max(), Vec2::new(135.0, 319.0));
    }

    #[test]
    fn test_check_any_obstacle() {
        let player = Aabb::new(105.0, 289.0, 30.0, 30.0);
        let far = Obstacle::new(ObstacleKind::Spike, 400.0);
        let near = Obstacle::new(ObstacleKind::Spike, 100.0);

        assert!(!check(&player, &[]));
        assert!(!check(&player, &[far]));
        assert!(check(&player, &[far, near]));
    }

    #[test]
    fn test_visual_overlap_inside_inset_is_safe() {
        // Spike visual spans x..x+32, hitbox only x+8..x+24
        let player = Aabb::new(105.0, 289.0, 30.0, 30.0);
        let spike = Obstacle::new(ObstacleKind::Spike, 130.0);
        assert!(!check(&player, &[spike]));
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (-100.0f32..100.0, -100.0f32..100.0, 0.0f32..50.0, 0.0f32..50.0)
            .prop_map(|(x, y, w, h)| Aabb::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_nonempty_box_hits_itself(a in arb_box()) {
            prop_assert_eq!(a.intersects(&a), !a.is_empty());
        }
    }
}
