//! Player kinematics: gravity, ground clamp, jump

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::*;

/// The player's cube
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBody {
    /// Fixed column
    pub x: f32,
    /// Center height (screen space, grows downward)
    pub y: f32,
    pub vel_y: f32,
    pub grounded: bool,
    /// Spin in degrees (presentation only)
    pub rotation: f32,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            y: PLAYER_Y_ON_GROUND,
            vel_y: 0.0,
            grounded: true,
            rotation: 0.0,
        }
    }
}

impl PlayerBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick under gravity
    pub fn integrate(&mut self) {
        self.vel_y += GRAVITY;
        self.y += self.vel_y;

        if self.y >= PLAYER_Y_ON_GROUND {
            self.y = PLAYER_Y_ON_GROUND;
            self.vel_y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        if self.grounded {
            self.rotation = 0.0;
        } else {
            self.rotation -= ROTATION_STEP;
        }
    }

    /// Start a jump. Returns false (and changes nothing) while airborne.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = JUMP_IMPULSE;
        self.grounded = false;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::from_center(self.center(), Vec2::splat(PLAYER_HALF_SIZE))
    }
}
