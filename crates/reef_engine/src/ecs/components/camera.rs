//! Camera component for the ECS system
//!
//! Orbit-style camera parameters. The camera's world position and
//! orientation come from the entity's [`TransformComponent`]; this component
//! carries the orbit distance and the projection parameters.
//!
//! [`TransformComponent`]: super::TransformComponent

use crate::ecs::Component;

/// ECS Camera component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraComponent {
    /// Orbit distance from the pivot position
    pub distance: f32,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Distance to the near clipping plane
    pub near: f32,

    /// Distance to the far clipping plane
    pub far: f32,
}

impl Component for CameraComponent {}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            distance: 5.0,
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraComponent {
    /// Create a camera with the given orbit distance and default projection
    pub fn with_distance(distance: f32) -> Self {
        Self {
            distance,
            ..Default::default()
        }
    }

    /// Create a camera from full projection parameters
    ///
    /// `fov` is the vertical field of view in radians.
    pub fn new(distance: f32, fov: f32, near: f32, far: f32) -> Self {
        Self {
            distance,
            fov,
            near,
            far,
        }
    }
}
