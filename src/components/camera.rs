use serde::{Deserialize, Serialize};

/// Projection parameters for a camera entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Perspective projection when true, orthographic otherwise.
    pub perspective: bool,
    /// Vertical field of view in radians.
    pub vertical_fov: f32,
    pub aspect_ratio: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    /// Create a perspective camera.
    pub fn perspective(vertical_fov: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            perspective: true,
            vertical_fov,
            aspect_ratio,
            z_near,
            z_far,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 1000.0)
    }
}
