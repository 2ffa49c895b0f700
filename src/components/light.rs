use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Point light color and intensity.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
#[repr(C)]
pub struct Light {
    /// Linear RGB color.
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 10.0,
        }
    }
}
