use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Position, rotation and scale of anything placed in the scene.
///
/// Rotation is authored in degrees per axis and applied Z, then Y, then X,
/// matching the scene files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn model_matrix(&self) -> Mat4 {
        let translation = Mat4::from_translation(self.position);
        let rotation = Mat4::from_rotation_z(self.rotation.z.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_x(self.rotation.x.to_radians());
        let scale = Mat4::from_scale(self.scale);
        translation * rotation * scale
    }

    /// Uniform scale helper for scene authoring.
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transform_is_identity() {
        let transform = Transform::default();
        assert_eq!(transform.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translation_lands_in_last_column() {
        let transform = Transform {
            position: Vec3::new(2.8, 1.0, 0.0),
            ..Transform::default()
        };
        let matrix = transform.model_matrix();
        assert_eq!(matrix.w_axis.truncate(), Vec3::new(2.8, 1.0, 0.0));
    }

    #[test]
    fn rotation_applies_before_translation() {
        let transform = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Vec3::new(0.0, 90.0, 0.0),
            ..Transform::default()
        };
        let point = transform.model_matrix().transform_point3(Vec3::Z);
        // A 90 degree yaw maps +Z onto +X before the translation applies.
        assert!((point - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn scale_is_applied_per_axis() {
        let transform = Transform {
            scale: Vec3::new(40.0, 1.0, 40.0),
            ..Transform::default()
        };
        let point = transform.model_matrix().transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(point, Vec3::new(40.0, 1.0, 40.0));
    }
}
