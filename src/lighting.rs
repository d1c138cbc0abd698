use glam::Vec3;
use serde::{Deserialize, Serialize};

#[cfg(feature = "lighting")]
use crate::shader_types::GpuLight;
use crate::shader_types::LightType;

/// Host-side light descriptor.
///
/// Mirrors the GPU light record field for field; cone parameters only shape
/// spot lights and are passed through untouched for every other type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    #[serde(rename = "type")]
    pub light_type: LightType,
    pub position: Vec3,
    pub color: Vec3,
    pub specular_color: Vec3,
    pub radius: f32,
    pub attenuation: Vec3,
    pub cone_angle: f32,
    pub cone_direction: Vec3,
    pub cone_attenuation: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            light_type: LightType::Sun,
            position: Vec3::ZERO,
            color: Vec3::ONE,
            specular_color: Vec3::splat(0.6),
            radius: 0.0,
            attenuation: Vec3::new(1.0, 0.0, 0.0),
            cone_angle: 0.0,
            cone_direction: Vec3::ZERO,
            cone_attenuation: 0.0,
        }
    }
}

impl Light {
    #[cfg(feature = "lighting")]
    pub fn to_gpu(&self) -> GpuLight {
        GpuLight::new(
            self.light_type,
            self.position,
            self.color,
            self.specular_color,
            self.radius,
            self.attenuation,
            self.cone_angle,
            self.cone_direction,
            self.cone_attenuation,
        )
    }
}

/// The testbed's light rig: sun, ambient fill, a red point light and a blue
/// spotlight aimed across the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLighting {
    pub lights: Vec<Light>,
}

impl Default for SceneLighting {
    fn default() -> Self {
        let sunlight = Light {
            position: Vec3::new(1.0, 2.0, -2.0),
            ..Light::default()
        };
        let ambient = Light {
            light_type: LightType::Ambient,
            color: Vec3::splat(0.04),
            ..Light::default()
        };
        let red_point = Light {
            light_type: LightType::Point,
            position: Vec3::new(-2.0, 0.76, -0.18),
            color: Vec3::new(1.0, 0.0, 0.0),
            attenuation: Vec3::new(0.5, 2.0, 1.0),
            ..Light::default()
        };
        let spotlight = Light {
            light_type: LightType::Spot,
            position: Vec3::new(0.0, 0.64, 3.07),
            color: Vec3::new(0.0, 0.0, 1.0),
            cone_angle: 20f32.to_radians(),
            cone_direction: Vec3::new(0.0, -0.15, -0.5),
            cone_attenuation: 32.0,
            ..Light::default()
        };
        Self {
            lights: vec![sunlight, ambient, red_point, spotlight],
        }
    }
}

impl SceneLighting {
    pub fn new(lights: Vec<Light>) -> Self {
        Self { lights }
    }

    pub fn count(&self) -> u32 {
        self.lights.len() as u32
    }

    /// Packs the rig into GPU records, preserving declaration order.
    #[cfg(feature = "lighting")]
    pub fn gpu_lights(&self) -> Vec<GpuLight> {
        self.lights.iter().map(Light::to_gpu).collect()
    }
}
