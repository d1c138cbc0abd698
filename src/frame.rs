use glam::Mat4;

use crate::camera::Camera;
use crate::lighting::SceneLighting;
use crate::model::Model;
#[cfg(feature = "lighting")]
use crate::shader_types::GpuLight;
use crate::shader_types::{Params, Uniforms};
use crate::texture::TextureHandle;

/// Everything the host uploads for one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub name: String,
    pub uniforms: Uniforms,
    pub params: Params,
    pub base_color: Option<TextureHandle>,
}

/// One frame's worth of shader data, ready to be written into buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePacket {
    /// Frame-level params before any per-model tiling override.
    pub params: Params,
    #[cfg(feature = "lighting")]
    pub lights: Vec<GpuLight>,
    pub draws: Vec<DrawCall>,
}

impl FramePacket {
    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }
}

/// Assembles the frame packet: camera matrices and viewport into the shared
/// uniforms/params, the packed light rig, then one populated copy per model.
pub fn compose_frame(
    models: &[Model],
    camera: &dyn Camera,
    lighting: &SceneLighting,
    width: u32,
    height: u32,
) -> FramePacket {
    let uniforms = Uniforms::new(
        Mat4::IDENTITY,
        camera.view_matrix(),
        camera.projection_matrix(),
    );
    let params = Params::new(width, height);
    #[cfg(feature = "lighting")]
    let params = params.with_lighting(lighting.count(), camera.position());
    #[cfg(not(feature = "lighting"))]
    let _ = lighting;

    let draws = models
        .iter()
        .map(|model| {
            let (uniforms, params) = model.encode(uniforms, params);
            DrawCall {
                name: model.name.clone(),
                uniforms,
                params,
                base_color: model
                    .meshes
                    .first()
                    .and_then(|mesh| mesh.textures.base_color),
            }
        })
        .collect();

    FramePacket {
        params,
        #[cfg(feature = "lighting")]
        lights: lighting.gpu_lights(),
        draws,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PlayerCamera;
    use crate::geometry::Primitive;
    use glam::Vec3;

    fn fixture() -> (Vec<Model>, PlayerCamera, SceneLighting) {
        let mut ground = Model::new("ground", Primitive::Plane);
        ground.tiling = 16;
        ground.transform.scale = Vec3::splat(40.0);
        let steel_box = Model::new("box", Primitive::Box);
        let camera = PlayerCamera {
            position: Vec3::new(0.0, 1.4, -4.0),
            ..PlayerCamera::default()
        };
        (vec![ground, steel_box], camera, SceneLighting::default())
    }

    #[test]
    fn every_model_gets_a_draw_call() {
        let (models, camera, lighting) = fixture();
        let packet = compose_frame(&models, &camera, &lighting, 1280, 720);
        assert_eq!(packet.draw_count(), 2);
        assert_eq!(packet.params.width, 1280);
        assert_eq!(packet.params.height, 720);
    }

    #[test]
    fn tiling_is_overridden_per_draw() {
        let (models, camera, lighting) = fixture();
        let packet = compose_frame(&models, &camera, &lighting, 1280, 720);
        assert_eq!(packet.params.tiling, 1);
        assert_eq!(packet.draws[0].params.tiling, 16);
        assert_eq!(packet.draws[1].params.tiling, 1);
    }

    #[test]
    fn camera_matrices_are_shared_across_draws() {
        let (models, camera, lighting) = fixture();
        let packet = compose_frame(&models, &camera, &lighting, 1280, 720);
        assert_eq!(packet.draws[0].uniforms.view, packet.draws[1].uniforms.view);
        assert_eq!(
            packet.draws[0].uniforms.projection,
            packet.draws[1].uniforms.projection
        );
        assert_ne!(packet.draws[0].uniforms.model, packet.draws[1].uniforms.model);
    }

    #[cfg(feature = "lighting")]
    #[test]
    fn lighting_rides_in_params_and_light_array() {
        let (models, camera, lighting) = fixture();
        let packet = compose_frame(&models, &camera, &lighting, 1280, 720);
        assert_eq!(packet.lights.len(), 4);
        assert_eq!(packet.params.light_count, 4);
        assert_eq!(packet.params.camera_position, [0.0, 1.4, -4.0]);
        // Per-draw copies keep the frame-level lighting data.
        assert_eq!(packet.draws[0].params.light_count, 4);
    }

    #[cfg(feature = "lighting")]
    #[test]
    fn normal_matrix_counteracts_non_uniform_scale() {
        let (mut models, camera, lighting) = fixture();
        models[0].transform.scale = Vec3::new(2.0, 1.0, 1.0);
        let packet = compose_frame(&models, &camera, &lighting, 640, 480);
        let normal = packet.draws[0].uniforms.normal_matrix;
        assert!((normal[0][0] - 0.5).abs() < 1e-6);
        assert!((normal[1][1] - 1.0).abs() < 1e-6);
    }
}
