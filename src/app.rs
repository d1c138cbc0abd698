use std::sync::Arc;

use crate::camera::{Camera, PlayerCamera};
use crate::data_model::DataModel;
use crate::frame::{compose_frame, FramePacket};
use crate::input::InputState;
use crate::lighting::SceneLighting;
use crate::model::Model;
use crate::scene::{Scene, SceneObject};
use crate::texture::TextureRegistry;

/// Headless harness tying the scene state, input and camera together.
///
/// Stepping advances the camera from the input snapshot; composing a frame
/// syncs model transforms from the data model and produces the upload-ready
/// packet. No GPU work happens here.
pub struct Testbed {
    data_model: DataModel,
    input: Arc<InputState>,
    camera: PlayerCamera,
    lighting: SceneLighting,
    registry: TextureRegistry,
    models: Vec<Model>,
}

impl Testbed {
    pub fn new(scene: Scene, input: Arc<InputState>) -> Self {
        let mut registry = TextureRegistry::new();
        let models = scene.build_models(&mut registry);
        let camera = camera_from_objects(&scene.objects);
        Self {
            data_model: DataModel::from_objects(scene.objects),
            input,
            camera,
            lighting: SceneLighting::new(scene.lights),
            registry,
            models,
        }
    }

    pub fn data_model(&self) -> &DataModel {
        &self.data_model
    }

    pub fn camera(&self) -> &PlayerCamera {
        &self.camera
    }

    pub fn texture_registry(&self) -> &TextureRegistry {
        &self.registry
    }

    pub fn lighting(&self) -> &SceneLighting {
        &self.lighting
    }

    /// Advances the camera by one tick of input.
    pub fn step(&mut self, delta_time: f32) {
        self.camera.update(delta_time, &self.input);
    }

    /// Composes the shader data for one frame at the given viewport size.
    pub fn frame(&mut self, width: u32, height: u32) -> FramePacket {
        self.camera.update_size(width, height);
        self.sync_models();
        compose_frame(&self.models, &self.camera, &self.lighting, width, height)
    }

    /// Pulls transform and tiling edits from the data model into the
    /// instantiated models, matched by name.
    fn sync_models(&mut self) {
        let objects = self.data_model.all_objects();
        for model in &mut self.models {
            if let Some(object) = objects.iter().find(|object| object.name == model.name) {
                model.transform = object.transform();
                model.tiling = object.tiling;
            }
        }
    }
}

/// Builds the player camera from the scene's camera object, falling back to
/// the testbed's stock viewpoint.
pub fn camera_from_objects(objects: &[SceneObject]) -> PlayerCamera {
    let mut camera = PlayerCamera {
        position: glam::Vec3::new(0.0, 1.4, -4.0),
        ..PlayerCamera::default()
    };
    if let Some(object) = objects.iter().find(|o| o.object_type == "camera") {
        camera.position = object.position;
        camera.rotation = object.rotation * std::f32::consts::PI / 180.0;
        camera.fov = object.fov.to_radians();
    }
    camera
}

/// Prints the object states the way the CLI reports them.
pub fn print_final_state(model: &DataModel) {
    println!("Final object states:");
    for object in model.all_objects() {
        println!(
            " - {} pos=({:.2}, {:.2}, {:.2}) tiling={}",
            object.name, object.position.x, object.position.y, object.position.z, object.tiling
        );
    }
}
