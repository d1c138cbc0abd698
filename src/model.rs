use crate::geometry::{Mesh, Primitive};
use crate::shader_types::{texture_index, Params, Uniforms};
use crate::texture::TextureRegistry;
use crate::transform::Transform;

/// A named drawable: one or more meshes under a shared transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub transform: Transform,
    pub tiling: u32,
}

impl Model {
    pub fn new(name: impl Into<String>, primitive: Primitive) -> Self {
        Self {
            name: name.into(),
            meshes: vec![primitive.mesh()],
            transform: Transform::default(),
            tiling: 1,
        }
    }

    /// Assigns a texture to a slot on the model's first mesh.
    pub fn set_texture(&mut self, registry: &mut TextureRegistry, name: &str, slot: u32) {
        let handle = registry.load(name);
        if let Some(mesh) = self.meshes.first_mut() {
            match slot {
                texture_index::BASE_COLOR => mesh.textures.base_color = Some(handle),
                _ => {}
            }
        }
    }

    /// Populates per-draw copies of the frame uniforms and params: the model
    /// matrix (and its derived normal matrix) and the model's tiling factor.
    pub fn encode(&self, mut uniforms: Uniforms, mut params: Params) -> (Uniforms, Params) {
        uniforms.set_model(self.transform.model_matrix());
        params.tiling = self.tiling;
        (uniforms, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn encode_overrides_model_matrix_and_tiling() {
        let mut model = Model::new("ground", Primitive::Plane);
        model.tiling = 16;
        model.transform.position = Vec3::new(0.0, -1.0, 0.0);

        let frame_params = Params::new(800, 600);
        let (uniforms, params) = model.encode(Uniforms::default(), frame_params);

        assert_eq!(params.tiling, 16);
        assert_eq!(params.width, 800);
        assert_eq!(uniforms.model[3][1], -1.0);
        // Frame-level state is untouched on the originals.
        assert_eq!(frame_params.tiling, 1);
    }

    #[test]
    fn set_texture_fills_the_base_color_slot() {
        let mut registry = TextureRegistry::new();
        let mut model = Model::new("box", Primitive::Box);
        model.set_texture(&mut registry, "steel", texture_index::BASE_COLOR);
        let handle = registry.get("steel").unwrap();
        assert_eq!(model.meshes[0].textures.base_color, Some(handle));
    }

    #[test]
    fn unknown_slot_is_ignored() {
        let mut registry = TextureRegistry::new();
        let mut model = Model::new("box", Primitive::Box);
        model.set_texture(&mut registry, "steel", 7);
        assert_eq!(model.meshes[0].textures.base_color, None);
    }
}
