use anyhow::{anyhow, Context, Result};
use glam::Vec3;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::geometry::Primitive;
use crate::lighting::{Light, SceneLighting};
use crate::model::Model;
use crate::shader_types::{texture_index, LightType};
use crate::texture::TextureRegistry;
use crate::transform::Transform;

/// Runtime representation of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Parses the scene XML produced by the authoring tools.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("invalid scene XML")?;
        let mut objects = Vec::new();
        for node in document.descendants().filter(|n| n.has_tag_name("object")) {
            objects.push(parse_object(&node)?);
        }
        let mut lights = Vec::new();
        for node in document.descendants().filter(|n| n.has_tag_name("light")) {
            lights.push(parse_light(&node)?);
        }
        Ok(Self { objects, lights })
    }

    /// The testbed's built-in scene: a tiled ground plane, a steel box, a
    /// sphere, the player camera and the four-light rig.
    pub fn demo() -> Self {
        let ground = SceneObject {
            name: "ground".to_string(),
            object_type: "plane".to_string(),
            texture: Some("grass".to_string()),
            tiling: 16,
            rotation: Vec3::new(180.0, 0.0, 90.0),
            scale: Vec3::splat(40.0),
            ..SceneObject::default()
        };
        let steel_box = SceneObject {
            name: "box".to_string(),
            object_type: "box".to_string(),
            texture: Some("steel".to_string()),
            position: Vec3::new(2.8, 1.0, 0.0),
            ..SceneObject::default()
        };
        let sphere = SceneObject {
            name: "sphere".to_string(),
            object_type: "sphere".to_string(),
            position: Vec3::new(-3.0, 0.5, 0.0),
            ..SceneObject::default()
        };
        let camera = SceneObject {
            name: "camera".to_string(),
            object_type: "camera".to_string(),
            position: Vec3::new(0.0, 1.4, -4.0),
            ..SceneObject::default()
        };
        Self {
            objects: vec![ground, steel_box, sphere, camera],
            lights: SceneLighting::default().lights,
        }
    }

    /// Instantiates drawable models for every non-camera object.
    pub fn build_models(&self, registry: &mut TextureRegistry) -> Vec<Model> {
        self.objects
            .iter()
            .filter_map(|object| object.build_model(registry))
            .collect()
    }
}

/// Scene object as described by the authoring tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(default = "default_tiling")]
    pub tiling: u32,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    #[serde(default = "default_fov")]
    pub fov: f32,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            name: String::new(),
            object_type: String::new(),
            texture: None,
            tiling: default_tiling(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: default_scale(),
            fov: default_fov(),
        }
    }
}

impl SceneObject {
    pub fn primitive(&self) -> Option<Primitive> {
        match self.object_type.as_str() {
            "plane" => Some(Primitive::Plane),
            "sphere" => Some(Primitive::Sphere),
            "box" => Some(Primitive::Box),
            _ => None,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Builds the drawable for this object, or `None` for cameras.
    pub fn build_model(&self, registry: &mut TextureRegistry) -> Option<Model> {
        let primitive = self.primitive()?;
        let mut model = Model::new(self.name.clone(), primitive);
        model.transform = self.transform();
        model.tiling = self.tiling;
        if let Some(texture) = self.texture.as_deref() {
            model.set_texture(registry, texture, texture_index::BASE_COLOR);
        }
        Some(model)
    }
}

fn default_tiling() -> u32 {
    1
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

fn default_fov() -> f32 {
    70.0
}

fn parse_object(node: &Node<'_, '_>) -> Result<SceneObject> {
    let mut object = SceneObject::default();
    object.name = required_text(node, "name")?;
    object.object_type = optional_text(node, "type").unwrap_or_else(|| "box".to_string());
    object.texture = optional_text(node, "texture");
    object.tiling = parse_u32(optional_text(node, "tiling"), object.tiling)?;
    object.position = parse_vec3(optional_text(node, "position"), object.position)?;
    object.rotation = parse_vec3(optional_text(node, "rotation"), object.rotation)?;
    object.scale = parse_vec3(optional_text(node, "scale"), object.scale)?;
    object.fov = parse_f32(optional_text(node, "fov"), object.fov)?;
    Ok(object)
}

fn parse_light(node: &Node<'_, '_>) -> Result<Light> {
    let mut light = Light::default();
    light.light_type = parse_light_type(&required_text(node, "type")?)?;
    light.position = parse_vec3(optional_text(node, "position"), light.position)?;
    light.color = parse_vec3(optional_text(node, "color"), light.color)?;
    light.specular_color = parse_vec3(optional_text(node, "specular"), light.specular_color)?;
    light.radius = parse_f32(optional_text(node, "radius"), light.radius)?;
    light.attenuation = parse_vec3(optional_text(node, "attenuation"), light.attenuation)?;
    // Cone angles are authored in degrees like every other rotation.
    light.cone_angle = parse_f32(
        optional_text(node, "cone-angle"),
        light.cone_angle.to_degrees(),
    )?
    .to_radians();
    light.cone_direction = parse_vec3(optional_text(node, "cone-direction"), light.cone_direction)?;
    light.cone_attenuation = parse_f32(
        optional_text(node, "cone-attenuation"),
        light.cone_attenuation,
    )?;
    Ok(light)
}

fn parse_light_type(name: &str) -> Result<LightType> {
    Ok(match name {
        "unused" => LightType::Unused,
        "sun" => LightType::Sun,
        "spot" => LightType::Spot,
        "point" => LightType::Point,
        "ambient" => LightType::Ambient,
        other => return Err(anyhow!("unknown light type <{other}>")),
    })
}

fn required_text(node: &Node<'_, '_>, tag: &str) -> Result<String> {
    optional_text(node, tag).ok_or_else(|| anyhow!("<{tag}> tag is missing"))
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    node.children()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_vec3(value: Option<String>, default: Vec3) -> Result<Vec3> {
    let Some(value) = value else {
        return Ok(default);
    };
    let mut numbers = value
        .split_whitespace()
        .filter_map(|component| component.parse::<f32>().ok());
    let x = numbers
        .next()
        .ok_or_else(|| anyhow!("vector is missing components"))?;
    let y = numbers
        .next()
        .ok_or_else(|| anyhow!("vector is missing components"))?;
    let z = numbers
        .next()
        .ok_or_else(|| anyhow!("vector is missing components"))?;
    Ok(Vec3::new(x, y, z))
}

fn parse_f32(value: Option<String>, default: f32) -> Result<f32> {
    match value {
        Some(value) => value
            .parse::<f32>()
            .map_err(|err| anyhow!("failed to parse float: {err}")),
        None => Ok(default),
    }
}

fn parse_u32(value: Option<String>, default: u32) -> Result<u32> {
    match value {
        Some(value) => value
            .parse::<u32>()
            .map_err(|err| anyhow!("failed to parse integer: {err}")),
        None => Ok(default),
    }
}
