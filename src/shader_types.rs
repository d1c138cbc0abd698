//! Shared data layouts for the testbed's shader techniques.
//!
//! Everything in this module is an ABI contract between host code filling
//! buffers and the shader source at the bottom of the file: field order,
//! explicit padding and the numeric slot constants must stay bit-exact on
//! both sides.  The `lighting` cargo feature selects between the tiling-only
//! layout and the extended layout carrying the normal matrix, light count,
//! camera position and light records.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
#[cfg(feature = "lighting")]
use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Buffer argument slots shared with the shader side. Never renumber.
pub mod binding {
    pub const VERTEX: u32 = 0;
    pub const UV: u32 = 1;
    pub const UNIFORMS: u32 = 11;
    pub const PARAMS: u32 = 12;
    pub const LIGHTS: u32 = 13;
}

/// Vertex attribute locations matching the vertex buffer layouts.
pub mod attribute {
    pub const POSITION: u32 = 0;
    pub const NORMAL: u32 = 1;
    pub const UV: u32 = 2;
}

/// Fragment texture slots.
pub mod texture_index {
    pub const BASE_COLOR: u32 = 0;
}

/// Per-draw transform block, bound at [`binding::UNIFORMS`].
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Inverse-transpose of the model's upper-left 3x3, stored as three
    /// padded columns (mat3x3 column stride is 16 bytes on the GPU side).
    #[cfg(feature = "lighting")]
    pub normal_matrix: [[f32; 4]; 3],
}

impl Uniforms {
    pub fn new(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            #[cfg(feature = "lighting")]
            normal_matrix: normal_matrix(model),
        }
    }

    /// Replaces the model matrix, keeping the derived normal matrix in sync.
    pub fn set_model(&mut self, model: Mat4) {
        self.model = model.to_cols_array_2d();
        #[cfg(feature = "lighting")]
        {
            self.normal_matrix = normal_matrix(model);
        }
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// Normal matrix for a model transform, correct under non-uniform scaling.
#[cfg(feature = "lighting")]
pub fn normal_matrix(model: Mat4) -> [[f32; 4]; 3] {
    mat3_to_3x4(Mat3::from_mat4(model).inverse().transpose())
}

/// Pads a mat3 out to three vec4 columns, the GPU-side mat3x3 stride.
#[cfg(feature = "lighting")]
pub fn mat3_to_3x4(matrix: Mat3) -> [[f32; 4]; 3] {
    let cols = matrix.to_cols_array();
    [
        [cols[0], cols[1], cols[2], 0.0],
        [cols[3], cols[4], cols[5], 0.0],
        [cols[6], cols[7], cols[8], 0.0],
    ]
}

/// Frame-level shader parameters, bound at [`binding::PARAMS`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Params {
    pub width: u32,
    pub height: u32,
    pub tiling: u32,
    #[cfg(feature = "lighting")]
    pub light_count: u32,
    #[cfg(feature = "lighting")]
    pub camera_position: [f32; 3],
    #[cfg(feature = "lighting")]
    _pad: u32,
}

impl Params {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiling: 1,
            #[cfg(feature = "lighting")]
            light_count: 0,
            #[cfg(feature = "lighting")]
            camera_position: [0.0; 3],
            #[cfg(feature = "lighting")]
            _pad: 0,
        }
    }

    #[cfg(feature = "lighting")]
    pub fn with_lighting(mut self, light_count: u32, camera_position: Vec3) -> Self {
        self.light_count = light_count;
        self.camera_position = camera_position.to_array();
        self
    }
}

/// Closed set of light kinds understood by the fragment techniques.
///
/// The discriminants travel in [`GpuLight::light_type`]; renumbering them
/// breaks every compiled shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum LightType {
    Unused = 0,
    Sun = 1,
    Spot = 2,
    Point = 3,
    Ambient = 4,
}

impl LightType {
    pub fn tag(self) -> u32 {
        self as u32
    }
}

/// Error returned when a raw light tag has no matching [`LightType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown light type tag {0}")]
pub struct UnknownLightType(pub u32);

impl TryFrom<u32> for LightType {
    type Error = UnknownLightType;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        Ok(match tag {
            0 => Self::Unused,
            1 => Self::Sun,
            2 => Self::Spot,
            3 => Self::Point,
            4 => Self::Ambient,
            other => return Err(UnknownLightType(other)),
        })
    }
}

/// GPU-side light record, bound as an array at [`binding::LIGHTS`].
///
/// 96 bytes per element. Cone fields are only meaningful for spot lights
/// but are carried (and uploaded) for every record; nothing masks them.
#[cfg(feature = "lighting")]
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    pub light_type: u32,
    _pad0: [u32; 3],
    pub position: [f32; 3],
    _pad1: f32,
    pub color: [f32; 3],
    _pad2: f32,
    pub specular_color: [f32; 3],
    pub radius: f32,
    pub attenuation: [f32; 3],
    pub cone_angle: f32,
    pub cone_direction: [f32; 3],
    pub cone_attenuation: f32,
}

#[cfg(feature = "lighting")]
impl GpuLight {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        light_type: LightType,
        position: Vec3,
        color: Vec3,
        specular_color: Vec3,
        radius: f32,
        attenuation: Vec3,
        cone_angle: f32,
        cone_direction: Vec3,
        cone_attenuation: f32,
    ) -> Self {
        Self {
            light_type: light_type.tag(),
            _pad0: [0; 3],
            position: position.to_array(),
            _pad1: 0.0,
            color: color.to_array(),
            _pad2: 0.0,
            specular_color: specular_color.to_array(),
            radius,
            attenuation: attenuation.to_array(),
            cone_angle,
            cone_direction: cone_direction.to_array(),
            cone_attenuation,
        }
    }
}

#[cfg(feature = "lighting")]
pub const SHADER_SOURCE: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    normal_matrix: mat3x3<f32>,
}

struct Params {
    width: u32,
    height: u32,
    tiling: u32,
    light_count: u32,
    camera_position: vec3<f32>,
}

struct Light {
    light_type: u32,
    position: vec3<f32>,
    color: vec3<f32>,
    specular_color: vec3<f32>,
    radius: f32,
    attenuation: vec3<f32>,
    cone_angle: f32,
    cone_direction: vec3<f32>,
    cone_attenuation: f32,
}

const LIGHT_UNUSED: u32 = 0u;
const LIGHT_SUN: u32 = 1u;
const LIGHT_SPOT: u32 = 2u;
const LIGHT_POINT: u32 = 3u;
const LIGHT_AMBIENT: u32 = 4u;

@group(0) @binding(11)
var<uniform> uniforms: Uniforms;

@group(0) @binding(12)
var<uniform> params: Params;

@group(0) @binding(13)
var<storage, read> lights: array<Light>;

@group(1) @binding(0)
var base_color_texture: texture_2d<f32>;
@group(1) @binding(1)
var base_color_sampler: sampler;

struct VertexIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
}

struct VertexOut {
    @builtin(position) position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) world_pos: vec3<f32>,
}

@vertex
fn vertex_main(in: VertexIn) -> VertexOut {
    var out: VertexOut;
    let world_pos = uniforms.model * vec4<f32>(in.position, 1.0);
    out.position = uniforms.projection * uniforms.view * world_pos;
    out.normal = normalize(uniforms.normal_matrix * in.normal);
    out.uv = in.uv;
    out.world_pos = world_pos.xyz;
    return out;
}

@fragment
fn fragment_main(in: VertexOut) -> @location(0) vec4<f32> {
    let base = textureSample(
        base_color_texture,
        base_color_sampler,
        in.uv * f32(params.tiling)
    ).rgb;
    let normal = normalize(in.normal);
    var diffuse = vec3<f32>(0.0);
    var ambient = vec3<f32>(0.0);
    for (var i = 0u; i < params.light_count; i += 1u) {
        let light = lights[i];
        switch light.light_type {
            case LIGHT_SUN: {
                let dir = normalize(-light.position);
                diffuse += light.color * max(dot(normal, -dir), 0.0);
            }
            case LIGHT_POINT: {
                let to_light = light.position - in.world_pos;
                let d = length(to_light);
                let strength = max(dot(normal, normalize(to_light)), 0.0);
                let falloff = light.attenuation.x
                    + light.attenuation.y * d
                    + light.attenuation.z * d * d;
                diffuse += light.color * strength / max(falloff, 0.0001);
            }
            case LIGHT_SPOT: {
                let to_light = light.position - in.world_pos;
                let d = length(to_light);
                let dir = normalize(-to_light);
                let cone = normalize(light.cone_direction);
                if dot(dir, cone) > cos(light.cone_angle) {
                    let strength = max(dot(normal, -dir), 0.0);
                    let falloff = light.attenuation.x
                        + light.attenuation.y * d
                        + light.attenuation.z * d * d;
                    let edge = pow(max(dot(dir, cone), 0.0), light.cone_attenuation);
                    diffuse += light.color * strength * edge / max(falloff, 0.0001);
                }
            }
            case LIGHT_AMBIENT: {
                ambient += light.color;
            }
            default: {}
        }
    }
    return vec4<f32>(base * (diffuse + ambient), 1.0);
}
"#;

#[cfg(not(feature = "lighting"))]
pub const SHADER_SOURCE: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
}

struct Params {
    width: u32,
    height: u32,
    tiling: u32,
}

@group(0) @binding(11)
var<uniform> uniforms: Uniforms;

@group(0) @binding(12)
var<uniform> params: Params;

@group(1) @binding(0)
var base_color_texture: texture_2d<f32>;
@group(1) @binding(1)
var base_color_sampler: sampler;

struct VertexIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
}

struct VertexOut {
    @builtin(position) position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
}

@vertex
fn vertex_main(in: VertexIn) -> VertexOut {
    var out: VertexOut;
    out.position = uniforms.projection * uniforms.view
        * uniforms.model * vec4<f32>(in.position, 1.0);
    out.normal = in.normal;
    out.uv = in.uv;
    return out;
}

@fragment
fn fragment_main(in: VertexOut) -> @location(0) vec4<f32> {
    let base = textureSample(
        base_color_texture,
        base_color_sampler,
        in.uv * f32(params.tiling)
    );
    return vec4<f32>(base.rgb, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::{bytes_of, from_bytes, offset_of};
    use std::mem::size_of;

    #[test]
    fn binding_slots_keep_contract_values() {
        assert_eq!(binding::VERTEX, 0);
        assert_eq!(binding::UV, 1);
        assert_eq!(binding::UNIFORMS, 11);
        assert_eq!(binding::PARAMS, 12);
        assert_eq!(binding::LIGHTS, 13);
        assert_eq!(attribute::POSITION, 0);
        assert_eq!(attribute::NORMAL, 1);
        assert_eq!(attribute::UV, 2);
        assert_eq!(texture_index::BASE_COLOR, 0);
    }

    #[test]
    fn light_type_tags_keep_contract_values() {
        assert_eq!(LightType::Unused.tag(), 0);
        assert_eq!(LightType::Sun.tag(), 1);
        assert_eq!(LightType::Spot.tag(), 2);
        assert_eq!(LightType::Point.tag(), 3);
        assert_eq!(LightType::Ambient.tag(), 4);
    }

    #[test]
    fn light_type_round_trips_through_raw_tag() {
        for tag in 0..=4u32 {
            let ty = LightType::try_from(tag).unwrap();
            assert_eq!(ty.tag(), tag);
        }
        assert_eq!(LightType::try_from(5), Err(UnknownLightType(5)));
    }

    #[cfg(feature = "lighting")]
    #[test]
    fn uniforms_layout_matches_contract() {
        assert_eq!(size_of::<Uniforms>(), 240);
        assert_eq!(offset_of!(Uniforms, model), 0);
        assert_eq!(offset_of!(Uniforms, view), 64);
        assert_eq!(offset_of!(Uniforms, projection), 128);
        assert_eq!(offset_of!(Uniforms, normal_matrix), 192);
    }

    #[cfg(not(feature = "lighting"))]
    #[test]
    fn uniforms_layout_matches_contract() {
        assert_eq!(size_of::<Uniforms>(), 192);
        assert_eq!(offset_of!(Uniforms, model), 0);
        assert_eq!(offset_of!(Uniforms, view), 64);
        assert_eq!(offset_of!(Uniforms, projection), 128);
    }

    #[cfg(feature = "lighting")]
    #[test]
    fn params_layout_matches_contract() {
        assert_eq!(size_of::<Params>(), 32);
        assert_eq!(offset_of!(Params, width), 0);
        assert_eq!(offset_of!(Params, height), 4);
        assert_eq!(offset_of!(Params, tiling), 8);
        assert_eq!(offset_of!(Params, light_count), 12);
        assert_eq!(offset_of!(Params, camera_position), 16);
    }

    #[cfg(not(feature = "lighting"))]
    #[test]
    fn params_layout_matches_contract() {
        assert_eq!(size_of::<Params>(), 12);
        assert_eq!(offset_of!(Params, width), 0);
        assert_eq!(offset_of!(Params, height), 4);
        assert_eq!(offset_of!(Params, tiling), 8);
    }

    #[cfg(feature = "lighting")]
    #[test]
    fn gpu_light_layout_matches_contract() {
        assert_eq!(size_of::<GpuLight>(), 96);
        assert_eq!(offset_of!(GpuLight, light_type), 0);
        assert_eq!(offset_of!(GpuLight, position), 16);
        assert_eq!(offset_of!(GpuLight, color), 32);
        assert_eq!(offset_of!(GpuLight, specular_color), 48);
        assert_eq!(offset_of!(GpuLight, radius), 60);
        assert_eq!(offset_of!(GpuLight, attenuation), 64);
        assert_eq!(offset_of!(GpuLight, cone_angle), 76);
        assert_eq!(offset_of!(GpuLight, cone_direction), 80);
        assert_eq!(offset_of!(GpuLight, cone_attenuation), 92);
    }

    #[test]
    fn uniforms_round_trip_is_bit_exact() {
        let uniforms = Uniforms::new(
            Mat4::from_scale(glam::Vec3::new(2.0, 1.0, 40.0)),
            Mat4::from_translation(glam::Vec3::new(0.0, 1.4, -4.0)),
            Mat4::perspective_rh_gl(70f32.to_radians(), 16.0 / 9.0, 0.1, 100.0),
        );
        let restored: Uniforms = *from_bytes(bytes_of(&uniforms));
        assert_eq!(restored, uniforms);
    }

    #[test]
    fn params_round_trip_is_bit_exact() {
        let mut params = Params::new(1920, 1080);
        params.tiling = 16;
        #[cfg(feature = "lighting")]
        let params = params.with_lighting(4, Vec3::new(0.0, 1.4, -4.0));
        let restored: Params = *from_bytes(bytes_of(&params));
        assert_eq!(restored, params);
    }

    #[cfg(feature = "lighting")]
    #[test]
    fn gpu_light_round_trip_is_bit_exact() {
        let light = GpuLight::new(
            LightType::Spot,
            Vec3::new(0.0, 0.64, 3.07),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::splat(0.6),
            0.0,
            Vec3::new(1.0, 0.0, 0.0),
            20f32.to_radians(),
            Vec3::new(0.0, -0.15, -0.5),
            32.0,
        );
        let bytes = bytes_of(&light);
        assert_eq!(bytes.len(), 96);
        let restored: GpuLight = *from_bytes(bytes);
        assert_eq!(restored, light);
    }

    #[cfg(feature = "lighting")]
    #[test]
    fn set_model_keeps_normal_matrix_in_sync() {
        let mut uniforms = Uniforms::default();
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        uniforms.set_model(model);
        // Inverse-transpose of a pure scale halves the scaled axis.
        assert!((uniforms.normal_matrix[0][0] - 0.5).abs() < 1e-6);
        assert!((uniforms.normal_matrix[1][1] - 1.0).abs() < 1e-6);
        assert_eq!(uniforms.normal_matrix[0][3], 0.0);
    }

    #[test]
    fn shader_source_declares_contract_bindings() {
        assert!(SHADER_SOURCE.contains(&format!("@binding({})", binding::UNIFORMS)));
        assert!(SHADER_SOURCE.contains(&format!("@binding({})", binding::PARAMS)));
        #[cfg(feature = "lighting")]
        assert!(SHADER_SOURCE.contains(&format!("@binding({})", binding::LIGHTS)));
        assert!(SHADER_SOURCE.contains(&format!("@binding({})", texture_index::BASE_COLOR)));
        for location in [attribute::POSITION, attribute::NORMAL, attribute::UV] {
            assert!(SHADER_SOURCE.contains(&format!("@location({location})")));
        }
    }
}
