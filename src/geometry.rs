use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::shader_types::attribute;
use crate::texture::TextureHandle;

/// Interleaved position/normal vertex stored in buffer slot
/// [`crate::shader_types::binding::VERTEX`]. UVs travel in their own buffer
/// at slot [`crate::shader_types::binding::UV`].
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: attribute::POSITION,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            shader_location: attribute::NORMAL,
        },
    ];

    pub const UV_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: attribute::UV,
    }];

    /// Vertex buffer layouts in slot order: positions/normals, then UVs.
    pub fn buffer_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
        [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &Self::ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &Self::UV_ATTRIBUTES,
            },
        ]
    }
}

/// Texture slots assigned to a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshTextures {
    pub base_color: Option<TextureHandle>,
}

/// Indexed triangle mesh with one UV channel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub textures: MeshTextures,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Built-in unit-extent shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Plane,
    Sphere,
    Box,
}

impl Primitive {
    /// Generates the mesh with the testbed's segment counts: a 4x4 plane,
    /// a 30x30 sphere and a unit box, all with extent one.
    pub fn mesh(self) -> Mesh {
        match self {
            Primitive::Plane => plane(4, 4),
            Primitive::Sphere => sphere(30, 30),
            Primitive::Box => cube(),
        }
    }
}

/// Flat grid in the XZ plane, extent one, facing +Y.
pub fn plane(segments_x: u32, segments_z: u32) -> Mesh {
    let mut mesh = Mesh::default();
    for z in 0..=segments_z {
        for x in 0..=segments_x {
            let u = x as f32 / segments_x as f32;
            let v = z as f32 / segments_z as f32;
            mesh.vertices.push(Vertex {
                position: [u - 0.5, 0.0, v - 0.5],
                normal: [0.0, 1.0, 0.0],
            });
            mesh.uvs.push([u, v]);
        }
    }
    let stride = segments_x + 1;
    for z in 0..segments_z {
        for x in 0..segments_x {
            let corner = z * stride + x;
            mesh.indices.extend_from_slice(&[
                corner,
                corner + stride,
                corner + 1,
                corner + 1,
                corner + stride,
                corner + stride + 1,
            ]);
        }
    }
    mesh
}

/// Latitude/longitude sphere of diameter one.
pub fn sphere(segments_u: u32, segments_v: u32) -> Mesh {
    let mut mesh = Mesh::default();
    for ring in 0..=segments_v {
        let v = ring as f32 / segments_v as f32;
        let theta = v * std::f32::consts::PI;
        for slice in 0..=segments_u {
            let u = slice as f32 / segments_u as f32;
            let phi = u * std::f32::consts::TAU;
            let normal = Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            mesh.vertices.push(Vertex {
                position: (normal * 0.5).to_array(),
                normal: normal.to_array(),
            });
            mesh.uvs.push([u, v]);
        }
    }
    let stride = segments_u + 1;
    for ring in 0..segments_v {
        for slice in 0..segments_u {
            let corner = ring * stride + slice;
            mesh.indices.extend_from_slice(&[
                corner,
                corner + stride,
                corner + 1,
                corner + 1,
                corner + stride,
                corner + stride + 1,
            ]);
        }
    }
    mesh
}

/// Axis-aligned unit cube, four vertices per face.
pub fn cube() -> Mesh {
    // normal, tangent, bitangent per face
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ];
    let mut mesh = Mesh::default();
    for (normal, tangent, bitangent) in FACES {
        let normal = Vec3::from(normal);
        let tangent = Vec3::from(tangent);
        let bitangent = Vec3::from(bitangent);
        let base = mesh.vertices.len() as u32;
        for (du, dv) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            let position =
                normal * 0.5 + tangent * (du - 0.5) + bitangent * (dv - 0.5);
            mesh.vertices.push(Vertex {
                position: position.to_array(),
                normal: normal.to_array(),
            });
            mesh.uvs.push([du, dv]);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}
