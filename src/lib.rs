//! Scene and shader-data runtime for a multi-technique rendering testbed,
//! rewritten in Rust.
//!
//! The crate owns everything that feeds a renderer: the GPU data-layout
//! contract (uniforms, frame params, light records, binding slots), the
//! scene with its primitive models and light rig, camera techniques driven
//! by an input snapshot, and per-frame packet assembly.  Pipeline creation
//! and platform integration are intentionally kept outside of the crate so
//! that the code remains testable and easy to embed in headless tools.

pub mod app;
pub mod camera;
pub mod data_model;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod lighting;
pub mod model;
pub mod movement;
pub mod scene;
pub mod shader_types;
pub mod texture;
pub mod transform;

pub use app::{camera_from_objects, print_final_state, Testbed};
pub use camera::{ArcballCamera, Camera, FirstPersonCamera, OrthographicCamera, PlayerCamera};
pub use data_model::DataModel;
pub use frame::{compose_frame, DrawCall, FramePacket};
pub use geometry::{Mesh, Primitive, Vertex};
pub use input::{GamepadButton, InputState, KeyCode, MouseButton, NamedKey};
pub use lighting::{Light, SceneLighting};
pub use model::Model;
pub use scene::{Scene, SceneObject};
#[cfg(feature = "lighting")]
pub use shader_types::GpuLight;
pub use shader_types::{LightType, Params, Uniforms, SHADER_SOURCE};
pub use texture::{TextureHandle, TextureRegistry};
pub use transform::Transform;
