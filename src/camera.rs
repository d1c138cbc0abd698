use glam::{Mat4, Vec3, Vec4};

use crate::input::{InputState, MouseButton};
use crate::movement::{self, settings};

/// A camera technique: a projection, a view and how input drives it.
///
/// Rotations are in radians here; scene files author degrees and convert
/// when the camera is built.
pub trait Camera {
    fn projection_matrix(&self) -> Mat4;
    fn view_matrix(&self) -> Mat4;
    fn position(&self) -> Vec3;
    fn update_size(&mut self, width: u32, height: u32);
    fn update(&mut self, delta_time: f32, input: &InputState);
}

fn rotation_xyz(rotation: Vec3) -> Mat4 {
    Mat4::from_rotation_x(rotation.x)
        * Mat4::from_rotation_y(rotation.y)
        * Mat4::from_rotation_z(rotation.z)
}

fn rotation_yxz(rotation: Vec3) -> Mat4 {
    Mat4::from_rotation_y(rotation.y)
        * Mat4::from_rotation_x(rotation.x)
        * Mat4::from_rotation_z(rotation.z)
}

fn aspect_of(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

const DEFAULT_FOV: f32 = 70.0;
const DEFAULT_NEAR: f32 = 0.1;
const DEFAULT_FAR: f32 = 100.0;

/// Free-look camera translated and rotated directly by input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstPersonCamera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub aspect: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            aspect: 1.0,
            fov: DEFAULT_FOV.to_radians(),
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl Camera for FirstPersonCamera {
    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    fn view_matrix(&self) -> Mat4 {
        (Mat4::from_translation(self.position) * rotation_xyz(self.rotation)).inverse()
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn update_size(&mut self, width: u32, height: u32) {
        self.aspect = aspect_of(width, height);
    }

    fn update(&mut self, delta_time: f32, input: &InputState) {
        let delta = movement::update_input(delta_time, input, self.rotation.y);
        self.rotation += delta.rotation;
        self.position += delta.position;
    }
}

/// Orbits a target point; scroll zooms, dragging pans around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcballCamera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub target: Vec3,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub aspect: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ArcballCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            target: Vec3::ZERO,
            distance: 2.5,
            min_distance: 0.0,
            max_distance: 20.0,
            aspect: 1.0,
            fov: DEFAULT_FOV.to_radians(),
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl Camera for ArcballCamera {
    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    fn view_matrix(&self) -> Mat4 {
        if self.target == self.position {
            (Mat4::from_translation(self.target) * rotation_yxz(self.rotation)).inverse()
        } else {
            Mat4::look_at_rh(self.position, self.target, Vec3::Y)
        }
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn update_size(&mut self, width: u32, height: u32) {
        self.aspect = aspect_of(width, height);
    }

    fn update(&mut self, _delta_time: f32, input: &InputState) {
        let scroll = input.take_mouse_scroll();
        self.distance -= (scroll.x + scroll.y) * settings::MOUSE_SCROLL_SENSITIVITY;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);

        if input.is_mouse_button_down(MouseButton::LEFT) {
            let delta = input.take_mouse_delta();
            self.rotation.x += delta.y * settings::MOUSE_PAN_SENSITIVITY;
            self.rotation.y += delta.x * settings::MOUSE_PAN_SENSITIVITY;
            self.rotation.x = self
                .rotation
                .x
                .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
        }

        let rotate = rotation_yxz(Vec3::new(-self.rotation.x, self.rotation.y, 0.0));
        let rotated = rotate * Vec4::new(0.0, 0.0, -self.distance, 0.0);
        self.position = self.target + rotated.truncate();
    }
}

/// Parallel-projection camera; scroll changes the visible extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicCamera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub aspect: f32,
    pub view_size: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            aspect: 1.0,
            view_size: 10.0,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl Camera for OrthographicCamera {
    fn projection_matrix(&self) -> Mat4 {
        let half_width = self.view_size * self.aspect * 0.5;
        let half_height = self.view_size * 0.5;
        Mat4::orthographic_rh_gl(
            -half_width,
            half_width,
            -half_height,
            half_height,
            self.near,
            self.far,
        )
    }

    fn view_matrix(&self) -> Mat4 {
        (Mat4::from_translation(self.position) * rotation_xyz(self.rotation)).inverse()
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn update_size(&mut self, width: u32, height: u32) {
        self.aspect = aspect_of(width, height);
    }

    fn update(&mut self, delta_time: f32, input: &InputState) {
        let delta = movement::update_input(delta_time, input, self.rotation.y);
        self.position += delta.position;
        let scroll = input.take_mouse_scroll();
        self.view_size -= scroll.x + scroll.y;
    }
}

/// First-person camera with mouse-pan look, the default for the testbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerCamera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub aspect: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PlayerCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            aspect: 1.0,
            fov: DEFAULT_FOV.to_radians(),
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl PlayerCamera {
    /// Pitch and yaw combined into the look direction.
    pub fn forward_vector(&self) -> Vec3 {
        Vec3::new(
            self.rotation.y.sin() * self.rotation.x.cos(),
            self.rotation.x.sin(),
            self.rotation.y.cos() * self.rotation.x.cos(),
        )
        .normalize()
    }
}

impl Camera for PlayerCamera {
    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    fn view_matrix(&self) -> Mat4 {
        let rotate = rotation_yxz(Vec3::new(-self.rotation.x, self.rotation.y, 0.0));
        (Mat4::from_translation(self.position) * rotate).inverse()
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn update_size(&mut self, width: u32, height: u32) {
        self.aspect = aspect_of(width, height);
    }

    fn update(&mut self, delta_time: f32, input: &InputState) {
        let delta = movement::update_input(delta_time, input, self.rotation.y);
        self.rotation += delta.rotation;
        self.position += delta.position;

        if input.is_mouse_button_down(MouseButton::LEFT) {
            let mouse = input.take_mouse_delta();
            self.rotation.x += mouse.y * settings::MOUSE_PAN_SENSITIVITY;
            self.rotation.y += mouse.x * settings::MOUSE_PAN_SENSITIVITY;
            self.rotation.x = self
                .rotation
                .x
                .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
        }
    }
}
