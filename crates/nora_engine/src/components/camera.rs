//! # Camera Component
//!
//! First-person perspective camera driven by yaw and pitch. The camera has no
//! position of its own: the view matrix looks out of its owner's world
//! position, so moving the camera means moving the owning entity.
//!
//! ## Conventions
//! - Right-handed, Y-up world space
//! - Yaw -90° looks down -Z; pitch is constrained to ±89° when requested
//! - Zoom is the vertical field of view in degrees, clamped to [1, 45] by scrolling

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::scene::{CameraProvider, Component, OwnerSlot, Transform};

const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;
const DEFAULT_SPEED: f32 = 2.5;
const DEFAULT_SENSITIVITY: f32 = 0.1;
const DEFAULT_ZOOM: f32 = 45.0;
const PITCH_LIMIT: f32 = 89.0;
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 45.0;

/// Direction for keyboard-driven camera movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    /// Along the front vector
    Forward,
    /// Against the front vector
    Backward,
    /// Against the right vector
    Left,
    /// Along the right vector
    Right,
}

/// Perspective camera component
///
/// Provides the view and projection matrices for the render pass when it is
/// the first camera in the scene.
///
/// # Example
/// ```rust
/// use nora_engine::components::Camera;
/// use nora_engine::scene::Entity;
///
/// let mut player = Entity::named("player");
/// player.add_component(Camera::new().with_orientation(-90.0, -10.0));
/// ```
#[derive(Debug, Clone)]
pub struct Camera {
    owner: OwnerSlot,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    /// Units per second for keyboard movement
    pub movement_speed: f32,
    /// Degrees per unit of mouse movement
    pub mouse_sensitivity: f32,
}

impl Camera {
    /// Camera looking down -Z with a Y-up world
    pub fn new() -> Self {
        Self::with_world_up(Vec3::y(), DEFAULT_YAW, DEFAULT_PITCH)
    }

    /// Camera with an explicit world up vector and orientation
    ///
    /// # Arguments
    /// * `world_up` - Up direction of the world, normally +Y
    /// * `yaw` - Heading in degrees
    /// * `pitch` - Elevation in degrees
    pub fn with_world_up(world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            owner: OwnerSlot::new(),
            world_up,
            yaw,
            pitch,
            zoom: DEFAULT_ZOOM,
            front: Vec3::new(0.0, 0.0, -1.0),
            right: Vec3::x(),
            up: Vec3::y(),
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
        };
        camera.update_camera_vectors();
        camera
    }

    /// Builder pattern: Set yaw and pitch in degrees
    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self.update_camera_vectors();
        self
    }

    /// Heading in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Elevation in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the heading and refresh the direction vectors
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update_camera_vectors();
    }

    /// Set the elevation and refresh the direction vectors
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
        self.update_camera_vectors();
    }

    /// Set the field of view without clamping
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    /// Unit viewing direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit right direction
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up direction of the camera
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Move the owner along the camera axes
    ///
    /// # Arguments
    /// * `direction` - Which way to move
    /// * `transform` - The owning entity's transform
    /// * `delta_time` - Seconds since the last frame
    pub fn process_keyboard(&self, direction: CameraMovement, transform: &mut Transform, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        let offset = match direction {
            CameraMovement::Forward => self.front * velocity,
            CameraMovement::Backward => -self.front * velocity,
            CameraMovement::Left => -self.right * velocity,
            CameraMovement::Right => self.right * velocity,
        };
        transform.translate(offset);
    }

    /// Turn the camera by a mouse offset
    ///
    /// Offsets are scaled by `mouse_sensitivity`. With `constrain_pitch` the
    /// pitch stays within ±89° so the view never flips.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_camera_vectors();
    }

    /// Zoom by a scroll offset, keeping the field of view in [1, 45] degrees
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_camera_vectors(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);

        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Camera {
    fn owner_slot(&self) -> &OwnerSlot {
        &self.owner
    }

    fn owner_slot_mut(&mut self) -> &mut OwnerSlot {
        &mut self.owner
    }

    fn as_camera(&self) -> Option<&(dyn CameraProvider + 'static)> {
        Some(self)
    }

    fn as_camera_mut(&mut self) -> Option<&mut (dyn CameraProvider + 'static)> {
        Some(self)
    }
}

impl CameraProvider for Camera {
    fn view_matrix(&self, owner: &Transform) -> Mat4 {
        let position = owner.global_position();
        Mat4::look_at(position, position + self.front, self.up)
    }

    fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_gl(self.zoom, aspect, near, far)
    }
}

crate::native_capability!(Camera, "Camera");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use crate::scene::{CapabilitySet, Entity, FrameContext, Scene};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = Camera::new();

        assert_relative_eq!(camera.front(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(camera.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(camera.up(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
        assert_eq!(camera.zoom(), 45.0);
        assert_eq!(camera.capabilities(), CapabilitySet::UPDATABLE | CapabilitySet::CAMERA);
    }

    #[test]
    fn test_pitch_is_constrained() {
        let mut camera = Camera::new();
        camera.process_mouse_movement(0.0, 1000.0, true);
        assert_eq!(camera.pitch(), 89.0);

        camera.process_mouse_movement(0.0, -5000.0, true);
        assert_eq!(camera.pitch(), -89.0);

        camera.process_mouse_movement(0.0, -100.0, false);
        assert_relative_eq!(camera.pitch(), -99.0, epsilon = EPSILON);
    }

    #[test]
    fn test_mouse_movement_turns_front() {
        let mut camera = Camera::new();
        // 900 * 0.1 = 90 degrees of yaw: from -Z to +X
        camera.process_mouse_movement(900.0, 0.0, true);

        assert_relative_eq!(camera.yaw(), 0.0, epsilon = EPSILON);
        assert_relative_eq!(camera.front(), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_scroll_clamps_zoom() {
        let mut camera = Camera::new();
        camera.process_mouse_scroll(-10.0);
        assert_eq!(camera.zoom(), 45.0);

        camera.process_mouse_scroll(20.0);
        assert_eq!(camera.zoom(), 25.0);

        camera.process_mouse_scroll(50.0);
        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn test_keyboard_moves_owner() {
        let camera = Camera::new();
        let mut transform = Transform::new();

        camera.process_keyboard(CameraMovement::Forward, &mut transform, 2.0);
        assert_relative_eq!(transform.local_position(), Vec3::new(0.0, 0.0, -5.0), epsilon = EPSILON);

        camera.process_keyboard(CameraMovement::Right, &mut transform, 1.0);
        assert_relative_eq!(transform.local_position(), Vec3::new(2.5, 0.0, -5.0), epsilon = EPSILON);
    }

    #[test]
    fn test_view_follows_owner_world_position() {
        let mut scene = Scene::new();
        let rig = Entity::named("rig")
            .with_transform(Transform::new().with_position(Vec3::new(0.0, 0.0, 3.0)))
            .with_child(
                Entity::named("eye")
                    .with_transform(Transform::new().with_position(Vec3::new(0.0, 0.0, 2.0)))
                    .with_component(Camera::new()),
            );
        scene.add_entity(rig);
        scene.update(&FrameContext::default());

        let eye = scene.first_entity_with_component::<Camera>().unwrap();
        let camera = eye.get_component::<Camera>().and_then(|found| found.native()).unwrap();
        let view = camera.view_matrix(eye.transform());

        let origin = view.transform_point(&Point3::origin());
        assert_relative_eq!(origin.coords, Vec3::new(0.0, 0.0, -5.0), epsilon = EPSILON);
    }

    #[test]
    fn test_projection_uses_zoom() {
        let camera = Camera::new();
        let expected = Mat4::perspective_gl(45.0, 4.0 / 3.0, 0.1, 100.0);
        assert_relative_eq!(camera.projection_matrix(4.0 / 3.0, 0.1, 100.0), expected, epsilon = EPSILON);
    }
}
