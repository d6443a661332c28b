//! Per-entity transform with a cached world matrix
//!
//! Local state is position, Euler rotation in degrees and scale. The world
//! matrix is only valid right after one of the `compute_model_matrix*` calls,
//! which the owning entity performs every frame during the update pass.
//!
//! The dirty flag is set by every setter and cleared by recomputation, but it
//! never gates recomputation. It exists so scripts can poll "did this change
//! since the last frame".

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Spatial state of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    /// Euler angles in degrees, applied yaw (Y), then pitch (X), then roll (Z)
    rotation: Vec3,
    scale: Vec3,
    model_matrix: Mat4,
    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            model_matrix: Mat4::identity(),
            dirty: true,
        }
    }
}

impl Transform {
    /// Identity transform, dirty until first computed
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set local position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_local_position(position);
        self
    }

    /// Builder pattern: Set local rotation (Euler degrees)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.set_local_rotation(rotation);
        self
    }

    /// Builder pattern: Set local scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_local_scale(scale);
        self
    }

    /// Replace the local position
    pub fn set_local_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Replace the local rotation (Euler degrees, no gimbal-lock protection)
    pub fn set_local_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.dirty = true;
    }

    /// Replace the local scale
    pub fn set_local_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Add `delta` to the local position
    pub fn translate(&mut self, delta: Vec3) {
        self.set_local_position(self.position + delta);
    }

    /// Add `delta` degrees to the local rotation
    pub fn rotate(&mut self, delta: Vec3) {
        self.set_local_rotation(self.rotation + delta);
    }

    /// Local TRS matrix: translation * (Ry * Rx * Rz) * scale
    pub fn local_model_matrix(&self) -> Mat4 {
        let rotation = Mat4::rotation_y_deg(self.rotation.y)
            * Mat4::rotation_x_deg(self.rotation.x)
            * Mat4::rotation_z_deg(self.rotation.z);

        Mat4::new_translation(&self.position) * rotation * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Recompute the world matrix for a root entity
    pub fn compute_model_matrix(&mut self) {
        self.model_matrix = self.local_model_matrix();
        self.dirty = false;
    }

    /// Recompute the world matrix under a parent's world matrix
    pub fn compute_model_matrix_with_parent(&mut self, parent_model_matrix: &Mat4) {
        self.model_matrix = parent_model_matrix * self.local_model_matrix();
        self.dirty = false;
    }

    /// World matrix from the last recompute
    pub fn model_matrix(&self) -> &Mat4 {
        &self.model_matrix
    }

    /// Local position
    pub fn local_position(&self) -> Vec3 {
        self.position
    }

    /// Local rotation in Euler degrees
    pub fn local_rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Local scale
    pub fn local_scale(&self) -> Vec3 {
        self.scale
    }

    /// World-space position (translation column)
    pub fn global_position(&self) -> Vec3 {
        self.model_matrix.column3(3)
    }

    /// World-space right axis (column 0, scaled)
    pub fn right(&self) -> Vec3 {
        self.model_matrix.column3(0)
    }

    /// World-space up axis (column 1, scaled)
    pub fn up(&self) -> Vec3 {
        self.model_matrix.column3(1)
    }

    /// World-space backward axis (column 2, scaled)
    pub fn backward(&self) -> Vec3 {
        self.model_matrix.column3(2)
    }

    /// World-space forward axis (negated column 2)
    pub fn forward(&self) -> Vec3 {
        -self.backward()
    }

    /// World-space scale (lengths of the basis columns)
    pub fn global_scale(&self) -> Vec3 {
        Vec3::new(self.right().magnitude(), self.up().magnitude(), self.backward().magnitude())
    }

    /// Whether a setter ran since the last recompute
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
