//! Mesh descriptions handed to the backend
//!
//! Only the parameters travel through the render boundary; the backend turns
//! them into vertex data (or loads the model file).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Geometry a mesh renderer asks the backend to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeshShape {
    /// Unit cube centred on the origin
    Cuboid,
    /// UV sphere of radius 1
    Sphere {
        /// Longitudinal subdivisions
        sectors: u32,
        /// Latitudinal subdivisions
        stacks: u32,
    },
    /// Capsule along the Y axis
    Capsule {
        /// Radius of the hemispheres and the cylinder
        radius: f32,
        /// Height of the cylindrical section
        cylinder_height: f32,
        /// Subdivisions around the axis
        sectors: u32,
        /// Subdivisions of each hemisphere
        hemisphere_stacks: u32,
        /// Subdivisions of the cylinder
        cylinder_stacks: u32,
    },
    /// Model loaded from a file by the backend
    Model {
        /// Path of the model file
        path: PathBuf,
    },
}

impl MeshShape {
    /// Sphere with the usual subdivision
    pub fn sphere() -> Self {
        Self::Sphere { sectors: 36, stacks: 18 }
    }

    /// Capsule with the usual subdivision
    pub fn capsule(radius: f32, cylinder_height: f32) -> Self {
        Self::Capsule {
            radius,
            cylinder_height,
            sectors: 36,
            hemisphere_stacks: 9,
            cylinder_stacks: 1,
        }
    }

    /// Model from a file
    pub fn model(path: impl Into<PathBuf>) -> Self {
        Self::Model { path: path.into() }
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cuboid => "cuboid",
            Self::Sphere { .. } => "sphere",
            Self::Capsule { .. } => "capsule",
            Self::Model { .. } => "model",
        }
    }
}
