//! Native components
//!
//! - **Camera**: perspective camera provider following its owner
//! - **MeshRenderer**: renderable mesh or model
//! - **Text**: GUI text

mod camera;
mod mesh;
mod text;

pub use camera::{Camera, CameraMovement};
pub use mesh::MeshRenderer;
pub use text::Text;
