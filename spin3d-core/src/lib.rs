/// spin3d Core Library - Shared geometry and math for the rotating-cube demos
///
/// This library provides the stateless core functionality for both frontends:
/// cube vertex streams, rotation state, camera and projection calculations,
/// lighting products, and the render-pass configuration.

pub mod geometry;
pub mod lighting;
pub mod projection;
pub mod render;
pub mod transform;

// Re-export commonly used types
pub use geometry::{flatten, Cube, EDGE_VERTEX_COUNT, FACE_VERTEX_COUNT};
pub use lighting::{Light, LightingProducts, Material};
pub use projection::Camera;
pub use render::{RenderConfig, RenderMode};
pub use transform::{RotationState, Transform};
