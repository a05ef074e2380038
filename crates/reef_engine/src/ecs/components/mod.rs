//! Built-in components
//!
//! Pure data records read by the render system; other systems own their
//! mutation.

pub mod transform;
pub mod camera;
pub mod mesh;

pub use transform::TransformComponent;
pub use camera::CameraComponent;
pub use mesh::{MeshComponent, ShaderVariant};
