//! Rendering layer
//!
//! The [`GraphicsApi`] trait is the seam between engine code and the GPU;
//! [`GlContext`] is its OpenGL implementation. Mesh data and the GLFW window
//! wrapper live here as well.

pub mod api;
pub mod gl;
pub mod mesh;
pub mod window;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{
    GraphicsApi, GraphicsError, GraphicsResult, ProgramHandle, TextureHandle, VertexArrayHandle,
};
pub use gl::GlContext;
pub use window::{Window, WindowError};
