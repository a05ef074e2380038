//! Backend abstraction for the rendering system
//!
//! This module defines the trait a graphics backend must implement to serve
//! the frame renderer. All GPU state lives behind an exclusively-owned
//! context object threaded by `&mut` through every call; nothing binds
//! through hidden globals.

use crate::assets::ImageData;
use crate::foundation::math::Mat4;
use crate::render::mesh::Vertex;
use thiserror::Error;

/// Result type for backend operations
pub type GraphicsResult<T> = Result<T, GraphicsError>;

/// Handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u64);

/// Handle to a vertex array stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u64);

/// Handle to a GPU texture stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Graphics backend errors
#[derive(Debug, Error)]
pub enum GraphicsError {
    /// Shader stage failed to compile
    #[error("shader compilation failed: {0}")]
    ShaderCompilation(String),

    /// Program failed to link
    #[error("program link failed: {0}")]
    ProgramLink(String),

    /// GPU object allocation failed
    #[error("failed to allocate GPU object: {0}")]
    Allocation(String),
}

/// Graphics backend trait
///
/// Covers the surface the frame renderer consumes: program lifecycle and
/// activation, per-draw uniform and binding state, indexed draws, the
/// viewport, a monotonic clock, and resource upload for the asset path.
pub trait GraphicsApi {
    /// Compile and link a program from vertex and fragment GLSL sources
    fn create_program(&mut self, vertex_src: &str, fragment_src: &str)
        -> GraphicsResult<ProgramHandle>;

    /// Make a program current for subsequent uniform sets and draws
    fn use_program(&mut self, program: ProgramHandle);

    /// Set a scalar float uniform by name on the given (active) program
    fn set_uniform_f32(&mut self, program: ProgramHandle, name: &str, value: f32);

    /// Set a scalar integer uniform by name on the given (active) program
    fn set_uniform_i32(&mut self, program: ProgramHandle, name: &str, value: i32);

    /// Set a 4x4 matrix uniform by name on the given (active) program
    ///
    /// Matrices are uploaded column-major without transposition.
    fn set_uniform_mat4(&mut self, program: ProgramHandle, name: &str, value: &Mat4);

    /// Bind a texture to the given texture unit
    fn bind_texture(&mut self, unit: u32, texture: TextureHandle);

    /// Bind a vertex array for subsequent draws
    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Issue an indexed triangle-list draw of `index_count` 32-bit indices,
    /// starting at offset zero in the bound vertex array's index buffer
    fn draw_indexed(&mut self, index_count: u32);

    /// Set the active viewport region to `width` x `height` at origin
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clear the color and depth buffers
    fn clear(&mut self, r: f32, g: f32, b: f32, a: f32);

    /// Seconds elapsed on the backend's monotonic clock since context
    /// creation
    fn elapsed_seconds(&self) -> f32;

    /// Upload interleaved vertex and index data into a new vertex array
    fn create_vertex_array(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> GraphicsResult<VertexArrayHandle>;

    /// Upload an RGBA8 image into a new 2D texture
    fn create_texture(&mut self, image: &ImageData) -> GraphicsResult<TextureHandle>;
}
