//! Recording graphics backend for unit tests
//!
//! Captures every backend call in order so tests can assert on the exact
//! sequence the renderer issues, without a GL context.

use crate::assets::ImageData;
use crate::foundation::math::Mat4;
use crate::render::api::{
    GraphicsApi, GraphicsResult, ProgramHandle, TextureHandle, VertexArrayHandle,
};
use crate::render::mesh::Vertex;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GraphicsCall {
    CreateProgram(ProgramHandle),
    UseProgram(ProgramHandle),
    SetUniformF32 {
        program: ProgramHandle,
        name: String,
        value: f32,
    },
    SetUniformI32 {
        program: ProgramHandle,
        name: String,
        value: i32,
    },
    SetUniformMat4 {
        program: ProgramHandle,
        name: String,
        value: Mat4,
    },
    BindTexture {
        unit: u32,
        texture: TextureHandle,
    },
    BindVertexArray(VertexArrayHandle),
    DrawIndexed(u32),
    SetViewport {
        width: u32,
        height: u32,
    },
    Clear,
    CreateVertexArray(VertexArrayHandle),
    CreateTexture(TextureHandle),
}

/// Backend double that records calls and hands out sequential handles
pub(crate) struct RecordingGraphics {
    pub calls: Vec<GraphicsCall>,
    pub time: f32,
    next_handle: u64,
}

impl RecordingGraphics {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            time: 0.0,
            next_handle: 1,
        }
    }

    fn allocate_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    /// Number of recorded calls matching a predicate
    pub fn count(&self, predicate: impl Fn(&GraphicsCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl GraphicsApi for RecordingGraphics {
    fn create_program(
        &mut self,
        _vertex_src: &str,
        _fragment_src: &str,
    ) -> GraphicsResult<ProgramHandle> {
        let handle = ProgramHandle(self.allocate_handle());
        self.calls.push(GraphicsCall::CreateProgram(handle));
        Ok(handle)
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.calls.push(GraphicsCall::UseProgram(program));
    }

    fn set_uniform_f32(&mut self, program: ProgramHandle, name: &str, value: f32) {
        self.calls.push(GraphicsCall::SetUniformF32 {
            program,
            name: name.to_string(),
            value,
        });
    }

    fn set_uniform_i32(&mut self, program: ProgramHandle, name: &str, value: i32) {
        self.calls.push(GraphicsCall::SetUniformI32 {
            program,
            name: name.to_string(),
            value,
        });
    }

    fn set_uniform_mat4(&mut self, program: ProgramHandle, name: &str, value: &Mat4) {
        self.calls.push(GraphicsCall::SetUniformMat4 {
            program,
            name: name.to_string(),
            value: *value,
        });
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle) {
        self.calls.push(GraphicsCall::BindTexture { unit, texture });
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.calls.push(GraphicsCall::BindVertexArray(vertex_array));
    }

    fn draw_indexed(&mut self, index_count: u32) {
        self.calls.push(GraphicsCall::DrawIndexed(index_count));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.calls.push(GraphicsCall::SetViewport { width, height });
    }

    fn clear(&mut self, _r: f32, _g: f32, _b: f32, _a: f32) {
        self.calls.push(GraphicsCall::Clear);
    }

    fn elapsed_seconds(&self) -> f32 {
        self.time
    }

    fn create_vertex_array(
        &mut self,
        _vertices: &[Vertex],
        _indices: &[u32],
    ) -> GraphicsResult<VertexArrayHandle> {
        let handle = VertexArrayHandle(self.allocate_handle());
        self.calls.push(GraphicsCall::CreateVertexArray(handle));
        Ok(handle)
    }

    fn create_texture(&mut self, _image: &ImageData) -> GraphicsResult<TextureHandle> {
        let handle = TextureHandle(self.allocate_handle());
        self.calls.push(GraphicsCall::CreateTexture(handle));
        Ok(handle)
    }
}
