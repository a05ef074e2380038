//! OpenGL backend
//!
//! [`GlContext`] implements [`GraphicsApi`] over a glow function table loaded
//! from the window's GL context. It owns the mapping from opaque engine
//! handles to GL objects; nothing outside this module touches GL state.

use crate::assets::ImageData;
use crate::foundation::math::Mat4;
use crate::render::api::{
    GraphicsApi, GraphicsError, GraphicsResult, ProgramHandle, TextureHandle, VertexArrayHandle,
};
use crate::render::mesh::Vertex;
use crate::render::window::Window;
use glow::HasContext;
use std::collections::HashMap;
use std::time::Instant;

/// OpenGL graphics context
///
/// Must be created and used on the thread that owns the window's GL context.
pub struct GlContext {
    gl: glow::Context,
    programs: HashMap<ProgramHandle, glow::Program>,
    vertex_arrays: HashMap<VertexArrayHandle, glow::VertexArray>,
    textures: HashMap<TextureHandle, glow::Texture>,
    next_handle: u64,
    started: Instant,
}

impl GlContext {
    /// Load the GL function table from the window and prepare default state
    pub fn new(window: &mut Window) -> Self {
        let gl = unsafe {
            glow::Context::from_loader_function(|name| window.proc_address(name))
        };

        unsafe {
            gl.enable(glow::DEPTH_TEST);
        }

        log::info!("OpenGL context initialized");

        Self {
            gl,
            programs: HashMap::new(),
            vertex_arrays: HashMap::new(),
            textures: HashMap::new(),
            next_handle: 1,
            started: Instant::now(),
        }
    }

    fn allocate_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    fn compile_stage(&self, stage: u32, source: &str) -> GraphicsResult<glow::Shader> {
        unsafe {
            let shader = self
                .gl
                .create_shader(stage)
                .map_err(GraphicsError::Allocation)?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            if !self.gl.get_shader_compile_status(shader) {
                let info_log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(GraphicsError::ShaderCompilation(info_log));
            }

            Ok(shader)
        }
    }

    fn uniform_location(
        &self,
        program: ProgramHandle,
        name: &str,
    ) -> Option<glow::UniformLocation> {
        let program = self.programs.get(&program)?;
        unsafe { self.gl.get_uniform_location(*program, name) }
    }
}

impl GraphicsApi for GlContext {
    fn create_program(
        &mut self,
        vertex_src: &str,
        fragment_src: &str,
    ) -> GraphicsResult<ProgramHandle> {
        let vertex_shader = self.compile_stage(glow::VERTEX_SHADER, vertex_src)?;
        let fragment_shader = self.compile_stage(glow::FRAGMENT_SHADER, fragment_src)?;

        unsafe {
            let program = self
                .gl
                .create_program()
                .map_err(GraphicsError::Allocation)?;
            self.gl.attach_shader(program, vertex_shader);
            self.gl.attach_shader(program, fragment_shader);
            self.gl.link_program(program);

            // Shader objects are no longer needed once the program is linked.
            self.gl.detach_shader(program, vertex_shader);
            self.gl.detach_shader(program, fragment_shader);
            self.gl.delete_shader(vertex_shader);
            self.gl.delete_shader(fragment_shader);

            if !self.gl.get_program_link_status(program) {
                let info_log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(GraphicsError::ProgramLink(info_log));
            }

            let handle = ProgramHandle(self.allocate_handle());
            self.programs.insert(handle, program);
            log::debug!("Linked program {:?}", handle);
            Ok(handle)
        }
    }

    fn use_program(&mut self, program: ProgramHandle) {
        if let Some(&native) = self.programs.get(&program) {
            unsafe { self.gl.use_program(Some(native)) };
        } else {
            log::warn!("use_program: unknown handle {:?}", program);
        }
    }

    fn set_uniform_f32(&mut self, program: ProgramHandle, name: &str, value: f32) {
        let location = self.uniform_location(program, name);
        unsafe { self.gl.uniform_1_f32(location.as_ref(), value) };
    }

    fn set_uniform_i32(&mut self, program: ProgramHandle, name: &str, value: i32) {
        let location = self.uniform_location(program, name);
        unsafe { self.gl.uniform_1_i32(location.as_ref(), value) };
    }

    fn set_uniform_mat4(&mut self, program: ProgramHandle, name: &str, value: &Mat4) {
        let location = self.uniform_location(program, name);
        // nalgebra stores column-major, matching GL's layout with no
        // transposition.
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(location.as_ref(), false, value.as_slice())
        };
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle) {
        if let Some(&native) = self.textures.get(&texture) {
            unsafe {
                self.gl.active_texture(glow::TEXTURE0 + unit);
                self.gl.bind_texture(glow::TEXTURE_2D, Some(native));
            }
        } else {
            log::warn!("bind_texture: unknown handle {:?}", texture);
        }
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        if let Some(&native) = self.vertex_arrays.get(&vertex_array) {
            unsafe { self.gl.bind_vertex_array(Some(native)) };
        } else {
            log::warn!("bind_vertex_array: unknown handle {:?}", vertex_array);
        }
    }

    fn draw_indexed(&mut self, index_count: u32) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, index_count as i32, glow::UNSIGNED_INT, 0)
        };
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) };
    }

    fn clear(&mut self, r: f32, g: f32, b: f32, a: f32) {
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn elapsed_seconds(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    fn create_vertex_array(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> GraphicsResult<VertexArrayHandle> {
        unsafe {
            let vao = self
                .gl
                .create_vertex_array()
                .map_err(GraphicsError::Allocation)?;
            self.gl.bind_vertex_array(Some(vao));

            let vertex_buffer = self.gl.create_buffer().map_err(GraphicsError::Allocation)?;
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );

            let index_buffer = self.gl.create_buffer().map_err(GraphicsError::Allocation)?;
            self.gl
                .bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(index_buffer));
            self.gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );

            // Interleaved layout: position (3), normal (3), uv (2).
            let stride = std::mem::size_of::<Vertex>() as i32;
            self.gl.enable_vertex_attrib_array(0);
            self.gl
                .vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            self.gl.enable_vertex_attrib_array(1);
            self.gl
                .vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 12);
            self.gl.enable_vertex_attrib_array(2);
            self.gl
                .vertex_attrib_pointer_f32(2, 2, glow::FLOAT, false, stride, 24);

            self.gl.bind_vertex_array(None);

            let handle = VertexArrayHandle(self.allocate_handle());
            self.vertex_arrays.insert(handle, vao);
            log::debug!(
                "Uploaded vertex array {:?} ({} vertices, {} indices)",
                handle,
                vertices.len(),
                indices.len()
            );
            Ok(handle)
        }
    }

    fn create_texture(&mut self, image: &ImageData) -> GraphicsResult<TextureHandle> {
        unsafe {
            let texture = self
                .gl
                .create_texture()
                .map_err(GraphicsError::Allocation)?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                image.width as i32,
                image.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(&image.pixels),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::REPEAT as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::REPEAT as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            self.gl.generate_mipmap(glow::TEXTURE_2D);
            self.gl.bind_texture(glow::TEXTURE_2D, None);

            let handle = TextureHandle(self.allocate_handle());
            self.textures.insert(handle, texture);
            log::debug!(
                "Uploaded texture {:?} ({}x{})",
                handle,
                image.width,
                image.height
            );
            Ok(handle)
        }
    }
}
