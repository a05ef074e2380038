//! Mesh component for the ECS system

use crate::assets::{MeshId, TextureId};
use crate::ecs::Component;
use crate::foundation::math::Vec3;

/// Shader variant selector for a mesh entity
///
/// Variants share the standard fragment stage but use distinct vertex
/// stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderVariant {
    /// Standard vertex stage
    #[default]
    Standard = 0,
    /// Animated water vertex stage, driven by a time uniform
    Water = 1,
}

/// ECS Mesh component
///
/// References GPU geometry through the asset registry. The texture is
/// optional; `None` means the entity renders untextured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    /// Registry key of the mesh geometry
    pub mesh: MeshId,

    /// Shader variant used to draw this mesh
    pub shader: ShaderVariant,

    /// Registry key of the albedo texture, if any
    pub texture: Option<TextureId>,

    /// Material color (r, g, b)
    pub color: Vec3,
}

impl Component for MeshComponent {}

impl MeshComponent {
    /// Create a mesh component with the standard shader and no texture
    pub fn new(mesh: MeshId) -> Self {
        Self {
            mesh,
            shader: ShaderVariant::Standard,
            texture: None,
            color: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Builder pattern: Set the shader variant
    pub fn with_shader(mut self, shader: ShaderVariant) -> Self {
        self.shader = shader;
        self
    }

    /// Builder pattern: Set the albedo texture
    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Builder pattern: Set the material color
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = Vec3::new(r, g, b);
        self
    }
}
