//! Asset registry
//!
//! Central table mapping opaque keys to GPU-resident handles. The registry
//! owns no GPU state itself; uploads go through the graphics backend and
//! only the resulting handles are tracked here.

use crate::assets::{AssetError, ImageData};
use crate::render::api::{GraphicsApi, TextureHandle, VertexArrayHandle};
use crate::render::mesh::MeshData;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Opaque key for registered mesh geometry
    pub struct MeshId;

    /// Opaque key for registered textures
    pub struct TextureId;
}

/// One GPU draw of a registered mesh
///
/// A mesh may consist of several sub-draws, each with its own vertex array
/// and index count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubMesh {
    /// Vertex array to bind for this draw
    pub vertex_array: VertexArrayHandle,
    /// Number of 32-bit indices to draw
    pub index_count: u32,
}

/// Registry of GPU-resident meshes and textures
pub struct AssetRegistry {
    meshes: SlotMap<MeshId, Vec<SubMesh>>,
    textures: SlotMap<TextureId, TextureHandle>,
}

impl AssetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            meshes: SlotMap::with_key(),
            textures: SlotMap::with_key(),
        }
    }

    /// Register already-uploaded mesh sub-draws
    pub fn insert_mesh(&mut self, sub_meshes: Vec<SubMesh>) -> MeshId {
        self.meshes.insert(sub_meshes)
    }

    /// Register an already-uploaded texture
    pub fn insert_texture(&mut self, handle: TextureHandle) -> TextureId {
        self.textures.insert(handle)
    }

    /// Upload mesh geometry and register it as a single sub-draw
    pub fn upload_mesh(
        &mut self,
        gfx: &mut dyn GraphicsApi,
        mesh: &MeshData,
    ) -> Result<MeshId, AssetError> {
        self.upload_mesh_parts(gfx, std::slice::from_ref(mesh))
    }

    /// Upload several geometry parts and register them under one key
    pub fn upload_mesh_parts(
        &mut self,
        gfx: &mut dyn GraphicsApi,
        parts: &[MeshData],
    ) -> Result<MeshId, AssetError> {
        let mut sub_meshes = Vec::with_capacity(parts.len());
        for part in parts {
            let vertex_array = gfx.create_vertex_array(&part.vertices, &part.indices)?;
            sub_meshes.push(SubMesh {
                vertex_array,
                index_count: part.index_count(),
            });
        }

        let id = self.meshes.insert(sub_meshes);
        log::debug!("Registered mesh {:?} with {} sub-draws", id, parts.len());
        Ok(id)
    }

    /// Upload an image and register the resulting texture
    pub fn upload_texture(
        &mut self,
        gfx: &mut dyn GraphicsApi,
        image: &ImageData,
    ) -> Result<TextureId, AssetError> {
        let handle = gfx.create_texture(image)?;
        let id = self.textures.insert(handle);
        log::debug!("Registered texture {:?}", id);
        Ok(id)
    }

    /// Resolve a mesh key to its sub-draw list
    ///
    /// Returns `None` for keys the registry does not know; the caller
    /// decides how to degrade.
    pub fn mesh_handles(&self, id: MeshId) -> Option<&[SubMesh]> {
        self.meshes.get(id).map(Vec::as_slice)
    }

    /// Resolve a texture key to its GPU handle
    pub fn texture_handle(&self, id: TextureId) -> Option<TextureHandle> {
        self.textures.get(id).copied()
    }

    /// Number of registered meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of registered textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
