//! Asset management
//!
//! The registry maps opaque mesh and texture keys to GPU-resident handles.
//! Image decoding lives here too; mesh geometry comes from
//! [`render::mesh`](crate::render::mesh).

pub mod registry;
pub mod image_loader;

pub use registry::{AssetRegistry, MeshId, SubMesh, TextureId};
pub use image_loader::ImageData;

use thiserror::Error;

/// Asset system errors
#[derive(Debug, Error)]
pub enum AssetError {
    /// Source data could not be read or decoded
    #[error("asset load failed: {0}")]
    LoadFailed(String),

    /// GPU upload failed
    #[error(transparent)]
    Graphics(#[from] crate::render::GraphicsError),
}
