//! # Reef Engine
//!
//! A small entity-component-system game engine with an OpenGL frame renderer.
//!
//! ## Features
//!
//! - **OpenGL Rendering**: forward rendering of mesh entities through a
//!   backend-agnostic graphics trait
//! - **ECS Architecture**: typed component storage with stable-order queries
//! - **Asset Registry**: GPU mesh and texture handles behind opaque keys
//! - **Event Dispatch**: immediate and deferred lifecycle events
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reef_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     reef_engine::foundation::logging::init();
//!
//!     let config = EngineConfig::default();
//!     let mut window = Window::new(
//!         &config.window.title,
//!         config.window.width,
//!         config.window.height,
//!     )?;
//!     let mut gfx = GlContext::new(&mut window);
//!     let renderer = RenderSystem::new(&mut gfx, &config.shaders)?;
//!
//!     let mut events = EventSystem::new();
//!     events.register_handler(Box::new(renderer));
//!     Ok(())
//! }
//! ```

pub mod foundation;
pub mod ecs;
pub mod events;
pub mod assets;
pub mod render;
pub mod config;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Vec2, Vec3, Mat4, Mat4Ext},
            time::Timer,
        },
        ecs::{
            World, Entity, Component,
            components::{TransformComponent, CameraComponent, MeshComponent, ShaderVariant},
            systems::RenderSystem,
        },
        events::{Event, EventArg, EventType, EventSystem, EventHandler, EngineContext},
        assets::{AssetRegistry, MeshId, TextureId, SubMesh, ImageData},
        render::{
            GraphicsApi, GraphicsError, GlContext, Window,
            ProgramHandle, TextureHandle, VertexArrayHandle,
            mesh::{Vertex, MeshData},
        },
        config::{EngineConfig, WindowConfig, ShaderConfig, ConfigError},
    };
}
