//! # Render System
//!
//! Per-frame forward renderer. Once per frame it walks every camera entity,
//! derives that camera's view and projection matrices, and draws every mesh
//! entity against them through the graphics backend. With several cameras
//! each mesh is drawn once per camera.
//!
//! The system owns exactly two linked shader programs (standard and the
//! water variant) and the cached viewport size; all other state it touches
//! belongs to the graphics context.

use crate::assets::AssetRegistry;
use crate::config::ShaderConfig;
use crate::ecs::components::{CameraComponent, MeshComponent, ShaderVariant, TransformComponent};
use crate::ecs::World;
use crate::events::{EngineContext, Event, EventHandler, EventType};
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::api::{GraphicsApi, GraphicsError, ProgramHandle};
use thiserror::Error;

/// Render system errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Shader source file could not be read
    #[error("failed to read shader source {path}: {source}")]
    ShaderSource {
        /// Path that failed to load
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Backend rejected a program
    #[error(transparent)]
    Graphics(#[from] GraphicsError),
}

/// GLSL source text for the renderer's programs
///
/// The water variant reuses the standard fragment stage with its own vertex
/// stage.
pub struct ShaderSources {
    /// Standard vertex stage
    pub vertex: String,
    /// Shared fragment stage
    pub fragment: String,
    /// Water vertex stage
    pub water_vertex: String,
}

impl ShaderSources {
    /// Read all shader sources from the configured paths
    pub fn load(config: &ShaderConfig) -> Result<Self, RenderError> {
        Ok(Self {
            vertex: read_source(&config.vertex_shader_path)?,
            fragment: read_source(&config.fragment_shader_path)?,
            water_vertex: read_source(&config.water_vertex_shader_path)?,
        })
    }
}

fn read_source(path: &str) -> Result<String, RenderError> {
    std::fs::read_to_string(path).map_err(|source| RenderError::ShaderSource {
        path: path.to_string(),
        source,
    })
}

/// Per-frame renderer over camera and mesh entities
pub struct RenderSystem {
    standard_program: ProgramHandle,
    water_program: ProgramHandle,
    viewport: (u32, u32),
}

impl RenderSystem {
    /// Create the render system, reading shader sources from the configured
    /// paths and linking both programs
    ///
    /// Compile or link failure is fatal and propagated.
    pub fn new(gfx: &mut dyn GraphicsApi, config: &ShaderConfig) -> Result<Self, RenderError> {
        let sources = ShaderSources::load(config)?;
        Self::from_sources(gfx, &sources)
    }

    /// Create the render system from in-memory shader sources
    pub fn from_sources(
        gfx: &mut dyn GraphicsApi,
        sources: &ShaderSources,
    ) -> Result<Self, RenderError> {
        let standard_program = gfx.create_program(&sources.vertex, &sources.fragment)?;
        let water_program = gfx.create_program(&sources.water_vertex, &sources.fragment)?;
        log::info!(
            "Render system ready (standard {:?}, water {:?})",
            standard_program,
            water_program
        );

        Ok(Self {
            standard_program,
            water_program,
            viewport: (1, 1),
        })
    }

    /// Cached viewport dimensions
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Store new framebuffer dimensions and update the viewport region
    pub fn on_resize(&mut self, gfx: &mut dyn GraphicsApi, width: u32, height: u32) {
        self.viewport = (width, height);
        gfx.set_viewport(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    /// Render one frame
    ///
    /// Mesh entities without a Transform draw with the identity model
    /// matrix. Mesh keys the registry cannot resolve skip that entity;
    /// unresolvable texture keys skip only the texture bind.
    pub fn update(
        &mut self,
        gfx: &mut dyn GraphicsApi,
        assets: &AssetRegistry,
        world: &World,
        _delta_time: f32,
    ) {
        gfx.use_program(self.standard_program);

        for camera_entity in world.entities_with::<(CameraComponent, TransformComponent)>() {
            let Some(camera) = world.get_component::<CameraComponent>(camera_entity) else {
                continue;
            };
            let Some(camera_transform) =
                world.get_component::<TransformComponent>(camera_entity)
            else {
                continue;
            };

            let view = view_matrix(camera, camera_transform);
            let (width, height) = self.viewport;
            let proj = projection_matrix(camera, width, height);

            for mesh_entity in world.entities_with::<(MeshComponent,)>() {
                let Some(mesh) = world.get_component::<MeshComponent>(mesh_entity) else {
                    continue;
                };
                let Some(sub_meshes) = assets.mesh_handles(mesh.mesh) else {
                    log::warn!(
                        "Entity {:?} references unknown mesh {:?}, skipping",
                        mesh_entity,
                        mesh.mesh
                    );
                    continue;
                };

                let program = match mesh.shader {
                    ShaderVariant::Water => self.water_program,
                    ShaderVariant::Standard => self.standard_program,
                };
                gfx.use_program(program);

                if mesh.shader == ShaderVariant::Water {
                    let time = gfx.elapsed_seconds();
                    gfx.set_uniform_f32(program, "time", time);
                }

                gfx.set_uniform_mat4(program, "view", &view);
                gfx.set_uniform_mat4(program, "proj", &proj);

                if let Some(texture_id) = mesh.texture {
                    if let Some(texture) = assets.texture_handle(texture_id) {
                        gfx.bind_texture(0, texture);
                        gfx.set_uniform_i32(program, "albedoTexture", 0);
                    }
                }

                let model = world
                    .get_component::<TransformComponent>(mesh_entity)
                    .map(model_matrix)
                    .unwrap_or_else(Mat4::identity);
                gfx.set_uniform_mat4(program, "model", &model);

                for sub_mesh in sub_meshes {
                    gfx.bind_vertex_array(sub_mesh.vertex_array);
                    gfx.draw_indexed(sub_mesh.index_count);
                }
            }
        }
    }
}

impl EventHandler for RenderSystem {
    fn interests(&self) -> &'static [EventType] {
        &[EventType::WindowResized, EventType::FrameUpdate]
    }

    fn on_event(&mut self, ctx: &mut EngineContext<'_>, event: &Event) -> bool {
        match event.event_type {
            EventType::WindowResized => {
                if let Some((width, height)) = event.get_size() {
                    self.on_resize(ctx.gfx, width, height);
                }
            }
            EventType::FrameUpdate => {
                if let Some(delta_time) = event.get_delta_time() {
                    self.update(ctx.gfx, ctx.assets, ctx.world, delta_time);
                }
            }
        }
        false
    }
}

/// Orbit view matrix: pull back by the camera distance, apply pitch then
/// yaw, then translate by the negated camera position
fn view_matrix(camera: &CameraComponent, transform: &TransformComponent) -> Mat4 {
    Mat4::new_translation(&Vec3::new(0.0, 0.0, -camera.distance))
        * Mat4::rotation_x(transform.pitch)
        * Mat4::rotation_y(transform.yaw)
        * Mat4::new_translation(&(-transform.position))
}

/// Perspective projection from the camera parameters and viewport size
fn projection_matrix(camera: &CameraComponent, width: u32, height: u32) -> Mat4 {
    let aspect = width as f32 / height as f32;
    Mat4::perspective_gl(camera.fov, aspect, camera.near, camera.far)
}

/// Model matrix: translate, rotate by yaw only, scale
fn model_matrix(transform: &TransformComponent) -> Mat4 {
    Mat4::new_translation(&transform.position)
        * Mat4::rotation_y(transform.yaw)
        * Mat4::scaling(&transform.scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageData;
    use crate::ecs::Entity;
    use crate::foundation::math::utils::deg_to_rad;
    use crate::render::mesh::MeshData;
    use crate::render::test_support::{GraphicsCall, RecordingGraphics};
    use approx::assert_relative_eq;

    fn test_sources() -> ShaderSources {
        ShaderSources {
            vertex: "vertex".to_string(),
            fragment: "fragment".to_string(),
            water_vertex: "water vertex".to_string(),
        }
    }

    fn add_camera(world: &mut World, distance: f32) -> Entity {
        let entity = world.create_entity();
        world.add_component(entity, CameraComponent::with_distance(distance));
        world.add_component(entity, TransformComponent::identity());
        entity
    }

    fn uploaded_cube(gfx: &mut RecordingGraphics, registry: &mut AssetRegistry) -> crate::assets::MeshId {
        registry.upload_mesh(gfx, &MeshData::cube(1.0)).unwrap()
    }

    #[test]
    fn test_view_matrix_is_translation_for_neutral_camera() {
        let camera = CameraComponent::with_distance(5.0);
        let transform = TransformComponent::identity();

        let view = view_matrix(&camera, &transform);
        let expected = Mat4::new_translation(&Vec3::new(0.0, 0.0, -5.0));
        assert_relative_eq!(view, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_view_matrix_composition_order() {
        let camera = CameraComponent::with_distance(3.0);
        let transform = TransformComponent::from_position(Vec3::new(1.0, -2.0, 4.0))
            .with_pitch(0.3)
            .with_yaw(1.2);

        let view = view_matrix(&camera, &transform);
        let expected = Mat4::new_translation(&Vec3::new(0.0, 0.0, -3.0))
            * Mat4::rotation_x(0.3)
            * Mat4::rotation_y(1.2)
            * Mat4::new_translation(&Vec3::new(-1.0, 2.0, -4.0));
        assert_relative_eq!(view, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_projection_matrix_uses_viewport_aspect() {
        let camera = CameraComponent::new(5.0, deg_to_rad(45.0), 0.1, 100.0);
        let proj = projection_matrix(&camera, 800, 600);

        let f = 1.0 / (camera.fov * 0.5).tan();
        let aspect = 800.0 / 600.0;
        assert_relative_eq!(proj[(0, 0)], f / aspect, epsilon = 1e-6);
        assert_relative_eq!(proj[(1, 1)], f, epsilon = 1e-6);
        assert_relative_eq!(proj[(3, 2)], -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_model_matrix_ignores_pitch() {
        let base = TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0))
            .with_yaw(deg_to_rad(90.0))
            .with_uniform_scale(2.0);
        let pitched = base.clone().with_pitch(1.1);

        let expected = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0))
            * Mat4::rotation_y(deg_to_rad(90.0))
            * Mat4::scaling(&Vec3::new(2.0, 2.0, 2.0));

        assert_relative_eq!(model_matrix(&base), expected, epsilon = 1e-6);
        assert_relative_eq!(model_matrix(&pitched), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_update_activates_standard_program_first() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        let world = World::new();
        let assets = AssetRegistry::new();

        gfx.calls.clear();
        renderer.update(&mut gfx, &assets, &world, 0.016);

        assert_eq!(
            gfx.calls.first(),
            Some(&GraphicsCall::UseProgram(renderer.standard_program))
        );
    }

    #[test]
    fn test_untextured_mesh_never_binds_texture() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        let mut world = World::new();
        let mut assets = AssetRegistry::new();

        add_camera(&mut world, 5.0);
        let mesh_id = uploaded_cube(&mut gfx, &mut assets);
        let entity = world.create_entity();
        world.add_component(entity, MeshComponent::new(mesh_id));

        gfx.calls.clear();
        renderer.update(&mut gfx, &assets, &world, 0.016);

        assert_eq!(
            gfx.count(|call| matches!(call, GraphicsCall::BindTexture { .. })),
            0
        );
        assert_eq!(gfx.count(|call| matches!(call, GraphicsCall::DrawIndexed(_))), 1);
    }

    #[test]
    fn test_textured_mesh_binds_resolved_handle_once() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        let mut world = World::new();
        let mut assets = AssetRegistry::new();

        add_camera(&mut world, 5.0);
        let mesh_id = uploaded_cube(&mut gfx, &mut assets);
        let texture_id = assets
            .upload_texture(&mut gfx, &ImageData::solid_color(2, 2, [255, 255, 255, 255]))
            .unwrap();
        let expected_handle = assets.texture_handle(texture_id).unwrap();

        let entity = world.create_entity();
        world.add_component(
            entity,
            MeshComponent::new(mesh_id).with_texture(texture_id),
        );

        gfx.calls.clear();
        renderer.update(&mut gfx, &assets, &world, 0.016);

        let binds: Vec<_> = gfx
            .calls
            .iter()
            .filter_map(|call| match call {
                GraphicsCall::BindTexture { unit, texture } => Some((*unit, *texture)),
                _ => None,
            })
            .collect();
        assert_eq!(binds, vec![(0, expected_handle)]);

        // The sampler uniform points the bound unit.
        assert_eq!(
            gfx.count(|call| matches!(
                call,
                GraphicsCall::SetUniformI32 { name, value: 0, .. } if name == "albedoTexture"
            )),
            1
        );
    }

    #[test]
    fn test_water_mesh_uses_water_program_and_sets_time_once() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        let mut world = World::new();
        let mut assets = AssetRegistry::new();

        add_camera(&mut world, 5.0);
        let mesh_id = uploaded_cube(&mut gfx, &mut assets);
        let entity = world.create_entity();
        world.add_component(
            entity,
            MeshComponent::new(mesh_id).with_shader(ShaderVariant::Water),
        );

        gfx.time = 12.5;
        gfx.calls.clear();
        renderer.update(&mut gfx, &assets, &world, 0.016);

        assert!(gfx
            .calls
            .contains(&GraphicsCall::UseProgram(renderer.water_program)));

        let time_sets: Vec<_> = gfx
            .calls
            .iter()
            .filter_map(|call| match call {
                GraphicsCall::SetUniformF32 {
                    program,
                    name,
                    value,
                } if name == "time" => Some((*program, *value)),
                _ => None,
            })
            .collect();
        assert_eq!(time_sets, vec![(renderer.water_program, 12.5)]);
    }

    #[test]
    fn test_standard_mesh_never_sets_time() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        let mut world = World::new();
        let mut assets = AssetRegistry::new();

        add_camera(&mut world, 5.0);
        let mesh_id = uploaded_cube(&mut gfx, &mut assets);
        let entity = world.create_entity();
        world.add_component(entity, MeshComponent::new(mesh_id));

        gfx.calls.clear();
        renderer.update(&mut gfx, &assets, &world, 0.016);

        assert_eq!(
            gfx.count(|call| matches!(
                call,
                GraphicsCall::SetUniformF32 { name, .. } if name == "time"
            )),
            0
        );
    }

    #[test]
    fn test_mesh_without_transform_uses_identity_model() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        let mut world = World::new();
        let mut assets = AssetRegistry::new();

        add_camera(&mut world, 5.0);
        let mesh_id = uploaded_cube(&mut gfx, &mut assets);
        let entity = world.create_entity();
        world.add_component(entity, MeshComponent::new(mesh_id));

        gfx.calls.clear();
        renderer.update(&mut gfx, &assets, &world, 0.016);

        let model = gfx
            .calls
            .iter()
            .find_map(|call| match call {
                GraphicsCall::SetUniformMat4 { name, value, .. } if name == "model" => {
                    Some(*value)
                }
                _ => None,
            })
            .unwrap();
        assert_relative_eq!(model, Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn test_resize_updates_viewport_and_issues_single_call() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        assert_eq!(renderer.viewport(), (1, 1));

        gfx.calls.clear();
        renderer.on_resize(&mut gfx, 1024, 768);

        assert_eq!(renderer.viewport(), (1024, 768));
        assert_eq!(
            gfx.calls,
            vec![GraphicsCall::SetViewport {
                width: 1024,
                height: 768
            }]
        );
    }

    #[test]
    fn test_meshes_render_once_per_camera() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        let mut world = World::new();
        let mut assets = AssetRegistry::new();

        add_camera(&mut world, 5.0);
        add_camera(&mut world, 8.0);
        let mesh_id = uploaded_cube(&mut gfx, &mut assets);
        let entity = world.create_entity();
        world.add_component(entity, MeshComponent::new(mesh_id));

        gfx.calls.clear();
        renderer.update(&mut gfx, &assets, &world, 0.016);

        assert_eq!(gfx.count(|call| matches!(call, GraphicsCall::DrawIndexed(_))), 2);
    }

    #[test]
    fn test_camera_without_transform_is_not_iterated() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        let mut world = World::new();
        let mut assets = AssetRegistry::new();

        // Camera entity lacking a Transform does not qualify.
        let camera_entity = world.create_entity();
        world.add_component(camera_entity, CameraComponent::default());

        let mesh_id = uploaded_cube(&mut gfx, &mut assets);
        let entity = world.create_entity();
        world.add_component(entity, MeshComponent::new(mesh_id));

        gfx.calls.clear();
        renderer.update(&mut gfx, &assets, &world, 0.016);

        assert_eq!(gfx.count(|call| matches!(call, GraphicsCall::DrawIndexed(_))), 0);
    }

    #[test]
    fn test_unresolved_mesh_key_skips_entity() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        let mut world = World::new();
        let assets = AssetRegistry::new();

        add_camera(&mut world, 5.0);

        // Key minted by a registry the renderer never sees.
        let mut other_gfx = RecordingGraphics::new();
        let mut other_registry = AssetRegistry::new();
        let stale_id = uploaded_cube(&mut other_gfx, &mut other_registry);

        let entity = world.create_entity();
        world.add_component(entity, MeshComponent::new(stale_id));

        gfx.calls.clear();
        renderer.update(&mut gfx, &assets, &world, 0.016);

        assert_eq!(gfx.count(|call| matches!(call, GraphicsCall::DrawIndexed(_))), 0);
    }

    #[test]
    fn test_sub_draws_bound_and_drawn_in_order() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        let mut world = World::new();
        let mut assets = AssetRegistry::new();

        add_camera(&mut world, 5.0);
        let parts = [MeshData::cube(1.0), MeshData::plane(1.0, 1)];
        let mesh_id = assets.upload_mesh_parts(&mut gfx, &parts).unwrap();
        let sub_meshes: Vec<_> = assets.mesh_handles(mesh_id).unwrap().to_vec();

        let entity = world.create_entity();
        world.add_component(entity, MeshComponent::new(mesh_id));

        gfx.calls.clear();
        renderer.update(&mut gfx, &assets, &world, 0.016);

        let draws: Vec<_> = gfx
            .calls
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    GraphicsCall::BindVertexArray(_) | GraphicsCall::DrawIndexed(_)
                )
            })
            .cloned()
            .collect();
        assert_eq!(
            draws,
            vec![
                GraphicsCall::BindVertexArray(sub_meshes[0].vertex_array),
                GraphicsCall::DrawIndexed(sub_meshes[0].index_count),
                GraphicsCall::BindVertexArray(sub_meshes[1].vertex_array),
                GraphicsCall::DrawIndexed(sub_meshes[1].index_count),
            ]
        );
    }

    #[test]
    fn test_event_handler_routes_lifecycle_events() {
        let mut gfx = RecordingGraphics::new();
        let mut renderer = RenderSystem::from_sources(&mut gfx, &test_sources()).unwrap();
        let mut world = World::new();
        let mut assets = AssetRegistry::new();

        add_camera(&mut world, 5.0);
        let mesh_id = uploaded_cube(&mut gfx, &mut assets);
        let entity = world.create_entity();
        world.add_component(entity, MeshComponent::new(mesh_id));

        gfx.calls.clear();
        {
            let mut ctx = EngineContext {
                world: &mut world,
                gfx: &mut gfx,
                assets: &assets,
            };
            let consumed =
                renderer.on_event(&mut ctx, &Event::window_resized(320, 240, 0.0));
            assert!(!consumed);
            renderer.on_event(&mut ctx, &Event::frame_update(0.016, 0.0));
        }

        assert_eq!(renderer.viewport(), (320, 240));
        assert_eq!(
            gfx.count(|call| matches!(call, GraphicsCall::SetViewport { .. })),
            1
        );
        assert_eq!(gfx.count(|call| matches!(call, GraphicsCall::DrawIndexed(_))), 1);
    }
}
