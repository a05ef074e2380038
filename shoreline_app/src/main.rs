//! Shoreline demo application
//!
//! Renders a small island scene with the engine: a textured terrain block
//! and an animated water plane, viewed through an orbit camera.

use reef_engine::foundation::math::utils::deg_to_rad;
use reef_engine::foundation::math::Vec3;
use reef_engine::prelude::*;

struct ShorelineApp {
    window: Window,
    gfx: GlContext,
    world: World,
    assets: AssetRegistry,
    events: EventSystem,
    timer: Timer,
}

impl ShorelineApp {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = EngineConfig::default();
        config.shaders.validate()?;

        log::info!("Creating window...");
        let mut window = Window::new(
            &config.window.title,
            config.window.width,
            config.window.height,
        )?;

        log::info!("Creating OpenGL context...");
        let mut gfx = GlContext::new(&mut window);

        log::info!("Linking shader programs...");
        let renderer = RenderSystem::new(&mut gfx, &config.shaders)?;

        let mut events = EventSystem::new();
        events.register_handler(Box::new(renderer));

        let mut world = World::new();
        let mut assets = AssetRegistry::new();
        populate_scene(&mut world, &mut assets, &mut gfx)?;

        // GLFW reports no resize for the initial framebuffer, so seed the
        // viewport explicitly.
        let (width, height) = window.get_framebuffer_size();
        events.send(Event::window_resized(width, height, 0.0));

        Ok(Self {
            window,
            gfx,
            world,
            assets,
            events,
            timer: Timer::new(),
        })
    }

    fn run(&mut self) {
        log::info!("Entering frame loop");

        while !self.window.should_close() {
            self.window.poll_events();

            let window_events: Vec<glfw::WindowEvent> =
                self.window.flush_events().map(|(_, event)| event).collect();
            for event in window_events {
                match event {
                    glfw::WindowEvent::FramebufferSize(width, height) => {
                        self.events.send(Event::window_resized(
                            width as u32,
                            height as u32,
                            self.window.time(),
                        ));
                    }
                    glfw::WindowEvent::Key(glfw::Key::Escape, _, glfw::Action::Press, _)
                    | glfw::WindowEvent::Close => {
                        self.window.set_should_close(true);
                    }
                    _ => {}
                }
            }

            self.timer.update();
            let now = self.window.time();
            self.events.update_time(now);
            self.events
                .send(Event::frame_update(self.timer.delta_time(), now));

            self.gfx.clear(0.05, 0.12, 0.2, 1.0);
            let mut ctx = EngineContext {
                world: &mut self.world,
                gfx: &mut self.gfx,
                assets: &self.assets,
            };
            self.events.dispatch(&mut ctx);

            self.window.swap_buffers();
        }

        log::info!(
            "Frame loop ended after {} frames ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
    }
}

fn populate_scene(
    world: &mut World,
    assets: &mut AssetRegistry,
    gfx: &mut GlContext,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Uploading scene assets...");

    let terrain_mesh = assets.upload_mesh(gfx, &MeshData::cube(2.0))?;
    let sand = assets.upload_texture(
        gfx,
        &ImageData::checkerboard(64, 64, 8, [214, 189, 150, 255], [186, 160, 122, 255]),
    )?;
    let terrain = world.create_entity();
    world.add_component(
        terrain,
        MeshComponent::new(terrain_mesh)
            .with_texture(sand)
            .with_color(0.84, 0.74, 0.59),
    );
    world.add_component(
        terrain,
        TransformComponent::from_position(Vec3::new(0.0, -1.6, 0.0))
            .with_scale(Vec3::new(2.0, 0.4, 2.0)),
    );

    let water_mesh = assets.upload_mesh(gfx, &MeshData::plane(12.0, 48))?;
    let water_color = assets.upload_texture(
        gfx,
        &ImageData::solid_color(4, 4, [40, 110, 180, 255]),
    )?;
    let water = world.create_entity();
    world.add_component(
        water,
        MeshComponent::new(water_mesh)
            .with_shader(ShaderVariant::Water)
            .with_texture(water_color)
            .with_color(0.16, 0.43, 0.71),
    );
    world.add_component(
        water,
        TransformComponent::from_position(Vec3::new(0.0, -0.6, 0.0)),
    );

    let camera = world.create_entity();
    world.add_component(camera, CameraComponent::new(14.0, deg_to_rad(45.0), 0.1, 200.0));
    world.add_component(
        camera,
        TransformComponent::identity()
            .with_pitch(deg_to_rad(25.0))
            .with_yaw(deg_to_rad(30.0)),
    );

    log::info!(
        "Scene ready: {} meshes, {} textures",
        assets.mesh_count(),
        assets.texture_count()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let mut app = match ShorelineApp::new() {
        Ok(app) => app,
        Err(error) => {
            log::error!("Initialization failed: {}", error);
            std::process::exit(1);
        }
    };

    app.run();
}
