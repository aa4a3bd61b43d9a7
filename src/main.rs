use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::FrameClock;
use engine::input::InputManager;
use engine::renderer::Renderer;
use game::{build_catalog, BuiltinMaps, MapId, World};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Relic Quest...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Relic Quest")
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 780))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let catalog = build_catalog(&mut renderer)?;
    let mut world = World::new(Box::new(BuiltinMaps::new()), catalog, MapId::Snow)?;

    let mut input = InputManager::new();
    let mut clock = FrameClock::new();

    info!("World ready, entering the main loop");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                renderer.resize(physical_size);
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Keys released while unfocused never send their key-up
                input.state_mut().reset();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let (dt, now) = clock.begin_frame();
                world.update(input.state(), dt, now);
                input.update();

                if !world.is_running() {
                    info!("Session over in phase {:?}", world.phase());
                    elwt.exit();
                    return;
                }

                if let Err(err) = renderer.render(&world.render_frame()) {
                    error!("Render error: {}", err);
                }
            }
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
