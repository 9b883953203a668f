//! Cibus Ninja main entry point.
//!
//! A 2.5D side-scroller scene written in Rust using:
//! - **raylib** for windowing, 3D model loading/skinning and 2D drawing
//! - **bevy_ecs** for entity-component-system architecture
//!
//! An animated ninja walks over three layers of tiling trees. The character
//! is rendered in 3D into an off-screen viewport which is composited between
//! the middle and near backgrounds; when it reaches the edge of the screen
//! the backgrounds scroll with parallax instead.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (parallax layers, facing, animation mixer, etc.)
//! - [`events`] – Event types (character loaded, debug toggle)
//! - [`game`] – Scene setup
//! - [`resources`] – ECS resources (config, input, asset state, render targets, etc.)
//! - [`systems`] – ECS systems (input, controller, animation, rendering)
//!
//! # Main Loop
//!
//! 1. Initialize raylib window, ECS world and resources
//! 2. Load backgrounds, spawn the scene and start the character loader thread
//! 3. Register observers and systems
//! 4. Run the main game loop:
//!    - Poll the character load and keyboard input
//!    - Advance the animator and run the controller once the character is ready
//!    - Render the 3D viewport, the 2D composite and the debug overlay
//! 5. Join the loader thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod game;
mod resources;
mod systems;

use crate::events::character::observe_character_loaded;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::characterasset::{AssetLoad, CharacterAsset};
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::viewport::Viewport3D;
use crate::resources::windowsize::WindowSize;
use crate::resources::worldtime::WorldTime;
use crate::systems::add_simulation_systems;
use crate::systems::animation::{advance_animation, apply_character_pose};
use crate::systems::assetload::{character_pending, character_ready, poll_character_asset};
use crate::systems::controller::character_controller;
use crate::systems::input::update_input_state;
use crate::systems::render::render_frame;
use crate::systems::time::update_world_time;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Cibus Ninja
#[derive(Parser)]
#[command(
    version,
    about = "A 3D ninja walking through a 2D parallax forest. Arrow keys move, F11 toggles debug."
)]
struct Cli {
    /// INI file to read settings from (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start with the debug overlay enabled.
    #[arg(long)]
    debug: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    log::info!("Starting Cibus Ninja");
    // --------------- Configuration ---------------
    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Cibus Ninja");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);

    // --------------- Render targets ---------------
    let render_width = config.render_width;
    let render_height = config.render_height;

    let render_target = match RenderTarget::new(&mut rl, &thread, render_width, render_height) {
        Ok(target) => target,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let viewport = match Viewport3D::new(
        &mut rl,
        &thread,
        render_width,
        render_height,
        config.camera_fovy,
    ) {
        Ok(viewport) => viewport,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    // ScreenSize is the logical composite resolution
    world.insert_resource(ScreenSize {
        w: render_width as i32,
        h: render_height as i32,
    });
    // WindowSize is the actual window dimensions (updated each frame)
    world.insert_resource(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(config);
    world.insert_resource(InputState::default());
    if cli.debug {
        world.insert_resource(DebugMode {});
    }
    world.insert_non_send_resource(render_target);
    world.insert_non_send_resource(viewport);

    if let Err(e) = game::setup(&mut rl, &thread, &mut world) {
        log::error!("Setup failed: {}", e);
        std::process::exit(1);
    }

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(observe_character_loaded));
    world.spawn(Observer::new(switch_debug_observer));
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(
        poll_character_asset
            .run_if(character_pending)
            .before(advance_animation),
    );
    update.add_systems(
        update_input_state
            .after(poll_character_asset)
            .before(character_controller),
    );
    add_simulation_systems(&mut update);
    update.add_systems(
        apply_character_pose
            .after(character_controller)
            .run_if(character_ready),
    );

    if let Err(e) = update.initialize(&mut world) {
        log::error!("Failed to initialize schedule: {}", e);
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        if let AssetLoad::Failed(e) = world.resource::<CharacterAsset>().state.clone() {
            log::error!("Cannot continue without the character: {}", e);
            world.resource_mut::<CharacterAsset>().shutdown();
            std::process::exit(1);
        }

        render_frame(&mut world);

        world.clear_trackers(); // Clear changed components for next frame

        // Update window size each frame (may change due to resize)
        let (new_w, new_h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        {
            let mut window_size = world.resource_mut::<WindowSize>();
            window_size.w = new_w;
            window_size.h = new_h;
        }
    }
    world.resource_mut::<CharacterAsset>().shutdown();
    log::info!("Bye");
}
