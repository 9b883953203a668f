//! Game systems.
//!
//! This module groups all ECS systems that advance the simulation, read
//! input, and render.
//!
//! Submodules overview
//! - [`animation`] – advance the animation mixer and upload the blended pose
//! - [`assetload`] – poll the character loader and gate systems on readiness
//! - [`compositor`] – z-ordered 2D draw list and parallax scrolling
//! - [`controller`] – move the character and pick facing and clip from input
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`render`] – draw the 3D viewport, the composite and debug overlays using Raylib
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod assetload;
pub mod compositor;
pub mod controller;
pub mod input;
pub mod render;
pub mod time;

use bevy_ecs::prelude::*;

use crate::systems::animation::advance_animation;
use crate::systems::assetload::character_ready;
use crate::systems::controller::character_controller;

/// Add the window-independent part of the frame: advance the animator,
/// then run the controller. Both are skipped until the character is ready.
pub fn add_simulation_systems(schedule: &mut Schedule) {
    schedule.add_systems(
        (advance_animation, character_controller)
            .chain()
            .run_if(character_ready),
    );
}
