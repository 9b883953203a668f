//! Cibus Ninja library.
//!
//! A 2.5D side-scroller scene: a skinned 3D character rendered into its own
//! viewport and composited between tiling parallax backgrounds. This module
//! exposes the ECS components, resources, systems, and events for use in
//! integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
