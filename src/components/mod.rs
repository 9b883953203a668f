//! ECS components for entities.
//!
//! The scene is a handful of entities: three parallax background layers and
//! the player, whose entity also stands for the 3D viewport in the draw list.
//!
//! Submodules overview:
//! - [`animationmixer`] – skeletal clip playback with crossfades
//! - [`depth`] – distance of the character model from the 3D camera
//! - [`facing`] – discrete facing of the character model
//! - [`parallaxlayer`] – tiling background scrolled at a fraction of the scene shift
//! - [`player`] – marker for the controlled character
//! - [`screenposition`] – screen-space offset of the 3D viewport
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animationmixer;
pub mod depth;
pub mod facing;
pub mod parallaxlayer;
pub mod player;
pub mod screenposition;
pub mod zindex;
