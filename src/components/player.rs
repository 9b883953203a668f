//! Marker for the player character.
//!
//! The player entity carries the character state ([`ScreenPosition`],
//! [`Depth`], [`Facing`], [`AnimationMixer`]) and doubles as the viewport
//! layer of the draw list.
//!
//! [`ScreenPosition`]: super::screenposition::ScreenPosition
//! [`Depth`]: super::depth::Depth
//! [`Facing`]: super::facing::Facing
//! [`AnimationMixer`]: super::animationmixer::AnimationMixer

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;
