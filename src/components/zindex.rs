//! Z-index component for render ordering.
//!
//! The [`ZIndex`] component fixes the position of an entity in the 2D draw
//! list. Entities with higher z-index values are drawn on top of those with
//! lower values.

use bevy_ecs::prelude::Component;

/// Draw-list slot for the 2D composite.
///
/// Higher values are drawn later (on top). The compositor sorts by `ZIndex`
/// (painter's algorithm).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);

/// Far background layer.
pub const Z_FAR: ZIndex = ZIndex(0);
/// Middle background layer.
pub const Z_MID: ZIndex = ZIndex(1);
/// The 3D viewport (character window).
pub const Z_VIEWPORT: ZIndex = ZIndex(2);
/// Near trees, drawn over the character.
pub const Z_NEAR: ZIndex = ZIndex(3);
