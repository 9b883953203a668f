//! Logical screen size resource.
//!
//! Stores the dimensions of the 2D composite in pixels. Rendering reads
//! this; the window itself may be larger (see
//! [`WindowSize`](super::windowsize::WindowSize)).

use bevy_ecs::prelude::Resource;

/// Logical screen size in pixels.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
