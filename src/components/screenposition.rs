//! Screen-space position component.
//!
//! The [`ScreenPosition`] component stores where the 3D viewport layer is
//! drawn inside the 2D composite, relative to its resting place. Moving the
//! character left/right/up/down on screen means moving this layer.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Screen-space offset of the viewport layer, in logical pixels.
#[derive(Component, Clone, Copy, Debug)]
pub struct ScreenPosition {
    /// 2D coordinates in screen pixels.
    pub pos: Vector2,
}

impl Default for ScreenPosition {
    fn default() -> Self {
        Self {
            pos: Vector2 { x: 0.0, y: 0.0 },
        }
    }
}

impl ScreenPosition {
    /// Create a ScreenPosition from x and y.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    /// X coordinate.
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f32 {
        self.pos.y
    }
}
