use bevy_ecs::prelude::Component;

/// Position of the character model along the 3D camera axis.
///
/// More negative is farther away from the camera.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Depth {
    pub z: f32,
}

impl Depth {
    pub fn new(z: f32) -> Self {
        Self { z }
    }
}
