//! Discrete facing of the character model.

use bevy_ecs::prelude::Component;

use crate::resources::gameconfig::FacingAngles;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    Right,
    /// Towards the camera.
    #[default]
    Front,
    /// Away from the camera.
    Back,
}

impl Facing {
    /// Yaw around +Y, in degrees, for this facing.
    pub fn yaw_degrees(self, angles: &FacingAngles) -> f32 {
        match self {
            Facing::Left => angles.left,
            Facing::Right => angles.right,
            Facing::Front => angles.front,
            Facing::Back => angles.back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_follows_configured_angles() {
        let angles = FacingAngles {
            left: -80.0,
            right: 80.0,
            front: 10.0,
            back: 190.0,
        };
        assert_eq!(Facing::Left.yaw_degrees(&angles), -80.0);
        assert_eq!(Facing::Right.yaw_degrees(&angles), 80.0);
        assert_eq!(Facing::Front.yaw_degrees(&angles), 10.0);
        assert_eq!(Facing::Back.yaw_degrees(&angles), 190.0);
        assert_eq!(Facing::default(), Facing::Front);
    }
}
