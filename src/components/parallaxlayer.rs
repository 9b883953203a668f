//! Tiling background layer that scrolls at a fraction of the character speed.
//!
//! The compositor draws each layer as a repeating texture whose horizontal
//! tile offset is [`ParallaxLayer::offset`]. Shifting the scene by `amount`
//! moves every layer by `amount * ratio`, so the far trees crawl while the
//! near trees keep pace with the character.

use bevy_ecs::prelude::Component;

/// Speed ratio of the far layer.
pub const FAR_RATIO: f32 = 0.25;
/// Speed ratio of the middle layer.
pub const MID_RATIO: f32 = 0.5;
/// Speed ratio of the near layer.
pub const NEAR_RATIO: f32 = 1.0;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct ParallaxLayer {
    /// Texture key in [`crate::resources::texturestore::TextureStore`].
    pub tex_key: String,
    /// Fraction of a scene shift applied to this layer.
    pub ratio: f32,
    /// Current horizontal tile offset in pixels.
    pub offset: f32,
}

impl ParallaxLayer {
    pub fn new(tex_key: impl Into<String>, ratio: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            ratio,
            offset: 0.0,
        }
    }

    pub fn shift(&mut self, amount: f32) {
        self.offset += amount * self.ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_scales_by_ratio() {
        let mut far = ParallaxLayer::new("far", FAR_RATIO);
        let mut mid = ParallaxLayer::new("mid", MID_RATIO);
        let mut near = ParallaxLayer::new("near", NEAR_RATIO);
        for layer in [&mut far, &mut mid, &mut near] {
            layer.shift(2.0);
            layer.shift(2.0);
        }
        assert_eq!(near.offset, 4.0);
        assert_eq!(mid.offset, 2.0);
        assert_eq!(far.offset, 1.0);
    }

    #[test]
    fn shift_keeps_direction() {
        let mut mid = ParallaxLayer::new("mid", MID_RATIO);
        mid.shift(-2.0);
        assert_eq!(mid.offset, -1.0);
    }
}
