//! Scene compositor.
//!
//! The 2D scene is a fixed, z-ordered draw list: far trees, middle trees,
//! the 3D viewport carrying the character, then the near trees on top.
//! This module builds that list from the ECS world and owns the parallax
//! shift; [`crate::systems::render`] turns it into raylib draw calls.

use std::ops::DerefMut;

use bevy_ecs::prelude::*;
use raylib::prelude::{Rectangle, Vector2};

use crate::components::animationmixer::AnimationMixer;
use crate::components::depth::Depth;
use crate::components::facing::Facing;
use crate::components::parallaxlayer::ParallaxLayer;
use crate::components::player::Player;
use crate::components::screenposition::ScreenPosition;
use crate::components::zindex::{Z_NEAR, ZIndex};
use crate::resources::gameconfig::GameConfig;

/// Scroll every parallax layer by `amount` scaled by its ratio.
pub fn shift_parallax<L>(layers: impl IntoIterator<Item = L>, amount: f32)
where
    L: DerefMut<Target = ParallaxLayer>,
{
    for mut layer in layers {
        layer.shift(amount);
    }
}

/// One entry of the 2D draw list.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    /// Tiling background texture scrolled by `offset` pixels.
    Layer { tex_key: String, offset: f32 },
    /// The 3D viewport texture placed at `pos`.
    Viewport { pos: Vector2 },
}

/// Draw list in painter's order (lowest [`ZIndex`] first).
pub fn collect_draw_list(world: &mut World) -> Vec<(ZIndex, DrawItem)> {
    let mut items: Vec<(ZIndex, DrawItem)> = Vec::new();

    let mut layers = world.query::<(&ParallaxLayer, &ZIndex)>();
    for (layer, z) in layers.iter(world) {
        items.push((
            *z,
            DrawItem::Layer {
                tex_key: layer.tex_key.clone(),
                offset: layer.offset,
            },
        ));
    }

    let mut viewports = world.query_filtered::<(&ScreenPosition, &ZIndex), With<Player>>();
    for (pos, z) in viewports.iter(world) {
        items.push((*z, DrawItem::Viewport { pos: pos.pos }));
    }

    items.sort_by_key(|(z, _)| *z);
    items
}

/// Placement of the character model inside the 3D viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterPlacement {
    pub height: f32,
    pub depth: f32,
    /// Rotation about +Y in degrees.
    pub yaw: f32,
}

pub fn character_placement(world: &mut World) -> Option<CharacterPlacement> {
    let (height, angles) = {
        let config = world.get_resource::<GameConfig>()?;
        (config.model_height, config.facing)
    };
    let mut query = world.query_filtered::<(&Depth, &Facing), With<Player>>();
    query
        .iter(world)
        .next()
        .map(|(depth, facing)| CharacterPlacement {
            height,
            depth: depth.z,
            yaw: facing.yaw_degrees(&angles),
        })
}

/// Source rectangle for a tiling background covering `screen_w` x `screen_h`.
///
/// The texture is scaled to the surface height and repeats horizontally;
/// `offset` is in surface pixels and moves the pattern right when positive.
pub fn background_source(
    tex_h: f32,
    offset: f32,
    screen_w: f32,
    screen_h: f32,
) -> Rectangle {
    let scale = if tex_h > 0.0 && screen_h > 0.0 {
        screen_h / tex_h
    } else {
        1.0
    };
    Rectangle {
        x: -offset / scale,
        y: 0.0,
        width: screen_w / scale,
        height: tex_h,
    }
}

/// State shown by the debug overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebugInfo {
    pub position: Vector2,
    pub depth: f32,
    pub facing: Option<Facing>,
    pub clip: Option<String>,
    /// `(clip name, normalised weight)` of every contributing clip.
    pub weights: Vec<(String, f32)>,
    pub near_offset: f32,
}

impl DebugInfo {
    pub fn collect(world: &mut World) -> Self {
        let mut info = DebugInfo::default();

        let mut players = world.query_filtered::<(
            &ScreenPosition,
            &Depth,
            &Facing,
            Option<&AnimationMixer>,
        ), With<Player>>();
        if let Some((pos, depth, facing, mixer)) = players.iter(world).next() {
            info.position = pos.pos;
            info.depth = depth.z;
            info.facing = Some(*facing);
            if let Some(mixer) = mixer {
                info.clip = mixer.active_clip().map(|c| c.name.clone());
                info.weights = mixer
                    .pose_weights()
                    .iter()
                    .map(|w| (mixer.clips()[w.clip].name.clone(), w.weight))
                    .collect();
            }
        }

        let mut layers = world.query::<(&ParallaxLayer, &ZIndex)>();
        if let Some((near, _)) = layers.iter(world).find(|(_, z)| **z == Z_NEAR) {
            info.near_offset = near.offset;
        }
        info
    }

    pub fn lines(&self, fps: u32) -> Vec<String> {
        let weights = self
            .weights
            .iter()
            .map(|(name, w)| format!("{} {:.2}", name, w))
            .collect::<Vec<_>>()
            .join(", ");
        vec![
            format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps),
            format!(
                "Position: ({:.1}, {:.2}) Depth: {:.2}",
                self.position.x, self.position.y, self.depth
            ),
            format!(
                "Facing: {} Clip: {}",
                self.facing.map_or("-".to_string(), |f| format!("{:?}", f)),
                self.clip.as_deref().unwrap_or("-")
            ),
            format!("Weights: [{}]", weights),
            format!("Near offset: {:.1}", self.near_offset),
        ]
    }
}
