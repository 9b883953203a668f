//! Scene setup.
//!
//! Loads the three background textures, spawns the draw list (three
//! parallax layers plus the player entity carrying the 3D viewport) and
//! starts loading the character model in the background.

use std::path::Path;

use bevy_ecs::prelude::*;
use log::info;
use raylib::ffi;
use raylib::prelude::*;

use crate::components::animationmixer::AnimationMixer;
use crate::components::depth::Depth;
use crate::components::facing::Facing;
use crate::components::parallaxlayer::{FAR_RATIO, MID_RATIO, NEAR_RATIO, ParallaxLayer};
use crate::components::player::Player;
use crate::components::screenposition::ScreenPosition;
use crate::components::zindex::{Z_FAR, Z_MID, Z_NEAR, Z_VIEWPORT};
use crate::resources::characterasset::CharacterAsset;
use crate::resources::charactermodel::CharacterModel;
use crate::resources::gameconfig::GameConfig;
use crate::resources::texturestore::TextureStore;

pub const FAR_KEY: &str = "far";
pub const MID_KEY: &str = "mid";
pub const NEAR_KEY: &str = "near";

/// Load a background image as a horizontally repeating texture.
fn load_tiling_texture(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    path: &Path,
) -> Result<Texture2D, String> {
    let texture = rl
        .load_texture(th, &path.to_string_lossy())
        .map_err(|e| format!("Failed to load background {:?}: {}", path, e))?;
    unsafe {
        ffi::SetTextureWrap(*texture, ffi::TextureWrap::TEXTURE_WRAP_REPEAT as i32);
    }
    info!(
        "Loaded background {:?} ({}x{})",
        path, texture.width, texture.height
    );
    Ok(texture)
}

/// Spawn the parallax layers and the player. Returns the player entity.
pub fn spawn_scene(world: &mut World, config: &GameConfig) -> Entity {
    world.spawn((ParallaxLayer::new(FAR_KEY, FAR_RATIO), Z_FAR));
    world.spawn((ParallaxLayer::new(MID_KEY, MID_RATIO), Z_MID));
    world.spawn((ParallaxLayer::new(NEAR_KEY, NEAR_RATIO), Z_NEAR));
    world
        .spawn((
            Player,
            ScreenPosition::new(0.0, 0.0),
            Depth::new(config.model_depth),
            Facing::Front,
            AnimationMixer::new(config.animation.fade_seconds),
            Z_VIEWPORT,
        ))
        .id()
}

/// Load the backgrounds, build the scene and begin the character load.
///
/// Requires [`GameConfig`] to be present in `world`.
pub fn setup(rl: &mut RaylibHandle, th: &RaylibThread, world: &mut World) -> Result<(), String> {
    let config = world
        .get_resource::<GameConfig>()
        .cloned()
        .ok_or_else(|| "GameConfig resource missing".to_string())?;

    let mut textures = TextureStore::new();
    for (key, path) in [
        (FAR_KEY, &config.far_layer),
        (MID_KEY, &config.mid_layer),
        (NEAR_KEY, &config.near_layer),
    ] {
        textures.insert(key, load_tiling_texture(rl, th, path)?);
    }
    world.insert_resource(textures);

    let player = spawn_scene(world, &config);
    info!("Scene spawned, player entity {:?}", player);

    world.insert_non_send_resource(CharacterModel::default());
    world.insert_resource(CharacterAsset::begin_load(&config.model_path));
    Ok(())
}
