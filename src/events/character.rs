//! Character readiness event and observer.
//!
//! Once the model is on the GPU,
//! [`poll_character_asset`](crate::systems::assetload::poll_character_asset)
//! triggers a [`CharacterLoadedEvent`] carrying the clip list. The observer
//! fills the player's [`AnimationMixer`], starts the initial clip and moves
//! the [`CharacterAsset`] to `Ready`, which unblocks every system gated on
//! [`character_ready`](crate::systems::assetload::character_ready).
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::animationmixer::{AnimationMixer, ClipInfo, GLTF_FRAME_RATE};
use crate::components::player::Player;
use crate::resources::characterasset::CharacterAsset;
use crate::resources::gameconfig::GameConfig;

/// The character model finished loading; `clips` are in load order.
#[derive(Event, Debug, Clone)]
pub struct CharacterLoadedEvent {
    pub clips: Vec<ClipInfo>,
}

/// Check that every clip the controller selects exists.
pub fn validate_clips(clips: &[ClipInfo], config: &GameConfig) -> Result<(), String> {
    if clips.is_empty() {
        return Err("Character model has no animation clips".to_string());
    }
    for (role, index) in [
        ("idle", config.animation.idle_clip),
        ("walk", config.animation.walk_clip),
    ] {
        if index >= clips.len() {
            return Err(format!(
                "{} clip index {} out of range: model has {} clip(s)",
                role,
                index,
                clips.len()
            ));
        }
    }
    Ok(())
}

/// Observer that installs the loaded clips and marks the character ready.
///
/// The initial clip is the last one of the set. A clip set that does not
/// contain the configured idle/walk clips fails the load.
pub fn observe_character_loaded(
    trigger: On<CharacterLoadedEvent>,
    config: Res<GameConfig>,
    mut asset: ResMut<CharacterAsset>,
    mut players: Query<&mut AnimationMixer, With<Player>>,
) {
    let clips = &trigger.event().clips;
    if !asset.is_pending() {
        error!("Character loaded twice; ignoring {} clip(s)", clips.len());
        return;
    }
    if let Err(e) = validate_clips(clips, &config) {
        error!("{}", e);
        asset.mark_failed(e);
        return;
    }

    let initial = clips.len() - 1;
    for mut mixer in players.iter_mut() {
        mixer.load_clips(clips, GLTF_FRAME_RATE);
        mixer.play_initial(initial);
    }
    for (i, clip) in clips.iter().enumerate() {
        info!("  clip {}: '{}' ({} frames)", i, clip.name, clip.frame_count);
    }
    info!(
        "Character ready with {} clip(s), playing '{}'",
        clips.len(),
        clips[initial].name
    );
    asset.mark_ready();
}
