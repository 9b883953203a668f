//! Animation systems.
//!
//! - [`advance_animation`] steps every clip of the player's
//!   [`AnimationMixer`] by the frame delta (playback time and fade ramps).
//! - [`apply_character_pose`] turns the mixer's weighted frames into a
//!   skinned pose on the [`CharacterModel`].
//!
//! # Animation Flow
//!
//! 1. The loaded clip list is installed by
//!    [`observe_character_loaded`](crate::events::character::observe_character_loaded)
//! 2. The controller calls [`AnimationMixer::select_animation`], which starts a crossfade
//! 3. `advance_animation` moves clip times and weights forward
//! 4. `apply_character_pose` blends and uploads the bone transforms
//!
//! Both systems are gated on
//! [`character_ready`](crate::systems::assetload::character_ready).

use bevy_ecs::prelude::*;

use crate::components::animationmixer::AnimationMixer;
use crate::components::player::Player;
use crate::resources::charactermodel::CharacterModel;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback by [`WorldTime::delta`].
pub fn advance_animation(
    time: Res<WorldTime>,
    mut query: Query<&mut AnimationMixer, With<Player>>,
) {
    for mut mixer in query.iter_mut() {
        mixer.advance(time.delta);
    }
}

/// Upload the blended pose of the player to the GPU model.
pub fn apply_character_pose(
    query: Query<&AnimationMixer, With<Player>>,
    mut model: NonSendMut<CharacterModel>,
) {
    let Some(mixer) = query.iter().next() else {
        return;
    };
    let weights = mixer.pose_weights();
    if !weights.is_empty() {
        model.apply_pose(&weights);
    }
}
