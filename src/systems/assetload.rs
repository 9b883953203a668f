//! Character asset polling and the readiness run condition.
//!
//! [`poll_character_asset`] checks the loader channel once per frame. When
//! the manifest arrives the GPU model is loaded on the main thread and a
//! [`CharacterLoadedEvent`] is triggered; the observer settles the asset.
//! Systems that need the character use [`character_ready`] as their run
//! condition so they are skipped while loading.
use bevy_ecs::prelude::*;
use log::{error, info};

use crate::events::character::CharacterLoadedEvent;
use crate::resources::characterasset::{AssetMessage, CharacterAsset};
use crate::resources::charactermodel::CharacterModel;

/// Run condition: true once the character asset is `Ready`.
pub fn character_ready(asset: Option<Res<CharacterAsset>>) -> bool {
    asset.is_some_and(|a| a.is_ready())
}

/// Run condition: true while the loader has not reported yet. Gates
/// [`poll_character_asset`] so the channel is left alone once settled.
pub fn character_pending(asset: Option<Res<CharacterAsset>>) -> bool {
    asset.is_some_and(|a| a.is_pending())
}

/// Receive the loader's result and finish the load on the main thread.
pub fn poll_character_asset(
    mut asset: ResMut<CharacterAsset>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut model: NonSendMut<CharacterModel>,
    mut commands: Commands,
) {
    let Some(message) = asset.poll() else {
        return;
    };
    match message {
        AssetMessage::Parsed { path, manifest } => {
            info!(
                "Parsed {:?}: scene {:?}, {} node(s), roots {:?}",
                path,
                manifest.scene_name.as_deref().unwrap_or("<unnamed>"),
                manifest.node_count,
                manifest.root_nodes
            );
            match CharacterModel::load(&mut rl, &th, &path) {
                Ok(loaded) => {
                    *model = loaded;
                    commands.trigger(CharacterLoadedEvent {
                        clips: model.clip_infos(&manifest.animation_names),
                    });
                }
                Err(e) => {
                    error!("{}", e);
                    asset.mark_failed(e);
                }
            }
        }
        AssetMessage::Failed(e) => {
            error!("Character asset failed to load: {}", e);
            asset.mark_failed(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::system::RunSystemOnce;
    use crossbeam_channel::unbounded;

    #[test]
    fn readiness_follows_asset_state() {
        let mut world = World::new();
        assert!(!world.run_system_once(character_ready).unwrap());

        let (_tx, rx) = unbounded();
        world.insert_resource(CharacterAsset::from_receiver("ninja.glb", rx));
        assert!(!world.run_system_once(character_ready).unwrap());
        assert!(world.run_system_once(character_pending).unwrap());

        world.resource_mut::<CharacterAsset>().mark_ready();
        assert!(world.run_system_once(character_ready).unwrap());
        assert!(!world.run_system_once(character_pending).unwrap());
    }

    #[test]
    fn failed_load_stops_polling() {
        let mut world = World::new();
        let (_tx, rx) = unbounded();
        world.insert_resource(CharacterAsset::from_receiver("ninja.glb", rx));
        world.resource_mut::<CharacterAsset>().mark_failed("bad model");
        assert!(!world.run_system_once(character_pending).unwrap());
        assert!(!world.run_system_once(character_ready).unwrap());
    }
}
