//! Asynchronous loading of the character asset.
//!
//! [`CharacterAsset::begin_load`] spawns a loader thread that reads and
//! inspects the model file off the frame loop and sends exactly one
//! [`AssetMessage`] back over a channel. The frame loop polls the channel
//! without blocking (see
//! [`poll_character_asset`](crate::systems::assetload::poll_character_asset)),
//! finishes the GPU side on the main thread and moves [`AssetLoad`] from
//! `Pending` to `Ready` or `Failed`. Call [`CharacterAsset::shutdown`] during
//! teardown to join the thread.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, TryRecvError, bounded};
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::gltfmanifest::GltfManifest;

/// Lifecycle of the character asset.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssetLoad {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

/// Result reported by the loader thread.
#[derive(Debug, Clone)]
pub enum AssetMessage {
    Parsed {
        path: PathBuf,
        manifest: GltfManifest,
    },
    Failed(String),
}

/// Load state of the character model plus the channel to its loader thread.
#[derive(Resource)]
pub struct CharacterAsset {
    pub state: AssetLoad,
    pub path: PathBuf,
    rx: Option<Receiver<AssetMessage>>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl CharacterAsset {
    /// Spawn the loader thread for `path` and return the pending asset.
    pub fn begin_load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = bounded::<AssetMessage>(1);
        let thread_path = path.clone();

        info!("Loading character asset {:?}", path);
        let handle = std::thread::spawn(move || {
            let message = match GltfManifest::read(&thread_path) {
                Ok(manifest) => AssetMessage::Parsed {
                    path: thread_path,
                    manifest,
                },
                Err(e) => AssetMessage::Failed(e),
            };
            // The receiver is gone only when the game already shut down.
            let _ = tx.send(message);
        });

        Self {
            state: AssetLoad::Pending,
            path,
            rx: Some(rx),
            handle: Some(handle),
        }
    }

    /// Pending asset fed by an existing channel instead of a loader thread.
    pub fn from_receiver(path: impl Into<PathBuf>, rx: Receiver<AssetMessage>) -> Self {
        Self {
            state: AssetLoad::Pending,
            path: path.into(),
            rx: Some(rx),
            handle: None,
        }
    }

    /// Take the loader's result if it has arrived.
    ///
    /// Yields at most one message; afterwards the channel is dropped. A loader
    /// that hangs up without reporting counts as a failure.
    pub fn poll(&mut self) -> Option<AssetMessage> {
        let rx = self.rx.as_ref()?;
        let message = match rx.try_recv() {
            Ok(message) => message,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                AssetMessage::Failed("Asset loader exited without a result".to_string())
            }
        };
        self.rx = None;
        Some(message)
    }

    pub fn is_ready(&self) -> bool {
        self.state == AssetLoad::Ready
    }

    pub fn is_pending(&self) -> bool {
        self.state == AssetLoad::Pending
    }

    /// Move to `Ready`. Only the first transition out of `Pending` counts.
    pub fn mark_ready(&mut self) -> bool {
        if !self.is_pending() {
            warn!("Character asset already settled as {:?}", self.state);
            return false;
        }
        self.state = AssetLoad::Ready;
        true
    }

    /// Move to `Failed`. Only the first transition out of `Pending` counts.
    pub fn mark_failed(&mut self, reason: impl Into<String>) -> bool {
        if !self.is_pending() {
            warn!("Character asset already settled as {:?}", self.state);
            return false;
        }
        self.state = AssetLoad::Failed(reason.into());
        true
    }

    /// Drop the channel and join the loader thread.
    pub fn shutdown(&mut self) {
        self.rx = None;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gltfmanifest::sample_document;
    use crossbeam_channel::unbounded;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn wait_for_message(asset: &mut CharacterAsset) -> AssetMessage {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(message) = asset.poll() {
                return message;
            }
            assert!(Instant::now() < deadline, "loader never reported");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn poll_is_empty_until_message_arrives() {
        let (tx, rx) = unbounded();
        let mut asset = CharacterAsset::from_receiver("model.glb", rx);
        assert!(asset.poll().is_none());
        assert!(asset.is_pending());

        tx.send(AssetMessage::Failed("boom".into())).unwrap();
        assert!(matches!(asset.poll(), Some(AssetMessage::Failed(_))));
        // One-shot: the channel is gone afterwards.
        assert!(asset.poll().is_none());
    }

    #[test]
    fn disconnected_loader_is_a_failure() {
        let (tx, rx) = unbounded::<AssetMessage>();
        drop(tx);
        let mut asset = CharacterAsset::from_receiver("model.glb", rx);
        assert!(matches!(asset.poll(), Some(AssetMessage::Failed(_))));
    }

    #[test]
    fn state_settles_once() {
        let (_tx, rx) = unbounded();
        let mut asset = CharacterAsset::from_receiver("model.glb", rx);
        assert!(asset.mark_ready());
        assert!(!asset.mark_failed("late"));
        assert!(!asset.mark_ready());
        assert_eq!(asset.state, AssetLoad::Ready);
    }

    #[test]
    fn loader_thread_reports_missing_file() {
        let mut asset = CharacterAsset::begin_load("./missing/ninja.glb");
        match wait_for_message(&mut asset) {
            AssetMessage::Failed(e) => assert!(e.contains("ninja.glb")),
            other => panic!("unexpected {:?}", other),
        }
        asset.shutdown();
    }

    #[test]
    fn loader_thread_parses_gltf() {
        let mut file = tempfile::Builder::new().suffix(".gltf").tempfile().unwrap();
        write!(file, "{}", sample_document(&[Some("Idle"), Some("Walk")])).unwrap();

        let mut asset = CharacterAsset::begin_load(file.path());
        match wait_for_message(&mut asset) {
            AssetMessage::Parsed { path, manifest } => {
                assert_eq!(path, file.path());
                assert_eq!(manifest.animation_names, vec!["Idle", "Walk"]);
            }
            other => panic!("unexpected {:?}", other),
        }
        asset.shutdown();
    }
}
