//! Lightweight glTF inspection.
//!
//! Reads the document part of a `.glb` (or plain `.gltf`) file: scene name,
//! node hierarchy roots and the ordered list of animation clips. Mesh and
//! skin data are left to raylib's loader; this only needs to know what the
//! file contains so the loader thread can reject a broken asset early.

use std::path::Path;

/// What a character asset contains, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct GltfManifest {
    pub scene_name: Option<String>,
    /// Names of the root nodes of the default scene.
    pub root_nodes: Vec<String>,
    pub node_count: usize,
    /// Animation clip names; unnamed clips are called `animation_<index>`.
    pub animation_names: Vec<String>,
}

impl GltfManifest {
    /// Read and inspect a `.glb` or `.gltf` file.
    pub fn read(path: &Path) -> Result<Self, String> {
        let bytes = std::fs::read(path)
            .map_err(|e| format!("Failed to read model {:?}: {}", path, e))?;
        Self::from_bytes(&bytes).map_err(|e| format!("{:?}: {}", path, e))
    }

    /// Inspect either a binary GLB container or a plain glTF JSON document.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| format!("Invalid glTF: {}", e))?;
        let doc = &gltf.document;

        let scene = doc.default_scene().or_else(|| doc.scenes().next());
        let root_nodes = scene
            .as_ref()
            .map(|s| {
                s.nodes()
                    .map(|n| {
                        n.name()
                            .map(str::to_string)
                            .unwrap_or_else(|| format!("node_{}", n.index()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            scene_name: scene.as_ref().and_then(|s| s.name()).map(str::to_string),
            root_nodes,
            node_count: doc.nodes().count(),
            animation_names: doc
                .animations()
                .map(|a| {
                    a.name()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("animation_{}", a.index()))
                })
                .collect(),
        })
    }
}

/// Minimal valid glTF document: two nodes under one scene and one
/// single-channel animation per entry of `clips`.
#[cfg(test)]
pub(crate) fn sample_document(clips: &[Option<&str>]) -> String {
    let animations: Vec<serde_json::Value> = clips
        .iter()
        .map(|name| {
            let mut anim = serde_json::json!({
                "channels": [{"sampler": 0, "target": {"node": 0, "path": "translation"}}],
                "samplers": [{"input": 0, "output": 1}]
            });
            if let Some(name) = name {
                anim["name"] = serde_json::json!(name);
            }
            anim
        })
        .collect();
    serde_json::json!({
        "asset": {"version": "2.0"},
        "scene": 0,
        "scenes": [{"name": "Scene", "nodes": [1]}],
        "nodes": [{"name": "Hips"}, {"name": "Armature", "children": [0]}],
        "buffers": [{"byteLength": 32}],
        "bufferViews": [
            {"buffer": 0, "byteLength": 8},
            {"buffer": 0, "byteOffset": 8, "byteLength": 24}
        ],
        "accessors": [
            {"bufferView": 0, "componentType": 5126, "count": 2, "type": "SCALAR",
             "min": [0.0], "max": [1.0]},
            {"bufferView": 1, "componentType": 5126, "count": 2, "type": "VEC3"}
        ],
        "animations": animations
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gltf::binary::{Glb, Header};
    use std::borrow::Cow;

    fn doc() -> String {
        sample_document(&[Some("Attack"), Some("Idle"), None])
    }

    fn glb_from_json(json: &str) -> Vec<u8> {
        Glb {
            header: Header {
                magic: *b"glTF",
                version: 2,
                length: 0,
            },
            json: Cow::Borrowed(json.as_bytes()),
            bin: None,
        }
        .to_vec()
        .unwrap()
    }

    #[test]
    fn parses_json_document() {
        let manifest = GltfManifest::from_bytes(doc().as_bytes()).unwrap();
        assert_eq!(manifest.scene_name.as_deref(), Some("Scene"));
        assert_eq!(manifest.root_nodes, vec!["Armature".to_string()]);
        assert_eq!(manifest.node_count, 2);
        assert_eq!(
            manifest.animation_names,
            vec!["Attack", "Idle", "animation_2"]
        );
    }

    #[test]
    fn parses_glb_container() {
        let bytes = glb_from_json(&doc());
        let manifest = GltfManifest::from_bytes(&bytes).unwrap();
        assert_eq!(manifest.animation_names.len(), 3);
        assert_eq!(manifest.root_nodes, vec!["Armature".to_string()]);
    }

    #[test]
    fn rejects_wrong_version() {
        let mut bytes = glb_from_json(&doc());
        bytes[4..8].copy_from_slice(&1u32.to_le_bytes());
        assert!(GltfManifest::from_bytes(&bytes).is_err());
    }

    #[test]
    fn rejects_truncated_container() {
        let bytes = glb_from_json(&doc());
        assert!(GltfManifest::from_bytes(&bytes[..bytes.len() - 8]).is_err());
        assert!(GltfManifest::from_bytes(&bytes[..6]).is_err());
    }

    #[test]
    fn rejects_garbage() {
        let err = GltfManifest::from_bytes(b"not a model").unwrap_err();
        assert!(err.contains("Invalid glTF"));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let manifest = GltfManifest::from_bytes(br#"{"asset": {"version": "2.0"}}"#).unwrap();
        assert_eq!(manifest.scene_name, None);
        assert!(manifest.root_nodes.is_empty());
        assert_eq!(manifest.node_count, 0);
        assert!(manifest.animation_names.is_empty());
    }

    #[test]
    fn read_reports_missing_file() {
        let err = GltfManifest::read(Path::new("./no/such/model.glb")).unwrap_err();
        assert!(err.contains("Failed to read model"));
    }
}
