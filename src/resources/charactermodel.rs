//! GPU-side character model and skeletal pose upload.
//!
//! Holds the raylib [`Model`] and its baked [`ModelAnimation`]s once the
//! character asset has loaded. raylib skins a model from a single animation
//! frame, so crossfades are done here: the weighted frames reported by the
//! [`AnimationMixer`](crate::components::animationmixer::AnimationMixer) are
//! blended bone by bone into a scratch pose, which is then uploaded as a
//! one-frame animation.
//!
//! Note: this is a NonSend resource because `Model` owns GPU buffers that
//! must be accessed from the main thread.

use glam::{Quat, Vec3, Vec4};
use log::{info, warn};
use raylib::ffi;
use raylib::prelude::*;
use std::path::Path;

use crate::components::animationmixer::{ClipInfo, PoseWeight};

struct LoadedModel {
    model: Model,
    animations: Vec<ModelAnimation>,
}

/// The character model, empty until the asset has been loaded.
#[derive(Default)]
pub struct CharacterModel {
    loaded: Option<LoadedModel>,
    blend: BlendedPose,
    /// Upload buffer for the blended frame.
    scratch: Vec<ffi::Transform>,
}

impl CharacterModel {
    /// Load the model and its animations from `path` on the main thread.
    pub fn load(rl: &mut RaylibHandle, th: &RaylibThread, path: &Path) -> Result<Self, String> {
        let file = path.to_string_lossy();
        let model = rl
            .load_model(th, &file)
            .map_err(|e| format!("Failed to load model {:?}: {}", path, e))?;
        let animations = rl
            .load_model_animations(th, &file)
            .map_err(|e| format!("Failed to load animations of {:?}: {}", path, e))?;
        info!(
            "Loaded model {:?} with {} animation(s)",
            path,
            animations.len()
        );
        Ok(Self {
            loaded: Some(LoadedModel { model, animations }),
            blend: BlendedPose::default(),
            scratch: Vec::new(),
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn model(&self) -> Option<&Model> {
        self.loaded.as_ref().map(|l| &l.model)
    }

    /// Clip list in load order. Names come from `names` (the glTF manifest)
    /// when available, else from raylib.
    pub fn clip_infos(&self, names: &[String]) -> Vec<ClipInfo> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Vec::new();
        };
        if !names.is_empty() && names.len() != loaded.animations.len() {
            warn!(
                "Manifest lists {} clip(s) but raylib loaded {}",
                names.len(),
                loaded.animations.len()
            );
        }
        loaded
            .animations
            .iter()
            .enumerate()
            .map(|(i, anim)| {
                let raw: &ffi::ModelAnimation = anim;
                let name = names
                    .get(i)
                    .cloned()
                    .or_else(|| Some(animation_name(raw)).filter(|n| !n.is_empty()))
                    .unwrap_or_else(|| format!("clip_{}", i));
                ClipInfo::new(name, raw.frameCount.max(0) as usize)
            })
            .collect()
    }

    /// Blend the weighted frames and skin the model with the result.
    pub fn apply_pose(&mut self, weights: &[PoseWeight]) {
        let Some(loaded) = self.loaded.as_ref() else {
            return;
        };
        self.blend.clear();
        let mut template: Option<&ffi::ModelAnimation> = None;
        for w in weights {
            let Some(anim) = loaded.animations.get(w.clip) else {
                continue;
            };
            let raw: &ffi::ModelAnimation = anim;
            let pose = frame_pose(raw, w.frame);
            if pose.is_empty() || (!self.blend.is_empty() && pose.len() != self.blend.len()) {
                continue;
            }
            self.blend.add(pose, w.weight);
            template.get_or_insert(raw);
        }
        let Some(template) = template else {
            return;
        };
        self.blend.write_to(&mut self.scratch);

        let mut frame_ptr = self.scratch.as_mut_ptr();
        let blended = ffi::ModelAnimation {
            boneCount: self.scratch.len() as i32,
            frameCount: 1,
            bones: template.bones,
            framePoses: &mut frame_ptr,
            name: template.name,
        };
        // `blended` borrows the bone hierarchy of a loaded animation and the
        // scratch buffer; both outlive the call and raylib does not keep them.
        unsafe {
            ffi::UpdateModelAnimation(*loaded.model, blended, 0);
        }
    }
}

fn animation_name(raw: &ffi::ModelAnimation) -> String {
    let bytes: Vec<u8> = raw
        .name
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Bone transforms of one baked frame, empty if out of range.
fn frame_pose(raw: &ffi::ModelAnimation, frame: usize) -> &[ffi::Transform] {
    if raw.framePoses.is_null() || raw.boneCount <= 0 || frame >= raw.frameCount.max(0) as usize {
        return &[];
    }
    // raylib allocates `frameCount` pose pointers of `boneCount` transforms each.
    unsafe {
        let pose = *raw.framePoses.add(frame);
        if pose.is_null() {
            return &[];
        }
        std::slice::from_raw_parts(pose, raw.boneCount as usize)
    }
}

/// One bone of a blended pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl From<&ffi::Transform> for BoneTransform {
    fn from(t: &ffi::Transform) -> Self {
        let r = Vec4::new(t.rotation.x, t.rotation.y, t.rotation.z, t.rotation.w);
        Self {
            translation: Vec3::new(t.translation.x, t.translation.y, t.translation.z),
            // Degenerate rotations become identity.
            rotation: r.try_normalize().map_or(Quat::IDENTITY, Quat::from_vec4),
            scale: Vec3::new(t.scale.x, t.scale.y, t.scale.z),
        }
    }
}

impl From<BoneTransform> for ffi::Transform {
    fn from(b: BoneTransform) -> Self {
        ffi::Transform {
            translation: ffi::Vector3 {
                x: b.translation.x,
                y: b.translation.y,
                z: b.translation.z,
            },
            rotation: ffi::Vector4 {
                x: b.rotation.x,
                y: b.rotation.y,
                z: b.rotation.z,
                w: b.rotation.w,
            },
            scale: ffi::Vector3 {
                x: b.scale.x,
                y: b.scale.y,
                z: b.scale.z,
            },
        }
    }
}

/// Running weighted blend of skeleton poses.
///
/// Each added pose is mixed in with `weight / total_weight`, so the result
/// is the weighted average whatever the order. Rotations use `Quat::slerp`,
/// which takes the shortest path.
#[derive(Debug, Default)]
pub struct BlendedPose {
    bones: Vec<BoneTransform>,
    total_weight: f32,
}

impl BlendedPose {
    pub fn clear(&mut self) {
        self.bones.clear();
        self.total_weight = 0.0;
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn bones(&self) -> &[BoneTransform] {
        &self.bones
    }

    /// Mix `pose` in with `weight`. The first pose sets the bone count.
    pub fn add(&mut self, pose: &[ffi::Transform], weight: f32) {
        if self.bones.is_empty() {
            self.bones.extend(pose.iter().map(BoneTransform::from));
            self.total_weight = weight;
            return;
        }
        self.total_weight += weight;
        if self.total_weight <= f32::EPSILON {
            return;
        }
        let t = weight / self.total_weight;
        for (acc, bone) in self.bones.iter_mut().zip(pose.iter().map(BoneTransform::from)) {
            acc.translation = acc.translation.lerp(bone.translation, t);
            acc.rotation = acc.rotation.slerp(bone.rotation, t);
            acc.scale = acc.scale.lerp(bone.scale, t);
        }
    }

    /// Write the pose out in raylib's layout.
    pub fn write_to(&self, out: &mut Vec<ffi::Transform>) {
        out.clear();
        out.extend(self.bones.iter().map(|&b| ffi::Transform::from(b)));
    }
}
