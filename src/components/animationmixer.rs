//! Skeletal clip playback with crossfades.
//!
//! The [`AnimationMixer`] owns one [`ClipAction`] per animation clip of the
//! character model, in load order. Exactly one clip is *active* once clips are
//! loaded. Selecting another clip fades the previous one out and the new one
//! in over the same duration; while both weights are non-zero the render side
//! blends their poses (see [`AnimationMixer::pose_weights`]).
//!
//! Playback is time based: [`AnimationMixer::advance`] takes the frame delta
//! in seconds and clips loop.

use bevy_ecs::prelude::Component;
use log::{debug, warn};
use smallvec::SmallVec;

/// Crossfade duration used when none is configured.
pub const DEFAULT_FADE_SECONDS: f32 = 0.3;

/// raylib bakes glTF animation channels into frames 17 ms apart.
pub const GLTF_FRAME_RATE: f32 = 1000.0 / 17.0;

/// Name and baked length of a clip as reported by the model loader.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipInfo {
    pub name: String,
    pub frame_count: usize,
}

impl ClipInfo {
    pub fn new(name: impl Into<String>, frame_count: usize) -> Self {
        Self {
            name: name.into(),
            frame_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct WeightRamp {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

/// Playback state of one clip.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipAction {
    pub name: String,
    pub frame_count: usize,
    /// Baked frames per second.
    pub fps: f32,
    /// Local playback time in seconds, in `[0, duration)`.
    pub time: f32,
    /// Blend weight in `[0, 1]`.
    pub weight: f32,
    pub playing: bool,
    ramp: Option<WeightRamp>,
}

impl ClipAction {
    pub fn new(info: &ClipInfo, fps: f32) -> Self {
        Self {
            name: info.name.clone(),
            frame_count: info.frame_count,
            fps,
            time: 0.0,
            weight: 0.0,
            playing: false,
            ramp: None,
        }
    }

    /// Clip length in seconds.
    pub fn duration(&self) -> f32 {
        if self.fps > 0.0 {
            self.frame_count as f32 / self.fps
        } else {
            0.0
        }
    }

    /// Baked frame shown at the current time.
    pub fn frame(&self) -> usize {
        if self.frame_count == 0 {
            return 0;
        }
        ((self.time * self.fps) as usize).min(self.frame_count - 1)
    }

    /// True while a fade ramp is running.
    pub fn is_fading(&self) -> bool {
        self.ramp.is_some()
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.weight = 1.0;
        self.ramp = None;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn fade_in(&mut self, duration: f32) {
        self.weight = 0.0;
        self.fade_to(1.0, duration);
    }

    fn fade_out(&mut self, duration: f32) {
        self.fade_to(0.0, duration);
    }

    fn fade_to(&mut self, to: f32, duration: f32) {
        if duration <= 0.0 {
            self.weight = to;
            self.ramp = None;
            if to <= 0.0 {
                self.playing = false;
            }
            return;
        }
        self.ramp = Some(WeightRamp {
            from: self.weight,
            to,
            duration,
            elapsed: 0.0,
        });
    }

    fn advance(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        let duration = self.duration();
        if duration > 0.0 {
            self.time = (self.time + dt).rem_euclid(duration);
        }
        if let Some(ramp) = self.ramp.as_mut() {
            ramp.elapsed += dt;
            let t = (ramp.elapsed / ramp.duration).min(1.0);
            self.weight = ramp.from + (ramp.to - ramp.from) * t;
            if t >= 1.0 {
                self.ramp = None;
                if self.weight <= 0.0 {
                    self.weight = 0.0;
                    self.playing = false;
                }
            }
        }
    }
}

/// One weighted frame contributing to the blended pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseWeight {
    pub clip: usize,
    pub frame: usize,
    /// Normalised weight; all weights of a pose sum to 1.
    pub weight: f32,
}

#[derive(Component, Debug, Clone)]
pub struct AnimationMixer {
    clips: Vec<ClipAction>,
    active: Option<usize>,
    fade_seconds: f32,
}

impl Default for AnimationMixer {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_SECONDS)
    }
}

impl AnimationMixer {
    /// Empty mixer; nothing is active until clips are loaded.
    pub fn new(fade_seconds: f32) -> Self {
        Self {
            clips: Vec::new(),
            active: None,
            fade_seconds,
        }
    }

    /// Replace the clip set. No clip is active afterwards.
    pub fn load_clips(&mut self, clips: &[ClipInfo], fps: f32) {
        self.clips = clips.iter().map(|info| ClipAction::new(info, fps)).collect();
        self.active = None;
    }

    /// Start `index` at full weight without a crossfade.
    pub fn play_initial(&mut self, index: usize) -> bool {
        let Some(clip) = self.clips.get_mut(index) else {
            warn!(
                "Initial clip {} out of range ({} clips)",
                index,
                self.clips.len()
            );
            return false;
        };
        clip.reset();
        clip.play();
        self.active = Some(index);
        true
    }

    /// Make `index` the active clip, crossfading from the previous one.
    ///
    /// Returns `false` without touching any state when `index` is already
    /// active or not a loaded clip.
    pub fn select_animation(&mut self, index: usize) -> bool {
        if self.active == Some(index) {
            return false;
        }
        if index >= self.clips.len() {
            warn!(
                "Ignoring selection of clip {} ({} clips loaded)",
                index,
                self.clips.len()
            );
            return false;
        }
        let fade = self.fade_seconds;
        if let Some(previous) = self.active.and_then(|i| self.clips.get_mut(i)) {
            previous.fade_out(fade);
        }
        let next = &mut self.clips[index];
        next.reset();
        next.fade_in(fade);
        next.play();
        debug!("Crossfading to clip {} '{}'", index, next.name);
        self.active = Some(index);
        true
    }

    /// Advance every playing clip by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for clip in self.clips.iter_mut() {
            clip.advance(dt);
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_clip(&self) -> Option<&ClipAction> {
        self.active.and_then(|i| self.clips.get(i))
    }

    pub fn clips(&self) -> &[ClipAction] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn fade_seconds(&self) -> f32 {
        self.fade_seconds
    }

    /// True while more than one clip contributes to the pose.
    pub fn is_crossfading(&self) -> bool {
        self.clips
            .iter()
            .filter(|c| c.playing && c.weight > 0.0)
            .count()
            > 1
    }

    /// Frames to blend for the current pose, weights normalised to sum 1.
    pub fn pose_weights(&self) -> SmallVec<[PoseWeight; 2]> {
        let mut out: SmallVec<[PoseWeight; 2]> = self
            .clips
            .iter()
            .enumerate()
            .filter(|(_, c)| c.playing && c.weight > 0.0)
            .map(|(i, c)| PoseWeight {
                clip: i,
                frame: c.frame(),
                weight: c.weight,
            })
            .collect();
        let total: f32 = out.iter().map(|w| w.weight).sum();
        if total > 0.0 {
            for w in out.iter_mut() {
                w.weight /= total;
            }
        }
        out
    }
}
