//! Character controller.
//!
//! Reads the held directions from [`InputState`] once per frame and moves the
//! character: left/right walk the viewport layer across the screen until it
//! reaches `x_limit`, after which the background scrolls instead; up/down
//! move the layer vertically inside `[y_top, y_bottom]` and push the model
//! away from or towards the camera. Afterwards facing and clip are chosen
//! according to the configured [`SelectionPolicy`].
//!
//! Steps are per tick (frame-locked) unless `movement.time_scaled` is set.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animationmixer::AnimationMixer;
use crate::components::depth::Depth;
use crate::components::facing::Facing;
use crate::components::parallaxlayer::ParallaxLayer;
use crate::components::player::Player;
use crate::components::screenposition::ScreenPosition;
use crate::resources::gameconfig::{AnimationConfig, GameConfig, MovementConfig, SelectionPolicy};
use crate::resources::input::{Direction, InputState};
use crate::resources::worldtime::WorldTime;
use crate::systems::compositor::shift_parallax;

/// Frame rate the per-tick steps were tuned for.
pub const REFERENCE_FPS: f32 = 60.0;

/// Which clip of the configured pair to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipRole {
    Idle,
    Walk,
}

impl ClipRole {
    pub fn index(self, animation: &AnimationConfig) -> usize {
        match self {
            ClipRole::Idle => animation.idle_clip,
            ClipRole::Walk => animation.walk_clip,
        }
    }
}

/// What one controller tick did besides mutating the character.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickOutcome {
    /// Amount to scroll the scene; positive moves the backgrounds right.
    pub scene_shift: f32,
    pub moved_up: bool,
    pub moved_down: bool,
}

/// Multiplier applied to every step this tick.
pub fn step_scale(movement: &MovementConfig, delta: f32) -> f32 {
    if movement.time_scaled {
        delta * REFERENCE_FPS
    } else {
        1.0
    }
}

/// Apply held directions to position and depth.
pub fn move_character(
    input: &InputState,
    movement: &MovementConfig,
    scale: f32,
    pos: &mut ScreenPosition,
    depth: &mut Depth,
) -> TickOutcome {
    let x_step = movement.x_step * scale;
    let y_step = movement.y_step * scale;
    let z_step = movement.z_step * scale;
    let mut outcome = TickOutcome::default();

    if input.is_held(Direction::Left) {
        if pos.pos.x > -movement.x_limit {
            pos.pos.x -= x_step;
        } else {
            outcome.scene_shift += x_step;
        }
    }
    if input.is_held(Direction::Right) {
        if pos.pos.x < movement.x_limit {
            pos.pos.x += x_step;
        } else {
            outcome.scene_shift -= x_step;
        }
    }
    if input.is_held(Direction::Up) && pos.pos.y > movement.y_top {
        pos.pos.y = (pos.pos.y - y_step).max(movement.y_top);
        depth.z -= z_step;
        outcome.moved_up = true;
    }
    if input.is_held(Direction::Down) && pos.pos.y < movement.y_bottom {
        pos.pos.y = (pos.pos.y + y_step).min(movement.y_bottom);
        depth.z += z_step;
        outcome.moved_down = true;
    }
    outcome
}

/// Facing and clip for this tick, or `None` to keep the current ones.
pub fn select_pose(
    input: &InputState,
    policy: SelectionPolicy,
    outcome: &TickOutcome,
) -> Option<(Facing, ClipRole)> {
    let left = input.is_held(Direction::Left);
    let right = input.is_held(Direction::Right);
    let up = input.is_held(Direction::Up);
    let down = input.is_held(Direction::Down);

    match policy {
        SelectionPolicy::FirstMatch => {
            if left {
                Some((Facing::Left, ClipRole::Walk))
            } else if right {
                Some((Facing::Right, ClipRole::Walk))
            } else if !input.any_direction() {
                Some((Facing::Front, ClipRole::Idle))
            } else if up {
                Some((Facing::Back, ClipRole::Walk))
            } else if down {
                Some((Facing::Front, ClipRole::Walk))
            } else {
                None
            }
        }
        SelectionPolicy::LastMatch => {
            let mut choice = None;
            if left {
                choice = Some((Facing::Left, ClipRole::Walk));
            }
            if right {
                choice = Some((Facing::Right, ClipRole::Walk));
            }
            if !input.any_direction() {
                choice = Some((Facing::Front, ClipRole::Idle));
            }
            if up && outcome.moved_up {
                choice = Some((Facing::Back, ClipRole::Walk));
            }
            if down && outcome.moved_down {
                choice = Some((Facing::Front, ClipRole::Walk));
            }
            choice
        }
    }
}

/// One controller tick for a single character.
pub fn drive_character(
    input: &InputState,
    config: &GameConfig,
    scale: f32,
    pos: &mut ScreenPosition,
    depth: &mut Depth,
    facing: &mut Facing,
    mixer: &mut AnimationMixer,
) -> TickOutcome {
    let outcome = move_character(input, &config.movement, scale, pos, depth);
    if let Some((next_facing, role)) = select_pose(input, config.animation.selection, &outcome) {
        *facing = next_facing;
        mixer.select_animation(role.index(&config.animation));
    }
    outcome
}

/// Per-frame controller system. Scheduled only once the character is ready.
pub fn character_controller(
    input: Res<InputState>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
    mut players: Query<
        (
            &mut ScreenPosition,
            &mut Depth,
            &mut Facing,
            &mut AnimationMixer,
        ),
        With<Player>,
    >,
    mut layers: Query<&mut ParallaxLayer>,
) {
    let scale = step_scale(&config.movement, time.delta);
    for (mut pos, mut depth, mut facing, mut mixer) in players.iter_mut() {
        let outcome = drive_character(
            &input,
            &config,
            scale,
            &mut pos,
            &mut depth,
            &mut facing,
            &mut mixer,
        );
        if outcome.scene_shift != 0.0 {
            debug!("Scrolling scene by {}", outcome.scene_shift);
            shift_parallax(layers.iter_mut(), outcome.scene_shift);
        }
    }
}
