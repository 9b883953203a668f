//! Input systems.
//!
//! - [`update_input_state`] reads key transitions from Raylib each frame and
//!   feeds them into [`crate::resources::input::InputState`].
//! - The debug key emits a
//!   [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).
use bevy_ecs::prelude::*;
use log::trace;
use raylib::ffi::KeyboardKey;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll Raylib for key transitions and update the `InputState` resource.
///
/// Only press/release edges are forwarded; a key stays held from its press
/// until its release.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let bindings: [KeyboardKey; 4] = [
        input.left.key_binding,
        input.right.key_binding,
        input.up.key_binding,
        input.down.key_binding,
    ];
    for key in bindings {
        if rl.is_key_pressed(key) && input.on_key_down(key) {
            trace!("key down {:?}", key);
        }
        if rl.is_key_released(key) && input.on_key_up(key) {
            trace!("key up {:?}", key);
        }
    }

    if rl.is_key_pressed(input.debug_key) {
        commands.trigger(SwitchDebugEvent {});
    }
}
