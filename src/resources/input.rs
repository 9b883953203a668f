//! Per-frame keyboard input resource.
//!
//! Tracks the four movement directions plus the debug toggle. Key transitions
//! arrive through [`InputState::on_key_down`] and [`InputState::on_key_up`];
//! the controller only ever reads the resulting `active` flags. Defaults bind
//! the arrow keys.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held.
    pub active: bool,
    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }

    fn press(&mut self) {
        self.active = true;
    }

    fn release(&mut self) {
        self.active = false;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Resource capturing the keyboard state relevant to the character.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub up: BoolState,
    pub down: BoolState,
    /// Toggles the debug overlay on press; not a held state.
    pub debug_key: KeyboardKey,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            left: BoolState::bound_to(KeyboardKey::KEY_LEFT),
            right: BoolState::bound_to(KeyboardKey::KEY_RIGHT),
            up: BoolState::bound_to(KeyboardKey::KEY_UP),
            down: BoolState::bound_to(KeyboardKey::KEY_DOWN),
            debug_key: KeyboardKey::KEY_F11,
        }
    }
}

impl InputState {
    /// Direction bound to `key`, if any.
    pub fn direction_for(&self, key: KeyboardKey) -> Option<Direction> {
        [
            (Direction::Left, &self.left),
            (Direction::Right, &self.right),
            (Direction::Up, &self.up),
            (Direction::Down, &self.down),
        ]
        .into_iter()
        .find(|(_, state)| state.key_binding == key)
        .map(|(direction, _)| direction)
    }

    pub fn direction(&self, direction: Direction) -> &BoolState {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }

    fn direction_mut(&mut self, direction: Direction) -> &mut BoolState {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }

    /// Mark the direction bound to `key` as held.
    ///
    /// Returns `false` (and changes nothing) when `key` is not a direction key.
    pub fn on_key_down(&mut self, key: KeyboardKey) -> bool {
        match self.direction_for(key) {
            Some(direction) => {
                self.direction_mut(direction).press();
                true
            }
            None => false,
        }
    }

    /// Mark the direction bound to `key` as released.
    ///
    /// Returns `false` (and changes nothing) when `key` is not a direction key.
    pub fn on_key_up(&mut self, key: KeyboardKey) -> bool {
        match self.direction_for(key) {
            Some(direction) => {
                self.direction_mut(direction).release();
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.direction(direction).active
    }

    /// True when at least one direction is held.
    pub fn any_direction(&self) -> bool {
        self.left.active || self.right.active || self.up.active || self.down.active
    }
}
