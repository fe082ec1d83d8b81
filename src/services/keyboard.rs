//! Services domain: raw key polling for human-driven behaviours.

use bevy::prelude::*;

/// Abstract keys a behaviour can poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    Left,
    Right,
    Up,
    Down,
    Melee,
    Ranged,
}

pub trait InputSource {
    fn held(&self, key: InputKey) -> bool;
    fn just_pressed(&self, key: InputKey) -> bool;
}

/// Input source with nothing pressed, used when no keyboard is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn held(&self, _key: InputKey) -> bool {
        false
    }

    fn just_pressed(&self, _key: InputKey) -> bool {
        false
    }
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub melee: KeyCode,
    pub ranged: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            melee: KeyCode::KeyC,
            ranged: KeyCode::KeyX,
        }
    }
}

impl KeyBindings {
    pub fn code(&self, key: InputKey) -> KeyCode {
        match key {
            InputKey::Left => self.left,
            InputKey::Right => self.right,
            InputKey::Up => self.up,
            InputKey::Down => self.down,
            InputKey::Melee => self.melee,
            InputKey::Ranged => self.ranged,
        }
    }
}

pub struct KeyboardSource<'a> {
    keys: &'a ButtonInput<KeyCode>,
    bindings: &'a KeyBindings,
}

impl<'a> KeyboardSource<'a> {
    pub fn new(keys: &'a ButtonInput<KeyCode>, bindings: &'a KeyBindings) -> Self {
        Self { keys, bindings }
    }
}

impl InputSource for KeyboardSource<'_> {
    fn held(&self, key: InputKey) -> bool {
        self.keys.pressed(self.bindings.code(key))
    }

    fn just_pressed(&self, key: InputKey) -> bool {
        self.keys.just_pressed(self.bindings.code(key))
    }
}
