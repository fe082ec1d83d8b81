//! Behaviours domain: keyboard-driven player control.

use bevy::prelude::*;

use crate::behaviours::move_from_held_keys;
use crate::character::{CharacterBehaviour, CharacterContext, CharacterController};
use crate::input::Axis;
use crate::services::InputKey;

/// Arrows move while held, melee repeats while its key is held, and ranged
/// fires once per press. Both attacks aim along the current facing.
#[derive(Debug, Default)]
pub struct UserInputBehaviour {
    melee_warned: bool,
    ranged_warned: bool,
}

impl UserInputBehaviour {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterBehaviour for UserInputBehaviour {
    fn name(&self) -> &str {
        "user_input"
    }

    fn on_attach(&mut self, _controller: &CharacterController) {
        self.melee_warned = false;
        self.ranged_warned = false;
    }

    fn update(&mut self, ctx: &mut CharacterContext<'_, '_>) {
        move_from_held_keys(ctx);

        let input = ctx.input();
        if input.just_pressed(InputKey::Left) || input.just_pressed(InputKey::Right) {
            ctx.note_key_down(Axis::Horizontal);
        } else if input.just_pressed(InputKey::Up) || input.just_pressed(InputKey::Down) {
            ctx.note_key_down(Axis::Vertical);
        }

        if input.held(InputKey::Melee) {
            if ctx.has_melee() {
                let direction = ctx.direction();
                ctx.melee_attack(direction, None);
            } else if !self.melee_warned {
                warn!("{:?} has no melee attack, ignoring the melee key", ctx.entity());
                self.melee_warned = true;
            }
        }

        if input.just_pressed(InputKey::Ranged) {
            if ctx.has_ranged() {
                let direction = ctx.direction();
                ctx.fire(direction);
            } else if !self.ranged_warned {
                warn!("{:?} has no ranged attack, ignoring the fire key", ctx.entity());
                self.ranged_warned = true;
            }
        }
    }
}
