//! Behaviours domain: the stock drivers a `CharacterController` can run.
//!
//! `UserInputBehaviour` maps polled keys onto the capability surface,
//! `ScriptedBehaviour` wanders and fires on a timer, and `ZeldaBehaviour` is the
//! demo's full-health sword beam variant of user input.

mod scripted;
mod user_input;
mod zelda;

#[cfg(test)]
mod tests;

pub use scripted::{ACTION_INTERVAL, MAX_FIRE_INTERVAL, ScriptedBehaviour};
pub use user_input::UserInputBehaviour;
pub use zelda::ZeldaBehaviour;

use crate::character::CharacterContext;
use crate::services::InputKey;

/// Frame movement from the held arrow keys.
pub(crate) fn move_from_held_keys(ctx: &mut CharacterContext<'_, '_>) {
    let input = ctx.input();
    if input.held(InputKey::Left) {
        ctx.move_left(false);
    }
    if input.held(InputKey::Right) {
        ctx.move_right(false);
    }
    if input.held(InputKey::Up) {
        ctx.move_up(false);
    }
    if input.held(InputKey::Down) {
        ctx.move_down(false);
    }
}
