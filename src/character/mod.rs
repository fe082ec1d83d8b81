//! Character domain: the controller each character is driven through and the
//! behaviours that drive it.

mod behaviour;
mod components;
mod spawn;
mod systems;


pub use behaviour::{CharacterBehaviour, CharacterContext, CharacterEnv};
pub use components::{CharacterController, Tag};
pub use spawn::spawn_character;

use bevy::prelude::*;

use crate::TopdownSet;
use crate::character::systems::{drive_behaviours, init_animation_params};

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (init_animation_params, drive_behaviours)
                .chain()
                .in_set(TopdownSet::Behaviour),
        );
    }
}
