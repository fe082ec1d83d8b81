//! Movement domain: input-driven locomotion, continuous or tile-stepped.

mod components;
mod engine;
mod systems;


pub use components::GameLayer;
pub use engine::{ContinuousMovement, Motion, Movement, MovementKind, TILE_MARGIN, TileMovement};

use bevy::prelude::*;

use crate::TopdownSet;
use crate::movement::systems::apply_movement;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_movement.in_set(TopdownSet::Movement));
    }
}
