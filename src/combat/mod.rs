//! Combat domain: melee and ranged attack gates, thorns, and damage messages.

mod events;
mod melee;
mod ranged;
mod systems;

#[cfg(test)]
mod tests;

pub use events::DamageEvent;
pub use melee::{MeleeAttack, MeleeStrike};
pub use ranged::RangedAttack;

use bevy::prelude::*;

use crate::TopdownSet;
use crate::combat::systems::apply_thorns;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_systems(Update, apply_thorns.in_set(TopdownSet::Combat));
    }
}
