//! Health domain: damage intake, grace periods and death.

mod components;
mod events;
mod systems;


pub use components::{ALL_TAGS, AttackInfo, FlashSchedule, Health, SubscriptionId};
pub use events::DeathEvent;

use bevy::prelude::*;

use crate::TopdownSet;
use crate::health::systems::{process_deaths, tick_grace_flashes};

pub struct HealthPlugin;

impl Plugin for HealthPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DeathEvent>().add_systems(
            Update,
            (tick_grace_flashes, process_deaths)
                .chain()
                .in_set(TopdownSet::Health),
        );
    }
}
