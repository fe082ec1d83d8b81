//! Projectile domain: constant-velocity shots with owner tags and lifetimes.

mod components;
mod systems;


pub use components::{
    ContactOutcome, ContactPolicy, Projectile, ProjectileConfig, ProjectileSpawn,
};
pub use systems::projectile_bundle;

use bevy::prelude::*;

use crate::TopdownSet;
use crate::projectile::systems::{expire_projectiles, resolve_projectile_hits};

pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (resolve_projectile_hits, expire_projectiles)
                .chain()
                .in_set(TopdownSet::Combat),
        );
    }
}
