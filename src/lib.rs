//! Top-down 2D character control on bevy and avian2d.
//!
//! A `CharacterController` bundles movement (continuous or tile-stepped),
//! optional melee and ranged attacks, and one swappable `CharacterBehaviour`
//! that drives it each tick. Health lives in its own component so anything can
//! take damage.

pub mod behaviours;
pub mod character;
pub mod combat;
pub mod content;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod health;
pub mod input;
pub mod movement;
pub mod projectile;
pub mod services;

use bevy::prelude::*;

/// Per-tick stages, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopdownSet {
    /// Behaviours issue commands; melee damage lands here.
    Behaviour,
    /// Accumulated input becomes velocity or a tile step.
    Movement,
    /// Thorns and projectile contacts.
    Combat,
    /// Grace flashes and deaths.
    Health,
}

/// Everything except rendering and physics, which the app adds itself.
pub struct TopdownPlugin;

impl Plugin for TopdownPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                TopdownSet::Behaviour,
                TopdownSet::Movement,
                TopdownSet::Combat,
                TopdownSet::Health,
            )
                .chain(),
        )
        .add_plugins((
            services::ServicesPlugin,
            content::ContentPlugin,
            character::CharacterPlugin,
            movement::MovementPlugin,
            combat::CombatPlugin,
            projectile::ProjectilePlugin,
            health::HealthPlugin,
        ));

        #[cfg(feature = "dev-tools")]
        app.add_plugins(debug::DebugPlugin);
    }
}
