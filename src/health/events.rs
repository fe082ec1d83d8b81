//! Health domain: lifecycle messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Written once for an entity whose hp reached zero, just before it is despawned.
#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
    /// The entity's tag, read before the despawn.
    pub tag: Option<String>,
}

impl Message for DeathEvent {}
