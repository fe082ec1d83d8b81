//! Combat domain: combat-related messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Written whenever a hit is accepted by the target's health.
#[derive(Debug)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
}

impl Message for DamageEvent {}
