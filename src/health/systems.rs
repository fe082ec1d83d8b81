//! Health domain: flash scheduling and death processing.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::character::Tag;
use crate::health::{DeathEvent, Health};
use crate::services::EntityLifecycle;

pub(crate) fn tick_grace_flashes(time: Res<Time>, mut query: Query<(&mut Health, &mut Visibility)>) {
    let now = time.elapsed_secs();

    for (mut health, mut visibility) in &mut query {
        if !health.is_flashing() {
            continue;
        }
        health.tick_flash(now, &mut *visibility);
    }
}

pub(crate) fn process_deaths(
    mut commands: Commands,
    query: Query<(Entity, &Health, Option<&Tag>)>,
    mut deaths: MessageWriter<DeathEvent>,
) {
    for (entity, health, tag) in &query {
        if !health.is_dead() {
            continue;
        }
        info!("{:?} died", entity);
        deaths.write(DeathEvent {
            entity,
            tag: tag.map(|tag| tag.as_str().to_string()),
        });
        commands.destroy(entity);
    }
}
