//! Combat domain: thorns against current contacts.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::character::{CharacterController, Tag};
use crate::combat::DamageEvent;
use crate::health::Health;

pub(crate) fn apply_thorns(
    time: Res<Time>,
    attackers: Query<(Entity, &CharacterController, &CollidingEntities, Option<&Tag>)>,
    mut healths: Query<&mut Health>,
    mut damage_events: MessageWriter<DamageEvent>,
) {
    let now = time.elapsed_secs();

    for (attacker, controller, contacts, tag) in &attackers {
        if healths.get(attacker).is_ok_and(|health| health.is_dead()) {
            continue;
        }
        let Some(melee) = controller.melee.as_ref() else {
            continue;
        };
        if melee.thorns_damage <= 0.0 {
            continue;
        }

        for &victim in contacts.iter() {
            if victim == attacker {
                continue;
            }
            let Ok(mut health) = healths.get_mut(victim) else {
                continue;
            };
            if melee.apply_thorns(now, tag.map(Tag::as_str), &mut health) {
                damage_events.write(DamageEvent {
                    source: attacker,
                    target: victim,
                    amount: melee.thorns_damage,
                });
                debug!("thorns hit {:?} for {}", victim, melee.thorns_damage);
            }
        }
    }
}
