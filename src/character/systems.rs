//! Character domain: behaviour ticking and animation bootstrap.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::character::{CharacterController, CharacterEnv, Tag};
use crate::combat::{DamageEvent, MeleeStrike};
use crate::health::Health;
use crate::services::{
    AnimatorParams, InputSource, KeyBindings, KeyboardSource, NoInput, NullAnimation,
    PhysicsWorld, sink_or_null,
};

pub(crate) fn init_animation_params(
    mut query: Query<(&CharacterController, &mut AnimatorParams), Added<CharacterController>>,
) {
    for (controller, mut params) in &mut query {
        controller.emit_initial_animation(&mut *params);
    }
}

/// Runs each character's behaviour, then lands its melee strikes before the
/// next character acts.
pub(crate) fn drive_behaviours(
    time: Res<Time>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<KeyBindings>,
    mut world: PhysicsWorld,
    mut characters: Query<(
        Entity,
        &mut CharacterController,
        &Transform,
        Option<&Tag>,
        Option<&mut LinearVelocity>,
        Option<&mut AnimatorParams>,
    )>,
    mut healths: Query<&mut Health>,
    mut damage_events: MessageWriter<DamageEvent>,
) {
    let now = time.elapsed_secs();
    let keyboard = keys
        .as_deref()
        .map(|keys| KeyboardSource::new(keys, &bindings));
    let input: &dyn InputSource = match &keyboard {
        Some(keyboard) => keyboard,
        None => &NoInput,
    };

    for (entity, mut controller, transform, tag, velocity, mut params) in &mut characters {
        if healths.get(entity).is_ok_and(|health| health.is_dead()) {
            continue;
        }

        let controller = &mut *controller;
        if let Some(velocity) = velocity.as_deref() {
            controller.movement.set_velocity(velocity.0);
        }

        let mut null = NullAnimation;
        let animation = sink_or_null(
            params.as_deref_mut(),
            controller.handle_animation_events,
            &mut null,
        );
        let mut scoped = world.scoped(entity);
        let strikes = controller.update_behaviour(CharacterEnv {
            entity,
            tag: tag.map(Tag::as_str),
            now,
            position: transform.translation.truncate(),
            health: healths.get(entity).ok(),
            world: &mut scoped,
            animation,
            input,
        });

        if let Some(mut velocity) = velocity {
            velocity.0 = controller.movement.velocity();
        }
        for strike in &strikes {
            land_strike(now, strike, &mut healths, &mut damage_events);
        }
    }
}

fn land_strike(
    now: f32,
    strike: &MeleeStrike,
    healths: &mut Query<&mut Health>,
    damage_events: &mut MessageWriter<DamageEvent>,
) {
    for &target in &strike.targets {
        let Ok(mut health) = healths.get_mut(target) else {
            continue;
        };
        if strike.apply_to(now, &mut health) {
            damage_events.write(DamageEvent {
                source: strike.attacker,
                target,
                amount: strike.damage,
            });
            debug!("{:?} struck {:?} for {}", strike.attacker, target, strike.damage);
        }
    }
}
