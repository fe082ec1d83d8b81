//! Movement domain: writes each character's motion to its body.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::CharacterController;
use crate::health::Health;
use crate::movement::Motion;
use crate::services::{AnimatorParams, NullAnimation, PhysicsWorld, sink_or_null};

pub(crate) fn apply_movement(
    time: Res<Time>,
    mut world: PhysicsWorld,
    mut characters: Query<(
        Entity,
        &mut CharacterController,
        &mut Transform,
        Option<&mut LinearVelocity>,
        Option<&mut AnimatorParams>,
        Option<&Health>,
    )>,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for (entity, mut controller, mut transform, velocity, mut params, health) in &mut characters {
        if health.is_some_and(Health::is_dead) {
            continue;
        }
        let controller = &mut *controller;
        let frozen = controller.is_frozen(now);
        if let Some(velocity) = velocity.as_deref() {
            controller.movement.set_velocity(velocity.0);
        }

        let mut null = NullAnimation;
        let animation = sink_or_null(
            params.as_deref_mut(),
            controller.handle_animation_events,
            &mut null,
        );
        let scoped = world.scoped(entity);
        let position = transform.translation.truncate();
        let motion = controller
            .movement
            .step(now, dt, position, frozen, &scoped, animation);

        match (motion, velocity) {
            (Motion::Velocity(v), Some(mut body)) => body.0 = v,
            (Motion::Velocity(v), None) => transform.translation += (v * dt).extend(0.0),
            (Motion::Teleport(target), body) => {
                transform.translation.x = target.x;
                transform.translation.y = target.y;
                if let Some(mut body) = body {
                    body.0 = Vec2::ZERO;
                }
            }
            (Motion::Stay, _) => {}
        }
    }
}
