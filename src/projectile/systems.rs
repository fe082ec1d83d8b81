//! Projectile domain: contact and expiry handling.

use avian2d::prelude::*;
use bevy::ecs::entity::EntityHashSet;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::DamageEvent;
use crate::health::Health;
use crate::movement::GameLayer;
use crate::projectile::{ContactOutcome, Projectile, ProjectileSpawn};
use crate::services::{EntityLifecycle, IgnoredContacts};

/// Physics body, collider and sprite for a projectile.
pub fn projectile_bundle(spawn: &ProjectileSpawn) -> impl Bundle {
    let radius = spawn.config.radius;
    (
        spawn.to_projectile(),
        Sprite {
            color: Color::srgb(1.0, 0.85, 0.3),
            custom_size: Some(Vec2::splat(radius * 2.0)),
            ..default()
        },
        Transform::from_translation(spawn.origin.extend(1.0))
            .with_rotation(Quat::from_rotation_z(spawn.rotation())),
        RigidBody::Dynamic,
        Collider::circle(radius),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(
            GameLayer::Projectile,
            [GameLayer::Default, GameLayer::Wall, GameLayer::Character],
        ),
        GravityScale(0.0),
        LinearVelocity(spawn.velocity()),
    )
}

pub(crate) fn resolve_projectile_hits(
    time: Res<Time>,
    mut commands: Commands,
    mut collisions: MessageReader<CollisionStart>,
    projectiles: Query<(&Projectile, Option<&IgnoredContacts>)>,
    mut healths: Query<&mut Health>,
    mut damage_events: MessageWriter<DamageEvent>,
) {
    let now = time.elapsed_secs();
    let mut spent = EntityHashSet::default();

    for event in collisions.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (entity, other) in pairs {
            let Ok((projectile, ignored)) = projectiles.get(entity) else {
                continue;
            };
            if spent.contains(&entity) || projectiles.contains(other) {
                continue;
            }
            if ignored.is_some_and(|ignored| ignored.contains(other)) {
                continue;
            }

            let outcome = match healths.get_mut(other) {
                Ok(mut health) => projectile.resolve_contact(now, Some(&mut *health)),
                Err(_) => projectile.resolve_contact(now, None),
            };

            if outcome == ContactOutcome::Hit {
                damage_events.write(DamageEvent {
                    source: entity,
                    target: other,
                    amount: projectile.damage,
                });
            }
            if outcome.destroys_projectile() {
                debug!("projectile {:?} spent on {:?} ({:?})", entity, other, outcome);
                spent.insert(entity);
                commands.destroy(entity);
            }
        }
    }
}

pub(crate) fn expire_projectiles(
    time: Res<Time>,
    mut commands: Commands,
    projectiles: Query<(Entity, &Projectile)>,
) {
    let now = time.elapsed_secs();

    for (entity, projectile) in &projectiles {
        if projectile.is_expired(now) {
            commands.destroy(entity);
        }
    }
}
