//! Character domain: spawning characters from content definitions.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::{CharacterController, Tag};
use crate::content::CharacterDef;
use crate::movement::{GameLayer, MovementKind};
use crate::services::AnimatorParams;

/// Spawns a character described by `def` at `position` and returns its entity.
pub fn spawn_character(commands: &mut Commands, def: &CharacterDef, position: Vec2) -> Entity {
    let controller = def.build_controller();
    let body = match controller.movement.kind() {
        MovementKind::Continuous(_) => RigidBody::Dynamic,
        MovementKind::Tile(_) => RigidBody::Kinematic,
    };
    let (r, g, b) = def.color;

    let mut entity = commands.spawn((
        Name::new(def.id.clone()),
        Tag::new(def.tag.as_str()),
        controller,
        AnimatorParams::default(),
        Sprite {
            color: Color::srgb(r, g, b),
            custom_size: Some(Vec2::splat(def.size)),
            ..default()
        },
        Transform::from_translation(position.extend(0.0)),
        body,
        Collider::rectangle(def.size, def.size),
        CollisionLayers::new(
            GameLayer::Character,
            [
                GameLayer::Default,
                GameLayer::Wall,
                GameLayer::Character,
                GameLayer::Projectile,
            ],
        ),
        LockedAxes::ROTATION_LOCKED,
        GravityScale(0.0),
        LinearVelocity::default(),
        CollidingEntities::default(),
    ));

    if let Some(health) = &def.health {
        entity.insert(health.build());
    }

    debug!("spawned character '{}' at {:?}", def.id, position);
    entity.id()
}
