//! Services domain: avian-backed collision queries and entity lifecycle.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::{CollisionQuery, EntityLifecycle};
use crate::character::Tag;
use crate::projectile::ProjectileSpawn;

/// Entities whose contacts this entity ignores.
#[derive(Component, Debug, Default, Clone)]
pub struct IgnoredContacts(pub Vec<Entity>);

impl IgnoredContacts {
    pub fn contains(&self, entity: Entity) -> bool {
        self.0.contains(&entity)
    }
}

#[derive(SystemParam)]
pub struct PhysicsWorld<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
    tags: Query<'w, 's, &'static Tag>,
    commands: Commands<'w, 's>,
}

impl<'w, 's> PhysicsWorld<'w, 's> {
    /// View of the world as seen by `owner`: its own collider never shows up in
    /// overlap results.
    pub fn scoped(&mut self, owner: Entity) -> ScopedWorld<'_, 'w, 's> {
        ScopedWorld { world: self, owner }
    }
}

pub struct ScopedWorld<'a, 'w, 's> {
    world: &'a mut PhysicsWorld<'w, 's>,
    owner: Entity,
}

impl ScopedWorld<'_, '_, '_> {
    fn intersections(&self, shape: &Collider, center: Vec2) -> Vec<Entity> {
        let filter = SpatialQueryFilter::from_excluded_entities([self.owner]);
        self.world
            .spatial
            .shape_intersections(shape, center, 0.0, &filter)
    }
}

impl CollisionQuery for ScopedWorld<'_, '_, '_> {
    fn overlap_circle(&self, center: Vec2, radius: f32) -> Vec<Entity> {
        if radius <= 0.0 {
            return Vec::new();
        }
        self.intersections(&Collider::circle(radius), center)
    }

    fn overlap_box(&self, center: Vec2, size: Vec2) -> Vec<Entity> {
        if size.x <= 0.0 || size.y <= 0.0 {
            return Vec::new();
        }
        self.intersections(&Collider::rectangle(size.x, size.y), center)
    }

    fn ignore_collision_pair(&mut self, a: Entity, b: Entity) {
        self.world.commands.queue(move |world: &mut World| {
            let Ok(mut entity) = world.get_entity_mut(a) else {
                return;
            };
            if let Some(mut ignored) = entity.get_mut::<IgnoredContacts>() {
                ignored.0.push(b);
            } else {
                entity.insert(IgnoredContacts(vec![b]));
            }
        });
    }

    fn tag_of(&self, entity: Entity) -> Option<&str> {
        self.world.tags.get(entity).ok().map(|tag| tag.0.as_str())
    }
}

impl EntityLifecycle for ScopedWorld<'_, '_, '_> {
    fn spawn_projectile(&mut self, spawn: &ProjectileSpawn) -> Entity {
        self.world.commands.spawn_projectile(spawn)
    }

    fn destroy(&mut self, entity: Entity) {
        self.world.commands.destroy(entity);
    }
}
