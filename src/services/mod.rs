//! Services domain: narrow collaborator contracts consumed by the character core,
//! plus their bevy and avian adapters.
//!
//! The core never touches the ECS world directly. Movement, combat and behaviours
//! ask these traits for overlaps, spawn or destroy entities through them, and
//! push animation and visibility signals out through them.

mod animation;
mod keyboard;
mod physics;

#[cfg(test)]
pub(crate) mod testing;

pub use animation::{
    AnimParam, AnimTrigger, AnimationSink, AnimatorParams, NullAnimation, sink_or_null,
};
pub use keyboard::{InputKey, InputSource, KeyBindings, KeyboardSource, NoInput};
pub use physics::{IgnoredContacts, PhysicsWorld, ScopedWorld};

use bevy::prelude::*;

use crate::projectile::ProjectileSpawn;

/// Overlap queries against the collision world.
pub trait CollisionQuery {
    fn overlap_circle(&self, center: Vec2, radius: f32) -> Vec<Entity>;
    fn overlap_box(&self, center: Vec2, size: Vec2) -> Vec<Entity>;
    /// Stops `a` from reacting to contacts with `b`.
    fn ignore_collision_pair(&mut self, a: Entity, b: Entity);
    fn tag_of(&self, entity: Entity) -> Option<&str>;
}

/// Entity creation and removal.
pub trait EntityLifecycle {
    fn spawn_projectile(&mut self, spawn: &ProjectileSpawn) -> Entity;
    fn destroy(&mut self, entity: Entity);
}

/// Everything a character needs from the world during its update.
pub trait WorldServices: CollisionQuery + EntityLifecycle {}

impl<T: CollisionQuery + EntityLifecycle + ?Sized> WorldServices for T {}

/// Renderer-like object toggled by the grace-period flash.
pub trait VisibilitySink {
    fn set_visible(&mut self, visible: bool);
}

impl VisibilitySink for Visibility {
    fn set_visible(&mut self, visible: bool) {
        *self = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

impl EntityLifecycle for Commands<'_, '_> {
    fn spawn_projectile(&mut self, spawn: &ProjectileSpawn) -> Entity {
        self.spawn(crate::projectile::projectile_bundle(spawn)).id()
    }

    fn destroy(&mut self, entity: Entity) {
        self.entity(entity).despawn();
    }
}

pub struct ServicesPlugin;

impl Plugin for ServicesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .add_systems(Last, animation::clear_stale_triggers);
    }
}
