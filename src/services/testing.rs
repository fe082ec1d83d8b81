//! In-memory collaborators for exercising the core without a physics world.

use std::collections::HashSet;

use bevy::prelude::*;

use super::{AnimatorParams, CollisionQuery, EntityLifecycle, InputKey, InputSource};
use crate::character::{CharacterController, CharacterEnv};
use crate::combat::MeleeStrike;
use crate::health::Health;
use crate::projectile::ProjectileSpawn;

pub(crate) struct FakeCollider {
    pub entity: Entity,
    pub center: Vec2,
    pub half_extents: Vec2,
    pub tag: Option<String>,
}

/// Axis-aligned boxes standing in for colliders, plus a record of lifecycle calls.
#[derive(Default)]
pub(crate) struct FakeWorld {
    allocator: World,
    pub colliders: Vec<FakeCollider>,
    pub spawned: Vec<(Entity, ProjectileSpawn)>,
    pub destroyed: Vec<Entity>,
    pub ignored: Vec<(Entity, Entity)>,
    pub owner: Option<Entity>,
}

impl FakeWorld {
    pub fn entity(&mut self) -> Entity {
        self.allocator.spawn_empty().id()
    }

    pub fn add_box(&mut self, center: Vec2, size: Vec2, tag: Option<&str>) -> Entity {
        let entity = self.entity();
        self.colliders.push(FakeCollider {
            entity,
            center,
            half_extents: size * 0.5,
            tag: tag.map(str::to_owned),
        });
        entity
    }

    fn visible(&self) -> impl Iterator<Item = &FakeCollider> {
        self.colliders
            .iter()
            .filter(move |collider| Some(collider.entity) != self.owner)
    }
}

impl CollisionQuery for FakeWorld {
    fn overlap_circle(&self, center: Vec2, radius: f32) -> Vec<Entity> {
        self.visible()
            .filter(|collider| {
                let min = collider.center - collider.half_extents;
                let max = collider.center + collider.half_extents;
                center.clamp(min, max).distance(center) < radius
            })
            .map(|collider| collider.entity)
            .collect()
    }

    fn overlap_box(&self, center: Vec2, size: Vec2) -> Vec<Entity> {
        let half = size * 0.5;
        self.visible()
            .filter(|collider| {
                let delta = (collider.center - center).abs();
                delta.x < collider.half_extents.x + half.x
                    && delta.y < collider.half_extents.y + half.y
            })
            .map(|collider| collider.entity)
            .collect()
    }

    fn ignore_collision_pair(&mut self, a: Entity, b: Entity) {
        self.ignored.push((a, b));
    }

    fn tag_of(&self, entity: Entity) -> Option<&str> {
        self.colliders
            .iter()
            .find(|collider| collider.entity == entity)
            .and_then(|collider| collider.tag.as_deref())
    }
}

impl EntityLifecycle for FakeWorld {
    fn spawn_projectile(&mut self, spawn: &ProjectileSpawn) -> Entity {
        let entity = self.entity();
        self.spawned.push((entity, spawn.clone()));
        entity
    }

    fn destroy(&mut self, entity: Entity) {
        self.destroyed.push(entity);
    }
}

/// Key state set directly by a test.
#[derive(Default)]
pub(crate) struct ScriptedKeys {
    pub held: HashSet<InputKey>,
    pub pressed: HashSet<InputKey>,
}

impl ScriptedKeys {
    pub fn hold(mut self, key: InputKey) -> Self {
        self.held.insert(key);
        self
    }

    pub fn press(mut self, key: InputKey) -> Self {
        self.held.insert(key);
        self.pressed.insert(key);
        self
    }
}

impl InputSource for ScriptedKeys {
    fn held(&self, key: InputKey) -> bool {
        self.held.contains(&key)
    }

    fn just_pressed(&self, key: InputKey) -> bool {
        self.pressed.contains(&key)
    }
}

/// One character's surroundings for driving `update_behaviour` by hand.
pub(crate) struct Rig {
    pub world: FakeWorld,
    pub anim: AnimatorParams,
    pub keys: ScriptedKeys,
    pub entity: Entity,
    pub tag: Option<String>,
    pub position: Vec2,
    pub health: Option<Health>,
}

impl Rig {
    /// A character tagged "Player" at the origin.
    pub fn new() -> Self {
        let mut world = FakeWorld::default();
        let entity = world.entity();
        world.owner = Some(entity);
        Self {
            world,
            anim: AnimatorParams::default(),
            keys: ScriptedKeys::default(),
            entity,
            tag: Some("Player".to_string()),
            position: Vec2::ZERO,
            health: None,
        }
    }

    pub fn tick(&mut self, controller: &mut CharacterController, now: f32) -> Vec<MeleeStrike> {
        controller.update_behaviour(CharacterEnv {
            entity: self.entity,
            tag: self.tag.as_deref(),
            now,
            position: self.position,
            health: self.health.as_ref(),
            world: &mut self.world,
            animation: &mut self.anim,
            input: &self.keys,
        })
    }
}
