//! Projectile domain: flight state and contact resolution.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::health::Health;

/// What happens when a projectile reaches something with health that refuses
/// the hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum ContactPolicy {
    #[default]
    DestroyOnContact,
    PassThroughOnRefusal,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub damage: f32,
    /// Seconds before self-destruct. `None` flies until it hits something.
    pub expire_time: Option<f32>,
    pub radius: f32,
    pub policy: ContactPolicy,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 12.0,
            damage: 1.0,
            expire_time: Some(5.0),
            radius: 0.15,
            policy: ContactPolicy::DestroyOnContact,
        }
    }
}

/// Everything needed to put a freshly fired projectile into the world.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSpawn {
    pub origin: Vec2,
    /// Unit length.
    pub direction: Vec2,
    pub owner_tag: Option<String>,
    pub fired_at: f32,
    pub config: ProjectileConfig,
}

impl ProjectileSpawn {
    pub fn rotation(&self) -> f32 {
        self.direction.y.atan2(self.direction.x)
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction * self.config.speed
    }

    pub fn to_projectile(&self) -> Projectile {
        Projectile {
            velocity: self.velocity(),
            damage: self.config.damage,
            owner_tag: self.owner_tag.clone(),
            spawned_at: self.fired_at,
            expire_time: self.config.expire_time,
            policy: self.config.policy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Damage applied.
    Hit,
    /// Target refused the damage and the projectile is spent anyway.
    Absorbed,
    /// Target refused the damage and the projectile keeps flying.
    PassThrough,
    /// Struck something without health.
    Obstacle,
}

impl ContactOutcome {
    pub fn destroys_projectile(self) -> bool {
        !matches!(self, ContactOutcome::PassThrough)
    }
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub velocity: Vec2,
    pub damage: f32,
    pub owner_tag: Option<String>,
    pub spawned_at: f32,
    pub expire_time: Option<f32>,
    pub policy: ContactPolicy,
}

impl Projectile {
    pub fn is_expired(&self, now: f32) -> bool {
        self.expire_time
            .is_some_and(|lifetime| now >= self.spawned_at + lifetime)
    }

    pub fn resolve_contact(&self, now: f32, target: Option<&mut Health>) -> ContactOutcome {
        let Some(health) = target else {
            return ContactOutcome::Obstacle;
        };
        if health.take_damage(now, self.damage, self.owner_tag.as_deref(), None) {
            return ContactOutcome::Hit;
        }
        match self.policy {
            ContactPolicy::DestroyOnContact => ContactOutcome::Absorbed,
            ContactPolicy::PassThroughOnRefusal => ContactOutcome::PassThrough,
        }
    }
}
