//! Combat domain: cooldown and ammo gated projectile firing.

use bevy::prelude::*;

use crate::projectile::{ProjectileConfig, ProjectileSpawn};

#[derive(Debug, Clone)]
pub struct RangedAttack {
    cooldown: f32,
    last_attack_time: Option<f32>,
    pub limited_ammo: bool,
    ammo: u32,
    pub projectile: ProjectileConfig,
}

impl Default for RangedAttack {
    fn default() -> Self {
        Self {
            cooldown: 0.5,
            last_attack_time: None,
            limited_ammo: false,
            ammo: 0,
            projectile: ProjectileConfig::default(),
        }
    }
}

impl RangedAttack {
    pub fn new(projectile: ProjectileConfig) -> Self {
        Self {
            projectile,
            ..default()
        }
    }

    pub fn with_ammo(mut self, ammo: u32) -> Self {
        self.limited_ammo = true;
        self.ammo = ammo;
        self
    }

    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.set_cooldown(cooldown);
        self
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Changing the cooldown makes the attack ready again.
    pub fn set_cooldown(&mut self, cooldown: f32) {
        self.cooldown = cooldown.max(0.0);
        self.last_attack_time = None;
    }

    pub fn speed_multiplier(&self) -> f32 {
        if self.cooldown > 0.0 {
            1.0 / self.cooldown
        } else {
            1.0
        }
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn add_ammo(&mut self, amount: u32) {
        self.ammo = self.ammo.saturating_add(amount);
    }

    pub fn can_fire(&self, now: f32) -> bool {
        let cooled = self
            .last_attack_time
            .is_none_or(|last| now >= last + self.cooldown);
        cooled && (!self.limited_ammo || self.ammo > 0)
    }

    /// Fires from `origin` along `direction`. A zero direction fires along +X.
    pub fn fire(
        &mut self,
        now: f32,
        origin: Vec2,
        direction: Vec2,
        owner_tag: Option<&str>,
    ) -> Option<ProjectileSpawn> {
        if !self.can_fire(now) {
            return None;
        }
        if self.limited_ammo {
            self.ammo -= 1;
        }
        self.last_attack_time = Some(now);

        let direction = direction.try_normalize().unwrap_or(Vec2::X);
        debug!("fired along {:?}, ammo left {}", direction, self.ammo);
        Some(ProjectileSpawn {
            origin,
            direction,
            owner_tag: owner_tag.map(str::to_owned),
            fired_at: now,
            config: self.projectile.clone(),
        })
    }
}
