//! Combat domain: cooldown-gated radius attacks and passive thorns.

use bevy::prelude::*;

use crate::health::{AttackInfo, Health};
use crate::services::CollisionQuery;

#[derive(Debug, Clone)]
pub struct MeleeAttack {
    pub damage: f32,
    pub radius: f32,
    pub(crate) cooldown: f32,
    /// Damage dealt to anything touching this character, every contact frame.
    pub thorns_damage: f32,
    /// Suppress movement until the cooldown of the last swing has elapsed.
    pub freeze_on_attack: bool,
    pub(crate) last_attack_time: Option<f32>,
}

impl Default for MeleeAttack {
    fn default() -> Self {
        Self {
            damage: 1.0,
            radius: 0.5,
            cooldown: 0.5,
            thorns_damage: 0.0,
            freeze_on_attack: false,
            last_attack_time: None,
        }
    }
}

impl MeleeAttack {
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Changing the cooldown makes the attack ready again.
    pub fn set_cooldown(&mut self, cooldown: f32) {
        self.cooldown = cooldown.max(0.0);
        self.last_attack_time = None;
    }

    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.set_cooldown(cooldown);
        self
    }

    /// Playback rate for the swing animation.
    pub fn speed_multiplier(&self) -> f32 {
        if self.cooldown > 0.0 {
            1.0 / self.cooldown
        } else {
            1.0
        }
    }

    pub fn can_attack(&self, now: f32) -> bool {
        self.last_attack_time
            .is_none_or(|last| now >= last + self.cooldown)
    }

    /// Whether a swing's cooldown is still running and the swing pins its
    /// owner in place.
    pub fn is_freezing(&self, now: f32) -> bool {
        self.freeze_on_attack && !self.can_attack(now)
    }

    /// Swings towards `direction`, returning everything overlapping the strike
    /// circle except the attacker, or `None` while cooling down.
    pub fn attack<C: CollisionQuery + ?Sized>(
        &mut self,
        now: f32,
        attacker: Entity,
        origin: Vec2,
        direction: Vec2,
        collision: &C,
    ) -> Option<Vec<Entity>> {
        if !self.can_attack(now) {
            return None;
        }
        self.last_attack_time = Some(now);

        let center = origin + direction.normalize_or_zero() * self.radius;
        let mut targets = collision.overlap_circle(center, self.radius);
        targets.retain(|&target| target != attacker);
        debug!(
            "melee swing at {:?} r={} hit {} collider(s)",
            center,
            self.radius,
            targets.len()
        );
        Some(targets)
    }

    /// Passive contact damage, independent of the swing cooldown. The victim's
    /// grace period limits how often it lands.
    pub fn apply_thorns(&self, now: f32, attacker_tag: Option<&str>, victim: &mut Health) -> bool {
        if self.thorns_damage <= 0.0 {
            return false;
        }
        victim.take_damage(now, self.thorns_damage, attacker_tag, None)
    }
}

/// A landed swing waiting to be applied to each target's health.
#[derive(Debug, Clone)]
pub struct MeleeStrike {
    pub attacker: Entity,
    pub attacker_tag: Option<String>,
    pub damage: f32,
    pub targets: Vec<Entity>,
    pub info: Option<AttackInfo>,
}

impl MeleeStrike {
    pub fn apply_to(&self, now: f32, health: &mut Health) -> bool {
        health.take_damage(
            now,
            self.damage,
            self.attacker_tag.as_deref(),
            self.info.as_ref(),
        )
    }
}
