//! Turns preset definitions into live components.

use crate::behaviours::{ScriptedBehaviour, UserInputBehaviour, ZeldaBehaviour};
use crate::character::{CharacterBehaviour, CharacterController};
use crate::combat::{MeleeAttack, RangedAttack};
use crate::content::data::*;
use crate::health::Health;
use crate::movement::{ContinuousMovement, Movement, TileMovement};

impl MovementDef {
    pub fn build(&self) -> Movement {
        match self {
            MovementDef::Continuous(def) => {
                let mut movement = Movement::continuous(
                    ContinuousMovement::new(def.max_speed)
                        .with_ramps(def.time_to_max_speed, def.time_to_full_stop),
                    def.diagonal_allowed,
                    def.tie_break,
                );
                movement.input.prefer_horizontal = def.prefer_horizontal;
                movement
            }
            MovementDef::Tile(def) => {
                Movement::tile(TileMovement::new(def.tile_size, def.seconds_per_tile))
            }
        }
    }
}

impl MeleeDef {
    pub fn build(&self) -> MeleeAttack {
        MeleeAttack {
            damage: self.damage,
            radius: self.radius,
            thorns_damage: self.thorns_damage,
            freeze_on_attack: self.freeze_on_attack,
            ..MeleeAttack::default()
        }
        .with_cooldown(self.cooldown)
    }
}

impl RangedDef {
    pub fn build(&self) -> RangedAttack {
        let ranged = RangedAttack::new(self.projectile.clone()).with_cooldown(self.cooldown);
        match self.ammo {
            Some(ammo) => ranged.with_ammo(ammo),
            None => ranged,
        }
    }
}

impl HealthDef {
    pub fn build(&self) -> Health {
        let health = Health::new(self.hp)
            .with_grace_period(self.grace_period)
            .with_flash_count(self.flash_count)
            .with_whitelist(self.whitelist.iter().cloned());
        match self.heal_cap {
            Some(cap) => health.with_heal_cap(cap),
            None => health,
        }
    }
}

impl BehaviourDef {
    /// `body_size` sizes the scripted look-ahead probe when none is given.
    pub fn build(&self, body_size: f32) -> Option<Box<dyn CharacterBehaviour>> {
        match self {
            BehaviourDef::UserInput => Some(Box::new(UserInputBehaviour::new())),
            BehaviourDef::Zelda => Some(Box::new(ZeldaBehaviour::new())),
            BehaviourDef::Scripted {
                seed,
                probe_radius,
                ignore_tag,
            } => {
                let scripted = match seed {
                    Some(seed) => ScriptedBehaviour::seeded(*seed),
                    None => ScriptedBehaviour::new(),
                };
                Some(Box::new(
                    scripted
                        .with_probe_radius(probe_radius.unwrap_or(body_size * 0.5))
                        .with_ignore_tag(ignore_tag.as_str()),
                ))
            }
            BehaviourDef::Idle => None,
        }
    }
}

impl CharacterDef {
    /// Controller with every capability the preset lists. The behaviour is
    /// attached last so it sees the finished controller.
    pub fn build_controller(&self) -> CharacterController {
        let mut controller = CharacterController::new(self.movement.build());
        controller.melee = self.melee.as_ref().map(MeleeDef::build);
        controller.ranged = self.ranged.as_ref().map(RangedDef::build);
        if let Some(behaviour) = self.behaviour.build(self.size) {
            controller.set_behaviour(behaviour);
        }
        controller
    }
}
