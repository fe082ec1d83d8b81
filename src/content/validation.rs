//! Validation for tuning values and capability combinations in presets.

use super::data::*;
use super::registry::CharacterRegistry;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub character_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Character '{}' has invalid '{}': {}",
            self.character_id, self.field, self.message
        )
    }
}

/// Helper macro for checking a condition on one field
macro_rules! check {
    ($errors:expr, $id:expr, $field:expr, $ok:expr, $($message:tt)+) => {
        if !$ok {
            $errors.push(ValidationError {
                character_id: $id.to_string(),
                field: $field,
                message: format!($($message)+),
            });
        }
    };
}

/// Validate every preset in the registry.
/// Returns a list of validation errors, empty if all presets are usable.
pub fn validate_characters(registry: &CharacterRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for def in registry.iter() {
        validate_character(def, &mut errors);
    }
    errors
}

fn validate_character(def: &CharacterDef, errors: &mut Vec<ValidationError>) {
    let id = &def.id;
    check!(errors, id, "tag", !def.tag.is_empty(), "tag must not be empty");
    check!(errors, id, "size", def.size > 0.0, "{} must be positive", def.size);

    match &def.movement {
        MovementDef::Continuous(movement) => {
            check!(
                errors,
                id,
                "movement.max_speed",
                movement.max_speed > 0.0,
                "{} must be positive",
                movement.max_speed
            );
            check!(
                errors,
                id,
                "movement.time_to_max_speed",
                movement.time_to_max_speed >= 0.0,
                "{} must not be negative",
                movement.time_to_max_speed
            );
            check!(
                errors,
                id,
                "movement.time_to_full_stop",
                movement.time_to_full_stop >= 0.0,
                "{} must not be negative",
                movement.time_to_full_stop
            );
        }
        MovementDef::Tile(movement) => {
            check!(
                errors,
                id,
                "movement.tile_size",
                movement.tile_size > 0.0,
                "{} must be positive",
                movement.tile_size
            );
            check!(
                errors,
                id,
                "movement.seconds_per_tile",
                movement.seconds_per_tile >= 0.0,
                "{} must not be negative",
                movement.seconds_per_tile
            );
        }
    }

    if let Some(melee) = &def.melee {
        check!(errors, id, "melee.radius", melee.radius > 0.0, "{} must be positive", melee.radius);
        check!(errors, id, "melee.cooldown", melee.cooldown >= 0.0, "{} must not be negative", melee.cooldown);
        check!(errors, id, "melee.damage", melee.damage >= 0.0, "{} must not be negative", melee.damage);
        check!(
            errors,
            id,
            "melee.thorns_damage",
            melee.thorns_damage >= 0.0,
            "{} must not be negative",
            melee.thorns_damage
        );
    }

    if let Some(ranged) = &def.ranged {
        check!(errors, id, "ranged.cooldown", ranged.cooldown >= 0.0, "{} must not be negative", ranged.cooldown);
        check!(
            errors,
            id,
            "ranged.projectile.speed",
            ranged.projectile.speed > 0.0,
            "{} must be positive",
            ranged.projectile.speed
        );
        check!(
            errors,
            id,
            "ranged.projectile.radius",
            ranged.projectile.radius > 0.0,
            "{} must be positive",
            ranged.projectile.radius
        );
        if let Some(expire_time) = ranged.projectile.expire_time {
            check!(
                errors,
                id,
                "ranged.projectile.expire_time",
                expire_time > 0.0,
                "{} must be positive",
                expire_time
            );
        }
    }

    if let Some(health) = &def.health {
        check!(errors, id, "health.hp", health.hp > 0.0, "{} must be positive", health.hp);
        check!(
            errors,
            id,
            "health.grace_period",
            health.grace_period >= 0.0,
            "{} must not be negative",
            health.grace_period
        );
        if let Some(cap) = health.heal_cap {
            check!(errors, id, "health.heal_cap", cap >= health.hp, "{} is below starting hp {}", cap, health.hp);
        }
    }

    match &def.behaviour {
        BehaviourDef::Scripted { probe_radius, .. } => {
            check!(
                errors,
                id,
                "behaviour",
                matches!(def.movement, MovementDef::Continuous(_)),
                "scripted behaviour needs continuous movement"
            );
            check!(errors, id, "behaviour", def.ranged.is_some(), "scripted behaviour needs a ranged attack");
            if let Some(radius) = probe_radius {
                check!(errors, id, "behaviour.probe_radius", *radius > 0.0, "{} must be positive", radius);
            }
        }
        BehaviourDef::Zelda => {
            check!(
                errors,
                id,
                "behaviour",
                def.melee.is_some() && def.ranged.is_some(),
                "zelda behaviour needs melee and ranged attacks"
            );
            check!(errors, id, "health", def.health.is_some(), "zelda behaviour needs health");
        }
        BehaviourDef::UserInput | BehaviourDef::Idle => {}
    }
}
