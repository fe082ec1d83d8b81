//! Behaviours domain: sword control that throws a beam only at full health.

use bevy::prelude::*;

use crate::behaviours::move_from_held_keys;
use crate::character::{CharacterBehaviour, CharacterContext, CharacterController};
use crate::services::InputKey;

/// Holding the melee key swings the sword and, while health is full, also
/// fires a projectile. Movement prefers the horizontal axis.
#[derive(Debug, Default)]
pub struct ZeldaBehaviour {
    configured: bool,
    disabled: bool,
}

impl ZeldaBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl CharacterBehaviour for ZeldaBehaviour {
    fn name(&self) -> &str {
        "zelda"
    }

    fn on_attach(&mut self, controller: &CharacterController) {
        self.configured = false;
        self.disabled = controller.melee.is_none() || controller.ranged.is_none();
        if self.disabled {
            warn!("zelda behaviour needs both melee and ranged attacks, disabling");
        }
    }

    fn update(&mut self, ctx: &mut CharacterContext<'_, '_>) {
        if self.disabled {
            return;
        }
        if !self.configured {
            ctx.set_prefer_horizontal(true);
            self.configured = true;
        }

        move_from_held_keys(ctx);

        if ctx.input().held(InputKey::Melee) {
            let direction = ctx.direction();
            let full_health = ctx
                .health()
                .is_some_and(|health| health.hp() >= health.max_hp());
            if full_health {
                ctx.fire(direction);
            }
            ctx.melee_attack(direction, None);
        }
    }
}
