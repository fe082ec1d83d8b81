//! Character domain: the controller aggregate and identity tag.

use std::fmt;

use bevy::prelude::*;

use crate::character::behaviour::{CharacterBehaviour, CharacterContext, CharacterEnv};
use crate::combat::{MeleeAttack, MeleeStrike, RangedAttack};
use crate::movement::Movement;
use crate::services::{AnimParam, AnimationSink};

/// Identity used by damage whitelists and scripted probes.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One character: movement, optional attacks, and the behaviour driving them.
/// Health lives in its own component so anything can be damaged.
#[derive(Component)]
pub struct CharacterController {
    pub movement: Movement,
    pub melee: Option<MeleeAttack>,
    pub ranged: Option<RangedAttack>,
    pub handle_animation_events: bool,
    behaviour: Option<Box<dyn CharacterBehaviour>>,
}

impl fmt::Debug for CharacterController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterController")
            .field("movement", &self.movement)
            .field("melee", &self.melee)
            .field("ranged", &self.ranged)
            .field("behaviour", &self.behaviour_name())
            .finish()
    }
}

impl CharacterController {
    pub fn new(movement: Movement) -> Self {
        Self {
            movement,
            melee: None,
            ranged: None,
            handle_animation_events: true,
            behaviour: None,
        }
    }

    pub fn with_melee(mut self, melee: MeleeAttack) -> Self {
        self.melee = Some(melee);
        self
    }

    pub fn with_ranged(mut self, ranged: RangedAttack) -> Self {
        self.ranged = Some(ranged);
        self
    }

    pub fn with_behaviour(mut self, behaviour: Box<dyn CharacterBehaviour>) -> Self {
        self.set_behaviour(behaviour);
        self
    }

    pub fn without_animation_events(mut self) -> Self {
        self.handle_animation_events = false;
        self
    }

    pub fn behaviour(&self) -> Option<&dyn CharacterBehaviour> {
        self.behaviour.as_deref()
    }

    pub fn behaviour_name(&self) -> Option<&str> {
        self.behaviour.as_deref().map(|behaviour| behaviour.name())
    }

    /// Detaches the current behaviour, attaches `behaviour`, and hands back the
    /// old one.
    pub fn set_behaviour(
        &mut self,
        mut behaviour: Box<dyn CharacterBehaviour>,
    ) -> Option<Box<dyn CharacterBehaviour>> {
        let previous = self.clear_behaviour();
        behaviour.on_attach(self);
        info!(
            "behaviour '{}' attached (was {:?})",
            behaviour.name(),
            previous.as_deref().map(|old| old.name())
        );
        self.behaviour = Some(behaviour);
        previous
    }

    pub fn clear_behaviour(&mut self) -> Option<Box<dyn CharacterBehaviour>> {
        let mut previous = self.behaviour.take();
        if let Some(old) = previous.as_mut() {
            old.on_detach();
        }
        previous
    }

    /// Movement is suppressed while a freezing melee swing cools down.
    pub fn is_frozen(&self, now: f32) -> bool {
        self.melee.as_ref().is_some_and(|melee| melee.is_freezing(now))
    }

    pub fn speed(&self) -> f32 {
        self.movement.speed()
    }

    pub fn set_melee_cooldown(&mut self, cooldown: f32, animation: &mut dyn AnimationSink) {
        let Some(melee) = self.melee.as_mut() else {
            return;
        };
        melee.set_cooldown(cooldown);
        if self.handle_animation_events {
            animation.set_float(AnimParam::MeleeSpeedMultiplier, melee.speed_multiplier());
        }
    }

    pub fn set_ranged_cooldown(&mut self, cooldown: f32, animation: &mut dyn AnimationSink) {
        let Some(ranged) = self.ranged.as_mut() else {
            return;
        };
        ranged.set_cooldown(cooldown);
        if self.handle_animation_events {
            animation.set_float(AnimParam::RangedSpeedMultiplier, ranged.speed_multiplier());
        }
    }

    /// Facing, zero speed and attack playback rates, emitted once on spawn.
    pub fn emit_initial_animation(&self, animation: &mut dyn AnimationSink) {
        if !self.handle_animation_events {
            return;
        }
        self.movement.emit_initial_animation(animation);
        if let Some(melee) = &self.melee {
            animation.set_float(AnimParam::MeleeSpeedMultiplier, melee.speed_multiplier());
        }
        if let Some(ranged) = &self.ranged {
            animation.set_float(AnimParam::RangedSpeedMultiplier, ranged.speed_multiplier());
        }
    }

    /// Runs the behaviour for one tick and returns the melee strikes it made.
    /// A replacement requested during the update is installed afterwards.
    pub fn update_behaviour(&mut self, env: CharacterEnv<'_>) -> Vec<MeleeStrike> {
        let Some(mut behaviour) = self.behaviour.take() else {
            return Vec::new();
        };

        let mut ctx = CharacterContext::new(self, env);
        behaviour.update(&mut ctx);
        let (strikes, replacement) = ctx.finish();

        self.behaviour = Some(behaviour);
        if let Some(next) = replacement {
            self.set_behaviour(next);
        }
        strikes
    }
}
