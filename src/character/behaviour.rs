//! Character domain: the pluggable behaviour contract and the capability
//! surface a behaviour drives its character through.

use bevy::prelude::*;

use crate::character::CharacterController;
use crate::combat::MeleeStrike;
use crate::health::{AttackInfo, Health};
use crate::input::Axis;
use crate::services::{AnimTrigger, AnimationSink, InputSource, WorldServices};

/// Drives one character once per tick.
pub trait CharacterBehaviour: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Called when the behaviour is installed on `controller`.
    fn on_attach(&mut self, _controller: &CharacterController) {}

    fn on_detach(&mut self) {}

    /// Radius of the look-ahead circles this behaviour probes with, if it probes.
    fn probe_radius(&self) -> Option<f32> {
        None
    }

    fn update(&mut self, ctx: &mut CharacterContext<'_, '_>);
}

/// World-facing state for one character's tick.
pub struct CharacterEnv<'e> {
    pub entity: Entity,
    pub tag: Option<&'e str>,
    pub now: f32,
    pub position: Vec2,
    pub health: Option<&'e Health>,
    pub world: &'e mut dyn WorldServices,
    pub animation: &'e mut dyn AnimationSink,
    pub input: &'e dyn InputSource,
}

pub struct CharacterContext<'c, 'e> {
    controller: &'c mut CharacterController,
    env: CharacterEnv<'e>,
    strikes: Vec<MeleeStrike>,
    replacement: Option<Box<dyn CharacterBehaviour>>,
}

impl<'c, 'e> CharacterContext<'c, 'e> {
    pub(crate) fn new(controller: &'c mut CharacterController, env: CharacterEnv<'e>) -> Self {
        Self {
            controller,
            env,
            strikes: Vec::new(),
            replacement: None,
        }
    }

    pub(crate) fn finish(self) -> (Vec<MeleeStrike>, Option<Box<dyn CharacterBehaviour>>) {
        (self.strikes, self.replacement)
    }

    pub fn entity(&self) -> Entity {
        self.env.entity
    }

    pub fn tag(&self) -> Option<&'e str> {
        self.env.tag
    }

    pub fn now(&self) -> f32 {
        self.env.now
    }

    pub fn position(&self) -> Vec2 {
        self.env.position
    }

    pub fn input(&self) -> &'e dyn InputSource {
        self.env.input
    }

    pub fn health(&self) -> Option<&'e Health> {
        self.env.health
    }

    pub fn controller(&self) -> &CharacterController {
        &*self.controller
    }

    // ---- movement ----

    pub fn move_left(&mut self, persistent: bool) {
        self.controller.movement.input.move_left(persistent);
    }

    pub fn move_right(&mut self, persistent: bool) {
        self.controller.movement.input.move_right(persistent);
    }

    pub fn move_up(&mut self, persistent: bool) {
        self.controller.movement.input.move_up(persistent);
    }

    pub fn move_down(&mut self, persistent: bool) {
        self.controller.movement.input.move_down(persistent);
    }

    pub fn clear_persistent_input(&mut self) {
        self.controller.movement.input.clear_persistent_input();
    }

    pub fn set_prefer_horizontal(&mut self, prefer: bool) {
        self.controller.movement.input.prefer_horizontal = prefer;
    }

    pub fn note_key_down(&mut self, axis: Axis) {
        self.controller.movement.input.note_key_down(axis);
    }

    pub fn direction(&self) -> Vec2 {
        self.controller.movement.direction()
    }

    pub fn speed(&self) -> f32 {
        self.controller.movement.speed()
    }

    /// Max speed of continuous movement; `None` for tile stepping.
    pub fn max_speed(&self) -> Option<f32> {
        self.controller
            .movement
            .as_continuous()
            .map(|movement| movement.max_speed())
    }

    // ---- combat ----

    pub fn has_melee(&self) -> bool {
        self.controller.melee.is_some()
    }

    pub fn has_ranged(&self) -> bool {
        self.controller.ranged.is_some()
    }

    pub fn can_attack(&self) -> bool {
        self.controller
            .melee
            .as_ref()
            .is_some_and(|melee| melee.can_attack(self.env.now))
    }

    pub fn ammo(&self) -> Option<u32> {
        self.controller
            .ranged
            .as_ref()
            .filter(|ranged| ranged.limited_ammo)
            .map(|ranged| ranged.ammo())
    }

    /// Swings the melee attack. Damage lands on every overlapping health before
    /// the next character updates.
    pub fn melee_attack(&mut self, direction: Vec2, info: Option<AttackInfo>) -> bool {
        let now = self.env.now;
        let Some(melee) = self.controller.melee.as_mut() else {
            return false;
        };
        let Some(targets) = melee.attack(
            now,
            self.env.entity,
            self.env.position,
            direction,
            &*self.env.world,
        ) else {
            return false;
        };

        let damage = melee.damage;
        let freeze = melee.freeze_on_attack;
        self.strikes.push(MeleeStrike {
            attacker: self.env.entity,
            attacker_tag: self.env.tag.map(str::to_owned),
            damage,
            targets,
            info,
        });

        if freeze {
            self.controller.movement.halt();
        }
        if self.controller.handle_animation_events {
            self.env.animation.trigger(AnimTrigger::MeleeAttack);
        }
        true
    }

    /// Fires the ranged attack, returning the spawned projectile.
    pub fn fire(&mut self, direction: Vec2) -> Option<Entity> {
        let ranged = self.controller.ranged.as_mut()?;
        let spawn = ranged.fire(self.env.now, self.env.position, direction, self.env.tag)?;

        let projectile = self.env.world.spawn_projectile(&spawn);
        self.env
            .world
            .ignore_collision_pair(projectile, self.env.entity);
        if self.controller.handle_animation_events {
            self.env.animation.trigger(AnimTrigger::RangedAttack);
        }
        Some(projectile)
    }

    // ---- world ----

    /// Everything overlapping a circle, excluding this character.
    pub fn overlap_circle(&self, center: Vec2, radius: f32) -> Vec<Entity> {
        let mut hits = self.env.world.overlap_circle(center, radius);
        hits.retain(|&hit| hit != self.env.entity);
        hits
    }

    pub fn tag_of(&self, entity: Entity) -> Option<&str> {
        self.env.world.tag_of(entity)
    }

    /// Replaces the running behaviour once the current update returns.
    pub fn set_behaviour(&mut self, behaviour: Box<dyn CharacterBehaviour>) {
        self.replacement = Some(behaviour);
    }
}
