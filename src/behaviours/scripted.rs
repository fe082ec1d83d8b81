//! Behaviours domain: timer-driven random walk with opportunistic fire.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::character::{CharacterBehaviour, CharacterContext, CharacterController};

/// Seconds between decisions.
pub const ACTION_INTERVAL: f32 = 1.0;
/// Seconds without a shot after which the next decision always fires.
pub const MAX_FIRE_INTERVAL: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Left,
    Right,
    Up,
    Down,
}

impl Step {
    const ALL: [Step; 4] = [Step::Left, Step::Right, Step::Up, Step::Down];

    fn vector(self) -> Vec2 {
        match self {
            Step::Left => Vec2::NEG_X,
            Step::Right => Vec2::X,
            Step::Up => Vec2::Y,
            Step::Down => Vec2::NEG_Y,
        }
    }

    fn latch(self, ctx: &mut CharacterContext<'_, '_>) {
        match self {
            Step::Left => ctx.move_left(true),
            Step::Right => ctx.move_right(true),
            Step::Up => ctx.move_up(true),
            Step::Down => ctx.move_down(true),
        }
    }
}

/// Once per [`ACTION_INTERVAL`] the character either stops or latches a walk in
/// a direction whose path looks clear, then maybe fires along its facing. The
/// longer since the last shot, the likelier the next one.
///
/// Needs continuous movement and a ranged attack; without them it disables
/// itself on attach.
#[derive(Debug)]
pub struct ScriptedBehaviour {
    rng: ChaCha8Rng,
    /// Radius of the look-ahead probe, normally half the character's width.
    pub probe_radius: f32,
    /// Entities with this tag never block a walk.
    pub ignore_tag: String,
    last_action_time: Option<f32>,
    last_fire_time: Option<f32>,
    disabled: bool,
}

impl Default for ScriptedBehaviour {
    fn default() -> Self {
        Self::seeded(rand::random::<u64>())
    }
}

impl ScriptedBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic decisions for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            probe_radius: 0.5,
            ignore_tag: "Player".to_string(),
            last_action_time: None,
            last_fire_time: None,
            disabled: false,
        }
    }

    pub fn with_probe_radius(mut self, radius: f32) -> Self {
        self.probe_radius = radius;
        self
    }

    pub fn with_ignore_tag(mut self, tag: impl Into<String>) -> Self {
        self.ignore_tag = tag.into();
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn is_blocked(&self, ctx: &CharacterContext<'_, '_>, step: Step, reach: f32) -> bool {
        let probe = ctx.position() + step.vector() * reach;
        ctx.overlap_circle(probe, self.probe_radius)
            .into_iter()
            .any(|hit| ctx.tag_of(hit) != Some(self.ignore_tag.as_str()))
    }

    fn perform_random_action(&mut self, ctx: &mut CharacterContext<'_, '_>) {
        let Some(max_speed) = ctx.max_speed() else {
            return;
        };
        let reach = ACTION_INTERVAL * max_speed;

        let mut choices = vec![None];
        choices.extend(
            Step::ALL
                .into_iter()
                .filter(|&step| !self.is_blocked(ctx, step, reach))
                .map(Some),
        );

        let choice = choices[self.rng.random_range(0..choices.len())];
        if let Some(step) = choice {
            step.latch(ctx);
        }
        debug!("{:?} scripted action {:?}", ctx.entity(), choice);
    }

    fn possibly_fire(&mut self, ctx: &mut CharacterContext<'_, '_>) {
        let now = ctx.now();
        let since_last_shot = now - self.last_fire_time.unwrap_or(0.0);
        let chance = (MAX_FIRE_INTERVAL - since_last_shot).max(0.0) as u32;

        if chance <= 1 || self.rng.random_range(0..chance) == 0 {
            self.last_fire_time = Some(now);
            let direction = ctx.direction();
            ctx.fire(direction);
        }
    }
}

impl CharacterBehaviour for ScriptedBehaviour {
    fn name(&self) -> &str {
        "scripted"
    }

    fn probe_radius(&self) -> Option<f32> {
        Some(self.probe_radius)
    }

    fn on_attach(&mut self, controller: &CharacterController) {
        self.last_action_time = None;
        self.disabled = controller.movement.as_continuous().is_none() || controller.ranged.is_none();
        if self.disabled {
            warn!("scripted behaviour needs continuous movement and a ranged attack, disabling");
        }
    }

    fn update(&mut self, ctx: &mut CharacterContext<'_, '_>) {
        if self.disabled {
            return;
        }
        let now = ctx.now();
        if self
            .last_action_time
            .is_some_and(|last| now < last + ACTION_INTERVAL)
        {
            return;
        }
        self.last_action_time = Some(now);

        ctx.clear_persistent_input();
        self.perform_random_action(ctx);
        self.possibly_fire(ctx);
    }
}
