//! Services domain: animation signal sink.

use std::collections::HashMap;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimParam {
    DirectionHorizontal,
    DirectionVertical,
    Speed,
    MeleeSpeedMultiplier,
    RangedSpeedMultiplier,
}

impl AnimParam {
    pub fn name(self) -> &'static str {
        match self {
            AnimParam::DirectionHorizontal => "directionHorizontal",
            AnimParam::DirectionVertical => "directionVertical",
            AnimParam::Speed => "speed",
            AnimParam::MeleeSpeedMultiplier => "meleeSpeedMultiplier",
            AnimParam::RangedSpeedMultiplier => "rangedSpeedMultiplier",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimTrigger {
    MeleeAttack,
    RangedAttack,
}

impl AnimTrigger {
    pub fn name(self) -> &'static str {
        match self {
            AnimTrigger::MeleeAttack => "meleeAttack",
            AnimTrigger::RangedAttack => "rangedAttack",
        }
    }
}

pub trait AnimationSink {
    fn set_float(&mut self, param: AnimParam, value: f32);
    fn trigger(&mut self, trigger: AnimTrigger);
}

/// Discards every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAnimation;

impl AnimationSink for NullAnimation {
    fn set_float(&mut self, _param: AnimParam, _value: f32) {}

    fn trigger(&mut self, _trigger: AnimTrigger) {}
}

/// Latest animation parameters for one character, read by whatever drives
/// its sprite. Triggers queue until drained and are cleared at the end of
/// every frame.
#[derive(Component, Debug, Default, Clone)]
pub struct AnimatorParams {
    floats: HashMap<AnimParam, f32>,
    triggers: Vec<AnimTrigger>,
}

impl AnimatorParams {
    pub fn float(&self, param: AnimParam) -> Option<f32> {
        self.floats.get(&param).copied()
    }

    pub fn pending_triggers(&self) -> &[AnimTrigger] {
        &self.triggers
    }

    pub fn drain_triggers(&mut self) -> Vec<AnimTrigger> {
        std::mem::take(&mut self.triggers)
    }
}

impl AnimationSink for AnimatorParams {
    fn set_float(&mut self, param: AnimParam, value: f32) {
        self.floats.insert(param, value);
    }

    fn trigger(&mut self, trigger: AnimTrigger) {
        self.triggers.push(trigger);
    }
}

pub(crate) fn clear_stale_triggers(mut query: Query<&mut AnimatorParams>) {
    for mut params in &mut query {
        if !params.triggers.is_empty() {
            params.triggers.clear();
        }
    }
}

/// Picks the character's parameter store when it wants animation signals,
/// otherwise a sink that drops them.
pub fn sink_or_null<'a>(
    params: Option<&'a mut AnimatorParams>,
    enabled: bool,
    fallback: &'a mut NullAnimation,
) -> &'a mut dyn AnimationSink {
    match params {
        Some(params) if enabled => params,
        _ => fallback,
    }
}
