//! Input domain: frame and persistent intent channels with diagonal suppression.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// How the surviving axis is chosen when diagonal input is suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum TieBreak {
    /// `prefer_horizontal` only changes when set explicitly.
    Sticky,
    /// Every key-down edge moves the preference to the pressed axis.
    #[default]
    LastPressed,
}

#[derive(Debug, Clone, Default)]
pub struct InputAccumulator {
    frame: Vec2,
    persistent: Vec2,
    pub diagonal_allowed: bool,
    pub prefer_horizontal: bool,
    pub tie_break: TieBreak,
}

fn nudge(value: f32, delta: f32) -> f32 {
    (value + delta).clamp(-1.0, 1.0)
}

impl InputAccumulator {
    pub fn new(diagonal_allowed: bool, tie_break: TieBreak) -> Self {
        Self {
            diagonal_allowed,
            tie_break,
            ..default()
        }
    }

    fn channel(&mut self, persistent: bool) -> &mut Vec2 {
        if persistent {
            &mut self.persistent
        } else {
            &mut self.frame
        }
    }

    pub fn move_left(&mut self, persistent: bool) {
        let channel = self.channel(persistent);
        channel.x = nudge(channel.x, -1.0);
    }

    pub fn move_right(&mut self, persistent: bool) {
        let channel = self.channel(persistent);
        channel.x = nudge(channel.x, 1.0);
    }

    pub fn move_up(&mut self, persistent: bool) {
        let channel = self.channel(persistent);
        channel.y = nudge(channel.y, 1.0);
    }

    pub fn move_down(&mut self, persistent: bool) {
        let channel = self.channel(persistent);
        channel.y = nudge(channel.y, -1.0);
    }

    pub fn clear_persistent_input(&mut self) {
        self.persistent = Vec2::ZERO;
    }

    pub fn persistent(&self) -> Vec2 {
        self.persistent
    }

    /// Frame plus persistent input, clamped per axis, with one axis dropped when
    /// diagonals are disallowed.
    pub fn combined(&self) -> Vec2 {
        let mut input = (self.frame + self.persistent).clamp(Vec2::NEG_ONE, Vec2::ONE);

        if !self.diagonal_allowed && input.x != 0.0 && input.y != 0.0 {
            if self.prefer_horizontal {
                input.y = 0.0;
            } else {
                input.x = 0.0;
            }
        }

        input
    }

    /// Called by the movement engine once the tick's input has been consumed.
    pub fn reset_frame(&mut self) {
        self.frame = Vec2::ZERO;
    }

    /// Records a key-down edge on `axis`. Only the `LastPressed` policy reacts.
    pub fn note_key_down(&mut self, axis: Axis) {
        if self.diagonal_allowed || self.tie_break != TieBreak::LastPressed {
            return;
        }
        self.prefer_horizontal = axis == Axis::Horizontal;
    }
}
