//! Movement domain: continuous and tile-stepping locomotion state machines.

use bevy::prelude::*;

use crate::input::{InputAccumulator, TieBreak};
use crate::services::{AnimParam, AnimationSink, CollisionQuery};

/// Shrinks the tile footprint probe so neighbours sharing an edge don't block.
pub const TILE_MARGIN: f32 = 0.1;

/// What the owning entity should do with its body this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Velocity(Vec2),
    Teleport(Vec2),
    Stay,
}

#[derive(Debug, Clone)]
pub struct ContinuousMovement {
    max_speed: f32,
    time_to_max_speed: f32,
    time_to_full_stop: f32,
    velocity: Vec2,
}

impl Default for ContinuousMovement {
    fn default() -> Self {
        Self::new(5.0)
    }
}

fn non_negative(value: f32, name: &str) -> f32 {
    if value < 0.0 {
        warn!("{} was {}, treating it as 0 (instant)", name, value);
        0.0
    } else {
        value
    }
}

impl ContinuousMovement {
    pub fn new(max_speed: f32) -> Self {
        if max_speed <= 0.0 {
            warn!("max_speed {} is not positive, character will never move", max_speed);
        }
        Self {
            max_speed,
            time_to_max_speed: 0.0,
            time_to_full_stop: 0.0,
            velocity: Vec2::ZERO,
        }
    }

    pub fn with_ramps(mut self, time_to_max_speed: f32, time_to_full_stop: f32) -> Self {
        self.set_time_to_max_speed(time_to_max_speed);
        self.set_time_to_full_stop(time_to_full_stop);
        self
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed;
    }

    pub fn time_to_max_speed(&self) -> f32 {
        self.time_to_max_speed
    }

    pub fn set_time_to_max_speed(&mut self, seconds: f32) {
        self.time_to_max_speed = non_negative(seconds, "time_to_max_speed");
    }

    pub fn time_to_full_stop(&self) -> f32 {
        self.time_to_full_stop
    }

    pub fn set_time_to_full_stop(&mut self, seconds: f32) {
        self.time_to_full_stop = non_negative(seconds, "time_to_full_stop");
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Adopts the body's velocity after the physics step.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Advances velocity by one tick. `intent` is the unit direction to move in,
    /// or `None` when idle or frozen.
    pub fn step(&mut self, intent: Option<Vec2>, dt: f32) -> Vec2 {
        if self.max_speed <= 0.0 {
            self.velocity = Vec2::ZERO;
            return self.velocity;
        }

        match intent {
            Some(direction) if self.time_to_max_speed == 0.0 => {
                self.velocity = direction * self.max_speed;
            }
            Some(direction) => {
                let acceleration = self.max_speed / self.time_to_max_speed;
                self.velocity += direction * acceleration * dt;
                self.velocity = self.velocity.clamp_length_max(self.max_speed);
            }
            None if self.time_to_full_stop == 0.0 => {
                self.velocity = Vec2::ZERO;
            }
            None => {
                let deceleration = self.max_speed / self.time_to_full_stop;
                let speed = self.velocity.length();
                let drop = (deceleration * dt).min(speed);
                self.velocity -= self.velocity.normalize_or_zero() * drop;
            }
        }

        self.velocity
    }
}

#[derive(Debug, Clone)]
pub struct TileMovement {
    tile_size: f32,
    seconds_per_tile: f32,
    origin: Vec2,
    destination: Vec2,
    started_at: Option<f32>,
}

impl Default for TileMovement {
    fn default() -> Self {
        Self::new(1.0, 0.25)
    }
}

impl TileMovement {
    pub fn new(tile_size: f32, seconds_per_tile: f32) -> Self {
        if tile_size <= 0.0 {
            warn!("tile_size {} is not positive, character will never move", tile_size);
        }
        Self {
            tile_size,
            seconds_per_tile: non_negative(seconds_per_tile, "seconds_per_tile"),
            origin: Vec2::ZERO,
            destination: Vec2::ZERO,
            started_at: None,
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn seconds_per_tile(&self) -> f32 {
        self.seconds_per_tile
    }

    pub fn is_moving(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn destination(&self) -> Vec2 {
        self.destination
    }

    pub fn speed(&self) -> f32 {
        if self.is_moving() && self.seconds_per_tile > 0.0 {
            self.tile_size / self.seconds_per_tile
        } else {
            0.0
        }
    }

    /// Tries to begin a step towards `direction`. Returns false when the
    /// destination tile is occupied.
    fn try_start<C: CollisionQuery + ?Sized>(
        &mut self,
        now: f32,
        position: Vec2,
        direction: Vec2,
        collision: &C,
    ) -> bool {
        if self.tile_size <= 0.0 {
            return false;
        }
        let destination = position + direction * self.tile_size;
        let footprint = Vec2::splat((self.tile_size - TILE_MARGIN).max(0.0));
        if !collision.overlap_box(destination, footprint).is_empty() {
            debug!("tile step to {:?} blocked", destination);
            return false;
        }

        self.origin = position;
        self.destination = destination;
        self.started_at = Some(now);
        true
    }

    /// Position along the current step, finishing it once the step time has
    /// elapsed.
    fn advance(&mut self, now: f32) -> Vec2 {
        let Some(started_at) = self.started_at else {
            return self.destination;
        };
        let elapsed = now - started_at;
        if self.seconds_per_tile > 0.0 && elapsed < self.seconds_per_tile {
            let t = (elapsed / self.seconds_per_tile).clamp(0.0, 1.0);
            self.origin + (self.destination - self.origin) * t
        } else {
            self.started_at = None;
            self.destination
        }
    }
}

#[derive(Debug, Clone)]
pub enum MovementKind {
    Continuous(ContinuousMovement),
    Tile(TileMovement),
}

/// Locomotion for one character: the accumulated intent, the facing that
/// survives idle ticks, and the variant that turns intent into motion.
#[derive(Debug, Clone)]
pub struct Movement {
    pub input: InputAccumulator,
    direction: Vec2,
    kind: MovementKind,
}

impl Movement {
    pub fn continuous(movement: ContinuousMovement, diagonal_allowed: bool, tie_break: TieBreak) -> Self {
        Self {
            input: InputAccumulator::new(diagonal_allowed, tie_break),
            direction: Vec2::NEG_Y,
            kind: MovementKind::Continuous(movement),
        }
    }

    /// Tile stepping never moves diagonally.
    pub fn tile(movement: TileMovement) -> Self {
        Self {
            input: InputAccumulator::new(false, TieBreak::Sticky),
            direction: Vec2::NEG_Y,
            kind: MovementKind::Tile(movement),
        }
    }

    pub fn kind(&self) -> &MovementKind {
        &self.kind
    }

    pub fn continuous_mut(&mut self) -> Option<&mut ContinuousMovement> {
        match &mut self.kind {
            MovementKind::Continuous(movement) => Some(movement),
            MovementKind::Tile(_) => None,
        }
    }

    pub fn as_continuous(&self) -> Option<&ContinuousMovement> {
        match &self.kind {
            MovementKind::Continuous(movement) => Some(movement),
            MovementKind::Tile(_) => None,
        }
    }

    pub fn as_tile(&self) -> Option<&TileMovement> {
        match &self.kind {
            MovementKind::Tile(movement) => Some(movement),
            MovementKind::Continuous(_) => None,
        }
    }

    pub fn set_diagonal_allowed(&mut self, allowed: bool) {
        if allowed && self.as_tile().is_some() {
            warn!("tile movement cannot move diagonally, ignoring");
            return;
        }
        self.input.diagonal_allowed = allowed;
    }

    /// Last non-zero movement direction, normalised. Starts facing down.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        match &self.kind {
            MovementKind::Continuous(movement) => movement.velocity().length(),
            MovementKind::Tile(movement) => movement.speed(),
        }
    }

    pub fn velocity(&self) -> Vec2 {
        match &self.kind {
            MovementKind::Continuous(movement) => movement.velocity(),
            MovementKind::Tile(_) => Vec2::ZERO,
        }
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        if let Some(movement) = self.continuous_mut() {
            movement.set_velocity(velocity);
        }
    }

    /// Zeroes velocity immediately. A tile step in progress is unaffected.
    pub fn halt(&mut self) {
        self.set_velocity(Vec2::ZERO);
    }

    pub fn emit_initial_animation(&self, animation: &mut dyn AnimationSink) {
        animation.set_float(AnimParam::DirectionHorizontal, self.direction.x);
        animation.set_float(AnimParam::DirectionVertical, self.direction.y);
        animation.set_float(AnimParam::Speed, 0.0);
    }

    fn face(&mut self, direction: Vec2, animation: &mut dyn AnimationSink) {
        self.direction = direction;
        animation.set_float(AnimParam::DirectionHorizontal, direction.x);
        animation.set_float(AnimParam::DirectionVertical, direction.y);
    }

    /// Consumes this tick's input. `frozen` suppresses new movement exactly as if
    /// there were no input; frame input is cleared either way.
    pub fn step<C: CollisionQuery + ?Sized>(
        &mut self,
        now: f32,
        dt: f32,
        position: Vec2,
        frozen: bool,
        collision: &C,
        animation: &mut dyn AnimationSink,
    ) -> Motion {
        let input = self.input.combined();
        let intent = (input != Vec2::ZERO && !frozen).then(|| input.normalize());

        let motion = match &mut self.kind {
            MovementKind::Continuous(movement) => {
                let velocity = movement.step(intent, dt);
                match intent {
                    Some(direction) => {
                        self.face(direction, animation);
                        animation.set_float(AnimParam::Speed, velocity.length());
                    }
                    None => animation.set_float(AnimParam::Speed, 0.0),
                }
                Motion::Velocity(velocity)
            }
            MovementKind::Tile(movement) if movement.is_moving() => {
                Motion::Teleport(movement.advance(now))
            }
            MovementKind::Tile(movement) => match intent {
                Some(direction) => {
                    let started = movement.try_start(now, position, direction, collision);
                    let motion = if started {
                        animation.set_float(AnimParam::Speed, 1.0);
                        debug!("tile step {:?} -> {:?}", position, movement.destination());
                        if movement.seconds_per_tile() <= 0.0 {
                            Motion::Teleport(movement.advance(now))
                        } else {
                            Motion::Stay
                        }
                    } else {
                        Motion::Stay
                    };
                    self.face(direction, animation);
                    motion
                }
                None if frozen => Motion::Stay,
                None => {
                    animation.set_float(AnimParam::Speed, 0.0);
                    Motion::Stay
                }
            },
        };

        self.input.reset_frame();
        motion
    }
}
