//! Behaviours domain: tests for the keyboard, scripted and zelda drivers.

use bevy::prelude::*;

use super::{ScriptedBehaviour, UserInputBehaviour, ZeldaBehaviour};
use crate::character::{CharacterBehaviour, CharacterController};
use crate::combat::{MeleeAttack, RangedAttack};
use crate::health::Health;
use crate::input::TieBreak;
use crate::movement::{ContinuousMovement, Movement, TileMovement};
use crate::services::testing::{Rig, ScriptedKeys};
use crate::services::{AnimTrigger, InputKey};

fn armed(diagonal_allowed: bool) -> CharacterController {
    CharacterController::new(Movement::continuous(
        ContinuousMovement::new(5.0),
        diagonal_allowed,
        TieBreak::LastPressed,
    ))
    .with_melee(MeleeAttack::default())
    .with_ranged(RangedAttack::default())
}

// -----------------------------------------------------------------------------
// User input
// -----------------------------------------------------------------------------

#[test]
fn test_held_arrows_are_frame_input() {
    let mut rig = Rig::new();
    rig.keys = ScriptedKeys::default()
        .hold(InputKey::Right)
        .hold(InputKey::Up);
    let mut controller = armed(true).with_behaviour(Box::new(UserInputBehaviour::new()));

    rig.tick(&mut controller, 0.0);
    assert_eq!(controller.movement.input.combined(), Vec2::new(1.0, 1.0));
    assert_eq!(controller.movement.input.persistent(), Vec2::ZERO);
}

#[test]
fn test_last_pressed_axis_wins_without_diagonals() {
    let mut rig = Rig::new();
    let mut controller = armed(false).with_behaviour(Box::new(UserInputBehaviour::new()));

    rig.keys = ScriptedKeys::default()
        .hold(InputKey::Up)
        .press(InputKey::Right);
    rig.tick(&mut controller, 0.0);
    assert_eq!(controller.movement.input.combined(), Vec2::X);

    controller.movement.input.reset_frame();
    rig.keys = ScriptedKeys::default()
        .hold(InputKey::Right)
        .press(InputKey::Up);
    rig.tick(&mut controller, 0.1);
    assert_eq!(controller.movement.input.combined(), Vec2::Y);
}

#[test]
fn test_held_melee_key_swings_along_facing() {
    let mut rig = Rig::new();
    let target = rig.world.add_box(Vec2::new(0.0, -0.6), Vec2::splat(0.4), None);
    rig.keys = ScriptedKeys::default().hold(InputKey::Melee);
    let mut controller = armed(true).with_behaviour(Box::new(UserInputBehaviour::new()));

    let strikes = rig.tick(&mut controller, 0.0);
    assert_eq!(strikes.len(), 1);
    assert_eq!(strikes[0].targets, vec![target]);

    assert!(rig.tick(&mut controller, 0.25).is_empty());
    assert_eq!(rig.tick(&mut controller, 0.5).len(), 1);
}

#[test]
fn test_ranged_key_fires_on_press_only() {
    let mut rig = Rig::new();
    let mut controller = armed(true).with_behaviour(Box::new(UserInputBehaviour::new()));

    rig.keys = ScriptedKeys::default().hold(InputKey::Ranged);
    rig.tick(&mut controller, 0.0);
    assert!(rig.world.spawned.is_empty());

    rig.keys = ScriptedKeys::default().press(InputKey::Ranged);
    rig.tick(&mut controller, 1.0);
    assert_eq!(rig.world.spawned.len(), 1);
    assert_eq!(rig.world.spawned[0].1.direction, Vec2::NEG_Y);
    assert_eq!(rig.anim.pending_triggers(), &[AnimTrigger::RangedAttack]);
}

#[test]
fn test_missing_melee_only_disables_melee() {
    let mut rig = Rig::new();
    rig.keys = ScriptedKeys::default()
        .hold(InputKey::Melee)
        .press(InputKey::Ranged);
    let mut controller = CharacterController::new(Movement::continuous(
        ContinuousMovement::new(5.0),
        true,
        TieBreak::LastPressed,
    ))
    .with_ranged(RangedAttack::default())
    .with_behaviour(Box::new(UserInputBehaviour::new()));

    for now in [0.0, 1.0] {
        assert!(rig.tick(&mut controller, now).is_empty());
    }
    assert_eq!(rig.world.spawned.len(), 2);
}

// -----------------------------------------------------------------------------
// Zelda
// -----------------------------------------------------------------------------

#[test]
fn test_zelda_beam_only_at_full_health() {
    let mut rig = Rig::new();
    rig.keys = ScriptedKeys::default().hold(InputKey::Melee);
    rig.health = Some(Health::new(4.0));
    let mut controller = armed(false).with_behaviour(Box::new(ZeldaBehaviour::new()));

    assert_eq!(rig.tick(&mut controller, 0.0).len(), 1);
    assert_eq!(rig.world.spawned.len(), 1);
    assert!(controller.movement.input.prefer_horizontal);

    if let Some(health) = rig.health.as_mut() {
        health.take_damage(0.5, 1.0, None, None);
    }
    assert_eq!(rig.tick(&mut controller, 1.0).len(), 1);
    assert_eq!(rig.world.spawned.len(), 1);
}

#[test]
fn test_zelda_needs_both_attacks() {
    let controller = CharacterController::new(Movement::continuous(
        ContinuousMovement::new(5.0),
        false,
        TieBreak::Sticky,
    ))
    .with_melee(MeleeAttack::default());

    let mut zelda = ZeldaBehaviour::new();
    zelda.on_attach(&controller);
    assert!(zelda.is_disabled());
}

// -----------------------------------------------------------------------------
// Scripted
// -----------------------------------------------------------------------------

fn enemy(seed: u64) -> CharacterController {
    armed(false).with_behaviour(Box::new(ScriptedBehaviour::seeded(seed)))
}

fn enemy_rig() -> Rig {
    let mut rig = Rig::new();
    rig.tag = Some("Enemy".to_string());
    rig
}

fn wall_in(rig: &mut Rig, open: &[Vec2]) {
    for direction in [Vec2::NEG_X, Vec2::X, Vec2::Y, Vec2::NEG_Y] {
        if !open.contains(&direction) {
            rig.world.add_box(direction * 5.0, Vec2::ONE, Some("Wall"));
        }
    }
}

#[test]
fn test_scripted_disables_without_continuous_movement() {
    let controller = CharacterController::new(Movement::tile(TileMovement::default()))
        .with_ranged(RangedAttack::default());
    let mut scripted = ScriptedBehaviour::seeded(1);
    scripted.on_attach(&controller);
    assert!(scripted.is_disabled());
}

#[test]
fn test_scripted_disables_without_ranged() {
    let controller = CharacterController::new(Movement::continuous(
        ContinuousMovement::new(5.0),
        false,
        TieBreak::LastPressed,
    ));
    let mut scripted = ScriptedBehaviour::seeded(1);
    scripted.on_attach(&controller);
    assert!(scripted.is_disabled());

    let mut rig = enemy_rig();
    let mut controller = controller.with_behaviour(Box::new(scripted));
    rig.tick(&mut controller, 100.0);
    assert!(rig.world.spawned.is_empty());
    assert_eq!(controller.movement.input.persistent(), Vec2::ZERO);
}

#[test]
fn test_scripted_stays_put_when_boxed_in() {
    let mut rig = enemy_rig();
    wall_in(&mut rig, &[]);
    let mut controller = enemy(7);

    for i in 0..20 {
        rig.tick(&mut controller, i as f32);
        assert_eq!(controller.movement.input.persistent(), Vec2::ZERO);
    }
}

#[test]
fn test_scripted_walks_only_through_open_or_player_occupied_paths() {
    let mut rig = enemy_rig();
    wall_in(&mut rig, &[Vec2::X, Vec2::Y]);
    rig.world.add_box(Vec2::new(0.0, 5.0), Vec2::ONE, Some("Player"));
    let mut controller = enemy(11);

    let mut seen = Vec::new();
    for i in 0..60 {
        rig.tick(&mut controller, i as f32);
        let latched = controller.movement.input.persistent();
        assert!(
            [Vec2::ZERO, Vec2::X, Vec2::Y].contains(&latched),
            "walked into a wall: {latched:?}"
        );
        if !seen.contains(&latched) {
            seen.push(latched);
        }
    }
    assert!(seen.contains(&Vec2::X));
    assert!(seen.contains(&Vec2::Y));
}

#[test]
fn test_scripted_acts_once_per_interval_and_fires_when_overdue() {
    let mut rig = enemy_rig();
    let mut controller = enemy(3);

    rig.tick(&mut controller, 100.0);
    assert_eq!(rig.world.spawned.len(), 1);
    assert_eq!(rig.world.spawned[0].1.direction, Vec2::NEG_Y);
    assert_eq!(rig.world.spawned[0].1.owner_tag.as_deref(), Some("Enemy"));

    rig.tick(&mut controller, 100.5);
    rig.tick(&mut controller, 100.75);
    assert_eq!(rig.world.spawned.len(), 1);

    rig.tick(&mut controller, 110.0);
    assert_eq!(rig.world.spawned.len(), 2);
}

#[test]
fn test_scripted_is_deterministic_per_seed() {
    let run = |seed: u64| {
        let mut rig = enemy_rig();
        let mut controller = enemy(seed);
        (0..30)
            .map(|i| {
                rig.tick(&mut controller, i as f32);
                controller.movement.input.persistent()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
}
