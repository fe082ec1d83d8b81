//! Combat domain: tests for cooldown gates, thorns and ammo.

use avian2d::prelude::CollidingEntities;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::systems::apply_thorns;
use super::{DamageEvent, MeleeAttack, MeleeStrike, RangedAttack};
use crate::character::{CharacterController, Tag};
use crate::health::{AttackInfo, Health};
use crate::input::TieBreak;
use crate::movement::{ContinuousMovement, Movement};
use crate::projectile::ProjectileConfig;
use crate::services::testing::FakeWorld;

fn arena() -> (FakeWorld, Entity) {
    let mut world = FakeWorld::default();
    let attacker = world.entity();
    (world, attacker)
}

// -----------------------------------------------------------------------------
// Melee
// -----------------------------------------------------------------------------

#[test]
fn test_melee_defaults() {
    let melee = MeleeAttack::default();
    assert_eq!(melee.damage, 1.0);
    assert_eq!(melee.radius, 0.5);
    assert_eq!(melee.cooldown(), 0.5);
    assert_eq!(melee.thorns_damage, 0.0);
    assert!(!melee.freeze_on_attack);
    assert!(melee.can_attack(0.0));
}

#[test]
fn test_melee_cooldown_gates_swings() {
    let (world, attacker) = arena();
    let mut melee = MeleeAttack::default();

    assert!(melee.attack(1.0, attacker, Vec2::ZERO, Vec2::X, &world).is_some());
    assert!(melee.attack(1.2, attacker, Vec2::ZERO, Vec2::X, &world).is_none());
    assert!(!melee.can_attack(1.49));
    assert!(melee.attack(1.5, attacker, Vec2::ZERO, Vec2::X, &world).is_some());
}

#[test]
fn test_setting_cooldown_makes_attack_ready() {
    let (world, attacker) = arena();
    let mut melee = MeleeAttack::default().with_cooldown(10.0);
    melee.attack(0.0, attacker, Vec2::ZERO, Vec2::X, &world);
    assert!(!melee.can_attack(1.0));

    melee.set_cooldown(10.0);
    assert!(melee.can_attack(1.0));
}

#[test]
fn test_speed_multiplier_tracks_cooldown() {
    assert_eq!(MeleeAttack::default().with_cooldown(0.25).speed_multiplier(), 4.0);
    assert_eq!(MeleeAttack::default().with_cooldown(0.0).speed_multiplier(), 1.0);
}

#[test]
fn test_strike_circle_is_offset_along_direction() {
    let (mut world, attacker) = arena();
    let ahead = world.add_box(Vec2::new(0.9, 0.0), Vec2::splat(0.2), None);
    let behind = world.add_box(Vec2::new(-0.9, 0.0), Vec2::splat(0.2), None);
    let mut melee = MeleeAttack::default();

    let hits = melee
        .attack(0.0, attacker, Vec2::ZERO, Vec2::new(3.0, 0.0), &world)
        .unwrap_or_default();
    assert_eq!(hits, vec![ahead]);
    assert!(!hits.contains(&behind));
}

#[test]
fn test_attacker_is_never_a_target() {
    let mut world = FakeWorld::default();
    let attacker = world.add_box(Vec2::ZERO, Vec2::splat(0.8), Some("Player"));
    let victim = world.add_box(Vec2::new(0.5, 0.0), Vec2::splat(0.4), Some("Enemy"));
    let mut melee = MeleeAttack::default();

    let hits = melee
        .attack(0.0, attacker, Vec2::ZERO, Vec2::X, &world)
        .unwrap_or_default();
    assert_eq!(hits, vec![victim]);
}

#[test]
fn test_freeze_lasts_for_the_cooldown() {
    let (world, attacker) = arena();
    let mut melee = MeleeAttack {
        freeze_on_attack: true,
        ..MeleeAttack::default()
    };
    assert!(!melee.is_freezing(0.0));

    melee.attack(2.0, attacker, Vec2::ZERO, Vec2::Y, &world);
    assert!(melee.is_freezing(2.0));
    assert!(melee.is_freezing(2.4));
    assert!(!melee.is_freezing(2.5));
}

#[test]
fn test_strike_respects_target_whitelist() {
    let strike = MeleeStrike {
        attacker: Entity::PLACEHOLDER,
        attacker_tag: Some("Enemy".to_string()),
        damage: 2.0,
        targets: Vec::new(),
        info: None,
    };

    let mut friendly = Health::new(5.0).with_whitelist(["Player"]);
    assert!(!strike.apply_to(0.0, &mut friendly));
    assert_eq!(friendly.hp(), 5.0);

    let mut open = Health::new(5.0).with_whitelist(["All"]);
    assert!(strike.apply_to(0.0, &mut open));
    assert_eq!(open.hp(), 3.0);
}

#[test]
fn test_strike_passes_attack_info_to_observers() {
    use std::sync::{Arc, Mutex};

    let mut info = AttackInfo::new();
    info.insert("weapon".to_string(), "sword".to_string());
    let strike = MeleeStrike {
        attacker: Entity::PLACEHOLDER,
        attacker_tag: None,
        damage: 1.0,
        targets: Vec::new(),
        info: Some(info),
    };

    let seen = Arc::new(Mutex::new(None));
    let sink = seen.clone();
    let mut health = Health::new(3.0);
    health.on_health_changed(move |hp, info| {
        *sink.lock().unwrap() = Some((hp, info.and_then(|i| i.get("weapon").cloned())));
    });

    strike.apply_to(0.0, &mut health);
    assert_eq!(
        *seen.lock().unwrap(),
        Some((2.0, Some("sword".to_string())))
    );
}

// -----------------------------------------------------------------------------
// Thorns
// -----------------------------------------------------------------------------

#[test]
fn test_zero_thorns_never_damage() {
    let melee = MeleeAttack::default();
    let mut victim = Health::new(5.0);
    assert!(!melee.apply_thorns(0.0, None, &mut victim));
    assert_eq!(victim.hp(), 5.0);
}

#[test]
fn test_thorns_ignore_swing_cooldown_but_not_grace() {
    let (world, attacker) = arena();
    let mut melee = MeleeAttack {
        thorns_damage: 1.0,
        ..MeleeAttack::default()
    };
    melee.attack(0.0, attacker, Vec2::ZERO, Vec2::X, &world);

    let mut victim = Health::new(5.0).with_grace_period(0.8);
    assert!(melee.apply_thorns(0.25, None, &mut victim));
    assert!(!melee.apply_thorns(0.5, None, &mut victim));
    assert!(melee.apply_thorns(1.25, None, &mut victim));
    assert_eq!(victim.hp(), 3.0);
}

// -----------------------------------------------------------------------------
// Ranged
// -----------------------------------------------------------------------------

#[test]
fn test_unlimited_ammo_only_gated_by_cooldown() {
    let mut ranged = RangedAttack::default();
    assert!(ranged.fire(0.0, Vec2::ZERO, Vec2::X, None).is_some());
    assert!(ranged.fire(0.3, Vec2::ZERO, Vec2::X, None).is_none());
    for i in 1..20 {
        assert!(ranged.fire(i as f32 * 0.5, Vec2::ZERO, Vec2::X, None).is_some());
    }
    assert_eq!(ranged.ammo(), 0);
}

#[test]
fn test_limited_ammo_runs_out() {
    let mut ranged = RangedAttack::default().with_cooldown(0.0).with_ammo(3);
    for _ in 0..3 {
        assert!(ranged.fire(0.0, Vec2::ZERO, Vec2::X, None).is_some());
    }
    assert_eq!(ranged.ammo(), 0);
    assert!(!ranged.can_fire(100.0));
    assert!(ranged.fire(100.0, Vec2::ZERO, Vec2::X, None).is_none());

    ranged.add_ammo(2);
    assert_eq!(ranged.ammo(), 2);
    assert!(ranged.fire(100.0, Vec2::ZERO, Vec2::X, None).is_some());
}

#[test]
fn test_zero_direction_fires_along_x() {
    let mut ranged = RangedAttack::default();
    let spawn = ranged
        .fire(0.0, Vec2::new(1.0, 2.0), Vec2::ZERO, Some("Player"))
        .unwrap_or_else(|| panic!("first shot should fire"));
    assert_eq!(spawn.direction, Vec2::X);
    assert_eq!(spawn.rotation(), 0.0);
    assert_eq!(spawn.origin, Vec2::new(1.0, 2.0));
    assert_eq!(spawn.owner_tag.as_deref(), Some("Player"));
}

#[test]
fn test_shot_carries_projectile_config() {
    let config = ProjectileConfig {
        speed: 4.0,
        damage: 3.0,
        ..ProjectileConfig::default()
    };
    let mut ranged = RangedAttack::new(config.clone());
    let spawn = ranged
        .fire(7.0, Vec2::ZERO, Vec2::new(0.0, -2.0), None)
        .unwrap_or_else(|| panic!("first shot should fire"));

    assert_eq!(spawn.config, config);
    assert_eq!(spawn.fired_at, 7.0);
    assert_eq!(spawn.velocity(), Vec2::new(0.0, -4.0));
}

#[test]
fn test_ranged_cooldown_change_resets_timer() {
    let mut ranged = RangedAttack::default().with_cooldown(5.0);
    ranged.fire(0.0, Vec2::ZERO, Vec2::X, None);
    assert!(!ranged.can_fire(1.0));

    ranged.set_cooldown(0.5);
    assert!(ranged.can_fire(1.0));
    assert_eq!(ranged.speed_multiplier(), 2.0);
}

// -----------------------------------------------------------------------------
// Thorns system
// -----------------------------------------------------------------------------

fn thorns_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .add_message::<DamageEvent>()
        .add_systems(Update, apply_thorns);
    app
}

fn spiky() -> CharacterController {
    let movement = Movement::continuous(ContinuousMovement::new(5.0), true, TieBreak::LastPressed);
    CharacterController::new(movement).with_melee(MeleeAttack {
        thorns_damage: 1.0,
        ..MeleeAttack::default()
    })
}

fn touching(entities: &[Entity]) -> CollidingEntities {
    CollidingEntities(entities.iter().copied().collect())
}

fn damage_events(app: &mut App) -> Vec<(Entity, Entity, f32)> {
    app.world_mut()
        .resource_mut::<Messages<DamageEvent>>()
        .drain()
        .map(|event| (event.source, event.target, event.amount))
        .collect()
}

#[test]
fn test_thorns_system_hits_contacts_but_not_self() {
    let mut app = thorns_app();
    let victim = app
        .world_mut()
        .spawn(Health::new(5.0).with_whitelist(["Enemy"]))
        .id();
    let attacker = app.world_mut().spawn_empty().id();
    app.world_mut().entity_mut(attacker).insert((
        spiky(),
        Tag::new("Enemy"),
        Health::new(3.0).with_whitelist(["All"]),
        touching(&[attacker, victim]),
    ));

    app.update();

    let hp = |app: &App, entity| app.world().get::<Health>(entity).map(Health::hp);
    assert_eq!(hp(&app, victim), Some(4.0));
    assert_eq!(hp(&app, attacker), Some(3.0));
    assert_eq!(damage_events(&mut app), vec![(attacker, victim, 1.0)]);
}

#[test]
fn test_dead_character_deals_no_thorns() {
    let mut app = thorns_app();
    let victim = app.world_mut().spawn(Health::new(5.0)).id();

    let mut corpse = Health::new(1.0);
    corpse.take_damage(0.0, 1.0, None, None);
    assert!(corpse.is_dead());
    app.world_mut().spawn((spiky(), corpse, touching(&[victim])));

    app.update();

    assert_eq!(app.world().get::<Health>(victim).map(Health::hp), Some(5.0));
    assert!(damage_events(&mut app).is_empty());
}
