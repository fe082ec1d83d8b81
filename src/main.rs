use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use topdown_controller::behaviours::{UserInputBehaviour, ZeldaBehaviour};
use topdown_controller::character::{CharacterController, Tag, spawn_character};
use topdown_controller::content::{
    BehaviourDef, CharacterDef, CharacterRegistry, ContinuousDef, HealthDef, MeleeDef,
    MovementDef, RangedDef, load_content,
};
use topdown_controller::combat::DamageEvent;
use topdown_controller::health::DeathEvent;
use topdown_controller::movement::GameLayer;
use topdown_controller::services::{AnimTrigger, AnimatorParams};
use topdown_controller::{TopdownPlugin, TopdownSet};

/// World units per screen pixel.
const PIXELS_PER_UNIT: f32 = 48.0;
const ARENA_HALF: Vec2 = Vec2::new(11.0, 6.0);
const ATTACK_TINT_SECONDS: f32 = 0.08;
const HIT_TINT_SECONDS: f32 = 0.15;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Topdown Controller".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Gravity(Vec2::ZERO))
        .add_plugins(TopdownPlugin)
        .add_systems(Startup, (setup_camera, spawn_walls))
        .add_systems(Startup, spawn_roster.after(load_content))
        .add_systems(
            Update,
            (
                swap_player_behaviour.before(TopdownSet::Behaviour),
                tint_on_attack.after(TopdownSet::Behaviour),
                tint_on_damage.after(TopdownSet::Combat),
                log_deaths.after(TopdownSet::Health),
            ),
        )
        .run();
}

/// Sprite colour to return to after an attack or hit flash.
#[derive(Component, Debug)]
struct AttackTint {
    base: Color,
    until: f32,
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_scale(Vec3::splat(1.0 / PIXELS_PER_UNIT)),
    ));
}

fn spawn_walls(mut commands: Commands) {
    let thickness = 0.5;
    let walls = [
        (Vec2::new(0.0, ARENA_HALF.y), Vec2::new(ARENA_HALF.x * 2.0, thickness)),
        (Vec2::new(0.0, -ARENA_HALF.y), Vec2::new(ARENA_HALF.x * 2.0, thickness)),
        (Vec2::new(ARENA_HALF.x, 0.0), Vec2::new(thickness, ARENA_HALF.y * 2.0)),
        (Vec2::new(-ARENA_HALF.x, 0.0), Vec2::new(thickness, ARENA_HALF.y * 2.0)),
        (Vec2::new(-3.0, 1.5), Vec2::new(1.0, 3.0)),
        (Vec2::new(4.0, -2.0), Vec2::new(3.0, 1.0)),
    ];

    for (center, size) in walls {
        commands.spawn((
            Name::new("Wall"),
            Tag::new("Wall"),
            Sprite {
                color: Color::srgb(0.35, 0.35, 0.4),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(
                GameLayer::Wall,
                [GameLayer::Character, GameLayer::Projectile],
            ),
        ));
    }
}

/// Used when characters.ron is missing or invalid.
fn fallback_player() -> CharacterDef {
    CharacterDef {
        id: "player".to_string(),
        tag: "Player".to_string(),
        color: (0.25, 0.55, 0.95),
        size: 0.8,
        movement: MovementDef::Continuous(ContinuousDef::default()),
        melee: Some(MeleeDef::default()),
        ranged: Some(RangedDef::default()),
        health: Some(HealthDef {
            whitelist: vec!["Enemy".to_string()],
            ..default()
        }),
        behaviour: BehaviourDef::UserInput,
    }
}

fn spawn_roster(mut commands: Commands, registry: Res<CharacterRegistry>) {
    let slots = [
        Vec2::new(-6.0, -2.0),
        Vec2::new(6.0, 2.0),
        Vec2::new(0.5, 3.5),
        Vec2::new(-7.0, 3.5),
        Vec2::new(7.0, -4.0),
    ];

    let defs: Vec<CharacterDef> = if registry.is_empty() {
        warn!("no character presets loaded, spawning the built-in player");
        vec![fallback_player()]
    } else {
        registry.iter().cloned().collect()
    };

    for (def, position) in defs.iter().zip(slots.iter().cycle()) {
        let entity = spawn_character(&mut commands, def, *position);
        let (r, g, b) = def.color;
        commands.entity(entity).insert(AttackTint {
            base: Color::srgb(r, g, b),
            until: 0.0,
        });
    }
    info!("spawned {} character(s); Tab swaps the player's behaviour", defs.len());
}

/// Tab flips every player between plain keyboard control and the zelda variant.
fn swap_player_behaviour(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut players: Query<(&mut CharacterController, &Tag)>,
) {
    if !keyboard.just_pressed(KeyCode::Tab) {
        return;
    }

    for (mut controller, tag) in &mut players {
        if tag.as_str() != "Player" {
            continue;
        }
        if controller.behaviour_name() == Some("zelda") {
            controller.set_behaviour(Box::new(UserInputBehaviour::new()));
        } else {
            controller.set_behaviour(Box::new(ZeldaBehaviour::new()));
        }
    }
}

/// Stand-in for an animator: attack triggers briefly whiten the sprite.
fn tint_on_attack(
    time: Res<Time>,
    mut characters: Query<(&mut AnimatorParams, &mut Sprite, &mut AttackTint)>,
) {
    let now = time.elapsed_secs();
    for (mut params, mut sprite, mut tint) in &mut characters {
        let triggers = params.drain_triggers();
        if triggers.is_empty() {
            if tint.until > 0.0 && now >= tint.until {
                sprite.color = tint.base;
                tint.until = 0.0;
            }
            continue;
        }

        sprite.color = if triggers.contains(&AnimTrigger::RangedAttack) {
            Color::srgb(1.0, 0.9, 0.5)
        } else {
            Color::WHITE
        };
        tint.until = now + ATTACK_TINT_SECONDS;
    }
}

/// Anything that took damage this frame flashes red.
fn tint_on_damage(
    time: Res<Time>,
    mut hits: MessageReader<DamageEvent>,
    mut targets: Query<(&mut Sprite, &mut AttackTint)>,
) {
    let now = time.elapsed_secs();
    for hit in hits.read() {
        let Ok((mut sprite, mut tint)) = targets.get_mut(hit.target) else {
            continue;
        };
        sprite.color = Color::srgb(1.0, 0.3, 0.3);
        tint.until = now + HIT_TINT_SECONDS;
    }
}

fn log_deaths(mut deaths: MessageReader<DeathEvent>) {
    for death in deaths.read() {
        let tag = death.tag.as_deref().unwrap_or("untagged");
        info!("{} {:?} was defeated", tag, death.entity);
    }
}
