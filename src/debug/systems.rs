//! Debug domain: overlay drawing and runtime hotkeys.

use bevy::prelude::*;

use crate::behaviours::ACTION_INTERVAL;
use crate::character::{CharacterController, Tag};
use crate::debug::state::DebugState;
use crate::health::Health;
use crate::movement::MovementKind;

const REACH_COLOR: Color = Color::srgba(1.0, 0.85, 0.2, 0.8);
const FACING_COLOR: Color = Color::srgb(0.2, 1.0, 0.4);
const TILE_COLOR: Color = Color::srgba(0.3, 0.6, 1.0, 0.8);
const PROBE_COLOR: Color = Color::srgba(1.0, 0.3, 0.3, 0.5);

/// F1 toggles the overlay, F2 the scripted probes.
pub(crate) fn toggle_overlay(keyboard: Res<ButtonInput<KeyCode>>, mut debug_state: ResMut<DebugState>) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.overlay_visible = !debug_state.overlay_visible;
        info!("[DEBUG] overlay {}", if debug_state.overlay_visible { "ON" } else { "OFF" });
    }
    if keyboard.just_pressed(KeyCode::F2) {
        debug_state.show_probes = !debug_state.show_probes;
    }
}

/// Ctrl+H heals every "Player" back to its starting hp.
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut players: Query<(&Tag, &mut Health)>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl || !keyboard.just_pressed(KeyCode::KeyH) {
        return;
    }

    for (tag, mut health) in &mut players {
        if tag.as_str() != "Player" || health.is_dead() {
            continue;
        }
        let missing = health.max_hp() - health.hp();
        if missing > 0.0 {
            health.heal(missing);
            info!("[DEBUG] healed {} for {}", tag.as_str(), missing);
        }
    }
}

pub(crate) fn draw_overlay(
    mut gizmos: Gizmos,
    debug_state: Res<DebugState>,
    characters: Query<(&CharacterController, &Transform)>,
) {
    for (controller, transform) in &characters {
        let position = transform.translation.truncate();
        let facing = controller.movement.direction();
        gizmos.line_2d(position, position + facing * 0.6, FACING_COLOR);

        if let Some(melee) = &controller.melee {
            gizmos.circle_2d(position + facing * melee.radius, melee.radius, REACH_COLOR);
        }

        match controller.movement.kind() {
            MovementKind::Tile(tile) if tile.is_moving() => {
                gizmos.rect_2d(tile.destination(), Vec2::splat(tile.tile_size()), TILE_COLOR);
            }
            MovementKind::Continuous(movement) if debug_state.show_probes => {
                if let Some(radius) = controller.behaviour().and_then(|b| b.probe_radius()) {
                    let reach = ACTION_INTERVAL * movement.max_speed();
                    for step in [Vec2::NEG_X, Vec2::X, Vec2::Y, Vec2::NEG_Y] {
                        gizmos.circle_2d(position + step * reach, radius, PROBE_COLOR);
                    }
                }
            }
            _ => {}
        }
    }
}
