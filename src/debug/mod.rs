//! Debug overlay for tuning characters at runtime.
//!
//! Features:
//! - Facing, melee reach and tile targets drawn with gizmos
//! - Scripted look-ahead probes (F2)
//! - Heal players to full (Ctrl+H)

mod state;
mod systems;

pub use state::DebugState;

use bevy::prelude::*;

use crate::debug::systems::{draw_overlay, handle_debug_hotkeys, toggle_overlay};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (toggle_overlay, handle_debug_hotkeys).chain())
            .add_systems(
                Update,
                draw_overlay.run_if(|state: Res<DebugState>| state.overlay_visible),
            );
    }
}
