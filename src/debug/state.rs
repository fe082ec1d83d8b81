//! Debug domain: state for the gizmo overlay and hotkeys.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Whether the gizmo overlay is drawn
    pub overlay_visible: bool,
    /// Draw the scripted look-ahead probes as well
    pub show_probes: bool,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            overlay_visible: true,
            show_probes: false,
        }
    }
}
