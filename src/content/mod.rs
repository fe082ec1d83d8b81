//! Content domain: character presets loaded from RON at startup.

mod build;
mod data;
mod loader;
mod registry;
mod validation;


pub use data::{
    BehaviourDef, CharacterDef, ContinuousDef, DataFile, HealthDef, MeleeDef, MovementDef,
    RangedDef, TileDef,
};
pub use loader::{ContentLoadError, SCHEMA_VERSION, load_characters, parse_characters};
pub use registry::CharacterRegistry;
pub use validation::{ValidationError, validate_characters};

use std::path::PathBuf;

use bevy::prelude::*;

/// Directory holding characters.ron.
#[derive(Resource, Debug, Clone)]
pub struct ContentPath(pub PathBuf);

impl Default for ContentPath {
    fn default() -> Self {
        Self(PathBuf::from("assets/data"))
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentPath>()
            .init_resource::<CharacterRegistry>()
            .add_systems(Startup, load_content);
    }
}

/// Loads and validates presets. Presets failing validation are dropped; a file
/// that fails to load leaves the registry empty.
pub fn load_content(mut commands: Commands, path: Res<ContentPath>) {
    let mut registry = match load_characters(&path.0) {
        Ok(registry) => registry,
        Err(errors) => {
            for e in &errors {
                error!("{}", e);
            }
            return;
        }
    };

    let errors = validate_characters(&registry);
    for e in &errors {
        error!("{}", e);
        registry.remove(&e.character_id);
    }

    info!("{}", registry.summary());
    commands.insert_resource(registry);
}
