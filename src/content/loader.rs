//! Loader for RON preset files at startup.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use ron::Options;
use ron::extensions::Extensions;

use super::data::*;
use super::registry::CharacterRegistry;

/// Schema the loader understands. Files declaring anything else are rejected.
pub const SCHEMA_VERSION: u32 = 1;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// `Some` may be left implicit, and enum newtype variants may list their
/// struct's fields directly, e.g. `Continuous(max_speed: 6.0)`.
fn ron_options() -> Options {
    Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .with_default_extension(Extensions::UNWRAP_VARIANT_NEWTYPES)
}

/// Parses a `DataFile<CharacterDef>` from `contents`. `file` only labels errors.
pub fn parse_characters(contents: &str, file: &str) -> Result<Vec<CharacterDef>, ContentLoadError> {
    let data: DataFile<CharacterDef> =
        ron_options()
            .from_str(contents)
            .map_err(|e| ContentLoadError {
                file: file.to_string(),
                message: format!("Parse error: {}", e),
            })?;

    if data.schema_version != SCHEMA_VERSION {
        return Err(ContentLoadError {
            file: file.to_string(),
            message: format!(
                "schema_version {} is not supported (expected {})",
                data.schema_version, SCHEMA_VERSION
            ),
        });
    }

    Ok(data.items)
}

/// Load assets/data/characters.ron into a CharacterRegistry. Every duplicate
/// id is reported; the first definition wins.
pub fn load_characters(base_path: &Path) -> Result<CharacterRegistry, Vec<ContentLoadError>> {
    let path = base_path.join("characters.ron");
    let file_name = path.display().to_string();

    let contents = fs::read_to_string(&path).map_err(|e| {
        vec![ContentLoadError {
            file: file_name.clone(),
            message: format!("IO error: {}", e),
        }]
    })?;
    let items = parse_characters(&contents, &file_name).map_err(|e| vec![e])?;

    let mut registry = CharacterRegistry::default();
    let mut seen = HashSet::new();
    let mut errors = Vec::new();
    for item in items {
        if !seen.insert(item.id.clone()) {
            errors.push(ContentLoadError {
                file: file_name.clone(),
                message: format!("duplicate character id '{}'", item.id),
            });
            continue;
        }
        registry.insert(item);
    }

    if errors.is_empty() {
        Ok(registry)
    } else {
        Err(errors)
    }
}
