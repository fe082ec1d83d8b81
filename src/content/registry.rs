//! CharacterRegistry resource providing lookups for loaded presets.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::CharacterDef;

/// Loaded character presets, by id. File order is kept for spawning.
#[derive(Resource, Debug, Default)]
pub struct CharacterRegistry {
    characters: HashMap<String, CharacterDef>,
    order: Vec<String>,
}

impl CharacterRegistry {
    pub fn insert(&mut self, def: CharacterDef) {
        if !self.characters.contains_key(&def.id) {
            self.order.push(def.id.clone());
        }
        self.characters.insert(def.id.clone(), def);
    }

    pub fn remove(&mut self, id: &str) -> Option<CharacterDef> {
        self.order.retain(|existing| existing != id);
        self.characters.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&CharacterDef> {
        self.characters.get(id)
    }

    /// Presets in file order.
    pub fn iter(&self) -> impl Iterator<Item = &CharacterDef> {
        self.order.iter().filter_map(|id| self.characters.get(id))
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Returns a summary of loaded content for logging.
    pub fn summary(&self) -> String {
        format!(
            "CharacterRegistry loaded {} preset(s): {}",
            self.len(),
            self.order.join(", ")
        )
    }
}
