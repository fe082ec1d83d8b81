//! Data definitions for character preset files.
//!
//! These structs mirror assets/data/characters.ron and are only used for
//! deserialization. `build.rs` turns them into live components.

use serde::{Deserialize, Serialize};

use crate::input::TieBreak;
use crate::projectile::ProjectileConfig;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Characters (characters.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CharacterDef {
    pub id: String,
    pub tag: String,
    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),
    /// Side length of the square body, in world units.
    #[serde(default = "default_size")]
    pub size: f32,
    pub movement: MovementDef,
    #[serde(default)]
    pub melee: Option<MeleeDef>,
    #[serde(default)]
    pub ranged: Option<RangedDef>,
    #[serde(default)]
    pub health: Option<HealthDef>,
    #[serde(default)]
    pub behaviour: BehaviourDef,
}

fn default_color() -> (f32, f32, f32) {
    (0.8, 0.8, 0.8)
}

fn default_size() -> f32 {
    0.8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum MovementDef {
    Continuous(ContinuousDef),
    Tile(TileDef),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContinuousDef {
    pub max_speed: f32,
    pub time_to_max_speed: f32,
    pub time_to_full_stop: f32,
    pub diagonal_allowed: bool,
    pub tie_break: TieBreak,
    pub prefer_horizontal: bool,
}

impl Default for ContinuousDef {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            time_to_max_speed: 0.0,
            time_to_full_stop: 0.0,
            diagonal_allowed: true,
            tie_break: TieBreak::LastPressed,
            prefer_horizontal: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TileDef {
    pub tile_size: f32,
    pub seconds_per_tile: f32,
}

impl Default for TileDef {
    fn default() -> Self {
        Self {
            tile_size: 1.0,
            seconds_per_tile: 0.25,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MeleeDef {
    pub damage: f32,
    pub radius: f32,
    pub cooldown: f32,
    pub thorns_damage: f32,
    pub freeze_on_attack: bool,
}

impl Default for MeleeDef {
    fn default() -> Self {
        Self {
            damage: 1.0,
            radius: 0.5,
            cooldown: 0.5,
            thorns_damage: 0.0,
            freeze_on_attack: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RangedDef {
    pub cooldown: f32,
    /// `None` for unlimited shots.
    pub ammo: Option<u32>,
    pub projectile: ProjectileConfig,
}

impl Default for RangedDef {
    fn default() -> Self {
        Self {
            cooldown: 0.5,
            ammo: None,
            projectile: ProjectileConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthDef {
    pub hp: f32,
    pub grace_period: f32,
    pub flash_count: u32,
    pub whitelist: Vec<String>,
    pub heal_cap: Option<f32>,
}

impl Default for HealthDef {
    fn default() -> Self {
        Self {
            hp: 5.0,
            grace_period: 0.8,
            flash_count: 4,
            whitelist: Vec::new(),
            heal_cap: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub enum BehaviourDef {
    UserInput,
    Zelda,
    Scripted {
        #[serde(default)]
        seed: Option<u64>,
        /// Defaults to half the body size.
        #[serde(default)]
        probe_radius: Option<f32>,
        #[serde(default = "default_ignore_tag")]
        ignore_tag: String,
    },
    #[default]
    Idle,
}

fn default_ignore_tag() -> String {
    "Player".to_string()
}
