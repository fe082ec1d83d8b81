//! Movement domain: physics layers shared by characters, walls and projectiles.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Static level geometry
    Wall,
    Character,
    /// Projectiles never collide with each other
    Projectile,
}
