//! Collision layers.

use avian3d::prelude::*;

use super::tags::Tag;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
    Trigger,
}

/// Layers for a projectile in flight, chosen from who fired it.
///
/// Anything not fired by an enemy is treated as a player shot.
#[inline]
pub fn active_projectile_layers(owner: &Tag) -> CollisionLayers {
    if *owner == Tag::ENEMY {
        CollisionLayers::new(Layer::EnemyProjectile, [Layer::World, Layer::Player])
    } else {
        CollisionLayers::new(Layer::PlayerProjectile, [Layer::World, Layer::Enemy])
    }
}

/// "Disabled" without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerProjectile, LayerMask::NONE)
}
