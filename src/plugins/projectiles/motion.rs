use bevy::prelude::*;

use super::components::Projectile;
use crate::plugins::pooling::PoolSlot;

/// Straight-line flight: `position += direction * speed * dt` for in-use projectiles.
pub fn advance_projectiles(time: Res<Time>, mut q: Query<(&Projectile, &PoolSlot, &mut Transform)>) {
    let dt = time.delta_secs();
    for (projectile, slot, mut tf) in &mut q {
        if *slot != PoolSlot::InUse {
            continue;
        }
        tf.translation += projectile.direction * projectile.speed * dt;
    }
}
