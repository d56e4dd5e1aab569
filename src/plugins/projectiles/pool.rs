use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::Projectile;
use crate::common::layers::inactive_projectile_layers;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::pooling::{EntityPool, Lifetime, PoolSlot};

pub type ProjectilePool = EntityPool<Projectile>;

/// Pre-spawn pooled projectiles (inactive).
///
/// Physics components stay present; empty collision filters keep inactive
/// projectiles from generating collision events.
pub fn init_projectile_pool(
    mut commands: Commands,
    mut pool: ResMut<ProjectilePool>,
    tunables: Res<Tunables>,
) {
    let radius = tunables.projectile_radius;
    pool.initialize(tunables.projectile_pool_size, || {
        commands
            .spawn((
                Name::new("Projectile(Pooled)"),
                Projectile::default(),
                PoolSlot::Free,
                Lifetime::idle(),
                Transform::default(),
                Visibility::Hidden,
                RigidBody::Dynamic,
                Collider::sphere(radius),
                Sensor,
                inactive_projectile_layers(),
                CollisionEventsEnabled,
                DespawnOnExit(GameState::InGame),
            ))
            .id()
    });
}
