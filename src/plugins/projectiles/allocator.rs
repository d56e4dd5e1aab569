//! Launch consumer: activate projectiles from the pool.
//!
//! Exhaustion is a capacity decision, not a correctness failure: the request is
//! dropped with a warning and nothing is fired.

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::components::Projectile;
use super::messages::LaunchProjectile;
use super::pool::ProjectilePool;
use crate::common::layers::active_projectile_layers;
use crate::common::tunables::Tunables;
use crate::plugins::pooling::{Lifetime, PoolSlot, release_or_report};

pub fn launch_projectiles(
    mut pool: ResMut<ProjectilePool>,
    mut reader: MessageReader<LaunchProjectile>,
    tunables: Res<Tunables>,
    mut q: Query<(
        &mut PoolSlot,
        &mut Projectile,
        &mut Lifetime,
        &mut Transform,
        &mut Visibility,
        &mut CollisionLayers,
    )>,
) {
    for req in reader.read() {
        let e = match pool.acquire_free() {
            Ok(e) => e,
            Err(err) => {
                warn!("launch from {} dropped: {err}", req.owner_tag);
                continue;
            }
        };

        let Ok((mut slot, mut projectile, mut lifetime, mut tf, mut vis, mut layers)) = q.get_mut(e)
        else {
            error!("projectile pool handed out {e}, which has no projectile components");
            release_or_report(&mut pool, e);
            continue;
        };

        let direction = req.direction.try_normalize().unwrap_or(Vec3::NEG_Z);

        *slot = PoolSlot::InUse;
        projectile.reset_for_launch(req.damage, req.owner_tag.clone(), direction, tunables.projectile_speed);
        lifetime.activate(tunables.projectile_lifetime);
        *tf = Transform::from_translation(req.position).looking_to(direction, Vec3::Y);
        *vis = Visibility::Visible;
        *layers = active_projectile_layers(&req.owner_tag);

        debug!("launched {e} for {} at {}", req.owner_tag, req.position);
    }
}
