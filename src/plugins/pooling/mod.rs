//! Pooling: reusable entities cycling Free -> InUse -> PendingRelease -> Free.
//!
//! # Lifecycle
//! ```text
//!   acquire (consumer system)     mark (timeout or collision)     commit
//!   Free ───────────────────> InUse ─────────────────────> PendingRelease ──> Free
//! ```
//! Timeout and collision both stop at `PendingRelease`. `commit_releases` is the
//! single writer that returns an entity to its pool, so the two paths converge on
//! one release and the slot state fences out any late same-tick collision.
//!
//! Inactive invariants (owned by `commit_releases`):
//! - `PoolSlot::Free` and `Lifetime` idle
//! - hidden
//! - collide with nothing (filters empty) when the entity has collision layers

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use avian3d::prelude::*;
use bevy::ecs::component::Mutable;
use bevy::prelude::*;

use crate::common::schedule::CombatSet;

pub mod pool;
pub mod timed;

pub use pool::{ObjectPool, PoolError, PoolPolicy};
pub use timed::Lifetime;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolSlot {
    #[default]
    Free,
    InUse,
    PendingRelease,
}

/// A component that identifies one kind of pooled entity.
pub trait Pooled: Component<Mutability = Mutable> {
    const LABEL: &'static str;

    /// Reset per-use state when the entity goes back to the pool.
    fn on_release(&mut self) {}
}

/// Pool resource for one kind of pooled entity.
#[derive(Resource)]
pub struct EntityPool<K: Pooled> {
    pool: ObjectPool<Entity>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Pooled> EntityPool<K> {
    pub fn new(policy: PoolPolicy) -> Self {
        Self {
            pool: ObjectPool::new(K::LABEL, policy),
            _kind: PhantomData,
        }
    }
}

impl<K: Pooled> Deref for EntityPool<K> {
    type Target = ObjectPool<Entity>;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

impl<K: Pooled> DerefMut for EntityPool<K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.pool
    }
}

/// Release that treats a bad release as a bug in debug builds and a no-op otherwise.
pub fn release_or_report(pool: &mut ObjectPool<Entity>, entity: Entity) {
    if let Err(err) = pool.release(entity) {
        debug_assert!(false, "{err} ({entity})");
        warn!("{err} ({entity}); ignoring");
    }
}

/// Insert the pool resource and the shared lifecycle systems for `K`.
pub fn register_pool<K: Pooled>(app: &mut App, policy: PoolPolicy) {
    app.insert_resource(EntityPool::<K>::new(policy))
        .add_systems(FixedUpdate, expire_lifetimes::<K>.in_set(CombatSet::Tick))
        .add_systems(FixedPostUpdate, commit_releases::<K>.in_set(CombatSet::Commit));
}

/// Timeout path: an in-use entity whose lifetime ran out becomes `PendingRelease`.
pub fn expire_lifetimes<K: Pooled>(
    time: Res<Time>,
    mut q: Query<(Entity, &mut Lifetime, &mut PoolSlot), With<K>>,
) {
    let dt = time.delta();
    for (e, mut lifetime, mut slot) in &mut q {
        if *slot != PoolSlot::InUse {
            continue;
        }
        if lifetime.tick(dt) {
            trace!("{} {e} expired", K::LABEL);
            *slot = PoolSlot::PendingRelease;
        }
    }
}

/// Commit returns: the only place pooled entities go back to `Free`.
pub fn commit_releases<K: Pooled>(
    mut pool: ResMut<EntityPool<K>>,
    mut q: Query<(
        Entity,
        &mut PoolSlot,
        &mut Lifetime,
        &mut K,
        Option<&mut Visibility>,
        Option<&mut CollisionLayers>,
    )>,
) {
    for (e, mut slot, mut lifetime, mut kind, vis, layers) in &mut q {
        if *slot != PoolSlot::PendingRelease {
            continue;
        }

        *slot = PoolSlot::Free;
        lifetime.cancel();
        kind.on_release();
        if let Some(mut vis) = vis {
            *vis = Visibility::Hidden;
        }
        if let Some(mut layers) = layers {
            layers.filters = LayerMask::NONE;
        }

        release_or_report(&mut pool, e);
    }
}

#[cfg(test)]
mod tests;
