//! Projectiles plugin: **message-based producer → consumer** launching + pooling.
//!
//! # Data flow
//! ```text
//!   Update
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ Producers (player input, AI) write LaunchProjectile                  │
//!   │ Consumer: launch_projectiles                                         │
//!   │   - pops ProjectilePool (fixed capacity; exhaustion drops the shot)  │
//!   │   - Free -> InUse, Lifetime activated, collision filters enabled     │
//!   └──────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedUpdate (CombatSet::Tick)
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ advance_projectiles: straight-line motion                            │
//!   │ expire_lifetimes::<Projectile>: InUse -> PendingRelease (silent)     │
//!   └──────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ avian writes CollisionStart                                          │
//!   │ Resolve: resolve_projectile_hits                                     │
//!   │   - writes SpawnExplosion, TakeDamage | PlaySound                    │
//!   │   - InUse -> PendingRelease                                          │
//!   │ Commit: commit_releases::<Projectile> pushes back to the free list   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers never touch the pool; the launch consumer is its only writer on
//! the acquire side and commit on the release side.

pub mod allocator;
pub mod collision;
pub mod components;
pub mod messages;
pub mod motion;
pub mod pool;

use bevy::prelude::*;

use crate::common::schedule::CombatSet;
use crate::common::state::GameState;
use crate::plugins::pooling::{self, PoolPolicy};

pub use components::Projectile;
pub use messages::LaunchProjectile;
pub use pool::ProjectilePool;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        pooling::register_pool::<Projectile>(app, PoolPolicy::Fixed);

        app.add_message::<LaunchProjectile>()
            .add_systems(Startup, pool::init_projectile_pool)
            .add_systems(
                Update,
                allocator::launch_projectiles.run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                FixedUpdate,
                motion::advance_projectiles
                    .before(pooling::expire_lifetimes::<Projectile>)
                    .in_set(CombatSet::Tick),
            )
            .add_systems(
                FixedPostUpdate,
                collision::resolve_projectile_hits.in_set(CombatSet::Resolve),
            );
    }
}
