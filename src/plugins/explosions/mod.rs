//! Explosions: pooled impact effects that expire after a fixed duration.
//!
//! `SpawnExplosion` is written by whoever detects the impact; `spawn_explosions`
//! is the only system that pops the explosion pool. Expiry and return go through
//! the shared pooling systems.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::schedule::CombatSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::audio::{PlaySound, SoundBank};
use crate::plugins::pooling::{
    self, EntityPool, Lifetime, PoolPolicy, PoolSlot, Pooled, release_or_report,
};

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Explosion;

impl Pooled for Explosion {
    const LABEL: &'static str = "explosion";
}

pub type ExplosionPool = EntityPool<Explosion>;

#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnExplosion {
    pub position: Vec3,
    pub duration: Duration,
}

pub fn plugin(app: &mut App) {
    pooling::register_pool::<Explosion>(app, PoolPolicy::Fixed);

    app.add_message::<SpawnExplosion>()
        .add_systems(Startup, init_explosion_pool)
        .add_systems(FixedPostUpdate, spawn_explosions.in_set(CombatSet::Effects));
}

pub fn init_explosion_pool(mut commands: Commands, mut pool: ResMut<ExplosionPool>, tunables: Res<Tunables>) {
    pool.initialize(tunables.explosion_pool_size, || {
        commands
            .spawn((
                Name::new("Explosion(Pooled)"),
                Explosion,
                PoolSlot::Free,
                Lifetime::idle(),
                Transform::default(),
                Visibility::Hidden,
                DespawnOnExit(GameState::InGame),
            ))
            .id()
    });
}

/// Place and activate one explosion per request; exhaustion skips the effect.
pub fn spawn_explosions(
    mut requests: MessageReader<SpawnExplosion>,
    mut pool: ResMut<ExplosionPool>,
    bank: Res<SoundBank>,
    mut q: Query<(&mut PoolSlot, &mut Lifetime, &mut Transform, &mut Visibility), With<Explosion>>,
    mut sounds: MessageWriter<PlaySound>,
) {
    for req in requests.read() {
        let e = match pool.acquire_free() {
            Ok(e) => e,
            Err(err) => {
                warn!("explosion at {} skipped: {err}", req.position);
                continue;
            }
        };

        let Ok((mut slot, mut lifetime, mut tf, mut vis)) = q.get_mut(e) else {
            error!("explosion pool handed out {e}, which is not an explosion");
            release_or_report(&mut pool, e);
            continue;
        };

        *slot = PoolSlot::InUse;
        lifetime.activate(req.duration);
        tf.translation = req.position;
        *vis = Visibility::Visible;

        sounds.write(PlaySound::at(bank.explosion.clone(), req.position));
    }
}
