//! Deferred despawn.
//!
//! Gameplay systems in the fixed step only mark `PendingDespawn`; the actual
//! despawn happens in `PostUpdate` so no fixed-step system sees a half-removed
//! entity.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
