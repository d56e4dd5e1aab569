//! Core plugin: shared resources, fixed-step ordering, deferred despawn.

use bevy::prelude::*;

use crate::common::despawn::despawn_marked;
use crate::common::schedule;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();
    schedule::configure(app);
    app.add_systems(PostUpdate, despawn_marked);
}
