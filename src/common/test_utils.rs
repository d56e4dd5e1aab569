//! Test helpers.
//!
//! Systems that use `Commands` enqueue structural changes; applying them is normally
//! handled by schedule boundaries. We call `world.flush()` after running so queued
//! commands are applied before assertions.

use std::time::Duration;

use bevy::ecs::message::{Message, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce, SystemId};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Run a system registered with `World::register_system`, then flush.
///
/// Unlike `run_system_once`, the system keeps its state between calls, so a
/// `MessageReader` only sees messages written since its previous run.
pub fn run_registered<Out: 'static>(world: &mut World, id: SystemId<(), Out>) -> Out {
    let out = world.run_system(id).expect("registered system run failed");
    world.flush();
    out
}

/// Insert (or replace) the generic clock with one that reports `dt` as its delta.
pub fn set_delta(world: &mut World, dt: Duration) {
    let mut time = Time::<()>::default();
    time.advance_by(dt);
    world.insert_resource(time);
}

/// Make sure a message buffer exists so readers/writers can be used in a bare `World`.
pub fn ensure_messages<M: Message>(world: &mut World) {
    if world.get_resource::<Messages<M>>().is_none() {
        world.init_resource::<Messages<M>>();
    }
}

/// Drain every message of type `M` currently buffered, oldest first.
pub fn drain_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    ensure_messages::<M>(world);
    world.resource_mut::<Messages<M>>().drain().collect()
}
