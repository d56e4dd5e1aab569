//! Capability lookup through the entity hierarchy.

use bevy::prelude::*;

/// First of `start` and its ancestors for which `has` holds.
///
/// Colliders are often children of the entity that carries gameplay components;
/// this finds the nearest one that does.
pub fn nearest_ancestor(
    start: Entity,
    parents: &Query<&ChildOf>,
    has: impl Fn(Entity) -> bool,
) -> Option<Entity> {
    let mut current = start;
    loop {
        if has(current) {
            return Some(current);
        }
        current = parents.get(current).ok()?.parent();
    }
}
