use bevy::prelude::*;

use crate::common::tags::Tag;
use crate::plugins::pooling::Pooled;

/// A pooled spell projectile.
///
/// Lifetime and elapsed time live in the entity's `Lifetime`; the slot state in
/// its `PoolSlot`.
#[derive(Component, Debug, Clone, Default)]
pub struct Projectile {
    pub damage: f32,
    /// Tag of whoever fired it; contacts with this tag are not hits.
    pub owner_tag: Tag,
    /// Unit direction of travel.
    pub direction: Vec3,
    pub speed: f32,
}

impl Projectile {
    #[inline]
    pub fn reset_for_launch(&mut self, damage: f32, owner_tag: Tag, direction: Vec3, speed: f32) {
        self.damage = damage;
        self.owner_tag = owner_tag;
        self.direction = direction;
        self.speed = speed;
    }
}

impl Pooled for Projectile {
    const LABEL: &'static str = "projectile";

    fn on_release(&mut self) {
        *self = Self::default();
    }
}
