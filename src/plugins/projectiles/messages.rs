//! Buffered launch requests.
//!
//! Producers (input, AI) write intent; `launch_projectiles` is the single
//! consumer that pops the pool.

use bevy::prelude::*;

use crate::common::tags::Tag;

#[derive(Message, Clone, Debug)]
pub struct LaunchProjectile {
    pub position: Vec3,
    pub direction: Vec3,
    pub damage: f32,
    pub owner_tag: Tag,
}
