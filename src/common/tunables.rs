//! Tunable gameplay constants.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub projectile_pool_size: usize,
    pub projectile_speed: f32,
    pub projectile_lifetime: Duration,
    pub projectile_radius: f32,
    /// Distance in front of the caster where a projectile appears.
    pub cast_offset: f32,
    /// Touching the firer's own side never damages; this decides whether it
    /// still spawns an explosion.
    pub explode_on_owner_contact: bool,

    pub explosion_pool_size: usize,
    pub explosion_duration: Duration,

    pub audio_pool_size: usize,
    /// Hard cap for the growable audio pool; `None` grows without bound.
    pub audio_pool_max: Option<usize>,
    pub music_fade: Duration,
    pub music_volume: f32,

    pub hit_cooldown: Duration,
    pub player_max_health: f32,
    pub player_damage_per_hit: f32,
    pub enemy_max_health: f32,
    pub enemy_damage_per_hit: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            projectile_pool_size: 16,
            projectile_speed: 30.0,
            projectile_lifetime: Duration::from_secs(3),
            projectile_radius: 0.15,
            cast_offset: 1.0,
            explode_on_owner_contact: true,

            explosion_pool_size: 8,
            explosion_duration: Duration::from_millis(1000),

            audio_pool_size: 8,
            audio_pool_max: None,
            music_fade: Duration::from_millis(1500),
            music_volume: 0.6,

            hit_cooldown: Duration::from_millis(500),
            player_max_health: 100.0,
            player_damage_per_hit: 25.0,
            enemy_max_health: 50.0,
            enemy_damage_per_hit: 10.0,
        }
    }
}
