//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `spell_arena::game::configure_headless` to install gameplay plugins.
//! - time advances by exactly one fixed step per `update()`.

#![allow(dead_code)]

use std::time::Duration;

use avian3d::prelude::CollisionStart;
use bevy::asset::AssetPlugin;
use bevy::mesh::MeshPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use spell_arena::common::tags::Tag;
use spell_arena::plugins::characters::Character;
use spell_arena::plugins::enemies::Enemy;
use spell_arena::plugins::player::Player;
use spell_arena::plugins::pooling::PoolSlot;
use spell_arena::plugins::projectiles::{LaunchProjectile, Projectile};

pub const STEP: Duration = Duration::from_micros(15_625);

pub fn app_headless() -> App {
    let mut app = App::new();

    // Asset + scene + mesh plugins so avian's collider backends find their resources;
    // TransformPlugin so moved bodies carry their GlobalTransform into physics.
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        StatesPlugin,
        AssetPlugin::default(),
        MeshPlugin,
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    spell_arena::game::configure_headless(&mut app);

    // `App::run` does this for the real game; plugins such as avian's broad phase
    // only insert some of their resources in `finish`.
    app.finish();
    app.cleanup();
    app
}

/// Boot: run Startup and enter the initial state.
pub fn booted() -> App {
    let mut app = app_headless();
    for _ in 0..3 {
        app.update();
    }
    app
}

/// Update until `done` holds, at most `max` times. Returns whether it held.
pub fn update_until(app: &mut App, max: usize, mut done: impl FnMut(&mut World) -> bool) -> bool {
    for _ in 0..max {
        app.update();
        if done(app.world_mut()) {
            return true;
        }
    }
    false
}

pub fn in_use_projectiles(world: &mut World) -> Vec<Entity> {
    world
        .query_filtered::<(Entity, &PoolSlot), With<Projectile>>()
        .iter(world)
        .filter(|(_, slot)| **slot == PoolSlot::InUse)
        .map(|(e, _)| e)
        .collect()
}

/// Launch a player projectile well clear of the arena, so only injected
/// collisions reach it.
pub fn launch_stray(app: &mut App) -> Entity {
    let before = in_use_projectiles(app.world_mut());
    app.world_mut().write_message(LaunchProjectile {
        position: Vec3::new(0.0, 200.0, 0.0),
        direction: Vec3::Y,
        damage: 25.0,
        owner_tag: Tag::PLAYER,
    });
    app.update();
    in_use_projectiles(app.world_mut())
        .into_iter()
        .find(|e| !before.contains(e))
        .expect("a projectile should be in flight")
}

pub fn player(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<Player>>()
        .single(world)
        .expect("one player spawns on enter")
}

pub fn first_enemy(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<Enemy>>()
        .iter(world)
        .next()
        .expect("enemies spawn on enter")
}

pub fn health(world: &World, e: Entity) -> f32 {
    world.get::<Character>(e).map_or(f32::NAN, |c| c.health())
}

pub fn inject_collision(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}
