//! World plugin: arena floor and walls, plus a hazard and a health potion.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tags::Tag;
use crate::plugins::contact::DamageOnContact;

const HALF_EXTENT: f32 = 12.0;
const WALL_HEIGHT: f32 = 3.0;
const THICKNESS: f32 = 0.5;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_triggers));
}

fn spawn_arena(mut commands: Commands) {
    let world_layers = CollisionLayers::new(
        Layer::World,
        [
            Layer::Player,
            Layer::Enemy,
            Layer::PlayerProjectile,
            Layer::EnemyProjectile,
        ],
    );

    let mut spawn_block = |name: &'static str, pos: Vec3, size: Vec3| {
        commands.spawn((
            Name::new(name),
            Tag::ENVIRONMENT,
            Transform::from_translation(pos),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            world_layers,
            DespawnOnExit(GameState::InGame),
        ));
    };

    let span = HALF_EXTENT * 2.0 + THICKNESS * 2.0;
    let edge = HALF_EXTENT + THICKNESS * 0.5;
    let mid = WALL_HEIGHT * 0.5;

    spawn_block("Floor", Vec3::new(0.0, -THICKNESS * 0.5, 0.0), Vec3::new(span, THICKNESS, span));
    spawn_block("WallNorth", Vec3::new(0.0, mid, -edge), Vec3::new(span, WALL_HEIGHT, THICKNESS));
    spawn_block("WallSouth", Vec3::new(0.0, mid, edge), Vec3::new(span, WALL_HEIGHT, THICKNESS));
    spawn_block("WallWest", Vec3::new(-edge, mid, 0.0), Vec3::new(THICKNESS, WALL_HEIGHT, span));
    spawn_block("WallEast", Vec3::new(edge, mid, 0.0), Vec3::new(THICKNESS, WALL_HEIGHT, span));
}

/// Contact triggers are dynamic sensors so they report overlaps with the
/// kinematic player; zero gravity keeps them in place.
fn spawn_triggers(mut commands: Commands) {
    let trigger_layers = CollisionLayers::new(Layer::Trigger, [Layer::Player]);

    commands.spawn((
        Name::new("HealthPotion"),
        Tag::new("Pickup"),
        DamageOnContact::potion(50.0),
        Transform::from_xyz(6.0, 0.5, 4.0),
        RigidBody::Dynamic,
        Collider::sphere(0.3),
        Sensor,
        CollisionEventsEnabled,
        trigger_layers,
        Visibility::Visible,
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("FirePit"),
        Tag::ENVIRONMENT,
        DamageOnContact::hazard(15.0),
        Transform::from_xyz(-6.0, 0.25, 4.0),
        RigidBody::Dynamic,
        Collider::cuboid(2.0, 0.5, 2.0),
        Sensor,
        CollisionEventsEnabled,
        trigger_layers,
        DespawnOnExit(GameState::InGame),
    ));
}
