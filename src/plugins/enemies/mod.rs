//! Enemies plugin: stationary targets with a `Character` and contact damage.
//!
//! Death hook: an enemy that dies stops interacting immediately (collision
//! filters cleared, hidden) and is despawned later in `PostUpdate`. We don't
//! despawn inside the fixed step, since other systems may still have queued
//! work for the entity.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::despawn::PendingDespawn;
use crate::common::layers::Layer;
use crate::common::schedule::CombatSet;
use crate::common::state::GameState;
use crate::common::tags::Tag;
use crate::common::tunables::Tunables;
use crate::plugins::characters::{Character, CharacterDied};
use crate::plugins::contact::DamageOnContact;

#[derive(Component)]
pub struct Enemy;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_targets)
        .add_systems(FixedPostUpdate, on_enemy_death.in_set(CombatSet::Feedback));
}

/// Spawn a few stationary targets.
pub fn spawn_targets(mut commands: Commands, tunables: Res<Tunables>) {
    let enemy_layers = CollisionLayers::new(
        Layer::Enemy,
        [Layer::World, Layer::Player, Layer::PlayerProjectile],
    );

    for (i, x) in [-4.0, 0.0, 4.0].into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("EnemyTarget{i}")),
            Enemy,
            Tag::ENEMY,
            Character::new(
                tunables.enemy_max_health,
                tunables.enemy_damage_per_hit,
                tunables.hit_cooldown,
            ),
            DamageOnContact::weapon(tunables.enemy_damage_per_hit, Tag::ENEMY),
            Transform::from_xyz(x, 1.0, -6.0),
            RigidBody::Static,
            Collider::capsule(0.5, 1.0),
            // Weapon contacts need avian to report this collider's overlaps.
            CollisionEventsEnabled,
            enemy_layers,
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Enemy death: stop colliding, hide, and queue the despawn.
pub fn on_enemy_death(
    mut commands: Commands,
    mut died: MessageReader<CharacterDied>,
    mut q: Query<&mut CollisionLayers, With<Enemy>>,
) {
    for ev in died.read() {
        let Ok(mut layers) = q.get_mut(ev.entity) else {
            continue;
        };
        layers.filters = LayerMask::NONE;
        commands
            .entity(ev.entity)
            .insert((PendingDespawn, Visibility::Hidden));
    }
}
