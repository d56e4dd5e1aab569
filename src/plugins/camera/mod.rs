//! Camera plugin (render-only): first-person view that tracks the player.
//!
//! `follow_player` reads the player's `Transform` and writes the camera's; the
//! `Without<Player>` filter keeps the two queries disjoint.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::player::Player;

const EYE_HEIGHT: f32 = 0.7;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)))
        .add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera3d::default(),
        MainCamera,
        Transform::from_xyz(0.0, 1.0 + EYE_HEIGHT, 8.0),
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight::default(),
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    q_player: Query<&Transform, With<Player>>,
    mut q_camera: Query<&mut Transform, (With<MainCamera>, Without<Player>)>,
) {
    let Ok(player) = q_player.single() else { return; };
    let Ok(mut camera) = q_camera.single_mut() else { return; };

    camera.translation = player.translation + Vec3::Y * EYE_HEIGHT;
    camera.rotation = player.rotation;
}
