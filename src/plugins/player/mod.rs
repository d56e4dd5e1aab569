//! Player plugin.
//!
//! Pipeline:
//! - Update: fire input -> `LaunchProjectile`
//! - FixedPostUpdate: death hook (lock controls, death screen)
//! - Update: while dead, restart or quit input
//!
//! Movement and aiming belong to the controller layer; this only reads the
//! player's `Transform` to know where and which way to cast.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::schedule::CombatSet;
use crate::common::state::GameState;
use crate::common::tags::Tag;
use crate::common::tunables::Tunables;
use crate::plugins::audio::{PlayMusic, SoundBank, StopMusic};
use crate::plugins::characters::{Character, CharacterDied};
use crate::plugins::projectiles::LaunchProjectile;
use crate::plugins::ui::HudState;

#[derive(Component)]
pub struct Player;

/// Present while the player is dead; fire input is ignored.
#[derive(Component)]
pub struct ControlsLocked;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (request_player_casts, restart_or_quit).run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedPostUpdate, on_player_death.in_set(CombatSet::Feedback));
}

pub fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let layers = CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::Enemy, Layer::EnemyProjectile, Layer::Trigger],
    );

    commands.spawn((
        Name::new("Player"),
        Player,
        Tag::PLAYER,
        Character::new(
            tunables.player_max_health,
            tunables.player_damage_per_hit,
            tunables.hit_cooldown,
        ),
        Transform::from_xyz(0.0, 1.0, 8.0),
        RigidBody::Kinematic,
        Collider::capsule(0.4, 1.0),
        layers,
        DespawnOnExit(GameState::InGame),
    ));
}

/// Producer: fire input becomes a launch request along the player's facing.
pub fn request_player_casts(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    q_player: Query<(&Transform, &Character), (With<Player>, Without<ControlsLocked>)>,
    tunables: Res<Tunables>,
    mut writer: MessageWriter<LaunchProjectile>,
) {
    let Some(buttons) = buttons else { return; };
    if !buttons.just_pressed(MouseButton::Left) { return; }

    let (tf, character) = match q_player.single() {
        Ok(v) => v,
        Err(e) => { debug!("No castable Player: {e:?}"); return; }
    };

    let direction = tf.forward().as_vec3();
    writer.write(LaunchProjectile {
        position: tf.translation + direction * tunables.cast_offset,
        direction,
        damage: character.damage_per_hit,
        owner_tag: Tag::PLAYER,
    });
}

/// Player death: lock controls, show the death screen, fade the music out.
pub fn on_player_death(
    mut commands: Commands,
    mut died: MessageReader<CharacterDied>,
    q_player: Query<(), With<Player>>,
    mut hud: ResMut<HudState>,
    tunables: Res<Tunables>,
    mut music: MessageWriter<StopMusic>,
) {
    for ev in died.read() {
        if !q_player.contains(ev.entity) {
            continue;
        }
        commands.entity(ev.entity).insert(ControlsLocked);
        hud.show_death_screen();
        music.write(StopMusic { fade: tunables.music_fade });
    }
}

/// On the death screen: R revives at full health, Q / Escape quits.
pub fn restart_or_quit(
    mut commands: Commands,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut hud: ResMut<HudState>,
    mut q_player: Query<(Entity, &mut Character), (With<Player>, With<ControlsLocked>)>,
    mut exit: MessageWriter<AppExit>,
    (bank, tunables): (Res<SoundBank>, Res<Tunables>),
    mut music: MessageWriter<PlayMusic>,
) {
    if !hud.death_screen_visible { return; }
    let Some(keys) = keys else { return; };

    if keys.just_pressed(KeyCode::KeyQ) || keys.just_pressed(KeyCode::Escape) {
        info!("quit from death screen");
        exit.write(AppExit::Success);
        return;
    }

    if keys.just_pressed(KeyCode::KeyR) {
        for (e, mut character) in &mut q_player {
            character.revive();
            commands.entity(e).remove::<ControlsLocked>();
            hud.set_health_fraction(character.health_fraction());
        }
        hud.hide_death_screen();
        music.write(PlayMusic::theme(&bank, &tunables));
        info!("player restarted");
    }
}
