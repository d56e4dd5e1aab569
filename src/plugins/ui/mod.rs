//! HUD sink.
//!
//! Rendering the bar and the death screen belongs to the UI layer; gameplay only
//! writes what should be shown.

use bevy::prelude::*;

use crate::common::schedule::CombatSet;
use crate::plugins::characters::HealthChanged;
use crate::plugins::player::Player;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HudState {
    pub player_health_fraction: f32,
    pub death_screen_visible: bool,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            player_health_fraction: 1.0,
            death_screen_visible: false,
        }
    }
}

impl HudState {
    pub fn set_health_fraction(&mut self, fraction: f32) {
        self.player_health_fraction = fraction.clamp(0.0, 1.0);
    }

    pub fn show_death_screen(&mut self) {
        self.death_screen_visible = true;
    }

    pub fn hide_death_screen(&mut self) {
        self.death_screen_visible = false;
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<HudState>().add_systems(
        FixedPostUpdate,
        sync_player_health.in_set(CombatSet::Feedback),
    );
}

pub fn sync_player_health(
    mut changes: MessageReader<HealthChanged>,
    q_player: Query<(), With<Player>>,
    mut hud: ResMut<HudState>,
) {
    for change in changes.read() {
        if q_player.contains(change.entity) {
            hud.set_health_fraction(change.fraction);
        }
    }
}
