//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod audio;
pub mod characters;
pub mod contact;
pub mod core;
pub mod enemies;
pub mod explosions;
pub mod physics;
pub mod player;
pub mod pooling;
pub mod projectiles;
pub mod ui;
pub mod world;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    audio::plugin(app);
    explosions::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    characters::plugin(app);
    contact::plugin(app);
    ui::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    world::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}
