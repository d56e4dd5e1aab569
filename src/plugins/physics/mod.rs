use avian3d::prelude::*;
use bevy::prelude::*;

/// Physics only detects overlaps here: nothing falls, projectiles and triggers
/// are sensors moved by gameplay systems.
pub fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(Vec3::ZERO));
}
