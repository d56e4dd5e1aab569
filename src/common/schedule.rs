//! Fixed-step system ordering.
//!
//! ```text
//! FixedUpdate:     Tick      (timers, motion)
//! FixedPostUpdate: (avian writes CollisionStart)
//!                  Resolve -> Apply -> Effects -> Feedback -> Commit
//! ```
//!
//! Only `Commit` returns entities to their pools. Everything before it marks
//! `PendingRelease`, so an entity released during a tick cannot be handed out
//! again until that tick's processing is done.

use avian3d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use super::state::GameState;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Advance timers and integrate motion.
    Tick,
    /// Interpret collision events into intent messages.
    Resolve,
    /// Run the character damage state machine.
    Apply,
    /// Place pooled effects (explosions).
    Effects,
    /// Sounds, death hooks, HUD sink.
    Feedback,
    /// Return pending entities to their pools.
    Commit,
}

pub fn configure(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        CombatSet::Tick.run_if(in_state(GameState::InGame)),
    );
    app.configure_sets(
        FixedPostUpdate,
        (
            CombatSet::Resolve,
            CombatSet::Apply,
            CombatSet::Effects,
            CombatSet::Feedback,
            CombatSet::Commit,
        )
            .chain()
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
}
