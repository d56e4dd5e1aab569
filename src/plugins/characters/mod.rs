//! Characters: health, hit cooldown and death.
//!
//! ```text
//!   TakeDamage ──> Ready ──(health > 0)──> Cooldown ──(timer)──> Ready
//!                    │
//!                    └──(health == 0)──> Dead   (terminal, CharacterDied once)
//! ```
//! Hits arriving in `Cooldown` or `Dead` are dropped, not queued.

pub mod capability;
pub mod components;
pub mod messages;
pub mod systems;

use bevy::prelude::*;

use crate::common::schedule::CombatSet;

pub use capability::nearest_ancestor;
pub use components::{Character, CharacterState, DamageOutcome, DropReason};
pub use messages::{CharacterDied, HealthChanged, TakeDamage};

pub fn plugin(app: &mut App) {
    app.add_message::<TakeDamage>()
        .add_message::<HealthChanged>()
        .add_message::<CharacterDied>()
        .add_systems(FixedUpdate, systems::tick_hit_cooldowns.in_set(CombatSet::Tick))
        .add_systems(
            FixedPostUpdate,
            systems::apply_damage_requests.in_set(CombatSet::Apply),
        );
}
