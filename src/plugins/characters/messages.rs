use bevy::prelude::*;

use crate::common::tags::Tag;

/// Request to run `amount` through a character's damage gate. Negative heals.
#[derive(Message, Clone, Copy, Debug)]
pub struct TakeDamage {
    pub target: Entity,
    pub amount: f32,
}

/// Health display sink: written whenever a hit changes a character's health.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct HealthChanged {
    pub entity: Entity,
    /// `health / max_health`, in `[0, 1]`.
    pub fraction: f32,
}

/// Written exactly once per character, on the hit that kills it.
///
/// Each character variant reacts in its own system (player: death screen,
/// enemies: removal).
#[derive(Message, Clone, Debug)]
pub struct CharacterDied {
    pub entity: Entity,
    pub tag: Tag,
}
