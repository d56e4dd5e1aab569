//! Gameplay tags.
//!
//! A tag names which side an entity fights for. Projectiles remember the tag of
//! whoever fired them so they never hit their own side.

use std::borrow::Cow;
use std::fmt;

use bevy::prelude::*;

#[derive(Component, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    pub const PLAYER: Tag = Tag(Cow::Borrowed("Player"));
    pub const ENEMY: Tag = Tag(Cow::Borrowed("Enemy"));
    pub const ENVIRONMENT: Tag = Tag(Cow::Borrowed("Environment"));
    pub const UNTAGGED: Tag = Tag(Cow::Borrowed("Untagged"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Player and Enemy take damage from hits; everything else gets an impact sound.
    #[inline]
    pub fn is_combatant(&self) -> bool {
        *self == Self::PLAYER || *self == Self::ENEMY
    }
}

impl Default for Tag {
    fn default() -> Self {
        Self::UNTAGGED
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
