//! Contact damage: hazards, melee weapons, and pickups that hurt or heal on touch.
//!
//! Whatever carries `DamageOnContact` sends its amount through the touched
//! character's damage gate. Negative amounts heal (potions). Consumable contacts
//! fire once and are then marked for despawn.

use avian3d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::despawn::PendingDespawn;
use crate::common::schedule::CombatSet;
use crate::common::tags::Tag;
use crate::plugins::characters::{Character, TakeDamage, nearest_ancestor};
use crate::plugins::projectiles::collision::targets;

#[derive(Component, Debug, Clone)]
pub struct DamageOnContact {
    pub amount: f32,
    /// Characters with this tag are not affected (a weapon's wielder, an enemy's allies).
    pub ignore_tag: Option<Tag>,
    pub consume_on_use: bool,
}

impl DamageOnContact {
    pub fn hazard(amount: f32) -> Self {
        Self {
            amount,
            ignore_tag: None,
            consume_on_use: false,
        }
    }

    pub fn weapon(amount: f32, wielder: Tag) -> Self {
        Self {
            amount,
            ignore_tag: Some(wielder),
            consume_on_use: false,
        }
    }

    /// One-use heal for the player side. It is only used up by a touch that
    /// actually heals; at full health or during the hit cooldown it stays put.
    pub fn potion(heal: f32) -> Self {
        Self {
            amount: -heal.abs(),
            ignore_tag: Some(Tag::ENEMY),
            consume_on_use: true,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPostUpdate,
        resolve_contact_damage.in_set(CombatSet::Resolve),
    );
}

pub fn resolve_contact_damage(
    mut started: MessageReader<CollisionStart>,
    mut commands: Commands,
    q_sources: Query<&DamageOnContact, Without<PendingDespawn>>,
    q_characters: Query<(&Character, Option<&Tag>)>,
    q_parents: Query<&ChildOf>,
    mut damage: MessageWriter<TakeDamage>,
) {
    let mut consumed = HashSet::<Entity>::default();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        for (source_side, other_side) in [(t1, t2), (t2, t1)] {
            let source = nearest_ancestor(source_side.collider, &q_parents, |e| q_sources.contains(e));
            let Some(source) = source.filter(|e| !consumed.contains(e)) else {
                continue;
            };
            let Ok(contact) = q_sources.get(source) else {
                continue;
            };

            let target = nearest_ancestor(other_side.gameplay_owner(), &q_parents, |e| {
                q_characters.contains(e)
            });
            let Some(target) = target else {
                continue;
            };
            if target == source {
                continue;
            }

            let Ok((character, tag)) = q_characters.get(target) else {
                continue;
            };
            if contact.ignore_tag.is_some() && contact.ignore_tag.as_ref() == tag {
                continue;
            }
            if contact.consume_on_use && !character.would_change(contact.amount) {
                trace!("{source} not used up on {target}: no effect right now");
                continue;
            }

            damage.write(TakeDamage {
                target,
                amount: contact.amount,
            });

            if contact.consume_on_use {
                consumed.insert(source);
                commands.entity(source).insert((PendingDespawn, Visibility::Hidden));
            }
        }
    }
}
