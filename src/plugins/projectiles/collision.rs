use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::Projectile;
use crate::common::tags::Tag;
use crate::common::tunables::Tunables;
use crate::plugins::audio::{PlaySound, SoundBank};
use crate::plugins::characters::{Character, TakeDamage, nearest_ancestor};
use crate::plugins::explosions::SpawnExplosion;
use crate::plugins::pooling::PoolSlot;

#[derive(Clone, Copy, Debug)]
pub(crate) struct CollisionTarget {
    pub collider: Entity,
    pub body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    pub fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
pub(crate) fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

/// Resolve projectile overlaps.
///
/// Per hit: explosion at the projectile, then exactly one of {damage, impact sound},
/// then `PendingRelease`. Contacts with the firer's own tag are ignored. The slot
/// check is the fence: once a projectile is pending, later events for it in the
/// same tick are skipped.
pub fn resolve_projectile_hits(
    mut started: MessageReader<CollisionStart>,
    tunables: Res<Tunables>,
    bank: Res<SoundBank>,
    mut q_projectiles: Query<(&Projectile, &mut PoolSlot, &Transform)>,
    q_tags: Query<&Tag>,
    q_characters: Query<(), With<Character>>,
    q_parents: Query<&ChildOf>,
    mut explosions: MessageWriter<SpawnExplosion>,
    mut damage: MessageWriter<TakeDamage>,
    mut sounds: MessageWriter<PlaySound>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_projectiles.contains(t1.collider);
        let p2 = q_projectiles.contains(t2.collider);
        if !(p1 ^ p2) {
            continue; // must be exactly one projectile
        }
        let (projectile_side, other_side) = if p1 { (t1, t2) } else { (t2, t1) };

        let Ok((projectile, mut slot, tf)) = q_projectiles.get_mut(projectile_side.collider) else {
            continue;
        };
        if *slot != PoolSlot::InUse {
            continue;
        }

        let position = tf.translation;
        let other_tag = nearest_ancestor(other_side.collider, &q_parents, |e| q_tags.contains(e))
            .and_then(|e| q_tags.get(e).ok())
            .cloned()
            .unwrap_or_default();

        if other_tag == projectile.owner_tag {
            if tunables.explode_on_owner_contact {
                explosions.write(SpawnExplosion {
                    position,
                    duration: tunables.explosion_duration,
                });
            }
            continue;
        }

        explosions.write(SpawnExplosion {
            position,
            duration: tunables.explosion_duration,
        });

        let character = if other_tag.is_combatant() {
            nearest_ancestor(other_side.gameplay_owner(), &q_parents, |e| {
                q_characters.contains(e)
            })
        } else {
            None
        };

        match character {
            Some(target) => {
                damage.write(TakeDamage {
                    target,
                    amount: projectile.damage,
                });
            }
            None => {
                sounds.write(PlaySound::at(bank.impact.clone(), position));
            }
        }

        trace!(
            "{} hit {other_tag} ({})",
            projectile_side.collider,
            other_side.collider
        );
        *slot = PoolSlot::PendingRelease;
    }
}
