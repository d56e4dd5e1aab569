use bevy::prelude::*;

use super::components::{Character, DamageOutcome};
use super::messages::{CharacterDied, HealthChanged, TakeDamage};
use crate::common::tags::Tag;
use crate::plugins::audio::{PlaySound, SoundBank};

/// Reopen hit windows whose cooldown has elapsed.
pub fn tick_hit_cooldowns(time: Res<Time>, mut q: Query<&mut Character>) {
    let dt = time.delta();
    for mut character in &mut q {
        if character.hit_cooldown_active() {
            character.tick(dt);
        }
    }
}

/// Run queued damage through each target's state machine and report the results.
///
/// Targets without a `Character` are skipped: no capability, no damage.
pub fn apply_damage_requests(
    mut requests: MessageReader<TakeDamage>,
    mut q: Query<(&mut Character, Option<&Tag>, Option<&Transform>)>,
    bank: Res<SoundBank>,
    mut health_changed: MessageWriter<HealthChanged>,
    mut died: MessageWriter<CharacterDied>,
    mut sounds: MessageWriter<PlaySound>,
) {
    for req in requests.read() {
        let Ok((mut character, tag, tf)) = q.get_mut(req.target) else {
            continue;
        };

        let outcome = character.take_damage(req.amount);
        let DamageOutcome::Applied { health, died: killed, .. } = outcome else {
            debug!("damage {} to {} dropped: {outcome:?}", req.amount, req.target);
            continue;
        };

        health_changed.write(HealthChanged {
            entity: req.target,
            fraction: character.health_fraction(),
        });

        let position = tf.map_or(Vec3::ZERO, |tf| tf.translation);
        if req.amount > 0.0 {
            sounds.write(PlaySound::at(bank.hit.clone(), position));
        } else if req.amount < 0.0 {
            sounds.write(PlaySound::at(bank.heal.clone(), position));
        }

        if killed {
            let tag = tag.cloned().unwrap_or_default();
            info!("{tag} {} died", req.target);
            died.write(CharacterDied {
                entity: req.target,
                tag,
            });
        } else {
            trace!("{} health now {health}", req.target);
        }
    }
}
