//! `SoundManager`: the audio pool as an injected system parameter.
//!
//! Systems that play sounds take `SoundManager` as an argument instead of
//! reaching for a global instance. All writes go through `Commands`, so an
//! emitter grown from the factory and one popped from the free list are
//! configured the same way.

use bevy::ecs::system::SystemParam;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::{AudioClip, AudioEmitter, AudioPool, inactive_emitter};
use crate::plugins::pooling::{Lifetime, PoolSlot};

/// Handle to a looping emitter.
///
/// The serial changes every time an emitter starts a loop, so a stale handle
/// cannot stop whatever the emitter plays next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopHandle {
    entity: Entity,
    serial: u64,
}

impl LoopHandle {
    #[inline]
    pub fn entity(self) -> Entity {
        self.entity
    }
}

/// Loops that are currently playing, keyed by emitter.
#[derive(Resource, Debug, Default)]
pub struct ActiveLoops {
    serials: HashMap<Entity, u64>,
    next_serial: u64,
}

impl ActiveLoops {
    #[inline]
    pub fn contains(&self, handle: LoopHandle) -> bool {
        self.serials.get(&handle.entity) == Some(&handle.serial)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.serials.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.serials.is_empty()
    }

    fn start(&mut self, entity: Entity) -> LoopHandle {
        self.next_serial += 1;
        self.serials.insert(entity, self.next_serial);
        LoopHandle {
            entity,
            serial: self.next_serial,
        }
    }

    fn stop(&mut self, handle: LoopHandle) -> bool {
        if !self.contains(handle) {
            return false;
        }
        self.serials.remove(&handle.entity);
        true
    }
}

#[derive(SystemParam)]
pub struct SoundManager<'w, 's> {
    commands: Commands<'w, 's>,
    pool: ResMut<'w, AudioPool>,
    loops: ResMut<'w, ActiveLoops>,
}

impl SoundManager<'_, '_> {
    /// Play `clip` once at `position`; the emitter returns itself after `clip.duration`.
    pub fn play_one_shot(&mut self, clip: &AudioClip, position: Vec3, volume: f32) -> Option<Entity> {
        let e = self.acquire()?;
        self.start(e, clip, position, volume, false);
        Some(e)
    }

    /// Play `clip` on repeat until `stop_looped` is called with the returned handle.
    pub fn play_looped(&mut self, clip: &AudioClip, position: Vec3, volume: f32) -> Option<LoopHandle> {
        let e = self.acquire()?;
        self.start(e, clip, position, volume, true);
        Some(self.loops.start(e))
    }

    /// Stop a loop and return its emitter. Unknown or stale handles are ignored.
    pub fn stop_looped(&mut self, handle: LoopHandle) -> bool {
        if !self.loops.stop(handle) {
            trace!("stop_looped: {handle:?} is not playing");
            return false;
        }

        let mut entity = self.commands.entity(handle.entity);
        entity
            .entry::<AudioEmitter>()
            .and_modify(|mut emitter| emitter.playing = false);
        entity.insert(PoolSlot::PendingRelease);
        true
    }

    #[inline]
    pub fn is_looping(&self, handle: LoopHandle) -> bool {
        self.loops.contains(handle)
    }

    fn acquire(&mut self) -> Option<Entity> {
        let Self { commands, pool, .. } = self;
        match pool.acquire(|| commands.spawn(inactive_emitter()).id()) {
            Ok(e) => Some(e),
            Err(err) => {
                warn!("sound dropped: {err}");
                None
            }
        }
    }

    fn start(&mut self, e: Entity, clip: &AudioClip, position: Vec3, volume: f32, looping: bool) {
        let lifetime = if looping {
            Lifetime::idle()
        } else {
            Lifetime::running(clip.duration)
        };

        self.commands.entity(e).insert((
            AudioEmitter {
                clip: Some(clip.clone()),
                volume: volume.clamp(0.0, 1.0),
                looping,
                playing: true,
            },
            PoolSlot::InUse,
            lifetime,
            Transform::from_translation(position),
        ));
    }
}
