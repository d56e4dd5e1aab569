//! Audio: a growable pool of positional emitters.
//!
//! Emitters are the hand-off point to an audio backend: an in-use emitter with
//! `playing == true` is a sound that should be heard at its `Transform`.
//!
//! Release paths:
//! - one-shots: `Lifetime` runs for the clip duration, then the shared
//!   `expire_lifetimes` / `commit_releases` pair returns the emitter.
//! - loops: `Lifetime` stays idle; only `SoundManager::stop_looped` marks them
//!   `PendingRelease`.

pub mod music;
pub mod sound_manager;

use std::borrow::Cow;
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::schedule::CombatSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::pooling::{self, EntityPool, Lifetime, PoolPolicy, PoolSlot, Pooled};

pub use music::{MusicPlayer, PlayMusic, StopMusic};
pub use sound_manager::{ActiveLoops, LoopHandle, SoundManager};

/// Opaque clip handle from the asset layer. Only the duration matters here.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub name: Cow<'static, str>,
    pub duration: Duration,
}

impl AudioClip {
    pub const fn new(name: &'static str, duration: Duration) -> Self {
        Self {
            name: Cow::Borrowed(name),
            duration,
        }
    }
}

/// Clips the gameplay code plays for feedback.
#[derive(Resource, Debug, Clone)]
pub struct SoundBank {
    pub hit: AudioClip,
    pub heal: AudioClip,
    pub impact: AudioClip,
    pub explosion: AudioClip,
    pub music: AudioClip,
}

impl Default for SoundBank {
    fn default() -> Self {
        Self {
            hit: AudioClip::new("hit", Duration::from_millis(400)),
            heal: AudioClip::new("heal", Duration::from_millis(900)),
            impact: AudioClip::new("impact", Duration::from_millis(300)),
            explosion: AudioClip::new("explosion", Duration::from_millis(1200)),
            music: AudioClip::new("theme", Duration::from_secs(95)),
        }
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct AudioEmitter {
    pub clip: Option<AudioClip>,
    pub volume: f32,
    pub looping: bool,
    pub playing: bool,
}

impl Pooled for AudioEmitter {
    const LABEL: &'static str = "audio";

    fn on_release(&mut self) {
        *self = Self::default();
    }
}

pub type AudioPool = EntityPool<AudioEmitter>;

/// One-shot request for producers that don't hold the audio pool.
#[derive(Message, Clone, Debug)]
pub struct PlaySound {
    pub clip: AudioClip,
    pub position: Vec3,
    pub volume: f32,
}

impl PlaySound {
    pub fn at(clip: AudioClip, position: Vec3) -> Self {
        Self {
            clip,
            position,
            volume: 1.0,
        }
    }
}

/// Components of a free emitter.
pub fn inactive_emitter() -> impl Bundle {
    (
        Name::new("AudioEmitter(Pooled)"),
        AudioEmitter::default(),
        PoolSlot::Free,
        Lifetime::idle(),
        Transform::default(),
        DespawnOnExit(GameState::InGame),
    )
}

pub fn plugin(app: &mut App) {
    let tunables = app.world().resource::<Tunables>().clone();
    pooling::register_pool::<AudioEmitter>(
        app,
        PoolPolicy::Growable {
            max: tunables.audio_pool_max,
        },
    );

    app.insert_resource(SoundBank::default())
        .init_resource::<ActiveLoops>()
        .init_resource::<MusicPlayer>()
        .add_message::<PlaySound>()
        .add_message::<PlayMusic>()
        .add_message::<StopMusic>()
        .add_systems(Startup, init_audio_pool)
        .add_systems(OnEnter(GameState::InGame), music::start_level_music)
        .add_systems(FixedUpdate, music::advance_music_fades.in_set(CombatSet::Tick))
        .add_systems(
            FixedPostUpdate,
            (
                play_requested_sounds,
                music::handle_music_requests.after(play_requested_sounds),
            )
                .in_set(CombatSet::Feedback),
        );
}

pub fn init_audio_pool(mut commands: Commands, mut pool: ResMut<AudioPool>, tunables: Res<Tunables>) {
    pool.initialize(tunables.audio_pool_size, || commands.spawn(inactive_emitter()).id());
}

/// Consume `PlaySound` requests as one-shots.
pub fn play_requested_sounds(mut requests: MessageReader<PlaySound>, mut sounds: SoundManager) {
    for req in requests.read() {
        sounds.play_one_shot(&req.clip, req.position, req.volume);
    }
}
