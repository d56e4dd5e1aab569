//! Background music: one looped track at a time, with volume fades.
//!
//! Switching tracks fades the old loop out while the new one fades in. A loop
//! whose fade-out completes is stopped through `SoundManager`, which is the
//! only way a looped emitter goes back to the pool.

use std::time::Duration;

use bevy::prelude::*;

use super::sound_manager::{LoopHandle, SoundManager};
use super::{AudioClip, AudioEmitter, SoundBank};
use crate::common::tunables::Tunables;

#[derive(Message, Clone, Debug)]
pub struct PlayMusic {
    pub clip: AudioClip,
    pub volume: f32,
    pub fade: Duration,
}

impl PlayMusic {
    /// The level theme at the configured volume, faded in.
    pub fn theme(bank: &SoundBank, tunables: &Tunables) -> Self {
        Self {
            clip: bank.music.clone(),
            volume: tunables.music_volume,
            fade: tunables.music_fade,
        }
    }
}

#[derive(Message, Clone, Copy, Debug)]
pub struct StopMusic {
    pub fade: Duration,
}

#[derive(Debug, Clone)]
pub struct VolumeFade {
    pub handle: LoopHandle,
    from: f32,
    to: f32,
    timer: Timer,
    stop_when_done: bool,
}

impl VolumeFade {
    fn new(handle: LoopHandle, from: f32, to: f32, fade: Duration, stop_when_done: bool) -> Self {
        Self {
            handle,
            from,
            to,
            timer: Timer::new(fade, TimerMode::Once),
            stop_when_done,
        }
    }

    #[inline]
    fn volume(&self) -> f32 {
        self.from + (self.to - self.from) * self.timer.fraction()
    }
}

#[derive(Resource, Debug, Default)]
pub struct MusicPlayer {
    current: Option<(LoopHandle, f32)>,
    fades: Vec<VolumeFade>,
}

impl MusicPlayer {
    #[inline]
    pub fn current(&self) -> Option<LoopHandle> {
        self.current.map(|(handle, _)| handle)
    }

    #[inline]
    pub fn fades(&self) -> &[VolumeFade] {
        &self.fades
    }

    fn fade_out_current(&mut self, fade: Duration) {
        let Some((handle, volume)) = self.current.take() else {
            return;
        };
        // A track still fading in starts its fade-out from wherever it got to.
        let from = self
            .fades
            .iter()
            .position(|f| f.handle == handle)
            .map(|i| self.fades.swap_remove(i).volume())
            .unwrap_or(volume);
        self.fades.push(VolumeFade::new(handle, from, 0.0, fade, true));
    }
}

pub fn start_level_music(
    bank: Res<SoundBank>,
    tunables: Res<Tunables>,
    mut play: MessageWriter<PlayMusic>,
) {
    play.write(PlayMusic::theme(&bank, &tunables));
}

pub fn handle_music_requests(
    mut play: MessageReader<PlayMusic>,
    mut stop: MessageReader<StopMusic>,
    mut player: ResMut<MusicPlayer>,
    mut sounds: SoundManager,
) {
    for req in stop.read() {
        player.fade_out_current(req.fade);
    }

    for req in play.read() {
        player.fade_out_current(req.fade);

        let volume = req.volume.clamp(0.0, 1.0);
        let start = if req.fade.is_zero() { volume } else { 0.0 };
        let Some(handle) = sounds.play_looped(&req.clip, Vec3::ZERO, start) else {
            continue;
        };

        if !req.fade.is_zero() {
            player.fades.push(VolumeFade::new(handle, 0.0, volume, req.fade, false));
        }
        player.current = Some((handle, volume));
        debug!("music: {} started", req.clip.name);
    }
}

pub fn advance_music_fades(
    time: Res<Time>,
    mut player: ResMut<MusicPlayer>,
    mut emitters: Query<&mut AudioEmitter>,
    mut sounds: SoundManager,
) {
    let dt = time.delta();
    player.fades.retain_mut(|fade| {
        fade.timer.tick(dt);
        if let Ok(mut emitter) = emitters.get_mut(fade.handle.entity()) {
            emitter.volume = fade.volume();
        }

        if !fade.timer.is_finished() {
            return true;
        }
        if fade.stop_when_done {
            sounds.stop_looped(fade.handle);
        }
        false
    });
}
