//! Timed entity: active for a bounded duration, then expires.
//!
//! `Lifetime` replaces a "wait N seconds, then deactivate" coroutine with
//! explicit timer state advanced once per tick. An idle lifetime never expires,
//! which is how looped sounds opt out of timeout release.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Default)]
pub struct Lifetime {
    timer: Option<Timer>,
}

impl Lifetime {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn running(duration: Duration) -> Self {
        let mut lifetime = Self::default();
        lifetime.activate(duration);
        lifetime
    }

    /// Start (or restart) the countdown from zero.
    ///
    /// Any pending expiry from an earlier activation is dropped.
    pub fn activate(&mut self, duration: Duration) {
        self.timer = Some(Timer::new(duration, TimerMode::Once));
    }

    /// Stop the countdown without expiring. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.timer.take().is_some()
    }

    /// Advance by `delta`. Returns `true` on the tick the lifetime runs out, and
    /// never again until the next `activate`.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if timer.is_finished() {
            self.timer = None;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.timer.as_ref().map_or(Duration::ZERO, Timer::elapsed)
    }

    #[inline]
    pub fn duration(&self) -> Option<Duration> {
        self.timer.as_ref().map(Timer::duration)
    }
}
