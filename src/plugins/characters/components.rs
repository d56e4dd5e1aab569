use std::time::Duration;

use bevy::prelude::*;

/// Damage gate: `Ready` accepts one hit, then `Cooldown` ignores hits until its
/// timer runs out. `Dead` is terminal.
#[derive(Debug, Clone)]
pub enum CharacterState {
    Ready,
    Cooldown(Timer),
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Dead,
    Cooldown,
    NotFinite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Health changed (possibly by zero). `died` is true on the one hit that killed.
    Applied {
        previous: f32,
        health: f32,
        died: bool,
    },
    /// Nothing happened.
    Dropped(DropReason),
}

/// Health + hit cooldown state machine shared by every character variant.
///
/// Negative amounts heal through the same entry point, so potions respect the
/// cooldown gate too.
#[derive(Component, Debug, Clone)]
pub struct Character {
    health: f32,
    max_health: f32,
    pub damage_per_hit: f32,
    hit_cooldown: Duration,
    state: CharacterState,
}

impl Character {
    pub fn new(max_health: f32, damage_per_hit: f32, hit_cooldown: Duration) -> Self {
        let max_health = max_health.max(0.0);
        Self {
            health: max_health,
            max_health,
            damage_per_hit,
            hit_cooldown,
            state: CharacterState::Ready,
        }
    }

    /// Start below full health (clamped to `[0, max_health]`).
    ///
    /// Starting at zero spawns the character already `Dead`; no death is reported.
    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health.clamp(0.0, self.max_health);
        if self.health == 0.0 {
            self.state = CharacterState::Dead;
        }
        self
    }

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        match self.state {
            CharacterState::Dead => return DamageOutcome::Dropped(DropReason::Dead),
            CharacterState::Cooldown(_) => return DamageOutcome::Dropped(DropReason::Cooldown),
            CharacterState::Ready => {}
        }
        if !amount.is_finite() {
            return DamageOutcome::Dropped(DropReason::NotFinite);
        }

        let previous = self.health;
        self.health = (self.health - amount).clamp(0.0, self.max_health);

        let died = self.health == 0.0;
        self.state = if died {
            CharacterState::Dead
        } else {
            CharacterState::Cooldown(Timer::new(self.hit_cooldown, TimerMode::Once))
        };

        DamageOutcome::Applied {
            previous,
            health: self.health,
            died,
        }
    }

    /// Whether `amount` would change health right now: the gate is open and a
    /// heal has room to land.
    pub fn would_change(&self, amount: f32) -> bool {
        if !matches!(self.state, CharacterState::Ready) || !amount.is_finite() {
            return false;
        }
        if amount < 0.0 {
            self.health < self.max_health
        } else {
            amount > 0.0 && self.health > 0.0
        }
    }

    /// Advance the cooldown window. Returns `true` on the tick it reopens.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let CharacterState::Cooldown(timer) = &mut self.state else {
            return false;
        };
        timer.tick(delta);
        if timer.is_finished() {
            self.state = CharacterState::Ready;
            return true;
        }
        false
    }

    /// Back to full health and ready, from any state.
    pub fn revive(&mut self) {
        self.health = self.max_health;
        self.state = CharacterState::Ready;
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    #[inline]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        matches!(self.state, CharacterState::Dead)
    }

    #[inline]
    pub fn hit_cooldown_active(&self) -> bool {
        matches!(self.state, CharacterState::Cooldown(_))
    }

    #[inline]
    pub fn state(&self) -> &CharacterState {
        &self.state
    }
}
