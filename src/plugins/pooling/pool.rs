//! Generic object pool.
//!
//! The pool is pure bookkeeping over copyable handles (for us, `Entity`). It
//! never constructs anything on its own: construction goes through the factory
//! passed to `initialize` / `acquire`, so the caller decides how an instance is
//! built (usually `Commands::spawn`).
//!
//! Invariant: every handle the pool ever constructed is in exactly one of
//! `free` or `in_use`, so `free_len() + in_use_len() == total_constructed()`.

use std::hash::Hash;

use bevy::platform::collections::HashSet;
use thiserror::Error;

/// What happens when `acquire` finds no free instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPolicy {
    /// Exhaustion is a capacity decision: the request is refused.
    Fixed,
    /// Construct a new instance, optionally up to a hard cap.
    Growable { max: Option<usize> },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("{label} pool exhausted ({constructed} constructed, none free)")]
    Exhausted {
        label: &'static str,
        constructed: usize,
    },
    #[error("{label} pool: released instance is not in use from this pool")]
    InvalidRelease { label: &'static str },
}

#[derive(Debug)]
pub struct ObjectPool<T> {
    label: &'static str,
    policy: PoolPolicy,
    free: Vec<T>,
    in_use: HashSet<T>,
}

impl<T: Copy + Eq + Hash> ObjectPool<T> {
    pub fn new(label: &'static str, policy: PoolPolicy) -> Self {
        Self {
            label,
            policy,
            free: Vec::new(),
            in_use: HashSet::default(),
        }
    }

    /// Construct `size` instances, all free.
    ///
    /// Calling this again adds to the pool; nothing already constructed is forgotten.
    pub fn initialize(&mut self, size: usize, mut factory: impl FnMut() -> T) {
        self.free.reserve(size);
        for _ in 0..size {
            self.free.push(factory());
        }
    }

    /// Hand out a free instance, growing through `factory` if the policy allows.
    ///
    /// Which free instance comes back is unspecified.
    pub fn acquire(&mut self, factory: impl FnOnce() -> T) -> Result<T, PoolError> {
        let item = match self.free.pop() {
            Some(item) => item,
            None if self.can_grow() => factory(),
            None => return Err(self.exhausted()),
        };
        self.in_use.insert(item);
        Ok(item)
    }

    /// Hand out an already constructed free instance; never grows.
    pub fn acquire_free(&mut self) -> Result<T, PoolError> {
        let item = self.free.pop().ok_or_else(|| self.exhausted())?;
        self.in_use.insert(item);
        Ok(item)
    }

    /// Return an in-use instance.
    ///
    /// Rejects anything that is not currently checked out from this pool, which
    /// keeps a double release from duplicating an entry in the free list.
    pub fn release(&mut self, item: T) -> Result<(), PoolError> {
        if !self.in_use.remove(&item) {
            return Err(PoolError::InvalidRelease { label: self.label });
        }
        self.free.push(item);
        Ok(())
    }

    #[inline]
    pub fn is_in_use(&self, item: T) -> bool {
        self.in_use.contains(&item)
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn in_use_len(&self) -> usize {
        self.in_use.len()
    }

    #[inline]
    pub fn total_constructed(&self) -> usize {
        self.free.len() + self.in_use.len()
    }

    fn exhausted(&self) -> PoolError {
        PoolError::Exhausted {
            label: self.label,
            constructed: self.total_constructed(),
        }
    }

    fn can_grow(&self) -> bool {
        match self.policy {
            PoolPolicy::Fixed => false,
            PoolPolicy::Growable { max: None } => true,
            PoolPolicy::Growable { max: Some(max) } => self.total_constructed() < max,
        }
    }
}
