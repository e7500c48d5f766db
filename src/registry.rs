//! Pattern registry
//!
//! Holds one entry per catalog pattern, in compositing order. Every tick the
//! entries are stepped in that order against the shared framebuffer, so a
//! later pattern paints over an earlier one wherever both write.

use embassy_time::Instant;

use crate::error::EngineError;
use crate::framebuffer::{Framebuffer, check_strip_len};
use crate::lifecycle::{Action, Lifecycle, Phase};
use crate::logging::{debug, info};
use crate::pattern::{PATTERN_COUNT, PatternId, PatternSlot};

/// Seed used when the caller does not provide one
pub const DEFAULT_SEED: u64 = 0x5eed_1e57_c0de_f00d;

/// One catalog pattern together with its lifecycle
#[derive(Debug, Clone)]
pub struct PatternEntry<const MAX_LEDS: usize> {
    id: PatternId,
    lifecycle: Lifecycle,
    pattern: PatternSlot<MAX_LEDS>,
}

impl<const MAX_LEDS: usize> PatternEntry<MAX_LEDS> {
    fn new(id: PatternId, len: usize, seed: u64) -> Self {
        Self {
            id,
            lifecycle: Lifecycle::new(),
            pattern: id.to_slot(len, seed),
        }
    }

    pub const fn id(&self) -> PatternId {
        self.id
    }

    pub const fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub const fn is_exclusive(&self) -> bool {
        self.id.is_exclusive()
    }

    pub const fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Apply a transition request, returning whether anything changed
    pub fn apply(&mut self, action: Action) -> bool {
        let changed = self.lifecycle.apply(action);
        if changed {
            debug!("{}: {:?} -> {}", self.id.as_str(), action, self.phase().as_str());
        }
        changed
    }

    /// Step the pattern if it is running
    pub fn step(&mut self, now: Instant, frame: &mut Framebuffer<MAX_LEDS>) -> Phase {
        let before = self.phase();
        let after = self.lifecycle.step(&mut self.pattern, now, frame);
        if before != after {
            info!("{}: {} -> {}", self.id.as_str(), before.as_str(), after.as_str());
        }
        after
    }
}

/// Every catalog pattern, indexed by [`PatternId::index`]
#[derive(Debug, Clone)]
pub struct Registry<const MAX_LEDS: usize> {
    entries: [PatternEntry<MAX_LEDS>; PATTERN_COUNT],
}

impl<const MAX_LEDS: usize> Registry<MAX_LEDS> {
    /// Build every pattern for a strip of `len` pixels with the default seed
    pub fn new(len: usize) -> Result<Self, EngineError> {
        Self::with_seed(len, DEFAULT_SEED)
    }

    /// Build every pattern, deriving each random source from `seed`
    pub fn with_seed(len: usize, seed: u64) -> Result<Self, EngineError> {
        check_strip_len::<MAX_LEDS>(len)?;
        Ok(Self {
            entries: PatternId::ALL.map(|id| PatternEntry::new(id, len, seed)),
        })
    }

    pub fn entry(&self, id: PatternId) -> &PatternEntry<MAX_LEDS> {
        &self.entries[id.index()]
    }

    pub fn apply(&mut self, id: PatternId, action: Action) -> bool {
        self.entries[id.index()].apply(action)
    }

    /// Step every running pattern in compositing order
    pub fn step_all(&mut self, now: Instant, frame: &mut Framebuffer<MAX_LEDS>) {
        for entry in &mut self.entries {
            entry.step(now, frame);
        }
    }

    /// Current phase of every pattern, indexed by [`PatternId::index`]
    pub fn phases(&self) -> [Phase; PATTERN_COUNT] {
        let mut phases = [Phase::Idle; PATTERN_COUNT];
        for (phase, entry) in phases.iter_mut().zip(self.entries.iter()) {
            *phase = entry.phase();
        }
        phases
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatternEntry<MAX_LEDS>> {
        self.entries.iter()
    }
}
