//! Pattern lifecycle state machine
//!
//! Every pattern moves through the same four phases:
//!
//! ```text
//!   Idle --Start--> Activating --(capacity reached)--> Active
//!                        |                               |
//!                        +--Stop/HardStop--+--Stop/HardStop
//!                                          v
//!   Idle <--(empty / hard stop)-- Deactivating
//! ```
//!
//! Commands are only applied at tick boundaries. Growth and shrinkage
//! transitions are reported back by the pattern from its own step.

use embassy_time::Instant;

use crate::framebuffer::Framebuffer;
use crate::pattern::{Pattern, Step};

/// Lifecycle phase of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Dormant, the framebuffer is left untouched
    #[default]
    Idle,
    /// Running and spawning new elements until capacity is reached
    Activating,
    /// Running at capacity
    Active,
    /// Running without spawning, retiring elements until none remain
    Deactivating,
}

impl Phase {
    /// Whether the pattern is stepped this tick
    pub const fn is_running(self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Activating => "activating",
            Self::Active => "active",
            Self::Deactivating => "deactivating",
        }
    }
}

/// Transition request for a single pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    /// Fade out gracefully
    Stop,
    /// Finish within a tick and blank every pixel the pattern occupied
    HardStop,
}

/// Lifecycle wrapper shared by every pattern
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    phase: Phase,
    hard_stop: bool,
    ticks: u32,
}

impl Lifecycle {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            hard_stop: false,
            ticks: 0,
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the current deactivation was requested as a hard stop
    pub const fn is_hard_stopping(&self) -> bool {
        self.hard_stop
    }

    /// Number of steps taken since construction
    pub const fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Apply a transition request
    ///
    /// Returns `true` if the phase (or the hard stop flag) changed.
    pub fn apply(&mut self, action: Action) -> bool {
        match (action, self.phase) {
            (Action::Start, Phase::Idle | Phase::Deactivating) => {
                self.phase = Phase::Activating;
                self.hard_stop = false;
                true
            }
            (Action::Stop, Phase::Activating | Phase::Active) => {
                self.phase = Phase::Deactivating;
                true
            }
            (Action::HardStop, Phase::Activating | Phase::Active) => {
                self.phase = Phase::Deactivating;
                self.hard_stop = true;
                true
            }
            (Action::HardStop, Phase::Deactivating) if !self.hard_stop => {
                self.hard_stop = true;
                true
            }
            _ => false,
        }
    }

    /// Run one step of `pattern` against `frame`
    ///
    /// Idle patterns are skipped. When the pattern reports it has gone idle,
    /// its transient state is released through [`Pattern::reset`].
    pub fn step<const MAX_LEDS: usize, P: Pattern<MAX_LEDS>>(
        &mut self,
        pattern: &mut P,
        now: Instant,
        frame: &mut Framebuffer<MAX_LEDS>,
    ) -> Phase {
        if !self.phase.is_running() {
            return self.phase;
        }

        self.ticks = self.ticks.wrapping_add(1);
        let step = Step {
            phase: self.phase,
            hard_stop: self.hard_stop,
            now,
            tick: self.ticks,
        };

        let next = pattern.step(&step, frame);
        if next == Phase::Idle {
            pattern.reset();
            self.hard_stop = false;
        }
        self.phase = next;
        next
    }
}
