//! Cross-context command handoff
//!
//! The [`CommandBoard`] is the only state shared between the command source
//! and the frame loop. It holds one pending-command slot per pattern, guarded
//! by a critical section. A request that would be a no-op for the pattern's
//! current phase (Start while Active, any stop while Idle) is dropped and
//! leaves the slot alone. Otherwise a newer request overwrites an older
//! unapplied one. The renderer drains every slot at the start of a tick.
//!
//! The board also carries the phase of every pattern as last published by
//! the renderer, so the command side can observe the engine without touching
//! it.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::lifecycle::{Action, Phase};
use crate::logging::{debug, warn};
use crate::pattern::{PATTERN_COUNT, PatternId};

/// A single lifecycle request for one pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub target: PatternId,
    pub action: Action,
}

impl Command {
    pub const fn new(target: PatternId, action: Action) -> Self {
        Self { target, action }
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    pending: Option<Action>,
    phase: Phase,
}

impl Slot {
    const EMPTY: Self = Self {
        pending: None,
        phase: Phase::Idle,
    };

    /// Store `action` unless it is a no-op for the published phase
    fn offer(&mut self, action: Action) -> bool {
        let accepted = match action {
            Action::Start => self.phase != Phase::Active,
            Action::Stop | Action::HardStop => self.phase != Phase::Idle,
        };
        if accepted {
            self.pending = Some(action);
        }
        accepted
    }
}

/// Latest-wins mailbox between the command source and the renderer
pub struct CommandBoard {
    slots: Mutex<RefCell<[Slot; PATTERN_COUNT]>>,
}

impl CommandBoard {
    pub const fn new() -> Self {
        Self {
            slots: Mutex::new(RefCell::new([Slot::EMPTY; PATTERN_COUNT])),
        }
    }

    /// Get a dispatcher handle for this board
    ///
    /// Multiple dispatchers can coexist; the last accepted write to a slot
    /// wins.
    pub const fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher { board: self }
    }

    /// Post a command, replacing any unapplied one for the same pattern
    ///
    /// Returns `false` and leaves the slot untouched when the command is a
    /// no-op for the phase last published by the renderer.
    pub fn post(&self, command: Command) -> bool {
        critical_section::with(|cs| {
            self.slots.borrow(cs).borrow_mut()[command.target.index()].offer(command.action)
        })
    }

    /// Phase of `id` as of the last rendered tick
    pub fn phase(&self, id: PatternId) -> Phase {
        critical_section::with(|cs| self.slots.borrow(cs).borrow()[id.index()].phase)
    }

    /// Command waiting to be applied to `id`, if any
    pub fn pending(&self, id: PatternId) -> Option<Action> {
        critical_section::with(|cs| self.slots.borrow(cs).borrow()[id.index()].pending)
    }

    /// Drain every pending command, in registry order
    pub(crate) fn take_pending(&self) -> [Option<Action>; PATTERN_COUNT] {
        critical_section::with(|cs| {
            let mut slots = self.slots.borrow(cs).borrow_mut();
            let mut pending = [None; PATTERN_COUNT];
            for (taken, slot) in pending.iter_mut().zip(slots.iter_mut()) {
                *taken = slot.pending.take();
            }
            pending
        })
    }

    /// Record the phases reached at the end of a tick
    pub(crate) fn publish(&self, phases: &[Phase; PATTERN_COUNT]) {
        critical_section::with(|cs| {
            let mut slots = self.slots.borrow(cs).borrow_mut();
            for (slot, phase) in slots.iter_mut().zip(phases.iter()) {
                slot.phase = *phase;
            }
        });
    }
}

impl Default for CommandBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Command-side handle to a [`CommandBoard`]
///
/// Lightweight and `Copy`, pass it to whichever context receives commands.
#[derive(Clone, Copy)]
pub struct Dispatcher<'a> {
    board: &'a CommandBoard,
}

impl Dispatcher<'_> {
    /// Ask `id` to start
    ///
    /// Dropped, returning `false`, when the pattern is already active.
    pub fn request_start(&self, id: PatternId) -> bool {
        self.board.post(Command::new(id, Action::Start))
    }

    /// Ask `id` to stop, gracefully or with a hard stop
    ///
    /// Dropped, returning `false`, when the pattern is already idle.
    pub fn request_stop(&self, id: PatternId, hard: bool) -> bool {
        let action = if hard { Action::HardStop } else { Action::Stop };
        self.board.post(Command::new(id, action))
    }

    /// Start `id` and stop every other pattern, as one atomic update
    ///
    /// Others are hard-stopped when `id` is exclusive and faded out
    /// otherwise. Each request is subject to the same no-op rules as
    /// [`Self::request_start`] and [`Self::request_stop`].
    pub fn request_solo(&self, id: PatternId) {
        let stop = if id.is_exclusive() {
            Action::HardStop
        } else {
            Action::Stop
        };
        critical_section::with(|cs| {
            let mut slots = self.board.slots.borrow(cs).borrow_mut();
            for other in PatternId::ALL {
                let action = if other == id { Action::Start } else { stop };
                slots[other.index()].offer(action);
            }
        });
        debug!("solo {} ({:?} others)", id.as_str(), stop);
    }

    /// Handle one inbound command payload
    ///
    /// The payload is a pattern name; surrounding whitespace is ignored.
    /// Unknown names are dropped and reported as `false`.
    pub fn dispatch(&self, payload: &str) -> bool {
        let name = payload.trim();
        let Some(id) = PatternId::parse_from_str(name) else {
            warn!("unknown pattern {:?}, ignoring", name);
            return false;
        };
        self.request_solo(id);
        true
    }
}
