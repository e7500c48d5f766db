//! Shuffled full-strip sweep
//!
//! Visits every pixel once per pass in a random order. Used by the patterns
//! that repaint the whole strip a few pixels at a time.

use heapless::Vec;
use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone)]
pub(crate) struct Sweep<const MAX_LEDS: usize> {
    order: Vec<u16, MAX_LEDS>,
    cursor: usize,
    drained: u8,
}

impl<const MAX_LEDS: usize> Sweep<MAX_LEDS> {
    /// Sweep over `len` pixels in an order drawn from `rng`
    pub(crate) fn new<R: Rng>(len: usize, rng: &mut R) -> Self {
        let mut order = Vec::new();
        for pos in (0..len).filter_map(|pos| u16::try_from(pos).ok()) {
            if order.push(pos).is_err() {
                break;
            }
        }
        order.shuffle(rng);
        Self {
            order,
            cursor: 0,
            drained: 0,
        }
    }

    /// Rewind to the start of a pass if the current one is complete
    ///
    /// Returns `true` when a pass was just completed.
    pub(crate) fn wrap(&mut self) -> bool {
        if self.cursor < self.order.len() {
            return false;
        }
        self.cursor = 0;
        true
    }

    /// Next pixel of the current pass
    pub(crate) fn advance(&mut self) -> i32 {
        let pos = self.order.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        i32::from(pos)
    }

    /// Count drain passes while deactivating
    ///
    /// Called once per visited pixel. Each time the sweep sits at the start
    /// of a pass one more pass is counted; after `passes` complete passes
    /// the drain is reported as finished.
    pub(crate) fn drained(&mut self, passes: u8) -> bool {
        if self.cursor != 0 {
            return false;
        }
        if self.drained >= passes {
            self.drained = 0;
            return true;
        }
        self.drained += 1;
        false
    }

    pub(crate) fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
    }

    /// Drop drain progress from an interrupted deactivation
    pub(crate) fn forget_drain(&mut self) {
        self.drained = 0;
    }

    /// Return to the start of a pass and forget drain progress
    pub(crate) fn rewind(&mut self) {
        self.cursor = 0;
        self.forget_drain();
    }
}
