//! Shared phase loop for element-based patterns
//!
//! Candycane, Classic, Wind, Twinkle and Fairy all keep a list of effect
//! elements and follow the same rules: grow until capacity while
//! activating, recycle expired elements while running, retire them while
//! deactivating, and wipe everything at once on a hard stop.

use crate::framebuffer::Framebuffer;
use crate::lifecycle::Phase;

use super::Step;

/// Outcome of advancing one element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fate {
    Alive,
    Expired,
}

pub(crate) trait Elements<const MAX_LEDS: usize> {
    /// Number of live elements
    fn count(&self) -> usize;

    /// Element count at which activation is complete
    fn capacity(&self) -> usize;

    /// Whether a new element should be spawned this tick
    fn spawn_due(&mut self, step: &Step) -> bool;

    fn spawn(&mut self, frame: &mut Framebuffer<MAX_LEDS>);

    /// Age element `index` by one tick and draw it
    fn advance(&mut self, index: usize, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Fate;

    /// Replace an expired element while the pattern keeps running
    fn recycle(&mut self, index: usize, frame: &mut Framebuffer<MAX_LEDS>);

    /// Drop an expired element, preserving the order of the others
    fn retire(&mut self, index: usize);

    /// Blank every pixel the elements occupy and drop them all
    fn erase(&mut self, frame: &mut Framebuffer<MAX_LEDS>);
}

/// Run one tick of the element phase loop
///
/// Retired elements are removed in place and the same index is visited
/// again, so every survivor still advances during the tick.
pub(crate) fn drive<const MAX_LEDS: usize, E: Elements<MAX_LEDS>>(
    elements: &mut E,
    step: &Step,
    frame: &mut Framebuffer<MAX_LEDS>,
) -> Phase {
    if step.hard_stop {
        elements.erase(frame);
        return Phase::Idle;
    }

    let mut index = 0;
    while index < elements.count() {
        match elements.advance(index, step, frame) {
            Fate::Alive => index += 1,
            Fate::Expired if step.is_retiring() => elements.retire(index),
            Fate::Expired => {
                elements.recycle(index, frame);
                index += 1;
            }
        }
    }

    match step.phase {
        Phase::Deactivating if elements.count() == 0 => Phase::Idle,
        Phase::Activating if elements.count() >= elements.capacity() => Phase::Active,
        Phase::Activating => {
            if elements.spawn_due(step) {
                elements.spawn(frame);
            }
            Phase::Activating
        }
        phase => phase,
    }
}
