//! Off pattern
//!
//! Blanks the strip one pixel per tick in a shuffled order, reshuffled
//! after every pass. Activation completes after the first full pass.

use rand::rngs::SmallRng;

use super::sweep::Sweep;
use super::{Pattern, Step};
use crate::color::BLACK;
use crate::framebuffer::Framebuffer;
use crate::lifecycle::Phase;
use crate::logging::info;

#[derive(Debug, Clone)]
pub struct OffPattern<const MAX_LEDS: usize> {
    sweep: Sweep<MAX_LEDS>,
    rng: SmallRng,
}

impl<const MAX_LEDS: usize> OffPattern<MAX_LEDS> {
    pub fn new(len: usize, mut rng: SmallRng) -> Self {
        Self {
            sweep: Sweep::new(len, &mut rng),
            rng,
        }
    }
}

impl<const MAX_LEDS: usize> Pattern<MAX_LEDS> for OffPattern<MAX_LEDS> {
    fn step(&mut self, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Phase {
        // Only ever writes black, nothing to wipe
        if step.hard_stop {
            return Phase::Idle;
        }

        if self.sweep.wrap() {
            self.sweep.shuffle(&mut self.rng);
            match step.phase {
                Phase::Activating => {
                    info!("off: strip cleared");
                    return Phase::Active;
                }
                Phase::Deactivating => return Phase::Idle,
                _ => {}
            }
        }

        frame.set(self.sweep.advance(), BLACK);
        step.phase
    }

    fn reset(&mut self) {
        self.sweep.rewind();
    }
}
