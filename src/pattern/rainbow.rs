//! Rainbow sweep
//!
//! Repaints a handful of pixels per tick, in shuffled order, with the color
//! wheel value of `pixel index + elapsed-time phase`. The whole strip drifts
//! through the wheel at a constant rate while individual pixels update out of
//! order, which gives the sweep its shimmer.

use embassy_time::Instant;
use rand::rngs::SmallRng;

use super::sweep::Sweep;
use super::{Pattern, Step};
use crate::color::{BLACK, wheel};
use crate::framebuffer::Framebuffer;
use crate::lifecycle::Phase;
use crate::logging::info;

/// Pixels repainted per tick
const PIXELS_PER_TICK: usize = 10;

/// Wheel steps the phase advances per second
const HUE_STEPS_PER_SECOND: u64 = 30;

/// Full blanking passes before the pattern goes idle
const DRAIN_PASSES: u8 = 2;

/// Wheel offset derived from the frame time
#[allow(clippy::cast_possible_truncation)]
fn hue_shift(now: Instant) -> u8 {
    ((now.as_millis() * HUE_STEPS_PER_SECOND / 1000) % 256) as u8
}

#[derive(Debug, Clone)]
pub struct RainbowPattern<const MAX_LEDS: usize> {
    sweep: Sweep<MAX_LEDS>,
    rng: SmallRng,
}

impl<const MAX_LEDS: usize> RainbowPattern<MAX_LEDS> {
    pub fn new(len: usize, mut rng: SmallRng) -> Self {
        Self {
            sweep: Sweep::new(len, &mut rng),
            rng,
        }
    }
}

impl<const MAX_LEDS: usize> Pattern<MAX_LEDS> for RainbowPattern<MAX_LEDS> {
    fn step(&mut self, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Phase {
        if step.hard_stop {
            frame.clear();
            return Phase::Idle;
        }

        if step.is_growing() {
            // Restarted mid-drain
            self.sweep.forget_drain();
        }

        let shift = hue_shift(step.now);
        for _ in 0..PIXELS_PER_TICK {
            if self.sweep.wrap() && step.is_growing() {
                info!("rainbow: full");
                return Phase::Active;
            }
            if step.is_retiring() && self.sweep.drained(DRAIN_PASSES) {
                info!("rainbow: done");
                return Phase::Idle;
            }

            let pos = self.sweep.advance();
            let color = if step.is_retiring() {
                BLACK
            } else {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let hue = (pos & 0xFF) as u8;
                wheel(hue.wrapping_add(shift))
            };
            frame.set(pos, color);
        }

        step.phase
    }

    fn reset(&mut self) {
        self.sweep.rewind();
        self.sweep.shuffle(&mut self.rng);
    }
}
