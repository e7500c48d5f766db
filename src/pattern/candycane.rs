//! Candycane stripes
//!
//! Red and white stripes enter at the start of the strip and scroll toward
//! its end, each with its own width and speed. A stripe that has scrolled
//! past the end is replaced by a fresh one.

use heapless::Vec;
use rand::Rng;
use rand::rngs::SmallRng;

use super::elements::{Elements, Fate, drive};
use super::{Pattern, Step};
use crate::color::{BLACK, Rgb, WHITE};
use crate::framebuffer::Framebuffer;
use crate::lifecycle::Phase;

const CAPACITY: usize = 20;
const SPAWN_INTERVAL: u32 = 5;
const MIN_RADIUS: i32 = 2;
const MAX_RADIUS: i32 = 6;
/// Extra pixels per tick while deactivating, to clear the strip sooner
const RETIRE_BOOST: u8 = 2;

const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

#[derive(Debug, Clone)]
struct Stripe {
    center: i32,
    radius: i32,
    speed: u8,
    color: Rgb,
}

#[derive(Debug, Clone)]
pub struct CandycanePattern {
    stripes: Vec<Stripe, CAPACITY>,
    rng: SmallRng,
}

impl CandycanePattern {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            stripes: Vec::new(),
            rng,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn new_stripe(&mut self) -> Stripe {
        let radius = self.rng.gen_range(MIN_RADIUS..=MAX_RADIUS);
        // 1..=3, with 2 twice as likely as either extreme
        let speed = (self.rng.gen_range(0.0f32..2.0) + 0.5) as u8 + 1;
        let color = if self.rng.gen_bool(0.5) { RED } else { WHITE };
        Stripe {
            center: -radius,
            radius,
            speed,
            color,
        }
    }
}

impl<const MAX_LEDS: usize> Elements<MAX_LEDS> for CandycanePattern {
    fn count(&self) -> usize {
        self.stripes.len()
    }

    fn capacity(&self) -> usize {
        CAPACITY
    }

    fn spawn_due(&mut self, step: &Step) -> bool {
        step.every(SPAWN_INTERVAL)
    }

    fn spawn(&mut self, _frame: &mut Framebuffer<MAX_LEDS>) {
        let stripe = self.new_stripe();
        let _ = self.stripes.push(stripe);
    }

    fn advance(&mut self, index: usize, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Fate {
        let stripe = &mut self.stripes[index];
        if stripe.center - stripe.radius > frame.span() {
            return Fate::Expired;
        }

        let boost = if step.is_retiring() { RETIRE_BOOST } else { 0 };
        for _ in 0..stripe.speed + boost {
            let lead = stripe.center + stripe.radius;
            if frame.contains(lead) {
                frame.set(lead, stripe.color);
            }
            let trail = (stripe.center - stripe.radius).max(0);
            if frame.contains(trail) {
                frame.set(trail, BLACK);
            }
            stripe.center += 1;
        }
        Fate::Alive
    }

    fn recycle(&mut self, index: usize, _frame: &mut Framebuffer<MAX_LEDS>) {
        self.stripes[index] = self.new_stripe();
    }

    fn retire(&mut self, index: usize) {
        self.stripes.remove(index);
    }

    fn erase(&mut self, frame: &mut Framebuffer<MAX_LEDS>) {
        for stripe in &self.stripes {
            for pos in (stripe.center - stripe.radius)..=(stripe.center + stripe.radius) {
                if frame.contains(pos) {
                    frame.set(pos, BLACK);
                }
            }
        }
        self.stripes.clear();
    }
}

impl<const MAX_LEDS: usize> Pattern<MAX_LEDS> for CandycanePattern {
    fn step(&mut self, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Phase {
        drive(self, step, frame)
    }

    fn reset(&mut self) {
        self.stripes.clear();
    }
}
