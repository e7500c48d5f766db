//! Wind gusts
//!
//! Each gust crosses its own window of the strip, swelling toward the
//! middle of the window and fading out at both ends. Gusts are blue with a
//! varying amount of white mixed in.

use heapless::Vec;
use libm::{fabsf, powf};
use rand::Rng;
use rand::rngs::SmallRng;

use super::elements::{Elements, Fate, drive};
use super::{Pattern, Step};
use crate::color::{BLACK, Rgb, saturate};
use crate::framebuffer::Framebuffer;
use crate::lifecycle::Phase;

const CAPACITY: usize = 20;
const SPAWN_INTERVAL: u32 = 6;
const MIN_WIDTH: i32 = 10;
const MAX_WIDTH: i32 = 40;
/// Neighbor pixels glow at this fraction of the head
const HALO: f32 = 0.25;

#[derive(Debug, Clone, Copy)]
struct Gust {
    head: i32,
    start: i32,
    end: i32,
    /// Share of red and green mixed into the blue, `0.5..=1.0`
    tint: f32,
}

impl Gust {
    /// Head intensity for the current position, 0 at the window edges
    #[allow(clippy::cast_precision_loss)]
    fn intensity(&self) -> f32 {
        let width = (self.end - self.start).max(1) as f32;
        let f = (self.end - self.head) as f32 / width;
        let bell = ((0.5 - fabsf(f - 0.5)) * 2.0).max(0.0);
        255.0 * powf(bell, 4.0)
    }

    fn color(&self, intensity: f32) -> Rgb {
        let tinted = saturate(intensity * self.tint);
        Rgb {
            r: tinted,
            g: tinted,
            b: saturate(intensity),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindPattern {
    gusts: Vec<Gust, CAPACITY>,
    rng: SmallRng,
}

impl WindPattern {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            gusts: Vec::new(),
            rng,
        }
    }

    fn new_gust(&mut self, span: i32) -> Gust {
        let width = self
            .rng
            .gen_range(MIN_WIDTH..MAX_WIDTH)
            .min(span - 1)
            .max(1);
        let start = self.rng.gen_range(0..(span - width).max(1));
        let tint = (self.rng.gen_range(0.0f32..1.0) + 0.5).min(1.0);
        Gust {
            head: start,
            start,
            end: start + width,
            tint,
        }
    }
}

impl<const MAX_LEDS: usize> Elements<MAX_LEDS> for WindPattern {
    fn count(&self) -> usize {
        self.gusts.len()
    }

    fn capacity(&self) -> usize {
        CAPACITY
    }

    fn spawn_due(&mut self, step: &Step) -> bool {
        step.every(SPAWN_INTERVAL)
    }

    fn spawn(&mut self, frame: &mut Framebuffer<MAX_LEDS>) {
        let gust = self.new_gust(frame.span());
        let _ = self.gusts.push(gust);
    }

    fn advance(&mut self, index: usize, _step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Fate {
        let gust = &mut self.gusts[index];
        if gust.head > gust.end + 1 {
            frame.set(gust.head, BLACK);
            frame.set(gust.head + 1, BLACK);
            return Fate::Expired;
        }

        let intensity = gust.intensity();
        frame.set(gust.head - 1, BLACK);
        frame.set(gust.head, gust.color(intensity * HALO));
        gust.head += 1;
        frame.set(gust.head, gust.color(intensity));
        frame.set(gust.head + 1, gust.color(intensity * HALO));
        Fate::Alive
    }

    fn recycle(&mut self, index: usize, frame: &mut Framebuffer<MAX_LEDS>) {
        self.gusts[index] = self.new_gust(frame.span());
    }

    fn retire(&mut self, index: usize) {
        self.gusts.remove(index);
    }

    fn erase(&mut self, frame: &mut Framebuffer<MAX_LEDS>) {
        for gust in &self.gusts {
            for pos in (gust.head - 1)..=(gust.head + 1) {
                frame.set(pos, BLACK);
            }
        }
        self.gusts.clear();
    }
}

impl<const MAX_LEDS: usize> Pattern<MAX_LEDS> for WindPattern {
    fn step(&mut self, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Phase {
        drive(self, step, frame)
    }

    fn reset(&mut self) {
        self.gusts.clear();
    }
}
