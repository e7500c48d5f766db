//! Classic warm bulbs
//!
//! Bulbs sit on anchors spread every few pixels, glow for a random while,
//! then go dark and usually light up again in the same spot. Now and then a
//! bulb hops to a different anchor.

use heapless::Vec;
use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::elements::{Elements, Fate, drive};
use super::{Pattern, Step};
use crate::color::{BLACK, Rgb};
use crate::framebuffer::Framebuffer;
use crate::lifecycle::Phase;

const MAX_BULBS: usize = 75;
const ANCHOR_SPACING: usize = 4;
const MAX_DWELL: u8 = 100;
/// Chance that a relit bulb stays where it was
const STAY_PROBABILITY: f64 = 0.95;

const WARM: Rgb = Rgb {
    r: 220,
    g: 180,
    b: 50,
};

#[derive(Debug, Clone, Copy)]
struct Bulb {
    position: i32,
    dwell: u8,
}

#[derive(Debug, Clone)]
pub struct ClassicPattern<const MAX_LEDS: usize> {
    anchors: Vec<u16, MAX_LEDS>,
    bulbs: Vec<Bulb, MAX_BULBS>,
    rng: SmallRng,
}

impl<const MAX_LEDS: usize> ClassicPattern<MAX_LEDS> {
    pub fn new(len: usize, mut rng: SmallRng) -> Self {
        let mut anchors = Vec::new();
        let usable = len - len % ANCHOR_SPACING;
        for anchor in (0..usable).step_by(ANCHOR_SPACING) {
            let Ok(anchor) = u16::try_from(anchor) else {
                break;
            };
            if anchors.push(anchor).is_err() {
                break;
            }
        }
        anchors.shuffle(&mut rng);
        Self {
            anchors,
            bulbs: Vec::new(),
            rng,
        }
    }

    /// Light a bulb for `slot`, keeping `previous` position most of the time
    fn light(
        &mut self,
        slot: usize,
        previous: Option<i32>,
        frame: &mut Framebuffer<MAX_LEDS>,
    ) -> Bulb {
        let position = match previous {
            Some(position) if self.rng.gen_bool(STAY_PROBABILITY) => position,
            _ => {
                let anchor = self
                    .anchors
                    .get(slot % self.anchors.len().max(1))
                    .copied()
                    .unwrap_or(0);
                i32::from(anchor) + self.rng.gen_range(0..4)
            }
        };
        frame.set(position, WARM);
        Bulb {
            position,
            dwell: self.rng.gen_range(0..MAX_DWELL),
        }
    }
}

impl<const MAX_LEDS: usize> Elements<MAX_LEDS> for ClassicPattern<MAX_LEDS> {
    fn count(&self) -> usize {
        self.bulbs.len()
    }

    fn capacity(&self) -> usize {
        MAX_BULBS.min(self.anchors.len())
    }

    fn spawn_due(&mut self, _step: &Step) -> bool {
        true
    }

    fn spawn(&mut self, frame: &mut Framebuffer<MAX_LEDS>) {
        let bulb = self.light(self.bulbs.len(), None, frame);
        let _ = self.bulbs.push(bulb);
    }

    fn advance(&mut self, index: usize, _step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Fate {
        let bulb = &mut self.bulbs[index];
        if bulb.dwell == 0 {
            frame.set(bulb.position, BLACK);
            return Fate::Expired;
        }
        bulb.dwell -= 1;
        Fate::Alive
    }

    fn recycle(&mut self, index: usize, frame: &mut Framebuffer<MAX_LEDS>) {
        let previous = self.bulbs[index].position;
        self.bulbs[index] = self.light(index, Some(previous), frame);
    }

    fn retire(&mut self, index: usize) {
        self.bulbs.remove(index);
    }

    fn erase(&mut self, frame: &mut Framebuffer<MAX_LEDS>) {
        for bulb in &self.bulbs {
            frame.set(bulb.position, BLACK);
        }
        self.bulbs.clear();
    }
}

impl<const MAX_LEDS: usize> Pattern<MAX_LEDS> for ClassicPattern<MAX_LEDS> {
    fn step(&mut self, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Phase {
        drive(self, step, frame)
    }

    fn reset(&mut self) {
        self.bulbs.clear();
        self.anchors.shuffle(&mut self.rng);
    }
}
