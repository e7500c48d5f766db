//! Twinkling stars
//!
//! Stars appear on random dark pixels, brighten in uneven jumps until they
//! reach full white, then fade back to black and reappear elsewhere.

use heapless::Vec;
use rand::Rng;
use rand::rngs::SmallRng;

use super::elements::{Elements, Fate, drive};
use super::{Pattern, Step};
use crate::color::{BLACK, Rgb, WHITE};
use crate::framebuffer::Framebuffer;
use crate::lifecycle::Phase;

const CAPACITY: usize = 50;
const SPAWN_INTERVAL: u32 = 4;
/// Largest per-channel jump while brightening
const MAX_FLARE: f32 = 25.0;
const RELOCATE_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, Copy)]
struct Star {
    position: i32,
    brightening: bool,
    color: Rgb,
}

impl Star {
    const fn dark(position: i32) -> Self {
        Self {
            position,
            brightening: true,
            color: BLACK,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TwinklePattern {
    stars: Vec<Star, CAPACITY>,
    rng: SmallRng,
}

impl TwinklePattern {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            stars: Vec::new(),
            rng,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn flare(&mut self) -> u8 {
        let r = self.rng.gen_range(0.0f32..1.0);
        (r * r * r * MAX_FLARE) as u8
    }

    /// Random position not taken by another star, if one turns up quickly
    fn free_position(&mut self, span: i32) -> i32 {
        let mut position = self.rng.gen_range(0..span);
        for _ in 0..RELOCATE_ATTEMPTS {
            if !self.stars.iter().any(|star| star.position == position) {
                break;
            }
            position = self.rng.gen_range(0..span);
        }
        position
    }
}

fn dim(channel: u8) -> u8 {
    // Fits in u8: channel * 9 / 10 < channel
    #[allow(clippy::cast_possible_truncation)]
    let dimmed = (u16::from(channel) * 9 / 10) as u8;
    dimmed
}

impl<const MAX_LEDS: usize> Elements<MAX_LEDS> for TwinklePattern {
    fn count(&self) -> usize {
        self.stars.len()
    }

    fn capacity(&self) -> usize {
        CAPACITY
    }

    fn spawn_due(&mut self, step: &Step) -> bool {
        step.every(SPAWN_INTERVAL)
    }

    fn spawn(&mut self, frame: &mut Framebuffer<MAX_LEDS>) {
        let position = self.free_position(frame.span());
        let _ = self.stars.push(Star::dark(position));
    }

    fn advance(&mut self, index: usize, _step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Fate {
        if self.stars[index].brightening {
            if self.stars[index].color == WHITE {
                self.stars[index].brightening = false;
            } else {
                let (r, g, b) = (self.flare(), self.flare(), self.flare());
                let color = &mut self.stars[index].color;
                color.r = color.r.saturating_add(r);
                color.g = color.g.saturating_add(g);
                color.b = color.b.saturating_add(b);
            }
        } else {
            let star = &mut self.stars[index];
            if star.color == BLACK {
                return Fate::Expired;
            }
            star.color = Rgb {
                r: dim(star.color.r),
                g: dim(star.color.g),
                b: dim(star.color.b),
            };
        }

        let star = self.stars[index];
        frame.set(star.position, star.color);
        Fate::Alive
    }

    fn recycle(&mut self, index: usize, frame: &mut Framebuffer<MAX_LEDS>) {
        let position = self.free_position(frame.span());
        self.stars[index] = Star::dark(position);
        frame.set(position, BLACK);
    }

    fn retire(&mut self, index: usize) {
        self.stars.remove(index);
    }

    fn erase(&mut self, frame: &mut Framebuffer<MAX_LEDS>) {
        for star in &self.stars {
            frame.set(star.position, BLACK);
        }
        self.stars.clear();
    }
}

impl<const MAX_LEDS: usize> Pattern<MAX_LEDS> for TwinklePattern {
    fn step(&mut self, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Phase {
        drive(self, step, frame)
    }

    fn reset(&mut self) {
        self.stars.clear();
    }
}
