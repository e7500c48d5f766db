//! Diffusing blur
//!
//! Takes over whatever is on the strip and keeps smoothing it: every tick a
//! batch of shuffled pixels is replaced by the average of its neighbors.
//! Colored dots, occasional bursts and a slowly changing base hue keep
//! feeding new color into the glow.
//!
//! The pattern works on its own shadow copy of the strip and writes the
//! shadow out every tick, so the blend never depends on what other patterns
//! drew in between.

use heapless::Vec;
use rand::Rng;
use rand::rngs::SmallRng;

use super::sweep::Sweep;
use super::{Pattern, Step};
use crate::color::{BLACK, Rgb, average, wheel, wheel_scaled};
use crate::framebuffer::Framebuffer;
use crate::lifecycle::Phase;
use crate::logging::{debug, info};

/// Pixels blended (or blanked while deactivating) per tick
const PIXELS_PER_TICK: usize = 40;
const MAX_DOTS: usize = 10;
/// Ticks between adding a dot and re-rolling one
const DOT_INTERVAL: u32 = 10;
const BURST_INTERVAL: u32 = 30;
const BURST_WIDTH: i32 = 4;
const BASE_CHANGE_INTERVAL: u32 = 100;
const BASE_CHANGE_CHANCE: f64 = 0.1;
/// Dot hues are drawn from `base..base + HUE_SPREAD`
const HUE_SPREAD: u8 = 40;
const DRAIN_PASSES: u8 = 2;

#[derive(Debug, Clone, Copy)]
struct Dot {
    position: i32,
    color: Rgb,
}

#[derive(Debug, Clone)]
pub struct BlurPattern<const MAX_LEDS: usize> {
    shadow: Option<Framebuffer<MAX_LEDS>>,
    sweep: Sweep<MAX_LEDS>,
    dots: Vec<Dot, MAX_DOTS>,
    base_hue: u8,
    rng: SmallRng,
}

impl<const MAX_LEDS: usize> BlurPattern<MAX_LEDS> {
    pub fn new(len: usize, mut rng: SmallRng) -> Self {
        let sweep = Sweep::new(len, &mut rng);
        let base_hue = rng.gen_range(0..=u8::MAX);
        Self {
            shadow: None,
            sweep,
            dots: Vec::new(),
            base_hue,
            rng,
        }
    }

    fn new_dot(rng: &mut SmallRng, base_hue: u8, span: i32) -> Dot {
        let hue = base_hue.wrapping_add(rng.gen_range(0..HUE_SPREAD));
        let r = rng.gen_range(0.0f32..1.0);
        Dot {
            position: rng.gen_range(0..span.max(1)),
            color: wheel_scaled(hue, r * r),
        }
    }

    /// Blend or blank one batch of pixels
    ///
    /// Returns `true` once a deactivation has drained the strip.
    fn diffuse(
        shadow: &mut Framebuffer<MAX_LEDS>,
        sweep: &mut Sweep<MAX_LEDS>,
        rng: &mut SmallRng,
        retiring: bool,
    ) -> bool {
        for _ in 0..PIXELS_PER_TICK {
            if sweep.wrap() {
                sweep.shuffle(rng);
            }
            if retiring && sweep.drained(DRAIN_PASSES) {
                return true;
            }
            let pos = sweep.advance();
            let color = if retiring {
                BLACK
            } else {
                average(shadow.get(pos - 1), shadow.get(pos + 1))
            };
            shadow.set(pos, color);
        }
        false
    }

    fn feed(&mut self, step: &Step, shadow: &mut Framebuffer<MAX_LEDS>) {
        let span = shadow.span();
        for dot in &self.dots {
            shadow.set(dot.position, dot.color);
        }

        if self.dots.len() < MAX_DOTS && step.every(DOT_INTERVAL) {
            let dot = Self::new_dot(&mut self.rng, self.base_hue, span);
            let _ = self.dots.push(dot);
        }

        if step.every(DOT_INTERVAL) && !self.dots.is_empty() {
            let index = self.rng.gen_range(0..self.dots.len());
            self.dots[index] = Self::new_dot(&mut self.rng, self.base_hue, span);
        }

        if step.every(BURST_INTERVAL) {
            let color = wheel(self.rng.gen_range(0..=u8::MAX));
            let start = self.rng.gen_range(0..(span - BURST_WIDTH).max(1));
            for pos in start..start + BURST_WIDTH {
                shadow.set(pos, color);
            }
        }

        if step.every(BASE_CHANGE_INTERVAL) && self.rng.gen_bool(BASE_CHANGE_CHANCE) {
            self.base_hue = self.rng.gen_range(0..=u8::MAX);
            debug!("blur: base hue {}", self.base_hue);
        }
    }
}

impl<const MAX_LEDS: usize> Pattern<MAX_LEDS> for BlurPattern<MAX_LEDS> {
    fn step(&mut self, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Phase {
        if step.hard_stop {
            frame.clear();
            return Phase::Idle;
        }

        if step.is_growing() {
            self.sweep.forget_drain();
            self.shadow = Some(frame.clone());
            info!("blur: full");
            return Phase::Active;
        }

        // Entered without activating first, start from the current strip
        let mut shadow = self.shadow.take().unwrap_or_else(|| frame.clone());
        let retiring = step.is_retiring();
        let drained = Self::diffuse(&mut shadow, &mut self.sweep, &mut self.rng, retiring);
        if !retiring {
            self.feed(step, &mut shadow);
        }
        frame.copy_from(&shadow);
        self.shadow = Some(shadow);

        if drained {
            info!("blur: done");
            return Phase::Idle;
        }
        step.phase
    }

    fn reset(&mut self) {
        self.shadow = None;
        self.sweep.rewind();
        self.dots.clear();
        self.base_hue = self.rng.gen_range(0..=u8::MAX);
    }
}
