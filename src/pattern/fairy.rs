//! Fairy trails
//!
//! A few bright white heads cross the whole strip, each trailing a shimmer
//! of colored sparks. Spark brightness and hue vary along the strip through
//! fixed per-pixel textures, so trails flicker as they pass.

use heapless::Vec;
use libm::powf;
use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::elements::{Elements, Fate, drive};
use super::{Pattern, Step};
use crate::color::{BLACK, WHITE, wheel_scaled};
use crate::framebuffer::Framebuffer;
use crate::lifecycle::Phase;

const CAPACITY: usize = 6;
const MIN_LENGTH: u8 = 8;
const MAX_LENGTH: u8 = 23;
const MAX_OFFSETS: usize = MAX_LENGTH as usize;
/// Ticks that must pass between spawns
const SPAWN_COOLDOWN: u32 = 50;
const SPAWN_CHANCE: f64 = 0.1;
const RELAUNCH_CHANCE: f64 = 0.02;
const HUE_JITTER: u8 = 40;

#[derive(Debug, Clone)]
struct Wisp {
    head: i32,
    direction: i32,
    hue: u8,
    length: i32,
    /// Trail offsets `1..length`, reshuffled every tick
    offsets: Vec<u8, MAX_OFFSETS>,
}

impl Wisp {
    /// Whether the whole trail has left the strip
    fn is_gone(&self, span: i32) -> bool {
        self.head > span + self.length || self.head < -self.length
    }
}

#[derive(Debug, Clone)]
pub struct FairyPattern<const MAX_LEDS: usize> {
    wisps: Vec<Wisp, CAPACITY>,
    /// Per-pixel spark brightness
    brightness: Vec<f32, MAX_LEDS>,
    /// Per-pixel hue offset
    hue_offsets: Vec<u8, MAX_LEDS>,
    since_spawn: u32,
    rng: SmallRng,
}

impl<const MAX_LEDS: usize> FairyPattern<MAX_LEDS> {
    pub fn new(len: usize, mut rng: SmallRng) -> Self {
        let mut brightness = Vec::new();
        let mut hue_offsets = Vec::new();
        for _ in 0..len.min(MAX_LEDS) {
            let r = rng.gen_range(0.0f32..1.0);
            let _ = brightness.push(r * r);
            let _ = hue_offsets.push(rng.gen_range(0..HUE_JITTER));
        }
        Self {
            wisps: Vec::new(),
            brightness,
            hue_offsets,
            since_spawn: 0,
            rng,
        }
    }

    fn new_wisp(&mut self, span: i32) -> Wisp {
        let direction = if self.rng.gen_bool(0.5) { 1 } else { -1 };
        let length = self.rng.gen_range(MIN_LENGTH..MAX_LENGTH);
        let mut offsets = Vec::new();
        for offset in 1..length {
            let _ = offsets.push(offset);
        }
        Wisp {
            head: if direction > 0 { 0 } else { span - 1 },
            direction,
            hue: self.rng.gen_range(0..=u8::MAX),
            length: i32::from(length),
            offsets,
        }
    }

    #[allow(clippy::cast_sign_loss)]
    fn texture(&self, index: i32) -> (f32, u8) {
        let len = i32::try_from(self.brightness.len()).unwrap_or(i32::MAX).max(1);
        let index = index.rem_euclid(len) as usize;
        (
            self.brightness.get(index).copied().unwrap_or(0.0),
            self.hue_offsets.get(index).copied().unwrap_or(0),
        )
    }
}

impl<const MAX_LEDS: usize> Elements<MAX_LEDS> for FairyPattern<MAX_LEDS> {
    fn count(&self) -> usize {
        self.wisps.len()
    }

    fn capacity(&self) -> usize {
        CAPACITY
    }

    fn spawn_due(&mut self, _step: &Step) -> bool {
        let due = self.wisps.is_empty()
            || (self.since_spawn > SPAWN_COOLDOWN && self.rng.gen_bool(SPAWN_CHANCE));
        if due {
            self.since_spawn = 0;
        }
        self.since_spawn += 1;
        due
    }

    fn spawn(&mut self, frame: &mut Framebuffer<MAX_LEDS>) {
        let wisp = self.new_wisp(frame.span());
        let _ = self.wisps.push(wisp);
    }

    #[allow(clippy::cast_precision_loss)]
    fn advance(&mut self, index: usize, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Fate {
        let span = frame.span();
        let mut wisp = self.wisps[index].clone();
        wisp.offsets.shuffle(&mut self.rng);
        if step.is_retiring() {
            let heading_far = if wisp.direction > 0 {
                wisp.head < span / 2
            } else {
                wisp.head > span / 2
            };
            if heading_far {
                wisp.direction = -wisp.direction;
            }
        }
        if wisp.is_gone(span) {
            self.wisps[index] = wisp;
            return Fate::Expired;
        }

        let tail = wisp.head - wisp.length * wisp.direction;
        if frame.contains(tail) {
            frame.set(tail, BLACK);
        }
        if frame.contains(wisp.head) {
            frame.set(wisp.head, WHITE);
        }

        let sparks = usize::try_from(wisp.length / 3).unwrap_or(0);
        let reach = (wisp.length - 1) as f32;
        for offset in wisp.offsets.iter().take(sparks) {
            let x = i32::from(*offset) * wisp.direction;
            let target = wisp.head - x;
            if !frame.contains(target) {
                continue;
            }
            let (texture_brightness, hue_offset) = self.texture(wisp.head + x);
            let falloff = (wisp.length + 1 - x.abs()) as f32 / reach;
            let brightness = powf(falloff, 3.0) * texture_brightness;
            frame.set(target, wheel_scaled(wisp.hue.wrapping_add(hue_offset), brightness));
        }

        wisp.head += wisp.direction;
        self.wisps[index] = wisp;
        Fate::Alive
    }

    fn recycle(&mut self, index: usize, frame: &mut Framebuffer<MAX_LEDS>) {
        if self.since_spawn > SPAWN_COOLDOWN && self.rng.gen_bool(RELAUNCH_CHANCE) {
            self.wisps[index] = self.new_wisp(frame.span());
            self.since_spawn = 0;
        }
        self.since_spawn += 1;
    }

    fn retire(&mut self, index: usize) {
        self.wisps.remove(index);
    }

    fn erase(&mut self, frame: &mut Framebuffer<MAX_LEDS>) {
        for wisp in &self.wisps {
            for pos in (wisp.head - wisp.length)..=(wisp.head + wisp.length) {
                if frame.contains(pos) {
                    frame.set(pos, BLACK);
                }
            }
        }
        self.wisps.clear();
    }
}

impl<const MAX_LEDS: usize> Pattern<MAX_LEDS> for FairyPattern<MAX_LEDS> {
    fn step(&mut self, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Phase {
        drive(self, step, frame)
    }

    fn reset(&mut self) {
        self.wisps.clear();
        self.since_spawn = 0;
        self.brightness.shuffle(&mut self.rng);
        self.hue_offsets.shuffle(&mut self.rng);
    }
}
