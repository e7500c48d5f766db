//! Pattern system with a fixed catalog of generators
//!
//! All patterns are stored in an enum to avoid heap allocations.
//! Each pattern implements the [`Pattern`] trait and owns its own seeded
//! random source, so a run can be reproduced from a single seed.

mod blur;
mod candycane;
mod classic;
mod elements;
mod fairy;
mod off;
mod rainbow;
mod sweep;
mod twinkle;
mod wind;

pub use blur::BlurPattern;
pub use candycane::CandycanePattern;
pub use classic::ClassicPattern;
pub use fairy::FairyPattern;
pub use off::OffPattern;
pub use rainbow::RainbowPattern;
pub use twinkle::TwinklePattern;
pub use wind::WindPattern;

use embassy_time::Instant;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::framebuffer::Framebuffer;
use crate::lifecycle::Phase;

const PATTERN_NAME_OFF: &str = "off";
const PATTERN_NAME_RAINBOW: &str = "rainbow";
const PATTERN_NAME_CANDYCANE: &str = "candycane";
const PATTERN_NAME_CLASSIC: &str = "classic";
const PATTERN_NAME_WIND: &str = "wind";
const PATTERN_NAME_TWINKLE: &str = "twinkle";
const PATTERN_NAME_FAIRY: &str = "fairy";
const PATTERN_NAME_BLUR: &str = "blur";

const PATTERN_ID_OFF: u8 = 0;
const PATTERN_ID_RAINBOW: u8 = 1;
const PATTERN_ID_CANDYCANE: u8 = 2;
const PATTERN_ID_CLASSIC: u8 = 3;
const PATTERN_ID_WIND: u8 = 4;
const PATTERN_ID_TWINKLE: u8 = 5;
const PATTERN_ID_FAIRY: u8 = 6;
const PATTERN_ID_BLUR: u8 = 7;

/// Number of patterns in the catalog
pub const PATTERN_COUNT: usize = 8;

/// Golden-ratio increment used to derive per-pattern seeds
const SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-tick input handed to a pattern
#[derive(Debug, Clone, Copy)]
pub struct Step {
    /// Phase the pattern is in for this tick
    pub phase: Phase,
    /// Deactivation was requested as a hard stop
    pub hard_stop: bool,
    /// Frame timestamp
    pub now: Instant,
    /// Steps taken by this pattern, starting at 1
    pub tick: u32,
}

impl Step {
    /// Pattern should stop growing and retire its elements
    pub const fn is_retiring(&self) -> bool {
        matches!(self.phase, Phase::Deactivating)
    }

    /// Pattern is still growing toward its capacity
    pub const fn is_growing(&self) -> bool {
        matches!(self.phase, Phase::Activating)
    }

    /// Whether this tick is a multiple of `interval`
    pub const fn every(&self, interval: u32) -> bool {
        self.tick % interval == 0
    }
}

pub trait Pattern<const MAX_LEDS: usize> {
    /// Render one tick and return the phase the pattern ends up in
    ///
    /// Patterns only ever move forward: `Activating` to `Active`,
    /// `Deactivating` to `Idle`. Any other phase is returned unchanged.
    fn step(&mut self, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Phase;

    /// Release transient state before the next activation
    fn reset(&mut self) {}
}

/// Known pattern ids, in compositing order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PatternId {
    Off = PATTERN_ID_OFF,
    Rainbow = PATTERN_ID_RAINBOW,
    Candycane = PATTERN_ID_CANDYCANE,
    Classic = PATTERN_ID_CLASSIC,
    Wind = PATTERN_ID_WIND,
    Twinkle = PATTERN_ID_TWINKLE,
    Fairy = PATTERN_ID_FAIRY,
    Blur = PATTERN_ID_BLUR,
}

impl PatternId {
    /// Every pattern, in registry order
    pub const ALL: [Self; PATTERN_COUNT] = [
        Self::Off,
        Self::Rainbow,
        Self::Candycane,
        Self::Classic,
        Self::Wind,
        Self::Twinkle,
        Self::Fairy,
        Self::Blur,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_OFF => Self::Off,
            PATTERN_ID_RAINBOW => Self::Rainbow,
            PATTERN_ID_CANDYCANE => Self::Candycane,
            PATTERN_ID_CLASSIC => Self::Classic,
            PATTERN_ID_WIND => Self::Wind,
            PATTERN_ID_TWINKLE => Self::Twinkle,
            PATTERN_ID_FAIRY => Self::Fairy,
            PATTERN_ID_BLUR => Self::Blur,
            _ => return None,
        })
    }

    /// Position in the registry
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => PATTERN_NAME_OFF,
            Self::Rainbow => PATTERN_NAME_RAINBOW,
            Self::Candycane => PATTERN_NAME_CANDYCANE,
            Self::Classic => PATTERN_NAME_CLASSIC,
            Self::Wind => PATTERN_NAME_WIND,
            Self::Twinkle => PATTERN_NAME_TWINKLE,
            Self::Fairy => PATTERN_NAME_FAIRY,
            Self::Blur => PATTERN_NAME_BLUR,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_OFF => Some(Self::Off),
            PATTERN_NAME_RAINBOW => Some(Self::Rainbow),
            PATTERN_NAME_CANDYCANE => Some(Self::Candycane),
            PATTERN_NAME_CLASSIC => Some(Self::Classic),
            PATTERN_NAME_WIND => Some(Self::Wind),
            PATTERN_NAME_TWINKLE => Some(Self::Twinkle),
            PATTERN_NAME_FAIRY => Some(Self::Fairy),
            PATTERN_NAME_BLUR => Some(Self::Blur),
            _ => None,
        }
    }

    /// Patterns that take over the whole strip when active
    ///
    /// Soloing an exclusive pattern hard-stops everything else; soloing any
    /// other pattern lets the rest fade out.
    pub const fn is_exclusive(self) -> bool {
        matches!(self, Self::Rainbow | Self::Blur)
    }

    /// Seed for this pattern's random source, derived from a base seed
    pub const fn seed(self, base: u64) -> u64 {
        base.wrapping_add(SEED_STRIDE.wrapping_mul(self as u64 + 1))
    }

    /// Build the generator for this id
    pub fn to_slot<const MAX_LEDS: usize>(self, len: usize, seed: u64) -> PatternSlot<MAX_LEDS> {
        let rng = SmallRng::seed_from_u64(self.seed(seed));
        match self {
            Self::Off => PatternSlot::Off(OffPattern::new(len, rng)),
            Self::Rainbow => PatternSlot::Rainbow(RainbowPattern::new(len, rng)),
            Self::Candycane => PatternSlot::Candycane(CandycanePattern::new(rng)),
            Self::Classic => PatternSlot::Classic(ClassicPattern::new(len, rng)),
            Self::Wind => PatternSlot::Wind(WindPattern::new(rng)),
            Self::Twinkle => PatternSlot::Twinkle(TwinklePattern::new(rng)),
            Self::Fairy => PatternSlot::Fairy(FairyPattern::new(len, rng)),
            Self::Blur => PatternSlot::Blur(BlurPattern::new(len, rng)),
        }
    }
}

/// Pattern slot - enum containing every generator
#[derive(Debug, Clone)]
pub enum PatternSlot<const MAX_LEDS: usize> {
    /// Clears the strip pixel by pixel
    Off(OffPattern<MAX_LEDS>),
    /// Color wheel sweep
    Rainbow(RainbowPattern<MAX_LEDS>),
    /// Red and white stripes scrolling along the strip
    Candycane(CandycanePattern),
    /// Warm bulbs that hold and hop
    Classic(ClassicPattern<MAX_LEDS>),
    /// Blue-white gusts
    Wind(WindPattern),
    /// Sparkles that flare to white and fade
    Twinkle(TwinklePattern),
    /// Sparkle trails crossing the strip
    Fairy(FairyPattern<MAX_LEDS>),
    /// Diffusing glow seeded by colored dots
    Blur(BlurPattern<MAX_LEDS>),
}

impl<const MAX_LEDS: usize> PatternSlot<MAX_LEDS> {
    pub fn id(&self) -> PatternId {
        match self {
            Self::Off(_) => PatternId::Off,
            Self::Rainbow(_) => PatternId::Rainbow,
            Self::Candycane(_) => PatternId::Candycane,
            Self::Classic(_) => PatternId::Classic,
            Self::Wind(_) => PatternId::Wind,
            Self::Twinkle(_) => PatternId::Twinkle,
            Self::Fairy(_) => PatternId::Fairy,
            Self::Blur(_) => PatternId::Blur,
        }
    }
}

impl<const MAX_LEDS: usize> Pattern<MAX_LEDS> for PatternSlot<MAX_LEDS> {
    fn step(&mut self, step: &Step, frame: &mut Framebuffer<MAX_LEDS>) -> Phase {
        match self {
            Self::Off(pattern) => pattern.step(step, frame),
            Self::Rainbow(pattern) => pattern.step(step, frame),
            Self::Candycane(pattern) => pattern.step(step, frame),
            Self::Classic(pattern) => pattern.step(step, frame),
            Self::Wind(pattern) => pattern.step(step, frame),
            Self::Twinkle(pattern) => pattern.step(step, frame),
            Self::Fairy(pattern) => pattern.step(step, frame),
            Self::Blur(pattern) => pattern.step(step, frame),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Off(pattern) => Pattern::<MAX_LEDS>::reset(pattern),
            Self::Rainbow(pattern) => Pattern::<MAX_LEDS>::reset(pattern),
            Self::Candycane(pattern) => Pattern::<MAX_LEDS>::reset(pattern),
            Self::Classic(pattern) => Pattern::<MAX_LEDS>::reset(pattern),
            Self::Wind(pattern) => Pattern::<MAX_LEDS>::reset(pattern),
            Self::Twinkle(pattern) => Pattern::<MAX_LEDS>::reset(pattern),
            Self::Fairy(pattern) => Pattern::<MAX_LEDS>::reset(pattern),
            Self::Blur(pattern) => Pattern::<MAX_LEDS>::reset(pattern),
        }
    }
}
