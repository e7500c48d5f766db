//! Engine configuration
//!
//! Everything the engine is built from. The command source and the sink live
//! outside the crate; `listen` and `output_channel` are carried here so that
//! one value describes a whole installation.

use core::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use embassy_time::Duration;

use crate::color::ColorOrder;
use crate::error::EngineError;
use crate::framebuffer::check_strip_len;

pub const DEFAULT_LED_COUNT: u16 = 300;
/// PWM-capable GPIO the strip's data line is wired to
pub const DEFAULT_OUTPUT_CHANNEL: u8 = 12;
pub const DEFAULT_FRAME_RATE: u32 = 40;
pub const DEFAULT_LISTEN_PORT: u16 = 12000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of pixels on the strip
    pub led_count: u16,
    /// Output channel identifier handed to the sink
    pub output_channel: u8,
    /// Wire order of the color channels
    pub color_order: ColorOrder,
    /// Target ticks per second
    pub frame_rate: u32,
    /// Address the command source listens on
    pub listen: SocketAddr,
    /// Base seed for every pattern's random source
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            led_count: DEFAULT_LED_COUNT,
            output_channel: DEFAULT_OUTPUT_CHANNEL,
            color_order: ColorOrder::Grb,
            frame_rate: DEFAULT_FRAME_RATE,
            listen: SocketAddr::V4(SocketAddrV4::new(
                Ipv4Addr::UNSPECIFIED,
                DEFAULT_LISTEN_PORT,
            )),
            seed: crate::registry::DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    /// Check the configuration against a framebuffer of `MAX_LEDS` pixels
    pub fn validate<const MAX_LEDS: usize>(&self) -> Result<(), EngineError> {
        check_strip_len::<MAX_LEDS>(usize::from(self.led_count))?;
        if self.frame_rate == 0 {
            return Err(EngineError::InvalidFrameRate);
        }
        Ok(())
    }

    /// Target period of one tick
    ///
    /// A zero frame rate yields a one-second period.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.frame_rate.max(1)))
    }
}
