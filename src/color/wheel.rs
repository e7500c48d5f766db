//! Three-segment color wheel
//!
//! Maps a 0-255 position onto red -> green -> blue -> red with linear
//! crossfades, each segment spanning 85 steps.

use super::{Rgb, scale};

const SEGMENT: u8 = 85;

/// Color at `pos` on the wheel, full brightness
pub const fn wheel(pos: u8) -> Rgb {
    if pos < SEGMENT {
        Rgb {
            r: pos * 3,
            g: 255 - pos * 3,
            b: 0,
        }
    } else if pos < SEGMENT * 2 {
        let pos = pos - SEGMENT;
        Rgb {
            r: 255 - pos * 3,
            g: 0,
            b: pos * 3,
        }
    } else {
        let pos = pos - SEGMENT * 2;
        Rgb {
            r: 0,
            g: pos * 3,
            b: 255 - pos * 3,
        }
    }
}

/// Color at `pos` on the wheel scaled by `brightness`
///
/// Brightness above 1.0 is allowed; channels saturate at 255 instead of
/// spilling into their neighbours.
pub fn wheel_scaled(pos: u8, brightness: f32) -> Rgb {
    scale(wheel(pos), brightness)
}
