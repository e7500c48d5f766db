mod order;
mod wheel;

pub use order::ColorOrder;
pub use wheel::{wheel, wheel_scaled};

pub type Rgb = smart_leds::RGB8;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Per-channel average of two colors
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn average(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: ((a.r as u16 + b.r as u16) >> 1) as u8,
        g: ((a.g as u16 + b.g as u16) >> 1) as u8,
        b: ((a.b as u16 + b.b as u16) >> 1) as u8,
    }
}

/// Multiply every channel by `factor`, saturating to `0..=255`
#[inline]
pub fn scale(color: Rgb, factor: f32) -> Rgb {
    Rgb {
        r: saturate(f32::from(color.r) * factor),
        g: saturate(f32::from(color.g) * factor),
        b: saturate(f32::from(color.b) * factor),
    }
}

/// Clamp a float channel value into a `u8`
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn saturate(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}
