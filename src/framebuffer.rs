//! Shared pixel surface
//!
//! Every running pattern writes into the same [`Framebuffer`] during its step.
//! Indices are wrapped modulo the strip length, so `-1` addresses the last
//! pixel and `len` addresses the first one. Out-of-range access cannot fault.

use heapless::Vec;

use crate::color::{BLACK, Rgb};
use crate::error::EngineError;

/// Ordered pixel colors for one strip, `1..=MAX_LEDS` long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer<const MAX_LEDS: usize> {
    pixels: Vec<Rgb, MAX_LEDS>,
}

/// Check that a strip of `len` pixels fits a framebuffer of `MAX_LEDS`
pub(crate) fn check_strip_len<const MAX_LEDS: usize>(len: usize) -> Result<(), EngineError> {
    if len == 0 {
        return Err(EngineError::EmptyStrip);
    }
    let capacity = MAX_LEDS.min(usize::from(u16::MAX));
    if len > capacity {
        return Err(EngineError::StripTooLong {
            requested: len,
            capacity,
        });
    }
    Ok(())
}

impl<const MAX_LEDS: usize> Framebuffer<MAX_LEDS> {
    /// Create a blank framebuffer of `len` pixels
    pub fn new(len: usize) -> Result<Self, EngineError> {
        check_strip_len::<MAX_LEDS>(len)?;
        let mut pixels = Vec::new();
        // Length was checked against the capacity above
        let _ = pixels.resize(len, BLACK);
        Ok(Self { pixels })
    }

    /// Number of pixels on the strip
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false, a framebuffer holds at least one pixel
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Strip length as a signed position bound
    pub fn span(&self) -> i32 {
        i32::try_from(self.pixels.len()).unwrap_or(i32::MAX)
    }

    /// Whether `index` lies on the strip without wrapping
    pub fn contains(&self, index: i32) -> bool {
        index >= 0 && index < self.span()
    }

    #[inline]
    #[allow(clippy::cast_sign_loss)]
    fn wrap(&self, index: i32) -> usize {
        index.rem_euclid(self.span()) as usize
    }

    /// Color at `index`, wrapped modulo the strip length
    pub fn get(&self, index: i32) -> Rgb {
        self.pixels[self.wrap(index)]
    }

    /// Set the color at `index`, wrapped modulo the strip length
    pub fn set(&mut self, index: i32, color: Rgb) {
        let index = self.wrap(index);
        self.pixels[index] = color;
    }

    /// Paint every pixel with `color`
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Blank every pixel
    pub fn clear(&mut self) {
        self.fill(BLACK);
    }

    /// Overwrite this buffer with the pixels of `other`
    pub fn copy_from(&mut self, other: &Self) {
        for (dst, src) in self.pixels.iter_mut().zip(other.pixels.iter()) {
            *dst = *src;
        }
    }

    /// Copy of the current pixels, for handing to the sink
    pub fn snapshot(&self) -> Vec<Rgb, MAX_LEDS> {
        self.pixels.clone()
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }
}
