//! Frame sinks

use core::fmt::Debug;

use smart_leds::SmartLedsWrite;

use crate::color::{ColorOrder, Rgb};

/// Output driver trait for LED strips
///
/// Implement this trait to support different hardware platforms.
/// The frame scheduler is generic over this trait. A failed write costs only
/// the current frame, the scheduler keeps ticking.
pub trait OutputDriver {
    type Error: Debug;

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error>;
}

/// Adapter for any `smart-leds` writer
///
/// Reorders the channels of every pixel to the strip's wire order before
/// handing the frame over.
pub struct SmartLedsOutput<W> {
    writer: W,
    order: ColorOrder,
}

impl<W> SmartLedsOutput<W> {
    pub const fn new(writer: W, order: ColorOrder) -> Self {
        Self { writer, order }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite,
    W::Color: From<Rgb>,
    W::Error: Debug,
{
    type Error = W::Error;

    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error> {
        let order = self.order;
        self.writer
            .write(colors.iter().map(|color| order.apply(*color)))
    }
}
