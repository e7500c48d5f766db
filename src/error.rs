use core::fmt;

/// Errors raised while building the engine
///
/// Runtime faults (unknown pattern names, sink failures) are never surfaced
/// through this type: they are logged and the frame loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Strip length of zero
    EmptyStrip,
    /// Strip is longer than the compile-time framebuffer capacity
    StripTooLong { requested: usize, capacity: usize },
    /// Frame rate of zero
    InvalidFrameRate,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStrip => f.write_str("strip must contain at least one pixel"),
            Self::StripTooLong {
                requested,
                capacity,
            } => write!(
                f,
                "strip of {} pixels exceeds the framebuffer capacity of {}",
                requested, capacity
            ),
            Self::InvalidFrameRate => f.write_str("frame rate must be non-zero"),
        }
    }
}

impl core::error::Error for EngineError {}
