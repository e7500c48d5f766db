//! Frame scheduling and timing utilities.
//!
//! [`FrameScheduler::tick`] is portable: it renders one frame, hands it to
//! the output driver and reports when the next frame is due, leaving the
//! wait to the caller. [`FrameScheduler::run`] wraps that in an async loop
//! paced by `embassy-time` that runs until a [`ShutdownSignal`] is raised.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_time::{Duration, Instant, Timer};

use crate::config::EngineConfig;
use crate::logging::{debug, info, warn};
use crate::{OutputDriver, Renderer};

/// Default target frame rate (40 FPS).
pub const DEFAULT_FPS: u32 = 40;

/// Default frame duration based on target FPS.
#[allow(clippy::cast_lossless)]
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// When the tick started.
    pub started: Instant,
    /// Whether the output driver accepted the frame.
    pub transmitted: bool,
    /// The deadline for the next frame.
    pub next_deadline: Instant,
}

impl FrameResult {
    /// How long to wait after a tick that finished at `finished`
    ///
    /// Zero if the tick overran its period. Lost time is not made up.
    pub fn sleep_after(&self, finished: Instant) -> Duration {
        self.next_deadline
            .checked_duration_since(finished)
            .unwrap_or(Duration::from_ticks(0))
    }

    /// Whether a tick that finished at `finished` missed its deadline
    pub fn overran(&self, finished: Instant) -> bool {
        finished > self.next_deadline
    }
}

/// Counters kept across ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames rendered
    pub frames: u32,
    /// Frames the output driver rejected
    pub failed: u32,
    /// Ticks that ran past their period
    pub overruns: u32,
}

/// Stop request for [`FrameScheduler::run`]
///
/// Can live in a `static` and be raised from any context.
#[derive(Debug, Default)]
pub struct ShutdownSignal {
    requested: AtomicBool,
}

impl ShutdownSignal {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

/// Fixed-cadence frame loop
///
/// This scheduler:
/// - Calls the renderer and output driver once per tick
/// - Skips a frame the output driver rejects and keeps going
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer, driver);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     let pause = scheduler.pace(&result, Instant::now());
///     Timer::after(pause).await;
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, const MAX_LEDS: usize> {
    output: O,
    renderer: Renderer<'a, MAX_LEDS>,
    frame_duration: Duration,
    stats: FrameStats,
}

impl<'a, O: OutputDriver, const MAX_LEDS: usize> FrameScheduler<'a, O, MAX_LEDS> {
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (40 FPS) for frame timing.
    pub fn new(renderer: Renderer<'a, MAX_LEDS>, driver: O) -> Self {
        Self::with_frame_duration(renderer, driver, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        renderer: Renderer<'a, MAX_LEDS>,
        driver: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            renderer,
            frame_duration,
            stats: FrameStats::default(),
        }
    }

    /// Create a frame scheduler paced by the configured frame rate.
    pub fn from_config(renderer: Renderer<'a, MAX_LEDS>, driver: O, config: &EngineConfig) -> Self {
        Self::with_frame_duration(renderer, driver, config.frame_duration())
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies pending commands and steps every running pattern
    /// 2. Writes the frame to the output driver
    /// 3. Returns the deadline for the next frame
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let frame = self.renderer.render(now);
        let transmitted = match self.output.write(frame) {
            Ok(()) => true,
            Err(err) => {
                warn!("frame {} dropped by output: {:?}", self.stats.frames, err);
                self.stats.failed = self.stats.failed.wrapping_add(1);
                false
            }
        };
        self.stats.frames = self.stats.frames.wrapping_add(1);

        FrameResult {
            started: now,
            transmitted,
            next_deadline: now + self.frame_duration,
        }
    }

    /// Time left in the period of `result`, counting overruns
    pub fn pace(&mut self, result: &FrameResult, finished: Instant) -> Duration {
        if result.overran(finished) {
            self.stats.overruns = self.stats.overruns.wrapping_add(1);
            debug!("frame overran by {} us", (finished - result.next_deadline).as_micros());
        }
        result.sleep_after(finished)
    }

    /// Run the frame loop until `shutdown` is requested, then tear down.
    pub async fn run(&mut self, shutdown: &ShutdownSignal) {
        info!("frame loop started, period {} us", self.frame_duration.as_micros());
        while !shutdown.is_requested() {
            let result = self.tick(Instant::now());
            let pause = self.pace(&result, Instant::now());
            Timer::after(pause).await;
        }
        self.teardown(Instant::now());
    }

    /// Hard-stop every pattern and send one black frame.
    ///
    /// Returns whether the output driver accepted the black frame.
    pub fn teardown(&mut self, now: Instant) -> bool {
        info!("tearing down after {} frames", self.stats.frames);
        let frame = self.renderer.hard_stop_all(now);
        match self.output.write(frame) {
            Ok(()) => true,
            Err(err) => {
                warn!("final frame dropped by output: {:?}", err);
                self.stats.failed = self.stats.failed.wrapping_add(1);
                false
            }
        }
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Get a reference to the renderer.
    pub fn renderer(&self) -> &Renderer<'a, MAX_LEDS> {
        &self.renderer
    }

    /// Get a mutable reference to the renderer.
    pub fn renderer_mut(&mut self) -> &mut Renderer<'a, MAX_LEDS> {
        &mut self.renderer
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
