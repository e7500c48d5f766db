use embassy_time::Instant;

use crate::color::Rgb;
use crate::command::CommandBoard;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::framebuffer::Framebuffer;
use crate::lifecycle::{Action, Phase};
use crate::logging::info;
use crate::pattern::PatternId;
use crate::registry::Registry;

/// Renderer - composes every running pattern into one frame
///
/// Owns the registry and the shared framebuffer. Commands reach it only
/// through the [`CommandBoard`], and only at the start of a tick.
pub struct Renderer<'a, const MAX_LEDS: usize> {
    commands: &'a CommandBoard,
    registry: Registry<MAX_LEDS>,
    frame: Framebuffer<MAX_LEDS>,
}

impl<'a, const MAX_LEDS: usize> Renderer<'a, MAX_LEDS> {
    /// Create a renderer for the strip described by `config`
    pub fn new(commands: &'a CommandBoard, config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate::<MAX_LEDS>()?;
        let len = usize::from(config.led_count);
        Ok(Self {
            commands,
            registry: Registry::with_seed(len, config.seed)?,
            frame: Framebuffer::new(len)?,
        })
    }

    /// Process one frame
    ///
    /// Applies pending commands, steps every running pattern in compositing
    /// order and publishes the resulting phases back to the command board.
    pub fn render(&mut self, now: Instant) -> &[Rgb] {
        self.apply_pending();
        self.registry.step_all(now, &mut self.frame);
        self.commands.publish(&self.registry.phases());
        self.frame.as_slice()
    }

    /// Hard-stop every pattern and blank the strip
    pub fn hard_stop_all(&mut self, now: Instant) -> &[Rgb] {
        info!("hard stop of every pattern");
        // Anything still pending is superseded
        let _ = self.commands.take_pending();
        for id in PatternId::ALL {
            self.registry.apply(id, Action::HardStop);
        }
        self.registry.step_all(now, &mut self.frame);
        self.frame.clear();
        self.commands.publish(&self.registry.phases());
        self.frame.as_slice()
    }

    pub fn phase(&self, id: PatternId) -> Phase {
        self.registry.entry(id).phase()
    }

    pub fn framebuffer(&self) -> &Framebuffer<MAX_LEDS> {
        &self.frame
    }

    pub fn registry(&self) -> &Registry<MAX_LEDS> {
        &self.registry
    }

    fn apply_pending(&mut self) {
        let pending = self.commands.take_pending();
        for (id, action) in PatternId::ALL.into_iter().zip(pending) {
            if let Some(action) = action {
                self.registry.apply(id, action);
            }
        }
    }
}
