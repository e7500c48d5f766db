#![no_std]

mod logging;

pub mod color;
pub mod command;
pub mod config;
pub mod error;
pub mod frame_scheduler;
pub mod framebuffer;
pub mod lifecycle;
pub mod output;
pub mod pattern;
pub mod registry;
pub mod renderer;

pub use color::{ColorOrder, Rgb};
pub use command::{Command, CommandBoard, Dispatcher};
pub use config::EngineConfig;
pub use error::EngineError;
pub use frame_scheduler::{FrameResult, FrameScheduler, FrameStats, ShutdownSignal};
pub use framebuffer::Framebuffer;
pub use lifecycle::{Action, Lifecycle, Phase};
pub use output::{OutputDriver, SmartLedsOutput};
pub use pattern::{Pattern, PatternId, PatternSlot, Step};
pub use registry::{PatternEntry, Registry};
pub use renderer::Renderer;

pub use embassy_time::{Duration, Instant};
