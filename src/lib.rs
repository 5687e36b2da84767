#![cfg_attr(not(test), no_std)]

pub mod buffer;
pub mod color;
pub mod engine;
pub mod error;
pub mod fader;
pub mod host;
pub mod lut;
pub mod math8;
pub mod operation;
pub mod processor;
pub mod shared;
pub mod transition;

pub use buffer::{PixelLayout, Pixels, PixelsMut, Target, Transfer};
pub use engine::{Engine, MAX_STAGES};
pub use error::{Error, Result};
pub use fader::{PixelFader, trigger_strip};
pub use host::HostBuffer;
pub use lut::{Lut, LutCache, LutKey};
pub use operation::{Operation, OperationKind, Pipeline};
pub use processor::{FrameProcessor, FrameProcessorConfig};
pub use shared::SharedEngine;
pub use transition::Crossfade;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to hand processed frames to the hardware.
/// Transport and timing are the driver's concern, not this crate's.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
