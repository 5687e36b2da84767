//! Frame processor - output correction for RGB frames
//!
//! Holds the per-strip correction settings and applies them to every
//! rendered frame in a fixed order: color balance, brightness, gamma.

use log::debug;

use crate::OutputDriver;
use crate::color::Rgb;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::math8::{check_channel_max, check_non_negative};
use crate::operation::Pipeline;

/// Color balance, brightness and gamma
const CORRECTION_STAGES: usize = 3;

/// Configuration for the frame processor
#[derive(Debug, Clone, PartialEq)]
pub struct FrameProcessorConfig {
    /// Channel ceiling of the strip (255 for 8-bit drivers)
    pub channel_max: u8,
    /// Gamma exponent, none to send values linearly
    pub gamma: Option<f32>,
    /// Brightness factor, values above 1.0 saturate
    pub brightness: f32,
    /// White balance factors for r, g, b
    pub color_balance: Option<[f32; 3]>,
}

impl Default for FrameProcessorConfig {
    fn default() -> Self {
        Self {
            channel_max: 255,
            gamma: None,
            brightness: 1.0,
            color_balance: None,
        }
    }
}

impl FrameProcessorConfig {
    /// Check every setting before it reaches the engine
    pub fn validate(&self) -> Result<()> {
        check_channel_max(self.channel_max)?;
        if let Some(gamma) = self.gamma {
            if !gamma.is_finite() || gamma <= 0.0 {
                return Err(Error::invalid("gamma", gamma));
            }
        }
        check_non_negative("factor", self.brightness)?;
        if let Some(factors) = self.color_balance {
            for factor in factors {
                check_non_negative("balance", factor)?;
            }
        }
        Ok(())
    }
}

/// Applies configured corrections to RGB frames
#[derive(Debug, Clone)]
pub struct FrameProcessor {
    engine: Engine,
    config: FrameProcessorConfig,
}

impl FrameProcessor {
    /// Create a new processor, rejecting invalid settings
    pub fn new(config: &FrameProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: Engine::new(),
            config: config.clone(),
        })
    }

    pub const fn config(&self) -> &FrameProcessorConfig {
        &self.config
    }

    /// Apply all corrections to a frame in place
    pub fn apply(&mut self, frame: &mut [Rgb]) -> Result<()> {
        let full = |_| Error::shape(CORRECTION_STAGES, CORRECTION_STAGES + 1);
        let mut pipeline: Pipeline<'static, CORRECTION_STAGES> = Pipeline::new();
        if let Some([r, g, b]) = self.config.color_balance {
            pipeline.push_color_balance(r, g, b).map_err(full)?;
        }
        if libm::fabsf(self.config.brightness - 1.0) > f32::EPSILON {
            pipeline.push_brightness(self.config.brightness).map_err(full)?;
        }
        if let Some(gamma) = self.config.gamma {
            pipeline.push_gamma(gamma).map_err(full)?;
        }
        if pipeline.is_empty() {
            return Ok(());
        }

        self.engine
            .apply_to_colors(frame, pipeline.as_slice(), self.config.channel_max)
    }

    /// Apply all corrections and hand the frame to `driver`
    pub fn present(&mut self, frame: &mut [Rgb], driver: &mut impl OutputDriver) -> Result<()> {
        self.apply(frame)?;
        driver.write(frame);
        Ok(())
    }

    /// Set the brightness factor
    pub fn set_brightness(&mut self, brightness: f32) -> Result<()> {
        self.update(|config| config.brightness = brightness)
    }

    /// Set or disable the gamma curve
    pub fn set_gamma(&mut self, gamma: Option<f32>) -> Result<()> {
        self.update(|config| config.gamma = gamma)
    }

    /// Set or disable the color balance
    pub fn set_color_balance(&mut self, factors: Option<[f32; 3]>) -> Result<()> {
        self.update(|config| config.color_balance = factors)
    }

    fn update(&mut self, change: impl FnOnce(&mut FrameProcessorConfig)) -> Result<()> {
        let mut config = self.config.clone();
        change(&mut config);
        config.validate()?;
        debug!("[FrameProcessor] config updated: {:?}", config);
        self.config = config;
        Ok(())
    }
}
