//! Pixel buffer transform engine
//!
//! The engine applies numeric operations to flat pixel buffers. It keeps
//! one cached lookup table per channel-independent curve (gamma and
//! brightness), rebuilt only when the curve parameters change. Nothing
//! else survives between calls.

use heapless::Vec;
use log::trace;

use crate::buffer::Target;
use crate::color::Rgb;
use crate::error::Result;
use crate::lut::{Lut, LutCache};
use crate::math8::{check_channel_max, mix_round, scale_round};
use crate::operation::{MAX_CHANNELS, Operation};

/// Maximum number of stages evaluated in a single buffer traversal
///
/// Longer compositions are split into several passes over the output.
pub const MAX_STAGES: usize = 8;

/// A step of a fused composition
#[derive(Debug, Clone, Copy)]
enum Stage<'a> {
    /// Channel-independent mapping, possibly several operations fused
    Map(Lut),
    /// Per-channel scale
    Balance([f32; MAX_CHANNELS]),
    /// Mix with the value at the same index of `other`
    Blend { other: &'a [u8], mix: f32 },
}

impl Stage<'_> {
    #[inline]
    fn run(&self, index: usize, channel: usize, value: u8, channel_max: u8) -> u8 {
        match self {
            Self::Map(lut) => lut.get(value),
            Self::Balance(factors) => scale_round(value, factors[channel], channel_max),
            Self::Blend { other, mix } => mix_round(value, other[index], *mix, channel_max),
        }
    }
}

type Stages<'a> = Vec<Stage<'a>, MAX_STAGES>;

fn validate_all(operations: &[Operation<'_>], channel_max: u8, len: usize) -> Result<()> {
    check_channel_max(channel_max)?;
    for operation in operations {
        operation.validate(channel_max, len)?;
    }
    Ok(())
}

#[inline]
fn run_stages(stages: &[Stage<'_>], index: usize, channel: usize, value: u8, max: u8) -> u8 {
    stages
        .iter()
        .fold(value, |value, stage| stage.run(index, channel, value, max))
}

/// Pixel buffer transform engine
///
/// Every operation validates its parameters before touching the buffer,
/// so a failed call leaves the target unmodified.
#[derive(Debug, Clone)]
pub struct Engine {
    gamma: LutCache,
    brightness: LutCache,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub const fn new() -> Self {
        Self {
            gamma: LutCache::gamma(),
            brightness: LutCache::brightness(),
        }
    }

    /// Gamma correction: `round(max * (v / max) ^ gamma)`
    pub fn apply_gamma(&mut self, mut target: Target<'_>, gamma: f32, channel_max: u8) -> Result<()> {
        Operation::Gamma(gamma).validate(channel_max, target.len())?;
        let lut = self.gamma.get(gamma, channel_max);
        target.for_each(|_, value| lut.get(value));
        Ok(())
    }

    /// Brightness scaling: `round(v * factor)`, saturating at `channel_max`
    pub fn apply_brightness(
        &mut self,
        mut target: Target<'_>,
        factor: f32,
        channel_max: u8,
    ) -> Result<()> {
        Operation::Brightness(factor).validate(channel_max, target.len())?;
        let lut = self.brightness.get(factor, channel_max);
        target.for_each(|_, value| lut.get(value));
        Ok(())
    }

    /// Per-channel scaling, `factors` indexed by channel position
    ///
    /// Factors beyond the layout's channel count are ignored.
    pub fn apply_color_balance(
        &mut self,
        target: Target<'_>,
        factors: [f32; MAX_CHANNELS],
        channel_max: u8,
    ) -> Result<()> {
        self.compose(target, &[Operation::ColorBalance(factors)], channel_max)
    }

    /// Saturate every value to `[min, max]`
    pub fn apply_clamp(
        &mut self,
        mut target: Target<'_>,
        min: u8,
        max: u8,
        channel_max: u8,
    ) -> Result<()> {
        Operation::Clamp { min, max }.validate(channel_max, target.len())?;
        target.for_each(|_, value| value.clamp(min, max));
        Ok(())
    }

    /// Blend the target with `other`: `round(a * (1 - mix) + b * mix)`
    pub fn blend(
        &mut self,
        mut target: Target<'_>,
        other: &[u8],
        mix: f32,
        channel_max: u8,
    ) -> Result<()> {
        Operation::Blend { other, mix }.validate(channel_max, target.len())?;
        target.for_each(|index, value| mix_round(value, other[index], mix, channel_max));
        Ok(())
    }

    /// Apply a sequence of operations in as few traversals as possible
    ///
    /// Each step is rounded and clamped before feeding the next one, so
    /// the result equals calling the operations one after another. All
    /// operations are validated up front; on error nothing is written.
    pub fn compose(
        &mut self,
        target: Target<'_>,
        operations: &[Operation<'_>],
        channel_max: u8,
    ) -> Result<()> {
        validate_all(operations, channel_max, target.len())?;
        let channels = target.layout().channels();

        let mut target = target;
        let mut remaining = operations;
        let mut stages = Stages::new();
        loop {
            let consumed = self.collect_stages(remaining, channel_max, &mut stages);
            trace!(
                "compose pass: {} operations in {} stages over {} values",
                consumed,
                stages.len(),
                target.len()
            );
            target.for_each(|index, value| {
                run_stages(&stages, index, index % channels, value, channel_max)
            });

            remaining = &remaining[consumed..];
            if remaining.is_empty() {
                return Ok(());
            }
            stages.clear();
            target = Target::InPlace(target.into_destination());
        }
    }

    /// Apply a sequence of operations to an RGB frame in place
    ///
    /// Blend buffers are flat `[r, g, b, ...]` values of `3 * colors.len()`.
    pub fn apply_to_colors(
        &mut self,
        colors: &mut [Rgb],
        operations: &[Operation<'_>],
        channel_max: u8,
    ) -> Result<()> {
        validate_all(operations, channel_max, colors.len() * 3)?;

        let mut remaining = operations;
        let mut stages = Stages::new();
        while !remaining.is_empty() {
            let consumed = self.collect_stages(remaining, channel_max, &mut stages);
            for (pixel, color) in colors.iter_mut().enumerate() {
                let base = pixel * 3;
                color.r = run_stages(&stages, base, 0, color.r, channel_max);
                color.g = run_stages(&stages, base + 1, 1, color.g, channel_max);
                color.b = run_stages(&stages, base + 2, 2, color.b, channel_max);
            }
            remaining = &remaining[consumed..];
            stages.clear();
        }
        Ok(())
    }

    /// Cache backing `apply_gamma`
    pub const fn gamma_cache(&self) -> &LutCache {
        &self.gamma
    }

    /// Cache backing `apply_brightness`
    pub const fn brightness_cache(&self) -> &LutCache {
        &self.brightness
    }

    /// Fill `stages` from the head of `operations`, fusing adjacent
    /// channel-independent operations into one table.
    ///
    /// Returns the number of operations consumed (at least one unless
    /// `operations` is empty).
    fn collect_stages<'a>(
        &mut self,
        operations: &[Operation<'a>],
        channel_max: u8,
        stages: &mut Stages<'a>,
    ) -> usize {
        for (consumed, operation) in operations.iter().enumerate() {
            let stage = match *operation {
                Operation::Gamma(gamma) => Stage::Map(*self.gamma.get(gamma, channel_max)),
                Operation::Brightness(factor) => {
                    Stage::Map(*self.brightness.get(factor, channel_max))
                }
                Operation::Clamp { min, max } => Stage::Map(Lut::clamp(min, max)),
                Operation::ColorBalance(factors) => Stage::Balance(factors),
                Operation::Blend { other, mix } => Stage::Blend { other, mix },
            };

            if let (Stage::Map(next), Some(Stage::Map(previous))) = (&stage, stages.last_mut()) {
                *previous = previous.then(next);
                continue;
            }
            if stages.push(stage).is_err() {
                return consumed;
            }
        }
        operations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{PixelLayout, PixelsMut};

    #[test]
    fn test_adjacent_maps_are_fused() {
        let other = [0u8; 3];
        let mut engine = Engine::new();
        let mut stages = Stages::new();
        let operations = [
            Operation::Gamma(2.0),
            Operation::Brightness(0.5),
            Operation::Clamp { min: 0, max: 100 },
            Operation::Blend {
                other: &other,
                mix: 0.5,
            },
            Operation::Brightness(2.0),
        ];
        let consumed = engine.collect_stages(&operations, 255, &mut stages);
        assert_eq!(consumed, operations.len());
        assert_eq!(stages.len(), 3);
    }

    #[test]
    fn test_long_composition_splits_into_passes() {
        let mut engine = Engine::new();
        let mut stages = Stages::new();
        let operations = [Operation::ColorBalance([1.0; MAX_CHANNELS]); MAX_STAGES + 2];
        let consumed = engine.collect_stages(&operations, 255, &mut stages);
        assert_eq!(consumed, MAX_STAGES);

        let mut data = [10u8, 20, 30, 40, 50, 60];
        let target = Target::InPlace(PixelsMut::new(&mut data, PixelLayout::Rgb).unwrap());
        engine.compose(target, &operations, 255).unwrap();
        assert_eq!(data, [10, 20, 30, 40, 50, 60]);
    }
}
