//! Adapter for dynamically typed hosts
//!
//! Script bindings hand over plain integer lists and floats. Everything is
//! checked here, once, before it is narrowed into the typed buffers the
//! engine works on.

use crate::buffer::{PixelLayout, PixelsMut};
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::operation::{MAX_CHANNELS, Operation, OperationKind};

/// Raw pixel buffer as received from a host
#[derive(Debug, Clone, Copy)]
pub struct HostBuffer<'a> {
    /// Flat channel values
    pub values: &'a [i64],
    /// Channels per pixel
    pub channels: i64,
    /// Channel ceiling matching the buffer's bit depth
    pub channel_max: i64,
}

#[allow(clippy::cast_precision_loss)]
fn invalid_int(name: &'static str, value: i64) -> Error {
    Error::InvalidParameter {
        name,
        value: value as f64,
    }
}

impl<'a> HostBuffer<'a> {
    pub const fn new(values: &'a [i64], channels: i64, channel_max: i64) -> Self {
        Self {
            values,
            channels,
            channel_max,
        }
    }

    /// Layout matching the channel count (4 channels decode as RGBA)
    pub fn layout(&self) -> Result<PixelLayout> {
        match self.channels {
            3 => Ok(PixelLayout::Rgb),
            4 => Ok(PixelLayout::Rgba),
            other => Err(invalid_int("channels", other)),
        }
    }

    /// Narrow the channel ceiling to 8 bits
    pub fn channel_max(&self) -> Result<u8> {
        match u8::try_from(self.channel_max) {
            Ok(max) if max > 0 => Ok(max),
            _ => Err(invalid_int("channel_max", self.channel_max)),
        }
    }

    /// Validate the buffer and copy it into `storage`
    ///
    /// Returns a typed view over the first `values.len()` bytes of
    /// `storage` and the narrowed channel ceiling.
    pub fn decode<'b>(&self, storage: &'b mut [u8]) -> Result<(PixelsMut<'b>, u8)> {
        let layout = self.layout()?;
        let channel_max = self.channel_max()?;
        layout.check_len(self.values.len())?;
        if storage.len() < self.values.len() {
            return Err(Error::shape(self.values.len(), storage.len()));
        }

        for (index, &value) in self.values.iter().enumerate() {
            if !(0..=i64::from(channel_max)).contains(&value) {
                return Err(Error::ValueOutOfRange {
                    index,
                    value,
                    max: channel_max,
                });
            }
        }

        let storage = &mut storage[..self.values.len()];
        for (out, &value) in storage.iter_mut().zip(self.values) {
            // Range checked above
            *out = u8::try_from(value).unwrap_or(channel_max);
        }
        Ok((PixelsMut::new(storage, layout)?, channel_max))
    }
}

/// Widen channel values back into a host list
pub fn encode(values: &[u8], out: &mut [i64]) -> Result<()> {
    if values.len() != out.len() {
        return Err(Error::shape(values.len(), out.len()));
    }
    for (out, &value) in out.iter_mut().zip(values) {
        *out = i64::from(value);
    }
    Ok(())
}

/// Build a color from a `[r, g, b]` host list
pub fn rgb_from_values(values: &[i64]) -> Result<Rgb> {
    let &[r, g, b] = values else {
        return Err(Error::shape(3, values.len()));
    };
    let channel = |index: usize, value: i64| {
        u8::try_from(value).map_err(|_| Error::ValueOutOfRange {
            index,
            value,
            max: u8::MAX,
        })
    };
    Ok(Rgb {
        r: channel(0, r)?,
        g: channel(1, g)?,
        b: channel(2, b)?,
    })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn bound(name: &'static str, value: f64) -> Result<u8> {
    if libm::trunc(value) != value || !(0.0..=255.0).contains(&value) {
        return Err(Error::InvalidParameter { name, value });
    }
    Ok(value as u8)
}

fn expect_params(params: &[f64], expected: usize) -> Result<()> {
    if params.len() != expected {
        return Err(Error::shape(expected, params.len()));
    }
    Ok(())
}

/// Narrow a checked parameter to `f32`
///
/// Values outside the `f32` range, or nonzero values that would
/// underflow to zero, are rejected rather than silently changed.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn narrow(name: &'static str, value: f64) -> Result<f32> {
    let narrowed = value as f32;
    if narrowed.is_infinite() || (narrowed == 0.0 && value != 0.0) {
        return Err(Error::InvalidParameter { name, value });
    }
    Ok(narrowed)
}

fn positive(name: &'static str, value: f64) -> Result<f32> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParameter { name, value });
    }
    narrow(name, value)
}

fn non_negative(name: &'static str, value: f64) -> Result<f32> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidParameter { name, value });
    }
    narrow(name, value)
}

fn unit(name: &'static str, value: f64) -> Result<f32> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidParameter { name, value });
    }
    narrow(name, value)
}

/// Build an operation from a host selector and its numeric parameters
///
/// - gamma, brightness: `[value]`
/// - color balance: one factor per channel, 1 to 4 values, missing
///   channels keep a factor of 1.0
/// - clamp: `[min, max]` as whole numbers
/// - blend: `[mix]` and the second buffer in `other`
///
/// Parameter domains are checked on the host's `f64` values, before
/// they are narrowed to the engine's `f32`.
pub fn operation<'a>(
    kind: OperationKind,
    params: &[f64],
    other: Option<&'a [u8]>,
) -> Result<Operation<'a>> {
    Ok(match kind {
        OperationKind::Gamma => {
            expect_params(params, 1)?;
            Operation::Gamma(positive("gamma", params[0])?)
        }
        OperationKind::Brightness => {
            expect_params(params, 1)?;
            Operation::Brightness(non_negative("factor", params[0])?)
        }
        OperationKind::ColorBalance => {
            if params.is_empty() || params.len() > MAX_CHANNELS {
                return Err(Error::shape(MAX_CHANNELS, params.len()));
            }
            let mut factors = [1.0; MAX_CHANNELS];
            for (factor, &param) in factors.iter_mut().zip(params) {
                *factor = non_negative("balance", param)?;
            }
            Operation::ColorBalance(factors)
        }
        OperationKind::Clamp => {
            expect_params(params, 2)?;
            Operation::Clamp {
                min: bound("min", params[0])?,
                max: bound("max", params[1])?,
            }
        }
        OperationKind::Blend => {
            expect_params(params, 1)?;
            let Some(other) = other else {
                return Err(Error::invalid("other", 0.0));
            };
            Operation::Blend {
                other,
                mix: unit("mix", params[0])?,
            }
        }
    })
}
