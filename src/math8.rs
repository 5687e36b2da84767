use embassy_time::Duration;

use crate::error::{Error, Result};

/// Round a channel value half away from zero and saturate it to `[0, max]`.
///
/// NaN saturates to zero.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_clamp(value: f32, max: u8) -> u8 {
    let rounded = libm::roundf(value);
    if rounded.is_nan() || rounded <= 0.0 {
        return 0;
    }
    if rounded >= f32::from(max) {
        return max;
    }
    rounded as u8
}

/// Scale a channel value by a factor, rounding and saturating at `max`
#[inline]
pub fn scale_round(value: u8, factor: f32, max: u8) -> u8 {
    round_clamp(f32::from(value) * factor, max)
}

/// Mix two channel values (`mix` = 0.0 is all `a`, 1.0 is all `b`)
#[inline]
pub fn mix_round(a: u8, b: u8, mix: f32, max: u8) -> u8 {
    round_clamp(f32::from(a) * (1.0 - mix) + f32::from(b) * mix, max)
}

/// Check that `channel_max` describes a usable channel range
pub fn check_channel_max(channel_max: u8) -> Result<()> {
    if channel_max == 0 {
        return Err(Error::invalid("channel_max", channel_max));
    }
    Ok(())
}

/// Check that a scalar is finite and not negative
pub(crate) fn check_non_negative(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid(name, value));
    }
    Ok(())
}

/// Check that a ratio lies in `[0, 1]`
pub(crate) fn check_unit(name: &'static str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::invalid(name, value));
    }
    Ok(())
}

/// Calculate progress (0-255) based on elapsed time and duration
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    if duration.as_millis() == 0 {
        return 255;
    }
    if elapsed.as_millis() >= duration.as_millis() {
        return 255;
    }

    ((elapsed.as_millis() * 255) / duration.as_millis()) as u8
}
