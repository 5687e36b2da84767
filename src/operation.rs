use heapless::Vec;

use crate::error::{Error, Result};
use crate::math8::{check_channel_max, check_non_negative, check_unit};

const OPERATION_NAME_GAMMA: &str = "gamma";
const OPERATION_NAME_BRIGHTNESS: &str = "brightness";
const OPERATION_NAME_COLOR_BALANCE: &str = "color_balance";
const OPERATION_NAME_CLAMP: &str = "clamp";
const OPERATION_NAME_BLEND: &str = "blend";

const OPERATION_ID_GAMMA: u8 = 0;
const OPERATION_ID_BRIGHTNESS: u8 = 1;
const OPERATION_ID_COLOR_BALANCE: u8 = 2;
const OPERATION_ID_CLAMP: u8 = 3;
const OPERATION_ID_BLEND: u8 = 4;

/// Maximum number of channels a color balance can address
pub const MAX_CHANNELS: usize = 4;

/// Numeric operations that can be applied to a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation<'a> {
    /// Power-law correction, `gamma > 0`
    Gamma(f32),
    /// Linear scale, `factor >= 0`; values above 1.0 saturate
    Brightness(f32),
    /// Per-channel linear scale, indexed by channel position
    ColorBalance([f32; MAX_CHANNELS]),
    /// Saturate every value to `[min, max]`
    Clamp { min: u8, max: u8 },
    /// Mix with a second buffer of the same length, `mix` in `[0, 1]`
    Blend { other: &'a [u8], mix: f32 },
}

impl Operation<'_> {
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Gamma(_) => OperationKind::Gamma,
            Self::Brightness(_) => OperationKind::Brightness,
            Self::ColorBalance(_) => OperationKind::ColorBalance,
            Self::Clamp { .. } => OperationKind::Clamp,
            Self::Blend { .. } => OperationKind::Blend,
        }
    }

    /// Check parameters against `channel_max` and the target length
    pub fn validate(&self, channel_max: u8, len: usize) -> Result<()> {
        check_channel_max(channel_max)?;
        match *self {
            Self::Gamma(gamma) => {
                if !gamma.is_finite() || gamma <= 0.0 {
                    return Err(Error::invalid("gamma", gamma));
                }
            }
            Self::Brightness(factor) => check_non_negative("factor", factor)?,
            Self::ColorBalance(factors) => {
                for factor in factors {
                    check_non_negative("balance", factor)?;
                }
            }
            Self::Clamp { min, max } => {
                if max > channel_max {
                    return Err(Error::invalid("max", max));
                }
                if min > max {
                    return Err(Error::invalid("min", min));
                }
            }
            Self::Blend { other, mix } => {
                if other.len() != len {
                    return Err(Error::shape(len, other.len()));
                }
                check_unit("mix", mix)?;
            }
        }
        Ok(())
    }
}

/// Known operation ids that can be requested by a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum OperationKind {
    Gamma = OPERATION_ID_GAMMA,
    Brightness = OPERATION_ID_BRIGHTNESS,
    ColorBalance = OPERATION_ID_COLOR_BALANCE,
    Clamp = OPERATION_ID_CLAMP,
    Blend = OPERATION_ID_BLEND,
}

impl OperationKind {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            OPERATION_ID_GAMMA => Self::Gamma,
            OPERATION_ID_BRIGHTNESS => Self::Brightness,
            OPERATION_ID_COLOR_BALANCE => Self::ColorBalance,
            OPERATION_ID_CLAMP => Self::Clamp,
            OPERATION_ID_BLEND => Self::Blend,
            _ => return None,
        })
    }

    pub fn parse_from_str(value: &str) -> Option<Self> {
        Some(match value {
            OPERATION_NAME_GAMMA => Self::Gamma,
            OPERATION_NAME_BRIGHTNESS => Self::Brightness,
            OPERATION_NAME_COLOR_BALANCE => Self::ColorBalance,
            OPERATION_NAME_CLAMP => Self::Clamp,
            OPERATION_NAME_BLEND => Self::Blend,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gamma => OPERATION_NAME_GAMMA,
            Self::Brightness => OPERATION_NAME_BRIGHTNESS,
            Self::ColorBalance => OPERATION_NAME_COLOR_BALANCE,
            Self::Clamp => OPERATION_NAME_CLAMP,
            Self::Blend => OPERATION_NAME_BLEND,
        }
    }

    /// Whether the operation maps each value independently of its channel
    pub const fn is_pointwise(self) -> bool {
        matches!(self, Self::Gamma | Self::Brightness | Self::Clamp)
    }
}

/// Ordered list of operations to compose
///
/// N is the number of operations the pipeline can hold
#[derive(Debug, Default)]
pub struct Pipeline<'a, const N: usize> {
    inner: Vec<Operation<'a>, N>,
}

impl<'a, const N: usize> Pipeline<'a, N> {
    pub const fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Append an operation
    ///
    /// Returns the operation if the pipeline is full
    pub fn push(&mut self, operation: Operation<'a>) -> core::result::Result<(), Operation<'a>> {
        self.inner.push(operation)
    }

    /// Append a gamma correction
    pub fn push_gamma(&mut self, gamma: f32) -> core::result::Result<(), Operation<'a>> {
        self.push(Operation::Gamma(gamma))
    }

    /// Append a brightness scale
    pub fn push_brightness(&mut self, factor: f32) -> core::result::Result<(), Operation<'a>> {
        self.push(Operation::Brightness(factor))
    }

    /// Append a color balance for RGB buffers
    pub fn push_color_balance(
        &mut self,
        r: f32,
        g: f32,
        b: f32,
    ) -> core::result::Result<(), Operation<'a>> {
        self.push(Operation::ColorBalance([r, g, b, 1.0]))
    }

    /// Append a clamp
    pub fn push_clamp(&mut self, min: u8, max: u8) -> core::result::Result<(), Operation<'a>> {
        self.push(Operation::Clamp { min, max })
    }

    /// Append a blend with `other`
    pub fn push_blend(&mut self, other: &'a [u8], mix: f32) -> core::result::Result<(), Operation<'a>> {
        self.push(Operation::Blend { other, mix })
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_slice(&self) -> &[Operation<'a>] {
        &self.inner
    }
}
