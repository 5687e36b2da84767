//! 8-bit lookup tables
//!
//! Channel values have only 256 possible inputs while buffers hold
//! thousands of them, so every channel-independent curve is evaluated
//! once per input value and then applied by indexing.

use log::debug;

use crate::math8::{round_clamp, scale_round};

/// Number of entries in a lookup table
pub const LUT_SIZE: usize = 256;

/// Lookup table mapping every 8-bit input to its output
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Lut {
    table: [u8; LUT_SIZE],
}

impl core::fmt::Debug for Lut {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Lut").finish_non_exhaustive()
    }
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

impl Lut {
    /// Table that maps every value to itself
    #[allow(clippy::cast_possible_truncation)]
    pub const fn identity() -> Self {
        let mut table = [0; LUT_SIZE];
        let mut i = 0;
        while i < LUT_SIZE {
            table[i] = i as u8;
            i += 1;
        }
        Self { table }
    }

    /// Build a table from a per-value function
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_fn(mut f: impl FnMut(u8) -> u8) -> Self {
        let mut table = [0; LUT_SIZE];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = f(i as u8);
        }
        Self { table }
    }

    /// Power-law curve: `max * (v / max) ^ gamma`
    pub fn gamma(gamma: f32, channel_max: u8) -> Self {
        let max = f32::from(channel_max);
        Self::from_fn(|value| {
            let normalized = f32::from(value) / max;
            round_clamp(max * libm::powf(normalized, gamma), channel_max)
        })
    }

    /// Linear scale: `v * factor`
    pub fn brightness(factor: f32, channel_max: u8) -> Self {
        Self::from_fn(|value| scale_round(value, factor, channel_max))
    }

    /// Saturate to `[min, max]`
    pub fn clamp(min: u8, max: u8) -> Self {
        Self::from_fn(|value| value.clamp(min, max))
    }

    /// Table equivalent to applying `self` and then `next`
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self::from_fn(|value| next.get(self.get(value)))
    }

    #[inline]
    pub const fn get(&self, value: u8) -> u8 {
        self.table[value as usize]
    }
}

/// Parameters a cached table was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LutKey {
    param_bits: u32,
    channel_max: u8,
}

impl LutKey {
    pub const fn new(param: f32, channel_max: u8) -> Self {
        Self {
            param_bits: param.to_bits(),
            channel_max,
        }
    }
}

/// Single-slot table cache keyed by `(param, channel_max)`
///
/// The table is built on first use and rebuilt only when the key changes.
#[derive(Debug, Clone)]
pub struct LutCache {
    name: &'static str,
    build: fn(f32, u8) -> Lut,
    key: Option<LutKey>,
    lut: Lut,
    rebuilds: u32,
}

impl LutCache {
    pub const fn new(name: &'static str, build: fn(f32, u8) -> Lut) -> Self {
        Self {
            name,
            build,
            key: None,
            lut: Lut::identity(),
            rebuilds: 0,
        }
    }

    /// Cache for `Lut::gamma`
    pub const fn gamma() -> Self {
        Self::new("gamma", Lut::gamma)
    }

    /// Cache for `Lut::brightness`
    pub const fn brightness() -> Self {
        Self::new("brightness", Lut::brightness)
    }

    /// Get the table for the given parameters, rebuilding it if needed
    pub fn get(&mut self, param: f32, channel_max: u8) -> &Lut {
        let key = LutKey::new(param, channel_max);
        if self.key != Some(key) {
            debug!(
                "rebuilding {} lut (param {}, channel_max {})",
                self.name, param, channel_max
            );
            self.lut = (self.build)(param, channel_max);
            self.key = Some(key);
            self.rebuilds = self.rebuilds.wrapping_add(1);
        }
        &self.lut
    }

    /// Key of the currently cached table
    pub const fn key(&self) -> Option<LutKey> {
        self.key
    }

    /// Number of times the table has been built
    pub const fn rebuilds(&self) -> u32 {
        self.rebuilds
    }

    /// Drop the cached table
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let lut = Lut::identity();
        assert!((0..=255u8).all(|v| lut.get(v) == v));
    }

    #[test]
    fn test_then_composes_in_order() {
        let halve = Lut::brightness(0.5, 255);
        let cap = Lut::clamp(0, 100);
        let fused = halve.then(&cap);
        assert_eq!(fused.get(255), 100);
        assert_eq!(fused.get(100), 50);
        // Clamp first, then halve
        assert_eq!(cap.then(&halve).get(255), 50);
    }

    #[test]
    fn test_cache_rebuilds_only_on_key_change() {
        let mut cache = LutCache::gamma();
        assert_eq!(cache.key(), None);
        cache.get(2.2, 255);
        cache.get(2.2, 255);
        assert_eq!(cache.rebuilds(), 1);
        cache.get(2.2, 100);
        assert_eq!(cache.rebuilds(), 2);
        cache.get(1.8, 100);
        assert_eq!(cache.rebuilds(), 3);
        assert_eq!(cache.key(), Some(LutKey::new(1.8, 100)));
        cache.invalidate();
        cache.get(1.8, 100);
        assert_eq!(cache.rebuilds(), 4);
    }
}
