//! Stepwise per-pixel RGB fader
//!
//! Every trigger moves each channel one unit toward its target, so a
//! full-range fade takes 255 triggers regardless of the frame rate.

use crate::color::Rgb;

/// Step direction per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Direction {
    r: bool,
    g: bool,
    b: bool,
}

/// One LED pixel fading toward a target color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFader {
    index: u32,
    current: Rgb,
    target: Rgb,
    rising: Direction,
    complete: bool,
}

/// Move `value` one unit toward `target`
///
/// The direction is fixed when the fade starts.
#[inline]
const fn step(value: u8, target: u8, rising: bool) -> u8 {
    if value == target {
        value
    } else if rising {
        value.saturating_add(1)
    } else {
        value.saturating_sub(1)
    }
}

impl PixelFader {
    /// Create a black pixel at strip position `index`
    pub const fn new(index: u32) -> Self {
        Self {
            index,
            current: Rgb { r: 0, g: 0, b: 0 },
            target: Rgb { r: 0, g: 0, b: 0 },
            rising: Direction {
                r: false,
                g: false,
                b: false,
            },
            complete: false,
        }
    }

    pub const fn index(&self) -> u32 {
        self.index
    }

    pub const fn current(&self) -> Rgb {
        self.current
    }

    pub const fn target(&self) -> Rgb {
        self.target
    }

    /// Whether the last trigger found the pixel at its target
    pub const fn is_fade_complete(&self) -> bool {
        self.complete
    }

    /// Start fading toward `target`
    pub fn fade_to(&mut self, target: Rgb) {
        self.target = target;
        self.complete = false;
        self.rising = Direction {
            r: self.current.r < target.r,
            g: self.current.g < target.g,
            b: self.current.b < target.b,
        };
    }

    /// Jump to `color` without fading
    pub fn fill(&mut self, color: Rgb) {
        self.current = color;
        self.target = color;
        self.complete = false;
    }

    /// Advance the fade by one step and return the current color
    ///
    /// Completion is evaluated before stepping, so the trigger that lands
    /// on the target still reports an incomplete fade; the next one
    /// reports it complete.
    pub fn trigger(&mut self) -> Rgb {
        self.complete = self.current == self.target;
        if !self.complete {
            self.current = Rgb {
                r: step(self.current.r, self.target.r, self.rising.r),
                g: step(self.current.g, self.target.g, self.rising.g),
                b: step(self.current.b, self.target.b, self.rising.b),
            };
        }
        self.current
    }
}

/// Trigger every fader of a strip and write the colors to `frame`
///
/// Returns true when every fader reported a complete fade. Extra
/// entries in either slice are left untouched.
pub fn trigger_strip(faders: &mut [PixelFader], frame: &mut [Rgb]) -> bool {
    let mut complete = true;
    for (fader, color) in faders.iter_mut().zip(frame.iter_mut()) {
        *color = fader.trigger();
        complete &= fader.is_fade_complete();
    }
    complete
}
