//! Typed views over raw pixel buffers.
//!
//! A pixel buffer is a flat `[u8]` of channel values laid out pixel by
//! pixel. The views here only check the shape of the buffer; they never
//! copy it.

use crate::error::{Error, Result};

/// Channel layout of a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelLayout {
    /// Red, green, blue
    #[default]
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
    /// Red, green, blue, white (SK6812 style strips)
    Rgbw,
}

impl PixelLayout {
    /// Number of channels per pixel
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba | Self::Rgbw => 4,
        }
    }

    /// Check that `len` values form whole pixels
    pub const fn check_len(self, len: usize) -> Result<()> {
        let channels = self.channels();
        if len % channels != 0 {
            return Err(Error::shape(len - len % channels + channels, len));
        }
        Ok(())
    }
}

/// Read-only pixel buffer
#[derive(Debug, Clone, Copy)]
pub struct Pixels<'a> {
    data: &'a [u8],
    layout: PixelLayout,
}

impl<'a> Pixels<'a> {
    pub fn new(data: &'a [u8], layout: PixelLayout) -> Result<Self> {
        layout.check_len(data.len())?;
        Ok(Self { data, layout })
    }

    pub const fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub const fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub const fn pixel_count(&self) -> usize {
        self.data.len() / self.layout.channels()
    }

    /// Iterate over pixels as channel slices
    pub fn pixels(&self) -> core::slice::ChunksExact<'a, u8> {
        self.data.chunks_exact(self.layout.channels())
    }
}

/// Mutable pixel buffer
#[derive(Debug)]
pub struct PixelsMut<'a> {
    data: &'a mut [u8],
    layout: PixelLayout,
}

impl<'a> PixelsMut<'a> {
    pub fn new(data: &'a mut [u8], layout: PixelLayout) -> Result<Self> {
        layout.check_len(data.len())?;
        Ok(Self { data, layout })
    }

    pub const fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn as_slice(&self) -> &[u8] {
        self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.data
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub const fn pixel_count(&self) -> usize {
        self.data.len() / self.layout.channels()
    }
}

/// Destination of an engine operation
///
/// The caller picks between rewriting the input in place and writing
/// into a separate buffer of the same shape.
#[derive(Debug)]
pub enum Target<'a> {
    /// Transform the buffer in place
    InPlace(PixelsMut<'a>),
    /// Read from one buffer, write into another of the same shape
    Into(Transfer<'a>),
}

/// Source and destination of an out-of-place operation
///
/// Only built by [`Target::into_buffer`], which checks that both sides
/// have the same length and layout.
#[derive(Debug)]
pub struct Transfer<'a> {
    src: Pixels<'a>,
    dst: PixelsMut<'a>,
}

impl Transfer<'_> {
    pub fn src(&self) -> Pixels<'_> {
        self.src
    }

    pub fn dst(&self) -> &[u8] {
        self.dst.as_slice()
    }
}

impl<'a> Target<'a> {
    /// Create an out-of-place target
    ///
    /// `dst` must have the same length and layout as `src`.
    pub fn into_buffer(src: Pixels<'a>, dst: PixelsMut<'a>) -> Result<Self> {
        if src.len() != dst.len() {
            return Err(Error::shape(src.len(), dst.len()));
        }
        if src.layout() != dst.layout() {
            return Err(Error::shape(src.len(), dst.len()));
        }
        Ok(Self::Into(Transfer { src, dst }))
    }

    pub fn layout(&self) -> PixelLayout {
        match self {
            Self::InPlace(buffer) => buffer.layout(),
            Self::Into(transfer) => transfer.src.layout(),
        }
    }

    /// Number of channel values to be written
    pub fn len(&self) -> usize {
        match self {
            Self::InPlace(buffer) => buffer.len(),
            Self::Into(transfer) => transfer.src.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `map(index, value)` over every element and write the result
    pub(crate) fn for_each(&mut self, mut map: impl FnMut(usize, u8) -> u8) {
        match self {
            Self::InPlace(buffer) => {
                for (index, value) in buffer.as_mut_slice().iter_mut().enumerate() {
                    *value = map(index, *value);
                }
            }
            Self::Into(Transfer { src, dst }) => {
                let pairs = dst.as_mut_slice().iter_mut().zip(src.as_slice());
                for (index, (out, value)) in pairs.enumerate() {
                    *out = map(index, *value);
                }
            }
        }
    }

    /// Turn into an in-place target over the destination buffer
    pub(crate) fn into_destination(self) -> PixelsMut<'a> {
        match self {
            Self::InPlace(buffer) | Self::Into(Transfer { dst: buffer, .. }) => buffer,
        }
    }
}
