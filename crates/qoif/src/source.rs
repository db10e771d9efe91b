//! Pixel sources consumed by the encoder.
//!
//! The encoder reads pixels through [`PixelSource`] in row-major order. Validation
//! (channel count, dimension limits, buffer length) happens when a source is built,
//! so the encoding loop never has to check anything.

use crate::{Pixel, QoiError, Result};

/// A grid of pixels with known dimensions.
pub trait PixelSource {
    /// Image width in pixels
    fn width(&self) -> u32;

    /// Image height in pixels
    fn height(&self) -> u32;

    /// Channel count recorded in the header: 3 (RGB) or 4 (RGBA).
    fn channels(&self) -> u8;

    /// Pixel at `row`, `col`. Sources without alpha return `a = 255`.
    ///
    /// Only called with `row < height()` and `col < width()`.
    fn get(&self, row: u32, col: u32) -> Pixel;
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    #[inline]
    fn width(&self) -> u32 {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> u32 {
        (**self).height()
    }

    #[inline]
    fn channels(&self) -> u8 {
        (**self).channels()
    }

    #[inline]
    fn get(&self, row: u32, col: u32) -> Pixel {
        (**self).get(row, col)
    }
}

/// Borrowed interleaved RGB or RGBA pixel data.
#[derive(Debug, Clone, Copy)]
pub struct RawImage<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    channels: u8,
}

impl<'a> RawImage<'a> {
    /// Wraps `data` as a `width` x `height` image with `channels` bytes per pixel.
    ///
    /// # Errors
    /// * [`QoiError::UnsupportedChannelCount`] if `channels` is not 3 or 4
    /// * [`QoiError::DimensionOverflow`] if a dimension does not fit in `u32`
    /// * [`QoiError::BufferSizeMismatch`] if `data` is not exactly `width * height * channels` bytes
    pub fn new(data: &'a [u8], width: usize, height: usize, channels: u8) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(QoiError::UnsupportedChannelCount(channels));
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(QoiError::DimensionOverflow { width, height });
        };
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels as usize))
            .ok_or(QoiError::DimensionOverflow { width, height })?;
        if data.len() != expected {
            return Err(QoiError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width: w,
            height: h,
            channels,
        })
    }

    /// RGBA data, 4 bytes per pixel.
    #[inline]
    pub fn rgba(data: &'a [u8], width: usize, height: usize) -> Result<Self> {
        Self::new(data, width, height, 4)
    }

    /// RGB data, 3 bytes per pixel.
    #[inline]
    pub fn rgb(data: &'a [u8], width: usize, height: usize) -> Result<Self> {
        Self::new(data, width, height, 3)
    }
}

impl PixelSource for RawImage<'_> {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn channels(&self) -> u8 {
        self.channels
    }

    #[inline]
    fn get(&self, row: u32, col: u32) -> Pixel {
        let ch = self.channels as usize;
        if row >= self.height || col >= self.width {
            return Pixel::TRANSPARENT;
        }
        let i = (row as usize * self.width as usize + col as usize) * ch;
        match &self.data[i..i + ch] {
            &[r, g, b, a] => Pixel::new(r, g, b, a),
            &[r, g, b] => Pixel::rgb(r, g, b),
            _ => Pixel::TRANSPARENT,
        }
    }
}
