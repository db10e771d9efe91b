//! QOI encoder.
//!
//! Pixels are visited in row-major order and each one is written as the shortest
//! chunk that can represent it, checked in this order: RUN, INDEX, DIFF, LUMA,
//! RGB, RGBA.

use crate::{
    Pixel, PixelSource, QoiError, Result, QOI_END_MARKER, QOI_HEADER_SIZE, QOI_MAGIC,
};

const QOI_OP_INDEX: u8 = 0x00; // 00xxxxxx
const QOI_OP_DIFF: u8 = 0x40; // 01xxxxxx
const QOI_OP_LUMA: u8 = 0x80; // 10xxxxxx
const QOI_OP_RUN: u8 = 0xc0; // 11xxxxxx
const QOI_OP_RGB: u8 = 0xfe;
const QOI_OP_RGBA: u8 = 0xff;

/// Longest run a single RUN chunk can hold (stored biased by 1 in 6 bits,
/// 63 and 64 would collide with the RGB/RGBA tags).
const MAX_RUN: u8 = 62;

const CACHE_SIZE: usize = 64;

// Upper bound on the up-front output allocation.
const PREALLOC_LIMIT: usize = 64 * 1024 * 1024;

/// The 14 byte QOI file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    /// Always 0 (sRGB with linear alpha) for this encoder.
    pub colorspace: u8,
}

impl Header {
    pub fn new(width: u32, height: u32, channels: u8) -> Self {
        Self {
            width,
            height,
            channels,
            colorspace: 0,
        }
    }

    /// Serialized header: magic, big-endian width and height, channels, colorspace.
    pub fn to_bytes(&self) -> [u8; QOI_HEADER_SIZE] {
        let mut out = [0u8; QOI_HEADER_SIZE];
        out[0..4].copy_from_slice(&QOI_MAGIC);
        out[4..8].copy_from_slice(&self.width.to_be_bytes());
        out[8..12].copy_from_slice(&self.height.to_be_bytes());
        out[12] = self.channels;
        out[13] = self.colorspace;
        out
    }
}

/// Options for the QOI encoder.
#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    /// Append the 8 byte end-of-stream marker (`00 00 00 00 00 00 00 01`).
    ///
    /// Off by default, which leaves the stream as header plus chunks only.
    /// Most third-party decoders expect the marker to be present.
    pub end_marker: bool,
}

/// Number of chunks of each kind written by one encode call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkStats {
    pub run: usize,
    pub index: usize,
    pub diff: usize,
    pub luma: usize,
    pub rgb: usize,
    pub rgba: usize,
}

impl ChunkStats {
    pub fn total(&self) -> usize {
        self.run + self.index + self.diff + self.luma + self.rgb + self.rgba
    }
}

/// Per-image encoder state.
///
/// An `Encoder` is consumed by [`Encoder::encode`], so every image starts from
/// the same initial state: previous pixel `(0, 0, 0, 255)`, a cache of 64
/// transparent pixels and no pending run.
#[derive(Debug, Clone)]
pub struct Encoder {
    prev: Pixel,
    cache: [Pixel; CACHE_SIZE],
    run: u8,
    out: Vec<u8>,
    stats: ChunkStats,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            prev: Pixel::START,
            cache: [Pixel::TRANSPARENT; CACHE_SIZE],
            run: 0,
            out: Vec::new(),
            stats: ChunkStats::default(),
        }
    }

    /// Encode a `width` x `height` grid read from `source` into a QOI stream.
    ///
    /// `channels` is only written to the header. Zero-sized grids produce a
    /// header-only stream. Grid positions outside the source's own dimensions
    /// are encoded as repeats of the previous pixel, so the source is never read
    /// out of range.
    #[must_use = "this returns the encoded QOI bytes"]
    pub fn encode<S: PixelSource + ?Sized>(
        self,
        height: u32,
        width: u32,
        channels: u8,
        source: &S,
    ) -> Vec<u8> {
        self.encode_with_stats(height, width, channels, source).0
    }

    /// Like [`Encoder::encode`], also returning how many chunks of each kind were written.
    pub fn encode_with_stats<S: PixelSource + ?Sized>(
        mut self,
        height: u32,
        width: u32,
        channels: u8,
        source: &S,
    ) -> (Vec<u8>, ChunkStats) {
        let pixels = (width as usize).saturating_mul(height as usize);
        self.out
            .reserve(QOI_HEADER_SIZE.saturating_add(pixels).min(PREALLOC_LIMIT));
        self.out
            .extend_from_slice(&Header::new(width, height, channels).to_bytes());

        let (src_w, src_h) = (source.width(), source.height());
        if (width, height) != (src_w, src_h) {
            log::warn!(
                "grid {}x{} does not match source {}x{}, pixels outside the source repeat the previous one",
                width,
                height,
                src_w,
                src_h
            );
        }
        for row in 0..height {
            for col in 0..width {
                let px = if row < src_h && col < src_w {
                    source.get(row, col)
                } else {
                    self.prev
                };
                self.push_pixel(px);
            }
        }
        if self.run > 0 {
            self.flush_run();
        }

        log::debug!(
            "encoded {}x{} ({} channels) into {} bytes: {:?}",
            width,
            height,
            channels,
            self.out.len(),
            self.stats
        );
        (self.out, self.stats)
    }

    fn push_pixel(&mut self, px: Pixel) {
        if self.run == MAX_RUN {
            self.flush_run();
        }

        if px == self.prev {
            // prev and cache already hold this color
            self.run += 1;
            return;
        }
        if self.run > 0 {
            self.flush_run();
        }

        let index = px.hash_index();
        if self.cache[index] == px {
            self.out.push(QOI_OP_INDEX | index as u8);
            self.stats.index += 1;
        } else {
            let d = px - self.prev;
            if d.fits_diff() {
                self.out.push(
                    QOI_OP_DIFF
                        | ((d.r + 2) as u8) << 4
                        | ((d.g + 2) as u8) << 2
                        | (d.b + 2) as u8,
                );
                self.stats.diff += 1;
            } else if d.fits_luma() {
                self.out.push(QOI_OP_LUMA | (d.g + 32) as u8);
                self.out
                    .push(((d.r - d.g + 8) as u8) << 4 | (d.b - d.g + 8) as u8);
                self.stats.luma += 1;
            } else if d.a == 0 {
                self.out.extend_from_slice(&[QOI_OP_RGB, px.r, px.g, px.b]);
                self.stats.rgb += 1;
            } else {
                self.out
                    .extend_from_slice(&[QOI_OP_RGBA, px.r, px.g, px.b, px.a]);
                self.stats.rgba += 1;
            }
        }

        self.prev = px;
        self.cache[index] = px;
    }

    fn flush_run(&mut self) {
        self.out.push(QOI_OP_RUN | (self.run - 1));
        self.stats.run += 1;
        self.run = 0;
    }
}

/// Upper bound on the size of an encoded image, `None` if it overflows `usize`.
///
/// Every pixel costs at most 5 bytes (an RGBA chunk).
pub fn encoded_size_limit(width: u32, height: u32, opts: &EncodeOptions) -> Option<usize> {
    let trailer = if opts.end_marker {
        QOI_END_MARKER.len()
    } else {
        0
    };
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(5)?
        .checked_add(QOI_HEADER_SIZE + trailer)
}

/// Encode a pixel source into a QOI stream.
///
/// # Errors
/// Returns [`QoiError::UnsupportedChannelCount`] if the source reports a
/// channel count other than 3 or 4.
///
/// # Example
/// ```ignore
/// use qoif::{qoi_encode, EncodeOptions, RawImage};
///
/// let rgba = vec![255u8, 0, 0, 255, 0, 255, 0, 255]; // 2 pixels: red, green
/// let image = RawImage::rgba(&rgba, 2, 1)?;
/// let qoi = qoi_encode(&image, &EncodeOptions { end_marker: true })?;
/// ```
#[must_use = "this returns the encoded QOI bytes"]
pub fn qoi_encode<S: PixelSource + ?Sized>(source: &S, opts: &EncodeOptions) -> Result<Vec<u8>> {
    let channels = source.channels();
    if channels != 3 && channels != 4 {
        return Err(QoiError::UnsupportedChannelCount(channels));
    }
    let mut out = Encoder::new().encode(source.height(), source.width(), channels, source);
    if opts.end_marker {
        out.extend_from_slice(&QOI_END_MARKER);
    }
    Ok(out)
}

/// Encode with default options.
#[inline]
#[must_use = "this returns the encoded QOI bytes"]
pub fn qoi_encode_default<S: PixelSource + ?Sized>(source: &S) -> Result<Vec<u8>> {
    qoi_encode(source, &EncodeOptions::default())
}
