use std::ops::Sub;

/// An RGBA pixel with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black. Every slot of the recency cache starts with this value.
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

    /// Opaque black, the previous pixel before the first one is encoded.
    pub const START: Pixel = Pixel::new(0, 0, 0, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque pixel from RGB components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Slot of this color in the 64 entry recency cache.
    #[inline]
    pub const fn hash_index(self) -> usize {
        (self.r as usize * 3 + self.g as usize * 5 + self.b as usize * 7 + self.a as usize * 11)
            % 64
    }
}

impl From<[u8; 4]> for Pixel {
    #[inline]
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<[u8; 3]> for Pixel {
    #[inline]
    fn from(c: [u8; 3]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }
}

/// Signed per-channel difference between two pixels, in `-255..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelDiff {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl PixelDiff {
    /// Alpha unchanged and every color delta in `-2..=1`.
    #[inline]
    pub fn fits_diff(&self) -> bool {
        self.a == 0
            && (-2..=1).contains(&self.r)
            && (-2..=1).contains(&self.g)
            && (-2..=1).contains(&self.b)
    }

    /// Alpha unchanged, green delta in `-32..=31` and red/blue deltas within
    /// `-8..=7` of the green delta.
    #[inline]
    pub fn fits_luma(&self) -> bool {
        self.a == 0
            && (-32..=31).contains(&self.g)
            && (-8..=7).contains(&(self.r - self.g))
            && (-8..=7).contains(&(self.b - self.g))
    }
}

impl Sub for Pixel {
    type Output = PixelDiff;

    #[inline]
    fn sub(self, rhs: Pixel) -> PixelDiff {
        PixelDiff {
            r: self.r as i16 - rhs.r as i16,
            g: self.g as i16 - rhs.g as i16,
            b: self.b as i16 - rhs.b as i16,
            a: self.a as i16 - rhs.a as i16,
        }
    }
}
