//! Bundled application resources
//!
//! Watch apps ship their images inside the app package and load them by a
//! fixed numeric identifier at startup. The host keeps a read-only table of
//! `(ResourceId, Bitmap)` pairs supplied by the application bundle; loading
//! a resource allocates a host bitmap object (see
//! [`UiToolkit::bitmap_load`](crate::UiToolkit::bitmap_load)).

/// Numeric identifier of a bundled resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResourceId(pub u32);

/// 1-bit-per-pixel image, row-major, MSB first.
///
/// `width` must be a multiple of 8 so that each row is a whole number of
/// bytes. The host tiles the image across the bitmap layer's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: &'static [u8],
}

impl Bitmap {
    /// Wrap static pixel data.
    ///
    /// Returns `None` if `data` does not hold exactly `width * height` bits
    /// or `width` is not a multiple of 8.
    pub const fn new(width: u32, height: u32, data: &'static [u8]) -> Option<Self> {
        if width == 0 || height == 0 || width % 8 != 0 {
            return None;
        }
        let row_bytes = (width / 8) as usize;
        match row_bytes.checked_mul(height as usize) {
            Some(len) if len == data.len() => Some(Self {
                width,
                height,
                data,
            }),
            _ => None,
        }
    }

    /// Width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether pixel (`x`, `y`) is set. Out-of-range pixels are unset.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let row_bytes = self.width / 8;
        let byte_index = y
            .checked_mul(row_bytes)
            .and_then(|row| row.checked_add(x / 8));
        let Some(byte) = byte_index.and_then(|i| self.data.get(i as usize)) else {
            return false;
        };
        let bit = 7u32.saturating_sub(x % 8);
        (byte >> bit) & 1 == 1
    }
}

/// One entry of an application's resource table.
pub type ResourceEntry = (ResourceId, Bitmap);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    static CHECKER: [u8; 2] = [0b1010_1010, 0b0101_0101];

    #[test]
    fn test_bitmap_rejects_wrong_length() {
        assert!(Bitmap::new(8, 3, &CHECKER).is_none());
        assert!(Bitmap::new(4, 4, &CHECKER).is_none());
    }

    #[test]
    fn test_bitmap_pixel_lookup() {
        let bmp = Bitmap::new(8, 2, &CHECKER).unwrap();
        assert!(bmp.pixel(0, 0));
        assert!(!bmp.pixel(1, 0));
        assert!(!bmp.pixel(0, 1));
        assert!(bmp.pixel(1, 1));
        assert!(!bmp.pixel(8, 0));
    }
}
