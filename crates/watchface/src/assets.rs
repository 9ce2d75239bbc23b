//! Bundled resources.
//!
//! The background is a 16×16 diagonal hatch, 1 bit per pixel, tiled by the
//! host across the bitmap layer.

use platform::resources::ResourceEntry;
use platform::{Bitmap, ResourceId};

/// Identifier of the background tile.
pub const BACKGROUND: ResourceId = ResourceId(1);

// two bytes per row
#[rustfmt::skip]
static BACKGROUND_TILE: [u8; 32] = [
    0x80, 0x80,
    0x01, 0x01,
    0x02, 0x02,
    0x04, 0x04,
    0x08, 0x08,
    0x10, 0x10,
    0x20, 0x20,
    0x40, 0x40,
    0x80, 0x80,
    0x01, 0x01,
    0x02, 0x02,
    0x04, 0x04,
    0x08, 0x08,
    0x10, 0x10,
    0x20, 0x20,
    0x40, 0x40,
];

/// Resource table handed to the host at launch.
// evaluated at compile time: a malformed tile fails the build
#[allow(clippy::panic)]
pub static RESOURCES: [ResourceEntry; 1] = [(
    BACKGROUND,
    match Bitmap::new(16, 16, &BACKGROUND_TILE) {
        Some(bitmap) => bitmap,
        None => panic!("background tile size mismatch"),
    },
)];

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_bundled() {
        let entry = RESOURCES.iter().find(|(id, _)| *id == BACKGROUND);
        assert!(entry.is_some_and(|(_, bitmap)| bitmap.width() == 16 && bitmap.height() == 16));
    }

    #[test]
    fn test_tile_is_a_diagonal() {
        let (_, bitmap) = RESOURCES[0];
        for i in 0..16 {
            assert!(bitmap.pixel((8 - i % 8) % 8, i));
        }
        assert!(!bitmap.pixel(1, 0));
    }
}
