//! In-memory framebuffer and image export.

use std::path::Path;

use anyhow::Result;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;

pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb565>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = usize::try_from(width.saturating_mul(height)).unwrap_or(0);
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; len],
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok().filter(|x| *x < self.width)?;
        let y = u32::try_from(point.y).ok().filter(|y| *y < self.height)?;
        usize::try_from(y.checked_mul(self.width)?.checked_add(x)?).ok()
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point).and_then(|i| self.pixels.get(i).copied())
    }

    /// Save as an 8-bit RGB image; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let rgb_buffer: Vec<u8> = self
            .pixels
            .iter()
            .flat_map(|pixel| {
                let rgb = Rgb888::from(*pixel);
                [rgb.r(), rgb.g(), rgb.b()]
            })
            .collect();
        image::save_buffer(path, &rgb_buffer, self.width, self.height, image::ColorType::Rgb8)?;
        Ok(())
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(slot) = self.index(point).and_then(|i| self.pixels.get_mut(i)) {
                *slot = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
