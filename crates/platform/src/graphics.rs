//! Drawing attributes understood by the host toolkit

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Layer colours.
///
/// Monochrome hosts only render [`Color::Black`], [`Color::White`] and
/// [`Color::Clear`]; the renderer maps the rest to black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Transparent: nothing is drawn
    Clear,
    /// Black
    Black,
    /// White
    White,
    /// Light gray
    LightGray,
    /// Dark gray
    DarkGray,
    /// Red (falling stock)
    Red,
    /// Green (rising stock)
    Green,
    /// Blue
    Blue,
}

impl Color {
    /// Convert to an RGB565 pixel colour, or `None` for [`Color::Clear`].
    pub fn to_rgb565(self, color_display: bool) -> Option<Rgb565> {
        let rgb = match self {
            Self::Clear => return None,
            Self::Black => Rgb565::BLACK,
            Self::White => Rgb565::WHITE,
            Self::LightGray if color_display => Rgb565::new(21, 42, 21),
            Self::DarkGray if color_display => Rgb565::new(10, 21, 10),
            Self::Red if color_display => Rgb565::new(21, 0, 0),
            Self::Green if color_display => Rgb565::new(0, 42, 0),
            Self::Blue if color_display => Rgb565::BLUE,
            Self::LightGray => Rgb565::WHITE,
            Self::DarkGray | Self::Red | Self::Green | Self::Blue => Rgb565::BLACK,
        };
        Some(rgb)
    }
}

/// System fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontKey {
    /// Small body text (date, tickers)
    Gothic18,
    /// Medium bold text (weather line)
    Gothic24Bold,
    /// Large bold text (greeting, first-revision clock)
    Gothic28Bold,
    /// Numeric display font for the clock
    Bitham42Bold,
}

/// Horizontal text alignment inside a text layer frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlignment {
    /// Flush left
    Left,
    /// Centred
    Center,
    /// Flush right
    Right,
}

/// Shorthand for a layer frame, mirroring the host's `GRect(x, y, w, h)`.
pub const fn rect(x: i32, y: i32, width: u32, height: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(width, height))
}
