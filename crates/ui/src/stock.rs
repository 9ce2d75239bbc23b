//! Stock quote line.
//!
//! Monochrome displays carry the direction as a `+`/`-` glyph in the text;
//! colour displays drop the glyph and tint the layer instead.

use platform::Color;

use crate::text::BoundedText;

/// How the sign of the change is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignStyle {
    /// Prefix the change with `+` or `-`
    Glyph,
    /// No glyph; the caller recolours the layer with [`trend_color`]
    Color,
}

impl SignStyle {
    /// Pick the style for a display.
    pub const fn for_display(supports_color: bool) -> Self {
        if supports_color {
            Self::Color
        } else {
            Self::Glyph
        }
    }
}

/// Write the quote line for `price` and `change`.
///
/// | style   | negative | output          |
/// |---------|----------|-----------------|
/// | `Glyph` | yes      | `"{p} -{c}"`    |
/// | `Glyph` | no       | `"{p} +{c}"`    |
/// | `Color` | either   | `"{p} {c}"`     |
pub fn compose_quote<const N: usize>(
    out: &mut BoundedText<N>,
    price: &str,
    change: &str,
    negative: bool,
    style: SignStyle,
) -> bool {
    let sign = match (style, negative) {
        (SignStyle::Color, _) => "",
        (SignStyle::Glyph, true) => "-",
        (SignStyle::Glyph, false) => "+",
    };
    out.format(format_args!("{price} {sign}{change}"))
}

/// Text colour for the quote on a colour display.
pub const fn trend_color(negative: bool) -> Color {
    if negative {
        Color::Red
    } else {
        Color::Green
    }
}
