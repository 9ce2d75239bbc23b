//! Face layout.
//!
//! Elements are stacked top to bottom at fixed heights, starting below the
//! status bar when there is one. The first revision keeps its own two
//! overlapping full-width frames.

use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use platform::graphics::rect;
use platform::FontKey;

/// Maximum number of stacked elements.
pub const MAX_ELEMENTS: usize = 6;

/// Greeting frame of the first revision.
pub const CLASSIC_GREETING_FRAME: Rectangle = rect(0, 0, 144, 154);
/// Placeholder clock frame of the first revision.
pub const CLASSIC_TIME_FRAME: Rectangle = rect(0, 40, 144, 114);
/// Font of both first-revision elements.
pub const CLASSIC_FONT: FontKey = FontKey::Gothic28Bold;

/// One text element of the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// Static greeting
    Greeting,
    /// `HH:MM`
    Time,
    /// `MM/DD`
    Date,
    /// Temperature and conditions
    Weather,
    /// Stock quote
    Stock,
}

impl Element {
    /// Short lowercase name, for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Time => "time",
            Self::Date => "date",
            Self::Weather => "weather",
            Self::Stock => "stock",
        }
    }

    /// Row height in pixels.
    pub const fn height(self) -> u32 {
        match self {
            Self::Greeting | Self::Date => 30,
            Self::Time => 50,
            Self::Weather | Self::Stock => 28,
        }
    }

    /// Font used when stacked.
    pub const fn font(self) -> FontKey {
        match self {
            Self::Greeting | Self::Date => FontKey::Gothic24Bold,
            Self::Time => FontKey::Bitham42Bold,
            Self::Weather | Self::Stock => FontKey::Gothic18,
        }
    }
}

impl core::fmt::Display for Element {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frames assigned to each element of one face.
#[derive(Debug, Clone, Default)]
pub struct FaceLayout {
    frames: Vec<(Element, Rectangle), MAX_ELEMENTS>,
}

impl FaceLayout {
    /// Stack `elements` from `top` downwards across a `width`-pixel screen.
    ///
    /// Elements past [`MAX_ELEMENTS`] are ignored.
    pub fn stacked(width: u32, top: u32, elements: &[Element]) -> Self {
        let mut frames = Vec::new();
        let mut y = top;
        for element in elements {
            let origin = i32::try_from(y).unwrap_or(i32::MAX);
            if frames
                .push((*element, rect(0, origin, width, element.height())))
                .is_err()
            {
                break;
            }
            y = y.saturating_add(element.height());
        }
        Self { frames }
    }

    /// The first revision's greeting and placeholder clock.
    pub fn classic() -> Self {
        let mut frames = Vec::new();
        let _ = frames.push((Element::Greeting, CLASSIC_GREETING_FRAME));
        let _ = frames.push((Element::Time, CLASSIC_TIME_FRAME));
        Self { frames }
    }

    /// Frame of `element`, if it is part of this layout.
    pub fn frame(&self, element: Element) -> Option<Rectangle> {
        self.frames
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, frame)| *frame)
    }

    /// Elements in top-to-bottom order.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.frames.iter().map(|(e, _)| *e)
    }

    /// Lowest pixel row used, exclusive.
    pub fn bottom(&self) -> i32 {
        self.frames
            .iter()
            .filter_map(|(_, frame)| frame.bottom_right())
            .map(|p| p.y.saturating_add(1))
            .max()
            .unwrap_or(0)
    }
}
