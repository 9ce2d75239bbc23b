//! Per-revision face configuration.

use platform::config::APP_GREETING;
use platform::scene::STATUS_BAR_HEIGHT;
use platform::{Color, ResourceId};
use ui::{Element, FaceLayout};

use crate::assets::BACKGROUND;

/// Minute ticks between refresh requests.
pub const DEFAULT_REFRESH_INTERVAL: u32 = 5;
/// Declared inbox size in encoded bytes.
pub const DEFAULT_INBOX_SIZE: u16 = 128;
/// Declared outbox size in encoded bytes.
pub const DEFAULT_OUTBOX_SIZE: u16 = 64;

/// One of the incremental builds of the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Revision {
    /// Static greeting and a `00:00` placeholder
    Greeting,
    /// Live clock and date
    Clock,
    /// Clock plus weather from the companion
    Weather,
    /// Clock plus a stock quote from the companion
    Stocks,
    /// Weather, stocks, status bar and bitmap background
    Showcase,
}

impl Revision {
    /// Every revision, oldest first.
    pub const ALL: [Self; 5] = [
        Self::Greeting,
        Self::Clock,
        Self::Weather,
        Self::Stocks,
        Self::Showcase,
    ];

    /// Lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Clock => "clock",
            Self::Weather => "weather",
            Self::Stocks => "stocks",
            Self::Showcase => "showcase",
        }
    }

    /// Subscribes to minute ticks.
    pub const fn has_clock(self) -> bool {
        !matches!(self, Self::Greeting)
    }

    /// Shows the weather line.
    pub const fn has_weather(self) -> bool {
        matches!(self, Self::Weather | Self::Showcase)
    }

    /// Shows the stock quote.
    pub const fn has_stocks(self) -> bool {
        matches!(self, Self::Stocks | Self::Showcase)
    }

    /// Opens messaging with the companion.
    pub const fn uses_messaging(self) -> bool {
        self.has_weather() || self.has_stocks()
    }
}

impl core::fmt::Display for Revision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Face settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceConfig {
    /// Which build of the face runs
    pub revision: Revision,
    /// Greeting text
    pub greeting: &'static str,
    /// Fired minute ticks between refresh requests; `0` disables them
    pub refresh_interval: u32,
    /// Declared inbox size
    pub inbox_size: u16,
    /// Declared outbox size
    pub outbox_size: u16,
    /// Draw a status bar across the top
    pub status_bar: bool,
    /// Tiled background bitmap
    pub background: Option<ResourceId>,
    /// Window fill
    pub window_color: Color,
}

impl FaceConfig {
    /// Defaults for `revision`.
    pub const fn for_revision(revision: Revision) -> Self {
        let showcase = matches!(revision, Revision::Showcase);
        Self {
            revision,
            greeting: APP_GREETING,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            inbox_size: DEFAULT_INBOX_SIZE,
            outbox_size: DEFAULT_OUTBOX_SIZE,
            status_bar: showcase,
            background: if showcase { Some(BACKGROUND) } else { None },
            window_color: Color::White,
        }
    }

    /// Text elements and their frames on a `width`-pixel screen.
    pub fn layout(&self, width: u32) -> FaceLayout {
        let top = if self.status_bar { STATUS_BAR_HEIGHT } else { 0 };
        match self.revision {
            Revision::Greeting => FaceLayout::classic(),
            Revision::Clock => FaceLayout::stacked(
                width,
                top,
                &[Element::Greeting, Element::Time, Element::Date],
            ),
            Revision::Weather => FaceLayout::stacked(
                width,
                top,
                &[Element::Greeting, Element::Time, Element::Date, Element::Weather],
            ),
            Revision::Stocks => FaceLayout::stacked(
                width,
                top,
                &[Element::Greeting, Element::Time, Element::Date, Element::Stock],
            ),
            Revision::Showcase => FaceLayout::stacked(
                width,
                top,
                &[Element::Time, Element::Date, Element::Weather, Element::Stock],
            ),
        }
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::for_revision(Revision::Showcase)
    }
}
