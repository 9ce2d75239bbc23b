//! Clock and date strings.
//!
//! Time is always `HH:MM`, zero-padded, five characters; the 12-hour style
//! shows midnight and noon as `12`. The date line is `MM/DD`.

use platform::WallTime;

use crate::text::BoundedText;

/// Hour display preference reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourStyle {
    /// `00`–`23`
    TwentyFour,
    /// `01`–`12`
    Twelve,
}

impl HourStyle {
    /// Map the host's 24-hour flag.
    pub const fn from_24h(is_24h: bool) -> Self {
        if is_24h {
            Self::TwentyFour
        } else {
            Self::Twelve
        }
    }

    /// Displayed hour for a 0–23 hour of day.
    pub const fn display_hour(self, hour: u8) -> u8 {
        match self {
            Self::TwentyFour => hour,
            Self::Twelve => match hour % 12 {
                0 => 12,
                h => h,
            },
        }
    }
}

/// Write `HH:MM` for `time` into `out`.
pub fn format_time<const N: usize>(
    out: &mut BoundedText<N>,
    time: &WallTime,
    style: HourStyle,
) -> bool {
    out.format(format_args!(
        "{:02}:{:02}",
        style.display_hour(time.hour()),
        time.minute()
    ))
}

/// Write `MM/DD` for `time` into `out`.
pub fn format_date<const N: usize>(out: &mut BoundedText<N>, time: &WallTime) -> bool {
    out.format(format_args!("{:02}/{:02}", time.month(), time.day()))
}
