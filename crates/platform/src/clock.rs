//! Wall-clock time, tick units and the clock/tick host services.

use core::ops::BitOr;

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("{field} = {value} outside {min}..={max}")]
pub struct OutOfRangeError {
    /// Which calendar field was rejected.
    pub field: &'static str,
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

fn check(field: &'static str, value: u8, min: u8, max: u8) -> Result<u8, OutOfRangeError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(OutOfRangeError {
            field,
            value: u32::from(value),
            min: u32::from(min),
            max: u32::from(max),
        })
    }
}

// ── WallTime ─────────────────────────────────────────────────────────────────

/// Broken-down local time as delivered by the host clock.
///
/// Fields are validated on construction, so formatting code can rely on
/// `hour < 24`, `minute < 60`, `1 <= month <= 12` and a day that exists in
/// that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl WallTime {
    /// Build a validated timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] naming the first field that is invalid.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, OutOfRangeError> {
        let month = check("month", month, 1, 12)?;
        let day = check("day", day, 1, days_in_month(year, month))?;
        let hour = check("hour", hour, 0, 23)?;
        let minute = check("minute", minute, 0, 59)?;
        let second = check("second", second, 0, 59)?;
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Midnight on 1 January 2000; the host's clock before it is set.
    pub const EPOCH: Self = Self {
        year: 2000,
        month: 1,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Calendar year.
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Month, `1..=12`.
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of month, `1..=31`.
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Hour, `0..=23`.
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute, `0..=59`.
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Second, `0..=59`.
    pub const fn second(&self) -> u8 {
        self.second
    }
}

/// Number of days in `month` of `year` (Gregorian).
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 => {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            if leap {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// ── TimeUnits ────────────────────────────────────────────────────────────────

/// Set of calendar units, used both to subscribe to ticks and to report
/// which units changed since the previous tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeUnits(u8);

impl TimeUnits {
    /// No units.
    pub const NONE: Self = Self(0);
    /// Seconds.
    pub const SECOND: Self = Self(1 << 0);
    /// Minutes.
    pub const MINUTE: Self = Self(1 << 1);
    /// Hours.
    pub const HOUR: Self = Self(1 << 2);
    /// Days.
    pub const DAY: Self = Self(1 << 3);
    /// Months.
    pub const MONTH: Self = Self(1 << 4);
    /// Years.
    pub const YEAR: Self = Self(1 << 5);

    /// `true` if every unit in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` if `self` and `other` share at least one unit.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// `true` if no unit is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Units in either set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Units whose value differs between `previous` and `next`.
    ///
    /// A change in a coarser unit also reports every finer unit, so a minute
    /// subscriber sees an hour-only jump such as 08:05 to 09:05.
    pub fn changed_between(previous: &WallTime, next: &WallTime) -> Self {
        // coarsest first
        let fields = [
            (previous.year != next.year, Self::YEAR),
            (previous.month != next.month, Self::MONTH),
            (previous.day != next.day, Self::DAY),
            (previous.hour != next.hour, Self::HOUR),
            (previous.minute != next.minute, Self::MINUTE),
            (previous.second != next.second, Self::SECOND),
        ];
        let mut units = Self::NONE;
        let mut cascade = false;
        for (differs, unit) in fields {
            cascade |= differs;
            if cascade {
                units = units | unit;
            }
        }
        units
    }
}

impl BitOr for TimeUnits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

// ── Host services ────────────────────────────────────────────────────────────

/// Host wall clock and locale preference.
pub trait Clock {
    /// Current local time.
    fn now(&self) -> WallTime;

    /// `true` if the user prefers a 24-hour clock.
    fn is_24h_style(&self) -> bool;
}

/// Host periodic tick timer.
///
/// At most one subscription is active; subscribing again replaces it.
pub trait TickService {
    /// Deliver a tick whenever any unit in `units` changes.
    fn tick_subscribe(&mut self, units: TimeUnits);

    /// Stop delivering ticks.
    fn tick_unsubscribe(&mut self);

    /// The active subscription, if any.
    fn tick_subscription(&self) -> Option<TimeUnits>;
}
