//! Message keys shared with the companion app.
//!
//! | key | name          | kind  | direction          |
//! |-----|---------------|-------|--------------------|
//! | 0   | `Temperature` | Int32 | companion → watch  |
//! | 1   | `Conditions`  | Text  | companion → watch  |
//! | 2   | `Price`       | Text  | companion → watch  |
//! | 3   | `Change`      | Text  | companion → watch  |
//! | 4   | `Negative`    | Int32 | companion → watch  |
//! | 0   | refresh       | Int32 | watch → companion  |

use platform::ValueKind;

use crate::config::Revision;

/// Key of the outbound refresh request.
pub const REQUEST_KEY: u32 = 0;
/// Value sent with [`REQUEST_KEY`].
pub const REQUEST_VALUE: i32 = 0;

/// Inbound keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum MessageKey {
    /// Temperature in °C
    Temperature = 0,
    /// Short weather description
    Conditions = 1,
    /// Quote price, preformatted
    Price = 2,
    /// Absolute price change, preformatted
    Change = 3,
    /// Non-zero when the change is negative
    Negative = 4,
}

impl MessageKey {
    /// Wire value.
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// The only value kind accepted for this key.
    pub const fn expected_kind(self) -> ValueKind {
        match self {
            Self::Temperature | Self::Negative => ValueKind::Int32,
            Self::Conditions | Self::Price | Self::Change => ValueKind::Text,
        }
    }

    /// Feeds the weather line.
    pub const fn is_weather(self) -> bool {
        matches!(self, Self::Temperature | Self::Conditions)
    }

    /// Feeds the stock quote.
    pub const fn is_stock(self) -> bool {
        matches!(self, Self::Price | Self::Change | Self::Negative)
    }

    /// Decode `raw`, accepting only keys that `revision` displays.
    pub const fn from_raw(raw: u32, revision: Revision) -> Option<Self> {
        let key = match raw {
            0 => Self::Temperature,
            1 => Self::Conditions,
            2 => Self::Price,
            3 => Self::Change,
            4 => Self::Negative,
            _ => return None,
        };
        if (key.is_weather() && revision.has_weather())
            || (key.is_stock() && revision.has_stocks())
        {
            Some(key)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_revision_rejects_stock_keys() {
        assert_eq!(MessageKey::from_raw(0, Revision::Weather), Some(MessageKey::Temperature));
        assert_eq!(MessageKey::from_raw(2, Revision::Weather), None);
    }

    #[test]
    fn test_stocks_revision_rejects_weather_keys() {
        assert_eq!(MessageKey::from_raw(4, Revision::Stocks), Some(MessageKey::Negative));
        assert_eq!(MessageKey::from_raw(1, Revision::Stocks), None);
    }

    #[test]
    fn test_showcase_accepts_all_known_keys() {
        for raw in 0..5 {
            let key = MessageKey::from_raw(raw, Revision::Showcase);
            assert_eq!(key.map(MessageKey::raw), Some(raw));
        }
        assert_eq!(MessageKey::from_raw(99, Revision::Showcase), None);
    }

    #[test]
    fn test_expected_kinds() {
        assert_eq!(MessageKey::Temperature.expected_kind(), ValueKind::Int32);
        assert_eq!(MessageKey::Conditions.expected_kind(), ValueKind::Text);
        assert_eq!(MessageKey::Negative.expected_kind(), ValueKind::Int32);
    }
}
