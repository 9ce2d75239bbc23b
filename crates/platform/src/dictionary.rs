//! Key/value dictionaries exchanged with the companion device.
//!
//! A [`Dictionary`] is an ordered list of [`Tuple`]s. Keys are small integers
//! whose meaning is agreed between the watch app and its companion; values
//! carry an explicit type tag so a receiver can check what it got before
//! formatting it.
//!
//! # Wire format
//!
//! Dictionaries travel as postcard-encoded bytes:
//!
//! ```text
//! ┌────────────┬──────────────────────────────────────────────┐
//! │ count      │ tuples                                       │
//! │ varint     │ (key varint, tag varint, int zigzag | str)*  │
//! └────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! The inbox/outbox size limits declared by [`Messaging::open`] are compared
//! against this encoded length.
//!
//! [`Messaging::open`]: crate::messaging::Messaging::open

use serde::{Deserialize, Serialize};

/// Maximum number of tuples in one dictionary.
pub const MAX_TUPLES: usize = 16;

/// Maximum length of a text value in bytes.
pub const MAX_TEXT_LEN: usize = 32;

/// Largest encoded dictionary the host will move; inbox/outbox limits are
/// clamped to this.
pub const WIRE_CAPACITY: usize = 256;

/// Dictionary construction and codec errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictionaryError {
    /// All [`MAX_TUPLES`] slots are in use.
    #[error("dictionary full ({MAX_TUPLES} tuples)")]
    Full,
    /// A text value is longer than [`MAX_TEXT_LEN`].
    #[error("text value of {len} bytes exceeds {MAX_TEXT_LEN}")]
    TextTooLong {
        /// Length of the rejected value.
        len: usize,
    },
    /// The encoded form does not fit the supplied buffer.
    #[error("encoded dictionary exceeds {capacity} bytes")]
    BufferOverflow {
        /// Size of the buffer that was too small.
        capacity: usize,
    },
    /// The bytes are not a valid dictionary.
    #[error("malformed dictionary bytes")]
    Malformed,
}

/// Type tag of a [`TupleValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueKind {
    /// Signed 32-bit integer
    Int32,
    /// Short UTF-8 text
    Text,
}

impl ValueKind {
    /// Short name for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Text => "text",
        }
    }
}

/// A tagged dictionary value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TupleValue {
    /// Signed 32-bit integer
    Int32(i32),
    /// Short UTF-8 text
    Text(heapless::String<MAX_TEXT_LEN>),
}

impl TupleValue {
    /// The value's type tag.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Int32(_) => ValueKind::Int32,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// The integer payload, if this is an [`TupleValue::Int32`].
    pub const fn as_int32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// The text payload, if this is a [`TupleValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Int32(_) => None,
        }
    }
}

/// One key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuple {
    /// Application-defined key.
    pub key: u32,
    /// Tagged value.
    pub value: TupleValue,
}

/// An ordered key/value payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    tuples: heapless::Vec<Tuple, MAX_TUPLES>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub const fn new() -> Self {
        Self {
            tuples: heapless::Vec::new(),
        }
    }

    /// Append an integer value.
    pub fn push_int32(&mut self, key: u32, value: i32) -> Result<(), DictionaryError> {
        self.push(Tuple {
            key,
            value: TupleValue::Int32(value),
        })
    }

    /// Append a text value.
    ///
    /// # Errors
    ///
    /// [`DictionaryError::TextTooLong`] if `text` is longer than
    /// [`MAX_TEXT_LEN`] bytes; the dictionary is left unchanged.
    pub fn push_text(&mut self, key: u32, text: &str) -> Result<(), DictionaryError> {
        let mut value = heapless::String::new();
        value
            .push_str(text)
            .map_err(|_| DictionaryError::TextTooLong { len: text.len() })?;
        self.push(Tuple {
            key,
            value: TupleValue::Text(value),
        })
    }

    /// Append a prepared tuple.
    pub fn push(&mut self, tuple: Tuple) -> Result<(), DictionaryError> {
        self.tuples.push(tuple).map_err(|_| DictionaryError::Full)
    }

    /// Iterate tuples in insertion (delivery) order.
    pub fn iter(&self) -> core::slice::Iter<'_, Tuple> {
        self.tuples.iter()
    }

    /// First value stored under `key`.
    pub fn find(&self, key: u32) -> Option<&TupleValue> {
        self.tuples.iter().find(|t| t.key == key).map(|t| &t.value)
    }

    /// Number of tuples.
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    /// `true` if there are no tuples.
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Encode into `buf`, returning the used prefix.
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], DictionaryError> {
        let capacity = buf.len();
        postcard::to_slice(self, buf).map_err(|_| DictionaryError::BufferOverflow { capacity })
    }

    /// Length of the encoded form, up to [`WIRE_CAPACITY`].
    pub fn encoded_len(&self) -> Result<usize, DictionaryError> {
        let mut buf = [0u8; WIRE_CAPACITY];
        self.encode(&mut buf).map(|used| used.len())
    }

    /// Decode a dictionary produced by [`Dictionary::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, DictionaryError> {
        postcard::from_bytes(bytes).map_err(|_| DictionaryError::Malformed)
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a Tuple;
    type IntoIter = core::slice::Iter<'a, Tuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_delivery_order() {
        let mut dict = Dictionary::new();
        dict.push_text(2, "102.50").unwrap();
        dict.push_int32(4, 1).unwrap();
        let keys: heapless::Vec<u32, 4> = dict.iter().map(|t| t.key).collect();
        assert_eq!(keys.as_slice(), &[2, 4]);
    }

    #[test]
    fn test_text_too_long_is_rejected_without_change() {
        let mut dict = Dictionary::new();
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(
            dict.push_text(1, &long),
            Err(DictionaryError::TextTooLong {
                len: MAX_TEXT_LEN + 1
            })
        );
        assert!(dict.is_empty());
    }

    #[test]
    fn test_full_dictionary_rejects_push() {
        let mut dict = Dictionary::new();
        for key in 0..MAX_TUPLES {
            dict.push_int32(u32::try_from(key).unwrap(), 0).unwrap();
        }
        assert_eq!(dict.push_int32(99, 0), Err(DictionaryError::Full));
    }

    #[test]
    fn test_value_kind_and_accessors() {
        let mut dict = Dictionary::new();
        dict.push_int32(0, -5).unwrap();
        dict.push_text(1, "Sunny").unwrap();
        let temp = dict.find(0).unwrap();
        assert_eq!(temp.kind(), ValueKind::Int32);
        assert_eq!(temp.as_int32(), Some(-5));
        assert_eq!(temp.as_text(), None);
        assert_eq!(dict.find(1).unwrap().as_text(), Some("Sunny"));
    }

    #[test]
    fn test_decode_of_encoded_bytes_matches() {
        let mut dict = Dictionary::new();
        dict.push_text(2, "102.50").unwrap();
        dict.push_text(3, "1.20").unwrap();
        dict.push_int32(4, 1).unwrap();
        let mut buf = [0u8; WIRE_CAPACITY];
        let bytes = dict.encode(&mut buf).unwrap();
        assert_eq!(Dictionary::decode(bytes).unwrap(), dict);
    }

    #[test]
    fn test_encode_into_small_buffer_overflows() {
        let mut dict = Dictionary::new();
        dict.push_text(1, "Partly cloudy with showers").unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(
            dict.encode(&mut buf),
            Err(DictionaryError::BufferOverflow { capacity: 8 })
        );
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        assert_eq!(
            Dictionary::decode(&[0x05, 0xFF]),
            Err(DictionaryError::Malformed)
        );
    }

    #[test]
    fn test_encoded_len_grows_with_text() {
        let mut short = Dictionary::new();
        short.push_text(1, "a").unwrap();
        let mut long = Dictionary::new();
        long.push_text(1, "abcdefghij").unwrap();
        assert!(long.encoded_len().unwrap() > short.encoded_len().unwrap());
    }
}
