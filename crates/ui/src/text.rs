//! Fixed-capacity display buffers.
//!
//! A [`BoundedText`] never grows past `N` bytes. Writes that do not fit are
//! cut at the last UTF-8 boundary that does, and the buffer remembers that
//! it was truncated until the next full rewrite.

use core::fmt;

/// Bounded, truncating text buffer of `N` bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundedText<const N: usize> {
    buf: heapless::String<N>,
    truncated: bool,
}

impl<const N: usize> BoundedText<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            buf: heapless::String::new(),
            truncated: false,
        }
    }

    /// Replace the contents with `text`. Returns `false` if it had to be
    /// truncated.
    pub fn set(&mut self, text: &str) -> bool {
        self.clear();
        self.push_str(text)
    }

    /// Replace the contents with formatted output. Returns `false` if the
    /// output was truncated.
    pub fn format(&mut self, args: fmt::Arguments<'_>) -> bool {
        self.clear();
        // write_str below never reports an error, it truncates instead
        let _ = fmt::Write::write_fmt(self, args);
        !self.truncated
    }

    /// Append as much of `text` as fits. Returns `false` if anything was cut.
    pub fn push_str(&mut self, text: &str) -> bool {
        let room = N.saturating_sub(self.buf.len());
        let fitted = floor_char_boundary(text, room);
        let cut = fitted.len() < text.len();
        // cannot fail: `fitted` is at most `room` bytes
        let _ = self.buf.push_str(fitted);
        if cut {
            self.truncated = true;
        }
        !cut
    }

    /// Empty the buffer and clear the truncation flag.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.truncated = false;
    }

    /// Current contents.
    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    /// `true` if the last rewrite lost input.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// `true` if the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Capacity in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }
}

/// Longest prefix of `text` that is at most `max` bytes and ends on a char
/// boundary.
fn floor_char_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    text.get(..end).unwrap_or_default()
}

impl<const N: usize> fmt::Write for BoundedText<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> PartialEq<str> for BoundedText<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::BoundedText;

    #[test]
    fn test_set_fits() {
        let mut t = BoundedText::<8>::new();
        assert!(t.set("00:00"));
        assert_eq!(t, "00:00");
        assert!(!t.is_truncated());
    }

    #[test]
    fn test_set_truncates_and_flags() {
        let mut t = BoundedText::<4>::new();
        assert!(!t.set("Partly cloudy"));
        assert_eq!(t, "Part");
        assert!(t.is_truncated());
        assert!(t.set("Sun"));
        assert!(!t.is_truncated());
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        // "21°C" is 5 bytes: '°' takes two
        let mut t = BoundedText::<3>::new();
        t.set("21°C");
        assert_eq!(t, "21");
        assert!(t.is_truncated());
    }

    #[test]
    fn test_format_writes_whole_output() {
        let mut t = BoundedText::<16>::new();
        assert!(t.format(format_args!("{}, {}", "21°C", "Sunny")));
        assert_eq!(t, "21°C, Sunny");
    }

    #[test]
    fn test_format_overflow_keeps_prefix() {
        let mut t = BoundedText::<6>::new();
        assert!(!t.format(format_args!("{}{}", "abc", "defgh")));
        assert_eq!(t, "abcdef");
        assert_eq!(t.len(), t.capacity());
    }
}
