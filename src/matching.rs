//! Match records handed to callers.

use std::fmt;

/// A single occurrence of a pattern in the scanned input.
///
/// Carries a borrowed slice of the matched bytes for convenience; identity
/// is the `(pos, length, pattern)` triple, so two matches compare equal
/// whenever those agree regardless of which buffer their slices borrow from.
#[derive(Clone, Copy)]
pub struct Match<'a> {
    pos: usize,
    bytes: &'a [u8],
    pattern: u32,
}

impl<'a> Match<'a> {
    pub(crate) fn new(pos: usize, bytes: &'a [u8], pattern: u32) -> Self {
        Self {
            pos,
            bytes,
            pattern,
        }
    }

    /// Byte offset of the first matched byte in the scanned input.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Offset one past the last matched byte.
    pub fn end(&self) -> usize {
        self.pos + self.bytes.len()
    }

    /// Length of the matched pattern in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: empty patterns are rejected at insert time.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The matched bytes, borrowed from the scanned input.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Dense id assigned to the pattern when it was inserted.
    pub fn pattern(&self) -> u32 {
        self.pattern
    }
}

impl PartialEq for Match<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
            && self.bytes.len() == other.bytes.len()
            && self.pattern == other.pattern
    }
}

impl Eq for Match<'_> {}

impl fmt::Debug for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("pos", &self.pos)
            .field("bytes", &String::from_utf8_lossy(self.bytes))
            .field("pattern", &self.pattern)
            .finish()
    }
}

impl fmt::Display for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{} {:?}}}",
            self.pos,
            String::from_utf8_lossy(self.bytes)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        let buffer = b"xxxor".to_vec();
        let a = Match::new(3, b"or", 0);
        let b = Match::new(3, &buffer[3..], 0);
        assert_eq!(a, b);

        assert_ne!(a, Match::new(3, b"or", 1));
        assert_ne!(a, Match::new(2, b"or", 0));
        assert_ne!(a, Match::new(3, b"ore", 0));
    }

    #[test]
    fn display_shows_position_and_text() {
        let m = Match::new(1, b"or", 0);
        assert_eq!(format!("{}", m), r#"{1 "or"}"#);
    }

    #[test]
    fn end_is_one_past_the_match() {
        let m = Match::new(4, b"amet", 1);
        assert_eq!(m.end(), 8);
        assert_eq!(m.len(), 4);
        assert!(!m.is_empty());
    }
}
