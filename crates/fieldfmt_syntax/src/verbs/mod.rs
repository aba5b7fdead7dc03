//! Verb sets.
//!
//! The parser accepts only verbs in the active [`VerbSet`]; anything else is
//! reported as [`DirectiveError::InvalidVerb`](crate::DirectiveError). The
//! set is supplied by the renderer, so "invalid" always means "not
//! supported by the renderer in use".

/// A set of ASCII verb characters, stored as a 128-bit mask.
///
/// Non-ASCII characters are never members.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct VerbSet(u128);

impl VerbSet {
    /// The empty set. Every verb is invalid.
    pub const EMPTY: Self = Self(0);

    /// The verbs handled by the standard renderer.
    pub const STANDARD: Self = Self::from_chars("vTtbcdoOqxXUeEfFgGsp");

    /// Build a set from the ASCII characters in `chars`.
    ///
    /// Non-ASCII characters and digits are ignored: digits always belong to
    /// width/precision and can never be verbs.
    pub const fn from_chars(chars: &str) -> Self {
        let bytes = chars.as_bytes();
        let mut mask = 0u128;
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if b.is_ascii() && !b.is_ascii_digit() && b != b'{' {
                mask |= 1u128 << b;
            }
            i += 1;
        }
        Self(mask)
    }

    #[inline]
    pub const fn contains(self, verb: char) -> bool {
        let c = verb as u32;
        c < 128 && self.0 & (1u128 << c) != 0
    }

    /// Returns the set with `verb` added (ignored if not a valid verb byte).
    #[must_use]
    pub const fn with(self, verb: char) -> Self {
        let c = verb as u32;
        if c < 128 && !(verb.is_ascii_digit() || verb == '{') {
            Self(self.0 | (1u128 << c))
        } else {
            self
        }
    }

    /// Returns the set with `verb` removed.
    #[must_use]
    pub const fn without(self, verb: char) -> Self {
        let c = verb as u32;
        if c < 128 {
            Self(self.0 & !(1u128 << c))
        } else {
            self
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the member verbs in ASCII order.
    pub fn iter(self) -> impl Iterator<Item = char> {
        (0u8..128)
            .filter(move |&b| self.0 & (1u128 << b) != 0)
            .map(char::from)
    }
}

impl Default for VerbSet {
    fn default() -> Self {
        Self::STANDARD
    }
}
