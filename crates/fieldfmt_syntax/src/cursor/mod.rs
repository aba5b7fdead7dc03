//! Character cursor over a template.
//!
//! Positions are byte offsets into the template and always sit on a char
//! boundary. Literal runs are skipped with `memchr` so text without
//! directives costs one scan; directive bodies are walked one char at a
//! time.

/// Cursor over a template string.
///
/// The cursor is [`Copy`], so callers can snapshot a position cheaply.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Character at the cursor, or `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character after the current one.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    /// Advance past the current character. No-op at end of input.
    #[inline]
    pub fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.pos += c.len_utf8();
        }
    }

    /// Advance if the current character is `c`.
    #[inline]
    pub fn eat(&mut self, c: char) -> bool {
        if self.current() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume a run of ASCII digits and return its value.
    ///
    /// Returns `None` if no digit is present. The value saturates at `cap`.
    pub fn eat_number(&mut self, cap: usize) -> Option<usize> {
        let digits = self
            .rest()
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return None;
        }
        let value = self.src.as_bytes()[self.pos..self.pos + digits]
            .iter()
            .fold(0usize, |acc, &d| {
                acc.saturating_mul(10)
                    .saturating_add(usize::from(d - b'0'))
                    .min(cap)
            });
        self.pos += digits;
        Some(value)
    }

    /// Move to the next occurrence of `byte` (ASCII), or to end of input.
    ///
    /// Returns `true` if the byte was found.
    pub fn skip_to(&mut self, byte: u8) -> bool {
        debug_assert!(byte.is_ascii(), "skip_to only accepts ASCII bytes");
        match memchr::memchr(byte, &self.src.as_bytes()[self.pos..]) {
            Some(offset) => {
                self.pos += offset;
                true
            }
            None => {
                self.pos = self.src.len();
                false
            }
        }
    }

    /// Template text from `start` up to the cursor.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.src[start..self.pos]
    }

    /// Unconsumed remainder of the template.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }
}
