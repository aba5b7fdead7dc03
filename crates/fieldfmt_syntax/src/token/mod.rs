//! Format directive model.
//!
//! A [`FormatToken`] is the immutable description of one `%...` directive:
//! the verb, the optional field name, the flag set, and width/precision.
//! Tokens borrow their field name from the template and are consumed by the
//! interpreter as soon as they are produced.

use bitflags::bitflags;

/// Upper bound for width and precision values.
///
/// Larger numbers in a template saturate here so a single directive can
/// never expand into an unbounded amount of padding.
pub const MAX_WIDTH: usize = 1_000_000;

bitflags! {
    /// Independent directive flags.
    ///
    /// `PLUS_V` and `SHARP_V` are the `+`/`#` modifiers as seen by the
    /// generic value verb `v`; for every other verb the same characters set
    /// `PLUS`/`SHARP`. A token never carries both forms.
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
    pub struct Flags: u16 {
        /// `+`: always print a sign for numbers, ASCII-only `%q`.
        const PLUS = 1 << 0;
        /// `-`: left-justify within the width.
        const MINUS = 1 << 1;
        /// ` `: leave a space for an elided sign.
        const SPACE = 1 << 2;
        /// `#`: alternate form.
        const SHARP = 1 << 3;
        /// `0`: pad with leading zeros. Never set together with `MINUS`.
        const ZERO = 1 << 4;
        /// Width was given explicitly.
        const HAS_WIDTH = 1 << 5;
        /// Precision was given explicitly (possibly empty, meaning 0).
        const HAS_PRECISION = 1 << 6;
        /// Directive used the `%{name}` form.
        const NAMED = 1 << 7;
        /// `%+v`: verbose value.
        const PLUS_V = 1 << 8;
        /// `%#v`: source-syntax value.
        const SHARP_V = 1 << 9;
    }
}

/// One recognized format directive.
///
/// `verb` is `'\0'` only in partial tokens attached to a parse error that
/// never reached a verb character.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct FormatToken<'a> {
    /// Rendering mode.
    pub verb: char,
    /// Capture name; empty for positional directives.
    pub field: &'a str,
    pub flags: Flags,
    /// Meaningful only with [`Flags::HAS_WIDTH`].
    pub width: usize,
    /// Meaningful only with [`Flags::HAS_PRECISION`].
    pub precision: usize,
}

impl<'a> FormatToken<'a> {
    /// A plain token for `verb` with no flags.
    pub const fn new(verb: char) -> Self {
        Self {
            verb,
            field: "",
            flags: Flags::empty(),
            width: 0,
            precision: 0,
        }
    }

    /// A named token (`%{field}`) for `verb`.
    pub const fn named(field: &'a str, verb: char) -> Self {
        Self {
            verb,
            field,
            flags: Flags::NAMED,
            width: 0,
            precision: 0,
        }
    }

    /// Returns the same token with an explicit width.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.min(MAX_WIDTH);
        self.flags |= Flags::HAS_WIDTH;
        self
    }

    /// Returns the same token with an explicit precision.
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision.min(MAX_WIDTH);
        self.flags |= Flags::HAS_PRECISION;
        self
    }

    /// Returns the same token with `flags` added.
    ///
    /// Adding [`Flags::MINUS`] clears [`Flags::ZERO`], and `ZERO` is not
    /// added to a token that is already left-justified.
    #[must_use]
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags |= flags;
        if self.flags.contains(Flags::MINUS) {
            self.flags.remove(Flags::ZERO);
        }
        self
    }

    #[inline]
    pub fn has(&self, flag: Flags) -> bool {
        self.flags.contains(flag)
    }

    /// Width, if one was given.
    #[inline]
    pub fn width(&self) -> Option<usize> {
        self.has(Flags::HAS_WIDTH).then_some(self.width)
    }

    /// Precision, if one was given.
    #[inline]
    pub fn precision(&self) -> Option<usize> {
        self.has(Flags::HAS_PRECISION).then_some(self.precision)
    }

    /// Whether the directive used the `%{name}` form.
    #[inline]
    pub fn is_named(&self) -> bool {
        self.has(Flags::NAMED)
    }

    /// Move `+`/`#` onto their `v`-specific forms when the verb is `v`.
    ///
    /// Called once the verb is known; for any other verb the ordinary
    /// `PLUS`/`SHARP` flags are kept.
    pub(crate) fn settle_value_flags(&mut self) {
        if self.verb != 'v' {
            return;
        }
        if self.flags.contains(Flags::PLUS) {
            self.flags.remove(Flags::PLUS);
            self.flags.insert(Flags::PLUS_V);
        }
        if self.flags.contains(Flags::SHARP) {
            self.flags.remove(Flags::SHARP);
            self.flags.insert(Flags::SHARP_V);
        }
    }
}
