//! Width padding.
//!
//! Widths count chars, not bytes. `ZERO` pads on the left with `'0'`;
//! `MINUS` pads on the right with spaces (the parser never sets both).

use fieldfmt_syntax::{Flags, FormatToken};

pub(super) fn write_fill(out: &mut String, fill: char, count: usize) {
    out.extend(std::iter::repeat(fill).take(count));
}

/// Append `s` padded to the token's width using the token's fill.
pub(super) fn write_padded(out: &mut String, tok: &FormatToken<'_>, s: &str) {
    let fill = if tok.has(Flags::ZERO) { '0' } else { ' ' };
    write_padded_with(out, tok, s, fill);
}

/// Append `s` padded to the token's width, filling the left with `fill`.
pub(super) fn write_padded_with(out: &mut String, tok: &FormatToken<'_>, s: &str, fill: char) {
    let Some(width) = tok.width() else {
        out.push_str(s);
        return;
    };
    let padding = width.saturating_sub(s.chars().count());
    if tok.has(Flags::MINUS) {
        out.push_str(s);
        write_fill(out, ' ', padding);
    } else {
        write_fill(out, fill, padding);
        out.push_str(s);
    }
}

/// Truncate `s` to the token's precision, counted in chars.
pub(super) fn truncate<'s>(tok: &FormatToken<'_>, s: &'s str) -> &'s str {
    match tok.precision() {
        Some(p) => match s.char_indices().nth(p) {
            Some((end, _)) => &s[..end],
            None => s,
        },
        None => s,
    }
}
