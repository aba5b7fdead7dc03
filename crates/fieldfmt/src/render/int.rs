//! Integer rendering: bases, signs, minimum digits, char verbs.

use fieldfmt_syntax::{Flags, FormatToken};

use super::pad::{write_fill, write_padded, write_padded_with};
use super::text::quote_char;

const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// An integer split into sign and magnitude, so `i64::MIN` and `u64::MAX`
/// share one code path.
#[derive(Clone, Copy, Debug)]
pub(super) struct Integer {
    pub negative: bool,
    pub magnitude: u64,
}

impl Integer {
    pub fn signed(v: i64) -> Self {
        Self {
            negative: v < 0,
            magnitude: v.unsigned_abs(),
        }
    }

    pub fn unsigned(v: u64) -> Self {
        Self {
            negative: false,
            magnitude: v,
        }
    }

    /// The code point this integer names, if it is one.
    fn code_point(self) -> Option<u32> {
        if self.negative {
            return None;
        }
        u32::try_from(self.magnitude).ok().filter(|&c| c <= 0x10_FFFF)
    }
}

/// Render `n` for `tok.verb`. Returns `false` if the verb does not apply
/// to integers.
pub(super) fn fmt_integer(out: &mut String, tok: &FormatToken<'_>, n: Integer) -> bool {
    match tok.verb {
        'v' | 'd' => fmt_radix(out, tok, n, 10, LOWER_DIGITS),
        'b' => fmt_radix(out, tok, n, 2, LOWER_DIGITS),
        'o' | 'O' => fmt_radix(out, tok, n, 8, LOWER_DIGITS),
        'x' => fmt_radix(out, tok, n, 16, LOWER_DIGITS),
        'X' => fmt_radix(out, tok, n, 16, UPPER_DIGITS),
        'c' => {
            let c = n
                .code_point()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            let mut buf = [0u8; 4];
            write_padded(out, tok, c.encode_utf8(&mut buf));
        }
        'q' => match n.code_point() {
            Some(cp) => {
                let c = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
                let quoted = quote_char(c, tok.has(Flags::PLUS));
                write_padded(out, tok, &quoted);
            }
            None => return false,
        },
        'U' => fmt_unicode(out, tok, n),
        _ => return false,
    }
    true
}

/// Unsigned hex with a `0x` prefix, as used for `%v` on unsigned values in
/// source syntax and for addresses.
pub(super) fn fmt_hex_prefixed(out: &mut String, tok: &FormatToken<'_>, v: u64) {
    let tok = FormatToken {
        verb: 'x',
        flags: tok.flags | Flags::SHARP,
        ..*tok
    };
    fmt_radix(out, &tok, Integer::unsigned(v), 16, LOWER_DIGITS);
}

fn fmt_radix(out: &mut String, tok: &FormatToken<'_>, n: Integer, base: u64, digits: &[u8; 16]) {
    let sign = if n.negative {
        Some('-')
    } else if tok.has(Flags::PLUS) {
        Some('+')
    } else if tok.has(Flags::SPACE) {
        Some(' ')
    } else {
        None
    };

    // Precision is a minimum digit count. With no precision, zero padding
    // becomes one: the zeros go between the sign and the digits.
    let min_digits = match tok.precision() {
        Some(0) if n.magnitude == 0 => {
            if let Some(width) = tok.width() {
                write_fill(out, ' ', width);
            }
            return;
        }
        Some(p) => p,
        None => match tok.width() {
            Some(w) if tok.has(Flags::ZERO) => w.saturating_sub(usize::from(sign.is_some())),
            _ => 0,
        },
    };

    let mut rev = Vec::with_capacity(24);
    let mut m = n.magnitude;
    loop {
        #[allow(clippy::cast_possible_truncation)]
        rev.push(digits[(m % base) as usize]);
        m /= base;
        if m == 0 {
            break;
        }
    }

    let mut body = String::with_capacity(rev.len().max(min_digits) + 3);
    if let Some(s) = sign {
        body.push(s);
    }
    match (base, tok.verb) {
        (8, 'O') => body.push_str("0o"),
        (2, _) if tok.has(Flags::SHARP) => body.push_str("0b"),
        (16, 'X') if tok.has(Flags::SHARP) => body.push_str("0X"),
        (16, _) if tok.has(Flags::SHARP) => body.push_str("0x"),
        (8, _) if tok.has(Flags::SHARP) && rev.len() >= min_digits && rev.last() != Some(&b'0') => {
            body.push('0');
        }
        _ => {}
    }
    write_fill(&mut body, '0', min_digits.saturating_sub(rev.len()));
    body.extend(rev.iter().rev().map(|&b| char::from(b)));

    write_padded_with(out, tok, &body, ' ');
}

fn fmt_unicode(out: &mut String, tok: &FormatToken<'_>, n: Integer) {
    let min_digits = tok.precision().map_or(4, |p| p.max(4));
    // Negative values print as their two's complement.
    let bits = if n.negative {
        n.magnitude.wrapping_neg()
    } else {
        n.magnitude
    };
    let mut body = format!("U+{bits:0min_digits$X}");
    if tok.has(Flags::SHARP) {
        if let Some(c) = n.code_point().and_then(char::from_u32) {
            if super::text::is_print(c) {
                body.push_str(" '");
                body.push(c);
                body.push('\'');
            }
        }
    }
    write_padded_with(out, tok, &body, ' ');
}
