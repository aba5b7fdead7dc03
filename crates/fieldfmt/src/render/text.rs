//! String and byte rendering: `%s`, `%q`, `%x`, and quoting.

use std::fmt::Write;

use fieldfmt_syntax::{Flags, FormatToken};

use super::pad::{truncate, write_fill, write_padded};

/// Render a string for `tok.verb`. Returns `false` if the verb does not
/// apply to strings.
pub(super) fn fmt_str(out: &mut String, tok: &FormatToken<'_>, s: &str) -> bool {
    match tok.verb {
        'v' if tok.has(Flags::SHARP_V) => write_padded(out, tok, &quote(s, false)),
        'v' | 's' => write_padded(out, tok, truncate(tok, s)),
        'q' => fmt_q(out, tok, s),
        'x' => fmt_hex(out, tok, s.as_bytes(), false),
        'X' => fmt_hex(out, tok, s.as_bytes(), true),
        _ => return false,
    }
    true
}

/// Render bytes as text. Invalid UTF-8 is replaced for `%s` and escaped
/// byte by byte for `%q`.
pub(super) fn fmt_bytes_text(out: &mut String, tok: &FormatToken<'_>, b: &[u8]) -> bool {
    match tok.verb {
        's' => {
            let s = String::from_utf8_lossy(b);
            write_padded(out, tok, truncate(tok, &s));
        }
        'q' => {
            let b = match tok.precision() {
                Some(p) => truncate_bytes(b, p),
                None => b,
            };
            let quoted = quote_bytes(b, tok.has(Flags::PLUS));
            write_padded(out, tok, &quoted);
        }
        'x' => fmt_hex(out, tok, b, false),
        'X' => fmt_hex(out, tok, b, true),
        _ => return false,
    }
    true
}

fn fmt_q(out: &mut String, tok: &FormatToken<'_>, s: &str) {
    let s = truncate(tok, s);
    if tok.has(Flags::SHARP) && can_backquote(s) {
        let mut q = String::with_capacity(s.len() + 2);
        q.push('`');
        q.push_str(s);
        q.push('`');
        write_padded(out, tok, &q);
    } else {
        write_padded(out, tok, &quote(s, tok.has(Flags::PLUS)));
    }
}

/// Hex dump. `SPACE` separates bytes, `SHARP` adds a `0x` prefix (per byte
/// when combined with `SPACE`). Precision limits the number of input bytes.
fn fmt_hex(out: &mut String, tok: &FormatToken<'_>, b: &[u8], upper: bool) {
    let len = tok.precision().map_or(b.len(), |p| p.min(b.len()));
    let b = &b[..len];
    let spaced = tok.has(Flags::SPACE);
    let sharp = tok.has(Flags::SHARP);

    if b.is_empty() {
        if let Some(width) = tok.width() {
            write_fill(out, ' ', width);
        }
        return;
    }

    let prefix = if upper { "0X" } else { "0x" };
    let mut body = String::with_capacity(b.len() * 5);
    if sharp && !spaced {
        body.push_str(prefix);
    }
    for (i, byte) in b.iter().enumerate() {
        if spaced {
            if i > 0 {
                body.push(' ');
            }
            if sharp {
                body.push_str(prefix);
            }
        }
        // Writing into a String cannot fail.
        let _ = if upper {
            write!(body, "{byte:02X}")
        } else {
            write!(body, "{byte:02x}")
        };
    }
    write_padded(out, tok, &body);
}

/// Longest prefix of `b` holding at most `n` chars, counting each invalid
/// byte as one char.
fn truncate_bytes(b: &[u8], n: usize) -> &[u8] {
    let mut end = 0;
    for _ in 0..n {
        if end >= b.len() {
            break;
        }
        end += utf8_len(&b[end..]);
    }
    &b[..end]
}

/// Length of the UTF-8 sequence at the start of `b`, or 1 if invalid.
fn utf8_len(b: &[u8]) -> usize {
    let want = match b[0] {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return 1,
    };
    match b.get(..want) {
        Some(seq) if std::str::from_utf8(seq).is_ok() => want,
        _ => 1,
    }
}

/// Whether `c` prints as itself inside a quoted string.
pub(super) fn is_print(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    let noncharacter = matches!(u32::from(c), 0xfdd0..=0xfdef) || (u32::from(c) & 0xfffe) == 0xfffe;
    let private = matches!(u32::from(c), 0xe000..=0xf8ff | 0xf_0000..=0x10_ffff);
    let format = matches!(
        c,
        '\u{ad}' | '\u{600}'..='\u{605}' | '\u{200b}'..='\u{200f}' | '\u{2028}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}' | '\u{feff}'
    );
    !(c.is_control() || c.is_whitespace() || noncharacter || private || format)
}

/// Whether `s` can be written between backquotes unchanged.
fn can_backquote(s: &str) -> bool {
    !s.chars()
        .any(|c| c == '`' || c == '\u{feff}' || (c.is_control() && c != '\t'))
}

fn push_escaped(out: &mut String, c: char, quote: char, ascii_only: bool) {
    if c == quote || c == '\\' {
        out.push('\\');
        out.push(c);
        return;
    }
    let printable = if ascii_only {
        c.is_ascii() && is_print(c)
    } else {
        is_print(c)
    };
    if printable {
        out.push(c);
        return;
    }
    let cp = u32::from(c);
    let _ = match c {
        '\u{7}' => out.write_str("\\a"),
        '\u{8}' => out.write_str("\\b"),
        '\u{c}' => out.write_str("\\f"),
        '\n' => out.write_str("\\n"),
        '\r' => out.write_str("\\r"),
        '\t' => out.write_str("\\t"),
        '\u{b}' => out.write_str("\\v"),
        _ if cp < 0x20 || cp == 0x7f => write!(out, "\\x{cp:02x}"),
        _ if cp < 0x1_0000 => write!(out, "\\u{cp:04x}"),
        _ => write!(out, "\\U{cp:08x}"),
    };
}

/// Double-quoted, escaped form of `s`. With `ascii_only`, every non-ASCII
/// char is escaped.
pub(super) fn quote(s: &str, ascii_only: bool) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        push_escaped(&mut out, c, '"', ascii_only);
    }
    out.push('"');
    out
}

/// Like [`quote`], but invalid UTF-8 bytes are written as `\xNN`.
fn quote_bytes(b: &[u8], ascii_only: bool) -> String {
    let mut out = String::with_capacity(b.len() + 2);
    out.push('"');
    for chunk in b.utf8_chunks() {
        for c in chunk.valid().chars() {
            push_escaped(&mut out, c, '"', ascii_only);
        }
        for byte in chunk.invalid() {
            let _ = write!(out, "\\x{byte:02x}");
        }
    }
    out.push('"');
    out
}

/// Single-quoted char literal.
pub(super) fn quote_char(c: char, ascii_only: bool) -> String {
    let mut out = String::with_capacity(6);
    out.push('\'');
    push_escaped(&mut out, c, '\'', ascii_only);
    out.push('\'');
    out
}
