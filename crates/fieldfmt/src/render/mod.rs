//! Value rendering.
//!
//! A [`Render`] implementation turns one argument into text for one
//! directive. The interpreter asks it for the verbs it supports (the parser
//! rejects everything else), hands it every resolved `(token, value)` pair,
//! and lets it spell directive error markers.
//!
//! [`StdRenderer`] renders [`Value`] with printf-family semantics: numeric
//! bases, sign and space flags, zero padding, precision as minimum digits
//! for integers and as digits after the point for floats, quoting for `%q`,
//! hex dumps for `%x`. A verb that exists but does not apply to the value
//! (`%d` of a string) renders as `%!d(string=hi)`.

mod float;
mod int;
mod pad;
mod text;

use fieldfmt_syntax::{DirectiveError, Flags, FormatToken, VerbSet};

use crate::value::Value;

use int::Integer;

/// Renders argument values of type `V`.
pub trait Render<V: ?Sized> {
    /// The verbs this renderer accepts.
    fn verbs(&self) -> VerbSet {
        VerbSet::STANDARD
    }

    /// Append `value` rendered for `token`.
    fn render(&self, token: &FormatToken<'_>, value: &V, out: &mut String);

    /// Append a short `type=value` description of `value`, used inside
    /// inline markers.
    fn describe(&self, value: &V, out: &mut String);

    /// Append the inline marker for a directive error.
    fn render_error(&self, token: &FormatToken<'_>, error: DirectiveError, out: &mut String) {
        error.write_marker(token.verb, out);
    }
}

impl<V: ?Sized, R: Render<V> + ?Sized> Render<V> for &R {
    fn verbs(&self) -> VerbSet {
        (**self).verbs()
    }

    fn render(&self, token: &FormatToken<'_>, value: &V, out: &mut String) {
        (**self).render(token, value, out);
    }

    fn describe(&self, value: &V, out: &mut String) {
        (**self).describe(value, out);
    }

    fn render_error(&self, token: &FormatToken<'_>, error: DirectiveError, out: &mut String) {
        (**self).render_error(token, error, out);
    }
}

/// The standard renderer for [`Value`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StdRenderer;

impl StdRenderer {
    /// Append the plain `%v` form of `value`.
    pub fn write_value(&self, value: &Value, out: &mut String) {
        self.render(&FormatToken::new('v'), value, out);
    }

    fn dispatch(&self, tok: &FormatToken<'_>, value: &Value, out: &mut String) -> bool {
        match value {
            Value::Nil => match tok.verb {
                'v' => {
                    pad::write_padded(out, tok, "<nil>");
                    true
                }
                _ => false,
            },
            Value::Bool(b) => match tok.verb {
                'v' | 't' => {
                    pad::write_padded(out, tok, if *b { "true" } else { "false" });
                    true
                }
                _ => false,
            },
            Value::Int(i) => int::fmt_integer(out, tok, Integer::signed(*i)),
            Value::Uint(u) if tok.verb == 'v' && tok.has(Flags::SHARP_V) => {
                int::fmt_hex_prefixed(out, tok, *u);
                true
            }
            Value::Uint(u) => int::fmt_integer(out, tok, Integer::unsigned(*u)),
            Value::Float(f) => float::fmt_float(out, tok, *f),
            Value::Str(s) => text::fmt_str(out, tok, s),
            Value::Error(e) => text::fmt_str(out, tok, &e.to_string()),
            Value::Bytes(b) => self.bytes(tok, b, out),
            Value::Pointer(addr) => pointer(tok, *addr, out),
            Value::List(items) => {
                self.list(tok, items, out);
                true
            }
        }
    }

    fn bytes(&self, tok: &FormatToken<'_>, b: &[u8], out: &mut String) -> bool {
        match tok.verb {
            's' | 'q' | 'x' | 'X' => text::fmt_bytes_text(out, tok, b),
            'v' if tok.has(Flags::SHARP_V) => {
                out.push_str("[]byte{");
                for (i, byte) in b.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    int::fmt_hex_prefixed(out, &FormatToken::new('x'), u64::from(*byte));
                }
                out.push('}');
                true
            }
            _ => {
                // Element-wise, like a list of unsigned integers.
                out.push('[');
                for (i, byte) in b.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    self.render(tok, &Value::Uint(u64::from(*byte)), out);
                }
                out.push(']');
                true
            }
        }
    }

    fn list(&self, tok: &FormatToken<'_>, items: &[Value], out: &mut String) {
        if tok.verb == 'v' && tok.has(Flags::SHARP_V) {
            out.push_str("[]value{");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.render(tok, item, out);
            }
            out.push('}');
            return;
        }
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            self.render(tok, item, out);
        }
        out.push(']');
    }

    fn bad_verb(&self, tok: &FormatToken<'_>, value: &Value, out: &mut String) {
        out.push_str("%!");
        out.push(tok.verb);
        out.push('(');
        self.describe(value, out);
        out.push(')');
    }
}

fn pointer(tok: &FormatToken<'_>, addr: usize, out: &mut String) -> bool {
    let addr = u64::try_from(addr).unwrap_or(u64::MAX);
    match tok.verb {
        'p' if tok.has(Flags::SHARP) => {
            let plain = FormatToken {
                verb: 'x',
                flags: tok.flags - Flags::SHARP,
                ..*tok
            };
            int::fmt_integer(out, &plain, Integer::unsigned(addr))
        }
        'p' => {
            int::fmt_hex_prefixed(out, tok, addr);
            true
        }
        'v' if addr == 0 => {
            pad::write_padded(out, tok, "<nil>");
            true
        }
        'v' => {
            int::fmt_hex_prefixed(out, tok, addr);
            true
        }
        'b' | 'o' | 'd' | 'x' | 'X' => int::fmt_integer(out, tok, Integer::unsigned(addr)),
        _ => false,
    }
}

impl Render<Value> for StdRenderer {
    fn render(&self, tok: &FormatToken<'_>, value: &Value, out: &mut String) {
        if tok.verb == 'T' {
            pad::write_padded(out, tok, pad::truncate(tok, value.type_name()));
            return;
        }
        if !self.dispatch(tok, value, out) {
            self.bad_verb(tok, value, out);
        }
    }

    fn describe(&self, value: &Value, out: &mut String) {
        if value.is_nil() {
            out.push_str("<nil>");
            return;
        }
        out.push_str(value.type_name());
        out.push('=');
        self.write_value(value, out);
    }
}

#[cfg(test)]
mod tests;
