use std::io;

use fieldfmt_syntax::{DirectiveError, Flags, FormatToken};
use pretty_assertions::assert_eq;

use super::{Render, StdRenderer};
use crate::value::Value;

/// Build a token from a compact directive description, e.g. `"+08.3f"`.
fn tok(spec: &str) -> FormatToken<'static> {
    let (prefix, verb) = spec.split_at(spec.len() - verb_len(spec));
    let verb = verb.chars().next().unwrap_or('v');
    let mut t = FormatToken::new(verb);
    let mut rest = prefix;
    let mut flags = Flags::empty();
    while let Some(c) = rest.chars().next() {
        let f = match c {
            '+' => Flags::PLUS,
            '-' => Flags::MINUS,
            ' ' => Flags::SPACE,
            '#' => Flags::SHARP,
            '0' => Flags::ZERO,
            _ => break,
        };
        flags |= f;
        rest = &rest[1..];
    }
    if verb == 'v' {
        if flags.contains(Flags::PLUS) {
            flags = (flags - Flags::PLUS) | Flags::PLUS_V;
        }
        if flags.contains(Flags::SHARP) {
            flags = (flags - Flags::SHARP) | Flags::SHARP_V;
        }
    }
    t = t.with_flags(flags);
    let (width, prec) = match rest.split_once('.') {
        Some((w, p)) => (w, Some(p)),
        None => (rest, None),
    };
    if !width.is_empty() {
        t = t.with_width(width.parse().unwrap_or(0));
    }
    if let Some(p) = prec {
        t = t.with_precision(p.parse().unwrap_or(0));
    }
    t
}

fn verb_len(spec: &str) -> usize {
    spec.chars().last().map_or(0, char::len_utf8)
}

fn render(spec: &str, value: impl Into<Value>) -> String {
    let mut out = String::new();
    StdRenderer.render(&tok(spec), &value.into(), &mut out);
    out
}

#[test]
fn integers() {
    assert_eq!(render("d", 12345), "12345");
    assert_eq!(render("v", -12345), "-12345");
    assert_eq!(render("+d", 12), "+12");
    assert_eq!(render(" d", 12), " 12");
    assert_eq!(render("8d", -12), "     -12");
    assert_eq!(render("-8d", 12), "12      ");
    assert_eq!(render("08d", -12), "-0000012");
    assert_eq!(render("+08d", 12), "+0000012");
    assert_eq!(render(".5d", 12), "00012");
    assert_eq!(render("8.3d", -7), "    -007");
    assert_eq!(render(".0d", 0), "");
    assert_eq!(render("3.0d", 0), "   ");
    assert_eq!(render("d", i64::MIN), "-9223372036854775808");
    assert_eq!(render("d", u64::MAX), "18446744073709551615");
}

#[test]
fn zero_width_value_matches_zero_padding() {
    assert_eq!(render("03v", 2), "002");
}

#[test]
fn integer_bases() {
    assert_eq!(render("b", 5), "101");
    assert_eq!(render("#b", 5), "0b101");
    assert_eq!(render("o", 8), "10");
    assert_eq!(render("#o", 8), "010");
    assert_eq!(render("#o", 0), "0");
    assert_eq!(render("O", 8), "0o10");
    assert_eq!(render("x", 255), "ff");
    assert_eq!(render("X", 255), "FF");
    assert_eq!(render("#x", 255), "0xff");
    assert_eq!(render("#X", 255), "0XFF");
    assert_eq!(render("#x", -255), "-0xff");
    assert_eq!(render("#08x", 255), "0x000000ff");
    assert_eq!(render("#v", 255u32), "0xff");
    assert_eq!(render("#v", -3), "-3");
}

#[test]
fn chars_and_code_points() {
    assert_eq!(render("c", 'x'), "x");
    assert_eq!(render("c", 0x4E16), "世");
    assert_eq!(render("c", -1), "\u{fffd}");
    assert_eq!(render("c", 0xD800), "\u{fffd}");
    assert_eq!(render("q", 'x'), "'x'");
    assert_eq!(render("q", '\''), r"'\''");
    assert_eq!(render("q", '\n'), r"'\n'");
    assert_eq!(render("q", '☺'), "'☺'");
    assert_eq!(render("+q", '☺'), r"'\u263a'");
    assert_eq!(render("q", -1), "%!q(int=-1)");
    assert_eq!(render("q", 0x11_0000), "%!q(int=1114112)");
    assert_eq!(render("U", 'A'), "U+0041");
    assert_eq!(render("U", 0x1F600), "U+1F600");
    assert_eq!(render("#U", 'A'), "U+0041 'A'");
    assert_eq!(render("#U", '\n'), "U+000A");
    assert_eq!(render(".6U", 'A'), "U+000041");
}

#[test]
fn floats() {
    assert_eq!(render("v", 1.0), "1");
    assert_eq!(render("v", 3.5), "3.5");
    assert_eq!(render("v", 1e6), "1e+06");
    assert_eq!(render("v", 123_456.0), "123456");
    assert_eq!(render("v", 1e-5), "1e-05");
    assert_eq!(render("v", 0.000_123_4), "0.0001234");
    assert_eq!(render("v", -0.0), "-0");
    assert_eq!(render("f", 1.0), "1.000000");
    assert_eq!(render(".2f", 3.14159), "3.14");
    assert_eq!(render("8.2f", -3.14159), "   -3.14");
    assert_eq!(render("08.2f", -3.14159), "-0003.14");
    assert_eq!(render("+.1f", 2.0), "+2.0");
    assert_eq!(render("#.0f", 2.0), "2.");
    assert_eq!(render("e", 1234.5678), "1.234568e+03");
    assert_eq!(render("E", 1234.5678), "1.234568E+03");
    assert_eq!(render(".1e", 0.0), "0.0e+00");
    assert_eq!(render(".3g", 1234.5678), "1.23e+03");
    assert_eq!(render(".5g", 1.5), "1.5");
    assert_eq!(render("g", 100_000.0), "100000");
    assert_eq!(render("G", 1e-7), "1E-07");
    assert_eq!(render("d", 1.5), "%!d(float64=1.5)");
}

#[test]
fn float_specials_are_never_zero_padded() {
    assert_eq!(render("v", f64::NAN), "NaN");
    assert_eq!(render("+v", f64::INFINITY), "+Inf");
    assert_eq!(render("f", f64::NEG_INFINITY), "-Inf");
    assert_eq!(render("05f", f64::INFINITY), " +Inf");
    assert_eq!(render("-6f", f64::NAN), "NaN   ");
    assert_eq!(render("+f", f64::NAN), "+NaN");
    assert_eq!(render(" f", f64::INFINITY), " Inf");
}

#[test]
fn strings() {
    assert_eq!(render("s", "abc"), "abc");
    assert_eq!(render("v", "abc"), "abc");
    assert_eq!(render("5s", "abc"), "  abc");
    assert_eq!(render("-5s", "abc"), "abc  ");
    assert_eq!(render("05s", "abc"), "00abc");
    assert_eq!(render(".2s", "日本語"), "日本");
    assert_eq!(render("5.1s", "日本語"), "    日");
    assert_eq!(render("#v", "a\"b"), r#""a\"b""#);
    assert_eq!(render("d", "hi"), "%!d(string=hi)");
}

#[test]
fn quoted_strings() {
    assert_eq!(render("q", "abc"), r#""abc""#);
    assert_eq!(render("q", "a\tb\u{7f}"), r#""a\tb\x7f""#);
    assert_eq!(render("q", "日本語"), r#""日本語""#);
    assert_eq!(render("+q", "日本語"), r#""\u65e5\u672c\u8a9e""#);
    assert_eq!(render("#q", "abc"), "`abc`");
    assert_eq!(render("#q", "a`b"), r#""a`b""#);
    assert_eq!(render("#+q", "日本語"), "`日本語`");
    assert_eq!(render("q", "\u{10ffff}"), r#""\U0010ffff""#);
    assert_eq!(render("#q", "\u{10ffff}"), "`\u{10ffff}`");
    assert_eq!(render("10q", "x"), r#"       "x""#);
    assert_eq!(render(".1q", "xyz"), r#""x""#);
}

#[test]
fn hex_strings() {
    assert_eq!(render("x", "xyz"), "78797a");
    assert_eq!(render("X", "xyz"), "78797A");
    assert_eq!(render("#x", "xyz"), "0x78797a");
    assert_eq!(render("# x", "xyz"), "0x78 0x79 0x7a");
    assert_eq!(render(" x", "xyz"), "78 79 7a");
    assert_eq!(render(".2x", "xyz"), "7879");
    assert_eq!(render("8x", "xyz"), "  78797a");
    assert_eq!(render("-8x", "xyz"), "78797a  ");
    assert_eq!(render("4x", ""), "    ");
}

#[test]
fn bytes() {
    let b: &[u8] = b"ab";
    assert_eq!(render("v", b), "[97 98]");
    assert_eq!(render("d", b), "[97 98]");
    assert_eq!(render("#v", b), "[]byte{0x61, 0x62}");
    assert_eq!(render("s", b), "ab");
    assert_eq!(render("x", b), "6162");
    assert_eq!(render("q", &[b'a', 0xff][..]), r#""a\xff""#);
    assert_eq!(render("s", &[b'a', 0xff][..]), "a\u{fffd}");
}

#[test]
fn booleans_and_nil() {
    assert_eq!(render("t", true), "true");
    assert_eq!(render("v", false), "false");
    assert_eq!(render("6t", true), "  true");
    assert_eq!(render("d", true), "%!d(bool=true)");
    assert_eq!(render("v", Value::Nil), "<nil>");
    assert_eq!(render("d", Value::Nil), "%!d(<nil>)");
}

#[test]
fn errors_render_their_message() {
    let err = Value::error(io::Error::other("boom"));
    assert_eq!(render("v", err.clone()), "boom");
    assert_eq!(render("s", err.clone()), "boom");
    assert_eq!(render("q", err.clone()), r#""boom""#);
    assert_eq!(render("d", err), "%!d(error=boom)");
}

#[test]
fn pointers() {
    assert_eq!(render("p", Value::Pointer(0x1234)), "0x1234");
    assert_eq!(render("#p", Value::Pointer(0x1234)), "1234");
    assert_eq!(render("p", Value::Pointer(0)), "0x0");
    assert_eq!(render("v", Value::Pointer(0)), "<nil>");
    assert_eq!(render("v", Value::Pointer(0xff)), "0xff");
    assert_eq!(render("d", Value::Pointer(10)), "10");
    assert_eq!(render("p", 3), "%!p(int=3)");
}

#[test]
fn lists_apply_the_verb_per_element() {
    let list = Value::List(vec![Value::Int(1), Value::Str("a".into())]);
    assert_eq!(render("v", list.clone()), "[1 a]");
    assert_eq!(render("3v", list.clone()), "[  1   a]");
    assert_eq!(render("d", list.clone()), "[1 %!d(string=a)]");
    assert_eq!(render("#v", list), r#"[]value{1, "a"}"#);
}

#[test]
fn type_verb() {
    assert_eq!(render("T", 1), "int");
    assert_eq!(render("T", "x"), "string");
    assert_eq!(render("T", Value::Nil), "<nil>");
    assert_eq!(render("8T", 1.5), " float64");
}

#[test]
fn describe_and_markers() {
    let mut out = String::new();
    StdRenderer.describe(&Value::Int(3), &mut out);
    assert_eq!(out, "int=3");

    out.clear();
    StdRenderer.describe(&Value::Nil, &mut out);
    assert_eq!(out, "<nil>");

    out.clear();
    StdRenderer.render_error(&FormatToken::new('d'), DirectiveError::MissingArg, &mut out);
    assert_eq!(out, "%!d(MISSING)");
}

#[test]
fn borrowed_renderer_forwards() {
    let r = &StdRenderer;
    let mut out = String::new();
    Render::<Value>::render(&r, &FormatToken::new('d'), &Value::Int(7), &mut out);
    assert_eq!(out, "7");
    assert_eq!(Render::<Value>::verbs(&r), fieldfmt_syntax::VerbSet::STANDARD);
}
