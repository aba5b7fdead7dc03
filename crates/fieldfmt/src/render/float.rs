//! Floating-point rendering.
//!
//! `%e`/`%f` default to six decimals. `%g` and `%v` default to the
//! shortest representation that round-trips, switching to exponent form
//! when the exponent is below -4 or at least the precision (6 when
//! shortest). Exponents always have a sign and at least two digits.

use fieldfmt_syntax::{Flags, FormatToken};

use super::pad::{write_fill, write_padded_with};

/// Render `v` for `tok.verb`. Returns `false` if the verb does not apply
/// to floats.
pub(super) fn fmt_float(out: &mut String, tok: &FormatToken<'_>, v: f64) -> bool {
    let body = match tok.verb {
        'v' => general(v.abs(), None, 'e', false),
        'g' | 'G' => {
            let exp = if tok.verb == 'G' { 'E' } else { 'e' };
            general(v.abs(), tok.precision(), exp, tok.has(Flags::SHARP))
        }
        'e' | 'E' => {
            let s = format!("{:.*e}", tok.precision().unwrap_or(6), v.abs());
            let s = normalize_exponent(&s, tok.verb);
            if tok.has(Flags::SHARP) { force_point(s) } else { s }
        }
        'f' | 'F' => {
            let s = format!("{:.*}", tok.precision().unwrap_or(6), v.abs());
            if tok.has(Flags::SHARP) { force_point(s) } else { s }
        }
        _ => return false,
    };

    if v.is_nan() || v.is_infinite() {
        fmt_special(out, tok, v);
        return true;
    }

    let sign = if v.is_sign_negative() {
        Some('-')
    } else if tok.has(Flags::PLUS) {
        Some('+')
    } else if tok.has(Flags::SPACE) {
        Some(' ')
    } else {
        None
    };

    let len = body.len() + usize::from(sign.is_some());
    match tok.width() {
        // Zeros go between the sign and the digits.
        Some(width) if tok.has(Flags::ZERO) && width > len => {
            if let Some(s) = sign {
                out.push(s);
            }
            write_fill(out, '0', width - len);
            out.push_str(&body);
        }
        _ => {
            let mut signed = String::with_capacity(len);
            if let Some(s) = sign {
                signed.push(s);
            }
            signed.push_str(&body);
            write_padded_with(out, tok, &signed, ' ');
        }
    }
    true
}

/// `NaN`, `+Inf`, `-Inf`. Never zero padded.
fn fmt_special(out: &mut String, tok: &FormatToken<'_>, v: f64) {
    let plus = tok.has(Flags::PLUS);
    let space = tok.has(Flags::SPACE);
    let s = if v.is_nan() {
        if plus {
            "+NaN"
        } else if space {
            " NaN"
        } else {
            "NaN"
        }
    } else if v < 0.0 {
        "-Inf"
    } else if space && !plus {
        " Inf"
    } else {
        "+Inf"
    };
    write_padded_with(out, tok, s, ' ');
}

/// Decimal digits of a non-negative finite `v` and the position of the
/// decimal point relative to them: `v = 0.DIGITS * 10^point`.
///
/// With `sig`, the digits are rounded to that many significant digits.
/// Trailing zeros are dropped unless `keep_zeros`.
fn decimal_digits(v: f64, sig: Option<usize>, keep_zeros: bool) -> (Vec<u8>, i32) {
    let s = match sig {
        Some(n) => format!("{:.*e}", n.saturating_sub(1), v),
        None => format!("{v:e}"),
    };
    let (mantissa, exp) = s.split_once('e').unwrap_or((s.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let mut digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    if !keep_zeros {
        while digits.len() > 1 && digits.last() == Some(&b'0') {
            digits.pop();
        }
    }
    (digits, exp + 1)
}

/// `%g`: shortest or `prec` significant digits, in `%e` or `%f` form.
fn general(v: f64, prec: Option<usize>, exp_char: char, sharp: bool) -> String {
    if !v.is_finite() {
        return String::new();
    }
    let shortest = prec.is_none();
    let sig = prec.map(|p| p.max(1));
    let (digits, point) = decimal_digits(v, sig, sharp && !shortest);
    let nd = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    let mut prec = sig.map_or(nd, |p| i32::try_from(p).unwrap_or(i32::MAX));

    let mut eprec = prec;
    if eprec > nd && nd >= point {
        eprec = nd;
    }
    if shortest {
        eprec = 6;
    }
    let exp = point - 1;
    if exp < -4 || exp >= eprec {
        if prec > nd {
            prec = nd;
        }
        let s = exponent_form(&digits, point, usize::try_from(prec - 1).unwrap_or(0), exp_char);
        return if sharp { force_point(s) } else { s };
    }
    if prec > point {
        prec = nd;
    }
    let s = fixed_form(&digits, point, usize::try_from(prec - point).unwrap_or(0));
    if sharp { force_point(s) } else { s }
}

fn exponent_form(digits: &[u8], point: i32, decimals: usize, exp_char: char) -> String {
    let mut s = String::with_capacity(decimals + 8);
    s.push(char::from(digits.first().copied().unwrap_or(b'0')));
    if decimals > 0 {
        s.push('.');
        for i in 1..=decimals {
            s.push(char::from(digits.get(i).copied().unwrap_or(b'0')));
        }
    }
    let exp = if digits.first() == Some(&b'0') { 0 } else { point - 1 };
    push_exponent(&mut s, exp_char, exp);
    s
}

fn fixed_form(digits: &[u8], point: i32, decimals: usize) -> String {
    let mut s = String::with_capacity(decimals + 24);
    match usize::try_from(point) {
        Ok(int_len) if int_len > 0 => {
            for i in 0..int_len {
                s.push(char::from(digits.get(i).copied().unwrap_or(b'0')));
            }
        }
        _ => s.push('0'),
    }
    if decimals > 0 {
        s.push('.');
        for i in 0..decimals {
            let idx = i64::from(point) + i64::try_from(i).unwrap_or(i64::MAX);
            let d = usize::try_from(idx)
                .ok()
                .and_then(|idx| digits.get(idx).copied())
                .unwrap_or(b'0');
            s.push(char::from(d));
        }
    }
    s
}

fn push_exponent(s: &mut String, exp_char: char, exp: i32) {
    s.push(exp_char);
    s.push(if exp < 0 { '-' } else { '+' });
    let abs = exp.unsigned_abs();
    if abs < 10 {
        s.push('0');
    }
    s.push_str(&abs.to_string());
}

/// Rewrite Rust's `1.5e3` exponent into `1.5e+03`, uppercased for `%E`.
fn normalize_exponent(s: &str, verb: char) -> String {
    let (mantissa, exp) = s.split_once('e').unwrap_or((s, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let mut out = String::with_capacity(s.len() + 2);
    out.push_str(mantissa);
    push_exponent(&mut out, if verb == 'E' { 'E' } else { 'e' }, exp);
    out
}

/// Make sure the number has a decimal point (`%#.0f` of 1 is `1.`).
fn force_point(s: String) -> String {
    if s.contains('.') {
        return s;
    }
    match s.find(['e', 'E']) {
        Some(at) => {
            let mut out = s;
            out.insert(at, '.');
            out
        }
        None => s + ".",
    }
}
