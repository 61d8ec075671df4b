//! Best-effort scalar parsing for stored values
//!
//! Every parser reads as much of a number as it can from the front of the
//! input and returns the parsed value together with the number of bytes it
//! consumed. Zero consumed bytes means nothing numeric was found; callers use
//! that as the signal to fall back to a default. Trailing text after a valid
//! prefix is ignored, so `"42px"` reads as `42`.

/// Whitespace accepted before a number (the C `isspace` set)
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn skip_space(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_space(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Returns `(negative, position after the sign)`
fn read_sign(bytes: &[u8], pos: usize) -> (bool, usize) {
    match bytes.get(pos) {
        Some(b'-') => (true, pos + 1),
        Some(b'+') => (false, pos + 1),
        _ => (false, pos),
    }
}

fn digit_value(b: u8) -> Option<u32> {
    (b as char).to_digit(16)
}

fn starts_hex_prefix(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos) == Some(&b'0') && matches!(bytes.get(pos + 1), Some(b'x' | b'X'))
}

/// Raw result of scanning an integer literal
struct IntegerScan {
    negative: bool,
    magnitude: u64,
    overflow: bool,
    consumed: usize,
}

/// Scans an integer with automatic base detection: `0x`/`0X` selects hex,
/// a leading `0` selects octal and anything else is decimal.
fn scan_integer(input: &str) -> IntegerScan {
    let bytes = input.as_bytes();
    let pos = skip_space(bytes, 0);
    let (negative, mut pos) = read_sign(bytes, pos);

    let radix = if starts_hex_prefix(bytes, pos)
        && bytes.get(pos + 2).and_then(|&b| digit_value(b)).is_some()
    {
        pos += 2;
        16
    } else if bytes.get(pos) == Some(&b'0') {
        8
    } else {
        10
    };

    let digits_start = pos;
    let mut magnitude: u64 = 0;
    let mut overflow = false;

    while let Some(digit) = bytes
        .get(pos)
        .and_then(|&b| digit_value(b))
        .filter(|&d| d < radix)
    {
        match magnitude
            .checked_mul(u64::from(radix))
            .and_then(|m| m.checked_add(u64::from(digit)))
        {
            Some(next) => magnitude = next,
            None => overflow = true,
        }
        pos += 1;
    }

    let consumed = if pos == digits_start { 0 } else { pos };
    IntegerScan {
        negative,
        magnitude,
        overflow,
        consumed,
    }
}

/// Parses a signed integer prefix the way `strtol` with base 0 does.
///
/// Out-of-range values saturate to `i64::MIN` / `i64::MAX`.
pub fn parse_integer(input: &str) -> (i64, usize) {
    let scan = scan_integer(input);
    if scan.consumed == 0 {
        return (0, 0);
    }

    let value = if scan.negative {
        if scan.overflow || scan.magnitude > i64::MIN.unsigned_abs() {
            i64::MIN
        } else {
            0i64.wrapping_sub_unsigned(scan.magnitude)
        }
    } else {
        i64::try_from(scan.magnitude)
            .ok()
            .filter(|_| !scan.overflow)
            .unwrap_or(i64::MAX)
    };

    (value, scan.consumed)
}

/// Parses an unsigned integer prefix the way `strtoul` with base 0 does.
///
/// A leading `-` negates the result modulo 2^64; overflow saturates to
/// `u64::MAX`.
pub fn parse_unsigned(input: &str) -> (u64, usize) {
    let scan = scan_integer(input);
    if scan.consumed == 0 {
        return (0, 0);
    }

    let value = if scan.overflow {
        u64::MAX
    } else if scan.negative {
        scan.magnitude.wrapping_neg()
    } else {
        scan.magnitude
    };

    (value, scan.consumed)
}

fn matches_ignore_case(bytes: &[u8], pos: usize, word: &str) -> bool {
    bytes
        .get(pos..pos + word.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(word.as_bytes()))
}

/// Parses a floating point prefix the way `strtod` does.
///
/// Accepts decimal literals with optional fraction and exponent, hex floats
/// (`0x1.8p3`), `inf`/`infinity` and `nan`/`nan(...)`.
pub fn parse_real(input: &str) -> (f64, usize) {
    let bytes = input.as_bytes();
    let start = skip_space(bytes, 0);
    let (negative, pos) = read_sign(bytes, start);
    let sign = if negative { -1.0 } else { 1.0 };

    if matches_ignore_case(bytes, pos, "infinity") {
        return (sign * f64::INFINITY, pos + 8);
    }
    if matches_ignore_case(bytes, pos, "inf") {
        return (sign * f64::INFINITY, pos + 3);
    }
    if matches_ignore_case(bytes, pos, "nan") {
        return (f64::NAN, pos + 3 + nan_payload_len(&bytes[pos + 3..]));
    }

    if starts_hex_prefix(bytes, pos)
        && let Some((value, end)) = scan_hex_float(bytes, pos + 2)
    {
        return (sign * value, end);
    }

    let Some(end) = scan_decimal_float(bytes, pos) else {
        return (0.0, 0);
    };

    match input[start..end].parse::<f64>() {
        Ok(value) => (value, end),
        Err(_) => (0.0, 0),
    }
}

/// Length of an optional `(n-char-sequence)` after `nan`
fn nan_payload_len(bytes: &[u8]) -> usize {
    if bytes.first() != Some(&b'(') {
        return 0;
    }
    let body = bytes[1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    if bytes.get(1 + body) == Some(&b')') {
        body + 2
    } else {
        0
    }
}

fn count_digits(bytes: &[u8], pos: usize, radix: u32) -> usize {
    bytes[pos.min(bytes.len())..]
        .iter()
        .take_while(|&&b| digit_value(b).is_some_and(|d| d < radix))
        .count()
}

/// Returns the end of a decimal float literal starting at `pos`
fn scan_decimal_float(bytes: &[u8], mut pos: usize) -> Option<usize> {
    let int_digits = count_digits(bytes, pos, 10);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(bytes, pos + 1, 10);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let (_, exp_start) = read_sign(bytes, pos + 1);
        let exp_digits = count_digits(bytes, exp_start, 10);
        if exp_digits > 0 {
            pos = exp_start + exp_digits;
        }
    }

    Some(pos)
}

/// Mantissa size past which further hex digits no longer change the result
const HEX_MANTISSA_LIMIT: f64 = (1u64 << 60) as f64;

/// Scans hex float digits after a `0x` prefix
fn scan_hex_float(bytes: &[u8], mut pos: usize) -> Option<(f64, usize)> {
    let mut mantissa = 0.0f64;
    let mut scale: i64 = 0;

    let int_digits = count_digits(bytes, pos, 16);
    for &b in &bytes[pos..pos + int_digits] {
        if mantissa < HEX_MANTISSA_LIMIT {
            mantissa = mantissa * 16.0 + f64::from(digit_value(b)?);
        } else {
            scale += 4;
        }
    }
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(bytes, pos + 1, 16);
        if int_digits > 0 || frac_digits > 0 {
            for &b in &bytes[pos + 1..pos + 1 + frac_digits] {
                if mantissa < HEX_MANTISSA_LIMIT {
                    mantissa = mantissa * 16.0 + f64::from(digit_value(b)?);
                    scale -= 4;
                }
            }
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'p' | b'P')) {
        let (exp_negative, exp_start) = read_sign(bytes, pos + 1);
        let exp_digits = count_digits(bytes, exp_start, 10);
        if exp_digits > 0 {
            let exponent = bytes[exp_start..exp_start + exp_digits]
                .iter()
                .fold(0i64, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
                });
            scale += if exp_negative { -exponent } else { exponent };
            pos = exp_start + exp_digits;
        }
    }

    let scale = i32::try_from(scale.clamp(i64::from(i32::MIN), i64::from(i32::MAX)))
        .unwrap_or_default();
    // Split the power so neither factor underflows or overflows on its own
    let half = scale / 2;
    Some((mantissa * 2f64.powi(half) * 2f64.powi(scale - half), pos))
}

/// Matches a whole value against the accepted boolean spellings,
/// ignoring ASCII case.
pub fn parse_boolean(input: &str) -> Option<bool> {
    match input.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
