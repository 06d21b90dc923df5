//! Number recognition shared by cell coercion and filter value parsing.
//!
//! Two rules are in play. Cells are numeric only when the *whole* trimmed field is a finite
//! number ([`whole_number`]); filter values take the longest numeric *prefix*
//! ([`number_prefix`]), so `"25abc"` filters as `25`.

/// Parses `s` as a number if the entire string is a numeric literal with a finite value.
///
/// Accepts decimal and exponent forms (`42`, `-1.5`, `.5`, `5.`, `1e3`, `+7`) and unsigned
/// `0x`/`0o`/`0b` integer literals. Rejects the empty string, `Infinity`, `NaN` and anything
/// with trailing garbage (`123ABC`, `555-1234`).
pub(crate) fn whole_number(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    if let Some(v) = radix_literal(s) {
        return Some(v).filter(|v| v.is_finite());
    }
    // `str::parse::<f64>` also accepts words like "inf" and "nan"; only literal syntax counts here.
    let literal_bytes = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !literal_bytes {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    s[2..].chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Parses the longest numeric prefix of `s` (after leading whitespace).
///
/// Returns `None` when no digits lead the string. A leading `Infinity` (optionally signed)
/// yields an infinite value.
pub(crate) fn number_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    if s[i..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < len && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - (i + 1);
        if digits > 0 {
            i = j;
        }
    }
    if digits == 0 {
        return None;
    }

    if i < len && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < len && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    s[..i].parse::<f64>().ok()
}
