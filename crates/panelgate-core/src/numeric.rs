//! Lenient integer casts.
//!
//! Panel settings and paging parameters arrive as free-form strings. They are
//! read the way the panel always has: optional surrounding whitespace, an
//! optional sign, then as many digits as are present. Anything else reads as 0.
//! Digit runs beyond the `i64` range saturate.

/// Parses the leading integer of `value`, returning 0 when there is none.
///
/// ```
/// use panelgate_core::leading_int;
///
/// assert_eq!(leading_int("15"), 15);
/// assert_eq!(leading_int(" 20abc"), 20);
/// assert_eq!(leading_int("-3"), -3);
/// assert_eq!(leading_int("abc"), 0);
/// ```
pub fn leading_int(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .fold(0i64, |acc, digit| {
            let acc = acc.saturating_mul(10);
            if negative {
                acc.saturating_sub(digit)
            } else {
                acc.saturating_add(digit)
            }
        })
}

/// True when the leading integer of `value` is non-zero.
pub fn truthy(value: Option<&str>) -> bool {
    value.map(leading_int).unwrap_or(0) != 0
}
