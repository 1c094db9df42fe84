//! Permissive numeric coercion for user-entered text.
//!
//! Input arrives from a live-editing form, so partially typed or garbage
//! values are expected. Nothing here ever fails: anything that does not
//! yield a finite number becomes `0.0`.

/// Values that can be coerced to a finite `f64`.
pub trait Numeric {
    /// Returns the value as a finite number, or `0.0`.
    fn to_numeric(&self) -> f64;
}

impl Numeric for str {
    fn to_numeric(&self) -> f64 {
        coerce(self)
    }
}

impl Numeric for String {
    fn to_numeric(&self) -> f64 {
        coerce(self)
    }
}

impl Numeric for f64 {
    fn to_numeric(&self) -> f64 {
        if self.is_finite() { *self } else { 0.0 }
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    fn to_numeric(&self) -> f64 {
        (**self).to_numeric()
    }
}

impl<T: Numeric> Numeric for Option<T> {
    fn to_numeric(&self) -> f64 {
        self.as_ref().map_or(0.0, Numeric::to_numeric)
    }
}

/// Coerces text to a finite number.
///
/// Leading whitespace is skipped and the longest prefix that reads as a
/// decimal float literal is parsed, so `"12abc"` is `12.0`. Empty input,
/// input with no numeric prefix, and values that overflow to infinity all
/// coerce to `0.0`.
///
/// ```
/// use ifta_core::calculations::coerce;
///
/// assert_eq!(coerce("42.5"), 42.5);
/// assert_eq!(coerce("12abc"), 12.0);
/// assert_eq!(coerce(""), 0.0);
/// assert_eq!(coerce("abc"), 0.0);
/// assert_eq!(coerce("1e999"), 0.0);
/// ```
pub fn coerce(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let len = float_prefix_len(trimmed.as_bytes());
    if len == 0 {
        return 0.0;
    }

    match trimmed[..len].parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Length of the longest prefix of `bytes` matching
/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
/// Returns 0 when there is no mantissa digit.
fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;

    if bytes.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
