//! Unit-suffixed latency values as written by the fsync write benchmark.
//!
//! The benchmark prints `Duration` values with their debug formatting, so the
//! average column looks like `1.234567ms` and the deviation column like
//! `345.678µs`. Both are normalized to milliseconds here.

/// Suffixes accepted for microsecond values. `µ` (U+00B5) is what `Duration`
/// prints; `μ` (U+03BC) shows up when files are edited by hand.
const MICROS_SUFFIXES: &[&str] = &["µs", "μs", "us"];

const MILLIS_SUFFIX: &str = "ms";

/// Parse a `"<N>ms"` value into milliseconds.
///
/// # Examples
/// ```
/// use latency_bars::core::units::parse_millis;
///
/// assert_eq!(parse_millis("12.5ms").unwrap(), 12.5);
/// assert!(parse_millis("12.5").is_err());
/// ```
pub fn parse_millis(input: &str) -> Result<f64, String> {
    let input = input.trim();
    let number = input
        .strip_suffix(MILLIS_SUFFIX)
        .ok_or_else(|| format!("expected a `{MILLIS_SUFFIX}` suffix"))?;
    parse_number(number)
}

/// Parse a `"<N>µs"` value into milliseconds (`N / 1000`).
///
/// # Examples
/// ```
/// use latency_bars::core::units::parse_micros_as_millis;
///
/// assert_eq!(parse_micros_as_millis("450µs").unwrap(), 0.45);
/// ```
pub fn parse_micros_as_millis(input: &str) -> Result<f64, String> {
    let input = input.trim();
    let number = MICROS_SUFFIXES
        .iter()
        .find_map(|suffix| input.strip_suffix(suffix))
        .ok_or_else(|| "expected a `µs` suffix".to_string())?;
    Ok(parse_number(number)? / 1000.0)
}

/// Parse a plain number that is already in milliseconds.
///
/// # Examples
/// ```
/// use latency_bars::core::units::parse_plain_millis;
///
/// assert_eq!(parse_plain_millis("0.0004").unwrap(), 0.0004);
/// assert!(parse_plain_millis("1ms").is_err());
/// ```
pub fn parse_plain_millis(input: &str) -> Result<f64, String> {
    parse_number(input)
}

fn parse_number(number: &str) -> Result<f64, String> {
    let number = number.trim();
    let value: f64 = number
        .parse()
        .map_err(|_| format!("invalid number: `{number}`"))?;
    if !value.is_finite() {
        return Err(format!("non-finite number: `{number}`"));
    }
    Ok(value)
}
