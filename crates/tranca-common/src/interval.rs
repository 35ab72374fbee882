//! Interval expression parsing
//!
//! Converts compact duration expressions ("500ms", "15s", "1m", "250")
//! into millisecond counts. Pure and stateless.

use std::time::Duration;

use crate::error::{LockError, Result};

/// Parse a compact duration expression into milliseconds.
///
/// Accepted forms: a bare non-negative integer (milliseconds) or an integer
/// with an `ms`, `s`, `m`, or `h` suffix. Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use tranca_common::to_millis;
///
/// assert_eq!(to_millis("500ms").unwrap(), 500);
/// assert_eq!(to_millis("15s").unwrap(), 15_000);
/// assert_eq!(to_millis("250").unwrap(), 250);
/// assert!(to_millis("5d").is_err());
/// ```
pub fn to_millis(expression: &str) -> Result<u64> {
    let expr = expression.trim();
    if expr.is_empty() {
        return Err(LockError::InvalidInterval(expression.to_string()));
    }

    let (number, multiplier) = if let Some(stripped) = expr.strip_suffix("ms") {
        (stripped, 1u64)
    } else if let Some(stripped) = expr.strip_suffix('s') {
        (stripped, 1_000)
    } else if let Some(stripped) = expr.strip_suffix('m') {
        (stripped, 60_000)
    } else if let Some(stripped) = expr.strip_suffix('h') {
        (stripped, 3_600_000)
    } else {
        (expr, 1)
    };

    number
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| LockError::InvalidInterval(expression.to_string()))
}

/// Parse a compact duration expression into a [`Duration`].
pub fn to_duration(expression: &str) -> Result<Duration> {
    to_millis(expression).map(Duration::from_millis)
}
