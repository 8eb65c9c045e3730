use crate::error::RuntimeError;

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_INT` in absolute
/// value.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Returns
/// - `Ok(f64)`: The converted value if it is safe.
/// - `Err(error)`: If the value is too large.
///
/// ## Example
/// ```
/// use aspid::util::num::{MAX_SAFE_INT, i64_to_f64_checked};
///
/// // Works for safe values
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// // Fails for values outside safe range
/// let big = MAX_SAFE_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Safely converts an `f64` to `i64` if the value is finite, within range,
/// and not fractional.
///
/// ## Errors
/// Returns an error for non-finite, out-of-range, or fractional values.
///
/// # Parameters
/// - `value`: The floating-point value to convert.
/// - `line`: Source code line number for error reporting.
///
/// # Returns
/// - `Ok(i64)`: The converted value if safe.
/// - `Err(RuntimeError::TypeError | LiteralTooLarge | RealIsFractional)`: If
///   conversion is invalid.
///
/// # Example
/// ```
/// use aspid::{error::RuntimeError, util::num::f64_to_i64_checked};
///
/// // Safe conversion
/// let x = 1000.0;
/// let int = f64_to_i64_checked(x, 1).unwrap();
/// assert_eq!(int, 1000);
///
/// // Fractional value
/// let err = f64_to_i64_checked(1.5, 123).unwrap_err();
/// assert!(matches!(err, RuntimeError::RealIsFractional { line: 123 }));
///
/// // Out of range
/// let big = 1e20;
/// let err = f64_to_i64_checked(big, 5).unwrap_err();
/// assert!(matches!(err, RuntimeError::LiteralTooLarge { line: 5 }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64, line: usize) -> Result<i64, RuntimeError> {
    if !value.is_finite() {
        return Err(RuntimeError::TypeError { details: format!("Cannot convert non-finite value {value} to an integer"),
                                             line });
    }
    // Check range (inclusive, using truncation)
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(RuntimeError::LiteralTooLarge { line });
    }
    // Check for integral value
    if value.fract() != 0.0 {
        return Err(RuntimeError::RealIsFractional { line });
    }
    Ok(value as i64)
}

/// Truncates an `f64` towards zero and converts it to `i64`.
///
/// Unlike [`f64_to_i64_checked`], fractional values are accepted; only
/// non-finite and out-of-range values are rejected. Used by the explicit
/// `int(x)` conversion when the operand is a double at runtime.
///
/// ## Errors
/// Returns an error for non-finite or out-of-range values.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_truncate_to_i64(value: f64, line: usize) -> Result<i64, RuntimeError> {
    if !value.is_finite() {
        return Err(RuntimeError::TypeError { details: format!("Cannot convert non-finite value {value} to an integer"),
                                             line });
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(RuntimeError::LiteralTooLarge { line });
    }
    Ok(value.trunc() as i64)
}

/// Safely converts an `i64` to a `usize` if and only if it can be
/// represented exactly.
///
/// ## Errors
/// Returns an error if the value is negative or exceeds the maximum
/// representable `usize`.
///
/// ## Example
/// ```
/// use aspid::util::num::i64_to_usize_checked;
///
/// let v = i64_to_usize_checked(42, 0).unwrap();
/// assert_eq!(v, 42);
///
/// assert!(i64_to_usize_checked(-1, 5).is_err());
/// ```
pub fn i64_to_usize_checked(value: i64, line: usize) -> Result<usize, RuntimeError> {
    usize::try_from(value).map_or(Err(RuntimeError::LiteralTooLarge { line }), Ok)
}
