//! Error types for grid conversion.
//!
//! Two things can go wrong in a conversion: the input is not a usable number in its domain,
//! or an iterative solver runs out of steps. [`GridError`] covers both.
//!
//! | Variant | Raised by | Per-item? |
//! |---------|-----------|-----------|
//! | [`Validation`](GridError::Validation) | Boundary checks on coordinates, offsets, config | Yes |
//! | [`Convergence`](GridError::Convergence) | Inverse latitude solver, Vincenty distance | Yes |
//!
//! Both kinds describe one failed conversion. Callers working through many rows should
//! record the failure against that row and carry on with the rest.
//!
//! ```
//! use geogrid_core::{GridError, ValidationKind};
//!
//! fn positive(value: f64) -> Result<f64, GridError> {
//!     if value <= 0.0 {
//!         return Err(GridError::validation(
//!             "meters_per_unit",
//!             ValidationKind::OutOfRange,
//!             "must be greater than zero",
//!         ));
//!     }
//!     Ok(value)
//! }
//! assert!(positive(-1.0).is_err());
//! ```

use thiserror::Error;

/// Why an input value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// NaN or infinite.
    NotFinite,
    /// Finite but outside the valid domain (e.g. latitude > 90°).
    OutOfRange,
    /// Text that does not parse as a number.
    Unparseable,
    /// Field absent or empty.
    Missing,
}

#[derive(Debug, Error)]
pub enum GridError {
    /// Malformed or out-of-domain input. Never worth retrying.
    #[error("Invalid {field} ({kind:?}): {message}")]
    Validation {
        field: String,
        kind: ValidationKind,
        message: String,
    },

    /// Iteration bound reached before the residual fell below tolerance.
    #[error("{operation} did not converge after {iterations} iterations (last step {residual:e})")]
    Convergence {
        operation: String,
        iterations: usize,
        residual: f64,
    },
}

pub type GridResult<T> = Result<T, GridError>;

impl GridError {
    pub fn validation(field: &str, kind: ValidationKind, reason: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            kind,
            message: reason.to_string(),
        }
    }

    pub fn convergence(operation: &str, iterations: usize, residual: f64) -> Self {
        Self::Convergence {
            operation: operation.to_string(),
            iterations,
            residual,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_convergence(&self) -> bool {
        matches!(self, Self::Convergence { .. })
    }

    /// Returns `true` if the failure is confined to the single item being converted.
    ///
    /// Every current variant is. Batch callers use this to decide between skipping a row
    /// and aborting the run.
    pub fn is_per_item(&self) -> bool {
        match self {
            Self::Validation { .. } => true,
            Self::Convergence { .. } => true,
        }
    }
}

/// Checks that `value` is finite and within `[-limit, limit]`.
pub(crate) fn check_symmetric_range(field: &str, value: f64, limit: f64) -> GridResult<f64> {
    if !value.is_finite() {
        return Err(GridError::validation(
            field,
            ValidationKind::NotFinite,
            &format!("{} must be finite, got {}", field, value),
        ));
    }
    if value.abs() > limit {
        return Err(GridError::validation(
            field,
            ValidationKind::OutOfRange,
            &format!("{} outside valid range [-{}, {}], got {}", field, limit, limit, value),
        ));
    }
    Ok(value)
}

pub(crate) fn check_finite(field: &str, value: f64) -> GridResult<f64> {
    if !value.is_finite() {
        return Err(GridError::validation(
            field,
            ValidationKind::NotFinite,
            &format!("{} must be finite, got {}", field, value),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = GridError::validation("latitude", ValidationKind::OutOfRange, "got 91");
        assert_eq!(err.to_string(), "Invalid latitude (OutOfRange): got 91");
        assert!(err.is_validation());
        assert!(!err.is_convergence());
    }

    #[test]
    fn test_convergence_error_message() {
        let err = GridError::convergence("inverse_meridional_latitude", 10, 3.5e-9);
        let msg = err.to_string();
        assert!(msg.contains("inverse_meridional_latitude"));
        assert!(msg.contains("10 iterations"));
        assert!(err.is_convergence());
    }

    #[test]
    fn test_every_variant_is_per_item() {
        assert!(GridError::validation("x", ValidationKind::Missing, "empty").is_per_item());
        assert!(GridError::convergence("solver", 1, 1.0).is_per_item());
    }

    #[test]
    fn test_check_symmetric_range() {
        assert_eq!(check_symmetric_range("latitude", 90.0, 90.0).unwrap(), 90.0);
        assert_eq!(check_symmetric_range("latitude", -90.0, 90.0).unwrap(), -90.0);

        match check_symmetric_range("latitude", 90.000001, 90.0) {
            Err(GridError::Validation { kind, .. }) => assert_eq!(kind, ValidationKind::OutOfRange),
            other => panic!("expected out-of-range, got {:?}", other),
        }
        match check_symmetric_range("latitude", f64::NAN, 90.0) {
            Err(GridError::Validation { kind, .. }) => assert_eq!(kind, ValidationKind::NotFinite),
            other => panic!("expected not-finite, got {:?}", other),
        }
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<GridError>();
        _assert_sync::<GridError>();
    }
}
