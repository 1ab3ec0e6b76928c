//! Common parameter checks.

use crate::error::{ComponentError, ComponentResult};

/// Finite and strictly positive.
pub fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Finite and not negative.
pub fn is_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

pub fn check_positive(v: f64, what: &str) -> ComponentResult<()> {
    if is_positive(v) {
        Ok(())
    } else {
        Err(ComponentError::invalid_param(format!("{what} must be positive, got {v}")))
    }
}

pub fn check_fraction(v: f64, what: &str) -> ComponentResult<()> {
    if is_positive(v) && v <= 1.0 {
        Ok(())
    } else {
        Err(ComponentError::invalid_param(format!("{what} must be in (0, 1], got {v}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positivity_rejects_nan_and_zero() {
        assert!(is_positive(1.0));
        assert!(!is_positive(0.0));
        assert!(!is_positive(f64::NAN));
        assert!(is_non_negative(0.0));
        assert!(!is_non_negative(f64::INFINITY));
    }

    #[test]
    fn fraction_bounds() {
        assert!(check_fraction(1.0, "eta").is_ok());
        assert!(check_fraction(0.0, "eta").is_err());
        let err = check_fraction(1.5, "eta").unwrap_err();
        assert!(err.to_string().contains("eta"));
    }
}
