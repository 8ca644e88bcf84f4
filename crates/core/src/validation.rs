//! Numeric value guards.
//!
//! Shared by the importer (record validation) and the scorer (vitals guard). Every guard rejects
//! `NaN` and infinities explicitly so that a threshold comparison never runs on a value that would
//! silently compare as `false`.

/// Why a numeric value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("must be a finite number")]
    NotFinite,
    #[error("must be positive, got {0}")]
    NotPositive(f64),
    #[error("must not be negative, got {0}")]
    Negative(f64),
}

/// Accepts any finite number.
pub fn validate_finite(value: f64) -> Result<f64, ValueError> {
    if !value.is_finite() {
        return Err(ValueError::NotFinite);
    }
    Ok(value)
}

/// Accepts finite numbers strictly greater than zero.
pub fn validate_positive(value: f64) -> Result<f64, ValueError> {
    let value = validate_finite(value)?;
    if value <= 0.0 {
        return Err(ValueError::NotPositive(value));
    }
    Ok(value)
}

/// Accepts finite numbers greater than or equal to zero.
pub fn validate_non_negative(value: f64) -> Result<f64, ValueError> {
    let value = validate_finite(value)?;
    if value < 0.0 {
        return Err(ValueError::Negative(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_finite_rejects_nan_and_infinity() {
        assert_eq!(validate_finite(f64::NAN), Err(ValueError::NotFinite));
        assert_eq!(validate_finite(f64::INFINITY), Err(ValueError::NotFinite));
        assert_eq!(validate_finite(-3.5), Ok(-3.5));
    }

    #[test]
    fn test_validate_positive_rejects_zero_and_negative() {
        assert_eq!(validate_positive(0.0), Err(ValueError::NotPositive(0.0)));
        assert_eq!(validate_positive(-1.0), Err(ValueError::NotPositive(-1.0)));
        assert_eq!(validate_positive(f64::NAN), Err(ValueError::NotFinite));
        assert_eq!(validate_positive(16.0), Ok(16.0));
    }

    #[test]
    fn test_validate_non_negative_accepts_zero() {
        assert_eq!(validate_non_negative(0.0), Ok(0.0));
        assert_eq!(validate_non_negative(-0.1), Err(ValueError::Negative(-0.1)));
        assert_eq!(
            validate_non_negative(f64::NEG_INFINITY),
            Err(ValueError::NotFinite)
        );
    }
}
