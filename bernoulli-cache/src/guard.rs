//! Overflow/domain guard.
//!
//! Resolves a rejected index to whatever the caller's [`ErrorPolicy`]
//! selects. Nothing here touches a cache: a substituted value is produced for
//! the current call only and is never memoized.

use bernoulli_core::{BernoulliResult, BernoulliValue, ErrorAction, NumericError};

/// Validate a signed index. Negative indices are domain errors.
pub fn check_index(function: &'static str, index: i64) -> Result<usize, NumericError> {
    if index < 0 {
        return Err(NumericError::Domain { function, index });
    }
    // Positive i64 always fits on 64-bit targets; elsewhere saturate.
    Ok(usize::try_from(index).unwrap_or(usize::MAX))
}

/// Sign of B₂ₙ: negative for even n ≥ 2.
pub fn bernoulli_is_negative(index: usize) -> bool {
    index > 0 && index % 2 == 0
}

/// Value (or error) for a negative index under `action`.
pub fn resolve_domain<T: BernoulliValue>(
    action: ErrorAction,
    function: &'static str,
    index: i64,
) -> BernoulliResult<T> {
    let err = NumericError::Domain { function, index };
    match action {
        ErrorAction::Raise => Err(err.into()),
        ErrorAction::Sentinel => {
            let value = T::nan().ok_or(err)?;
            tracing::warn!(function, index, repr = T::NAME, "domain error, returning NaN");
            Ok(value)
        }
        ErrorAction::Ignore => T::nan().ok_or_else(|| err.into()),
    }
}

/// Value (or error) for an index whose result does not fit `T`.
///
/// `negative` is the sign the true value would have had.
pub fn resolve_overflow<T: BernoulliValue>(
    action: ErrorAction,
    function: &'static str,
    index: usize,
    negative: bool,
) -> BernoulliResult<T> {
    let err = NumericError::Overflow {
        function,
        index,
        repr: T::NAME,
    };
    let magnitude = match action {
        ErrorAction::Raise => None,
        ErrorAction::Sentinel => T::infinity().or_else(T::max_finite),
        ErrorAction::Ignore => T::max_finite().or_else(T::infinity),
    };
    let Some(magnitude) = magnitude else {
        return Err(err.into());
    };
    if action == ErrorAction::Sentinel {
        tracing::warn!(function, index, repr = T::NAME, "overflow, returning sentinel");
    }
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_rational::BigRational;

    #[test]
    fn test_check_index() {
        assert_eq!(check_index("f", 0), Ok(0));
        assert_eq!(check_index("f", 42), Ok(42));
        assert_eq!(
            check_index("f", -1),
            Err(NumericError::Domain {
                function: "f",
                index: -1
            })
        );
    }

    #[test]
    fn test_bernoulli_sign() {
        assert!(!bernoulli_is_negative(0));
        assert!(!bernoulli_is_negative(1));
        assert!(bernoulli_is_negative(2));
        assert!(!bernoulli_is_negative(131));
        assert!(bernoulli_is_negative(130));
    }

    #[test]
    fn test_domain_resolution() {
        let err = resolve_domain::<f64>(ErrorAction::Raise, "f", -2).unwrap_err();
        assert!(err.is_domain());
        assert!(resolve_domain::<f64>(ErrorAction::Sentinel, "f", -2).unwrap().is_nan());
        assert!(resolve_domain::<f32>(ErrorAction::Ignore, "f", -2).unwrap().is_nan());
    }

    #[test]
    fn test_domain_without_nan_raises() {
        let err = resolve_domain::<BigRational>(ErrorAction::Ignore, "f", -1).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_overflow_resolution_floats() {
        assert!(resolve_overflow::<f64>(ErrorAction::Raise, "f", 130, true)
            .unwrap_err()
            .is_overflow());
        assert_eq!(
            resolve_overflow::<f64>(ErrorAction::Sentinel, "f", 130, true).unwrap(),
            f64::NEG_INFINITY
        );
        assert_eq!(
            resolve_overflow::<f64>(ErrorAction::Sentinel, "f", 131, false).unwrap(),
            f64::INFINITY
        );
        assert_eq!(
            resolve_overflow::<f32>(ErrorAction::Ignore, "f", 33, false).unwrap(),
            f32::MAX
        );
        assert_eq!(
            resolve_overflow::<f32>(ErrorAction::Ignore, "f", 34, true).unwrap(),
            -f32::MAX
        );
    }

    #[test]
    fn test_overflow_without_bounds_raises() {
        let err = resolve_overflow::<BigRational>(ErrorAction::Ignore, "f", 10, false).unwrap_err();
        assert!(err.is_overflow());
    }
}
