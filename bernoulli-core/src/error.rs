//! Error types for Bernoulli/tangent number operations

use thiserror::Error;

/// Numeric errors raised per requested index.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NumericError {
    #[error("Domain error in {function}: index should be >= 0 but got {index}")]
    Domain { function: &'static str, index: i64 },

    #[error("Overflow error in {function}: value at index {index} does not fit in {repr}")]
    Overflow {
        function: &'static str,
        index: usize,
        repr: &'static str,
    },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown error policy action: {0}")]
    UnknownPolicy(String),
}

/// Cache coordination errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache lock poisoned")]
    LockPoisoned,

    #[error("Index space exhausted: start {start} + count {count} overflows")]
    IndexSpaceExhausted { start: usize, count: usize },

    #[error("Registry entry for {repr} holds a different cache type")]
    TypeMismatch { repr: &'static str },
}

/// Master error type for all Bernoulli operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BernoulliError {
    #[error("Numeric error: {0}")]
    Numeric(#[from] NumericError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl BernoulliError {
    /// True for a negative-index rejection.
    pub fn is_domain(&self) -> bool {
        matches!(self, BernoulliError::Numeric(NumericError::Domain { .. }))
    }

    /// True for an out-of-range value rejection.
    pub fn is_overflow(&self) -> bool {
        matches!(self, BernoulliError::Numeric(NumericError::Overflow { .. }))
    }
}

/// Result type alias for Bernoulli operations.
pub type BernoulliResult<T> = Result<T, BernoulliError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_error_display_domain() {
        let err = NumericError::Domain {
            function: "bernoulli_b2n",
            index: -1,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Domain error"));
        assert!(msg.contains("bernoulli_b2n"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_numeric_error_display_overflow() {
        let err = NumericError::Overflow {
            function: "tangent_t2n",
            index: 94,
            repr: "f64",
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Overflow"));
        assert!(msg.contains("94"));
        assert!(msg.contains("f64"));
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "growth_step".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("growth_step"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_cache_error_display_lock_poisoned() {
        let msg = format!("{}", CacheError::LockPoisoned);
        assert!(msg.contains("lock poisoned"));
    }

    #[test]
    fn test_bernoulli_error_from_variants() {
        let numeric = BernoulliError::from(NumericError::Domain {
            function: "f",
            index: -3,
        });
        assert!(matches!(numeric, BernoulliError::Numeric(_)));
        assert!(numeric.is_domain());
        assert!(!numeric.is_overflow());

        let config = BernoulliError::from(ConfigError::UnknownPolicy("panic".to_string()));
        assert!(matches!(config, BernoulliError::Config(_)));

        let cache = BernoulliError::from(CacheError::LockPoisoned);
        assert!(matches!(cache, BernoulliError::Cache(_)));
        assert!(!cache.is_domain());
    }

    #[test]
    fn test_is_overflow() {
        let err = BernoulliError::from(NumericError::Overflow {
            function: "f",
            index: 130,
            repr: "f64",
        });
        assert!(err.is_overflow());
    }
}
