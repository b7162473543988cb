//! Configuration types

use crate::error::{BernoulliError, BernoulliResult, ConfigError};
use crate::policy::{ErrorAction, ErrorPolicy};
use serde::{Deserialize, Serialize};

/// Growth and policy configuration for extensible caches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Minimum number of entries an extension adds past the current mark.
    pub growth_step: usize,
    /// Minimum number of entries computed by the first extension.
    pub initial_extent: usize,
    /// Policy used by the convenience entry points that take none.
    pub default_policy: ErrorPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            growth_step: 20,
            initial_extent: 50,
            default_policy: ErrorPolicy::default(),
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the growth step.
    pub fn with_growth_step(mut self, step: usize) -> Self {
        self.growth_step = step;
        self
    }

    /// Set the initial extent.
    pub fn with_initial_extent(mut self, extent: usize) -> Self {
        self.initial_extent = extent;
        self
    }

    /// Set the default error policy.
    pub fn with_default_policy(mut self, policy: ErrorPolicy) -> Self {
        self.default_policy = policy;
        self
    }

    /// Validate the configuration.
    ///
    /// Validates:
    /// - growth_step > 0
    /// - initial_extent > 0
    pub fn validate(&self) -> BernoulliResult<()> {
        if self.growth_step == 0 {
            return Err(BernoulliError::Config(ConfigError::InvalidValue {
                field: "growth_step".to_string(),
                value: self.growth_step.to_string(),
                reason: "growth_step must be greater than 0".to_string(),
            }));
        }

        if self.initial_extent == 0 {
            return Err(BernoulliError::Config(ConfigError::InvalidValue {
                field: "initial_extent".to_string(),
                value: self.initial_extent.to_string(),
                reason: "initial_extent must be greater than 0".to_string(),
            }));
        }

        Ok(())
    }

    /// Create from environment variables with fallback to defaults.
    ///
    /// Environment variables:
    /// - `BERNOULLI_GROWTH_STEP`: Minimum entries added per extension (default: 20)
    /// - `BERNOULLI_INITIAL_EXTENT`: Minimum entries of the first extension (default: 50)
    /// - `BERNOULLI_DOMAIN_POLICY`: raise | sentinel | ignore (default: raise)
    /// - `BERNOULLI_OVERFLOW_POLICY`: raise | sentinel | ignore (default: raise)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            growth_step: env_parse("BERNOULLI_GROWTH_STEP").unwrap_or(defaults.growth_step),
            initial_extent: env_parse("BERNOULLI_INITIAL_EXTENT")
                .unwrap_or(defaults.initial_extent),
            default_policy: ErrorPolicy {
                domain: env_parse::<ErrorAction>("BERNOULLI_DOMAIN_POLICY")
                    .unwrap_or(defaults.default_policy.domain),
                overflow: env_parse::<ErrorAction>("BERNOULLI_OVERFLOW_POLICY")
                    .unwrap_or(defaults.default_policy.overflow),
            },
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CacheConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.growth_step, 20);
        assert_eq!(config.initial_extent, 50);
    }

    #[test]
    fn test_zero_growth_step_rejected() {
        let err = CacheConfig::new().with_growth_step(0).validate().unwrap_err();
        match err {
            BernoulliError::Config(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "growth_step")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_initial_extent_rejected() {
        let result = CacheConfig::new().with_initial_extent(0).validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: CacheConfig = serde_json::from_str(
            r#"{"growth_step": 8, "default_policy": {"domain": "raise", "overflow": "sentinel"}}"#,
        )
        .unwrap();
        assert_eq!(config.growth_step, 8);
        assert_eq!(config.initial_extent, 50);
        assert_eq!(config.default_policy.overflow, ErrorAction::Sentinel);
    }

    #[test]
    fn test_from_env_reads_overrides() {
        std::env::set_var("BERNOULLI_GROWTH_STEP", "7");
        std::env::set_var("BERNOULLI_OVERFLOW_POLICY", "ignore");
        std::env::set_var("BERNOULLI_INITIAL_EXTENT", "not-a-number");
        let config = CacheConfig::from_env();
        std::env::remove_var("BERNOULLI_GROWTH_STEP");
        std::env::remove_var("BERNOULLI_OVERFLOW_POLICY");
        std::env::remove_var("BERNOULLI_INITIAL_EXTENT");

        assert_eq!(config.growth_step, 7);
        assert_eq!(config.initial_extent, 50);
        assert_eq!(config.default_policy.overflow, ErrorAction::Ignore);
        assert_eq!(config.default_policy.domain, ErrorAction::Raise);
    }
}
