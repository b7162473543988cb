//! Bernoulli Core - Numeric Types, Tables and Policies
//!
//! Pure building blocks with no shared state. The stateful cache lives in
//! `bernoulli-cache`; everything it needs to know about a numeric
//! representation, its static table, its error policy and its growth
//! configuration is defined here.

pub mod config;
pub mod error;
pub mod policy;
pub mod table;
pub mod value;

pub use config::CacheConfig;
pub use error::{BernoulliError, BernoulliResult, CacheError, ConfigError, NumericError};
pub use policy::{ErrorAction, ErrorPolicy};
pub use table::{
    lookup, max_bernoulli_b2n, overflow_threshold, unchecked_bernoulli_b2n, BernoulliTable,
    TableStrategy,
};
pub use value::BernoulliValue;

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
