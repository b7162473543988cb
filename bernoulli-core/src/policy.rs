//! Error policies for domain and overflow conditions.
//!
//! A policy decides, per error class, whether a rejected index surfaces as an
//! `Err`, as a sentinel value, or as a silently substituted best-effort value.
//! Policies are part of a cache instance's identity, so they are `Hash + Eq`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ERROR ACTION ENUM
// ============================================================================

/// What to do when an error class is triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorAction {
    /// Return `Err` to the caller.
    #[default]
    Raise,
    /// Return the representation's sentinel (infinity / NaN) and log it.
    Sentinel,
    /// Return the closest meaningful value without any signal.
    Ignore,
}

impl ErrorAction {
    /// Canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorAction::Raise => "raise",
            ErrorAction::Sentinel => "sentinel",
            ErrorAction::Ignore => "ignore",
        }
    }

    /// Parse from a string, accepting the common aliases.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "raise" | "throw" => Ok(ErrorAction::Raise),
            "sentinel" | "errno" => Ok(ErrorAction::Sentinel),
            "ignore" => Ok(ErrorAction::Ignore),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ErrorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ErrorAction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// ERROR POLICY
// ============================================================================

/// Per-class error handling for a cache instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorPolicy {
    /// Action for negative indices.
    pub domain: ErrorAction,
    /// Action for values that do not fit the representation.
    pub overflow: ErrorAction,
}

impl ErrorPolicy {
    /// Create a policy with explicit actions.
    pub const fn new(domain: ErrorAction, overflow: ErrorAction) -> Self {
        Self { domain, overflow }
    }

    /// Raise every error.
    pub const fn raising() -> Self {
        Self::new(ErrorAction::Raise, ErrorAction::Raise)
    }

    /// Substitute sentinels for every error.
    pub const fn sentinel() -> Self {
        Self::new(ErrorAction::Sentinel, ErrorAction::Sentinel)
    }

    /// Silently substitute best-effort values for every error.
    pub const fn ignoring() -> Self {
        Self::new(ErrorAction::Ignore, ErrorAction::Ignore)
    }

    /// Set the domain action.
    pub fn with_domain(mut self, action: ErrorAction) -> Self {
        self.domain = action;
        self
    }

    /// Set the overflow action.
    pub fn with_overflow(mut self, action: ErrorAction) -> Self {
        self.overflow = action;
        self
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "domain={},overflow={}", self.domain, self.overflow)
    }
}
