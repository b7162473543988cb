//! Bernoulli Cache - Shared, Growable Bernoulli and Tangent Number Cache
//!
//! Even-indexed Bernoulli numbers B₂ₙ and tangent numbers T(n) for `f32`,
//! `f64` and exact `BigRational`. Small indices come straight from the static
//! tables in `bernoulli-core`; larger ones are computed once with the tangent
//! recurrence and kept in a per-(representation, policy) cache that any
//! number of threads can read while one of them extends it.
//!
//! # Example
//!
//! ```ignore
//! use bernoulli_cache::{bernoulli_b2n, bernoulli_b2n_range_with};
//! use bernoulli_core::ErrorPolicy;
//!
//! let b2: f64 = bernoulli_b2n(1)?;
//! let mut values: Vec<f64> = Vec::new();
//! bernoulli_b2n_range_with(125, 10, &mut values, ErrorPolicy::sentinel())?;
//! ```

pub mod cache;
pub mod facade;
pub mod guard;
pub mod registry;

pub use cache::{CacheStats, Coverage, NumberCache, Watermark};
pub use facade::BernoulliNumbers;
pub use registry::{global_registry, CacheRegistry};

use bernoulli_core::{lookup, max_bernoulli_b2n, BernoulliResult, BernoulliTable, ErrorPolicy};

// ============================================================================
// BERNOULLI NUMBERS
// ============================================================================

/// B₂ₙ under the process-wide default policy.
pub fn bernoulli_b2n<T: BernoulliTable>(index: i64) -> BernoulliResult<T> {
    if let Some(value) = table_value::<T>(index) {
        return Ok(value);
    }
    let registry = global_registry();
    registry
        .numbers::<T>(registry.config().default_policy)?
        .b2n(index)
}

/// B₂ₙ under an explicit policy.
pub fn bernoulli_b2n_with<T: BernoulliTable>(
    index: i64,
    policy: ErrorPolicy,
) -> BernoulliResult<T> {
    if let Some(value) = table_value::<T>(index) {
        return Ok(value);
    }
    global_registry().numbers::<T>(policy)?.b2n(index)
}

/// Append B₂ₙ for n in `start..start + count` to `out` under the default policy.
pub fn bernoulli_b2n_range<T: BernoulliTable, E: Extend<T>>(
    start: i64,
    count: usize,
    out: &mut E,
) -> BernoulliResult<usize> {
    if let Some(written) = copy_from_table(start, count, out) {
        return Ok(written);
    }
    let registry = global_registry();
    registry
        .numbers::<T>(registry.config().default_policy)?
        .copy_b2n(start, count, out)
}

/// Append B₂ₙ for n in `start..start + count` to `out` under `policy`.
pub fn bernoulli_b2n_range_with<T: BernoulliTable, E: Extend<T>>(
    start: i64,
    count: usize,
    out: &mut E,
    policy: ErrorPolicy,
) -> BernoulliResult<usize> {
    if let Some(written) = copy_from_table(start, count, out) {
        return Ok(written);
    }
    global_registry()
        .numbers::<T>(policy)?
        .copy_b2n(start, count, out)
}

// ============================================================================
// TANGENT NUMBERS
// ============================================================================

/// T(index) under the process-wide default policy.
pub fn tangent_t2n<T: BernoulliTable>(index: i64) -> BernoulliResult<T> {
    let registry = global_registry();
    registry
        .numbers::<T>(registry.config().default_policy)?
        .t2n(index)
}

/// T(index) under an explicit policy.
pub fn tangent_t2n_with<T: BernoulliTable>(index: i64, policy: ErrorPolicy) -> BernoulliResult<T> {
    global_registry().numbers::<T>(policy)?.t2n(index)
}

/// Append T(n) for n in `start..start + count` to `out` under the default policy.
pub fn tangent_t2n_range<T: BernoulliTable, E: Extend<T>>(
    start: i64,
    count: usize,
    out: &mut E,
) -> BernoulliResult<usize> {
    let registry = global_registry();
    registry
        .numbers::<T>(registry.config().default_policy)?
        .copy_t2n(start, count, out)
}

/// Append T(n) for n in `start..start + count` to `out` under `policy`.
pub fn tangent_t2n_range_with<T: BernoulliTable, E: Extend<T>>(
    start: i64,
    count: usize,
    out: &mut E,
    policy: ErrorPolicy,
) -> BernoulliResult<usize> {
    global_registry()
        .numbers::<T>(policy)?
        .copy_t2n(start, count, out)
}

// ============================================================================
// TABLE FAST PATH
// ============================================================================

fn table_value<T: BernoulliTable>(index: i64) -> Option<T> {
    usize::try_from(index).ok().and_then(lookup::<T>)
}

/// Serve a range entirely from the static table, or `None` if it does not fit.
fn copy_from_table<T: BernoulliTable, E: Extend<T>>(
    start: i64,
    count: usize,
    out: &mut E,
) -> Option<usize> {
    let first = usize::try_from(start).ok()?;
    let end = first.checked_add(count)?;
    if end > max_bernoulli_b2n::<T>() + 1 {
        return None;
    }
    out.extend(T::table()[first..end].iter().cloned());
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bernoulli_core::ErrorAction;
    use num_bigint::BigInt;
    use num_rational::BigRational;

    #[test]
    fn test_free_functions_first_values() {
        assert_eq!(bernoulli_b2n::<f64>(0).unwrap(), 1.0);
        assert_eq!(
            bernoulli_b2n::<BigRational>(1).unwrap(),
            BigRational::new(BigInt::from(1), BigInt::from(6))
        );
        assert_eq!(tangent_t2n::<f64>(3).unwrap(), 16.0);
    }

    #[test]
    fn test_table_range_fast_path() {
        let mut out: Vec<f32> = Vec::new();
        assert_eq!(bernoulli_b2n_range::<f32, _>(30, 3, &mut out).unwrap(), 3);
        assert_eq!(out.len(), 3);
        assert!(copy_from_table::<f32, _>(30, 4, &mut out).is_none());
        assert!(copy_from_table::<f32, _>(-1, 1, &mut out).is_none());
    }

    #[test]
    fn test_explicit_policy_variants() {
        let ignore = ErrorPolicy::raising().with_overflow(ErrorAction::Ignore);
        assert_eq!(bernoulli_b2n_with::<f64>(131, ignore).unwrap(), f64::MAX);
        assert_eq!(tangent_t2n_with::<f64>(200, ignore).unwrap(), f64::MAX);

        let mut out: Vec<f64> = Vec::new();
        bernoulli_b2n_range_with::<f64, _>(129, 2, &mut out, ErrorPolicy::sentinel()).unwrap();
        assert!(out[0].is_finite());
        assert_eq!(out[1], f64::NEG_INFINITY);

        out.clear();
        tangent_t2n_range_with::<f64, _>(1, 2, &mut out, ErrorPolicy::raising()).unwrap();
        assert_eq!(out, vec![1.0, 2.0]);
    }

    #[test]
    fn test_domain_error_free_function() {
        assert!(bernoulli_b2n_with::<f64>(-1, ErrorPolicy::raising())
            .unwrap_err()
            .is_domain());
        let mut out: Vec<f64> = Vec::new();
        assert!(tangent_t2n_range_with::<f64, _>(-1, 1, &mut out, ErrorPolicy::raising())
            .unwrap_err()
            .is_domain());
        assert!(out.is_empty());
    }
}
