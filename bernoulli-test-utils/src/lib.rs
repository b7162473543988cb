//! Bernoulli Test Utilities
//!
//! Centralized test infrastructure for the Bernoulli workspace:
//! - Exact reference values computed independently of the cache
//! - Proptest generators for policies, actions and index ranges
//! - Test fixtures for common cache configurations
//! - Tolerance assertions for fixed-width results

// Re-export core types for convenience
pub use bernoulli_core::{
    BernoulliError, BernoulliResult, BernoulliTable, BernoulliValue, CacheConfig, ErrorAction,
    ErrorPolicy, TableStrategy,
};

// ============================================================================
// REFERENCE VALUES
// ============================================================================

pub mod reference {
    use num_bigint::BigInt;
    use num_rational::BigRational;
    use num_traits::{One, Zero};

    /// B₂ₙ for n in `0..count`, exact, via the Akiyama–Tanigawa transform.
    pub fn bernoulli_b2n_exact(count: usize) -> Vec<BigRational> {
        if count == 0 {
            return Vec::new();
        }
        let max_m = 2 * (count - 1);
        let mut a: Vec<BigRational> = Vec::with_capacity(max_m + 1);
        let mut out = Vec::with_capacity(count);

        for m in 0..=max_m {
            a.push(BigRational::new(BigInt::one(), BigInt::from(m + 1)));
            for j in (1..=m).rev() {
                let diff = &a[j - 1] - &a[j];
                a[j - 1] = diff * BigRational::from_integer(BigInt::from(j));
            }
            if m % 2 == 0 {
                out.push(a[0].clone());
            }
        }
        out
    }

    /// T(n) for n in `0..count`, exact, as odd derivatives of `tan` at zero.
    ///
    /// Uses `tan' = 1 + tan²`: with `Pₖ` the polynomial in `tan x` equal to
    /// the k-th derivative, `Pₖ₊₁(y) = (1 + y²)·Pₖ'(y)` and T(n) = P₂ₙ₋₁(0).
    pub fn tangent_exact(count: usize) -> Vec<BigInt> {
        let mut out = Vec::with_capacity(count);
        if count == 0 {
            return out;
        }
        out.push(BigInt::zero());

        // P₀(y) = y
        let mut poly = vec![BigInt::zero(), BigInt::one()];
        let mut order = 0usize;
        for n in 1..count {
            while order < 2 * n - 1 {
                poly = next_derivative(&poly);
                order += 1;
            }
            out.push(poly[0].clone());
        }
        out
    }

    fn next_derivative(poly: &[BigInt]) -> Vec<BigInt> {
        let derivative: Vec<BigInt> = poly
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * BigInt::from(i))
            .collect();
        let mut next = vec![BigInt::zero(); derivative.len() + 2];
        for (i, c) in derivative.iter().enumerate() {
            next[i] += c;
            next[i + 2] += c;
        }
        next
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    use super::*;
    use proptest::prelude::*;

    pub fn arb_action() -> impl Strategy<Value = ErrorAction> {
        prop_oneof![
            Just(ErrorAction::Raise),
            Just(ErrorAction::Sentinel),
            Just(ErrorAction::Ignore),
        ]
    }

    pub fn arb_policy() -> impl Strategy<Value = ErrorPolicy> {
        (arb_action(), arb_action()).prop_map(|(domain, overflow)| ErrorPolicy::new(domain, overflow))
    }

    /// `(start, count)` with `start + count <= max_end`.
    pub fn arb_index_range(max_end: usize) -> impl Strategy<Value = (i64, usize)> {
        (0..max_end).prop_flat_map(move |start| {
            (Just(start as i64), 0..=(max_end - start))
        })
    }

    pub fn arb_negative_index() -> impl Strategy<Value = i64> {
        i64::MIN..0i64
    }

    pub fn arb_valid_config() -> impl Strategy<Value = CacheConfig> {
        (1usize..64, 1usize..128, arb_policy()).prop_map(|(step, extent, policy)| {
            CacheConfig::new()
                .with_growth_step(step)
                .with_initial_extent(extent)
                .with_default_policy(policy)
        })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    use super::*;

    /// Grow exactly to each request.
    pub fn minimal_growth_config() -> CacheConfig {
        CacheConfig::new().with_growth_step(1).with_initial_extent(1)
    }

    /// Default growth behavior.
    pub fn default_config() -> CacheConfig {
        CacheConfig::default()
    }

    /// Overflow substitutes infinities, domain errors still raise.
    pub fn sentinel_overflow_policy() -> ErrorPolicy {
        ErrorPolicy::raising().with_overflow(ErrorAction::Sentinel)
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    use num_rational::BigRational;
    use num_traits::ToPrimitive;

    /// Relative error of `actual` against the exact `expected`.
    pub fn relative_error(actual: f64, expected: &BigRational) -> f64 {
        let expected = expected.to_f64().unwrap_or(f64::NAN);
        if expected == 0.0 {
            return actual.abs();
        }
        ((actual - expected) / expected).abs()
    }

    /// Assert that a float is within `tolerance` relative error of an exact value.
    pub fn assert_close(actual: f64, expected: &BigRational, tolerance: f64) {
        let err = relative_error(actual, expected);
        assert!(
            err <= tolerance,
            "Expected {} to be within {} of {} (relative error {})",
            actual,
            tolerance,
            expected,
            err
        );
    }

    /// Assert that two float slices agree element-wise within `tolerance`.
    pub fn assert_all_close(actual: &[f64], expected: &[BigRational], tolerance: f64) {
        assert_eq!(
            actual.len(),
            expected.len(),
            "length mismatch: {} vs {}",
            actual.len(),
            expected.len()
        );
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            let err = relative_error(*a, e);
            assert!(
                err <= tolerance,
                "index {}: {} vs {} (relative error {})",
                i,
                a,
                e,
                err
            );
        }
    }
}
