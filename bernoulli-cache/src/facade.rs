//! Single-value and bulk-copy access to B₂ₙ and T(n).
//!
//! A [`BernoulliNumbers`] handle pairs a shared cache instance with the error
//! policy its callers asked for. Bernoulli requests are served from the
//! static table when possible; everything else extends the cache once per
//! call and then copies values out in index order.

use std::iter;
use std::sync::Arc;

use bernoulli_core::{
    lookup, max_bernoulli_b2n, BernoulliResult, BernoulliTable, CacheError, ErrorPolicy,
    TableStrategy,
};

use crate::cache::NumberCache;
use crate::guard::{bernoulli_is_negative, check_index, resolve_domain, resolve_overflow};

const B2N: &str = "bernoulli_b2n";
const T2N: &str = "tangent_t2n";

/// Policy-bound view of a shared cache.
#[derive(Debug, Clone)]
pub struct BernoulliNumbers<T: BernoulliTable> {
    cache: Arc<NumberCache<T>>,
    policy: ErrorPolicy,
}

impl<T: BernoulliTable> BernoulliNumbers<T> {
    /// Bind `policy` to a shared cache instance.
    ///
    /// The policy only shapes how errors are reported; values come from
    /// `cache` unchanged.
    pub fn new(cache: Arc<NumberCache<T>>, policy: ErrorPolicy) -> Self {
        Self { cache, policy }
    }

    /// Error policy applied to every request through this handle.
    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// The shared cache instance behind this handle.
    pub fn cache(&self) -> &Arc<NumberCache<T>> {
        &self.cache
    }

    /// B₂ₙ for `index`.
    pub fn b2n(&self, index: i64) -> BernoulliResult<T> {
        let n = match check_index(B2N, index) {
            Ok(n) => n,
            Err(_) => return resolve_domain(self.policy.domain, B2N, index),
        };
        self.ensure_bernoulli(n)?;
        self.bernoulli_at(n)
    }

    /// T(index), the index-th tangent number.
    pub fn t2n(&self, index: i64) -> BernoulliResult<T> {
        let n = match check_index(T2N, index) {
            Ok(n) => n,
            Err(_) => return resolve_domain(self.policy.domain, T2N, index),
        };
        self.ensure_tangent(n)?;
        self.tangent_at(n)
    }

    /// Append B₂ₙ for n in `start..start + count` to `out`.
    ///
    /// Returns the number of values written. Under a raising policy the
    /// values before the first rejected index are already in `out` when the
    /// error is returned.
    pub fn copy_b2n<E: Extend<T>>(
        &self,
        start: i64,
        count: usize,
        out: &mut E,
    ) -> BernoulliResult<usize> {
        self.copy_with(B2N, start, count, out, Self::ensure_bernoulli, Self::bernoulli_at)
    }

    /// Append T(n) for n in `start..start + count` to `out`.
    pub fn copy_t2n<E: Extend<T>>(
        &self,
        start: i64,
        count: usize,
        out: &mut E,
    ) -> BernoulliResult<usize> {
        self.copy_with(T2N, start, count, out, Self::ensure_tangent, Self::tangent_at)
    }

    fn copy_with<E: Extend<T>>(
        &self,
        function: &'static str,
        start: i64,
        count: usize,
        out: &mut E,
        prepare: impl Fn(&Self, usize) -> BernoulliResult<()>,
        value_at: impl Fn(&Self, usize) -> BernoulliResult<T>,
    ) -> BernoulliResult<usize> {
        let first = match check_index(function, start) {
            Ok(first) => first,
            Err(_) => {
                let sentinel = resolve_domain(self.policy.domain, function, start)?;
                out.extend(iter::once(sentinel));
                return Ok(1);
            }
        };
        if count == 0 {
            return Ok(0);
        }
        let last = first
            .checked_add(count - 1)
            .ok_or(CacheError::IndexSpaceExhausted { start: first, count })?;

        prepare(self, last)?;
        for index in first..=last {
            out.extend(iter::once(value_at(self, index)?));
        }
        Ok(count)
    }

    fn ensure_bernoulli(&self, last: usize) -> BernoulliResult<()> {
        if T::STRATEGY == TableStrategy::TableThenCache && last > max_bernoulli_b2n::<T>() {
            self.cache.extend_to(last)?;
        }
        Ok(())
    }

    fn ensure_tangent(&self, last: usize) -> BernoulliResult<()> {
        self.cache.extend_to(last).map(|_| ())
    }

    fn bernoulli_at(&self, index: usize) -> BernoulliResult<T> {
        if let Some(value) = lookup::<T>(index) {
            return Ok(value);
        }
        let cached = match T::STRATEGY {
            TableStrategy::TableOnly => None,
            TableStrategy::TableThenCache => self.cache.bernoulli(index),
        };
        match cached {
            Some(value) => Ok(value),
            None => resolve_overflow(
                self.policy.overflow,
                B2N,
                index,
                bernoulli_is_negative(index),
            ),
        }
    }

    fn tangent_at(&self, index: usize) -> BernoulliResult<T> {
        match self.cache.tangent(index) {
            Some(value) => Ok(value),
            None => resolve_overflow(self.policy.overflow, T2N, index, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bernoulli_core::{BernoulliError, ErrorAction, NumericError};
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn numbers<T: BernoulliTable>(policy: ErrorPolicy) -> BernoulliNumbers<T> {
        BernoulliNumbers::new(Arc::new(NumberCache::with_defaults()), policy)
    }

    fn rational(num: i64, den: i64) -> BigRational {
        BigRational::new(BigInt::from(num), BigInt::from(den))
    }

    #[test]
    fn test_first_values() {
        let exact = numbers::<BigRational>(ErrorPolicy::raising());
        assert_eq!(exact.b2n(0).unwrap(), rational(1, 1));
        assert_eq!(exact.b2n(1).unwrap(), rational(1, 6));
        assert_eq!(numbers::<f64>(ErrorPolicy::raising()).b2n(1).unwrap(), 1.0 / 6.0);
    }

    #[test]
    fn test_table_requests_do_not_extend_cache() {
        let f = numbers::<f64>(ErrorPolicy::raising());
        let mut out: Vec<f64> = Vec::new();
        f.copy_b2n(0, 130, &mut out).unwrap();
        assert_eq!(out.len(), 130);
        assert_eq!(f.cache().high_water_mark(), None);
    }

    #[test]
    fn test_rational_past_table_uses_cache() {
        let exact = numbers::<BigRational>(ErrorPolicy::raising());
        let value = exact.b2n(60).unwrap();
        assert!(value < rational(0, 1));
        assert!(exact.cache().high_water_mark().unwrap() >= 60);
    }

    #[test]
    fn test_negative_start_raises_without_output() {
        let f = numbers::<f64>(ErrorPolicy::raising());
        let mut out: Vec<f64> = Vec::new();
        let err = f.copy_b2n(-1, 3, &mut out).unwrap_err();
        assert_eq!(
            err,
            BernoulliError::Numeric(NumericError::Domain {
                function: "bernoulli_b2n",
                index: -1
            })
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_negative_start_with_sentinel_writes_one_nan() {
        let f = numbers::<f64>(ErrorPolicy::sentinel());
        let mut out: Vec<f64> = Vec::new();
        assert_eq!(f.copy_b2n(-4, 3, &mut out).unwrap(), 1);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_nan());
    }

    #[test]
    fn test_raise_writes_prefix_then_fails() {
        let f = numbers::<f64>(ErrorPolicy::raising());
        let mut out: Vec<f64> = Vec::new();
        let err = f.copy_b2n(128, 4, &mut out).unwrap_err();
        assert!(err.is_overflow());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_mixed_batch_under_sentinel() {
        let f = numbers::<f64>(ErrorPolicy::sentinel());
        let mut out: Vec<f64> = Vec::new();
        assert_eq!(f.copy_b2n(128, 4, &mut out).unwrap(), 4);
        assert!(out[0].is_finite() && out[1].is_finite());
        assert_eq!(out[2], f64::NEG_INFINITY);
        assert_eq!(out[3], f64::INFINITY);
    }

    #[test]
    fn test_ignore_overflow_returns_max() {
        let f = numbers::<f32>(ErrorPolicy::raising().with_overflow(ErrorAction::Ignore));
        assert_eq!(f.b2n(33).unwrap(), f32::MAX);
        assert_eq!(f.b2n(34).unwrap(), -f32::MAX);
    }

    #[test]
    fn test_tangent_values() {
        let f = numbers::<f64>(ErrorPolicy::raising());
        let mut out: Vec<f64> = Vec::new();
        f.copy_t2n(0, 5, &mut out).unwrap();
        assert_eq!(out, vec![0.0, 1.0, 2.0, 16.0, 272.0]);
        assert!(f.t2n(93).is_ok());
        assert!(f.t2n(94).unwrap_err().is_overflow());
        assert!(f.t2n(10_000).unwrap_err().is_overflow());
    }

    #[test]
    fn test_far_tangent_index_overflows_on_cold_cache() {
        for index in [1i64 << 40, i64::MAX] {
            let f = numbers::<f64>(ErrorPolicy::raising());
            assert!(f.t2n(index).unwrap_err().is_overflow());
            assert_eq!(f.cache().overflow_at(), Some(130));
        }

        let f = numbers::<f32>(ErrorPolicy::sentinel());
        let mut out: Vec<f32> = Vec::new();
        assert_eq!(f.copy_t2n(1 << 40, 3, &mut out).unwrap(), 3);
        assert_eq!(out, vec![f32::INFINITY; 3]);
        assert_eq!(f.cache().high_water_mark(), Some(32));
    }

    #[test]
    fn test_tangent_sentinel_is_positive() {
        let f = numbers::<f32>(ErrorPolicy::sentinel());
        assert_eq!(f.t2n(20).unwrap(), f32::INFINITY);
        let t19 = f.t2n(19).unwrap();
        assert!(t19.is_finite() && t19 > 9.7e35);
    }

    #[test]
    fn test_exhausted_index_space() {
        let exact = numbers::<BigRational>(ErrorPolicy::raising());
        let mut out: Vec<BigRational> = Vec::new();
        let err = exact.copy_b2n(i64::MAX, usize::MAX, &mut out).unwrap_err();
        assert!(matches!(
            err,
            BernoulliError::Cache(CacheError::IndexSpaceExhausted { .. })
        ));
    }

    #[test]
    fn test_zero_count_writes_nothing() {
        let f = numbers::<f64>(ErrorPolicy::raising());
        let mut out: Vec<f64> = Vec::new();
        assert_eq!(f.copy_b2n(5, 0, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
