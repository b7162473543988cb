//! Extensible tangent/Bernoulli cache.
//!
//! [`NumberCache`] owns the growable store for one representation and
//! serializes its growth. Readers never block: they consult the high-water
//! mark and copy values out of slots that can no longer change. A caller
//! that needs entries past the mark takes the extension lock, re-checks the
//! mark (another caller may have extended meanwhile), and runs the
//! recurrence until the target is published or the representation
//! overflows.

use std::sync::Mutex;

use bernoulli_core::{
    lookup, overflow_threshold, BernoulliResult, BernoulliTable, CacheConfig, CacheError,
    TableStrategy,
};

use super::recurrence::{tangent_to_bernoulli, unscale_tangent, TangentRecurrence};
use super::stats::{CacheStats, StatsCounters};
use super::store::AppendOnlyStore;
use super::watermark::{HighWaterMark, Watermark};

/// Published pair for one index.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    /// T(n) · 2^-s, as produced by the recurrence.
    tangent: T,
    /// B₂ₙ.
    bernoulli: T,
}

/// Outcome of an extension request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// The target index is published.
    Covered,
    /// The target lies at or past the overflow boundary and never will be.
    Unreachable {
        /// First index whose value does not fit the representation.
        overflow_at: usize,
    },
}

/// Append-only cache of tangent and Bernoulli numbers for one representation.
///
/// # Example
///
/// ```ignore
/// let cache = NumberCache::<BigRational>::with_defaults();
/// cache.extend_to(60)?;
/// let b120 = cache.bernoulli(60).expect("published");
/// ```
pub struct NumberCache<T: BernoulliTable> {
    entries: AppendOnlyStore<CacheEntry<T>>,
    mark: HighWaterMark,
    recurrence: Mutex<TangentRecurrence<T>>,
    config: CacheConfig,
    stats: StatsCounters,
}

impl<T: BernoulliTable> NumberCache<T> {
    /// Create an empty cache. Nothing is computed until the first extension.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: AppendOnlyStore::new(),
            mark: HighWaterMark::new(),
            recurrence: Mutex::new(TangentRecurrence::new()),
            config,
            stats: StatsCounters::default(),
        }
    }

    /// Create an empty cache with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::default())
    }

    /// Get the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Current published watermark.
    pub fn watermark(&self) -> Watermark {
        self.mark.current()
    }

    /// Largest published index, `None` while empty.
    pub fn high_water_mark(&self) -> Option<usize> {
        self.mark.current().high_index()
    }

    /// First index known not to fit the representation, once discovered.
    pub fn overflow_at(&self) -> Option<usize> {
        self.mark.overflow_at()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Ensure `target` is published, or report that it never can be.
    pub fn extend_to(&self, target: usize) -> BernoulliResult<Coverage> {
        if let Some(coverage) = self.settled(target) {
            self.stats.record_hit();
            tracing::trace!(repr = T::NAME, index = target, "cache fast path");
            return Ok(coverage);
        }

        self.stats.record_miss();
        let mut recurrence = self
            .recurrence
            .lock()
            .map_err(|_| CacheError::LockPoisoned)?;

        if let Some(coverage) = self.settled(target) {
            return Ok(coverage);
        }

        let start = self.mark.current().published;
        let goal = self.growth_goal(start, target);
        tracing::debug!(repr = T::NAME, from = start, to = goal, "extending cache");

        let mut computed = 0u64;
        while recurrence.next_index() <= goal {
            let n = recurrence.next_index();
            let entry = recurrence.advance().and_then(|tangent| {
                Self::bernoulli_for(n, &tangent).map(|bernoulli| CacheEntry { tangent, bernoulli })
            });
            let Some(entry) = entry else {
                if self.mark.mark_overflow(n) {
                    tracing::warn!(
                        repr = T::NAME,
                        index = n,
                        "overflow boundary reached, cache will not extend further"
                    );
                }
                break;
            };
            if self.entries.set(n, entry).is_err() {
                // n is published exactly once, under this lock.
                break;
            }
            self.mark.advance(n + 1);
            computed += 1;
        }
        drop(recurrence);

        self.stats.record_extension(computed);
        self.settled(target).ok_or_else(|| {
            CacheError::IndexSpaceExhausted {
                start,
                count: target.saturating_sub(start).saturating_add(1),
            }
            .into()
        })
    }

    /// B₂ₙ at `index`, copied out, if published.
    pub fn bernoulli(&self, index: usize) -> Option<T> {
        self.entry(index).map(|e| e.bernoulli.clone())
    }

    /// Unscaled T(index), if published and representable.
    pub fn tangent(&self, index: usize) -> Option<T> {
        self.entry(index)
            .and_then(|e| unscale_tangent(e.tangent.clone()))
    }

    /// T(index) · 2^-s, if published.
    pub fn scaled_tangent(&self, index: usize) -> Option<T> {
        self.entry(index).map(|e| e.tangent.clone())
    }

    fn entry(&self, index: usize) -> Option<&CacheEntry<T>> {
        if !self.mark.current().covers(index) {
            return None;
        }
        self.entries.get(index)
    }

    /// `Some` when no extension can change the answer for `target`.
    fn settled(&self, target: usize) -> Option<Coverage> {
        if self.mark.current().covers(target) {
            return Some(Coverage::Covered);
        }
        if !self.mark.is_unreachable(target) {
            return None;
        }
        self.mark
            .overflow_at()
            .map(|overflow_at| Coverage::Unreachable { overflow_at })
    }

    /// Last index an extension starting at `published` computes.
    ///
    /// Never past the table bound of a table-only representation, where
    /// the first untabulated index is already known to overflow.
    fn growth_goal(&self, published: usize, target: usize) -> usize {
        let stepped = published.saturating_add(self.config.growth_step.saturating_sub(1));
        let initial = self.config.initial_extent.saturating_sub(1);
        let goal = target.max(stepped).max(initial);
        match overflow_threshold::<T>() {
            Some(limit) => goal.min(limit),
            None => goal,
        }
    }

    /// B₂ₙ published alongside the scaled tangent at `n`.
    ///
    /// Tabulated indices publish the table value so the cache and the
    /// table agree bit for bit.
    fn bernoulli_for(n: usize, scaled_tangent: &T) -> Option<T> {
        if let Some(value) = lookup::<T>(n) {
            return Some(value);
        }
        match T::STRATEGY {
            TableStrategy::TableOnly => None,
            TableStrategy::TableThenCache => tangent_to_bernoulli(n, scaled_tangent),
        }
    }
}

impl<T: BernoulliTable> Default for NumberCache<T> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<T: BernoulliTable> std::fmt::Debug for NumberCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberCache")
            .field("repr", &T::NAME)
            .field("watermark", &self.mark.current())
            .field("overflow_at", &self.mark.overflow_at())
            .finish()
    }
}
