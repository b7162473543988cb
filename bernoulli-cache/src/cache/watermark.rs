//! High-water mark for an extensible cache.
//!
//! The mark records how many entries have been published and, once known,
//! the first index whose value does not fit the representation. Both only
//! ever move forward: the published count is monotonically non-decreasing
//! and the overflow boundary is set at most once.

use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A point-in-time view of a [`HighWaterMark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Watermark {
    /// Number of published entries; indices `0..published` are readable.
    pub published: usize,
}

impl Watermark {
    /// Create a watermark covering `published` entries.
    pub fn new(published: usize) -> Self {
        Self { published }
    }

    /// The empty watermark.
    pub fn zero() -> Self {
        Self { published: 0 }
    }

    /// Largest published index, `None` when nothing is published.
    pub fn high_index(&self) -> Option<usize> {
        self.published.checked_sub(1)
    }

    /// Check if `index` is published at this watermark.
    pub fn covers(&self, index: usize) -> bool {
        index < self.published
    }
}

impl Default for Watermark {
    fn default() -> Self {
        Self::zero()
    }
}

/// Shared, lock-free publication state of a cache instance.
#[derive(Debug, Default)]
pub struct HighWaterMark {
    published: AtomicUsize,
    overflow_at: OnceCell<usize>,
}

impl HighWaterMark {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current watermark. Entries below it are fully written.
    pub fn current(&self) -> Watermark {
        Watermark::new(self.published.load(Ordering::Acquire))
    }

    /// Publish entries up to (excluding) `published`.
    ///
    /// Callers must have written every slot below `published` first. A
    /// value lower than the current one is ignored.
    pub fn advance(&self, published: usize) {
        self.published.fetch_max(published, Ordering::AcqRel);
    }

    /// First index known not to fit, if discovered.
    pub fn overflow_at(&self) -> Option<usize> {
        self.overflow_at.get().copied()
    }

    /// Record the overflow boundary. Returns false if one was already set.
    pub fn mark_overflow(&self, index: usize) -> bool {
        self.overflow_at.set(index).is_ok()
    }

    /// True once `index` can never be published.
    pub fn is_unreachable(&self, index: usize) -> bool {
        self.overflow_at().is_some_and(|limit| index >= limit)
    }
}
