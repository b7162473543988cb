//! Growable tangent/Bernoulli cache with lock-free reads.
//!
//! Storage is append-only and never relocates, so a reader holding the
//! current [`Watermark`] can copy any published entry without coordination.
//! Growth is serialized per cache instance; see [`NumberCache::extend_to`].
//!
//! # Example
//!
//! ```ignore
//! let cache = NumberCache::<f64>::with_defaults();
//! match cache.extend_to(140)? {
//!     Coverage::Covered => {}
//!     Coverage::Unreachable { overflow_at } => assert_eq!(overflow_at, 130),
//! }
//! ```

pub mod extensible;
pub mod recurrence;
pub mod stats;
pub mod store;
pub mod watermark;

pub use extensible::{Coverage, NumberCache};
pub use recurrence::{tangent_to_bernoulli, unscale_tangent, TangentRecurrence};
pub use stats::CacheStats;
pub use store::AppendOnlyStore;
pub use watermark::{HighWaterMark, Watermark};
