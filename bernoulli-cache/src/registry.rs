//! Cache instances keyed by (representation, error policy).
//!
//! Each key gets exactly one [`NumberCache`], created lazily on first use and
//! shared through `Arc` for the life of the registry. Callers can own a
//! registry and pass it around, or use the process-wide one from
//! [`global_registry`].

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use bernoulli_core::{
    BernoulliResult, BernoulliTable, CacheConfig, CacheError, ErrorPolicy,
};
use once_cell::sync::Lazy;

use crate::cache::NumberCache;
use crate::facade::BernoulliNumbers;

type CacheKey = (TypeId, ErrorPolicy);

/// Registry of shared cache instances.
pub struct CacheRegistry {
    config: CacheConfig,
    caches: RwLock<HashMap<CacheKey, Arc<dyn Any + Send + Sync>>>,
}

impl CacheRegistry {
    /// Create a registry whose caches use `config`.
    pub fn new(config: CacheConfig) -> BernoulliResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            caches: RwLock::new(HashMap::new()),
        })
    }

    /// Create a registry with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: CacheConfig::default(),
            caches: RwLock::new(HashMap::new()),
        }
    }

    /// Configuration every cache created by this registry starts from.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The cache instance for `T` under `policy`, created on first use.
    pub fn cache_for<T: BernoulliTable>(
        &self,
        policy: ErrorPolicy,
    ) -> BernoulliResult<Arc<NumberCache<T>>> {
        let key = (TypeId::of::<T>(), policy);

        {
            let caches = self.caches.read().map_err(|_| CacheError::LockPoisoned)?;
            if let Some(entry) = caches.get(&key) {
                return downcast::<T>(Arc::clone(entry));
            }
        }

        let mut caches = self.caches.write().map_err(|_| CacheError::LockPoisoned)?;
        let entry = caches.entry(key).or_insert_with(|| {
            tracing::debug!(repr = T::NAME, policy = %policy, "creating cache instance");
            let cache: Arc<dyn Any + Send + Sync> =
                Arc::new(NumberCache::<T>::new(self.config.clone()));
            cache
        });
        downcast::<T>(Arc::clone(entry))
    }

    /// Policy-bound access handle for `T`.
    pub fn numbers<T: BernoulliTable>(
        &self,
        policy: ErrorPolicy,
    ) -> BernoulliResult<BernoulliNumbers<T>> {
        Ok(BernoulliNumbers::new(self.cache_for::<T>(policy)?, policy))
    }

    /// Number of cache instances created so far.
    pub fn len(&self) -> usize {
        self.caches.read().map(|c| c.len()).unwrap_or(0)
    }

    /// True until the first cache instance is requested.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("config", &self.config)
            .field("instances", &self.len())
            .finish()
    }
}

fn downcast<T: BernoulliTable>(
    entry: Arc<dyn Any + Send + Sync>,
) -> BernoulliResult<Arc<NumberCache<T>>> {
    entry
        .downcast::<NumberCache<T>>()
        .map_err(|_| CacheError::TypeMismatch { repr: T::NAME }.into())
}

static GLOBAL: Lazy<CacheRegistry> = Lazy::new(|| {
    let config = CacheConfig::from_env();
    match CacheRegistry::new(config) {
        Ok(registry) => {
            tracing::debug!(config = ?registry.config(), "global cache registry initialized");
            registry
        }
        Err(e) => {
            tracing::warn!(error = %e, "invalid cache configuration in environment, using defaults");
            CacheRegistry::with_defaults()
        }
    }
});

/// Process-wide registry behind the free functions.
///
/// Configured once from the environment (see [`CacheConfig::from_env`]).
pub fn global_registry() -> &'static CacheRegistry {
    &GLOBAL
}
