use std::{
    collections::HashMap,
    sync::{OnceLock, PoisonError, RwLock},
};

/// A process-wide memo table keyed by short strings.
///
/// Lookups and inserts take the lock only briefly and never while computing, so two threads that
/// miss on the same key may both compute it. Keys longer than `max_key_len` bytes are computed but
/// never stored, and failed computations are never stored.
pub(crate) struct BoundedCache<V> {
    name: &'static str,
    max_key_len: usize,
    map: OnceLock<RwLock<HashMap<String, V>>>,
}

impl<V: Clone> BoundedCache<V> {
    pub(crate) const fn new(name: &'static str, max_key_len: usize) -> Self {
        Self {
            name,
            max_key_len,
            map: OnceLock::new(),
        }
    }

    fn map(&self) -> &RwLock<HashMap<String, V>> {
        self.map.get_or_init(|| RwLock::new(HashMap::new()))
    }

    pub(crate) fn get(&self, key: &str) -> Option<V> {
        // a poisoned lock only means another thread panicked mid-insert; the map is still usable
        let map = self.map().read().unwrap_or_else(PoisonError::into_inner);
        map.get(key).cloned()
    }

    pub(crate) fn get_or_try_insert_with<E, F>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce(&str) -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = compute(key)?;
        if key.len() <= self.max_key_len {
            let mut map = self.map().write().unwrap_or_else(PoisonError::into_inner);
            map.entry(key.to_owned()).or_insert_with(|| value.clone());
            tracing::debug!(cache = self.name, key, "stored cache entry");
        } else {
            tracing::trace!(cache = self.name, len = key.len(), "key too long to cache");
        }
        Ok(value)
    }

    pub(crate) fn get_or_insert_with<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce(&str) -> V,
    {
        match self.get_or_try_insert_with::<core::convert::Infallible, _>(key, |k| Ok(compute(k))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}
