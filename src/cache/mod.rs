//! Compute-once cache for rendered content
//!
//! Post sources do not change while the process runs, so a rendered result
//! is kept for the lifetime of the cache and never invalidated. Each key owns
//! a slot; concurrent first requests for the same key wait on the slot
//! instead of rendering twice. Misses are not kept, so only keys that
//! produced a value stay in the map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, TryLockError};

type Slot<V> = Arc<Mutex<Option<V>>>;

/// Cache mapping string keys to values computed at most once
#[derive(Debug)]
pub struct MemoCache<V> {
    slots: Mutex<HashMap<String, Slot<V>>>,
}

impl<V: Clone> MemoCache<V> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the value for `key`, running `compute` if no caller has settled it yet.
    ///
    /// A `None` from `compute` is handed back to the caller and forgotten;
    /// the next request for the key computes again.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> Option<V>
    where
        F: FnOnce() -> Option<V>,
    {
        // The map lock is only held to find the slot, never while computing
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key.to_string()).or_default())
        };

        let mut value = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(settled) = value.as_ref() {
            return Some(settled.clone());
        }

        match compute() {
            Some(computed) => {
                *value = Some(computed.clone());
                Some(computed)
            }
            None => {
                drop(value);
                self.release(key, &slot);
                None
            }
        }
    }

    /// Drop the slot for `key` unless it settled or another caller is filling it
    fn release(&self, key: &str, slot: &Slot<V>) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);

        let unsettled = match slots.get(key) {
            Some(current) if Arc::ptr_eq(current, slot) => match slot.try_lock() {
                Ok(value) => value.is_none(),
                Err(TryLockError::Poisoned(e)) => e.into_inner().is_none(),
                Err(TryLockError::WouldBlock) => false,
            },
            _ => false,
        };

        if unsettled {
            slots.remove(key);
        }
    }

    /// Number of keys currently held
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<V: Clone> Default for MemoCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
