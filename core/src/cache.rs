//! Time-windowed memoizing cache — the one piece of infrastructure both
//! the visible-sample layer and the zot-choice layer are built on.
//!
//! RULES:
//!   - A fresh entry is returned as-is until its window elapses. Staleness
//!     up to the window length is the contract, not a bug.
//!   - Expiry recomputes the whole value via the loader; nothing is
//!     patched incrementally.
//!   - A loader failure propagates to the caller and is never cached.
//!     Caching it would suppress the value for a full window.
//!   - With a capacity set, admitting a new key at capacity evicts exactly
//!     one resident entry: the least recently touched (reads and writes
//!     both count as touches).

use crate::error::RenderResult;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Slot<V> {
    value: V,
    written_at: Instant,
    touched: u64,
}

struct Inner<K, V> {
    entries: HashMap<K, Slot<V>>,
    // Monotonic recency counter; bumped on every access.
    clock: u64,
}

pub struct TimedCache<K, V> {
    max_age: Duration,
    capacity: Option<usize>,
    inner: Mutex<Inner<K, V>>,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(max_age: Duration, capacity: Option<usize>) -> Self {
        Self {
            max_age,
            capacity,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                clock: 0,
            }),
        }
    }

    /// Get-or-compute: returns the cached value while it is fresh, runs
    /// `load` under the lock on miss or expiry. Safe to call from multiple
    /// threads; only one loader runs per key at a time.
    pub fn get_or_compute<F>(&self, key: K, load: F) -> RenderResult<V>
    where
        F: FnOnce() -> RenderResult<V>,
    {
        self.get_or_compute_at(Instant::now(), key, load)
    }

    /// Same as [`get_or_compute`](Self::get_or_compute) but with the clock
    /// injected, so expiry is testable without sleeping.
    fn get_or_compute_at<F>(&self, now: Instant, key: K, load: F) -> RenderResult<V>
    where
        F: FnOnce() -> RenderResult<V>,
    {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.clock += 1;
        let stamp = inner.clock;

        if let Some(slot) = inner.entries.get_mut(&key) {
            if now.duration_since(slot.written_at) < self.max_age {
                slot.touched = stamp;
                return Ok(slot.value.clone());
            }
        }

        let value = load()?;

        if let Some(capacity) = self.capacity {
            if !inner.entries.contains_key(&key) && inner.entries.len() >= capacity {
                let victim = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, slot)| slot.touched)
                    .map(|(k, _)| k.clone());
                if let Some(victim) = victim {
                    inner.entries.remove(&victim);
                }
            }
        }

        inner.entries.insert(
            key,
            Slot {
                value: value.clone(),
                written_at: now,
                touched: stamp,
            },
        );
        Ok(value)
    }

    /// Resident entry count. Exposed so callers can assert capacity bounds.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }

}
