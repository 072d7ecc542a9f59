//! Exactly-once, retry-on-failure cache.
//!
//! `OnceMap` hands out one slot per key. The first caller for a key takes the
//! slot's lock and runs the initializer; concurrent callers for the same key
//! block on that lock and then see the finished value. Callers for other keys
//! never touch that lock.
//!
//! ```text
//! get_or_try_insert(k, init)
//!   ├── map lock (short): find or create slot for k
//!   └── slot lock (held across init)
//!         ├── Some(v)  → clone, return          (hit)
//!         └── None     → init()
//!                          ├── Ok(v)  → store, return
//!                          └── Err(e) → drop slot if unshared, return e
//! ```
//!
//! A failed key keeps no slot unless another caller is already waiting on
//! it, so repeated failures over many keys do not grow the map.
//!
//! Values are cloned out, so `V` is normally an `Arc`.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

type Slot<V> = Arc<Mutex<Option<V>>>;

/// Whether a lookup found a value or ran the initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Hit,
    Miss,
}

/// Concurrent map whose values are computed at most once per key.
pub struct OnceMap<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> std::fmt::Debug for OnceMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnceMap")
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}

impl<K, V> Default for OnceMap<K, V> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> OnceMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value for `key`, running `init` if there is none yet.
    ///
    /// If `init` fails, nothing is stored and the error is returned.
    pub fn get_or_try_insert<E, F>(&self, key: &K, init: F) -> Result<(V, Lookup), E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let slot = self.slot(key);
        let mut guard = slot.lock();
        if let Some(value) = guard.as_ref() {
            return Ok((value.clone(), Lookup::Hit));
        }
        // INVARIANT: FAILED_INIT_NOT_STORED
        let value = match init() {
            Ok(value) => value,
            Err(e) => {
                drop(guard);
                self.discard_empty(key, &slot);
                return Err(e);
            }
        };
        *guard = Some(value.clone());
        Ok((value, Lookup::Miss))
    }

    /// The value for `key`, if it has been computed.
    ///
    /// Blocks while another thread is initializing that key.
    pub fn get(&self, key: &K) -> Option<V> {
        let slot = self.slots.lock().get(key).cloned()?;
        let guard = slot.lock();
        guard.clone()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot<V>> = self.slots.lock().values().cloned().collect();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove `key`'s slot if it is `slot`, still empty, and held only by the
    /// map and the caller.
    ///
    /// Handles are only cloned under the map lock, so the count cannot rise
    /// while we hold it.
    fn discard_empty(&self, key: &K, slot: &Slot<V>) {
        let mut slots = self.slots.lock();
        let unshared = slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && Arc::strong_count(slot) == 2);
        if unshared && slot.lock().is_none() {
            slots.remove(key);
        }
    }

    fn slot(&self, key: &K) -> Slot<V> {
        let mut slots = self.slots.lock();
        slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone()
    }
}
