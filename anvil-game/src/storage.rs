//! Key-value storage capability and the integer counter helpers built on it.
//!
//! The browser's `localStorage` is one implementation (in `anvil-web`);
//! [`MemoryStore`] is the in-process one used by tests and the tester CLI.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Flat string storage keyed by fixed strings.
///
/// Writes are last-write-wins and infallible from the caller's view;
/// backends that can fail log and drop the write.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// Shared in-memory store. Clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Read an integer counter, treating missing or non-numeric values as 0.
#[must_use]
pub fn get_count(store: &impl KeyValueStore, key: &str) -> i64 {
    store
        .get(key)
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

pub fn set_count(store: &impl KeyValueStore, key: &str, value: i64) {
    store.set(key, &value.to_string());
}

/// Increment a counter by one and return the new total.
pub fn add_one(store: &impl KeyValueStore, key: &str) -> i64 {
    let next = get_count(store, key).saturating_add(1);
    set_count(store, key, next);
    next
}
