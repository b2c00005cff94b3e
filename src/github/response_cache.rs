//! Time-to-live cache of successful API responses.

use core::time::Duration;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

#[derive(Debug)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// Remembers successful responses by URL for a fixed time-to-live.
///
/// Expired entries are evicted lazily, when they are looked up.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn clear(&self) {
        self.entries.lock().expect("lock poisoned").clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<Value> {
        let mut entries = self.entries.lock().expect("lock poisoned");
        match entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                let _ = entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn insert_at(&self, key: impl Into<String>, value: Value, now: Instant) {
        let entry = CacheEntry {
            value,
            expires_at: now + self.ttl,
        };
        let _ = self.entries.lock().expect("lock poisoned").insert(key.into(), entry);
    }
}
