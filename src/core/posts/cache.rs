//! Response cache for the list-posts read path
//!
//! Keyed by the optional display-date filter, bounded by TTL and capacity.
//! Any post mutation clears the whole cache; stale entries otherwise expire
//! lazily on the read that finds them, like the revocation store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use dashmap::DashMap;

use crate::core::db::models::PostResponse;

/// Cache entry lifetime
const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Maximum number of cached filter keys
const DEFAULT_CAPACITY: usize = 100;

struct CacheEntry {
    inserted_at: Instant,
    posts: Vec<PostResponse>,
}

/// TTL + capacity bounded cache of list responses
#[derive(Clone)]
pub struct PostsCache {
    entries: Arc<DashMap<Option<NaiveDate>, CacheEntry>>,
    ttl: Duration,
    capacity: usize,
}

impl PostsCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
            capacity,
        }
    }

    /// Cached response for the given filter, if still fresh. An expired
    /// entry is removed as a side effect.
    pub fn get(&self, key: &Option<NaiveDate>) -> Option<Vec<PostResponse>> {
        let entry = self.entries.get(key)?;
        if entry.inserted_at.elapsed() < self.ttl {
            return Some(entry.posts.clone());
        }
        drop(entry);

        self.entries
            .remove_if(key, |_, entry| entry.inserted_at.elapsed() >= self.ttl);
        None
    }

    /// Cache a response for the given filter, evicting the oldest entry if
    /// the capacity is reached.
    pub fn insert(&self, key: Option<NaiveDate>, posts: Vec<PostResponse>) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().inserted_at)
                .map(|entry| *entry.key());
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }

        self.entries.insert(
            key,
            CacheEntry {
                inserted_at: Instant::now(),
                posts,
            },
        );
    }

    /// Drop every cached response. Called on any post mutation.
    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PostsCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}
