//! Episode list cache
//!
//! The detail view already holds the full episode list of a title; the watch
//! view needs the same list to offer previous/next navigation. Instead of
//! re-fetching the detail on every episode switch, the list is kept here
//! keyed by the decoded detail page URL.
//!
//! Entries leave the cache when a viewer navigates away from the title
//! ([`EpisodeCache::evict`]) or when capacity is exceeded, oldest insertion
//! first.

use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::Episode;

/// Default number of titles kept
pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct Entries {
    lists: HashMap<String, Vec<Episode>>,
    /// Detail URLs, oldest insertion at the front
    order: VecDeque<String>,
}

impl Entries {
    fn remove(&mut self, detail_url: &str) -> Option<Vec<Episode>> {
        let removed = self.lists.remove(detail_url)?;
        self.order.retain(|url| url != detail_url);
        Some(removed)
    }
}

/// Bounded, concurrently shared cache of episode lists
#[derive(Debug)]
pub struct EpisodeCache {
    capacity: usize,
    entries: RwLock<Entries>,
}

impl Default for EpisodeCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EpisodeCache {
    /// Create a cache holding at most `capacity` titles (minimum one)
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: RwLock::new(Entries::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store the episode list of a title, replacing any previous one
    pub async fn insert(&self, detail_url: &str, episodes: Vec<Episode>) {
        let mut entries = self.entries.write().await;
        entries.remove(detail_url);

        while entries.order.len() >= self.capacity {
            match entries.order.pop_front() {
                Some(oldest) => {
                    debug!("Evicting episode list for {}", oldest);
                    entries.lists.remove(&oldest);
                }
                None => break,
            }
        }

        entries.order.push_back(detail_url.to_string());
        entries.lists.insert(detail_url.to_string(), episodes);
    }

    /// Episode list of a title, if cached
    pub async fn get(&self, detail_url: &str) -> Option<Vec<Episode>> {
        self.entries.read().await.lists.get(detail_url).cloned()
    }

    /// Drop the episode list of a title; returns whether one was cached
    pub async fn evict(&self, detail_url: &str) -> bool {
        self.entries.write().await.remove(detail_url).is_some()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.lists.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episodes(n: usize) -> Vec<Episode> {
        (1..=n)
            .rev()
            .map(|i| Episode {
                number: i.to_string(),
                url: format!("https://x.example/gintama-episode-{}/", i),
                ..Default::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = EpisodeCache::default();
        assert!(cache.is_empty().await);

        cache.insert("https://x.example/anime/gintama/", episodes(3)).await;
        let cached = cache.get("https://x.example/anime/gintama/").await.unwrap();
        assert_eq!(cached.len(), 3);
        assert_eq!(cached[0].number, "3");
        assert!(cache.get("https://x.example/anime/bleach/").await.is_none());
    }

    #[tokio::test]
    async fn test_evict() {
        let cache = EpisodeCache::default();
        cache.insert("a", episodes(1)).await;

        assert!(cache.evict("a").await);
        assert!(!cache.evict("a").await);
        assert!(cache.get("a").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest_insertion() {
        let cache = EpisodeCache::new(2);
        cache.insert("a", episodes(1)).await;
        cache.insert("b", episodes(2)).await;
        cache.insert("c", episodes(3)).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get("a").await.is_none());
        assert!(cache.get("b").await.is_some());
        assert!(cache.get("c").await.is_some());
    }

    #[tokio::test]
    async fn test_reinsert_refreshes_entry() {
        let cache = EpisodeCache::new(2);
        cache.insert("a", episodes(1)).await;
        cache.insert("b", episodes(1)).await;
        cache.insert("a", episodes(5)).await;
        cache.insert("c", episodes(1)).await;

        assert!(cache.get("b").await.is_none());
        assert_eq!(cache.get("a").await.unwrap().len(), 5);
        assert_eq!(cache.len().await, 2);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        assert_eq!(EpisodeCache::new(0).capacity(), 1);
        assert_eq!(EpisodeCache::default().capacity(), DEFAULT_CAPACITY);
    }
}
