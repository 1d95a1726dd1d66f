use lru::LruCache;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use crate::timeline::TimelineLayout;
use crate::types::{CacheKey, Commit, GroupBy, TimeScale};

/// Manages caching of computed layouts
pub struct LayoutCache {
    cache: LruCache<CacheKey, TimelineLayout>,
}

impl LayoutCache {
    /// Create a cache holding up to `capacity` layouts (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Store a layout in the cache
    pub fn store(&mut self, key: CacheKey, layout: TimelineLayout) {
        self.cache.put(key, layout);
    }

    /// Retrieve a layout from the cache
    pub fn get(&mut self, key: &CacheKey) -> Option<&TimelineLayout> {
        self.cache.get(key)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Build the cache key for a layout request.
///
/// Hashes every input the layout depends on, so a changed snapshot can never be
/// served a stale layout.
pub fn cache_key(
    commits: &[Commit],
    scale: TimeScale,
    group_by: GroupBy,
    highlighted: &HashSet<String>,
) -> CacheKey {
    // Layouts embed whole commits, so every field is part of the key.
    let mut hasher = DefaultHasher::new();
    commits.hash(&mut hasher);
    let data_hash = hasher.finish();

    let mut shas: Vec<&String> = highlighted.iter().collect();
    shas.sort();
    let mut hasher = DefaultHasher::new();
    shas.hash(&mut hasher);

    CacheKey {
        scale,
        group_by,
        data_hash,
        highlight_hash: hasher.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CommitAnalysis;
    use chrono::{TimeZone, Utc};

    fn commits() -> Vec<Commit> {
        vec![Commit {
            sha: "a1".to_string(),
            author: "ada".to_string(),
            author_url: String::new(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            message: "init".to_string(),
            description: None,
            url: String::new(),
            analyses: vec![CommitAnalysis::new("FEATURE")],
        }]
    }

    #[test]
    fn test_key_tracks_inputs() {
        let base = commits();
        let none = HashSet::new();
        let key = cache_key(&base, TimeScale::Month, GroupBy::Type, &none);
        assert_eq!(key, cache_key(&base, TimeScale::Month, GroupBy::Type, &none));

        let mut reclassified = base.clone();
        reclassified[0].analyses[0].kind = "BUG".to_string();
        assert_ne!(key, cache_key(&reclassified, TimeScale::Month, GroupBy::Type, &none));

        let mut retitled = base.clone();
        retitled[0].analyses[0].title = Some("Parser rewrite".to_string());
        assert_ne!(key, cache_key(&retitled, TimeScale::Month, GroupBy::Type, &none));

        let mut reworded = base.clone();
        reworded[0].message = "init repository".to_string();
        assert_ne!(key, cache_key(&reworded, TimeScale::Month, GroupBy::Type, &none));

        let highlighted: HashSet<String> = ["a1".to_string()].into();
        assert_ne!(key, cache_key(&base, TimeScale::Month, GroupBy::Type, &highlighted));
        assert_ne!(key, cache_key(&base, TimeScale::Year, GroupBy::Type, &none));
    }

    #[test]
    fn test_store_and_evict() {
        let mut cache = LayoutCache::new(1);
        let data = commits();
        let none = HashSet::new();
        let now = Utc::now();

        let month = cache_key(&data, TimeScale::Month, GroupBy::Type, &none);
        let layout = TimelineLayout::build(&data, TimeScale::Month, GroupBy::Type, &none, now);
        cache.store(month.clone(), layout.clone());
        assert_eq!(cache.get(&month), Some(&layout));

        let year = cache_key(&data, TimeScale::Year, GroupBy::Type, &none);
        cache.store(year.clone(), TimelineLayout::build(&data, TimeScale::Year, GroupBy::Type, &none, now));
        assert!(cache.get(&month).is_none());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_still_caches() {
        let mut cache = LayoutCache::new(0);
        let data = commits();
        let none = HashSet::new();
        let key = cache_key(&data, TimeScale::Day, GroupBy::Author, &none);
        cache.store(
            key.clone(),
            TimelineLayout::build(&data, TimeScale::Day, GroupBy::Author, &none, Utc::now()),
        );
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key).is_some());
    }
}
