//! Detection cache — memoizes merged results per (document, version).
//!
//! Bounded by distinct document count, evicting the oldest-inserted
//! document regardless of recent access. That is deliberately not LRU: a
//! hot document inserted first is still evicted first. The policy is a
//! known staleness trade-off and is pinned by a regression test rather
//! than silently upgraded.
//!
//! All operations take a single internal lock, so concurrent analyses of
//! different documents cannot corrupt the bounded map.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use baseline_core::FxHashMap;

use crate::types::DetectedFeature;

type CacheKey = (String, i32);

struct CacheState {
    entries: FxHashMap<CacheKey, Vec<DetectedFeature>>,
    /// Document ids in insertion order; front is oldest.
    insertion_order: VecDeque<String>,
}

/// Capacity-bounded map of (document id, version) → merged detections.
pub struct DetectionCache {
    state: Mutex<CacheState>,
    capacity: usize,
}

impl DetectionCache {
    /// Create a cache bounded to `capacity` distinct documents.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: FxHashMap::default(),
                insertion_order: VecDeque::new(),
            }),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // A panic while holding the lock leaves only per-document data
        // behind; recovering the poisoned state is safe.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Cached detections for a (document, version), if present.
    pub fn get(&self, document_id: &str, version: i32) -> Option<Vec<DetectedFeature>> {
        let state = self.lock();
        state
            .entries
            .get(&(document_id.to_string(), version))
            .cloned()
    }

    /// Store detections for a (document, version). A new version of an
    /// already-cached document adds a new entry; the old version is only
    /// reclaimed by capacity eviction.
    pub fn insert(&self, document_id: &str, version: i32, detections: Vec<DetectedFeature>) {
        let mut state = self.lock();
        let key = (document_id.to_string(), version);
        let already_tracked = state.insertion_order.iter().any(|d| d == document_id);
        state.entries.insert(key, detections);
        if !already_tracked {
            state.insertion_order.push_back(document_id.to_string());
        }

        while state.insertion_order.len() > self.capacity {
            if let Some(oldest) = state.insertion_order.pop_front() {
                state.entries.retain(|(doc, _), _| doc != &oldest);
            }
        }
    }

    /// Drop every cached version of one document.
    pub fn evict_document(&self, document_id: &str) {
        let mut state = self.lock();
        state.entries.retain(|(doc, _), _| doc != document_id);
        state.insertion_order.retain(|doc| doc != document_id);
    }

    /// Drop everything.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.insertion_order.clear();
    }

    /// Number of cached (document, version) entries.
    pub fn entry_count(&self) -> usize {
        self.lock().entries.len()
    }

    /// Number of distinct documents currently tracked.
    pub fn document_count(&self) -> usize {
        self.lock().insertion_order.len()
    }
}
