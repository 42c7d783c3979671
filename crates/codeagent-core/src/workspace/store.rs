//! Workspace cache and clone rate limiter.

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError, RwLock},
    time::{Duration, Instant},
};

/// Time source.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// System monotonic clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset += duration;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cache key: repository URL and branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkspaceKey {
    pub url: String,
    pub branch: String,
}

impl WorkspaceKey {
    pub fn new(url: &str, branch: &str) -> Self {
        Self {
            url: url.into(),
            branch: branch.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    path: PathBuf,
    updated_at: Instant,
    valid: bool,
}

/// Shared store for cached working copies and last clone times.
pub trait WorkspaceStore: Send + Sync {
    /// Get a valid cached path.
    ///
    /// An entry is valid when present, marked valid, younger than the TTL and still on disk.
    /// An invalid entry is dropped from the cache.
    fn cache_get(&self, key: &WorkspaceKey) -> Option<PathBuf>;
    /// Store a freshly cloned path.
    fn cache_put(&self, key: WorkspaceKey, path: PathBuf);
    /// Mark an entry as invalid, returning its path.
    fn cache_invalidate(&self, key: &WorkspaceKey) -> Option<PathBuf>;
    /// Remove every entry, returning their paths.
    fn cache_clear(&self) -> Vec<PathBuf>;
    /// Remove expired or invalid entries, returning their paths.
    fn purge_expired(&self) -> Vec<PathBuf>;
    /// Record a clone attempt for `url` unless one happened within the interval.
    ///
    /// On refusal, returns the remaining wait time.
    fn try_record_clone(&self, url: &str) -> Result<(), Duration>;
}

/// In-memory workspace store.
pub struct MemoryWorkspaceStore {
    ttl: Duration,
    clone_interval: Duration,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<WorkspaceKey, CacheEntry>>,
    clones: RwLock<HashMap<String, Instant>>,
}

impl MemoryWorkspaceStore {
    pub fn new(ttl: Duration, clone_interval: Duration) -> Self {
        Self::with_clock(ttl, clone_interval, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clone_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clone_interval,
            clock,
            entries: RwLock::new(HashMap::new()),
            clones: RwLock::new(HashMap::new()),
        }
    }

    fn is_usable(&self, entry: &CacheEntry, now: Instant) -> bool {
        entry.valid
            && now.saturating_duration_since(entry.updated_at) < self.ttl
            && entry.path.exists()
    }
}

impl WorkspaceStore for MemoryWorkspaceStore {
    fn cache_get(&self, key: &WorkspaceKey) -> Option<PathBuf> {
        let now = self.clock.now();
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(key) {
                None => return None,
                Some(entry) if self.is_usable(entry, now) => return Some(entry.path.clone()),
                Some(_) => (),
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Checked again, another writer may have refreshed it
        if let Some(entry) = entries.get(key) {
            if self.is_usable(entry, now) {
                return Some(entry.path.clone());
            }
        }
        entries.remove(key);
        None
    }

    fn cache_put(&self, key: WorkspaceKey, path: PathBuf) {
        let entry = CacheEntry {
            path,
            updated_at: self.clock.now(),
            valid: true,
        };

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
    }

    fn cache_invalidate(&self, key: &WorkspaceKey) -> Option<PathBuf> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.get_mut(key).map(|entry| {
            entry.valid = false;
            entry.path.clone()
        })
    }

    fn cache_clear(&self) -> Vec<PathBuf> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .map(|(_, entry)| entry.path)
            .collect()
    }

    fn purge_expired(&self) -> Vec<PathBuf> {
        let now = self.clock.now();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let expired: Vec<WorkspaceKey> = entries
            .iter()
            .filter(|(_, entry)| {
                !entry.valid || now.saturating_duration_since(entry.updated_at) >= self.ttl
            })
            .map(|(key, _)| key.clone())
            .collect();

        expired
            .iter()
            .filter_map(|key| entries.remove(key))
            .map(|entry| entry.path)
            .collect()
    }

    fn try_record_clone(&self, url: &str) -> Result<(), Duration> {
        let now = self.clock.now();
        let mut clones = self.clones.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(last) = clones.get(url) {
            let elapsed = now.saturating_duration_since(*last);
            if elapsed < self.clone_interval {
                return Err(self.clone_interval - elapsed);
            }
        }

        clones.insert(url.to_string(), now);
        Ok(())
    }
}
