use dashmap::DashMap;

/// Identifies one counter: a caller within one window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowKey {
    pub identity: String,
    pub window: u64,
}

impl WindowKey {
    pub fn new(identity: &str, window: u64) -> Self {
        Self {
            identity: identity.to_string(),
            window,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Admitted; `count` is the counter value after the increment.
    Allow { count: u32 },
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }
}

/// Storage for window counters.
///
/// Implementations must make `check_and_increment` atomic per key: two concurrent
/// calls at the cap boundary may not both be admitted.
pub trait CounterStore: Send + Sync {
    /// Reads the counter (0 if absent); denies without incrementing at `cap`, else increments.
    fn check_and_increment(&self, key: &WindowKey, cap: u32) -> Decision;

    fn count(&self, key: &WindowKey) -> u32;

    /// Drops every counter whose window is strictly below `window`. Returns how many were dropped.
    fn evict_before(&self, window: u64) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local counter store.
#[derive(Default)]
pub struct MemoryCounterStore {
    counters: DashMap<WindowKey, u32>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryCounterStore {
    fn check_and_increment(&self, key: &WindowKey, cap: u32) -> Decision {
        // The entry guard holds the shard lock across the read and the write.
        let mut counter = self.counters.entry(key.clone()).or_insert(0);
        if *counter >= cap {
            return Decision::Deny;
        }
        *counter += 1;
        Decision::Allow { count: *counter }
    }

    fn count(&self, key: &WindowKey) -> u32 {
        self.counters.get(key).map(|c| *c).unwrap_or(0)
    }

    fn evict_before(&self, window: u64) -> usize {
        let mut dropped = 0;
        self.counters.retain(|key, _| {
            let keep = key.window >= window;
            if !keep {
                dropped += 1;
            }
            keep
        });
        dropped
    }

    fn len(&self) -> usize {
        self.counters.len()
    }
}
