use super::store::{CounterStore, Decision, WindowKey};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_REQUESTS: u32 = 60;
pub const DEFAULT_RETAIN_WINDOWS: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub window: Duration,
    pub max_requests: u32,
    /// How many windows, the current one included, keep their counters.
    pub retain_windows: u64,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            max_requests: DEFAULT_MAX_REQUESTS,
            retain_windows: DEFAULT_RETAIN_WINDOWS,
        }
    }
}

impl RateLimitPolicy {
    pub fn window_secs(&self) -> u64 {
        self.window.as_secs().max(1)
    }
}

/// Gatekeeper shared by every rate-limited route.
pub struct RateLimiter {
    policy: RateLimitPolicy,
    store: Arc<dyn CounterStore>,
    /// Highest window observed so far; eviction runs when this advances.
    latest_window: AtomicU64,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy, store: Arc<dyn CounterStore>) -> Self {
        Self {
            policy,
            store,
            latest_window: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    pub fn store(&self) -> &Arc<dyn CounterStore> {
        &self.store
    }

    pub fn window_index(&self, now_secs: u64) -> u64 {
        now_secs / self.policy.window_secs()
    }

    /// Admits or denies one request for `identity` at `now_secs` (seconds since the epoch).
    pub fn check_and_increment(&self, identity: &str, now_secs: u64) -> Decision {
        let window = self.window_index(now_secs);
        self.evict_if_window_advanced(window);

        let key = WindowKey::new(identity, window);
        let decision = self.store.check_and_increment(&key, self.policy.max_requests);

        if decision == Decision::Deny {
            tracing::warn!(
                "Rate limit exceeded for {} in window {} ({} max)",
                identity,
                window,
                self.policy.max_requests
            );
        }
        decision
    }

    pub fn check_now(&self, identity: &str) -> Decision {
        self.check_and_increment(identity, unix_now_secs())
    }

    fn evict_if_window_advanced(&self, window: u64) {
        let previous = self.latest_window.fetch_max(window, Ordering::AcqRel);
        if window <= previous {
            return;
        }

        let retain = self.policy.retain_windows.max(1);
        let horizon = window.saturating_sub(retain - 1);
        let dropped = self.store.evict_before(horizon);
        if dropped > 0 {
            tracing::debug!("Evicted {} rate-limit counters older than window {}", dropped, horizon);
        }
    }
}

pub fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
