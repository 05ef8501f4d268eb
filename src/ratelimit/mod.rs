//! Rate Limiting Module
//!
//! Per-identity fixed-window request counting.
//!
//! ## Core Concepts
//! - **Window**: `window_index = floor(now / window_length)`. Counters reset hard at
//!   window boundaries; nothing carries over.
//! - **Admission**: A request is admitted while the counter for `(identity, window)` is
//!   below the cap, and the increment happens atomically with the check.
//! - **Eviction**: Counters for windows older than the retention horizon are dropped
//!   when the limiter first sees a new window.
//!
//! ## Submodules
//! - **`store`**: The `CounterStore` capability and its in-memory implementation.
//! - **`limiter`**: `RateLimiter`, the policy and the window arithmetic.
//! - **`middleware`**: Axum middleware gating a route group.

pub mod limiter;
pub mod middleware;
pub mod store;

pub use limiter::{RateLimitPolicy, RateLimiter};
pub use store::{CounterStore, Decision, MemoryCounterStore, WindowKey};
