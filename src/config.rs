//! Runtime configuration.
//!
//! Every setting is a command-line flag with an environment-variable fallback.

use crate::ratelimit::RateLimitPolicy;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FavoritesBackend {
    /// Durable SQLite file.
    Sqlite,
    /// Process-local; lost on restart.
    Memory,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "placefinder",
    about = "Postal-code lookup service for places in Nepal",
    version
)]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "PLACEFINDER_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Delimited file holding the place records.
    #[arg(long, env = "PLACEFINDER_DATASET", default_value = "PostalCodeNepal.csv", value_name = "path")]
    pub dataset: PathBuf,

    #[arg(long, env = "PLACEFINDER_FAVORITES_DB", default_value = "favorites.db", value_name = "path")]
    pub favorites_db: PathBuf,

    #[arg(long, env = "PLACEFINDER_FAVORITES_BACKEND", value_enum, default_value_t = FavoritesBackend::Sqlite)]
    pub favorites_backend: FavoritesBackend,

    #[arg(long, env = "PLACEFINDER_RATE_WINDOW", default_value_t = 60)]
    pub rate_limit_window_secs: u64,

    /// Requests admitted per caller per window.
    #[arg(long, env = "PLACEFINDER_RATE_MAX", default_value_t = 60)]
    pub rate_limit_max: u32,

    /// Windows, the current one included, whose counters are kept.
    #[arg(long, env = "PLACEFINDER_RATE_RETAIN", default_value_t = 2)]
    pub rate_limit_retain_windows: u64,

    /// Whether `/autocomplete` counts against the rate limit.
    #[arg(
        long,
        env = "PLACEFINDER_LIMIT_AUTOCOMPLETE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub limit_autocomplete: bool,

    #[arg(
        long,
        env = "PLACEFINDER_NOMINATIM_URL",
        default_value = "https://nominatim.openstreetmap.org/search"
    )]
    pub nominatim_url: String,

    #[arg(long, env = "PLACEFINDER_IP_API_URL", default_value = "http://ip-api.com/json")]
    pub ip_api_url: String,

    #[arg(
        long,
        env = "PLACEFINDER_WEATHER_URL",
        default_value = "https://api.open-meteo.com/v1/forecast"
    )]
    pub weather_url: String,

    /// Upper bound on every upstream call, in seconds.
    #[arg(long, env = "PLACEFINDER_UPSTREAM_TIMEOUT", default_value_t = 10)]
    pub upstream_timeout_secs: u64,

    #[arg(long, env = "PLACEFINDER_USER_AGENT", default_value = "PostalCodeFinderApp")]
    pub user_agent: String,
}

impl Config {
    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            window: Duration::from_secs(self.rate_limit_window_secs.max(1)),
            max_requests: self.rate_limit_max,
            retain_windows: self.rate_limit_retain_windows.max(1),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}
