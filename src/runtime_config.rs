//! Environment variable-based runtime configuration.
//!
//! ## Environment Variables
//!
//! ### `WAYFINDER_ROUTE_CACHE_CAPACITY`
//!
//! Bound on the resolution cache (entries, LRU-evicted). Accepts decimal
//! (`2048`) or hexadecimal (`0x800`) values. Default: `1024`.
//!
//! Each entry memoizes one `(method, path)` pair, so the right bound depends
//! on the cardinality of concrete paths your traffic produces: a handful of
//! literal routes needs almost nothing, while variable-heavy APIs see one
//! entry per distinct id that repeats within the eviction window.

use std::env;

/// Default resolution cache capacity (entries).
pub const DEFAULT_ROUTE_CACHE_CAPACITY: usize = 1024;

/// Runtime configuration loaded from environment variables.
///
/// Load this at startup with [`RuntimeConfig::from_env()`], or build one
/// directly in tests for explicit control.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Bound on the `(method, path)` resolution cache.
    pub route_cache_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            route_cache_capacity: DEFAULT_ROUTE_CACHE_CAPACITY,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for unset or unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        let route_cache_capacity = match env::var("WAYFINDER_ROUTE_CACHE_CAPACITY") {
            Ok(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(DEFAULT_ROUTE_CACHE_CAPACITY)
                } else {
                    val.parse().unwrap_or(DEFAULT_ROUTE_CACHE_CAPACITY)
                }
            }
            Err(_) => DEFAULT_ROUTE_CACHE_CAPACITY,
        };
        RuntimeConfig {
            route_cache_capacity,
        }
    }
}
