//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::history::MemoryHistory;
use crate::routing::matcher::MatchOptions;

/// Root configuration for a route table.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Matching options and fallback route.
    pub options: OptionsConfig,

    /// History settings.
    pub history: HistoryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions, in match order.
    pub routes: Vec<RouteConfig>,
}

/// Table-wide matching options.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OptionsConfig {
    /// Require trailing slashes to agree with the pattern.
    pub strict: bool,

    /// Compare static segments case-sensitively.
    pub sensitive: bool,

    /// Name of the route activated when a path matches nothing.
    pub fallback: Option<String>,
}

impl OptionsConfig {
    pub fn matching(&self) -> MatchOptions {
        MatchOptions {
            strict: self.strict,
            sensitive: self.sensitive,
        }
    }
}

/// History configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Base path the application is served under (e.g. "/app/").
    pub base: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
        }
    }
}

impl HistoryConfig {
    pub fn memory_history(&self) -> MemoryHistory {
        MemoryHistory::with_base(&self.base)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Include the event target in log lines.
    pub with_target: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            with_target: false,
        }
    }
}

/// A single route binding.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Path pattern (e.g. "/", "/users/:id").
    pub path: String,

    /// Symbolic name used for programmatic navigation.
    pub name: String,

    /// Id of the view registered with the host.
    pub view: String,
}

impl RouteConfig {
    pub fn new(path: &str, name: &str, view: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view: view.to_string(),
        }
    }
}
