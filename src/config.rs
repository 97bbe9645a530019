//! Engine configuration: parallelism and the resolver's name heuristics.

use serde::{Deserialize, Serialize};

/// Receiver-type / receiver-name suffixes treated as infrastructure that is
/// never part of the analyzed corpus.
pub const DEFAULT_FRAMEWORK_MARKERS: &[&str] = &[
    "Repository", "Optional", "List", "Map", "Set", "Stream", "Collection",
    "EntityManager", "JdbcTemplate",
];

/// Receivers whose calls are dropped without a node: logging facilities and
/// console streams.
pub const DEFAULT_NOOP_RECEIVERS: &[&str] = &[
    "log", "logger", "LOG", "LOGGER", "System.out", "System.err",
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Threads used to walk entry points. 1 = sequential, 0 = one per core.
    pub threads: usize,
    pub framework_markers: Vec<String>,
    pub noop_receivers: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            framework_markers: DEFAULT_FRAMEWORK_MARKERS.iter().map(|s| s.to_string()).collect(),
            noop_receivers: DEFAULT_NOOP_RECEIVERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EngineConfig {
    pub fn effective_threads(&self) -> usize {
        if self.threads > 0 {
            self.threads
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        }
    }
}
