//! Engine configuration and validation.

use std::error::Error;
use std::fmt;

/// Configuration for an [`Engine`](crate::Engine).
///
/// There are no configuration files or environment variables: callers build
/// this struct directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of line worker threads. `Some(1)` (the default) traverses on
    /// the calling thread. `None` = auto-detect (`available_parallelism`,
    /// clamped to `[1, 16]`).
    pub worker_count: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: Some(1),
        }
    }
}

impl EngineConfig {
    /// A configuration using `n` workers.
    pub fn with_workers(n: usize) -> Self {
        Self {
            worker_count: Some(n),
        }
    }

    /// A configuration that sizes the pool from the host.
    pub fn auto() -> Self {
        Self { worker_count: None }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }

    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, 64),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .clamp(1, 16),
        }
    }
}

/// Errors detected while validating or applying an [`EngineConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `worker_count` was explicitly zero.
    ZeroWorkers,
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWorkers => write!(f, "worker_count must be at least 1"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}
