//! Search outcomes and statistics.
//!
//! # Example
//!
//! ```
//! use nav_types::{Path, PathState, PathfinderResult, SearchStats};
//! use nav_spatial::Position;
//!
//! let result = PathfinderResult::new(
//!     PathState::Succeeded,
//!     Some(Path::single(Position::new(0.0, 0.0, 0.0))),
//!     0.0,
//!     SearchStats::new("A*").with_iterations(1),
//! );
//! assert!(result.is_success());
//! assert_eq!(result.path().map(Path::len), Some(1));
//! ```

use std::fmt;
use std::time::Duration;

use crate::path::Path;

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathState {
    /// The target was reached.
    Succeeded,
    /// The open set ran empty before reaching the target.
    Exhausted,
    /// The iteration cap was exceeded.
    IterationLimit,
    /// A node at the depth cap was extracted.
    LengthLimit,
}

impl PathState {
    /// Returns `true` for [`PathState::Succeeded`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns `true` if a configured limit stopped the search.
    #[must_use]
    pub const fn is_limit(self) -> bool {
        matches!(self, Self::IterationLimit | Self::LengthLimit)
    }
}

impl fmt::Display for PathState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Succeeded => "succeeded",
            Self::Exhausted => "exhausted",
            Self::IterationLimit => "iteration limit reached",
            Self::LengthLimit => "length limit reached",
        };
        f.write_str(text)
    }
}

/// Statistics about one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    iterations: usize,
    nodes_expanded: usize,
    open_set_size: usize,
    time_elapsed: Duration,
    algorithm: String,
}

impl SearchStats {
    /// Creates empty statistics for the named algorithm.
    #[must_use]
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            iterations: 0,
            nodes_expanded: 0,
            open_set_size: 0,
            time_elapsed: Duration::ZERO,
            algorithm: algorithm.into(),
        }
    }

    /// Sets the number of main-loop iterations.
    #[must_use]
    pub const fn with_iterations(mut self, count: usize) -> Self {
        self.iterations = count;
        self
    }

    /// Sets the number of expanded nodes.
    #[must_use]
    pub const fn with_nodes_expanded(mut self, count: usize) -> Self {
        self.nodes_expanded = count;
        self
    }

    /// Sets the open set size at termination.
    #[must_use]
    pub const fn with_open_set_size(mut self, size: usize) -> Self {
        self.open_set_size = size;
        self
    }

    /// Sets the wall-clock time spent searching.
    #[must_use]
    pub const fn with_elapsed(mut self, duration: Duration) -> Self {
        self.time_elapsed = duration;
        self
    }

    /// Main-loop iterations, including the terminating one.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Nodes expanded (moved to the closed set).
    #[must_use]
    pub const fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    /// Open set size at termination.
    #[must_use]
    pub const fn open_set_size(&self) -> usize {
        self.open_set_size
    }

    /// Wall-clock time spent searching.
    #[must_use]
    pub const fn time_elapsed(&self) -> Duration {
        self.time_elapsed
    }

    /// Algorithm name.
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }
}

/// The result of a search.
///
/// On success `path` runs from start to target. On any other outcome it is
/// the fallback path (if fallback is enabled and a node was expanded) or
/// `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathfinderResult {
    state: PathState,
    path: Option<Path>,
    cost: f64,
    stats: SearchStats,
}

impl PathfinderResult {
    /// Creates a result.
    #[must_use]
    pub const fn new(state: PathState, path: Option<Path>, cost: f64, stats: SearchStats) -> Self {
        Self {
            state,
            path,
            cost,
            stats,
        }
    }

    /// How the search ended.
    #[must_use]
    pub const fn state(&self) -> PathState {
        self.state
    }

    /// Returns `true` if the target was reached.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.state.is_success()
    }

    /// The returned path, if any.
    #[must_use]
    pub const fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Consumes the result, returning the path.
    #[must_use]
    pub fn into_path(self) -> Option<Path> {
        self.path
    }

    /// Accumulated cost (g) of the path's last node; `0.0` without a path.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Search statistics.
    #[must_use]
    pub const fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
