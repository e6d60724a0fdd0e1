//! Error types for pathfinding operations.
//!
//! This module defines the [`PathfindingError`] enum which covers invalid
//! costs, broken heuristic strategies, misuse of the search lifecycle and
//! invalid arguments to configuration and path utilities.
//!
//! Running out of iterations or path length is *not* an error: those are
//! ordinary search outcomes reported through the result state.

/// Errors that can occur during pathfinding and path post-processing.
///
/// # Example
///
/// ```
/// use nav_types::PathfindingError;
///
/// let error = PathfindingError::InvalidCost(-1.0);
/// assert!(error.to_string().contains("invalid cost"));
/// assert!(!error.is_fatal());
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PathfindingError {
    /// A cost value was NaN or negative.
    ///
    /// Raised by [`crate::Cost::of`]. Cost processors are expected to only
    /// hand valid costs to the engine, so this is handled at the call site.
    #[error("invalid cost {0}: must be a non-negative number")]
    InvalidCost(f64),

    /// A heuristic strategy produced a NaN or infinite transition cost.
    ///
    /// The search is aborted; the strategy is broken and retrying cannot help.
    #[error("heuristic transition cost produced an invalid numeric value: {0}")]
    InvalidTransitionCost(f64),

    /// An engine operation ran without an active search session.
    ///
    /// This happens when a finished session is stepped again.
    #[error("no active pathfinding session")]
    NoActiveSession,

    /// An invalid configuration parameter was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An invalid argument was passed to a path operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A path was built from an empty list of positions.
    #[error("cannot build a path from an empty position list")]
    EmptyPath,

    /// A background search thread panicked before producing a result.
    #[error("pathfinding worker panicked")]
    WorkerPanicked,
}

impl PathfindingError {
    /// Creates an invalid configuration error with the given message.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_types::PathfindingError;
    ///
    /// let error = PathfindingError::invalid_config("grid cell size must be positive");
    /// assert!(error.to_string().contains("grid cell size"));
    /// ```
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Creates an invalid argument error with the given message.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns `true` for errors that signal a programming or strategy bug
    /// rather than bad input.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransitionCost(_) | Self::NoActiveSession | Self::WorkerPanicked
        )
    }
}
