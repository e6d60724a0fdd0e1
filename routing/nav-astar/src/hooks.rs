//! Observers notified as the search expands nodes.

use nav_spatial::Position;

/// Snapshot of one expansion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathfindingStep {
    position: Position,
    depth: usize,
    iteration: usize,
}

impl PathfindingStep {
    /// Creates a step record.
    #[must_use]
    pub const fn new(position: Position, depth: usize, iteration: usize) -> Self {
        Self {
            position,
            depth,
            iteration,
        }
    }

    /// The position being expanded.
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Depth of the expanded node (start is 0).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The 1-based iteration that expanded this node.
    #[must_use]
    pub const fn iteration(&self) -> usize {
        self.iteration
    }
}

/// Receives a callback for every expanded node.
///
/// Hooks run on the searching thread, inline with the search loop. Keep
/// them cheap.
///
/// Closures taking `&PathfindingStep` implement this trait.
pub trait PathfinderHook: Send + Sync {
    /// Called once per expanded node.
    fn on_step(&self, step: &PathfindingStep);
}

impl<F> PathfinderHook for F
where
    F: Fn(&PathfindingStep) + Send + Sync,
{
    fn on_step(&self, step: &PathfindingStep) {
        self(step);
    }
}
