//! Cost and validation processor traits.
//!
//! Processors are the extension point of the search. For every candidate
//! edge the engine runs the configured validators in order (stopping at the
//! first rejection), then sums the contributions of all cost processors on
//! top of the heuristic strategy's base transition cost.
//!
//! Both kinds share a [`Processor`] lifecycle: `initialize_search` runs once
//! before the first expansion and `finalize_search` once after the search
//! ends, whatever the outcome.

use std::sync::Arc;

use crate::context::{EvaluationContext, SearchContext};
use crate::cost::Cost;

/// Lifecycle hooks shared by every processor.
pub trait Processor {
    /// Called once before the search starts.
    fn initialize_search(&self, _context: &SearchContext) {}

    /// Called once after the search ends.
    fn finalize_search(&self, _context: &SearchContext) {}
}

/// Decides whether a candidate edge may be taken.
pub trait ValidationProcessor: Processor + Send + Sync {
    /// Returns `false` to reject the candidate.
    fn is_valid(&self, context: &EvaluationContext<'_>) -> bool;
}

/// Adds a non-negative cost to a candidate edge.
pub trait CostProcessor: Processor + Send + Sync {
    /// The contribution of this processor to the edge cost.
    fn cost_contribution(&self, context: &EvaluationContext<'_>) -> Cost;
}

/// A validator shared between configurations and threads.
pub type SharedValidator = Arc<dyn ValidationProcessor>;

/// A cost processor shared between configurations and threads.
pub type SharedCostProcessor = Arc<dyn CostProcessor>;

/// Runs `initialize_search` on every processor in order.
pub fn initialize_all(
    validators: &[SharedValidator],
    costs: &[SharedCostProcessor],
    context: &SearchContext,
) {
    for validator in validators {
        validator.initialize_search(context);
    }
    for processor in costs {
        processor.initialize_search(context);
    }
}

/// Runs `finalize_search` on every processor in order.
pub fn finalize_all(
    validators: &[SharedValidator],
    costs: &[SharedCostProcessor],
    context: &SearchContext,
) {
    for validator in validators {
        validator.finalize_search(context);
    }
    for processor in costs {
        processor.finalize_search(context);
    }
}

/// Returns `true` if every validator accepts the context.
///
/// Stops at the first rejection; an empty list accepts everything.
#[must_use]
pub fn validate_all(validators: &[SharedValidator], context: &EvaluationContext<'_>) -> bool {
    validators.iter().all(|v| v.is_valid(context))
}

/// Sums the contributions of every cost processor.
#[must_use]
pub fn total_contribution(costs: &[SharedCostProcessor], context: &EvaluationContext<'_>) -> Cost {
    costs.iter().map(|p| p.cost_contribution(context)).sum()
}
