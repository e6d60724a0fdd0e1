//! Built-in cost processors.

use std::fmt;
use std::sync::Arc;

use crate::context::EvaluationContext;
use crate::cost::Cost;
use crate::processing::{CostProcessor, Processor, SharedCostProcessor};

/// A cost processor backed by a closure.
pub struct FnCost<F>(F);

impl<F> fmt::Debug for FnCost<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCost").finish_non_exhaustive()
    }
}

impl<F> Processor for FnCost<F> {}

impl<F> CostProcessor for FnCost<F>
where
    F: Fn(&EvaluationContext<'_>) -> Cost + Send + Sync,
{
    fn cost_contribution(&self, context: &EvaluationContext<'_>) -> Cost {
        (self.0)(context)
    }
}

/// Wraps a closure as a cost processor.
///
/// # Example
///
/// ```
/// use nav_types::{Cost, costs};
///
/// // Penalize climbing: one extra unit per block gained.
/// let climb = costs::from_fn(|ctx| {
///     let rise = ctx.previous().map_or(0.0, |p| ctx.current().y() - p.y());
///     Cost::of(rise.max(0.0)).unwrap_or(Cost::ZERO)
/// });
/// # let _ = climb;
/// ```
pub fn from_fn<F>(f: F) -> SharedCostProcessor
where
    F: Fn(&EvaluationContext<'_>) -> Cost + Send + Sync + 'static,
{
    Arc::new(FnCost(f))
}

struct Constant(Cost);

impl Processor for Constant {}

impl CostProcessor for Constant {
    fn cost_contribution(&self, _: &EvaluationContext<'_>) -> Cost {
        self.0
    }
}

/// Adds the same cost to every edge.
#[must_use]
pub fn constant(cost: Cost) -> SharedCostProcessor {
    Arc::new(Constant(cost))
}
