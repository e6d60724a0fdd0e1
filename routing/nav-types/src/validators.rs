//! Built-in validators and validator combinators.
//!
//! Combinators forward the lifecycle hooks to all of their children, so a
//! stateful validator nested inside [`all_of`] is initialized and finalized
//! exactly like a top-level one.
//!
//! # Example
//!
//! ```
//! use nav_types::validators::{all_of, from_fn, navigable, not};
//!
//! let below_ceiling = from_fn(|ctx| ctx.current().y() < 64.0);
//! let in_water = from_fn(|ctx| {
//!     ctx.provider()
//!         .navigation_point(ctx.current(), ctx.environment())
//!         .liquid
//! });
//! let walkable = all_of([navigable(), below_ceiling, not(in_water)]);
//! # let _ = walkable;
//! ```

use std::fmt;
use std::sync::Arc;

use crate::context::{EvaluationContext, SearchContext};
use crate::processing::{Processor, SharedValidator, ValidationProcessor};

struct AllOf(Vec<SharedValidator>);
struct AnyOf(Vec<SharedValidator>);
struct NoneOf(Vec<SharedValidator>);
struct Not(SharedValidator);

fn initialize_children(children: &[SharedValidator], context: &SearchContext) {
    for child in children {
        child.initialize_search(context);
    }
}

fn finalize_children(children: &[SharedValidator], context: &SearchContext) {
    for child in children {
        child.finalize_search(context);
    }
}

macro_rules! composite_lifecycle {
    ($ty:ident) => {
        impl Processor for $ty {
            fn initialize_search(&self, context: &SearchContext) {
                initialize_children(&self.0, context);
            }

            fn finalize_search(&self, context: &SearchContext) {
                finalize_children(&self.0, context);
            }
        }
    };
}

composite_lifecycle!(AllOf);
composite_lifecycle!(AnyOf);
composite_lifecycle!(NoneOf);

impl ValidationProcessor for AllOf {
    fn is_valid(&self, context: &EvaluationContext<'_>) -> bool {
        self.0.iter().all(|v| v.is_valid(context))
    }
}

impl ValidationProcessor for AnyOf {
    fn is_valid(&self, context: &EvaluationContext<'_>) -> bool {
        self.0.iter().any(|v| v.is_valid(context))
    }
}

impl ValidationProcessor for NoneOf {
    fn is_valid(&self, context: &EvaluationContext<'_>) -> bool {
        !self.0.iter().any(|v| v.is_valid(context))
    }
}

impl Processor for Not {
    fn initialize_search(&self, context: &SearchContext) {
        self.0.initialize_search(context);
    }

    fn finalize_search(&self, context: &SearchContext) {
        self.0.finalize_search(context);
    }
}

impl ValidationProcessor for Not {
    fn is_valid(&self, context: &EvaluationContext<'_>) -> bool {
        !self.0.is_valid(context)
    }
}

/// Accepts when every child accepts. An empty list accepts everything.
pub fn all_of(validators: impl IntoIterator<Item = SharedValidator>) -> SharedValidator {
    Arc::new(AllOf(validators.into_iter().collect()))
}

/// Accepts when at least one child accepts. An empty list rejects everything.
pub fn any_of(validators: impl IntoIterator<Item = SharedValidator>) -> SharedValidator {
    Arc::new(AnyOf(validators.into_iter().collect()))
}

/// Accepts when no child accepts. An empty list accepts everything.
pub fn none_of(validators: impl IntoIterator<Item = SharedValidator>) -> SharedValidator {
    Arc::new(NoneOf(validators.into_iter().collect()))
}

/// Inverts a validator.
pub fn not(validator: SharedValidator) -> SharedValidator {
    Arc::new(Not(validator))
}

struct Constant(bool);

impl Processor for Constant {}

impl ValidationProcessor for Constant {
    fn is_valid(&self, _: &EvaluationContext<'_>) -> bool {
        self.0
    }
}

/// Accepts everything.
#[must_use]
pub fn always_true() -> SharedValidator {
    Arc::new(Constant(true))
}

/// Rejects everything.
#[must_use]
pub fn always_false() -> SharedValidator {
    Arc::new(Constant(false))
}

/// A validator backed by a closure.
pub struct FnValidator<F>(F);

impl<F> fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").finish_non_exhaustive()
    }
}

impl<F> Processor for FnValidator<F> {}

impl<F> ValidationProcessor for FnValidator<F>
where
    F: Fn(&EvaluationContext<'_>) -> bool + Send + Sync,
{
    fn is_valid(&self, context: &EvaluationContext<'_>) -> bool {
        (self.0)(context)
    }
}

/// Wraps a closure as a validator.
pub fn from_fn<F>(f: F) -> SharedValidator
where
    F: Fn(&EvaluationContext<'_>) -> bool + Send + Sync + 'static,
{
    Arc::new(FnValidator(f))
}

struct Navigable;

impl Processor for Navigable {}

impl ValidationProcessor for Navigable {
    fn is_valid(&self, context: &EvaluationContext<'_>) -> bool {
        context
            .provider()
            .navigation_point(context.current(), context.environment())
            .traversable
    }
}

/// Rejects candidates the configured provider reports as not traversable.
///
/// This is the only place the engine's built-ins consult the provider; add
/// it to the validator list to make the search respect world geometry.
#[must_use]
pub fn navigable() -> SharedValidator {
    Arc::new(Navigable)
}
