//! Domain types and extension traits for 3D A* navigation.
//!
//! This crate holds everything a search is configured with and everything
//! it produces. The engine itself lives in `nav-astar`.
//!
//! # Overview
//!
//! - **Costs**: validated edge contributions ([`Cost`])
//! - **Heuristics**: weighted distance estimates and transition costs
//!   ([`HeuristicStrategy`], [`LinearHeuristic`], [`SquaredHeuristic`])
//! - **Neighbors**: successor offsets ([`NeighborStrategy`], [`Connectivity`])
//! - **World queries**: [`NavigationPointProvider`] and the opaque
//!   [`EnvironmentContext`]
//! - **Processors**: per-edge validation and cost pipelines
//!   ([`ValidationProcessor`], [`CostProcessor`], [`validators`], [`costs`])
//! - **Contexts**: [`SearchContext`] per search, [`EvaluationContext`] per edge
//! - **Configuration**: [`PathfinderConfiguration`] and the serializable
//!   [`PathfinderSettings`]
//! - **Results**: [`Path`], [`PathState`], [`PathfinderResult`], [`SearchStats`]
//!
//! # Example
//!
//! ```
//! use nav_types::{
//!     Connectivity, Cost, HeuristicWeights, PathfinderConfiguration, costs, validators,
//! };
//!
//! let config = PathfinderConfiguration::new()
//!     .with_connectivity(Connectivity::HorizontalDiagonal10)
//!     .with_heuristic_weights(HeuristicWeights::DEFAULT.with_height(0.25))
//!     .with_validation_processor(validators::navigable())
//!     .with_cost_processor(costs::constant(Cost::of(0.1).unwrap()));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.validation_processors().len(), 1);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization for settings, weights, states and paths

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod cost;
pub mod costs;
pub mod error;
pub mod heuristic;
pub mod navigation;
pub mod neighbors;
pub mod path;
pub mod processing;
pub mod result;
pub mod validators;

pub use config::{PathfinderConfiguration, PathfinderSettings};
pub use context::{EvaluationContext, SearchContext, SharedData};
pub use cost::Cost;
pub use error::PathfindingError;
pub use heuristic::{
    HeuristicContext, HeuristicKind, HeuristicStrategy, HeuristicWeights, LinearHeuristic,
    SquaredHeuristic,
};
pub use navigation::{EnvironmentContext, NavigationPoint, NavigationPointProvider, OpenSpaceProvider};
pub use neighbors::{Connectivity, NeighborOffsets, NeighborStrategy};
pub use path::Path;
pub use processing::{CostProcessor, Processor, SharedCostProcessor, SharedValidator, ValidationProcessor};
pub use result::{PathState, PathfinderResult, SearchStats};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_shared_types_are_thread_safe() {
        assert_send_sync::<PathfinderConfiguration>();
        assert_send_sync::<Arc<dyn HeuristicStrategy>>();
        assert_send_sync::<SharedValidator>();
        assert_send_sync::<SharedCostProcessor>();
        assert_send_sync::<EnvironmentContext>();
        assert_send_sync::<PathfinderResult>();
    }

    #[test]
    fn test_search_context_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SearchContext>();
    }
}
