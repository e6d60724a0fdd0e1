//! Pluggable 3D A* search.
//!
//! This crate provides the search engine for the types in `nav-types`:
//!
//! - [`AStarPathfinder`] - The engine, shared read-only across threads
//! - [`PathfindingSession`] - Mutable state of one search, stepped explicitly
//! - [`PathfindingTask`] - A search running on a worker thread (or already done)
//! - [`PathfinderFactory`] / [`PathfinderInitializer`] - Construction indirection
//! - [`PathfinderHook`] - Per-expansion observers
//! - [`path_utils`] - Interpolation, decimation, joining and trimming of results
//!
//! # Expanded-Position Tracking
//!
//! Positions that have been expanded are tracked per grid region (cubes of
//! `grid_cell_size` voxels). Each region answers membership with a bloom
//! filter first and only consults its exact key set when the filter reports
//! a possible hit, so the common "never seen" case stays cheap.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use nav_astar::AStarPathfinder;
//! use nav_spatial::Position;
//! use nav_types::{
//!     Connectivity, EnvironmentContext, NavigationPoint, PathfinderConfiguration, validators,
//! };
//!
//! // A floor at y = 0; everything below is solid.
//! let provider = |p: &Position, _: Option<&EnvironmentContext>| {
//!     if p.y() < 0.0 { NavigationPoint::BLOCKED } else { NavigationPoint::OPEN }
//! };
//!
//! let config = PathfinderConfiguration::new()
//!     .with_connectivity(Connectivity::HorizontalDiagonal10)
//!     .with_provider(Arc::new(provider))
//!     .with_validation_processor(validators::navigable());
//!
//! let pathfinder = AStarPathfinder::new(config);
//! let result = pathfinder
//!     .find_path(Position::new(0.0, 0.0, 0.0), Position::new(3.0, 0.0, 3.0))
//!     .unwrap();
//!
//! assert!(result.is_success());
//! assert_eq!(result.path().map(|p| p.len()), Some(4));
//! ```
//!
//! # Stepping
//!
//! ```
//! use nav_astar::AStarPathfinder;
//! use nav_spatial::Position;
//! use nav_types::PathfinderConfiguration;
//!
//! let pathfinder = AStarPathfinder::new(PathfinderConfiguration::new());
//! let mut session = pathfinder.begin(
//!     Position::new(0.0, 0.0, 0.0),
//!     Position::new(0.0, 0.0, 8.0),
//!     None,
//! );
//!
//! let result = loop {
//!     if let Some(result) = pathfinder.step(&mut session).unwrap() {
//!         break result;
//!     }
//!     assert!(session.iterations() <= 9);
//! };
//! assert!(result.is_success());
//! assert!(pathfinder.step(&mut session).is_err());
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Forwards serialization support to `nav-types`

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod astar;
mod bloom;
pub mod factory;
pub mod hooks;
mod heap;
mod node;
pub mod path_utils;
mod region;
pub mod session;

pub use astar::{ALGORITHM_NAME, AStarPathfinder, PathfindingTask};
pub use factory::{AStarPathfinderFactory, Pathfinder, PathfinderFactory, PathfinderInitializer};
pub use hooks::{PathfinderHook, PathfindingStep};
pub use session::PathfindingSession;
