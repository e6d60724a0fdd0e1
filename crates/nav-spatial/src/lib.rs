//! Spatial primitives for voxel-snapped 3D navigation.
//!
//! This crate provides the geometry layer shared by the navigation crates:
//!
//! - [`Position`] - Continuous world position whose identity is its voxel cell
//! - [`VoxelCoord`] - Integer voxel coordinates with packed `i64` keys
//! - [`perpendicular_distance`] - Point-to-line distance used by heuristics
//!
//! # Layer 0 Crate
//!
//! This crate has no dependency on the search engine or on any host world.
//! Everything here is plain value types and pure functions.
//!
//! # Voxel Identity
//!
//! A [`Position`] stores `f64` coordinates but compares and hashes on the
//! floored cell it lies in, so two positions inside the same unit cell are
//! the same key in maps and sets:
//!
//! ```
//! use nav_spatial::Position;
//!
//! let a = Position::new(0.1, 0.0, 0.0);
//! let b = Position::new(0.9, 0.0, 0.0);
//! assert_eq!(a, b);
//!
//! // Centered accessor snaps to the middle of the cell
//! assert_eq!(a.centered().x(), 0.5);
//! ```
//!
//! # Packed Keys
//!
//! Voxel coordinates pack into a single `i64` for use as hash keys in the
//! open set, closed set and region tables:
//!
//! ```
//! use nav_spatial::VoxelCoord;
//!
//! let coord = VoxelCoord::new(-3, 64, 1_000);
//! assert_eq!(VoxelCoord::unpack(coord.pack()), coord);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod position;
mod vector;
mod voxel;

pub use position::Position;
pub use vector::{DEGENERATE_LINE_EPSILON, perpendicular_distance, perpendicular_distance_squared};
pub use voxel::{HORIZONTAL_AXIS_BITS, VERTICAL_AXIS_BITS, VoxelCoord};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
