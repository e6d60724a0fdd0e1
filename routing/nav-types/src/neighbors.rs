//! Neighbor offset strategies.
//!
//! A neighbor strategy lists the offsets applied to a node's position to
//! produce its successors. Strategies may depend on the position, e.g. to
//! disallow vertical moves above a certain height.
//!
//! # Example
//!
//! ```
//! use nav_types::{Connectivity, NeighborStrategy};
//! use nav_spatial::Position;
//!
//! let strategy = Connectivity::Full26.strategy();
//! assert_eq!(strategy.offsets(&Position::new(0.0, 0.0, 0.0)).len(), 26);
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use nalgebra::Vector3;
use nav_spatial::Position;

/// Produces the successor offsets for a position.
pub trait NeighborStrategy: Send + Sync {
    /// Offsets to add to `position`, in the order successors are generated.
    fn offsets(&self, position: &Position) -> Cow<'_, [Vector3<f64>]>;
}

impl<F> NeighborStrategy for F
where
    F: Fn(&Position) -> Vec<Vector3<f64>> + Send + Sync,
{
    fn offsets(&self, position: &Position) -> Cow<'_, [Vector3<f64>]> {
        Cow::Owned(self(position))
    }
}

/// A position-independent list of offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborOffsets {
    offsets: Vec<Vector3<f64>>,
}

impl NeighborOffsets {
    /// Creates a strategy from an explicit offset list.
    #[must_use]
    pub fn new(offsets: Vec<Vector3<f64>>) -> Self {
        Self { offsets }
    }

    /// The six face neighbors: ±x, ±z, ±y.
    #[must_use]
    pub fn vertical_and_horizontal() -> Self {
        Self::new(vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
        ])
    }

    /// The six face neighbors plus the four horizontal (XZ) diagonals.
    #[must_use]
    pub fn horizontal_diagonal_and_vertical() -> Self {
        let mut offsets = Self::vertical_and_horizontal().offsets;
        offsets.extend([
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, -1.0),
            Vector3::new(-1.0, 0.0, 1.0),
            Vector3::new(-1.0, 0.0, -1.0),
        ]);
        Self::new(offsets)
    }

    /// All 26 neighbors of the surrounding 3×3×3 cube.
    #[must_use]
    pub fn diagonal_3d() -> Self {
        let mut offsets = Vec::with_capacity(26);
        for x in -1_i32..=1 {
            for y in -1_i32..=1 {
                for z in -1_i32..=1 {
                    if x == 0 && y == 0 && z == 0 {
                        continue;
                    }
                    offsets.push(Vector3::new(f64::from(x), f64::from(y), f64::from(z)));
                }
            }
        }
        Self::new(offsets)
    }

    /// Number of offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns `true` if there are no offsets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The offsets as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Vector3<f64>] {
        &self.offsets
    }
}

impl NeighborStrategy for NeighborOffsets {
    fn offsets(&self, _position: &Position) -> Cow<'_, [Vector3<f64>]> {
        Cow::Borrowed(&self.offsets)
    }
}

/// Built-in neighbor sets, selectable from plain-data settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Six face neighbors.
    #[default]
    Cardinal6,
    /// Six face neighbors plus four horizontal diagonals.
    HorizontalDiagonal10,
    /// Full 26-neighborhood.
    Full26,
}

impl Connectivity {
    /// Builds the offset list for this connectivity.
    #[must_use]
    pub fn offsets(self) -> NeighborOffsets {
        match self {
            Self::Cardinal6 => NeighborOffsets::vertical_and_horizontal(),
            Self::HorizontalDiagonal10 => NeighborOffsets::horizontal_diagonal_and_vertical(),
            Self::Full26 => NeighborOffsets::diagonal_3d(),
        }
    }

    /// Builds a shared strategy for this connectivity.
    #[must_use]
    pub fn strategy(self) -> Arc<dyn NeighborStrategy> {
        Arc::new(self.offsets())
    }

    /// Number of neighbors.
    #[must_use]
    pub const fn neighbor_count(self) -> usize {
        match self {
            Self::Cardinal6 => 6,
            Self::HorizontalDiagonal10 => 10,
            Self::Full26 => 26,
        }
    }
}
