//! Heuristic strategies for A* search.
//!
//! A heuristic strategy answers two questions: how far a node is estimated
//! to be from the target ([`HeuristicStrategy::heuristic`]) and what the base
//! cost of moving between two adjacent positions is
//! ([`HeuristicStrategy::transition_cost`]).
//!
//! The estimate is a weighted sum of four distance components measured on
//! floored voxel coordinates:
//!
//! | Component | Formula |
//! |-----------|---------|
//! | Manhattan | `|dx| + |dy| + |dz|` |
//! | Octile | `(√3−√2)·min + (√2−1)·mid + max` |
//! | Perpendicular | distance to the start→target line |
//! | Height | `|dy|` |
//!
//! # Example
//!
//! ```
//! use nav_types::{HeuristicContext, HeuristicStrategy, HeuristicWeights, LinearHeuristic};
//! use nav_spatial::Position;
//!
//! let start = Position::new(0.0, 0.0, 0.0);
//! let target = Position::new(3.0, 0.0, 4.0);
//! let context = HeuristicContext::new(start, start, target, HeuristicWeights::MANHATTAN);
//!
//! assert!((LinearHeuristic.heuristic(&context) - 7.0).abs() < 1e-12);
//! ```

use std::f64::consts::SQRT_2;

use nav_spatial::{Position, VoxelCoord, perpendicular_distance, perpendicular_distance_squared};

use crate::error::PathfindingError;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Weights applied to each heuristic distance component.
///
/// # Example
///
/// ```
/// use nav_types::HeuristicWeights;
///
/// let weights = HeuristicWeights::default().with_height(0.5);
/// assert_eq!(weights.octile(), 1.0);
/// assert_eq!(weights.height(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeuristicWeights {
    manhattan: f64,
    octile: f64,
    perpendicular: f64,
    height: f64,
}

impl HeuristicWeights {
    /// Octile distance only. This is the default.
    pub const DEFAULT: Self = Self::new(0.0, 1.0, 0.0, 0.0);

    /// Manhattan distance only.
    pub const MANHATTAN: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// All components zero: the search degrades to Dijkstra.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates weights for manhattan, octile, perpendicular and height.
    #[must_use]
    pub const fn new(manhattan: f64, octile: f64, perpendicular: f64, height: f64) -> Self {
        Self {
            manhattan,
            octile,
            perpendicular,
            height,
        }
    }

    /// Sets the manhattan weight.
    #[must_use]
    pub const fn with_manhattan(mut self, weight: f64) -> Self {
        self.manhattan = weight;
        self
    }

    /// Sets the octile weight.
    #[must_use]
    pub const fn with_octile(mut self, weight: f64) -> Self {
        self.octile = weight;
        self
    }

    /// Sets the perpendicular weight.
    #[must_use]
    pub const fn with_perpendicular(mut self, weight: f64) -> Self {
        self.perpendicular = weight;
        self
    }

    /// Sets the height weight.
    #[must_use]
    pub const fn with_height(mut self, weight: f64) -> Self {
        self.height = weight;
        self
    }

    /// Manhattan weight.
    #[must_use]
    pub const fn manhattan(&self) -> f64 {
        self.manhattan
    }

    /// Octile weight.
    #[must_use]
    pub const fn octile(&self) -> f64 {
        self.octile
    }

    /// Perpendicular weight.
    #[must_use]
    pub const fn perpendicular(&self) -> f64 {
        self.perpendicular
    }

    /// Height weight.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Returns `true` if every weight is finite and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.manhattan, self.octile, self.perpendicular, self.height]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Inputs to a heuristic evaluation.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicContext {
    position: Position,
    start: Position,
    target: Position,
    weights: HeuristicWeights,
}

impl HeuristicContext {
    /// Creates a context for evaluating `position` on the way from `start` to `target`.
    #[must_use]
    pub const fn new(
        position: Position,
        start: Position,
        target: Position,
        weights: HeuristicWeights,
    ) -> Self {
        Self {
            position,
            start,
            target,
            weights,
        }
    }

    /// The position being evaluated.
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// The search start.
    #[must_use]
    pub const fn start(&self) -> &Position {
        &self.start
    }

    /// The search target.
    #[must_use]
    pub const fn target(&self) -> &Position {
        &self.target
    }

    /// The component weights.
    #[must_use]
    pub const fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

/// A pluggable heuristic and edge-cost model.
///
/// Implementations are shared between concurrent searches and must be
/// stateless or internally synchronized.
pub trait HeuristicStrategy: Send + Sync {
    /// Estimated remaining cost from the context position to the target.
    fn heuristic(&self, context: &HeuristicContext) -> f64;

    /// Base cost of moving from `from` to `to`.
    ///
    /// The engine rejects NaN and infinite results (see
    /// [`checked_transition_cost`]).
    fn transition_cost(&self, from: &Position, to: &Position) -> f64;
}

/// Calls [`HeuristicStrategy::transition_cost`] and enforces its contract.
///
/// Negative results are clamped to zero.
///
/// # Errors
///
/// Returns [`PathfindingError::InvalidTransitionCost`] if the strategy
/// produced NaN or an infinite value.
pub fn checked_transition_cost(
    strategy: &dyn HeuristicStrategy,
    from: &Position,
    to: &Position,
) -> Result<f64, PathfindingError> {
    let cost = strategy.transition_cost(from, to);
    if !cost.is_finite() {
        return Err(PathfindingError::InvalidTransitionCost(cost));
    }
    Ok(cost.max(0.0))
}

/// Manhattan distance between two voxels.
#[must_use]
pub fn manhattan_distance(from: VoxelCoord, to: VoxelCoord) -> f64 {
    f64::from(from.manhattan_distance(to))
}

/// 3D octile distance between two voxels.
///
/// The cost of the cheapest 26-connected walk when face moves cost 1, edge
/// diagonals √2 and corner diagonals √3.
///
/// # Example
///
/// ```
/// use nav_types::heuristic::octile_distance;
/// use nav_spatial::VoxelCoord;
///
/// let d = octile_distance(VoxelCoord::origin(), VoxelCoord::new(2, 2, 2));
/// assert!((d - 2.0 * 3.0_f64.sqrt()).abs() < 1e-12);
/// ```
#[must_use]
pub fn octile_distance(from: VoxelCoord, to: VoxelCoord) -> f64 {
    let [dx, dy, dz] = from.abs_delta(to);
    let min = dx.min(dy).min(dz);
    let max = dx.max(dy).max(dz);
    let mid = dx + dy + dz - min - max;

    (SQRT_3 - SQRT_2) * f64::from(min) + (SQRT_2 - 1.0) * f64::from(mid) + f64::from(max)
}

/// Vertical distance between two voxels.
#[must_use]
pub fn height_difference(from: VoxelCoord, to: VoxelCoord) -> f64 {
    f64::from(from.y.abs_diff(to.y))
}

fn centered_distance_squared(from: &Position, to: &Position) -> f64 {
    from.centered().distance_squared(&to.centered())
}

/// Weighted sum of the plain distance components.
///
/// The transition cost is the Euclidean distance between voxel centers.
/// With the default weights this is admissible for every built-in neighbor
/// set.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearHeuristic;

impl HeuristicStrategy for LinearHeuristic {
    fn heuristic(&self, context: &HeuristicContext) -> f64 {
        let position = context.position().floored();
        let target = context.target().floored();
        let weights = context.weights();

        let perpendicular = perpendicular_distance(
            &position.to_point(),
            &context.start().floored().to_point(),
            &target.to_point(),
        );

        manhattan_distance(position, target) * weights.manhattan()
            + octile_distance(position, target) * weights.octile()
            + perpendicular * weights.perpendicular()
            + height_difference(position, target) * weights.height()
    }

    fn transition_cost(&self, from: &Position, to: &Position) -> f64 {
        centered_distance_squared(from, to).sqrt()
    }
}

/// Weighted sum of the squared distance components.
///
/// The transition cost is the squared Euclidean distance between voxel
/// centers. The estimate grows quadratically while edge costs along a
/// straight run grow linearly, so this heuristic is **not admissible** in
/// general: it trades optimality for a greedier search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredHeuristic;

impl HeuristicStrategy for SquaredHeuristic {
    fn heuristic(&self, context: &HeuristicContext) -> f64 {
        let position = context.position().floored();
        let target = context.target().floored();
        let weights = context.weights();

        let manhattan = manhattan_distance(position, target);
        let octile = octile_distance(position, target);
        let height = height_difference(position, target);
        let perpendicular = perpendicular_distance_squared(
            &position.to_point(),
            &context.start().floored().to_point(),
            &target.to_point(),
        );

        manhattan * manhattan * weights.manhattan()
            + octile * octile * weights.octile()
            + perpendicular * weights.perpendicular()
            + height * height * weights.height()
    }

    fn transition_cost(&self, from: &Position, to: &Position) -> f64 {
        centered_distance_squared(from, to)
    }
}

/// Built-in heuristic selection for plain-data settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicKind {
    /// [`LinearHeuristic`].
    #[default]
    Linear,
    /// [`SquaredHeuristic`].
    Squared,
}

impl HeuristicKind {
    /// Returns a shared instance of the strategy.
    #[must_use]
    pub fn strategy(self) -> std::sync::Arc<dyn HeuristicStrategy> {
        match self {
            Self::Linear => std::sync::Arc::new(LinearHeuristic),
            Self::Squared => std::sync::Arc::new(SquaredHeuristic),
        }
    }

    /// Returns `true` if the strategy never overestimates with non-negative
    /// weights no larger than the defaults.
    #[must_use]
    pub const fn is_admissible(self) -> bool {
        matches!(self, Self::Linear)
    }
}
