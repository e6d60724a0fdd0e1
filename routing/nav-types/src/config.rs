//! Pathfinder configuration.
//!
//! [`PathfinderConfiguration`] is the immutable bundle of tunables and
//! strategy objects a pathfinder runs with. Strategy objects and processors
//! are held behind `Arc`, so cloning a configuration is cheap and the clone
//! is independent: changing one with a `with_*` call never affects the other.
//!
//! [`PathfinderSettings`] is the plain-data subset of a configuration (every
//! scalar plus the choice of built-in heuristic and neighbor set). It can be
//! stored and loaded with the `serde` feature.
//!
//! # Example
//!
//! ```
//! use nav_types::{Connectivity, HeuristicKind, PathfinderConfiguration};
//!
//! let config = PathfinderConfiguration::new()
//!     .with_max_iterations(20_000)
//!     .with_connectivity(Connectivity::Full26)
//!     .with_heuristic(HeuristicKind::Linear)
//!     .with_reopen_closed_nodes(true);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.settings().map(|s| s.max_iterations), Some(20_000));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::PathfindingError;
use crate::heuristic::{HeuristicKind, HeuristicStrategy, HeuristicWeights};
use crate::navigation::{NavigationPointProvider, OpenSpaceProvider};
use crate::neighbors::{Connectivity, NeighborStrategy};
use crate::processing::{SharedCostProcessor, SharedValidator};

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 5000;

/// Default grid cell edge length for the region index.
pub const DEFAULT_GRID_CELL_SIZE: i32 = 12;

/// Default expected insertions per region bloom filter.
pub const DEFAULT_BLOOM_FILTER_SIZE: usize = 1000;

/// Default false-positive probability per region bloom filter.
pub const DEFAULT_BLOOM_FILTER_FPP: f64 = 0.01;

/// Plain-data pathfinder settings.
///
/// # Example
///
/// ```
/// use nav_types::{PathfinderConfiguration, PathfinderSettings};
///
/// let settings = PathfinderSettings {
///     max_length: 64,
///     fallback: false,
///     ..PathfinderSettings::default()
/// };
/// let config = PathfinderConfiguration::from_settings(&settings);
/// assert_eq!(config.max_length(), 64);
/// assert!(!config.fallback());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderSettings {
    /// Iteration cap.
    pub max_iterations: usize,
    /// Depth cap; `0` means unlimited.
    pub max_length: usize,
    /// Run searches on a worker thread.
    pub run_async: bool,
    /// Return a best-effort path when the target is not reached.
    pub fallback: bool,
    /// Heuristic component weights.
    pub heuristic_weights: HeuristicWeights,
    /// Built-in heuristic strategy.
    pub heuristic: HeuristicKind,
    /// Built-in neighbor set.
    pub connectivity: Connectivity,
    /// Region index cell size.
    pub grid_cell_size: i32,
    /// Expected insertions per region bloom filter.
    pub bloom_filter_size: usize,
    /// False-positive probability per region bloom filter.
    pub bloom_filter_fpp: f64,
    /// Allow closed nodes to be reopened on a cheaper path.
    pub reopen_closed_nodes: bool,
}

impl Default for PathfinderSettings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_length: 0,
            run_async: false,
            fallback: true,
            heuristic_weights: HeuristicWeights::DEFAULT,
            heuristic: HeuristicKind::Linear,
            connectivity: Connectivity::Cardinal6,
            grid_cell_size: DEFAULT_GRID_CELL_SIZE,
            bloom_filter_size: DEFAULT_BLOOM_FILTER_SIZE,
            bloom_filter_fpp: DEFAULT_BLOOM_FILTER_FPP,
            reopen_closed_nodes: false,
        }
    }
}

/// Immutable configuration for a pathfinder.
///
/// Defaults:
/// - Max iterations: 5000
/// - Max length: 0 (unlimited)
/// - Async: false
/// - Fallback: true
/// - Provider: [`OpenSpaceProvider`]
/// - Heuristic: [`crate::LinearHeuristic`] with [`HeuristicWeights::DEFAULT`]
/// - Neighbors: 6-connected
/// - Grid cell size: 12
/// - Bloom filter: 1000 insertions at 1% false positives
/// - Reopen closed nodes: false
/// - No validators, no cost processors
#[derive(Clone)]
pub struct PathfinderConfiguration {
    max_iterations: usize,
    max_length: usize,
    run_async: bool,
    fallback: bool,
    provider: Arc<dyn NavigationPointProvider>,
    heuristic_weights: HeuristicWeights,
    heuristic_strategy: Arc<dyn HeuristicStrategy>,
    heuristic_kind: Option<HeuristicKind>,
    neighbor_strategy: Arc<dyn NeighborStrategy>,
    connectivity: Option<Connectivity>,
    grid_cell_size: i32,
    bloom_filter_size: usize,
    bloom_filter_fpp: f64,
    reopen_closed_nodes: bool,
    validation_processors: Vec<SharedValidator>,
    cost_processors: Vec<SharedCostProcessor>,
}

impl PathfinderConfiguration {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::from_settings(&PathfinderSettings::default())
    }

    /// Creates a configuration from plain-data settings.
    ///
    /// The provider is [`OpenSpaceProvider`] and the processor lists are
    /// empty.
    #[must_use]
    pub fn from_settings(settings: &PathfinderSettings) -> Self {
        Self {
            max_iterations: settings.max_iterations,
            max_length: settings.max_length,
            run_async: settings.run_async,
            fallback: settings.fallback,
            provider: Arc::new(OpenSpaceProvider),
            heuristic_weights: settings.heuristic_weights,
            heuristic_strategy: settings.heuristic.strategy(),
            heuristic_kind: Some(settings.heuristic),
            neighbor_strategy: settings.connectivity.strategy(),
            connectivity: Some(settings.connectivity),
            grid_cell_size: settings.grid_cell_size,
            bloom_filter_size: settings.bloom_filter_size,
            bloom_filter_fpp: settings.bloom_filter_fpp,
            reopen_closed_nodes: settings.reopen_closed_nodes,
            validation_processors: Vec::new(),
            cost_processors: Vec::new(),
        }
    }

    /// Returns the plain-data settings, or `None` if a custom heuristic or
    /// neighbor strategy is installed.
    #[must_use]
    pub fn settings(&self) -> Option<PathfinderSettings> {
        Some(PathfinderSettings {
            max_iterations: self.max_iterations,
            max_length: self.max_length,
            run_async: self.run_async,
            fallback: self.fallback,
            heuristic_weights: self.heuristic_weights,
            heuristic: self.heuristic_kind?,
            connectivity: self.connectivity?,
            grid_cell_size: self.grid_cell_size,
            bloom_filter_size: self.bloom_filter_size,
            bloom_filter_fpp: self.bloom_filter_fpp,
            reopen_closed_nodes: self.reopen_closed_nodes,
        })
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the depth cap; `0` disables it.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets whether searches started through a task run on a worker thread.
    #[must_use]
    pub fn with_async(mut self, run_async: bool) -> Self {
        self.run_async = run_async;
        self
    }

    /// Sets whether a best-effort path is returned when the target is not
    /// reached.
    #[must_use]
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sets the world provider.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn NavigationPointProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Sets the heuristic component weights.
    #[must_use]
    pub fn with_heuristic_weights(mut self, weights: HeuristicWeights) -> Self {
        self.heuristic_weights = weights;
        self
    }

    /// Selects a built-in heuristic strategy.
    #[must_use]
    pub fn with_heuristic(mut self, kind: HeuristicKind) -> Self {
        self.heuristic_strategy = kind.strategy();
        self.heuristic_kind = Some(kind);
        self
    }

    /// Installs a custom heuristic strategy.
    #[must_use]
    pub fn with_heuristic_strategy(mut self, strategy: Arc<dyn HeuristicStrategy>) -> Self {
        self.heuristic_strategy = strategy;
        self.heuristic_kind = None;
        self
    }

    /// Selects a built-in neighbor set.
    #[must_use]
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.neighbor_strategy = connectivity.strategy();
        self.connectivity = Some(connectivity);
        self
    }

    /// Installs a custom neighbor strategy.
    #[must_use]
    pub fn with_neighbor_strategy(mut self, strategy: Arc<dyn NeighborStrategy>) -> Self {
        self.neighbor_strategy = strategy;
        self.connectivity = None;
        self
    }

    /// Sets the region index cell size.
    #[must_use]
    pub fn with_grid_cell_size(mut self, size: i32) -> Self {
        self.grid_cell_size = size;
        self
    }

    /// Sets the expected insertions per region bloom filter.
    #[must_use]
    pub fn with_bloom_filter_size(mut self, size: usize) -> Self {
        self.bloom_filter_size = size;
        self
    }

    /// Sets the false-positive probability per region bloom filter.
    #[must_use]
    pub fn with_bloom_filter_fpp(mut self, fpp: f64) -> Self {
        self.bloom_filter_fpp = fpp;
        self
    }

    /// Sets whether closed nodes may be reopened.
    #[must_use]
    pub fn with_reopen_closed_nodes(mut self, reopen: bool) -> Self {
        self.reopen_closed_nodes = reopen;
        self
    }

    /// Replaces the validator list.
    #[must_use]
    pub fn with_validation_processors(mut self, validators: Vec<SharedValidator>) -> Self {
        self.validation_processors = validators;
        self
    }

    /// Appends a validator.
    #[must_use]
    pub fn with_validation_processor(mut self, validator: SharedValidator) -> Self {
        self.validation_processors.push(validator);
        self
    }

    /// Replaces the cost processor list.
    #[must_use]
    pub fn with_cost_processors(mut self, processors: Vec<SharedCostProcessor>) -> Self {
        self.cost_processors = processors;
        self
    }

    /// Appends a cost processor.
    #[must_use]
    pub fn with_cost_processor(mut self, processor: SharedCostProcessor) -> Self {
        self.cost_processors.push(processor);
        self
    }

    /// Iteration cap.
    #[must_use]
    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Depth cap; `0` means unlimited.
    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// Whether tasks run on a worker thread.
    #[must_use]
    pub const fn is_async(&self) -> bool {
        self.run_async
    }

    /// Whether a best-effort path is returned on failure.
    #[must_use]
    pub const fn fallback(&self) -> bool {
        self.fallback
    }

    /// The world provider.
    #[must_use]
    pub fn provider(&self) -> &dyn NavigationPointProvider {
        self.provider.as_ref()
    }

    /// The heuristic component weights.
    #[must_use]
    pub const fn heuristic_weights(&self) -> &HeuristicWeights {
        &self.heuristic_weights
    }

    /// The heuristic strategy.
    #[must_use]
    pub fn heuristic_strategy(&self) -> &dyn HeuristicStrategy {
        self.heuristic_strategy.as_ref()
    }

    /// The built-in heuristic in use, if any.
    #[must_use]
    pub const fn heuristic_kind(&self) -> Option<HeuristicKind> {
        self.heuristic_kind
    }

    /// The neighbor strategy.
    #[must_use]
    pub fn neighbor_strategy(&self) -> &dyn NeighborStrategy {
        self.neighbor_strategy.as_ref()
    }

    /// The built-in neighbor set in use, if any.
    #[must_use]
    pub const fn connectivity(&self) -> Option<Connectivity> {
        self.connectivity
    }

    /// Region index cell size.
    #[must_use]
    pub const fn grid_cell_size(&self) -> i32 {
        self.grid_cell_size
    }

    /// Expected insertions per region bloom filter.
    #[must_use]
    pub const fn bloom_filter_size(&self) -> usize {
        self.bloom_filter_size
    }

    /// False-positive probability per region bloom filter.
    #[must_use]
    pub const fn bloom_filter_fpp(&self) -> f64 {
        self.bloom_filter_fpp
    }

    /// Whether closed nodes may be reopened.
    #[must_use]
    pub const fn reopen_closed_nodes(&self) -> bool {
        self.reopen_closed_nodes
    }

    /// Validators, in evaluation order.
    #[must_use]
    pub fn validation_processors(&self) -> &[SharedValidator] {
        &self.validation_processors
    }

    /// Cost processors, in evaluation order.
    #[must_use]
    pub fn cost_processors(&self) -> &[SharedCostProcessor] {
        &self.cost_processors
    }

    /// Checks the numeric parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PathfindingError::InvalidConfig`] if the grid cell size or
    /// bloom filter size is not positive, the false-positive probability is
    /// outside `(0, 1)`, or a heuristic weight is negative or not finite.
    pub fn validate(&self) -> Result<(), PathfindingError> {
        if self.grid_cell_size <= 0 {
            return Err(PathfindingError::invalid_config(format!(
                "grid cell size must be positive, got {}",
                self.grid_cell_size
            )));
        }
        if self.bloom_filter_size == 0 {
            return Err(PathfindingError::invalid_config(
                "bloom filter size must be positive",
            ));
        }
        if !(self.bloom_filter_fpp > 0.0 && self.bloom_filter_fpp < 1.0) {
            return Err(PathfindingError::invalid_config(format!(
                "bloom filter false-positive probability must be in (0, 1), got {}",
                self.bloom_filter_fpp
            )));
        }
        if !self.heuristic_weights.is_valid() {
            return Err(PathfindingError::invalid_config(format!(
                "heuristic weights must be finite and non-negative, got {:?}",
                self.heuristic_weights
            )));
        }
        Ok(())
    }

    /// Returns non-fatal issues with this configuration.
    ///
    /// Checks for combinations that make the heuristic overestimate, which
    /// costs optimality but not correctness.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.heuristic_kind == Some(HeuristicKind::Squared) {
            issues.push("squared heuristic is not admissible; paths may be suboptimal".to_owned());
        }

        if self.heuristic_weights.manhattan() > 0.0
            && matches!(
                self.connectivity,
                Some(Connectivity::HorizontalDiagonal10 | Connectivity::Full26)
            )
        {
            issues.push(format!(
                "manhattan heuristic is not admissible for {:?} neighbors",
                self.connectivity
            ));
        }

        let sum = self.heuristic_weights.manhattan()
            + self.heuristic_weights.octile()
            + self.heuristic_weights.perpendicular()
            + self.heuristic_weights.height();
        if sum > 1.0 {
            issues.push(format!(
                "heuristic weights sum to {sum}; estimates above 1x the true distance may overestimate"
            ));
        }

        issues
    }
}

impl Default for PathfinderConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PathfinderConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathfinderConfiguration")
            .field("max_iterations", &self.max_iterations)
            .field("max_length", &self.max_length)
            .field("run_async", &self.run_async)
            .field("fallback", &self.fallback)
            .field("heuristic_weights", &self.heuristic_weights)
            .field("heuristic_kind", &self.heuristic_kind)
            .field("connectivity", &self.connectivity)
            .field("grid_cell_size", &self.grid_cell_size)
            .field("bloom_filter_size", &self.bloom_filter_size)
            .field("bloom_filter_fpp", &self.bloom_filter_fpp)
            .field("reopen_closed_nodes", &self.reopen_closed_nodes)
            .field("validation_processors", &self.validation_processors.len())
            .field("cost_processors", &self.cost_processors.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::neighbors::NeighborOffsets;
    use crate::validators;

    #[test]
    fn test_defaults() {
        let config = PathfinderConfiguration::default();
        assert_eq!(config.max_iterations(), 5000);
        assert_eq!(config.max_length(), 0);
        assert!(!config.is_async());
        assert!(config.fallback());
        assert_eq!(config.grid_cell_size(), 12);
        assert_eq!(config.bloom_filter_size(), 1000);
        assert_eq!(config.bloom_filter_fpp(), 0.01);
        assert!(!config.reopen_closed_nodes());
        assert_eq!(config.heuristic_kind(), Some(HeuristicKind::Linear));
        assert_eq!(config.connectivity(), Some(Connectivity::Cardinal6));
        assert_eq!(*config.heuristic_weights(), HeuristicWeights::DEFAULT);
        assert!(config.validation_processors().is_empty());
        assert!(config.cost_processors().is_empty());
        assert!(config.validate().is_ok());
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = PathfinderConfiguration::new().with_validation_processor(validators::always_true());
        let copy = original
            .clone()
            .with_max_iterations(1)
            .with_validation_processor(validators::always_false());

        assert_eq!(original.max_iterations(), 5000);
        assert_eq!(original.validation_processors().len(), 1);
        assert_eq!(copy.max_iterations(), 1);
        assert_eq!(copy.validation_processors().len(), 2);
        assert!(Arc::ptr_eq(
            &original.validation_processors()[0],
            &copy.validation_processors()[0]
        ));
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = PathfinderSettings {
            max_iterations: 42,
            max_length: 7,
            run_async: true,
            fallback: false,
            heuristic_weights: HeuristicWeights::new(0.5, 0.5, 0.0, 0.0),
            heuristic: HeuristicKind::Squared,
            connectivity: Connectivity::HorizontalDiagonal10,
            grid_cell_size: 8,
            bloom_filter_size: 64,
            bloom_filter_fpp: 0.05,
            reopen_closed_nodes: true,
        };
        let config = PathfinderConfiguration::from_settings(&settings);
        assert_eq!(config.settings(), Some(settings));
    }

    #[test]
    fn test_custom_strategies_have_no_settings() {
        let config = PathfinderConfiguration::new()
            .with_neighbor_strategy(Arc::new(NeighborOffsets::new(Vec::new())));
        assert!(config.settings().is_none());
        assert!(config.connectivity().is_none());

        let config = config.with_connectivity(Connectivity::Full26);
        assert!(config.settings().is_some());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let err = PathfinderConfiguration::new()
            .with_grid_cell_size(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("grid cell size"));

        assert!(PathfinderConfiguration::new().with_bloom_filter_size(0).validate().is_err());
        assert!(PathfinderConfiguration::new().with_bloom_filter_fpp(0.0).validate().is_err());
        assert!(PathfinderConfiguration::new().with_bloom_filter_fpp(1.0).validate().is_err());
        assert!(PathfinderConfiguration::new()
            .with_bloom_filter_fpp(f64::NAN)
            .validate()
            .is_err());
        assert!(PathfinderConfiguration::new()
            .with_heuristic_weights(HeuristicWeights::DEFAULT.with_octile(-1.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_warnings() {
        let squared = PathfinderConfiguration::new().with_heuristic(HeuristicKind::Squared);
        assert_eq!(squared.warnings().len(), 1);

        let manhattan_diagonal = PathfinderConfiguration::new()
            .with_heuristic_weights(HeuristicWeights::MANHATTAN)
            .with_connectivity(Connectivity::Full26);
        assert!(manhattan_diagonal.warnings()[0].contains("manhattan"));

        let heavy = PathfinderConfiguration::new()
            .with_heuristic_weights(HeuristicWeights::new(1.0, 1.0, 0.0, 0.0));
        assert!(heavy.warnings().iter().any(|w| w.contains("sum")));
    }

    #[test]
    fn test_debug_lists_counts() {
        let config = PathfinderConfiguration::new().with_cost_processor(crate::costs::constant(
            crate::Cost::ZERO,
        ));
        let text = format!("{config:?}");
        assert!(text.contains("cost_processors: 1"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_settings_serde() {
        let settings = PathfinderSettings {
            connectivity: Connectivity::Full26,
            ..PathfinderSettings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: PathfinderSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);

        let partial: PathfinderSettings = serde_json::from_str(r#"{"max_length": 9}"#).unwrap();
        assert_eq!(partial.max_length, 9);
        assert_eq!(partial.max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
