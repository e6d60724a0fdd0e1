//! Construction indirection for pathfinders.
//!
//! A [`PathfinderFactory`] turns a configuration into a ready pathfinder.
//! [`PathfinderFactory::create_initialized`] additionally runs a
//! [`PathfinderInitializer`] over the new instance, which is where callers
//! register hooks or other per-instance setup that depends on the
//! configuration.
//!
//! # Example
//!
//! ```
//! use nav_astar::{AStarPathfinder, AStarPathfinderFactory, PathfinderFactory, PathfindingStep};
//! use nav_types::PathfinderConfiguration;
//!
//! let factory = AStarPathfinderFactory;
//! let pathfinder = factory.create_initialized(
//!     PathfinderConfiguration::new(),
//!     &|pathfinder: &mut AStarPathfinder, _: &PathfinderConfiguration| {
//!         pathfinder.register_hook(std::sync::Arc::new(|_: &PathfindingStep| {}));
//!     },
//! );
//! assert_eq!(pathfinder.hook_count(), 1);
//! ```

use nav_spatial::Position;
use nav_types::{EnvironmentContext, PathfinderConfiguration, PathfinderResult, PathfindingError};

use crate::astar::AStarPathfinder;

/// A configured search engine.
pub trait Pathfinder: Send + Sync {
    /// Finds a path from `start` to `target`.
    ///
    /// # Errors
    ///
    /// Fails only on fatal engine errors; an unreachable target is a normal
    /// result.
    fn find_path(
        &self,
        start: Position,
        target: Position,
    ) -> Result<PathfinderResult, PathfindingError>;

    /// Finds a path with a host environment handle.
    ///
    /// # Errors
    ///
    /// See [`Pathfinder::find_path`].
    fn find_path_in(
        &self,
        start: Position,
        target: Position,
        environment: Option<EnvironmentContext>,
    ) -> Result<PathfinderResult, PathfindingError>;

    /// The configuration this pathfinder searches with.
    fn configuration(&self) -> &PathfinderConfiguration;
}

impl Pathfinder for AStarPathfinder {
    fn find_path(
        &self,
        start: Position,
        target: Position,
    ) -> Result<PathfinderResult, PathfindingError> {
        Self::find_path(self, start, target)
    }

    fn find_path_in(
        &self,
        start: Position,
        target: Position,
        environment: Option<EnvironmentContext>,
    ) -> Result<PathfinderResult, PathfindingError> {
        Self::find_path_in(self, start, target, environment)
    }

    fn configuration(&self) -> &PathfinderConfiguration {
        Self::configuration(self)
    }
}

/// Post-construction setup applied by [`PathfinderFactory::create_initialized`].
///
/// Closures taking `(&mut P, &PathfinderConfiguration)` implement this
/// trait.
pub trait PathfinderInitializer<P> {
    /// Prepares `pathfinder`, which was just built from `configuration`.
    fn initialize(&self, pathfinder: &mut P, configuration: &PathfinderConfiguration);
}

impl<P, F> PathfinderInitializer<P> for F
where
    F: Fn(&mut P, &PathfinderConfiguration),
{
    fn initialize(&self, pathfinder: &mut P, configuration: &PathfinderConfiguration) {
        self(pathfinder, configuration);
    }
}

/// Builds pathfinders from configurations.
pub trait PathfinderFactory {
    /// The pathfinder type produced.
    type Output: Pathfinder;

    /// Builds a pathfinder with the default configuration.
    fn create(&self) -> Self::Output {
        self.create_with(PathfinderConfiguration::new())
    }

    /// Builds a pathfinder with `configuration`.
    fn create_with(&self, configuration: PathfinderConfiguration) -> Self::Output;

    /// Builds a pathfinder with `configuration`, then runs `initializer`
    /// on it.
    fn create_initialized<I>(
        &self,
        configuration: PathfinderConfiguration,
        initializer: &I,
    ) -> Self::Output
    where
        I: PathfinderInitializer<Self::Output> + ?Sized,
    {
        let mut pathfinder = self.create_with(configuration.clone());
        initializer.initialize(&mut pathfinder, &configuration);
        pathfinder
    }
}

/// Factory for [`AStarPathfinder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPathfinderFactory;

impl PathfinderFactory for AStarPathfinderFactory {
    type Output = AStarPathfinder;

    fn create_with(&self, configuration: PathfinderConfiguration) -> AStarPathfinder {
        AStarPathfinder::new(configuration)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::hooks::PathfindingStep;

    #[test]
    fn test_create_uses_defaults() {
        let pathfinder = AStarPathfinderFactory.create();
        assert_eq!(pathfinder.configuration().max_iterations(), 5000);
        assert_eq!(pathfinder.hook_count(), 0);
    }

    #[test]
    fn test_create_with_keeps_configuration() {
        let config = PathfinderConfiguration::new().with_max_iterations(42);
        let pathfinder = AStarPathfinderFactory.create_with(config);
        assert_eq!(pathfinder.configuration().max_iterations(), 42);
    }

    #[test]
    fn test_initializer_sees_configuration() {
        let config = PathfinderConfiguration::new().with_reopen_closed_nodes(true);
        let pathfinder = AStarPathfinderFactory.create_initialized(
            config,
            &|pathfinder: &mut AStarPathfinder, configuration: &PathfinderConfiguration| {
                if configuration.reopen_closed_nodes() {
                    pathfinder.register_hook(Arc::new(|_: &PathfindingStep| {}));
                }
            },
        );
        assert_eq!(pathfinder.hook_count(), 1);
    }

    #[test]
    fn test_trait_object_search() {
        let pathfinder: Box<dyn Pathfinder> = Box::new(AStarPathfinderFactory.create());
        let result = pathfinder
            .find_path(Position::new(0.0, 0.0, 0.0), Position::new(0.0, 3.0, 0.0))
            .unwrap();
        assert!(result.is_success());
        assert_eq!(result.path().unwrap().len(), 4);
    }
}
