//! World queries supplied by the host application.
//!
//! The engine never inspects the world itself. Whatever owns the world
//! implements [`NavigationPointProvider`], and validators such as
//! [`crate::validators::navigable`] consult it during the search.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use nav_spatial::Position;

/// What the world looks like at a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationPoint {
    /// An agent can occupy this position.
    pub traversable: bool,
    /// There is solid ground directly below.
    pub has_floor: bool,
    /// The position can be climbed (ladders, vines).
    pub climbable: bool,
    /// The position is filled with liquid.
    pub liquid: bool,
}

impl NavigationPoint {
    /// Open air above solid ground.
    pub const OPEN: Self = Self {
        traversable: true,
        has_floor: true,
        climbable: false,
        liquid: false,
    };

    /// A solid, impassable position.
    pub const BLOCKED: Self = Self {
        traversable: false,
        has_floor: false,
        climbable: false,
        liquid: false,
    };
}

impl Default for NavigationPoint {
    fn default() -> Self {
        Self::OPEN
    }
}

/// Opaque, host-defined data passed through a search to the provider and to
/// processors.
///
/// # Example
///
/// ```
/// use nav_types::EnvironmentContext;
///
/// let env = EnvironmentContext::new(42_u32);
/// assert_eq!(env.downcast_ref::<u32>(), Some(&42));
/// assert!(env.downcast_ref::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct EnvironmentContext {
    inner: Arc<dyn Any + Send + Sync>,
}

impl EnvironmentContext {
    /// Wraps a host value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Returns the wrapped value if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Returns `true` if the wrapped value has type `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }
}

impl fmt::Debug for EnvironmentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentContext").finish_non_exhaustive()
    }
}

/// Answers world queries for the search.
///
/// Providers are shared between concurrent searches. Any closure of the
/// right shape is a provider.
///
/// # Example
///
/// ```
/// use nav_types::{NavigationPoint, NavigationPointProvider};
/// use nav_spatial::Position;
///
/// let floor_only = |p: &Position, _: Option<&nav_types::EnvironmentContext>| {
///     if p.y() < 0.0 { NavigationPoint::BLOCKED } else { NavigationPoint::OPEN }
/// };
/// assert!(!floor_only.navigation_point(&Position::new(0.0, -1.0, 0.0), None).traversable);
/// ```
pub trait NavigationPointProvider: Send + Sync {
    /// Describes the world at `position`.
    fn navigation_point(
        &self,
        position: &Position,
        environment: Option<&EnvironmentContext>,
    ) -> NavigationPoint;
}

impl<F> NavigationPointProvider for F
where
    F: Fn(&Position, Option<&EnvironmentContext>) -> NavigationPoint + Send + Sync,
{
    fn navigation_point(
        &self,
        position: &Position,
        environment: Option<&EnvironmentContext>,
    ) -> NavigationPoint {
        self(position, environment)
    }
}

/// A provider for unbounded open space: every position is traversable and
/// has a floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSpaceProvider;

impl NavigationPointProvider for OpenSpaceProvider {
    fn navigation_point(&self, _: &Position, _: Option<&EnvironmentContext>) -> NavigationPoint {
        NavigationPoint::OPEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_space() {
        let point = OpenSpaceProvider.navigation_point(&Position::new(1e6, -1e6, 0.0), None);
        assert!(point.traversable);
        assert!(point.has_floor);
        assert!(!point.climbable);
        assert!(!point.liquid);
        assert_eq!(point, NavigationPoint::default());
    }

    #[test]
    fn test_closure_provider_reads_environment() {
        struct WaterLevel(f64);

        let provider = |p: &Position, env: Option<&EnvironmentContext>| {
            let level = env
                .and_then(|e| e.downcast_ref::<WaterLevel>())
                .map_or(f64::NEG_INFINITY, |w| w.0);
            NavigationPoint {
                liquid: p.y() < level,
                ..NavigationPoint::OPEN
            }
        };

        let env = EnvironmentContext::new(WaterLevel(5.0));
        let below = Position::new(0.0, 2.0, 0.0);
        assert!(provider.navigation_point(&below, Some(&env)).liquid);
        assert!(!provider.navigation_point(&below, None).liquid);
    }

    #[test]
    fn test_environment_clone_shares_value() {
        let env = EnvironmentContext::new(String::from("nether"));
        let copy = env.clone();
        assert!(copy.is::<String>());
        assert_eq!(copy.downcast_ref::<String>().map(String::as_str), Some("nether"));
        assert!(format!("{env:?}").contains("EnvironmentContext"));
    }
}
