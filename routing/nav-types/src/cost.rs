//! Non-negative edge cost contributions.

use std::ops::Add;

use crate::error::PathfindingError;

/// A validated, non-negative cost value.
///
/// Cost processors return a `Cost` as their contribution to an edge. The
/// wrapper guarantees the engine never sums NaN or negative contributions.
///
/// # Example
///
/// ```
/// use nav_types::Cost;
///
/// let cost = Cost::of(2.5).unwrap();
/// assert_eq!(cost.value(), 2.5);
/// assert!(Cost::of(-1.0).is_err());
/// assert!(Cost::of(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cost(f64);

impl Cost {
    /// The zero cost.
    pub const ZERO: Self = Self(0.0);

    /// Creates a cost, rejecting NaN and negative values.
    ///
    /// # Errors
    ///
    /// Returns [`PathfindingError::InvalidCost`] for NaN or negative input.
    pub fn of(value: f64) -> Result<Self, PathfindingError> {
        if value.is_nan() || value < 0.0 {
            return Err(PathfindingError::InvalidCost(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` if this is exactly zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl Add for Cost {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::iter::Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<f64> for Cost {
    type Error = PathfindingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::of(value)
    }
}
