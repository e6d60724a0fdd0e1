//! Continuous positions with voxel identity.

use std::fmt;
use std::hash::{Hash, Hasher};

use nalgebra::{Point3, Vector3};

use crate::voxel::VoxelCoord;

/// A position in continuous 3D space.
///
/// The raw coordinates are kept for geometry (interpolation, distances), but
/// equality and hashing are defined on the floored voxel coordinates. Two
/// positions inside the same unit cell are equal and collide in maps and
/// sets.
///
/// # Example
///
/// ```
/// use nav_spatial::{Position, VoxelCoord};
///
/// let p = Position::new(1.7, -0.2, 3.0);
/// assert_eq!(p.floored(), VoxelCoord::new(1, -1, 3));
/// assert_eq!(p, Position::new(1.0, -0.9, 3.99));
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    point: Point3<f64>,
}

impl Position {
    /// Creates a position from raw coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            point: Point3::new(x, y, z),
        }
    }

    /// Creates a position from an `nalgebra` point.
    #[must_use]
    pub const fn from_point(point: Point3<f64>) -> Self {
        Self { point }
    }

    /// Creates a position at the minimum corner of a voxel.
    #[must_use]
    pub fn from_voxel(coord: VoxelCoord) -> Self {
        Self::from_point(coord.to_point())
    }

    /// Raw X coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.point.x
    }

    /// Raw Y coordinate.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.point.y
    }

    /// Raw Z coordinate.
    #[must_use]
    pub fn z(&self) -> f64 {
        self.point.z
    }

    /// Returns the underlying point.
    #[must_use]
    pub const fn point(&self) -> &Point3<f64> {
        &self.point
    }

    /// Returns the voxel this position falls into.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn floored(&self) -> VoxelCoord {
        VoxelCoord::new(
            self.point.x.floor() as i32,
            self.point.y.floor() as i32,
            self.point.z.floor() as i32,
        )
    }

    /// Returns the position snapped to its voxel's minimum corner.
    #[must_use]
    pub fn floor(&self) -> Self {
        Self::from_voxel(self.floored())
    }

    /// Returns the position snapped to its voxel's center (floor + 0.5 per axis).
    ///
    /// # Example
    ///
    /// ```
    /// use nav_spatial::Position;
    ///
    /// let c = Position::new(-0.3, 2.9, 4.0).centered();
    /// assert_eq!((c.x(), c.y(), c.z()), (-0.5, 2.5, 4.5));
    /// ```
    #[must_use]
    pub fn centered(&self) -> Self {
        Self::from_point(self.floored().center())
    }

    /// Euclidean distance between the raw coordinates.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        nalgebra::distance(&self.point, &other.point)
    }

    /// Squared Euclidean distance between the raw coordinates.
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        nalgebra::distance_squared(&self.point, &other.point)
    }

    /// Returns this position moved by `offset`.
    #[must_use]
    pub fn offset(&self, offset: &Vector3<f64>) -> Self {
        Self::from_point(self.point + *offset)
    }

    /// Returns the position as a vector from the origin.
    #[must_use]
    pub fn to_vector(&self) -> Vector3<f64> {
        self.point.coords
    }

    /// Linear interpolation toward `other`; `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::from_point(self.point.lerp(&other.point, t))
    }

    /// Midpoint between the raw coordinates.
    #[must_use]
    pub fn mid_point(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }

    /// Returns a copy with the X coordinate replaced.
    #[must_use]
    pub fn with_x(mut self, x: f64) -> Self {
        self.point.x = x;
        self
    }

    /// Returns a copy with the Y coordinate replaced.
    #[must_use]
    pub fn with_y(mut self, y: f64) -> Self {
        self.point.y = y;
        self
    }

    /// Returns a copy with the Z coordinate replaced.
    #[must_use]
    pub fn with_z(mut self, z: f64) -> Self {
        self.point.z = z;
        self
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.floored() == other.floored()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.floored().hash(state);
    }
}

impl From<VoxelCoord> for Position {
    fn from(coord: VoxelCoord) -> Self {
        Self::from_voxel(coord)
    }
}

impl From<Point3<f64>> for Position {
    fn from(point: Point3<f64>) -> Self {
        Self::from_point(point)
    }
}

impl From<(f64, f64, f64)> for Position {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl std::ops::Add<Vector3<f64>> for Position {
    type Output = Self;

    fn add(self, offset: Vector3<f64>) -> Self {
        self.offset(&offset)
    }
}

impl std::ops::Sub for Position {
    type Output = Vector3<f64>;

    fn sub(self, other: Self) -> Vector3<f64> {
        self.point - other.point
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.point.x, self.point.y, self.point.z)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_fraction() {
        let a = Position::new(0.1, 0.0, 0.0);
        let b = Position::new(0.9, 0.0, 0.0);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.insert(b));
    }

    #[test]
    fn test_negative_fraction_floors_down() {
        let p = Position::new(-0.1, -1.0, -1.5);
        assert_eq!(p.floored(), VoxelCoord::new(-1, -1, -2));
        assert_ne!(p, Position::new(0.1, -1.0, -1.5));
    }

    #[test]
    fn test_centered() {
        let c = Position::new(3.2, 0.0, -7.9).centered();
        assert_eq!(c.x(), 3.5);
        assert_eq!(c.y(), 0.5);
        assert_eq!(c.z(), -7.5);
    }

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert_relative_eq!(a.distance(&b), 5.0, epsilon = 1e-12);
        assert_relative_eq!(a.distance_squared(&b), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_offset_and_sub() {
        let a = Position::new(1.0, 2.0, 3.0);
        let moved = a + Vector3::new(1.0, -1.0, 0.5);
        assert_eq!(moved.x(), 2.0);
        assert_eq!(moved.y(), 1.0);
        assert_eq!(moved.z(), 3.5);
        assert_eq!(moved - a, Vector3::new(1.0, -1.0, 0.5));
    }

    #[test]
    fn test_lerp_and_mid_point() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(2.0, 4.0, -2.0);
        let quarter = a.lerp(&b, 0.25);
        assert_relative_eq!(quarter.y(), 1.0, epsilon = 1e-12);
        let mid = a.mid_point(&b);
        assert_relative_eq!(mid.x(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(mid.z(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_with_axis() {
        let p = Position::new(1.0, 2.0, 3.0).with_x(9.0).with_z(-1.0);
        assert_eq!((p.x(), p.y(), p.z()), (9.0, 2.0, -1.0));
    }

    #[test]
    fn test_floor() {
        let p = Position::new(1.9, -0.5, 2.0).floor();
        assert_eq!((p.x(), p.y(), p.z()), (1.0, -1.0, 2.0));
    }

    #[test]
    fn test_display() {
        let text = Position::new(1.5, 2.0, -3.0).to_string();
        assert_eq!(text, "(1.5, 2, -3)");
    }
}
