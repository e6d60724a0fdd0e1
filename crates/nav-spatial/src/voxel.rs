//! Voxel coordinate types.

use nalgebra::{Point3, Vector3};

/// Bits the horizontal axes (x and z) each occupy in a packed key.
///
/// Horizontal coordinates in `[-2^25, 2^25)` pack without collision.
pub const HORIZONTAL_AXIS_BITS: u32 = 26;

/// Bits the height axis (y) occupies in a packed key.
///
/// Heights in `[-2^11, 2^11)` pack without collision. Anything outside the
/// packable range on any axis wraps and may alias another cell.
pub const VERTICAL_AXIS_BITS: u32 = 12;

const HORIZONTAL_MASK: i64 = (1 << HORIZONTAL_AXIS_BITS) - 1;
const VERTICAL_MASK: i64 = (1 << VERTICAL_AXIS_BITS) - 1;
const X_SHIFT: u32 = VERTICAL_AXIS_BITS + HORIZONTAL_AXIS_BITS;

/// A discrete 3D coordinate in voxel/grid space.
///
/// This is the floored form of a [`crate::Position`]: the integer cell a
/// continuous position falls into.
///
/// # Example
///
/// ```
/// use nav_spatial::VoxelCoord;
///
/// let coord = VoxelCoord::new(1, 2, 3);
/// assert_eq!(coord.x, 1);
/// assert_eq!(coord.y, 2);
/// assert_eq!(coord.z, 3);
///
/// // Supports negative coordinates
/// let neg_coord = VoxelCoord::new(-5, -10, -15);
/// assert_eq!(neg_coord.x, -5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate (height axis; the height heuristic reads this one).
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl VoxelCoord {
    /// Creates a new voxel coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate at the origin (0, 0, 0).
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the coordinate as an array.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts to a floating-point point at the cell's minimum corner.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_spatial::VoxelCoord;
    /// use nalgebra::Point3;
    ///
    /// let coord = VoxelCoord::new(1, 2, 3);
    /// assert_eq!(coord.to_point(), Point3::new(1.0, 2.0, 3.0));
    /// ```
    #[must_use]
    pub fn to_point(self) -> Point3<f64> {
        Point3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Converts to a floating-point point at the cell's center.
    #[must_use]
    pub fn center(self) -> Point3<f64> {
        self.to_point() + Vector3::repeat(0.5)
    }

    /// Returns the absolute per-axis differences to another coordinate.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_spatial::VoxelCoord;
    ///
    /// let a = VoxelCoord::new(0, 5, -2);
    /// let b = VoxelCoord::new(3, 1, 2);
    /// assert_eq!(a.abs_delta(b), [3, 4, 4]);
    /// ```
    #[must_use]
    pub const fn abs_delta(self, other: Self) -> [u32; 3] {
        [
            self.x.abs_diff(other.x),
            self.y.abs_diff(other.y),
            self.z.abs_diff(other.z),
        ]
    }

    /// Computes the Manhattan distance to another coordinate.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_spatial::VoxelCoord;
    ///
    /// let a = VoxelCoord::new(0, 0, 0);
    /// let b = VoxelCoord::new(3, 4, 5);
    /// assert_eq!(a.manhattan_distance(b), 12);
    /// ```
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        let [dx, dy, dz] = self.abs_delta(other);
        dx.saturating_add(dy).saturating_add(dz)
    }

    /// Returns the coordinate of the grid cell containing this voxel.
    ///
    /// Uses floor division so negative coordinates land in the cell below
    /// zero rather than being truncated toward it. A `cell_size` below 1 is
    /// treated as 1.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_spatial::VoxelCoord;
    ///
    /// assert_eq!(VoxelCoord::new(11, 12, -1).floor_div(12), VoxelCoord::new(0, 1, -1));
    /// ```
    #[must_use]
    pub const fn floor_div(self, cell_size: i32) -> Self {
        let cell = if cell_size < 1 { 1 } else { cell_size };
        Self::new(
            self.x.div_euclid(cell),
            self.y.div_euclid(cell),
            self.z.div_euclid(cell),
        )
    }

    /// Packs the coordinate into a single `i64` key.
    ///
    /// Lays out `x | y | z` from the most significant bit down, taking
    /// [`HORIZONTAL_AXIS_BITS`], [`VERTICAL_AXIS_BITS`] and
    /// [`HORIZONTAL_AXIS_BITS`] bits in two's complement.
    #[must_use]
    pub const fn pack(self) -> i64 {
        ((self.x as i64 & HORIZONTAL_MASK) << X_SHIFT)
            | ((self.y as i64 & VERTICAL_MASK) << HORIZONTAL_AXIS_BITS)
            | (self.z as i64 & HORIZONTAL_MASK)
    }

    /// Reverses [`VoxelCoord::pack`] for coordinates inside the packable range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn unpack(key: i64) -> Self {
        Self::new(
            (key >> X_SHIFT) as i32,
            ((key << HORIZONTAL_AXIS_BITS) >> (64 - VERTICAL_AXIS_BITS)) as i32,
            ((key << X_SHIFT) >> X_SHIFT) as i32,
        )
    }
}

impl From<[i32; 3]> for VoxelCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<VoxelCoord> for [i32; 3] {
    fn from(coord: VoxelCoord) -> Self {
        coord.as_array()
    }
}

impl std::ops::Add for VoxelCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_add(other.x),
            self.y.wrapping_add(other.y),
            self.z.wrapping_add(other.z),
        )
    }
}

impl std::ops::Sub for VoxelCoord {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_sub(other.x),
            self.y.wrapping_sub(other.y),
            self.z.wrapping_sub(other.z),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let coord = VoxelCoord::new(1, 2, 3);
        assert_eq!(coord.as_array(), [1, 2, 3]);
        assert_eq!(VoxelCoord::default(), VoxelCoord::origin());
    }

    #[test]
    fn test_center() {
        let center = VoxelCoord::new(1, -2, 3).center();
        assert_eq!(center, Point3::new(1.5, -1.5, 3.5));
    }

    #[test]
    fn test_manhattan_distance_negative() {
        let a = VoxelCoord::new(-5, -5, -5);
        let b = VoxelCoord::new(5, 5, 5);
        assert_eq!(a.manhattan_distance(b), 30);
        assert_eq!(b.manhattan_distance(a), 30);
    }

    #[test]
    fn test_floor_div_negative() {
        assert_eq!(
            VoxelCoord::new(-1, -12, -13).floor_div(12),
            VoxelCoord::new(-1, -1, -2)
        );
        assert_eq!(
            VoxelCoord::new(0, 11, 24).floor_div(12),
            VoxelCoord::new(0, 0, 2)
        );
    }

    #[test]
    fn test_floor_div_clamps_cell_size() {
        let coord = VoxelCoord::new(-4, 7, 9);
        assert_eq!(coord.floor_div(0), coord);
        assert_eq!(coord.floor_div(-3), coord);
    }

    #[test]
    fn test_pack_roundtrip_extremes() {
        let wide = 1 << (HORIZONTAL_AXIS_BITS - 1);
        let tall = 1 << (VERTICAL_AXIS_BITS - 1);
        for coord in [
            VoxelCoord::origin(),
            VoxelCoord::new(-1, -1, -1),
            VoxelCoord::new(wide - 1, -tall, 0),
            VoxelCoord::new(-wide, tall - 1, -wide),
            VoxelCoord::new(30_000_000, -64, -30_000_000),
            VoxelCoord::new(-29_999_999, 319, 29_999_999),
        ] {
            assert_eq!(VoxelCoord::unpack(coord.pack()), coord);
        }
    }

    #[test]
    fn test_pack_keeps_far_cells_apart() {
        // 2^21 apart on x, beyond a 21-bit lane.
        let near = VoxelCoord::new(5, 70, -9);
        let far = VoxelCoord::new(5 + (1 << 21), 70, -9);
        assert_ne!(near.pack(), far.pack());
        assert_eq!(VoxelCoord::unpack(far.pack()), far);
    }

    #[test]
    fn test_pack_distinguishes_axes() {
        let a = VoxelCoord::new(1, 0, 0).pack();
        let b = VoxelCoord::new(0, 1, 0).pack();
        let c = VoxelCoord::new(0, 0, 1).pack();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_operators() {
        let a = VoxelCoord::new(1, 2, 3);
        let b = VoxelCoord::new(4, 5, 6);
        assert_eq!(a + b, VoxelCoord::new(5, 7, 9));
        assert_eq!(b - a, VoxelCoord::new(3, 3, 3));
    }

    #[test]
    fn test_array_conversions() {
        let coord: VoxelCoord = [1, 2, 3].into();
        let array: [i32; 3] = coord.into();
        assert_eq!(array, [1, 2, 3]);
    }
}
