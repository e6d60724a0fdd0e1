//! Vector helpers on top of `nalgebra`.

use nalgebra::Point3;

/// Line length below which a start→target line is treated as a single point.
pub const DEGENERATE_LINE_EPSILON: f64 = 1e-9;

/// Squared distance from `point` to the infinite line through `line_start`
/// and `line_end`.
///
/// Computed as `|(p - a) × (b - a)|² / |b - a|²`. When the two line points
/// are closer than [`DEGENERATE_LINE_EPSILON`] the line collapses to a point
/// and the squared distance to `line_start` is returned instead.
///
/// # Example
///
/// ```
/// use nav_spatial::perpendicular_distance_squared;
/// use nalgebra::Point3;
///
/// let d = perpendicular_distance_squared(
///     &Point3::new(2.0, 3.0, 0.0),
///     &Point3::origin(),
///     &Point3::new(10.0, 0.0, 0.0),
/// );
/// assert!((d - 9.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn perpendicular_distance_squared(
    point: &Point3<f64>,
    line_start: &Point3<f64>,
    line_end: &Point3<f64>,
) -> f64 {
    let direction = line_end - line_start;
    let length_squared = direction.norm_squared();
    let to_point = point - line_start;

    if length_squared.sqrt() < DEGENERATE_LINE_EPSILON {
        return to_point.norm_squared();
    }

    to_point.cross(&direction).norm_squared() / length_squared
}

/// Distance from `point` to the infinite line through `line_start` and `line_end`.
///
/// See [`perpendicular_distance_squared`] for the degenerate case.
#[must_use]
pub fn perpendicular_distance(
    point: &Point3<f64>,
    line_start: &Point3<f64>,
    line_end: &Point3<f64>,
) -> f64 {
    perpendicular_distance_squared(point, line_start, line_end).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_on_line() {
        let d = perpendicular_distance(
            &Point3::new(5.0, 5.0, 5.0),
            &Point3::origin(),
            &Point3::new(1.0, 1.0, 1.0),
        );
        assert_relative_eq!(d, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_beyond_segment_uses_infinite_line() {
        let d = perpendicular_distance(
            &Point3::new(-20.0, 4.0, 0.0),
            &Point3::origin(),
            &Point3::new(1.0, 0.0, 0.0),
        );
        assert_relative_eq!(d, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_line_falls_back_to_start_distance() {
        let start = Point3::new(1.0, 1.0, 1.0);
        let d = perpendicular_distance(&Point3::new(4.0, 5.0, 1.0), &start, &start);
        assert_relative_eq!(d, 5.0, epsilon = 1e-12);

        let d_sq = perpendicular_distance_squared(&Point3::new(4.0, 5.0, 1.0), &start, &start);
        assert_relative_eq!(d_sq, 25.0, epsilon = 1e-12);
    }
}
