//! Property-based tests for path post-processing.
//!
//! Run with: cargo test -p nav-astar -- proptest

use nav_astar::path_utils;
use nav_spatial::Position;
use nav_types::Path;
use proptest::prelude::*;

fn arb_position() -> impl Strategy<Value = Position> {
    prop::array::uniform3(-50.0..50.0f64).prop_map(|[x, y, z]| Position::new(x, y, z))
}

/// Paths with occasional exact repeats so deduplication has work to do.
fn arb_path() -> impl Strategy<Value = Path> {
    prop::collection::vec((arb_position(), 1..3usize), 1..20).prop_map(|runs| {
        let positions = runs
            .into_iter()
            .flat_map(|(position, repeat)| std::iter::repeat_n(position, repeat))
            .collect();
        Path::new(positions).unwrap()
    })
}

fn same_point(a: &Position, b: &Position) -> bool {
    (a.x() - b.x()).abs() <= path_utils::DUPLICATE_EPSILON
        && (a.y() - b.y()).abs() <= path_utils::DUPLICATE_EPSILON
        && (a.z() - b.z()).abs() <= path_utils::DUPLICATE_EPSILON
}

proptest! {
    /// Deduplication never lengthens a path and keeps its first point.
    #[test]
    fn remove_duplicates_shrinks_and_keeps_start(path in arb_path()) {
        let cleaned = path_utils::remove_duplicates(&path);
        prop_assert!(cleaned.len() <= path.len());
        prop_assert!(same_point(cleaned.start(), path.start()));
        prop_assert!(same_point(cleaned.end(), path.end()));
        for pair in cleaned.as_slice().windows(2) {
            prop_assert!(!same_point(&pair[0], &pair[1]));
        }
    }

    /// Interpolating then decimating keeps both endpoints.
    #[test]
    fn interpolate_then_simplify_keeps_endpoints(
        path in arb_path(),
        resolution in 0.25..4.0f64,
        epsilon in 0.05..=1.0f64,
    ) {
        let dense = path_utils::interpolate(&path, resolution).unwrap();
        let sparse = path_utils::simplify(&dense, epsilon).unwrap();

        prop_assert!(same_point(dense.start(), path.start()));
        prop_assert!(same_point(dense.end(), path.end()));
        prop_assert!(same_point(sparse.start(), path.start()));
        prop_assert!(same_point(sparse.end(), path.end()));
        prop_assert!(sparse.len() <= dense.len());
    }

    /// No interpolated segment is longer than the resolution.
    #[test]
    fn interpolate_bounds_segment_length(path in arb_path(), resolution in 0.25..4.0f64) {
        let dense = path_utils::interpolate(&path, resolution).unwrap();
        for pair in dense.as_slice().windows(2) {
            prop_assert!(pair[0].distance(&pair[1]) <= resolution + 1e-9);
        }
    }

    /// Trimming caps the length and keeps a prefix.
    #[test]
    fn trim_keeps_prefix(path in arb_path(), max_length in 1..25usize) {
        let cleaned = path_utils::remove_duplicates(&path);
        let trimmed = path_utils::trim(&cleaned, max_length).unwrap();
        prop_assert!(trimmed.len() <= max_length);
        for (a, b) in trimmed.iter().zip(cleaned.iter()) {
            prop_assert!(same_point(a, b));
        }
    }

    /// Joining two paths keeps the outer endpoints.
    #[test]
    fn join_keeps_outer_endpoints(first in arb_path(), second in arb_path()) {
        let joined = path_utils::join(&first, &second);
        prop_assert!(same_point(joined.start(), first.start()));
        prop_assert!(same_point(joined.end(), second.end()));
        prop_assert!(joined.len() <= first.len() + second.len());
    }
}
