//! Post-processing for search results.
//!
//! Every function here returns a new [`Path`]; the input is never modified.
//! Each output passes through [`remove_duplicates`] before it is returned,
//! so consecutive positions closer than [`DUPLICATE_EPSILON`] on every axis
//! are collapsed.
//!
//! # Example
//!
//! ```
//! use nav_astar::path_utils;
//! use nav_spatial::Position;
//! use nav_types::Path;
//!
//! let path = Path::new(vec![
//!     Position::new(0.0, 0.0, 0.0),
//!     Position::new(4.0, 0.0, 0.0),
//! ])
//! .unwrap();
//!
//! let dense = path_utils::interpolate(&path, 1.0).unwrap();
//! assert_eq!(dense.len(), 5);
//!
//! let sparse = path_utils::simplify(&dense, 0.5).unwrap();
//! assert_eq!(sparse.len(), 3);
//! ```

use nav_spatial::Position;
use nav_types::{Path, PathfindingError};

/// Per-axis tolerance under which consecutive positions count as the same
/// point.
pub const DUPLICATE_EPSILON: f64 = 1e-12;

/// Most steps [`interpolate`] will split a single segment into.
pub const MAX_SEGMENT_STEPS: usize = 1 << 20;

/// Inserts evenly spaced positions so that no segment is longer than
/// `resolution`.
///
/// A segment of length `d` is split into `ceil(d / resolution)` equal
/// steps. Original positions are all kept.
///
/// # Errors
///
/// Returns [`PathfindingError::InvalidArgument`] if `resolution` is not a
/// positive finite number, or if it would split any segment into more than
/// [`MAX_SEGMENT_STEPS`] steps.
pub fn interpolate(path: &Path, resolution: f64) -> Result<Path, PathfindingError> {
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(PathfindingError::invalid_argument(format!(
            "resolution must be > 0, got {resolution}"
        )));
    }

    #[allow(clippy::cast_precision_loss)]
    let step_cap = MAX_SEGMENT_STEPS as f64;

    let mut positions = Vec::with_capacity(path.len());
    positions.push(*path.start());
    for segment in path.as_slice().windows(2) {
        let (from, to) = (segment[0], segment[1]);
        let exact_steps = (from.distance(&to) / resolution).ceil();
        if exact_steps.is_nan() || exact_steps > step_cap {
            return Err(PathfindingError::invalid_argument(format!(
                "resolution {resolution} splits a segment into more than \
                 {MAX_SEGMENT_STEPS} steps"
            )));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = exact_steps as usize;
        for i in 1..steps {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / steps as f64;
            positions.push(from.lerp(&to, t));
        }
        positions.push(to);
    }

    build(positions)
}

/// Keeps every `round(1 / epsilon)`-th position.
///
/// This is uniform decimation, not a geometric simplification: it bounds
/// the number of points but gives no bound on how far the result deviates
/// from the input. The final position is always kept so the path still
/// ends where the input did.
///
/// # Errors
///
/// Returns [`PathfindingError::InvalidArgument`] unless `0 < epsilon <= 1`.
pub fn simplify(path: &Path, epsilon: f64) -> Result<Path, PathfindingError> {
    if !(epsilon > 0.0 && epsilon <= 1.0) {
        return Err(PathfindingError::invalid_argument(format!(
            "epsilon must be in (0.0, 1.0], got {epsilon}"
        )));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let stride = ((1.0 / epsilon).round() as usize).max(1);
    let last = path.len() - 1;
    let positions = path
        .iter()
        .enumerate()
        .filter(|(index, _)| index % stride == 0 || *index == last)
        .map(|(_, position)| *position)
        .collect();

    build(positions)
}

/// `first` followed by `second`.
#[must_use]
pub fn join(first: &Path, second: &Path) -> Path {
    remove_duplicates(&first.concat(second))
}

/// The first `max_length` positions of `path`.
///
/// # Errors
///
/// Returns [`PathfindingError::InvalidArgument`] if `max_length` is zero.
pub fn trim(path: &Path, max_length: usize) -> Result<Path, PathfindingError> {
    if max_length == 0 {
        return Err(PathfindingError::invalid_argument("max_length must be > 0"));
    }
    if path.len() <= max_length {
        return Ok(remove_duplicates(path));
    }
    build(path.iter().take(max_length).copied().collect())
}

/// Maps every position through `mutator`.
#[must_use]
pub fn mutate_positions(path: &Path, mutator: impl FnMut(&Position) -> Position) -> Path {
    remove_duplicates(&path.map_positions(mutator))
}

/// Collapses consecutive positions whose raw coordinates all differ by at
/// most [`DUPLICATE_EPSILON`].
///
/// Never lengthens the path; the first position is always kept.
#[must_use]
pub fn remove_duplicates(path: &Path) -> Path {
    path.dedup_within(DUPLICATE_EPSILON)
}

fn build(positions: Vec<Position>) -> Result<Path, PathfindingError> {
    Ok(remove_duplicates(&Path::new(positions)?))
}
