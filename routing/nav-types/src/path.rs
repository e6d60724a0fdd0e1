//! Non-empty ordered paths.

use std::fmt;

use nav_spatial::Position;

use crate::error::PathfindingError;

/// An immutable, non-empty sequence of positions.
///
/// # Example
///
/// ```
/// use nav_types::Path;
/// use nav_spatial::Position;
///
/// let path = Path::new(vec![
///     Position::new(0.0, 0.0, 0.0),
///     Position::new(1.0, 0.0, 0.0),
///     Position::new(2.0, 0.0, 0.0),
/// ])
/// .unwrap();
///
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.start(), &Position::new(0.0, 0.0, 0.0));
/// assert_eq!(path.end(), &Position::new(2.0, 0.0, 0.0));
/// assert!(Path::new(Vec::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path {
    positions: Vec<Position>,
}

impl Path {
    /// Creates a path from a non-empty list of positions.
    ///
    /// # Errors
    ///
    /// Returns [`PathfindingError::EmptyPath`] if `positions` is empty.
    pub fn new(positions: Vec<Position>) -> Result<Self, PathfindingError> {
        if positions.is_empty() {
            return Err(PathfindingError::EmptyPath);
        }
        Ok(Self { positions })
    }

    /// A path with a single position.
    #[must_use]
    pub fn single(position: Position) -> Self {
        Self {
            positions: vec![position],
        }
    }

    /// First position.
    #[must_use]
    pub fn start(&self) -> &Position {
        &self.positions[0]
    }

    /// Last position.
    #[must_use]
    pub fn end(&self) -> &Position {
        &self.positions[self.positions.len() - 1]
    }

    /// Number of positions. Always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates positions from start to end.
    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.positions.iter()
    }

    /// The positions as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Position] {
        &self.positions
    }

    /// Copies the positions into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Position> {
        self.positions.clone()
    }

    /// Consumes the path, returning its positions.
    #[must_use]
    pub fn into_vec(self) -> Vec<Position> {
        self.positions
    }

    /// Sum of Euclidean distances between consecutive raw positions.
    #[must_use]
    pub fn euclidean_length(&self) -> f64 {
        self.positions.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    /// Applies `f` to every position.
    #[must_use]
    pub fn map_positions(&self, f: impl FnMut(&Position) -> Position) -> Self {
        Self {
            positions: self.positions.iter().map(f).collect(),
        }
    }

    /// This path followed by `other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut positions = Vec::with_capacity(self.len() + other.len());
        positions.extend_from_slice(&self.positions);
        positions.extend_from_slice(&other.positions);
        Self { positions }
    }

    /// Drops every position whose raw coordinates are all within `epsilon`
    /// of the last kept position.
    ///
    /// The first position is always kept.
    #[must_use]
    pub fn dedup_within(&self, epsilon: f64) -> Self {
        let mut positions = self.positions.clone();
        positions.dedup_by(|next, kept| {
            (next.x() - kept.x()).abs() <= epsilon
                && (next.y() - kept.y()).abs() <= epsilon
                && (next.z() - kept.z()).abs() <= epsilon
        });
        Self { positions }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Path {
    type Item = Position;
    type IntoIter = std::vec::IntoIter<Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.into_iter()
    }
}

impl TryFrom<Vec<Position>> for Path {
    type Error = PathfindingError;

    fn try_from(positions: Vec<Position>) -> Result<Self, Self::Error> {
        Self::new(positions)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path[{} positions: {} -> {}]", self.len(), self.start(), self.end())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn line(n: usize) -> Path {
        #[allow(clippy::cast_precision_loss)]
        let positions = (0..n).map(|i| Position::new(i as f64, 0.0, 0.0)).collect();
        Path::new(positions).unwrap()
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Path::new(Vec::new()), Err(PathfindingError::EmptyPath));
        assert!(Path::try_from(Vec::new()).is_err());
    }

    #[test]
    fn test_single() {
        let p = Path::single(Position::new(1.0, 2.0, 3.0));
        assert_eq!(p.len(), 1);
        assert_eq!(p.start(), p.end());
        assert!(!p.is_empty());
        assert_eq!(p.euclidean_length(), 0.0);
    }

    #[test]
    fn test_iteration_orders() {
        let path = line(4);
        let xs: Vec<f64> = path.iter().map(Position::x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);

        let mut count = 0;
        for _ in &path {
            count += 1;
        }
        assert_eq!(count, 4);

        assert_eq!(path.to_vec().len(), 4);
        assert_eq!(path.clone().into_iter().count(), 4);
        assert_eq!(path.into_vec()[3].x(), 3.0);
    }

    #[test]
    fn test_dedup_within_compares_to_last_kept() {
        let path = Path::new(vec![
            Position::new(0.0, 0.0, 0.0),
            Position::new(0.4, 0.0, 0.0),
            Position::new(0.8, 0.0, 0.0),
            Position::new(0.8, 0.0, 0.0),
        ])
        .unwrap();
        // 0.4 and 0.8 are each within 0.5 of the previous point, but 0.8 is
        // not within 0.5 of the kept origin.
        let deduped = path.dedup_within(0.5);
        let xs: Vec<f64> = deduped.iter().map(Position::x).collect();
        assert_eq!(xs, vec![0.0, 0.8]);
    }

    #[test]
    fn test_map_and_concat() {
        let shifted = line(2).map_positions(|p| p.with_y(5.0));
        assert!(shifted.iter().all(|p| p.y() == 5.0));
        let joined = line(2).concat(&shifted);
        assert_eq!(joined.len(), 4);
        assert_eq!(joined.end().y(), 5.0);
    }

    #[test]
    fn test_length_and_display() {
        let path = line(5);
        assert_eq!(path.euclidean_length(), 4.0);
        assert_eq!(path.to_string(), "Path[5 positions: (0, 0, 0) -> (4, 0, 0)]");
    }
}
