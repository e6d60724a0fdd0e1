//! Search nodes stored in a per-session arena.

use nav_spatial::Position;

/// Index of a node in a session's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// A search node.
///
/// The heuristic is computed once at creation. The g-cost reads as zero
/// until a parent is assigned, so the start node always has `g = 0`.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    position: Position,
    heuristic: f64,
    g_cost: f64,
    parent: Option<NodeId>,
    depth: usize,
}

impl Node {
    pub(crate) const fn start(position: Position, heuristic: f64) -> Self {
        Self {
            position,
            heuristic,
            g_cost: 0.0,
            parent: None,
            depth: 0,
        }
    }

    pub(crate) const fn child(
        position: Position,
        heuristic: f64,
        g_cost: f64,
        parent: NodeId,
        depth: usize,
    ) -> Self {
        Self {
            position,
            heuristic,
            g_cost,
            parent: Some(parent),
            depth,
        }
    }

    pub(crate) const fn position(&self) -> &Position {
        &self.position
    }

    pub(crate) const fn heuristic(&self) -> f64 {
        self.heuristic
    }

    pub(crate) const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) const fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn g(&self) -> f64 {
        if self.parent.is_none() { 0.0 } else { self.g_cost }
    }

    pub(crate) fn f(&self) -> f64 {
        self.g() + self.heuristic
    }

    /// Moves the node under a new parent. Depth follows the parent.
    pub(crate) fn reparent(&mut self, parent: NodeId, parent_depth: usize, g_cost: f64) {
        self.parent = Some(parent);
        self.depth = parent_depth + 1;
        self.g_cost = g_cost;
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn at(x: f64) -> Position {
        Position::new(x, 0.0, 0.0)
    }

    #[test]
    fn test_start_has_zero_g() {
        let node = Node::start(at(0.0), 5.0);
        assert_eq!(node.g(), 0.0);
        assert_eq!(node.f(), 5.0);
        assert_eq!(node.depth(), 0);
        assert!(node.parent().is_none());
    }

    #[test]
    fn test_child_and_reparent() {
        let mut node = Node::child(at(2.0), 3.0, 2.0, NodeId(1), 2);
        assert_eq!(node.f(), 5.0);

        node.reparent(NodeId(0), 0, 1.5);
        assert_eq!(node.parent(), Some(NodeId(0)));
        assert_eq!(node.depth(), 1);
        assert_eq!(node.g(), 1.5);
    }
}
