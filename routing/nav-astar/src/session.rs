//! Per-search mutable state.

use std::time::{Duration, Instant};

use hashbrown::HashMap;
use nav_spatial::Position;
use nav_types::SearchContext;
use nav_types::processing::finalize_all;
use tracing::debug;

use crate::heap::IndexedMinHeap;
use crate::node::{Node, NodeId};
use crate::region::RegionIndex;

/// The state of one search: open set, closed-cost cache, node arena and
/// region index.
///
/// A session is created by [`crate::AStarPathfinder::begin`] and advanced
/// with [`crate::AStarPathfinder::step`]. It belongs to exactly one search
/// and is never shared, so any number of sessions may run against the same
/// pathfinder at once. When the search ends the working structures are
/// released and further steps fail with
/// [`nav_types::PathfindingError::NoActiveSession`].
///
/// Every processor sees exactly one `finalize_search` per session: when the
/// search ends, on [`PathfindingSession::cancel`], or when an unfinished
/// session is dropped.
#[derive(Debug)]
pub struct PathfindingSession {
    pub(crate) context: SearchContext,
    pub(crate) nodes: Vec<Node>,
    pub(crate) open: IndexedMinHeap,
    pub(crate) closed_costs: HashMap<i64, f64>,
    pub(crate) regions: RegionIndex,
    pub(crate) best: Option<NodeId>,
    pub(crate) iterations: usize,
    pub(crate) nodes_expanded: usize,
    pub(crate) started: Instant,
    pub(crate) finished: bool,
}

impl PathfindingSession {
    /// Opens a session with the start node in the open set.
    pub(crate) fn new(context: SearchContext, start_heuristic: f64) -> Self {
        let configuration = context.configuration();
        let regions = RegionIndex::new(
            configuration.grid_cell_size(),
            configuration.bloom_filter_size(),
            configuration.bloom_filter_fpp(),
        );

        let start = *context.start();
        let root = Node::start(start, start_heuristic);
        let mut open = IndexedMinHeap::new();
        open.insert_or_update(start.floored().pack(), root.f(), start_heuristic, 0, NodeId(0));

        Self {
            context,
            nodes: vec![root],
            open,
            closed_costs: HashMap::new(),
            regions,
            best: None,
            iterations: 0,
            nodes_expanded: 0,
            started: Instant::now(),
            finished: false,
        }
    }

    /// The read-only search context.
    #[must_use]
    pub const fn context(&self) -> &SearchContext {
        &self.context
    }

    /// Where the search started.
    #[must_use]
    pub const fn start(&self) -> &Position {
        self.context.start()
    }

    /// Where the search is headed.
    #[must_use]
    pub const fn target(&self) -> &Position {
        self.context.target()
    }

    /// Number of extractions so far.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of nodes expanded so far.
    #[must_use]
    pub const fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    /// Number of nodes currently in the open set.
    #[must_use]
    pub fn open_set_size(&self) -> usize {
        self.open.len()
    }

    /// Number of grid regions holding expanded positions.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.region_count()
    }

    /// Wall-clock time since the session was opened.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Returns `true` once the search has produced a result or failed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Positions from the start to `id`, following parent links.
    pub(crate) fn trace_back(&self, id: NodeId) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.nodes[id.0].depth() + 1);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self.nodes[current.0];
            positions.push(*node.position());
            cursor = node.parent();
        }
        positions.reverse();
        positions
    }

    /// Abandons an unfinished search.
    ///
    /// Runs `finalize_search` on every processor and releases the working
    /// structures. Does nothing if the search already ended.
    pub fn cancel(&mut self) {
        if self.finished {
            return;
        }
        debug!(
            iterations = self.iterations,
            nodes_expanded = self.nodes_expanded,
            "A* search cancelled"
        );
        self.finish();
    }

    /// Finalizes every processor, then drops the working structures and
    /// marks the session finished.
    pub(crate) fn finish(&mut self) {
        let configuration = self.context.configuration();
        finalize_all(
            configuration.validation_processors(),
            configuration.cost_processors(),
            &self.context,
        );
        self.finished = true;
        self.nodes = Vec::new();
        self.open.clear();
        self.closed_costs = HashMap::new();
        self.regions.clear();
        self.best = None;
    }
}

impl Drop for PathfindingSession {
    fn drop(&mut self) {
        // A processor that panicked mid-step is not called again while
        // unwinding.
        if !std::thread::panicking() {
            self.cancel();
        }
    }
}
