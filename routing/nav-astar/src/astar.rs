//! A* search over pluggable neighbor, heuristic, cost and validation
//! strategies.
//!
//! # Example
//!
//! ```
//! use nav_astar::AStarPathfinder;
//! use nav_spatial::Position;
//! use nav_types::{PathState, PathfinderConfiguration};
//!
//! let pathfinder = AStarPathfinder::new(PathfinderConfiguration::new());
//! let result = pathfinder
//!     .find_path(Position::new(0.0, 0.0, 0.0), Position::new(5.0, 0.0, 0.0))
//!     .unwrap();
//!
//! assert_eq!(result.state(), PathState::Succeeded);
//! assert_eq!(result.path().map(|p| p.len()), Some(6));
//! assert!((result.cost() - 5.0).abs() < 1e-9);
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use nav_spatial::Position;
use nav_types::heuristic::{HeuristicContext, checked_transition_cost};
use nav_types::processing::{initialize_all, total_contribution, validate_all};
use nav_types::{
    EnvironmentContext, EvaluationContext, Path, PathState, PathfinderConfiguration,
    PathfinderResult, PathfindingError, SearchContext, SearchStats,
};
use tracing::{debug, trace, warn};

use crate::hooks::{PathfinderHook, PathfindingStep};
use crate::node::{Node, NodeId};
use crate::session::PathfindingSession;

/// Name reported in [`SearchStats::algorithm`].
pub const ALGORITHM_NAME: &str = "A*";

/// A* pathfinder.
///
/// Holds only the shared, immutable configuration and the registered hooks.
/// All mutable search state lives in a [`PathfindingSession`], one per
/// search, so a single pathfinder can serve concurrent searches from many
/// threads.
#[derive(Clone)]
pub struct AStarPathfinder {
    config: Arc<PathfinderConfiguration>,
    hooks: Vec<Arc<dyn PathfinderHook>>,
}

impl AStarPathfinder {
    /// Creates a pathfinder.
    ///
    /// Invalid parameters are logged and sanitized at search time: a grid
    /// cell size below 1 acts as 1, and bloom filter parameters are clamped
    /// into range. Use [`AStarPathfinder::try_new`] to reject them instead.
    #[must_use]
    pub fn new(config: PathfinderConfiguration) -> Self {
        if let Err(error) = config.validate() {
            warn!(%error, "Pathfinder configured with invalid parameters");
        }
        for issue in config.warnings() {
            warn!(issue = %issue, "Pathfinder configuration may overestimate");
        }
        Self {
            config: Arc::new(config),
            hooks: Vec::new(),
        }
    }

    /// Creates a pathfinder, rejecting invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PathfindingError::InvalidConfig`] if
    /// [`PathfinderConfiguration::validate`] fails.
    pub fn try_new(config: PathfinderConfiguration) -> Result<Self, PathfindingError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Adds a hook, builder style.
    #[must_use]
    pub fn with_hook(mut self, hook: impl PathfinderHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Adds a shared hook.
    pub fn register_hook(&mut self, hook: Arc<dyn PathfinderHook>) {
        self.hooks.push(hook);
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// The configuration searches run with.
    #[must_use]
    pub fn configuration(&self) -> &PathfinderConfiguration {
        &self.config
    }

    /// Finds a path from `start` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`PathfindingError::InvalidTransitionCost`] if the heuristic
    /// strategy produces a NaN or infinite edge cost.
    pub fn find_path(
        &self,
        start: Position,
        target: Position,
    ) -> Result<PathfinderResult, PathfindingError> {
        self.find_path_in(start, target, None)
    }

    /// Finds a path with a host environment handle visible to processors
    /// and the navigation provider.
    ///
    /// # Errors
    ///
    /// See [`AStarPathfinder::find_path`].
    pub fn find_path_in(
        &self,
        start: Position,
        target: Position,
        environment: Option<EnvironmentContext>,
    ) -> Result<PathfinderResult, PathfindingError> {
        let mut session = self.begin(start, target, environment);
        loop {
            if let Some(result) = self.step(&mut session)? {
                return Ok(result);
            }
        }
    }

    /// Starts a search and returns a task for its result.
    ///
    /// With [`PathfinderConfiguration::is_async`] set the search runs on a
    /// dedicated worker thread. Otherwise it runs to completion before this
    /// call returns. If the worker thread cannot be spawned the search runs
    /// inline.
    #[must_use]
    pub fn find_path_task(&self, start: Position, target: Position) -> PathfindingTask {
        if !self.config.is_async() {
            return PathfindingTask::ready(self.find_path(start, target));
        }

        let pathfinder = self.clone();
        let spawned = thread::Builder::new()
            .name("nav-astar-search".to_owned())
            .spawn(move || pathfinder.find_path(start, target));

        match spawned {
            Ok(handle) => PathfindingTask {
                inner: TaskState::Running(handle),
            },
            Err(error) => {
                warn!(%error, "Failed to spawn search thread, searching inline");
                PathfindingTask::ready(self.find_path(start, target))
            }
        }
    }

    /// Opens a session for a step-by-step search.
    ///
    /// Runs `initialize_search` on every configured processor and puts the
    /// start node in the open set. Dropping the session before it finishes
    /// cancels the search.
    #[must_use]
    pub fn begin(
        &self,
        start: Position,
        target: Position,
        environment: Option<EnvironmentContext>,
    ) -> PathfindingSession {
        let context = SearchContext::new(start, target, Arc::clone(&self.config), environment);
        initialize_all(
            self.config.validation_processors(),
            self.config.cost_processors(),
            &context,
        );

        let heuristic = heuristic_at(&context, start);
        debug!(
            start = %start,
            target = %target,
            heuristic,
            "Starting A* search"
        );
        PathfindingSession::new(context, heuristic)
    }

    /// Advances the search by one extraction.
    ///
    /// Returns `Ok(None)` while the search continues and `Ok(Some(result))`
    /// once it ends. Ending, by any outcome or error, runs
    /// `finalize_search` on every processor and releases the session.
    ///
    /// # Errors
    ///
    /// - [`PathfindingError::NoActiveSession`] if the session already ended
    /// - [`PathfindingError::InvalidTransitionCost`] if the heuristic
    ///   strategy produces a NaN or infinite edge cost
    pub fn step(
        &self,
        session: &mut PathfindingSession,
    ) -> Result<Option<PathfinderResult>, PathfindingError> {
        if session.finished {
            return Err(PathfindingError::NoActiveSession);
        }

        match self.advance(session) {
            Ok(None) => Ok(None),
            Ok(Some((state, node))) => {
                let result = self.conclude(session, state, node);
                session.finish();
                result.map(Some)
            }
            Err(error) => {
                warn!(%error, iterations = session.iterations, "A* search aborted");
                session.finish();
                Err(error)
            }
        }
    }

    /// One extraction. Returns the final state and the node to report, if
    /// the search ended.
    fn advance(
        &self,
        session: &mut PathfindingSession,
    ) -> Result<Option<(PathState, Option<NodeId>)>, PathfindingError> {
        let Some((key, id)) = session.open.extract_min() else {
            return Ok(Some((PathState::Exhausted, self.fallback_node(session))));
        };
        session.iterations += 1;

        let node = &session.nodes[id.0];
        if node.position() == session.context.target() {
            return Ok(Some((PathState::Succeeded, Some(id))));
        }
        if session.iterations > self.config.max_iterations() {
            return Ok(Some((PathState::IterationLimit, self.fallback_node(session))));
        }
        let max_length = self.config.max_length();
        if max_length > 0 && node.depth() >= max_length {
            return Ok(Some((PathState::LengthLimit, self.fallback_node(session))));
        }

        self.mark_expanded(session, key, id);
        self.expand(session, id)?;
        Ok(None)
    }

    fn fallback_node(&self, session: &PathfindingSession) -> Option<NodeId> {
        if self.config.fallback() { session.best } else { None }
    }

    fn mark_expanded(&self, session: &mut PathfindingSession, key: i64, id: NodeId) {
        let node = &session.nodes[id.0];
        let position = *node.position();

        if self.config.reopen_closed_nodes() {
            session.closed_costs.insert(key, node.g());
        }
        session.regions.insert(&position, key);
        session.nodes_expanded += 1;

        let improves = session
            .best
            .is_none_or(|best| node.heuristic() < session.nodes[best.0].heuristic());
        if improves {
            session.best = Some(id);
        }

        if !self.hooks.is_empty() {
            let step = PathfindingStep::new(position, node.depth(), session.iterations);
            for hook in &self.hooks {
                hook.on_step(&step);
            }
        }
    }

    /// Generates, evaluates and queues the successors of `parent`.
    fn expand(
        &self,
        session: &mut PathfindingSession,
        parent: NodeId,
    ) -> Result<(), PathfindingError> {
        let PathfindingSession {
            context,
            nodes,
            open,
            closed_costs,
            regions,
            ..
        } = session;
        let context = &*context;
        let config = context.configuration();

        let parent_node = &nodes[parent.0];
        let parent_position = *parent_node.position();
        let parent_g = parent_node.g();
        let parent_depth = parent_node.depth();
        let grandparent = parent_node.parent().map(|id| *nodes[id.0].position());
        let depth = parent_depth + 1;

        let offsets = config.neighbor_strategy().offsets(&parent_position);
        for offset in offsets.iter() {
            let position = parent_position.offset(offset);
            let key = position.floored().pack();
            let base =
                checked_transition_cost(config.heuristic_strategy(), &parent_position, &position)?;

            if let Some(existing) = open.node_of(key) {
                let node = &nodes[existing.0];
                let evaluation =
                    EvaluationContext::new(context, *node.position(), depth, node.heuristic())
                        .with_parent(parent_position, grandparent, parent_g, base);
                let new_g = edge_cost(config, &evaluation, parent_g, base);
                let old_g = node.g();

                let tolerance = ulp(new_g.abs().max(old_g.abs()));
                if new_g + tolerance >= old_g
                    || !validate_all(config.validation_processors(), &evaluation)
                {
                    continue;
                }
                let Some(old_key) = open.priority_of(key) else {
                    continue;
                };

                let node = &mut nodes[existing.0];
                node.reparent(parent, parent_depth, new_g);
                let new_key = node.f();
                let priority = if new_key + ulp(new_key) < old_key {
                    new_key
                } else if (new_key - old_key).abs() <= ulp(new_key) {
                    old_key - ulp(old_key)
                } else {
                    old_key
                };
                trace!(
                    position = %position,
                    old_g,
                    new_g,
                    "Reparented open node"
                );
                open.insert_or_update(key, priority, node.heuristic(), node.depth(), existing);
                continue;
            }

            let heuristic = heuristic_at(context, position);
            let evaluation = EvaluationContext::new(context, position, depth, heuristic)
                .with_parent(parent_position, grandparent, parent_g, base);

            if regions.contains(&position, key) {
                if !config.reopen_closed_nodes() {
                    continue;
                }
                let new_g = edge_cost(config, &evaluation, parent_g, base);
                let improves = closed_costs
                    .get(&key)
                    .is_none_or(|&closed_g| new_g + ulp(new_g) < closed_g);
                if !improves {
                    continue;
                }
                trace!(position = %position, new_g, "Reopening closed node");
                closed_costs.insert(key, new_g);
            }

            if !validate_all(config.validation_processors(), &evaluation) {
                continue;
            }
            let g = edge_cost(config, &evaluation, parent_g, base);
            let id = NodeId(nodes.len());
            nodes.push(Node::child(position, heuristic, g, parent, depth));
            open.insert_or_update(key, g + heuristic, heuristic, depth, id);
        }

        Ok(())
    }

    fn conclude(
        &self,
        session: &PathfindingSession,
        state: PathState,
        node: Option<NodeId>,
    ) -> Result<PathfinderResult, PathfindingError> {
        let (path, cost) = match node {
            Some(id) => (
                Some(Path::new(session.trace_back(id))?),
                session.nodes[id.0].g(),
            ),
            None => (None, 0.0),
        };

        let stats = SearchStats::new(ALGORITHM_NAME)
            .with_iterations(session.iterations)
            .with_nodes_expanded(session.nodes_expanded)
            .with_open_set_size(session.open.len())
            .with_elapsed(session.started.elapsed());

        debug!(
            state = %state,
            iterations = stats.iterations(),
            nodes_expanded = stats.nodes_expanded(),
            path_len = path.as_ref().map_or(0, Path::len),
            cost,
            elapsed_us = u64::try_from(stats.time_elapsed().as_micros()).unwrap_or(u64::MAX),
            "A* search finished"
        );

        Ok(PathfinderResult::new(state, path, cost, stats))
    }
}

impl std::fmt::Debug for AStarPathfinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AStarPathfinder")
            .field("config", &self.config)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

/// Heuristic value of `position` under the search's strategy and weights.
fn heuristic_at(context: &SearchContext, position: Position) -> f64 {
    let config = context.configuration();
    let heuristic = HeuristicContext::new(
        position,
        *context.start(),
        *context.target(),
        *config.heuristic_weights(),
    );
    config.heuristic_strategy().heuristic(&heuristic)
}

/// g-cost of reaching the evaluated candidate: the parent's g plus the base
/// transition cost and every processor contribution, clamped at zero.
fn edge_cost(
    config: &PathfinderConfiguration,
    evaluation: &EvaluationContext<'_>,
    parent_g: f64,
    base: f64,
) -> f64 {
    let contribution = total_contribution(config.cost_processors(), evaluation).value();
    parent_g + (base + contribution).max(0.0)
}

/// Distance from `value` to the next representable `f64` of larger
/// magnitude.
fn ulp(value: f64) -> f64 {
    let magnitude = value.abs();
    if !magnitude.is_finite() {
        return magnitude;
    }
    if magnitude.to_bits() == f64::MAX.to_bits() {
        return magnitude - f64::from_bits(magnitude.to_bits() - 1);
    }
    f64::from_bits(magnitude.to_bits() + 1) - magnitude
}

/// A search started by [`AStarPathfinder::find_path_task`].
#[derive(Debug)]
pub struct PathfindingTask {
    inner: TaskState,
}

#[derive(Debug)]
enum TaskState {
    Ready(Result<PathfinderResult, PathfindingError>),
    Running(JoinHandle<Result<PathfinderResult, PathfindingError>>),
}

impl PathfindingTask {
    const fn ready(result: Result<PathfinderResult, PathfindingError>) -> Self {
        Self {
            inner: TaskState::Ready(result),
        }
    }

    /// Returns `true` once the result is available without blocking.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        match &self.inner {
            TaskState::Ready(_) => true,
            TaskState::Running(handle) => handle.is_finished(),
        }
    }

    /// Blocks until the search ends.
    ///
    /// # Errors
    ///
    /// Returns the search's own error, or
    /// [`PathfindingError::WorkerPanicked`] if the worker thread panicked
    /// (for example inside a user processor).
    pub fn wait(self) -> Result<PathfinderResult, PathfindingError> {
        match self.inner {
            TaskState::Ready(result) => result,
            TaskState::Running(handle) => handle
                .join()
                .map_err(|_| PathfindingError::WorkerPanicked)?,
        }
    }
}
