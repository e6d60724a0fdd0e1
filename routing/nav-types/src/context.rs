//! Per-search and per-edge contexts handed to processors.
//!
//! A [`SearchContext`] lives for one search. It owns the start and target,
//! the configuration, the optional host environment and a scratch map
//! ([`SharedData`]) that processors may use to pass data between calls.
//!
//! An [`EvaluationContext`] describes one candidate edge: the candidate
//! position, its parent and grandparent, and the costs accumulated so far.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use nav_spatial::Position;

use crate::config::PathfinderConfiguration;
use crate::navigation::{EnvironmentContext, NavigationPointProvider};

/// Interior-mutable scratch storage scoped to one search.
///
/// Values are keyed by string and stored type-erased. A search runs on a
/// single thread, so access goes through a `RefCell`; re-entrant mutation
/// (calling [`SharedData::update`] from inside another update on the same
/// map) is refused rather than panicking.
///
/// # Example
///
/// ```
/// use nav_types::SharedData;
///
/// let data = SharedData::new();
/// data.insert("visited", 0_u32);
/// assert!(data.update("visited", |count: &mut u32| *count += 1));
/// assert_eq!(data.get_cloned::<u32>("visited"), Some(1));
/// ```
#[derive(Default)]
pub struct SharedData {
    values: RefCell<HashMap<String, Box<dyn Any + Send>>>,
}

impl SharedData {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Returns `false` if the map is currently borrowed by an update.
    pub fn insert<T: Any + Send>(&self, key: impl Into<String>, value: T) -> bool {
        let Ok(mut values) = self.values.try_borrow_mut() else {
            return false;
        };
        values.insert(key.into(), Box::new(value));
        true
    }

    /// Returns a clone of the value under `key` if it exists and has type `T`.
    #[must_use]
    pub fn get_cloned<T: Any + Clone>(&self, key: &str) -> Option<T> {
        let values = self.values.try_borrow().ok()?;
        values.get(key)?.downcast_ref::<T>().cloned()
    }

    /// Mutates the value under `key` in place.
    ///
    /// Returns `true` if a value of type `T` was found and updated.
    pub fn update<T: Any + Send>(&self, key: &str, f: impl FnOnce(&mut T)) -> bool {
        let Ok(mut values) = self.values.try_borrow_mut() else {
            return false;
        };
        match values.get_mut(key).and_then(|v| v.downcast_mut::<T>()) {
            Some(value) => {
                f(value);
                true
            }
            None => false,
        }
    }

    /// Mutates the value under `key`, inserting `default()` first if absent.
    ///
    /// Returns `false` if a value of a different type occupies the key.
    pub fn upsert<T: Any + Send>(
        &self,
        key: &str,
        default: impl FnOnce() -> T,
        f: impl FnOnce(&mut T),
    ) -> bool {
        let Ok(mut values) = self.values.try_borrow_mut() else {
            return false;
        };
        let entry = values
            .entry(key.to_owned())
            .or_insert_with(|| Box::new(default()) as Box<dyn Any + Send>);
        match entry.downcast_mut::<T>() {
            Some(value) => {
                f(value);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the value under `key` if it has type `T`.
    ///
    /// A value of a different type is left in place.
    pub fn remove<T: Any + Send>(&self, key: &str) -> Option<T> {
        let mut values = self.values.try_borrow_mut().ok()?;
        if !values.get(key)?.is::<T>() {
            return None;
        }
        let boxed: Box<dyn Any> = values.remove(key)?;
        boxed.downcast::<T>().ok().map(|b| *b)
    }

    /// Returns `true` if any value is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values
            .try_borrow()
            .is_ok_and(|values| values.contains_key(key))
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.try_borrow().map_or(0, |values| values.len())
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SharedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedData")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Everything that stays fixed for the duration of one search.
pub struct SearchContext {
    start: Position,
    target: Position,
    configuration: Arc<PathfinderConfiguration>,
    environment: Option<EnvironmentContext>,
    shared: SharedData,
}

impl SearchContext {
    /// Creates a context with empty shared data.
    #[must_use]
    pub fn new(
        start: Position,
        target: Position,
        configuration: Arc<PathfinderConfiguration>,
        environment: Option<EnvironmentContext>,
    ) -> Self {
        Self {
            start,
            target,
            configuration,
            environment,
            shared: SharedData::new(),
        }
    }

    /// Where the search started.
    #[must_use]
    pub const fn start(&self) -> &Position {
        &self.start
    }

    /// Where the search is headed.
    #[must_use]
    pub const fn target(&self) -> &Position {
        &self.target
    }

    /// The configuration the search runs with.
    #[must_use]
    pub fn configuration(&self) -> &PathfinderConfiguration {
        &self.configuration
    }

    /// The configured world provider.
    #[must_use]
    pub fn provider(&self) -> &dyn NavigationPointProvider {
        self.configuration.provider()
    }

    /// The host environment passed to this search, if any.
    #[must_use]
    pub const fn environment(&self) -> Option<&EnvironmentContext> {
        self.environment.as_ref()
    }

    /// Scratch storage for processors.
    #[must_use]
    pub const fn shared_data(&self) -> &SharedData {
        &self.shared
    }
}

impl fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchContext")
            .field("start", &self.start)
            .field("target", &self.target)
            .field("environment", &self.environment)
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}

/// The edge currently being evaluated: a candidate position reached from
/// its parent.
///
/// For the start node there is no parent; the cost to the previous
/// position and the base transition cost are both zero.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    search: &'a SearchContext,
    current: Position,
    previous: Option<Position>,
    grandparent: Option<Position>,
    depth: usize,
    heuristic: f64,
    cost_to_previous: f64,
    base_transition_cost: f64,
}

impl<'a> EvaluationContext<'a> {
    /// Creates a context for a candidate with no parent.
    #[must_use]
    pub const fn new(
        search: &'a SearchContext,
        current: Position,
        depth: usize,
        heuristic: f64,
    ) -> Self {
        Self {
            search,
            current,
            previous: None,
            grandparent: None,
            depth,
            heuristic,
            cost_to_previous: 0.0,
            base_transition_cost: 0.0,
        }
    }

    /// Attaches the parent edge.
    ///
    /// `cost_to_previous` is the parent's g-cost; `base_transition_cost` is
    /// the heuristic strategy's cost for the parent→candidate move, already
    /// checked and clamped.
    #[must_use]
    pub const fn with_parent(
        mut self,
        previous: Position,
        grandparent: Option<Position>,
        cost_to_previous: f64,
        base_transition_cost: f64,
    ) -> Self {
        self.previous = Some(previous);
        self.grandparent = grandparent;
        self.cost_to_previous = cost_to_previous;
        self.base_transition_cost = base_transition_cost;
        self
    }

    /// The candidate position.
    #[must_use]
    pub const fn current(&self) -> &Position {
        &self.current
    }

    /// The parent position, if any.
    #[must_use]
    pub const fn previous(&self) -> Option<&Position> {
        self.previous.as_ref()
    }

    /// The parent's parent, if any.
    #[must_use]
    pub const fn grandparent(&self) -> Option<&Position> {
        self.grandparent.as_ref()
    }

    /// Depth of the candidate node (start is 0).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The candidate's heuristic value.
    #[must_use]
    pub const fn heuristic(&self) -> f64 {
        self.heuristic
    }

    /// Accumulated cost up to the parent.
    #[must_use]
    pub const fn cost_to_previous(&self) -> f64 {
        self.cost_to_previous
    }

    /// Base cost of the parent→candidate move.
    #[must_use]
    pub const fn base_transition_cost(&self) -> f64 {
        self.base_transition_cost
    }

    /// The enclosing search context.
    #[must_use]
    pub const fn search(&self) -> &'a SearchContext {
        self.search
    }

    /// Shortcut for [`SearchContext::configuration`].
    #[must_use]
    pub fn configuration(&self) -> &'a PathfinderConfiguration {
        self.search.configuration()
    }

    /// Shortcut for [`SearchContext::provider`].
    #[must_use]
    pub fn provider(&self) -> &'a dyn NavigationPointProvider {
        self.search.provider()
    }

    /// Shortcut for [`SearchContext::shared_data`].
    #[must_use]
    pub const fn shared_data(&self) -> &'a SharedData {
        self.search.shared_data()
    }

    /// Shortcut for [`SearchContext::start`].
    #[must_use]
    pub const fn start(&self) -> &'a Position {
        self.search.start()
    }

    /// Shortcut for [`SearchContext::target`].
    #[must_use]
    pub const fn target(&self) -> &'a Position {
        self.search.target()
    }

    /// Shortcut for [`SearchContext::environment`].
    #[must_use]
    pub const fn environment(&self) -> Option<&'a EnvironmentContext> {
        self.search.environment()
    }
}
