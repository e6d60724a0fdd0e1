//! Property-based tests for the search engine.
//!
//! Random obstacle fields in a small bounded box are solved both by the
//! engine and by a reference Dijkstra search from the `pathfinding` crate;
//! path costs must agree.
//!
//! Run with: cargo test -p nav-astar -- proptest

use std::collections::HashSet;
use std::sync::Arc;

use nav_astar::AStarPathfinder;
use nav_spatial::{Position, VoxelCoord};
use nav_types::{
    Connectivity, EnvironmentContext, HeuristicContext, HeuristicKind, HeuristicStrategy,
    HeuristicWeights, NavigationPoint, PathState, PathfinderConfiguration, PathfinderResult,
    validators,
};
use pathfinding::prelude::dijkstra;
use proptest::prelude::*;

const WIDTH: i32 = 6;
const HEIGHT: i32 = 3;

/// Edge costs are scaled to integers for the reference search.
const COST_SCALE: f64 = 1_000_000.0;

// =============================================================================
// Worlds
// =============================================================================

#[derive(Debug, Clone)]
struct World {
    blocked: HashSet<VoxelCoord>,
    start: VoxelCoord,
    target: VoxelCoord,
}

impl World {
    fn is_open(&self, v: VoxelCoord) -> bool {
        (0..WIDTH).contains(&v.x)
            && (0..HEIGHT).contains(&v.y)
            && (0..WIDTH).contains(&v.z)
            && !self.blocked.contains(&v)
    }
}

fn arb_voxel() -> impl Strategy<Value = VoxelCoord> {
    (0..WIDTH, 0..HEIGHT, 0..WIDTH).prop_map(|(x, y, z)| VoxelCoord::new(x, y, z))
}

fn arb_world() -> impl Strategy<Value = World> {
    (
        prop::collection::hash_set(arb_voxel(), 0..50),
        arb_voxel(),
        arb_voxel(),
    )
        .prop_map(|(mut blocked, start, target)| {
            blocked.remove(&start);
            blocked.remove(&target);
            World {
                blocked,
                start,
                target,
            }
        })
}

// =============================================================================
// Searches
// =============================================================================

fn search(world: &World, connectivity: Connectivity) -> PathfinderResult {
    let shared = Arc::new(world.clone());
    let provider = move |p: &Position, _: Option<&EnvironmentContext>| {
        if shared.is_open(p.floored()) {
            NavigationPoint::OPEN
        } else {
            NavigationPoint::BLOCKED
        }
    };
    let config = PathfinderConfiguration::new()
        .with_connectivity(connectivity)
        .with_provider(Arc::new(provider))
        .with_validation_processor(validators::navigable());

    AStarPathfinder::new(config)
        .find_path(Position::from_voxel(world.start), Position::from_voxel(world.target))
        .unwrap()
}

fn steps(connectivity: Connectivity) -> Vec<(VoxelCoord, u64)> {
    connectivity
        .offsets()
        .as_slice()
        .iter()
        .map(|o| {
            let step = VoxelCoord::new(o.x as i32, o.y as i32, o.z as i32);
            (step, (o.norm() * COST_SCALE).round() as u64)
        })
        .collect()
}

fn reference_cost(world: &World, connectivity: Connectivity) -> Option<f64> {
    let steps = steps(connectivity);
    dijkstra(
        &world.start,
        |v| {
            steps
                .iter()
                .map(|&(step, cost)| (*v + step, cost))
                .filter(|&(next, _)| world.is_open(next))
                .collect::<Vec<_>>()
        },
        |v| *v == world.target,
    )
    .map(|(_, cost)| cost as f64 / COST_SCALE)
}

fn check_against_reference(
    world: &World,
    connectivity: Connectivity,
) -> Result<(), TestCaseError> {
    let result = search(world, connectivity);

    let Some(expected) = reference_cost(world, connectivity) else {
        prop_assert_eq!(result.state(), PathState::Exhausted);
        return Ok(());
    };

    prop_assert_eq!(result.state(), PathState::Succeeded);
    prop_assert!(
        (result.cost() - expected).abs() < 1e-3,
        "engine cost {} != reference cost {}",
        result.cost(),
        expected
    );

    let path = result.path().unwrap();
    prop_assert_eq!(path.start().floored(), world.start);
    prop_assert_eq!(path.end().floored(), world.target);

    let legal: HashSet<VoxelCoord> = steps(connectivity).into_iter().map(|(s, _)| s).collect();
    for pair in path.as_slice().windows(2) {
        let step = pair[1].floored() - pair[0].floored();
        prop_assert!(legal.contains(&step), "illegal step {:?}", step);
        prop_assert!(world.is_open(pair[1].floored()));
    }
    Ok(())
}

// =============================================================================
// Property Tests: Optimality
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// With uniform costs and an admissible heuristic the engine finds a
    /// shortest path on the 6-connected grid.
    #[test]
    fn cardinal_cost_matches_dijkstra(world in arb_world()) {
        check_against_reference(&world, Connectivity::Cardinal6)?;
    }

    /// Same on the 10-connected grid (horizontal diagonals cost √2).
    #[test]
    fn horizontal_diagonal_cost_matches_dijkstra(world in arb_world()) {
        check_against_reference(&world, Connectivity::HorizontalDiagonal10)?;
    }

    /// Same on the 26-connected grid.
    #[test]
    fn full_cost_matches_dijkstra(world in arb_world()) {
        check_against_reference(&world, Connectivity::Full26)?;
    }
}

// =============================================================================
// Property Tests: Heuristics and positions
// =============================================================================

fn arb_position() -> impl Strategy<Value = Position> {
    prop::array::uniform3(-1000.0..1000.0f64).prop_map(|[x, y, z]| Position::new(x, y, z))
}

fn arb_weights() -> impl Strategy<Value = HeuristicWeights> {
    prop::array::uniform4(0.0..2.0f64).prop_map(|[m, o, p, h]| HeuristicWeights::new(m, o, p, h))
}

proptest! {
    /// Every built-in heuristic is zero at the target.
    #[test]
    fn heuristic_is_zero_at_target(
        target in arb_position(),
        start in arb_position(),
        weights in arb_weights(),
    ) {
        for kind in [HeuristicKind::Linear, HeuristicKind::Squared] {
            let context = HeuristicContext::new(target, start, target, weights);
            prop_assert_eq!(kind.strategy().heuristic(&context), 0.0);
        }
    }

    /// Heuristics never go negative.
    #[test]
    fn heuristic_is_non_negative(
        position in arb_position(),
        start in arb_position(),
        target in arb_position(),
        weights in arb_weights(),
    ) {
        for kind in [HeuristicKind::Linear, HeuristicKind::Squared] {
            let context = HeuristicContext::new(position, start, target, weights);
            prop_assert!(kind.strategy().heuristic(&context) >= 0.0);
        }
    }

    /// Positions in the same unit cell are equal and hash alike.
    #[test]
    fn positions_compare_by_voxel(
        cell in prop::array::uniform3(-500..500i32),
        a in prop::array::uniform3(0.0..0.999f64),
        b in prop::array::uniform3(0.0..0.999f64),
    ) {
        let base = cell.map(f64::from);
        let p = Position::new(base[0] + a[0], base[1] + a[1], base[2] + a[2]);
        let q = Position::new(base[0] + b[0], base[1] + b[1], base[2] + b[2]);
        prop_assert_eq!(p, q);

        let set: HashSet<Position> = [p, q].into_iter().collect();
        prop_assert_eq!(set.len(), 1);
    }

    /// An iteration cap of one never yields a multi-hop path.
    #[test]
    fn single_iteration_never_succeeds_far(
        start in arb_voxel(),
        target in arb_voxel(),
    ) {
        // An adjacent target is reached on the second extraction.
        prop_assume!(start.manhattan_distance(target) >= 2);
        let config = PathfinderConfiguration::new().with_max_iterations(1);
        let result = AStarPathfinder::new(config)
            .find_path(Position::from_voxel(start), Position::from_voxel(target))
            .unwrap();
        prop_assert_eq!(result.state(), PathState::IterationLimit);
        prop_assert!(result.stats().iterations() <= 2);
    }
}
