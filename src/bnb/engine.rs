//! Best-first branch-and-bound driver.
//!
//! The engine keeps a pool of open [`PartialSolution`]s and an incumbent.
//! Each iteration takes the most promising open node, splits it on the edge
//! chosen by the regret heuristic, and sweeps the pool: solved nodes are
//! accepted or rejected first, then every remaining node whose bound reaches
//! the (possibly tightened) incumbent, or that cannot be completed, is
//! dropped.

use tracing::{debug, info, trace};

use super::selection::ZERO_TOLERANCE;
use super::{BnbConfig, BnbError, BnbOutcome, NodeFate, PartialSolution, SearchStatistics, Termination};
use crate::constructive::nearest_neighbor;
use crate::evaluation::RouteEvaluator;
use crate::models::{NodeId, RoutingProblem, Solution};

/// Exact CVRP solver using Little's branch-and-bound.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::bnb::{BnbConfig, BranchAndBound};
/// use cvrp_bnb::models::{Customer, Instance, Vehicle};
///
/// let instance = Instance::euclidean(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(2, 1.0, 0.0, 1),
///         Customer::new(3, 1.0, 1.0, 1),
///         Customer::new(4, 0.0, 1.0, 1),
///     ],
///     Vehicle::fleet(1, 10),
/// );
///
/// let outcome = BranchAndBound::new(BnbConfig::default())
///     .solve(&instance)
///     .unwrap();
/// assert!(outcome.is_optimal());
/// assert!((outcome.best_distance().unwrap() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BranchAndBound {
    config: BnbConfig,
}

impl BranchAndBound {
    /// Creates a solver with the given configuration.
    pub fn new(config: BnbConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &BnbConfig {
        &self.config
    }

    /// Searches `problem` until the pool is empty or the iteration cap is hit.
    ///
    /// # Errors
    ///
    /// Invalid instances and internal bookkeeping violations abort the run.
    /// An instance without a feasible solution is not an error: the outcome
    /// simply carries no solution.
    pub fn solve<P: RoutingProblem>(&self, problem: &P) -> Result<BnbOutcome, BnbError> {
        let mut search = Search::new(problem, &self.config)?;
        search.run()?;
        Ok(search.finish())
    }
}

/// Solves `problem` with the default configuration and an optional known
/// upper bound.
///
/// # Errors
///
/// See [`BranchAndBound::solve`].
pub fn solve<P: RoutingProblem>(
    problem: &P,
    initial_upper_bound: Option<f64>,
) -> Result<BnbOutcome, BnbError> {
    let mut config = BnbConfig::default();
    if let Some(bound) = initial_upper_bound {
        config = config.with_initial_upper_bound(bound);
    }
    BranchAndBound::new(config).solve(problem)
}

struct Search<'a, P: RoutingProblem> {
    problem: &'a P,
    max_iterations: usize,
    pool: Vec<PartialSolution>,
    upper_bound: f64,
    incumbent: Option<Solution>,
    iterations: usize,
    termination: Termination,
    stats: SearchStatistics,
}

impl<'a, P: RoutingProblem> Search<'a, P> {
    fn new(problem: &'a P, config: &BnbConfig) -> Result<Self, BnbError> {
        let root = PartialSolution::root(problem)?;
        let mut stats = SearchStatistics::default();
        stats.on_node_created();
        stats.root_lower_bound = root.lower_bound();

        info!(
            customers = problem.num_customers(),
            vehicles = problem.vehicles().len(),
            symmetric = problem.distances().is_symmetric(ZERO_TOLERANCE),
            root_bound = root.lower_bound(),
            "starting branch-and-bound"
        );

        let mut search = Self {
            problem,
            max_iterations: config.max_iterations(),
            pool: vec![root],
            upper_bound: config.initial_upper_bound().unwrap_or(f64::INFINITY),
            incumbent: None,
            iterations: 0,
            termination: Termination::Exhausted,
            stats,
        };
        if config.warm_start() {
            search.warm_start();
        }
        Ok(search)
    }

    fn warm_start(&mut self) {
        let solution = nearest_neighbor(self.problem);
        let (distance, violations) = RouteEvaluator::new(self.problem).evaluate_solution(&solution);
        let uses_fleet = solution.num_routes() == self.problem.vehicles().len();

        if uses_fleet && violations.is_empty() && distance < self.upper_bound {
            info!("warm start incumbent with distance {distance:.3}");
            self.upper_bound = distance;
            self.incumbent = Some(solution);
        } else {
            debug!(
                routes = solution.num_routes(),
                violations = violations.len(),
                "nearest-neighbor warm start discarded"
            );
        }
    }

    fn run(&mut self) -> Result<(), BnbError> {
        self.sweep();
        while !self.pool.is_empty() {
            if self.iterations >= self.max_iterations {
                info!(
                    open = self.pool.len(),
                    "iteration cap of {} reached", self.max_iterations
                );
                self.termination = Termination::IterationLimit;
                break;
            }
            self.step()?;
        }
        Ok(())
    }

    fn step(&mut self) -> Result<(), BnbError> {
        let node = self.pool.remove(self.most_promising());
        self.branch(&node)?;
        self.iterations += 1;
        self.sweep();
        Ok(())
    }

    fn most_promising(&self) -> usize {
        let mut best = 0;
        for (idx, node) in self.pool.iter().enumerate().skip(1) {
            if is_more_promising(node, &self.pool[best]) {
                best = idx;
            }
        }
        best
    }

    fn branch(&mut self, node: &PartialSolution) -> Result<(), BnbError> {
        let edge = node.select_edge()?;
        debug!(
            iteration = self.iterations,
            lower_bound = node.lower_bound(),
            depth = node.depth(),
            edge = %edge,
            open = self.pool.len(),
            "branching"
        );

        let with = node.with_edge(edge, self.problem)?;
        let without = node.without_edge(edge)?;
        debug_assert!(with.lower_bound() >= node.lower_bound());
        debug_assert!(without.lower_bound() >= node.lower_bound());

        self.pool.push(with);
        self.pool.push(without);
        self.stats.on_node_created();
        self.stats.on_node_created();
        self.stats.on_branch(self.pool.len());
        Ok(())
    }

    /// Settles solved nodes, then drops dominated and infeasible ones.
    fn sweep(&mut self) {
        let (solved, open): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pool)
            .into_iter()
            .partition(PartialSolution::is_solved);

        for node in solved {
            let fate = self.settle(&node);
            self.record(&node, fate);
        }

        for node in open {
            if node.lower_bound() >= self.upper_bound {
                self.record(&node, NodeFate::PrunedBound);
            } else if node.is_infeasible() {
                self.record(&node, NodeFate::PrunedInfeasible);
            } else {
                self.pool.push(node);
            }
        }
    }

    fn settle(&mut self, node: &PartialSolution) -> NodeFate {
        if !node.is_feasible() {
            return NodeFate::Rejected;
        }
        let distance = node.total_distance(self.problem);
        if distance >= self.upper_bound {
            return NodeFate::Rejected;
        }

        let routes: Vec<Vec<NodeId>> = node.routes().iter().map(|r| r.nodes().to_vec()).collect();
        info!(
            iteration = self.iterations,
            routes = routes.len(),
            "new incumbent with distance {distance:.3}"
        );
        self.upper_bound = distance;
        self.incumbent = Some(RouteEvaluator::new(self.problem).build_solution(&routes));
        NodeFate::Accepted
    }

    fn record(&mut self, node: &PartialSolution, fate: NodeFate) {
        trace!(
            lower_bound = node.lower_bound(),
            depth = node.depth(),
            "node {fate}"
        );
        self.stats.on_fate(fate);
    }

    fn finish(self) -> BnbOutcome {
        info!(
            iterations = self.iterations,
            termination = ?self.termination,
            best = ?self.incumbent.as_ref().map(Solution::total_cost),
            "branch-and-bound finished"
        );
        BnbOutcome::new(
            self.incumbent,
            self.upper_bound,
            self.iterations,
            self.termination,
            self.stats,
        )
    }
}

/// Lower bound first; on a tie the node with more committed edges wins.
fn is_more_promising(candidate: &PartialSolution, best: &PartialSolution) -> bool {
    let diff = candidate.lower_bound() - best.lower_bound();
    if diff.abs() <= ZERO_TOLERANCE {
        candidate.depth() > best.depth()
    } else {
        diff < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Instance, Vehicle};

    fn square(capacity: i32) -> Instance {
        Instance::euclidean(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(2, 1.0, 0.0, 1),
                Customer::new(3, 1.0, 1.0, 1),
                Customer::new(4, 0.0, 1.0, 1),
            ],
            Vehicle::fleet(1, capacity),
        )
    }

    fn pentagon(fleet: usize, capacity: i32) -> Instance {
        Instance::from_matrix(
            &[
                vec![0.0, 3.0, 4.0, 5.0, 4.0, 3.0],
                vec![3.0, 0.0, 2.0, 6.0, 7.0, 5.0],
                vec![4.0, 2.0, 0.0, 3.0, 6.0, 7.0],
                vec![5.0, 6.0, 3.0, 0.0, 2.0, 6.0],
                vec![4.0, 7.0, 6.0, 2.0, 0.0, 2.0],
                vec![3.0, 5.0, 7.0, 6.0, 2.0, 0.0],
            ],
            &[0, 2, 3, 2, 3, 2],
            Vehicle::fleet(fleet, capacity),
        )
        .expect("consistent instance")
    }

    #[test]
    fn test_solves_square() {
        let outcome = solve(&square(10), None).expect("valid instance");
        assert!(outcome.is_optimal());
        assert!((outcome.best_distance().expect("solved") - 4.0).abs() < 1e-10);
        let routes = outcome.routes();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].first(), Some(&1));
        assert_eq!(routes[0].last(), Some(&1));
        assert_eq!(routes[0].len(), 5);
    }

    #[test]
    fn test_solves_asymmetric_triangle_in_cheap_direction() {
        let problem = Instance::from_matrix(
            &[
                vec![0.0, 1.0, 9.0],
                vec![9.0, 0.0, 1.0],
                vec![1.0, 9.0, 0.0],
            ],
            &[0, 1, 1],
            Vehicle::fleet(1, 5),
        )
        .expect("consistent instance");
        assert!(!problem.distances().is_symmetric(ZERO_TOLERANCE));

        let outcome = solve(&problem, None).expect("valid instance");
        assert!(outcome.is_optimal());
        assert_eq!(outcome.routes(), vec![vec![1, 2, 3, 1]]);
        assert!((outcome.best_distance().expect("solved") - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_pool_never_holds_dominated_nodes() {
        let problem = pentagon(2, 7);
        let mut search = Search::new(&problem, &BnbConfig::default()).expect("valid instance");
        search.sweep();
        while !search.pool.is_empty() {
            search.step().expect("consistent search");
            for node in &search.pool {
                assert!(node.lower_bound() < search.upper_bound);
                assert!(!node.is_infeasible());
                assert!(!node.is_solved());
            }
        }
        assert!(search.incumbent.is_some());
    }

    #[test]
    fn test_iteration_cap_returns_partial_result() {
        let config = BnbConfig::default().with_max_iterations(1);
        let outcome = BranchAndBound::new(config)
            .solve(&pentagon(2, 7))
            .expect("valid instance");
        assert_eq!(outcome.termination(), Termination::IterationLimit);
        assert_eq!(outcome.iterations(), 1);
        assert!(!outcome.is_optimal());
    }

    #[test]
    fn test_tight_initial_bound_prunes_root() {
        let outcome = solve(&square(10), Some(1.0)).expect("valid instance");
        assert_eq!(outcome.termination(), Termination::Exhausted);
        assert_eq!(outcome.iterations(), 0);
        assert!(outcome.best_distance().is_none());
        assert!(outcome.routes().is_empty());
        assert_eq!(outcome.statistics().prunings_bound, 1);
    }

    #[test]
    fn test_warm_start_seeds_incumbent() {
        let config = BnbConfig::default().with_warm_start(true);
        let outcome = BranchAndBound::new(config)
            .solve(&square(10))
            .expect("valid instance");
        // nearest neighbor already walks the perimeter, so the root is pruned
        assert!(outcome.is_optimal());
        assert_eq!(outcome.iterations(), 0);
        assert!((outcome.best_distance().expect("warm start") - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_warm_start_matches_cold_start() {
        let cold = solve(&pentagon(2, 7), None).expect("valid instance");
        let warm = BranchAndBound::new(BnbConfig::default().with_warm_start(true))
            .solve(&pentagon(2, 7))
            .expect("valid instance");
        let cold_best = cold.best_distance().expect("solved");
        let warm_best = warm.best_distance().expect("solved");
        assert!((cold_best - warm_best).abs() < 1e-9);
        assert!(warm.is_optimal());
    }

    #[test]
    fn test_infeasible_instance_has_no_solution() {
        let problem = Instance::euclidean(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(2, 1.0, 0.0, 3),
                Customer::new(3, 0.0, 1.0, 3),
            ],
            Vehicle::fleet(1, 5),
        );
        let outcome = solve(&problem, None).expect("valid instance");
        assert_eq!(outcome.termination(), Termination::Exhausted);
        assert!(outcome.best_distance().is_none());
        assert!(outcome.statistics().prunings_infeasible + outcome.statistics().solutions_rejected > 0);
    }

    #[test]
    fn test_more_promising_prefers_depth_on_ties() {
        let problem = square(10);
        let root = PartialSolution::root(&problem).expect("valid instance");
        let edge = root.select_edge().expect("zero exists");
        let deeper = root.with_edge(edge, &problem).expect("edge present");
        // both carry the optimal bound of 4
        assert!((deeper.lower_bound() - root.lower_bound()).abs() <= ZERO_TOLERANCE);
        assert!(is_more_promising(&deeper, &root));
        assert!(!is_more_promising(&root, &deeper));
    }

    #[test]
    fn test_statistics_are_consistent() {
        let outcome = solve(&pentagon(2, 7), None).expect("valid instance");
        let stats = outcome.statistics();
        assert_eq!(stats.nodes_created, 1 + 2 * stats.nodes_branched);
        assert_eq!(stats.nodes_branched as usize, outcome.iterations());
        // every created node was either branched or discarded
        assert_eq!(stats.nodes_created, stats.nodes_branched + stats.nodes_discarded());
        assert!(stats.solutions_accepted >= 1);
    }
}
