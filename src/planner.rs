//! Route planners over a [FlightGrid]. [BreadthFirstPlanner] keeps the
//! FIFO, visited-at-enqueue traversal semantics; [UniformCostPlanner] is
//! the cost-ordered alternative for callers who need true minimum-cost
//! routes. Both expand successors in the canonical action order, so
//! repeated runs are bit-identical.

use crate::action::{valid_actions, Action};
use crate::grid::FlightGrid;
use crate::search::{breadth_first, uniform_cost, SearchRecord};
use grid_util::point::Point;
use log::info;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use thiserror::Error;

/// Accumulated route cost. Ordered so it can drive a cost-ordered frontier.
pub type Cost = OrderedFloat<f64>;

/// Search record of one planning run over the grid.
pub type GridSearchRecord = SearchRecord<Point, Cost, Action>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("start cell {0} is off the grid or blocked")]
    InvalidStart(Point),
    #[error("goal cell {0} is off the grid or blocked")]
    InvalidGoal(Point),
}

/// Result of one planning invocation: whether the goal was dequeued, and
/// the record a route can be reconstructed from.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub found: bool,
    pub record: GridSearchRecord,
}

/// A start-to-goal action sequence and its total cost. Empty with zero
/// cost when start and goal coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub actions: Vec<Action>,
    pub cost: f64,
}

impl Route {
    pub fn empty() -> Route {
        Route {
            actions: Vec::new(),
            cost: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

fn expand(grid: &FlightGrid, node: &Point) -> SmallVec<[(Point, Cost, Action); 8]> {
    valid_actions(grid, *node)
        .into_iter()
        .map(|action| (action.apply(*node), OrderedFloat(action.cost()), action))
        .collect()
}

fn check_endpoints(grid: &FlightGrid, start: Point, goal: Point) -> Result<(), PlanError> {
    if !grid.can_move_to(start) {
        return Err(PlanError::InvalidStart(start));
    }
    if !grid.can_move_to(goal) {
        return Err(PlanError::InvalidGoal(goal));
    }
    Ok(())
}

pub trait RoutePlanner {
    /// Explores the grid from `start` until `goal` is dequeued or the
    /// frontier is exhausted. An endpoint off the grid or on a blocked
    /// cell fails before any search; an unreached goal is a result
    /// (`found == false`), never an error.
    fn plan(
        &self,
        grid: &FlightGrid,
        start: Point,
        goal: Point,
    ) -> Result<SearchOutcome, PlanError>;

    /// Plans and reconstructs in one call. Returns `Ok(None)` when the
    /// goal cannot be reached and an empty route when `start == goal`.
    /// When the grid's component structure is clean it is consulted first,
    /// so an unreachable goal costs a union-find lookup instead of a
    /// flood fill.
    fn route(
        &self,
        grid: &FlightGrid,
        start: Point,
        goal: Point,
    ) -> Result<Option<Route>, PlanError> {
        check_endpoints(grid, start, goal)?;
        if start == goal {
            return Ok(Some(Route::empty()));
        }
        if !grid.components_dirty && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(None);
        }
        let outcome = self.plan(grid, start, goal)?;
        if !outcome.found {
            return Ok(None);
        }
        let (actions, cost) = outcome.record.reconstruct(start, goal);
        Ok(Some(Route {
            actions,
            cost: cost.into_inner(),
        }))
    }
}

/// FIFO planner: cost-annotated breadth-first traversal with cells marked
/// visited at enqueue time. Finds a route whenever one exists and reports
/// that route's true accumulated cost; with the mixed 1/√2 action costs
/// the route is not guaranteed to be the cheapest one.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirstPlanner;

impl RoutePlanner for BreadthFirstPlanner {
    fn plan(
        &self,
        grid: &FlightGrid,
        start: Point,
        goal: Point,
    ) -> Result<SearchOutcome, PlanError> {
        check_endpoints(grid, start, goal)?;
        let (found, record) =
            breadth_first(start, |node| expand(grid, node), |node| *node == goal);
        if found {
            info!(
                "reached {} from {} after visiting {} cells",
                goal,
                start,
                record.len()
            );
        } else {
            info!(
                "frontier exhausted after {} cells, {} not reachable from {}",
                record.len(),
                goal,
                start
            );
        }
        Ok(SearchOutcome { found, record })
    }
}

/// Cost-ordered planner: expands cells by smallest accumulated cost and
/// re-opens them when cheaper paths turn up, so the reconstructed route is
/// a minimum-cost one. Path shape may differ from [BreadthFirstPlanner]
/// on grids where the FIFO order locks in a dearer first discovery.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformCostPlanner;

impl RoutePlanner for UniformCostPlanner {
    fn plan(
        &self,
        grid: &FlightGrid,
        start: Point,
        goal: Point,
    ) -> Result<SearchOutcome, PlanError> {
        check_endpoints(grid, start, goal)?;
        let (found, record) =
            uniform_cost(start, |node| expand(grid, node), |node| *node == goal);
        if found {
            info!(
                "reached {} from {} after visiting {} cells",
                goal,
                start,
                record.len()
            );
        } else {
            info!(
                "frontier exhausted after {} cells, {} not reachable from {}",
                record.len(),
                goal,
                start
            );
        }
        Ok(SearchOutcome { found, record })
    }
}
