use crate::config::FinderConfig;
use crate::error::{PathfindingError, Result};
use crate::grid::Grid;
use crate::min_heap::MinHeap;
use crate::solver::trace::{FindingState, SearchOutcome};
use crate::solver::{Heuristic, HeuristicKind};
use crate::tile::TileState;
use crate::{N_SMALLVEC_SIZE, STEP_COST};
use grid_util::point::Point;
use log::{debug, info, trace, warn};
use smallvec::SmallVec;
use std::iter;

/// Open list entry. The priority is copied at insertion; an opened tile is never re-prioritised.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: f64,
    index: usize,
}

/// A* search over a borrowed [Grid] that records each expansion as a [FindingState].
///
/// The grid is only read: all per-run data lives in the returned [Search], so the same grid can
/// be searched repeatedly, or from several threads at once.
#[derive(Clone, Debug)]
pub struct AStarFinder<'a, H = HeuristicKind> {
    grid: &'a Grid,
    allow_diagonal: bool,
    heuristic: H,
    diagonal_cost: f64,
    max_expansions: Option<usize>,
}

impl<'a> AStarFinder<'a, HeuristicKind> {
    pub fn new(grid: &'a Grid, allow_diagonal: bool, heuristic: HeuristicKind) -> Self {
        Self::with_heuristic(grid, allow_diagonal, heuristic)
    }

    pub fn from_config(grid: &'a Grid, config: &FinderConfig) -> Result<Self> {
        config.validate()?;
        Ok(AStarFinder {
            grid,
            allow_diagonal: config.allow_diagonal,
            heuristic: config.heuristic,
            diagonal_cost: config.diagonal_cost,
            max_expansions: config.max_expansions,
        })
    }
}

impl<'a, H: Heuristic> AStarFinder<'a, H> {
    /// Uses a custom [Heuristic] with uniform step costs and no expansion limit.
    pub fn with_heuristic(grid: &'a Grid, allow_diagonal: bool, heuristic: H) -> Self {
        AStarFinder {
            grid,
            allow_diagonal,
            heuristic,
            diagonal_cost: STEP_COST,
            max_expansions: None,
        }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }
    pub fn allow_diagonal(&self) -> bool {
        self.allow_diagonal
    }

    fn step_cost(&self, from: Point, to: Point) -> f64 {
        if from.x != to.x && from.y != to.y {
            self.diagonal_cost
        } else {
            STEP_COST
        }
    }

    /// Searches from the grid's own start to its own goal.
    pub fn find_grid_path(&self) -> Result<Search> {
        self.find_path(self.grid.start(), self.grid.goal())
    }

    /// Runs the search to completion and returns the full trace. Only positions outside the grid
    /// are errors; an unreachable goal yields [SearchOutcome::Exhausted].
    pub fn find_path(&self, start: Point, goal: Point) -> Result<Search> {
        let grid = self.grid;
        let start_ix = grid.index_of(start)?;
        grid.index_of(goal)?;
        info!(
            "Searching from ({}, {}) to ({}, {}), diagonal moves: {}",
            start.x, start.y, goal.x, goal.y, self.allow_diagonal
        );

        // Fresh run state; h is fixed for the whole run since the goal does not move
        let mut tiles: Vec<TileState> = grid
            .tiles()
            .iter()
            .map(|tile| {
                let mut state = TileState::default();
                if tile.is_walkable() {
                    state.set_h(self.heuristic.estimate(&tile.position(), &goal));
                }
                state
            })
            .collect();

        let mut open_list = MinHeap::with_capacity(tiles.len(), |a: &OpenEntry, b: &OpenEntry| {
            a.f.total_cmp(&b.f)
        });
        tiles[start_ix].open(None);
        open_list.insert(OpenEntry {
            f: tiles[start_ix].f(),
            index: start_ix,
        });

        let mut states = Vec::new();
        let mut expansions = 0;
        while !open_list.is_empty() {
            if self.max_expansions.is_some_and(|limit| expansions >= limit) {
                warn!(
                    "Stopped after {} expansions with {} tiles still open",
                    expansions,
                    open_list.size()
                );
                return Ok(Search::new(
                    grid,
                    start,
                    goal,
                    SearchOutcome::LimitReached,
                    states,
                    tiles,
                    open_list.size(),
                ));
            }
            let current = open_list.extract_min()?.index;
            expansions += 1;
            tiles[current].close();
            let position = grid.position_of(current);

            if position == goal {
                states.push(FindingState::goal_reached(grid, current, tiles[current]));
                debug!(
                    "Reached goal after {} expansions at cost {}",
                    expansions,
                    tiles[current].g()
                );
                return Ok(Search::new(
                    grid,
                    start,
                    goal,
                    SearchOutcome::GoalReached,
                    states,
                    tiles,
                    open_list.size(),
                ));
            }

            let mut exploring: SmallVec<[usize; N_SMALLVEC_SIZE]> = SmallVec::new();
            for neighbor in grid.neighborhood_points(position, self.allow_diagonal) {
                let ix = grid.ix(neighbor);
                if tiles[ix].is_explored() {
                    continue;
                }
                let g = tiles[current].g() + self.step_cost(position, neighbor);
                tiles[ix].set_g(g);
                tiles[ix].open(Some(current));
                open_list.insert(OpenEntry {
                    f: tiles[ix].f(),
                    index: ix,
                });
                exploring.push(ix);
            }
            trace!(
                "Expanded ({}, {}), opened {} neighbours",
                position.x,
                position.y,
                exploring.len()
            );
            if !exploring.is_empty() {
                states.push(FindingState::expansion(grid, current, &tiles, &exploring));
            }
        }

        warn!(
            "Open list exhausted after {} expansions: ({}, {}) is not reachable",
            expansions, goal.x, goal.y
        );
        Ok(Search::new(
            grid,
            start,
            goal,
            SearchOutcome::Exhausted,
            states,
            tiles,
            0,
        ))
    }
}

/// Result of one call to [AStarFinder::find_path]: the ordered trace plus the run's tile states,
/// from which paths are reconstructed. Owns all of its data.
#[derive(Clone, Debug)]
pub struct Search {
    rows: usize,
    cols: usize,
    start: Point,
    goal: Point,
    outcome: SearchOutcome,
    states: Vec<FindingState>,
    tiles: Vec<TileState>,
    open_remaining: usize,
}

impl Search {
    fn new(
        grid: &Grid,
        start: Point,
        goal: Point,
        outcome: SearchOutcome,
        states: Vec<FindingState>,
        tiles: Vec<TileState>,
        open_remaining: usize,
    ) -> Search {
        Search {
            rows: grid.rows(),
            cols: grid.cols(),
            start,
            goal,
            outcome,
            states,
            tiles,
            open_remaining,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }
    pub fn goal(&self) -> Point {
        self.goal
    }
    pub fn outcome(&self) -> SearchOutcome {
        self.outcome
    }
    pub fn has_reached_goal(&self) -> bool {
        self.outcome == SearchOutcome::GoalReached
    }
    /// Snapshots in the order they were recorded.
    pub fn states(&self) -> &[FindingState] {
        &self.states
    }
    pub fn last_state(&self) -> Option<&FindingState> {
        self.states.last()
    }
    pub fn into_states(self) -> Vec<FindingState> {
        self.states
    }
    /// Number of tiles left on the open list when the run ended.
    pub fn open_remaining(&self) -> usize {
        self.open_remaining
    }

    /// Final search state of the tile at `position`.
    pub fn tile_state(&self, position: Point) -> Result<&TileState> {
        let ix = self.index_of(position)?;
        Ok(&self.tiles[ix])
    }

    fn index_of(&self, position: Point) -> Result<usize> {
        let in_bounds = position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.rows
            && (position.y as usize) < self.cols;
        if in_bounds {
            Ok(position.x as usize * self.cols + position.y as usize)
        } else {
            Err(PathfindingError::OutOfBounds {
                position,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Follows predecessor links back from `tile` and returns the route in start to `tile` order.
    /// `include_end` keeps `tile` itself, `include_start` keeps the first tile of the chain.
    /// Returns an empty path if `tile` has no predecessor, e.g. when start and goal coincide.
    pub fn backtrace(
        &self,
        tile: Point,
        include_start: bool,
        include_end: bool,
    ) -> Result<Vec<Point>> {
        let ix = self.index_of(tile)?;
        let Some(parent) = self.tiles[ix].parent() else {
            return Ok(Vec::new());
        };
        let first = if include_end { ix } else { parent };
        let mut chain: Vec<usize> =
            iter::successors(Some(first), |&i| self.tiles[i].parent()).collect();
        if !include_start {
            chain.pop();
        }
        Ok(chain
            .into_iter()
            .rev()
            .map(|i| Point::new((i / self.cols) as i32, (i % self.cols) as i32))
            .collect())
    }

    /// The full start to goal path, or an empty path if the goal was not reached.
    pub fn path(&self) -> Vec<Point> {
        if self.has_reached_goal() {
            self.backtrace(self.goal, true, true).unwrap_or_default()
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::trace::TileType;

    fn open_grid(rows: usize, cols: usize) -> Grid {
        Grid::from_matrix(&vec![vec![0; cols]; rows]).unwrap()
    }

    /// Corresponds to the worked example of a 3x3 open grid with diagonal moves.
    #[test]
    fn diagonal_path_on_open_grid() {
        let grid = open_grid(3, 3);
        let finder = AStarFinder::new(&grid, true, HeuristicKind::Euclidean);
        let search = finder.find_path(Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(search.outcome(), SearchOutcome::GoalReached);
        assert_eq!(
            search.path(),
            vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]
        );
        assert_eq!(search.states().len(), 3);
        assert!(search.last_state().unwrap().has_reached_goal());
        assert!(search.states()[..2].iter().all(|s| !s.has_reached_goal()));
    }

    /// Asserts that the optimal 4 step solution is found without diagonals.
    #[test]
    fn orthogonal_path_on_open_grid() {
        let grid = open_grid(3, 3);
        let finder = AStarFinder::new(&grid, false, HeuristicKind::Manhattan);
        let search = finder.find_path(Point::new(0, 0), Point::new(2, 2)).unwrap();
        let path = search.path();
        assert_eq!(path.len(), 5);
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(2, 2)
            ]
        );
        assert_eq!(search.states().len(), 6);
        assert_eq!(search.tile_state(Point::new(2, 2)).unwrap().g(), 4.0);
    }

    #[test]
    fn first_snapshot_classifies_start_expansion() {
        let grid = open_grid(3, 3);
        let finder = AStarFinder::new(&grid, true, HeuristicKind::Euclidean);
        let search = finder.find_path(Point::new(0, 0), Point::new(2, 2)).unwrap();
        let first = &search.states()[0];
        assert_eq!(first.current(), Point::new(0, 0));
        assert_eq!(first.tile_type(Point::new(0, 0)), Some(TileType::Current));
        assert_eq!(first.count(TileType::Exploring), 3);
        assert_eq!(first.count(TileType::Empty), 5);
        assert_eq!(first.current_state().g(), 0.0);

        let second = &search.states()[1];
        assert_eq!(second.current(), Point::new(1, 1));
        assert_eq!(second.count(TileType::Exploring), 5);
        assert_eq!(second.count(TileType::Explored), 3);
    }

    #[test]
    fn start_equal_to_goal() {
        for allow_diag in [false, true] {
            let grid = open_grid(1, 1);
            let finder = AStarFinder::new(&grid, allow_diag, HeuristicKind::Euclidean);
            let search = finder.find_grid_path().unwrap();
            assert!(search.has_reached_goal());
            assert_eq!(search.states().len(), 1);
            assert!(search.path().is_empty());
            assert!(search.backtrace(Point::new(0, 0), true, false).unwrap().is_empty());
        }
    }

    #[test]
    fn backtrace_inclusion_flags() {
        let grid = open_grid(1, 4);
        let finder = AStarFinder::new(&grid, false, HeuristicKind::Manhattan);
        let search = finder.find_grid_path().unwrap();
        let goal = Point::new(0, 3);
        let p = |c| Point::new(0, c);
        assert_eq!(
            search.backtrace(goal, true, true).unwrap(),
            vec![p(0), p(1), p(2), p(3)]
        );
        assert_eq!(
            search.backtrace(goal, false, true).unwrap(),
            vec![p(1), p(2), p(3)]
        );
        assert_eq!(
            search.backtrace(goal, true, false).unwrap(),
            vec![p(0), p(1), p(2)]
        );
        assert_eq!(search.backtrace(goal, false, false).unwrap(), vec![p(1), p(2)]);
        assert!(search.backtrace(p(1), false, false).unwrap().is_empty());
        assert_eq!(search.backtrace(p(1), true, false).unwrap(), vec![p(0)]);
        assert!(search.backtrace(p(4), true, true).is_err());
    }

    #[test]
    fn rejects_out_of_bounds_endpoints() {
        let grid = open_grid(2, 2);
        let finder = AStarFinder::new(&grid, true, HeuristicKind::Euclidean);
        assert!(finder.find_path(Point::new(0, 0), Point::new(2, 0)).is_err());
        assert!(finder.find_path(Point::new(-1, 0), Point::new(1, 1)).is_err());
    }

    #[test]
    fn walled_goal_is_exhausted() {
        // The goal column is cut off by a full wall
        let grid = Grid::from_matrix(&[[0, 1, 0], [0, 1, 0], [0, 1, 0]]).unwrap();
        let finder = AStarFinder::new(&grid, true, HeuristicKind::Euclidean);
        let search = finder.find_grid_path().unwrap();
        assert_eq!(search.outcome(), SearchOutcome::Exhausted);
        assert_eq!(search.open_remaining(), 0);
        assert!(search.path().is_empty());
        assert!(search.states().iter().all(|s| !s.has_reached_goal()));
        assert!(!search.tile_state(Point::new(2, 2)).unwrap().is_explored());
    }

    #[test]
    fn expansion_limit_stops_search() {
        let grid = open_grid(5, 5);
        let config = FinderConfig::new(false, HeuristicKind::Manhattan).with_max_expansions(2);
        let finder = AStarFinder::from_config(&grid, &config).unwrap();
        let search = finder.find_grid_path().unwrap();
        assert_eq!(search.outcome(), SearchOutcome::LimitReached);
        assert_eq!(search.states().len(), 2);
        assert!(search.open_remaining() > 0);
        assert!(search.path().is_empty());
    }

    #[test]
    fn diagonal_cost_is_applied() {
        let grid = open_grid(2, 2);
        let config = FinderConfig::new(true, HeuristicKind::Chebyshev).with_diagonal_cost(1.5);
        let finder = AStarFinder::from_config(&grid, &config).unwrap();
        let search = finder.find_grid_path().unwrap();
        assert_eq!(search.tile_state(Point::new(1, 1)).unwrap().g(), 1.5);
        assert!(AStarFinder::from_config(&grid, &config.with_diagonal_cost(-1.0)).is_err());
    }

    #[test]
    fn custom_heuristic_closure() {
        let grid = open_grid(4, 4);
        let dijkstra = AStarFinder::with_heuristic(&grid, false, |_: &Point, _: &Point| 0.0);
        let search = dijkstra.find_grid_path().unwrap();
        assert_eq!(search.path().len(), 7);
    }

    #[test]
    fn repeated_searches_share_nothing() {
        let grid = open_grid(4, 6);
        let finder = AStarFinder::new(&grid, true, HeuristicKind::Euclidean);
        let a = finder.find_path(Point::new(0, 0), Point::new(3, 5)).unwrap();
        let b = finder.find_path(Point::new(3, 5), Point::new(0, 0)).unwrap();
        let c = finder.find_path(Point::new(0, 0), Point::new(3, 5)).unwrap();
        assert_eq!(a.states(), c.states());
        assert_eq!(a.path(), c.path());
        assert_eq!(b.path().first(), Some(&Point::new(3, 5)));
        assert_eq!(b.tile_state(Point::new(0, 0)).unwrap().h(), 0.0);
    }
}
