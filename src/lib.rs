//! # astar_trace
//!
//! Grid-based [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search that records its own
//! execution. Every expansion that opens new tiles produces a [FindingState] snapshot classifying
//! each cell of the grid, so a front end can replay the search step by step after it finished.
//! The path is reconstructed from the predecessor links of the run with
//! [Search::backtrace].
//!
//! Positions are [grid_util::point::Point]s where `x` is the row and `y` the column. Steps cost
//! [STEP_COST] in every direction unless a diagonal cost is configured, and tiles are never
//! re-opened once discovered.
//!
//! ```
//! use astar_trace::{AStarFinder, Grid, HeuristicKind};
//! use grid_util::point::Point;
//!
//! let grid = Grid::from_matrix(&[[0, 0, 0], [0, 0, 0], [0, 0, 0]]).unwrap();
//! let finder = AStarFinder::new(&grid, true, HeuristicKind::Euclidean);
//! let search = finder.find_path(Point::new(0, 0), Point::new(2, 2)).unwrap();
//! assert!(search.has_reached_goal());
//! assert_eq!(
//!     search.backtrace(Point::new(2, 2), true, true).unwrap(),
//!     vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]
//! );
//! ```
pub mod config;
pub mod error;
pub mod grid;
pub mod min_heap;
pub mod solver;
pub mod tile;

pub use config::{FinderConfig, GridConfig};
pub use error::{PathfindingError, Result};
pub use grid::Grid;
pub use min_heap::MinHeap;
pub use solver::astar::{AStarFinder, Search};
pub use solver::trace::{FindingState, SearchOutcome, TileType};
pub use solver::{Heuristic, HeuristicKind};
pub use tile::{Tile, TileState};

/// Inline capacity for neighbour lists, the size of the Moore neighbourhood.
pub const N_SMALLVEC_SIZE: usize = 8;
/// Cost of a single step between adjacent tiles.
pub const STEP_COST: f64 = 1.0;
