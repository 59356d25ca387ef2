use crate::config::GridConfig;
use crate::error::{PathfindingError, Result};
use crate::solver::trace::TileType;
use crate::tile::Tile;
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use grid_util::point::Point;
use itertools::iproduct;
use log::info;
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

/// Neighbour offsets as `(row, col)` deltas in compass order NW, N, NE, E, SE, S, SW, W.
/// The search opens neighbours in this order, so it decides how ties are broken.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// [Grid] owns a fixed-size arena of [Tile]s stored row-major, so the tile at `(row, col)` has id
/// `row * cols + col`. Positions are [Point]s with `x` as the row and `y` as the column. The start
/// and goal are always in bounds and walkable.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
    start: Point,
    goal: Point,
}

impl Grid {
    /// Generates a random grid using the thread-local RNG.
    pub fn generate(config: &GridConfig) -> Result<Grid> {
        Self::generate_with_rng(config, &mut rand::thread_rng())
    }

    /// Generates a random grid where each cell is walkable with probability `1 - obstacle_density`.
    pub fn generate_with_rng<R: Rng + ?Sized>(config: &GridConfig, rng: &mut R) -> Result<Grid> {
        config.validate()?;
        let tiles = iproduct!(0..config.rows, 0..config.cols)
            .map(|(row, col)| {
                let walkable = !rng.gen_bool(config.obstacle_density);
                Tile::new(Point::new(row as i32, col as i32), walkable)
            })
            .collect();
        info!(
            "Generated {}x{} grid with obstacle density {}",
            config.rows, config.cols, config.obstacle_density
        );
        Ok(Self::with_tiles(config.rows, config.cols, tiles))
    }

    /// Builds a grid from an occupancy matrix where `0` marks a walkable cell.
    pub fn from_matrix<R: AsRef<[i32]>>(matrix: &[R]) -> Result<Grid> {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, |row| row.as_ref().len());
        if rows == 0 || cols == 0 {
            return Err(PathfindingError::InvalidConfig(
                "occupancy matrix is empty".to_owned(),
            ));
        }
        if let Some(row) = matrix.iter().position(|r| r.as_ref().len() != cols) {
            return Err(PathfindingError::InvalidConfig(format!(
                "occupancy matrix is jagged: row {} has {} cells, expected {}",
                row,
                matrix[row].as_ref().len(),
                cols
            )));
        }
        let tiles = iproduct!(0..rows, 0..cols)
            .map(|(row, col)| {
                let walkable = matrix[row].as_ref()[col] == 0;
                Tile::new(Point::new(row as i32, col as i32), walkable)
            })
            .collect();
        info!("Loaded {}x{} grid from occupancy matrix", rows, cols);
        Ok(Self::with_tiles(rows, cols, tiles))
    }

    fn with_tiles(rows: usize, cols: usize, tiles: Vec<Tile>) -> Grid {
        let start = Point::new(0, 0);
        let goal = Point::new(rows as i32 - 1, cols as i32 - 1);
        let mut grid = Grid {
            rows,
            cols,
            tiles,
            start,
            goal,
        };
        grid.tiles[0].set_walkable(true);
        grid.tiles[rows * cols - 1].set_walkable(true);
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn goal(&self) -> Point {
        self.goal
    }
    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn in_bounds(&self, position: Point) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.rows
            && (position.y as usize) < self.cols
    }

    /// Walkable and in bounds.
    pub fn can_move_to(&self, position: Point) -> bool {
        self.in_bounds(position) && self.tiles[self.ix(position)].is_walkable()
    }

    pub fn get_tile(&self, position: Point) -> Result<&Tile> {
        let ix = self.index_of(position)?;
        Ok(&self.tiles[ix])
    }

    /// Marks a cell walkable or blocked. The start and goal cannot be blocked.
    pub fn set_walkable(&mut self, position: Point, walkable: bool) -> Result<()> {
        let ix = self.index_of(position)?;
        if !walkable && (position == self.start || position == self.goal) {
            return Err(PathfindingError::InvalidConfig(format!(
                "cannot place an obstacle on the start or goal at ({}, {})",
                position.x, position.y
            )));
        }
        self.tiles[ix].set_walkable(walkable);
        Ok(())
    }

    /// Moves the start, clearing any obstacle at the new position.
    pub fn set_start(&mut self, position: Point) -> Result<()> {
        let ix = self.index_of(position)?;
        self.tiles[ix].set_walkable(true);
        self.start = position;
        Ok(())
    }

    /// Moves the goal, clearing any obstacle at the new position.
    pub fn set_goal(&mut self, position: Point) -> Result<()> {
        let ix = self.index_of(position)?;
        self.tiles[ix].set_walkable(true);
        self.goal = position;
        Ok(())
    }

    /// The walkable, in-bounds neighbours of `position` in compass order (see [NEIGHBOR_OFFSETS]).
    /// Without diagonal movement only N, E, S and W are considered.
    pub fn get_neighbors(
        &self,
        position: Point,
        allow_diagonal: bool,
    ) -> Result<SmallVec<[Point; N_SMALLVEC_SIZE]>> {
        self.index_of(position)?;
        Ok(self.neighborhood_points(position, allow_diagonal))
    }

    pub(crate) fn neighborhood_points(
        &self,
        position: Point,
        allow_diagonal: bool,
    ) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|(dx, dy)| allow_diagonal || dx.abs() + dy.abs() < 2)
            .map(|(dx, dy)| Point::new(position.x + dx, position.y + dy))
            .filter(|&p| self.can_move_to(p))
            .collect()
    }

    pub(crate) fn index_of(&self, position: Point) -> Result<usize> {
        if self.in_bounds(position) {
            Ok(self.ix(position))
        } else {
            Err(PathfindingError::OutOfBounds {
                position,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Tile id of an in-bounds position.
    pub(crate) fn ix(&self, position: Point) -> usize {
        position.x as usize * self.cols + position.y as usize
    }

    pub(crate) fn position_of(&self, ix: usize) -> Point {
        self.tiles[ix].position()
    }

    /// Static classification of every cell: obstacles, start, goal and empty cells.
    pub fn layout(&self) -> Vec<Vec<TileType>> {
        self.tiles
            .chunks(self.cols)
            .map(|row| {
                row.iter()
                    .map(|tile| {
                        if tile.position() == self.start {
                            TileType::Start
                        } else if tile.position() == self.goal {
                            TileType::Goal
                        } else if !tile.is_walkable() {
                            TileType::Obstacle
                        } else {
                            TileType::Empty
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Links every walkable tile to its walkable neighbours in a [UnionFind] structure. The tile at
    /// `origin` is linked even when blocked, since a search may start on it.
    fn components(&self, origin: usize, allow_diagonal: bool) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.tiles.len());
        for (ix, tile) in self.tiles.iter().enumerate() {
            if tile.is_walkable() || ix == origin {
                for n in self.neighborhood_points(tile.position(), allow_diagonal) {
                    components.union(ix, self.ix(n));
                }
            }
        }
        components
    }

    /// Checks whether any path leads from start to goal under the given movement policy.
    pub fn reachable(&self, start: Point, goal: Point, allow_diagonal: bool) -> Result<bool> {
        let start_ix = self.index_of(start)?;
        let goal_ix = self.index_of(goal)?;
        if start_ix == goal_ix {
            return Ok(true);
        }
        if !self.tiles[goal_ix].is_walkable() {
            return Ok(false);
        }
        Ok(self
            .components(start_ix, allow_diagonal)
            .equiv(start_ix, goal_ix))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.tiles.chunks(self.cols) {
            for tile in row {
                f.write_str(if tile.is_walkable() { " ." } else { " x" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
