//! Snapshots recorded by the search, meant for replay by a visualization layer.
use crate::grid::Grid;
use crate::tile::TileState;
use grid_util::point::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of a single cell in a [FindingState] or in [Grid::layout].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum TileType {
    #[default]
    Empty = 0,
    Start = 1,
    Goal = 2,
    Obstacle = 3,
    /// The tile expanded in this step.
    Current = 4,
    /// Neighbours opened in this step.
    Exploring = 5,
    /// Tiles opened or closed in earlier steps.
    Explored = 6,
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchOutcome {
    GoalReached,
    /// The open list ran empty: no path exists.
    Exhausted,
    /// The configured expansion limit stopped the run before either of the above.
    LimitReached,
}

/// One immutable snapshot of search progress.
#[derive(Clone, Debug, PartialEq)]
pub struct FindingState {
    has_reached_goal: bool,
    current: Point,
    current_state: TileState,
    map: Vec<Vec<TileType>>,
}

impl FindingState {
    /// Snapshot after expanding `current`. Cells default to empty or obstacle; every tile ever put on
    /// the open list is explored, then the expanded tile and the freshly opened neighbours are marked.
    pub(crate) fn expansion(
        grid: &Grid,
        current: usize,
        tiles: &[TileState],
        exploring: &[usize],
    ) -> FindingState {
        let mut map = vec![vec![TileType::Empty; grid.cols()]; grid.rows()];
        for (ix, _) in tiles.iter().enumerate().filter(|(_, t)| t.is_explored()) {
            set_cell(grid, &mut map, ix, TileType::Explored);
        }
        set_cell(grid, &mut map, current, TileType::Current);
        for &ix in exploring {
            set_cell(grid, &mut map, ix, TileType::Exploring);
        }
        mark_obstacles(grid, &mut map);
        FindingState {
            has_reached_goal: false,
            current: grid.position_of(current),
            current_state: tiles[current],
            map,
        }
    }

    /// Snapshot recorded once the goal is expanded. Only the goal itself and the obstacles are marked.
    pub(crate) fn goal_reached(grid: &Grid, goal: usize, state: TileState) -> FindingState {
        let mut map = vec![vec![TileType::Empty; grid.cols()]; grid.rows()];
        set_cell(grid, &mut map, goal, TileType::Current);
        mark_obstacles(grid, &mut map);
        FindingState {
            has_reached_goal: true,
            current: grid.position_of(goal),
            current_state: state,
            map,
        }
    }

    pub fn has_reached_goal(&self) -> bool {
        self.has_reached_goal
    }
    /// Position of the tile expanded in this step.
    pub fn current(&self) -> Point {
        self.current
    }
    /// Costs of the expanded tile at the time of the snapshot.
    pub fn current_state(&self) -> &TileState {
        &self.current_state
    }
    /// Classification matrix indexed as `map[row][col]`.
    pub fn map(&self) -> &[Vec<TileType>] {
        &self.map
    }
    /// Classification at `position`, or [None] outside the grid.
    pub fn tile_type(&self, position: Point) -> Option<TileType> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        self.map
            .get(position.x as usize)
            .and_then(|row| row.get(position.y as usize))
            .copied()
    }
    /// Number of cells with the given classification.
    pub fn count(&self, tile_type: TileType) -> usize {
        self.map
            .iter()
            .flatten()
            .filter(|&&t| t == tile_type)
            .count()
    }
}

fn set_cell(grid: &Grid, map: &mut [Vec<TileType>], ix: usize, tile_type: TileType) {
    let (row, col) = (ix / grid.cols(), ix % grid.cols());
    map[row][col] = tile_type;
}

fn mark_obstacles(grid: &Grid, map: &mut [Vec<TileType>]) {
    for (ix, _) in grid
        .tiles()
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.is_walkable())
    {
        set_cell(grid, map, ix, TileType::Obstacle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_layers_classifications() {
        let grid = Grid::from_matrix(&[[0, 0, 1], [0, 0, 0]]).unwrap();
        let mut tiles = vec![TileState::default(); 6];
        tiles[0].open(None);
        tiles[0].close();
        tiles[1].open(Some(0));
        tiles[3].open(Some(0));
        tiles[4].open(Some(0));
        let state = FindingState::expansion(&grid, 0, &tiles, &[1, 4]);
        assert!(!state.has_reached_goal());
        assert_eq!(state.current(), Point::new(0, 0));
        assert_eq!(
            state.map(),
            &[
                vec![TileType::Current, TileType::Exploring, TileType::Obstacle],
                vec![TileType::Explored, TileType::Exploring, TileType::Empty],
            ]
        );
        assert_eq!(state.count(TileType::Exploring), 2);
        assert_eq!(state.tile_type(Point::new(1, 0)), Some(TileType::Explored));
        assert_eq!(state.tile_type(Point::new(2, 0)), None);
        assert_eq!(state.tile_type(Point::new(0, -1)), None);
    }

    #[test]
    fn goal_snapshot_marks_only_goal_and_obstacles() {
        let grid = Grid::from_matrix(&[[0, 1], [0, 0]]).unwrap();
        let state = FindingState::goal_reached(&grid, 3, TileState::default());
        assert!(state.has_reached_goal());
        assert_eq!(state.current(), Point::new(1, 1));
        assert_eq!(state.count(TileType::Current), 1);
        assert_eq!(state.count(TileType::Obstacle), 1);
        assert_eq!(state.count(TileType::Empty), 2);
    }

    #[test]
    fn tile_type_codes() {
        assert_eq!(TileType::Empty as u8, 0);
        assert_eq!(TileType::Obstacle as u8, 3);
        assert_eq!(TileType::Explored as u8, 6);
    }
}
