//! Configuration for grid generation and for the search.
use crate::error::{PathfindingError, Result};
use crate::solver::HeuristicKind;
use crate::STEP_COST;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for generating a random grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Probability in `[0, 1)` that a cell is an obstacle, sampled independently per cell.
    pub obstacle_density: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 20,
            obstacle_density: 0.2,
        }
    }
}

impl GridConfig {
    pub fn new(rows: usize, cols: usize, obstacle_density: f64) -> Self {
        Self {
            rows,
            cols,
            obstacle_density,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(PathfindingError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                self.rows, self.cols
            )));
        }
        // Also rejects NaN
        if !(0.0..1.0).contains(&self.obstacle_density) {
            return Err(PathfindingError::InvalidConfig(format!(
                "obstacle density must lie in [0, 1), got {}",
                self.obstacle_density
            )));
        }
        Ok(())
    }
}

/// Search policy for [AStarFinder](crate::solver::astar::AStarFinder).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FinderConfig {
    pub allow_diagonal: bool,
    pub heuristic: HeuristicKind,
    /// Cost of a diagonal step. Orthogonal steps always cost [STEP_COST].
    pub diagonal_cost: f64,
    /// Stops the search after this many expansions.
    pub max_expansions: Option<usize>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            allow_diagonal: false,
            heuristic: HeuristicKind::Euclidean,
            diagonal_cost: STEP_COST,
            max_expansions: None,
        }
    }
}

impl FinderConfig {
    pub fn new(allow_diagonal: bool, heuristic: HeuristicKind) -> Self {
        Self {
            allow_diagonal,
            heuristic,
            ..Default::default()
        }
    }
    pub fn with_diagonal_cost(mut self, diagonal_cost: f64) -> Self {
        self.diagonal_cost = diagonal_cost;
        self
    }
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.diagonal_cost.is_finite() || self.diagonal_cost <= 0.0 {
            return Err(PathfindingError::InvalidConfig(format!(
                "diagonal cost must be a positive finite number, got {}",
                self.diagonal_cost
            )));
        }
        Ok(())
    }
}
