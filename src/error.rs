use grid_util::point::Point;
use thiserror::Error;

/// Errors surfaced by grid construction, grid queries and the open list.
///
/// Failing to find a path is not an error: a search that exhausts its open list
/// finishes with [SearchOutcome::Exhausted](crate::solver::trace::SearchOutcome::Exhausted).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathfindingError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("position ({}, {}) is outside the {rows}x{cols} grid", .position.x, .position.y)]
    OutOfBounds {
        position: Point,
        rows: usize,
        cols: usize,
    },

    #[error("cannot extract the minimum of an empty heap")]
    EmptyHeap,
}

pub type Result<T> = std::result::Result<T, PathfindingError>;
