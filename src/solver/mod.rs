use crate::error::PathfindingError;
use core::fmt;
use grid_util::point::Point;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod astar;
pub mod trace;

/// Estimate of the remaining distance between a tile and the goal. The search evaluates it
/// once per walkable tile at the start of a run, so new heuristics plug in without changes to
/// the search loop. Closures of the form `Fn(&Point, &Point) -> f64` implement it as well.
pub trait Heuristic {
    fn estimate(&self, from: &Point, to: &Point) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&Point, &Point) -> f64,
{
    fn estimate(&self, from: &Point, to: &Point) -> f64 {
        self(from, to)
    }
}

/// The built-in heuristics, selectable by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeuristicKind {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Sum of the absolute coordinate differences.
    Manhattan,
    /// Largest absolute coordinate difference, the number of moves on an 8-grid.
    Chebyshev,
}

impl HeuristicKind {
    pub fn name(&self) -> &'static str {
        match self {
            HeuristicKind::Euclidean => "Euclidean",
            HeuristicKind::Manhattan => "Manhattan",
            HeuristicKind::Chebyshev => "Chebyshev",
        }
    }
}

impl Heuristic for HeuristicKind {
    fn estimate(&self, from: &Point, to: &Point) -> f64 {
        match self {
            HeuristicKind::Euclidean => {
                let dx = (from.x - to.x) as f64;
                let dy = (from.y - to.y) as f64;
                dx.hypot(dy)
            }
            HeuristicKind::Manhattan => from.manhattan_distance(to) as f64,
            HeuristicKind::Chebyshev => from.move_distance(to) as f64,
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = PathfindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" => Ok(HeuristicKind::Euclidean),
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "chebyshev" => Ok(HeuristicKind::Chebyshev),
            _ => Err(PathfindingError::InvalidConfig(format!(
                "unknown heuristic '{s}'"
            ))),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
