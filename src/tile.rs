use grid_util::point::Point;

/// Static data of a single grid cell. The position uses `x` for the row and `y` for the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    position: Point,
    walkable: bool,
}

impl Tile {
    pub fn new(position: Point, walkable: bool) -> Tile {
        Tile { position, walkable }
    }
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn row(&self) -> i32 {
        self.position.x
    }
    pub fn col(&self) -> i32 {
        self.position.y
    }
    pub fn is_walkable(&self) -> bool {
        self.walkable
    }
    pub(crate) fn set_walkable(&mut self, walkable: bool) {
        self.walkable = walkable;
    }
}

/// Search state of one tile during a single run. Lives in the run, never on the [Grid](crate::grid::Grid),
/// so every call to [find_path](crate::solver::astar::AStarFinder::find_path) starts from zeroed values.
///
/// `f` always equals `g + h`: both setters recompute it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TileState {
    g: f64,
    h: f64,
    f: f64,
    open: bool,
    closed: bool,
    parent: Option<usize>,
}

impl TileState {
    /// Cost of the cheapest known route from the start.
    pub fn g(&self) -> f64 {
        self.g
    }
    /// Heuristic estimate of the remaining distance to the goal.
    pub fn h(&self) -> f64 {
        self.h
    }
    pub fn f(&self) -> f64 {
        self.f
    }
    pub fn is_open(&self) -> bool {
        self.open
    }
    pub fn is_closed(&self) -> bool {
        self.closed
    }
    /// Tile id of the predecessor on the discovered route, if any.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }
    /// Whether the tile was ever put on the open list during the run.
    pub fn is_explored(&self) -> bool {
        self.open || self.closed
    }

    pub fn set_g(&mut self, g: f64) {
        self.g = g;
        self.f = self.g + self.h;
    }
    pub fn set_h(&mut self, h: f64) {
        self.h = h;
        self.f = self.g + self.h;
    }
    /// Clears costs, list membership and the predecessor link.
    pub fn reset(&mut self) {
        *self = TileState::default();
    }

    pub(crate) fn open(&mut self, parent: Option<usize>) {
        self.open = true;
        self.parent = parent;
    }
    pub(crate) fn close(&mut self) {
        self.open = false;
        self.closed = true;
    }
}
