use astar_trace::{AStarFinder, Grid, HeuristicKind};
use grid_util::point::Point;

// In this example a path is found on a grid with shape
//  S . .
//  . x .
//  . . G
// S marks the start
// G marks the goal
fn main() {
    env_logger::init();
    let grid = Grid::from_matrix(&[[0, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
    let finder = AStarFinder::new(&grid, true, HeuristicKind::Euclidean);
    let search = finder
        .find_path(Point::new(0, 0), Point::new(2, 2))
        .unwrap();
    if search.has_reached_goal() {
        println!("A path has been found in {} steps:", search.states().len());
        for p in search.path() {
            println!("({}, {})", p.x, p.y);
        }
    } else {
        println!("No path exists");
    }
}
