use astar_trace::{AStarFinder, FinderConfig, Grid, HeuristicKind};

fn main() {
    env_logger::init();
    let matrix = [
        [0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
        [0, 0, 1, 0, 0, 0, 0, 1, 0, 0],
        [1, 0, 1, 0, 0, 0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0, 1, 0, 0, 0, 0],
        [0, 0, 1, 0, 0, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 1, 0, 0, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ];
    let grid = Grid::from_matrix(&matrix).unwrap();
    print!("{}", grid);
    let config = FinderConfig::new(false, HeuristicKind::Manhattan);
    let search = AStarFinder::from_config(&grid, &config)
        .unwrap()
        .find_grid_path()
        .unwrap();
    println!("{:?} after {} snapshots", search.outcome(), search.states().len());
    println!("{:?}", search.path());
}
