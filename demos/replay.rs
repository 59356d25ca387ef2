use astar_trace::{AStarFinder, FinderConfig, Grid, GridConfig, TileType};
use grid_util::point::Point;
use std::{env, thread, time::Duration};

// Replays a finished search frame by frame, the way a front end animates the trace.
// Usage: replay [rows] [cols] [density] [heuristic] [diagonal]
fn symbol(tile_type: TileType) -> char {
    match tile_type {
        TileType::Empty => '.',
        TileType::Start => 'S',
        TileType::Goal => 'G',
        TileType::Obstacle => '#',
        TileType::Current => '@',
        TileType::Exploring => 'o',
        TileType::Explored => '-',
    }
}

fn draw(map: &[Vec<TileType>], path: &[Point]) {
    for (r, row) in map.iter().enumerate() {
        let line: String = row
            .iter()
            .enumerate()
            .map(|(c, &t)| {
                if path.contains(&Point::new(r as i32, c as i32)) {
                    '*'
                } else {
                    symbol(t)
                }
            })
            .collect();
        println!("{line}");
    }
    println!();
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let mut grid_config = GridConfig::default();
    let mut finder_config = FinderConfig::default();
    if let Some(rows) = args.get(1).and_then(|s| s.parse().ok()) {
        grid_config.rows = rows;
    }
    if let Some(cols) = args.get(2).and_then(|s| s.parse().ok()) {
        grid_config.cols = cols;
    }
    if let Some(density) = args.get(3).and_then(|s| s.parse().ok()) {
        grid_config.obstacle_density = density;
    }
    if let Some(heuristic) = args.get(4) {
        finder_config.heuristic = heuristic.parse().unwrap_or_else(|e| panic!("{e}"));
    }
    if let Some(diagonal) = args.get(5).and_then(|s| s.parse().ok()) {
        finder_config.allow_diagonal = diagonal;
    }

    let grid = Grid::generate(&grid_config).unwrap_or_else(|e| panic!("{e}"));
    draw(&grid.layout(), &[]);
    let search = AStarFinder::from_config(&grid, &finder_config)
        .and_then(|finder| finder.find_grid_path())
        .unwrap_or_else(|e| panic!("{e}"));

    for state in search.states() {
        draw(state.map(), &[]);
        thread::sleep(Duration::from_millis(100));
    }
    if search.has_reached_goal() {
        let path = search.path();
        draw(&grid.layout(), &path);
        println!("Path of {} steps", path.len().saturating_sub(1));
    } else {
        println!("Path cannot be found");
    }
}
