/// Fuzzes the search by checking for many random grids that the goal is reached exactly when it is
/// part of the same connected component as the start. Both movement policies are tested.
use astar_trace::{AStarFinder, Grid, GridConfig, HeuristicKind, SearchOutcome, TileType};
use grid_util::point::Point;
use rand::prelude::*;

fn random_grid(n: usize, rng: &mut StdRng) -> Grid {
    Grid::generate_with_rng(&GridConfig::new(n, n, 0.4), rng).unwrap()
}

fn visualize_grid(grid: &Grid, start: &Point, end: &Point) {
    for (r, row) in grid.layout().iter().enumerate() {
        for (c, tile_type) in row.iter().enumerate() {
            let p = Point::new(r as i32, c as i32);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if *tile_type == TileType::Obstacle {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    for (diagonal, heuristic) in [
        (false, HeuristicKind::Manhattan),
        (false, HeuristicKind::Euclidean),
        (true, HeuristicKind::Euclidean),
        (true, HeuristicKind::Chebyshev),
    ] {
        for _ in 0..N_GRIDS {
            let grid = random_grid(N, &mut rng);
            let start = grid.start();
            let end = grid.goal();
            let reachable = grid.reachable(start, end, diagonal).unwrap();
            let search = AStarFinder::new(&grid, diagonal, heuristic)
                .find_path(start, end)
                .unwrap();
            // Show the grid if the outcome disagrees with the components
            if search.has_reached_goal() != reachable {
                visualize_grid(&grid, &start, &end);
            }
            assert_eq!(search.has_reached_goal(), reachable);
            if reachable {
                let path = search.path();
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&end));
                // Consecutive tiles are adjacent under the movement policy
                for w in path.windows(2) {
                    let (dx, dy) = ((w[1].x - w[0].x).abs(), (w[1].y - w[0].y).abs());
                    assert!(dx <= 1 && dy <= 1 && dx + dy > 0);
                    assert!(diagonal || dx + dy == 1);
                    assert!(grid.can_move_to(w[1]));
                }
            } else {
                assert_eq!(search.outcome(), SearchOutcome::Exhausted);
                assert_eq!(search.open_remaining(), 0);
            }
        }
    }
}

#[test]
fn fuzz_determinism() {
    const N_GRIDS: usize = 200;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let rows = rng.gen_range(1..12);
        let cols = rng.gen_range(1..12);
        let grid = Grid::generate_with_rng(&GridConfig::new(rows, cols, 0.3), &mut rng).unwrap();
        let diagonal = rng.gen_bool(0.5);
        let finder = AStarFinder::new(&grid, diagonal, HeuristicKind::Euclidean);
        let a = finder.find_grid_path().unwrap();
        let b = finder.find_grid_path().unwrap();
        assert_eq!(a.outcome(), b.outcome());
        assert_eq!(a.states(), b.states());
        assert_eq!(a.path(), b.path());
    }
}
