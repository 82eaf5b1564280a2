//! Basic example of driving the Star Battle engine

use starbattle_core::{LevelSpec, PlaceOutcome, PuzzleEngine, Solver};

fn main() {
    // Load the first bundled altar
    let level = LevelSpec::catalog().remove(0);
    println!(
        "Level: {} ({}x{} cells)",
        level.name, level.grid_size, level.grid_size
    );
    println!("Regions: {:?}\n", level.distinct_regions());

    let mut engine = PuzzleEngine::new();
    engine
        .build_grid(&level)
        .expect("bundled level is well formed");

    // Let the solver find a solution, then replay it through the rules
    let solver = Solver::new();
    let solution = solver.solve(&level).expect("bundled level is solvable");
    println!("Solution: {:?}\n", solution);

    for pos in &solution {
        match engine.place_queen(pos.row, pos.col).unwrap() {
            PlaceOutcome::Placed => println!("placed queen at {}", pos),
            PlaceOutcome::Solved => println!("placed queen at {} - solved!", pos),
            PlaceOutcome::Rejected(reason) => println!("rejected at {}: {}", pos, reason),
        }
    }

    println!("\nSolved: {}", engine.is_puzzle_solved());
    println!("Queens: {:?}", engine.solution_state());
}
