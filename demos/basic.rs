//! Basic example of using the Zip puzzle engine

use zip_core::{Generator, Solver};

fn main() {
    // Generate a reproducible puzzle with the default 10x10 configuration
    println!("Generating a 10x10 puzzle (seed 42)...\n");
    let generator = Generator::with_seed(42);

    let puzzle = match generator.generate_unique() {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("Generation failed: {}", err);
            return;
        }
    };

    println!("{}", puzzle);
    println!("Waypoints to visit in order: 1..{}", puzzle.max_number());

    // Verify what the pipeline already guarantees
    let solver = Solver::new();
    println!("Solvable: {}", solver.has_solution(&puzzle));
    println!(
        "Solutions (counted up to 2): {}",
        solver.count_solutions(&puzzle, 2)
    );

    // Where does the path start?
    if let Some(start) = puzzle.find_waypoint(1) {
        println!("Start cell: row {}, col {}", start.row, start.col);
    }
}
