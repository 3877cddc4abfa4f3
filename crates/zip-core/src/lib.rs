//! Core Zip puzzle engine.
//!
//! A Zip puzzle is a rectangular grid with numbered waypoints 1..N; the
//! player walks orthogonally from waypoint 1 through each number in order,
//! never crossing a wall and never revisiting a cell. This crate owns the
//! grid model, the backtracking solvers, and the generation pipeline that
//! only ever emits puzzles with a provably unique solution. Rendering,
//! input, and interactive play state live in the frontends.

mod generator;
mod grid;
mod solver;

pub use generator::{
    generate_unique, GenerateError, GenerationStats, Generator, GeneratorConfig,
};
pub use grid::{Cell, Grid, Position, VisitedMask};
pub use solver::Solver;
