#[allow(non_snake_case)]
pub mod Chemistry;
#[allow(non_snake_case)]
pub mod Solver;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod settings;

pub use Solver::solver_api::{ChemistrySolver, SolveReport, solve_chemistry_problem};
