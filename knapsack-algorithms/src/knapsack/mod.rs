pub mod dynamic_programming;
pub use dynamic_programming::{optimal_value, solve, solve_challenge, solve_with_value, Selection};
