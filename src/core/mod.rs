pub mod benchmark;

pub use crate::domain::model::{Outcome, SolveResponse, Solved};
pub use crate::domain::ports::Solver;
pub use benchmark::{BenchmarkTable, Benchmarker};
