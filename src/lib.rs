pub mod config;
pub mod core;
pub mod domain;
pub mod math;
pub mod server;
pub mod solvers;
pub mod utils;

pub use config::{CliArgs, TomlConfig};
pub use core::{BenchmarkTable, Benchmarker};
pub use server::{build_router, AppState, SharedState};
pub use utils::error::{MathError, Result};
