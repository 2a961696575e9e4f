use crate::domain::model::Solved;
use crate::utils::error::{MathError, Result};
use serde::Serialize;

/// A synchronous, CPU-bound solver behind one HTTP endpoint.
pub trait Solver: Send + Sync {
    type Input: Send;
    type Output: Serialize + Send;

    /// Problem type reported when solving fails.
    fn default_problem_type(&self) -> &'static str;

    fn solve(&self, input: &Self::Input) -> Result<Solved<Self::Output>>;

    /// Message placed in the error payload.
    fn error_message(&self, error: &MathError) -> String {
        error.to_string()
    }
}
