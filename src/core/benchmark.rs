use crate::domain::model::{Benchmarks, Outcome, SolveResponse};
use crate::domain::ports::Solver;
use crate::domain::problem_type as label;
use std::collections::BTreeMap;
use std::time::Instant;

pub const DEFAULT_LABEL: &str = "default";
pub const DEFAULT_HUMAN_SECONDS: u64 = 60;
const MIN_MACHINE_SECONDS: f64 = 0.000001;

/// Estimated human solve time per problem type, in lookup order.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkTable {
    entries: Vec<(String, u64)>,
    default_seconds: u64,
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        let entries = [
            (label::DIFFERENCE_OF_SQUARES, 10),
            (label::SUM_OR_DIFFERENCE_OF_CUBES, 30),
            (label::COMMON_FACTOR, 10),
            (label::SIMPLE_TRINOMIAL, 15),
            (label::NON_SIMPLE_TRINOMIAL, 100),
            (label::GROUPING, 80),
            (label::QUADRATIC_FORMULA, 100),
            (label::LINEAR_EQUATION, 20),
            (label::QUADRATIC_EQUATION, 50),
            (label::ANGLE_ANALYSIS, 10),
            (label::TRIG_FUNCTIONS, 100),
        ]
        .into_iter()
        .map(|(name, seconds)| (name.to_string(), seconds))
        .collect();

        Self {
            entries,
            default_seconds: DEFAULT_HUMAN_SECONDS,
        }
    }
}

impl BenchmarkTable {
    /// Applies overrides on top of the defaults: known labels keep their
    /// position, new labels are appended, `default` replaces the fallback.
    pub fn with_overrides(overrides: &BTreeMap<String, u64>) -> Self {
        let mut table = Self::default();
        for (name, seconds) in overrides {
            if name == DEFAULT_LABEL {
                table.default_seconds = *seconds;
                continue;
            }
            match table.entries.iter_mut().find(|(existing, _)| existing == name) {
                Some(entry) => entry.1 = *seconds,
                None => table.entries.push((name.clone(), *seconds)),
            }
        }
        table
    }

    /// The first label contained in `problem_type` wins.
    pub fn human_time_for(&self, problem_type: &str) -> u64 {
        self.entries
            .iter()
            .find(|(name, _)| problem_type.contains(name.as_str()))
            .map(|(_, seconds)| *seconds)
            .unwrap_or(self.default_seconds)
    }

    pub fn measure(&self, problem_type: &str, machine_seconds: f64) -> Benchmarks {
        let human_time = self.human_time_for(problem_type);
        let safe_machine = machine_seconds.max(MIN_MACHINE_SECONDS);
        Benchmarks {
            machine_time: format!("{:.6}", machine_seconds),
            human_time,
            speedup: (human_time as f64 / safe_machine).floor() as u64,
        }
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn default_seconds(&self) -> u64 {
        self.default_seconds
    }
}

/// Times a solver call and wraps the outcome into the response envelope.
#[derive(Debug, Clone, Default)]
pub struct Benchmarker {
    table: BenchmarkTable,
}

impl Benchmarker {
    pub fn new(table: BenchmarkTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &BenchmarkTable {
        &self.table
    }

    pub fn run<S: Solver>(&self, solver: &S, input: &S::Input) -> SolveResponse<S::Output> {
        let start = Instant::now();
        let result = solver.solve(input);
        let machine_seconds = start.elapsed().as_secs_f64();

        let (outcome, problem_type) = match result {
            Ok(solved) => {
                tracing::debug!(
                    "✅ Solved '{}' in {:.6}s",
                    solved.problem_type,
                    machine_seconds
                );
                (Outcome::Success(solved.body), solved.problem_type)
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Solver failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                (
                    Outcome::Error {
                        message: solver.error_message(&e),
                    },
                    solver.default_problem_type().to_string(),
                )
            }
        };

        let benchmarks = self.table.measure(&problem_type, machine_seconds);
        SolveResponse {
            outcome,
            problem_type,
            benchmarks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Solved;
    use crate::utils::error::{MathError, Result};

    struct FixedSolver {
        fail: bool,
    }

    impl Solver for FixedSolver {
        type Input = ();
        type Output = String;

        fn default_problem_type(&self) -> &'static str {
            label::EQUATION
        }

        fn solve(&self, _input: &()) -> Result<Solved<String>> {
            if self.fail {
                Err(MathError::domain("boom"))
            } else {
                Ok(Solved::new(label::QUADRATIC_EQUATION, "x = 1".to_string()))
            }
        }

        fn error_message(&self, _error: &MathError) -> String {
            "fixed message".to_string()
        }
    }

    #[test]
    fn test_lookup_by_substring_in_table_order() {
        let table = BenchmarkTable::default();
        assert_eq!(table.human_time_for(label::DIFFERENCE_OF_SQUARES), 10);
        assert_eq!(table.human_time_for(label::NON_SIMPLE_TRINOMIAL), 100);
        assert_eq!(table.human_time_for(label::TRIG_FUNCTIONS), 100);
        assert_eq!(table.human_time_for(&label::equation_of_degree(3)), 60);
        assert_eq!(table.human_time_for(label::PRIME_EXPRESSION), 60);
    }

    #[test]
    fn test_simple_trinomial_is_not_shadowed() {
        let table = BenchmarkTable::default();
        assert_eq!(table.human_time_for(label::SIMPLE_TRINOMIAL), 15);
    }

    #[test]
    fn test_overrides_keep_order_and_append() {
        let mut overrides = BTreeMap::new();
        overrides.insert(label::LINEAR_EQUATION.to_string(), 25);
        overrides.insert(label::PRIME_EXPRESSION.to_string(), 5);
        overrides.insert(DEFAULT_LABEL.to_string(), 90);

        let table = BenchmarkTable::with_overrides(&overrides);
        assert_eq!(table.human_time_for(label::LINEAR_EQUATION), 25);
        assert_eq!(table.human_time_for(label::PRIME_EXPRESSION), 5);
        assert_eq!(table.human_time_for("anything else"), 90);
        assert_eq!(table.entries()[7].0, label::LINEAR_EQUATION);
        assert_eq!(table.entries().last().unwrap().0, label::PRIME_EXPRESSION);
    }

    #[test]
    fn test_measure_formats_and_floors() {
        let table = BenchmarkTable::default();
        let benchmarks = table.measure(label::ANGLE_ANALYSIS, 0.25);
        assert_eq!(benchmarks.machine_time, "0.250000");
        assert_eq!(benchmarks.human_time, 10);
        assert_eq!(benchmarks.speedup, 40);

        // 機器時間下限 1 微秒
        let instant = table.measure(label::ANGLE_ANALYSIS, 0.0);
        assert_eq!(instant.machine_time, "0.000000");
        assert!(instant.speedup >= 9_999_999 && instant.speedup <= 10_000_000);
    }

    #[test]
    fn test_run_wraps_success_and_error() {
        let benchmarker = Benchmarker::default();

        let ok = benchmarker.run(&FixedSolver { fail: false }, &());
        assert!(ok.is_success());
        assert_eq!(ok.problem_type, label::QUADRATIC_EQUATION);
        assert_eq!(ok.benchmarks.human_time, 50);

        let err = benchmarker.run(&FixedSolver { fail: true }, &());
        assert!(!err.is_success());
        assert_eq!(err.problem_type, label::EQUATION);
        assert_eq!(err.benchmarks.human_time, 60);
        match err.outcome {
            Outcome::Error { message } => assert_eq!(message, "fixed message"),
            Outcome::Success(_) => panic!("expected an error outcome"),
        }
    }
}
