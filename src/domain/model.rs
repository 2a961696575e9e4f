use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionRequest {
    pub expression: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AngleRequest {
    pub angle: String,
    #[serde(default)]
    pub is_radians: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrigRequest {
    pub func: String,
    pub value: String,
    pub quadrant: i64,
}

/// A solver result together with the problem type it was classified as.
#[derive(Debug, Clone)]
pub struct Solved<T> {
    pub problem_type: String,
    pub body: T,
}

impl<T> Solved<T> {
    pub fn new(problem_type: impl Into<String>, body: T) -> Self {
        Self {
            problem_type: problem_type.into(),
            body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatexSolution {
    pub final_latex: String,
    pub original_latex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AngleAnalysis {
    pub base_deg: f64,
    pub base_rad: String,
    pub neg_deg: f64,
    pub extra_pos: f64,
    pub extra_neg: f64,
    pub quadrant: String,
    pub input_interpretation: String,
    pub coords_latex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuadrantAngle {
    pub quad: u8,
    pub angle_latex: String,
    pub value_latex: String,
    pub angle_float: f64,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrigFunctions {
    pub sin: String,
    pub cos: String,
    pub tan: String,
    pub csc: String,
    pub sec: String,
    pub cot: String,
    pub coords_latex: String,
    pub angles_analysis: Vec<QuadrantAngle>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Benchmarks {
    /// Seconds with six decimals, e.g. `"0.000412"`.
    pub machine_time: String,
    pub human_time: u64,
    pub speedup: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome<T> {
    Success(T),
    Error { message: String },
}

/// Wire shape of every solve endpoint: the outcome fields flattened next to
/// `type` and `benchmarks`.
#[derive(Debug, Clone, Serialize)]
pub struct SolveResponse<T> {
    #[serde(flatten)]
    pub outcome: Outcome<T>,
    #[serde(rename = "type")]
    pub problem_type: String,
    pub benchmarks: Benchmarks,
}

impl<T> SolveResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn benchmarks() -> Benchmarks {
        Benchmarks {
            machine_time: "0.000100".to_string(),
            human_time: 10,
            speedup: 100000,
        }
    }

    #[test]
    fn test_success_payload_is_flat() {
        let response = SolveResponse {
            outcome: Outcome::Success(LatexSolution {
                final_latex: "x".to_string(),
                original_latex: "x".to_string(),
            }),
            problem_type: "تحليل عام".to_string(),
            benchmarks: benchmarks(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["final_latex"], "x");
        assert_eq!(value["type"], "تحليل عام");
        assert_eq!(value["benchmarks"]["human_time"], 10);
        assert_eq!(value["benchmarks"]["machine_time"], "0.000100");
    }

    #[test]
    fn test_error_payload() {
        let response: SolveResponse<LatexSolution> = SolveResponse {
            outcome: Outcome::Error {
                message: "bad input".to_string(),
            },
            problem_type: "معادلة".to_string(),
            benchmarks: benchmarks(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "bad input");
        assert!(value.get("final_latex").is_none());
        assert!(!response.is_success());
    }

    #[test]
    fn test_angle_request_defaults_to_degrees() {
        let request: AngleRequest = serde_json::from_str(r#"{"angle": "750"}"#).unwrap();
        assert!(!request.is_radians);
    }
}
