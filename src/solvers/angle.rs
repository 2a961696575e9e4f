use crate::domain::model::{AngleAnalysis, AngleRequest, Solved};
use crate::domain::ports::Solver;
use crate::domain::problem_type as label;
use crate::math::eval::{eval_pi_value, pi_multiple_latex, PiValue};
use crate::math::number::{self, int};
use crate::math::parser::parse;
use crate::math::trig::{exact_cos_degrees, exact_sin_degrees, unit_circle_latex};
use crate::solvers::prepare;
use crate::utils::error::{MathError, Result};
use num_rational::BigRational;
use num_traits::Zero;

/// Co-terminal angles, quadrant and unit-circle point of an angle.
#[derive(Debug, Clone, Default)]
pub struct AngleSolver;

/// An angle in degrees, exact when the input allowed it.
enum Degrees {
    Exact(BigRational),
    Approx(f64),
}

impl AngleSolver {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, raw: &str, is_radians: bool) -> Result<Solved<AngleAnalysis>> {
        let cleaned = prepare("angle", raw)?;
        let expr = parse(&cleaned)?;
        let value = eval_pi_value(&expr)?;
        let degrees = to_degrees(&value, is_radians);

        let base = match &degrees {
            Degrees::Exact(deg) => number::rem_euclid(deg, &int(360)),
            Degrees::Approx(deg) => {
                let reduced = number::from_f64(deg.rem_euclid(360.0))?;
                // rem_euclid can round up to a full turn
                if reduced >= int(360) {
                    reduced - int(360)
                } else {
                    reduced
                }
            }
        };
        let negative = &base - int(360);

        let coords_latex = match exact_coordinates(&base) {
            Some(coords) => coords,
            None => {
                let argument = match (&degrees, is_radians) {
                    (Degrees::Approx(_), true) => expr.to_latex(),
                    _ => pi_multiple_latex(&(&base / int(180))),
                };
                unit_circle_latex(
                    &format!("\\cos{{\\left({} \\right)}}", argument),
                    &format!("\\sin{{\\left({} \\right)}}", argument),
                )
            }
        };

        let suffix = if is_radians { " rad" } else { "^\\circ" };
        let analysis = AngleAnalysis {
            base_deg: number::to_f64(&base),
            base_rad: pi_multiple_latex(&(&base / int(180))),
            neg_deg: number::to_f64(&negative),
            extra_pos: number::to_f64(&(&base + int(360))),
            extra_neg: number::to_f64(&(&negative - int(360))),
            quadrant: quadrant_name(&base).to_string(),
            input_interpretation: format!("{}{}", expr.to_latex(), suffix),
            coords_latex,
        };
        tracing::debug!("📐 {} -> base {}°", raw, analysis.base_deg);

        Ok(Solved::new(label::ANGLE_ANALYSIS, analysis))
    }
}

impl Solver for AngleSolver {
    type Input = AngleRequest;
    type Output = AngleAnalysis;

    fn default_problem_type(&self) -> &'static str {
        label::ANGLE_ANALYSIS
    }

    fn solve(&self, input: &AngleRequest) -> Result<Solved<AngleAnalysis>> {
        self.analyze(&input.angle, input.is_radians)
    }

    fn error_message(&self, error: &MathError) -> String {
        format!("Input Error: {}", error)
    }
}

fn to_degrees(value: &PiValue, is_radians: bool) -> Degrees {
    if !is_radians {
        return match value.as_rational() {
            Some(deg) => Degrees::Exact(deg.clone()),
            None => Degrees::Approx(value.to_f64()),
        };
    }
    match value.as_pi_multiple() {
        Some(coeff) => Degrees::Exact(coeff * int(180)),
        None => Degrees::Approx(value.to_f64().to_degrees()),
    }
}

fn exact_coordinates(base: &BigRational) -> Option<String> {
    let cos = exact_cos_degrees(base)?;
    let sin = exact_sin_degrees(base)?;
    Some(unit_circle_latex(&cos.to_latex(), &sin.to_latex()))
}

fn quadrant_name(base: &BigRational) -> &'static str {
    if base.is_zero() || *base == int(180) {
        "Axial (X-Axis)"
    } else if *base == int(90) || *base == int(270) {
        "Axial (Y-Axis)"
    } else if *base < int(90) {
        "Quadrant I"
    } else if *base < int(180) {
        "Quadrant II"
    } else if *base < int(270) {
        "Quadrant III"
    } else {
        "Quadrant IV"
    }
}
