use crate::domain::model::{QuadrantAngle, Solved, TrigFunctions, TrigRequest};
use crate::domain::ports::Solver;
use crate::domain::problem_type as label;
use crate::math::eval::eval_radical;
use crate::math::parser::parse;
use crate::math::radical::Radical;
use crate::math::trig::{unit_circle_latex, ReferenceAngle, TrigFunc};
use crate::solvers::prepare;
use crate::utils::error::{MathError, Result};
use num_rational::BigRational;

const COMPLEX_INFINITY: &str = "\\tilde{\\infty}";

/// Derives all six trigonometric functions from one value and a quadrant.
#[derive(Debug, Clone, Default)]
pub struct TrigFunctionSolver;

impl TrigFunctionSolver {
    pub fn new() -> Self {
        Self
    }

    pub fn solve_from_one(
        &self,
        func: &str,
        value: &str,
        quadrant: i64,
    ) -> Result<Solved<TrigFunctions>> {
        let func = TrigFunc::from_name(func)?;
        let quadrant = match quadrant {
            1..=4 => quadrant as u8,
            other => {
                return Err(MathError::invalid_input(
                    "quadrant",
                    format!("{} is not between 1 and 4", other),
                ))
            }
        };

        let cleaned = prepare("value", value)?;
        let magnitude = eval_radical(&parse(&cleaned)?)?.abs();
        if func != TrigFunc::Tan && magnitude.to_f64() > 1.0 {
            return Err(MathError::domain(format!(
                "|{}| = {} is greater than 1",
                func.name(),
                magnitude.to_latex()
            )));
        }

        let (sin_abs, cos_abs) = unit_magnitudes(func, &magnitude)?;
        let sin = signed(&sin_abs, TrigFunc::Sin.sign_in_quadrant(quadrant));
        let cos = signed(&cos_abs, TrigFunc::Cos.sign_in_quadrant(quadrant));
        tracing::debug!(
            "📐 {}={} in quadrant {} -> sin={}, cos={}",
            func.name(),
            magnitude.to_latex(),
            quadrant,
            sin.to_latex(),
            cos.to_latex()
        );

        let one = Radical::one();
        let reference = ReferenceAngle::from_value(func, &magnitude);
        let angles_analysis = (1..=4u8)
            .map(|quad| {
                let (angle_latex, angle_float) = reference.angle_in_quadrant(quad);
                QuadrantAngle {
                    quad,
                    angle_latex,
                    value_latex: signed(&magnitude, func.sign_in_quadrant(quad)).to_latex(),
                    angle_float,
                    is_selected: quad == quadrant,
                }
            })
            .collect();

        let functions = TrigFunctions {
            sin: sin.to_latex(),
            cos: cos.to_latex(),
            tan: ratio_latex(&sin, &cos),
            csc: ratio_latex(&one, &sin),
            sec: ratio_latex(&one, &cos),
            cot: ratio_latex(&cos, &sin),
            coords_latex: unit_circle_latex(&cos.to_latex(), &sin.to_latex()),
            angles_analysis,
        };

        Ok(Solved::new(label::TRIG_FUNCTIONS, functions))
    }
}

impl Solver for TrigFunctionSolver {
    type Input = TrigRequest;
    type Output = TrigFunctions;

    fn default_problem_type(&self) -> &'static str {
        label::TRIG_FUNCTIONS
    }

    fn solve(&self, input: &TrigRequest) -> Result<Solved<TrigFunctions>> {
        self.solve_from_one(&input.func, &input.value, input.quadrant)
    }

    fn error_message(&self, error: &MathError) -> String {
        format!("Calculation Error: {}", error)
    }
}

/// `(|sin|, |cos|)` of the reference angle.
fn unit_magnitudes(func: TrigFunc, magnitude: &Radical) -> Result<(Radical, Radical)> {
    let complement = || (&Radical::one() - &magnitude.pow(2)).sqrt();
    match func {
        TrigFunc::Sin => Ok((magnitude.clone(), complement()?)),
        TrigFunc::Cos => Ok((complement()?, magnitude.clone())),
        TrigFunc::Tan => {
            // tan = n/d on a right triangle with hypotenuse sqrt(n^2 + d^2)
            let (numer, denom) = magnitude.numer_denom();
            let denom = Radical::from_rational(BigRational::from_integer(denom));
            let hypot = (&numer.pow(2) + &denom.pow(2)).sqrt()?;
            Ok((numer.checked_div(&hypot)?, denom.checked_div(&hypot)?))
        }
    }
}

fn signed(value: &Radical, sign: i8) -> Radical {
    if sign < 0 {
        -value
    } else {
        value.clone()
    }
}

fn ratio_latex(numer: &Radical, denom: &Radical) -> String {
    match numer.checked_div(denom) {
        Ok(value) => value.to_latex(),
        Err(_) => COMPLEX_INFINITY.to_string(),
    }
}
