use crate::domain::model::{ExpressionRequest, LatexSolution, Solved};
use crate::domain::ports::Solver;
use crate::domain::problem_type as label;
use crate::math::expr::Expr;
use crate::math::factor::factor;
use crate::math::number;
use crate::math::parser::parse;
use crate::math::poly::Poly;
use crate::math::radical::Radical;
use crate::math::ratfunc::RationalFunction;
use crate::math::roots;
use crate::solvers::algebra::quadratic_roots;
use crate::solvers::{prepare, single_variable};
use crate::utils::error::{MathError, Result};
use num_traits::Signed;

pub const EQUATION_HINT: &str = "تأكد من كتابة المعادلة بشكل صحيح (مثال: 2*x + 5 = 15)";

const APPROX_TOLERANCE: f64 = 1e-9;

/// A real root, exact when it is rational or a quadratic surd.
#[derive(Debug, Clone, PartialEq)]
pub enum RealRoot {
    Exact(Radical),
    Approx(f64),
}

impl RealRoot {
    pub fn to_f64(&self) -> f64 {
        match self {
            RealRoot::Exact(value) => value.to_f64(),
            RealRoot::Approx(value) => *value,
        }
    }

    /// `x = \frac{5}{2}` or `x \approx 1.324718`.
    pub fn to_latex(&self, var: &str) -> String {
        match self {
            RealRoot::Exact(value) => format!("{} = {}", var, value.to_latex()),
            RealRoot::Approx(value) => format!("{} \\approx {:.6}", var, value),
        }
    }

    /// The root alone: `\frac{5}{2}` or `1.324718`.
    pub fn value_latex(&self) -> String {
        match self {
            RealRoot::Exact(value) => value.to_latex(),
            RealRoot::Approx(value) => format!("{:.6}", value),
        }
    }

    fn is_pole_of(&self, den: &Poly) -> bool {
        match self {
            RealRoot::Exact(value) => den.eval_radical(value).is_zero(),
            RealRoot::Approx(value) => den.eval_f64(*value).abs() < APPROX_TOLERANCE,
        }
    }

    fn same_as(&self, other: &RealRoot) -> bool {
        match (self, other) {
            (RealRoot::Exact(a), RealRoot::Exact(b)) => a == b,
            _ => (self.to_f64() - other.to_f64()).abs() <= APPROX_TOLERANCE,
        }
    }
}

/// Solves a single-variable equation over the reals.
#[derive(Debug, Clone, Default)]
pub struct EquationSolver;

impl EquationSolver {
    pub fn new() -> Self {
        Self
    }

    pub fn solve_equation(&self, raw: &str) -> Result<Solved<LatexSolution>> {
        let cleaned = prepare("expression", raw)?;
        let (lhs, rhs) = split_sides(&cleaned)?;
        let var = single_variable([&lhs, &rhs])?;
        let var_latex = Expr::Symbol(var.clone()).to_latex();
        let original_latex = format!("{} = {}", lhs.to_latex(), rhs.to_latex());

        let moved = RationalFunction::from_expr(&lhs, &var)?
            .sub(&RationalFunction::from_expr(&rhs, &var)?);

        if moved.num.is_zero() {
            // every real value except the poles of the original denominators
            let poles = real_solutions(&moved.den, &Poly::one())?;
            let domain = if poles.is_empty() {
                "\\mathbb{R}".to_string()
            } else {
                let excluded = poles
                    .iter()
                    .map(RealRoot::value_latex)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("\\mathbb{{R}} \\setminus \\left\\{{{}\\right\\}}", excluded)
            };
            return Ok(Solved::new(
                label::IDENTITY_EQUATION,
                LatexSolution {
                    final_latex: format!("\\displaystyle {} \\in {}", var_latex, domain),
                    original_latex,
                },
            ));
        }

        let numerator = moved.reduced_numerator();
        let solutions = real_solutions(&numerator, &moved.den)?;
        tracing::debug!(
            "🔎 {} real solution(s) for numerator of degree {}",
            solutions.len(),
            numerator.degree()
        );

        if solutions.is_empty() {
            return Ok(Solved::new(
                label::IMPOSSIBLE_EQUATION,
                LatexSolution {
                    final_latex: "\\phi \\quad (\\text{لا يوجد حل حقيقي})".to_string(),
                    original_latex,
                },
            ));
        }

        let rendered = solutions
            .iter()
            .map(|root| root.to_latex(&var_latex))
            .collect::<Vec<_>>()
            .join(" , \\quad ");
        let problem_type = match numerator.degree() {
            1 => label::LINEAR_EQUATION.to_string(),
            2 => label::QUADRATIC_EQUATION.to_string(),
            degree => label::equation_of_degree(degree),
        };

        Ok(Solved::new(
            problem_type,
            LatexSolution {
                final_latex: format!("\\displaystyle {}", rendered),
                original_latex,
            },
        ))
    }
}

impl Solver for EquationSolver {
    type Input = ExpressionRequest;
    type Output = LatexSolution;

    fn default_problem_type(&self) -> &'static str {
        label::EQUATION
    }

    fn solve(&self, input: &ExpressionRequest) -> Result<Solved<LatexSolution>> {
        self.solve_equation(&input.expression)
    }

    fn error_message(&self, _error: &MathError) -> String {
        EQUATION_HINT.to_string()
    }
}

/// `lhs = rhs`; a missing `=` means the expression equals zero.
fn split_sides(cleaned: &str) -> Result<(Expr, Expr)> {
    let parts: Vec<&str> = cleaned.split('=').collect();
    match parts.as_slice() {
        [single] => Ok((parse(single)?, Expr::Number(number::int(0)))),
        [lhs, rhs] => Ok((parse(lhs)?, parse(rhs)?)),
        _ => Err(MathError::invalid_input(
            "expression",
            "an equation may contain only one '='",
        )),
    }
}

/// Distinct real roots of `num` that are not poles of `den`, ascending.
fn real_solutions(num: &Poly, den: &Poly) -> Result<Vec<RealRoot>> {
    let mut found = Vec::new();

    for (factor_poly, _) in factor(num).factors {
        match factor_poly.degree() {
            0 => {}
            1 => {
                let root = -(factor_poly.coeff(0) / factor_poly.coeff(1));
                found.push(RealRoot::Exact(Radical::from_rational(root)));
            }
            2 => {
                let (a, b, c) = (
                    factor_poly.coeff(2),
                    factor_poly.coeff(1),
                    factor_poly.coeff(0),
                );
                let discriminant = &b * &b - number::int(4) * &a * &c;
                if discriminant.is_negative() {
                    continue;
                }
                let [first, second] = quadratic_roots(&a, &b, &discriminant)?;
                found.push(RealRoot::Exact(first));
                found.push(RealRoot::Exact(second));
            }
            _ => {
                found.extend(roots::real_roots(&factor_poly).into_iter().map(RealRoot::Approx));
            }
        }
    }

    found.retain(|root| !root.is_pole_of(den));
    found.sort_by(|a, b| a.to_f64().total_cmp(&b.to_f64()));
    found.dedup_by(|a, b| a.same_as(b));
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(input: &str) -> Solved<LatexSolution> {
        EquationSolver::new().solve_equation(input).unwrap()
    }

    #[test]
    fn test_linear_equation() {
        let solved = solve("2x + 5 = 15");
        assert_eq!(solved.problem_type, label::LINEAR_EQUATION);
        assert_eq!(solved.body.final_latex, "\\displaystyle x = 5");
        assert_eq!(solved.body.original_latex, "2 x + 5 = 15");
    }

    #[test]
    fn test_quadratic_equation_sorted() {
        let solved = solve("x^2 - 5x + 6 = 0");
        assert_eq!(solved.problem_type, label::QUADRATIC_EQUATION);
        assert_eq!(solved.body.final_latex, "\\displaystyle x = 2 , \\quad x = 3");

        let solved = solve("x^2 = 2");
        assert_eq!(
            solved.body.final_latex,
            "\\displaystyle x = - \\sqrt{2} , \\quad x = \\sqrt{2}"
        );
    }

    #[test]
    fn test_missing_equals_means_zero() {
        let solved = solve("x^2 - 4");
        assert_eq!(solved.body.original_latex, "x^{2} - 4 = 0");
        assert_eq!(solved.body.final_latex, "\\displaystyle x = -2 , \\quad x = 2");
    }

    #[test]
    fn test_cubic_with_approximation() {
        let solved = solve("x^3 - x - 1 = 0");
        assert_eq!(solved.problem_type, label::equation_of_degree(3));
        assert_eq!(solved.body.final_latex, "\\displaystyle x \\approx 1.324718");
    }

    #[test]
    fn test_no_real_solution() {
        let solved = solve("x^2 + 1 = 0");
        assert_eq!(solved.problem_type, label::IMPOSSIBLE_EQUATION);
        assert_eq!(
            solved.body.final_latex,
            "\\phi \\quad (\\text{لا يوجد حل حقيقي})"
        );

        let solved = solve("x + 1 = x");
        assert_eq!(solved.problem_type, label::IMPOSSIBLE_EQUATION);
    }

    #[test]
    fn test_identity() {
        let solved = solve("2(x + 1) = 2x + 2");
        assert_eq!(solved.problem_type, label::IDENTITY_EQUATION);
        assert_eq!(solved.body.final_latex, "\\displaystyle x \\in \\mathbb{R}");
    }

    #[test]
    fn test_identity_excludes_denominator_roots() {
        let solved = solve("x/x = 1");
        assert_eq!(solved.problem_type, label::IDENTITY_EQUATION);
        assert_eq!(
            solved.body.final_latex,
            "\\displaystyle x \\in \\mathbb{R} \\setminus \\left\\{0\\right\\}"
        );

        let solved = solve("1/(x-1) = 1/(x-1)");
        assert_eq!(
            solved.body.final_latex,
            "\\displaystyle x \\in \\mathbb{R} \\setminus \\left\\{1\\right\\}"
        );

        let solved = solve("(x^2 - 2)/(x^2 - 2) = 1");
        assert_eq!(
            solved.body.final_latex,
            "\\displaystyle x \\in \\mathbb{R} \\setminus \\left\\{- \\sqrt{2}, \\sqrt{2}\\right\\}"
        );

        // no real poles
        let solved = solve("x/(x^2 + 1) = x/(x^2 + 1)");
        assert_eq!(solved.body.final_latex, "\\displaystyle x \\in \\mathbb{R}");
    }

    #[test]
    fn test_repeated_factors_keep_their_roots() {
        let solved = solve("(x^2-2)^3 = 0");
        assert_eq!(
            solved.body.final_latex,
            "\\displaystyle x = - \\sqrt{2} , \\quad x = \\sqrt{2}"
        );
        assert_eq!(solved.problem_type, label::equation_of_degree(6));

        let solved = solve("(x^2-3)^3 = 0");
        assert_eq!(
            solved.body.final_latex,
            "\\displaystyle x = - \\sqrt{3} , \\quad x = \\sqrt{3}"
        );

        let solved = solve("(x^3-x-1)^2 = 0");
        assert_eq!(solved.body.final_latex, "\\displaystyle x \\approx 1.324718");
    }

    #[test]
    fn test_nested_powers_are_rejected() {
        let solver = EquationSolver::new();
        for input in ["(((x+1)^64)^64)^64 = 0", "((x+1)^64)^64 = 1"] {
            assert!(matches!(
                solver.solve_equation(input),
                Err(MathError::NumericLimitError { .. })
            ));
        }
    }

    #[test]
    fn test_rational_equation_excludes_poles() {
        let solved = solve("1/x = 2");
        assert_eq!(solved.body.final_latex, "\\displaystyle x = \\frac{1}{2}");

        // x = 1 cancels against the denominator
        let solved = solve("(x^2 - 1)/(x - 1) = 0");
        assert_eq!(solved.body.final_latex, "\\displaystyle x = -1");
    }

    #[test]
    fn test_errors_use_fixed_hint() {
        let solver = EquationSolver::new();
        assert!(solver.solve_equation("x = 1 = 2").is_err());
        assert!(solver.solve_equation("x + y = 1").is_err());
        assert!(solver.solve_equation("2x + = 5").is_err());

        let error = MathError::unsupported("anything");
        assert_eq!(solver.error_message(&error), EQUATION_HINT);
    }

    #[test]
    fn test_exact_roots_satisfy_numerator() {
        for coeffs in [
            &[-6, 11, -6, 1][..],
            &[-2, 0, 1],
            &[1, -4, 1],
            &[-6, 0, 1, 0, 0, 0],
            &[3, 7, 2],
            &[-8, 0, 12, 0, -6, 0, 1],
        ] {
            let num = Poly::from_ints(coeffs);
            for root in real_solutions(&num, &Poly::one()).unwrap() {
                match root {
                    RealRoot::Exact(value) => assert!(num.eval_radical(&value).is_zero()),
                    RealRoot::Approx(value) => assert!(num.eval_f64(value).abs() < 1e-6),
                }
            }
        }
    }
}
