use crate::domain::model::{ExpressionRequest, LatexSolution, Solved};
use crate::domain::ports::Solver;
use crate::domain::problem_type as label;
use crate::math::factor::{factor, Factorization};
use crate::math::number;
use crate::math::parser::parse;
use crate::math::poly::Poly;
use crate::math::radical::Radical;
use crate::math::ratfunc::polynomial_from_expr;
use crate::solvers::{prepare, single_variable};
use crate::utils::error::Result;
use num_rational::BigRational;
use num_traits::{One, Signed};

/// Factors a polynomial and names the technique a student would use.
#[derive(Debug, Clone, Default)]
pub struct AlgebraSolver;

impl AlgebraSolver {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, raw: &str) -> Result<Solved<LatexSolution>> {
        let cleaned = prepare("expression", raw)?;
        let expr = parse(&cleaned)?;
        let var = single_variable([&expr])?;
        let original_latex = expr.to_latex();

        let poly = polynomial_from_expr(&expr, &var)?;
        let factorization = factor(&poly);
        tracing::debug!(
            "🔎 {} factored into {} factor(s)",
            poly.to_latex(&var),
            factorization.factor_count()
        );

        if !is_trivial(&poly, &factorization) {
            let final_latex = format!("\\displaystyle {}", factorization.to_latex(&var));
            return Ok(Solved::new(
                classify_factored(&poly),
                LatexSolution {
                    final_latex,
                    original_latex,
                },
            ));
        }

        if poly.degree() == 2 {
            let (problem_type, final_latex) = quadratic_fallback(&poly, &var)?;
            return Ok(Solved::new(
                problem_type,
                LatexSolution {
                    final_latex,
                    original_latex,
                },
            ));
        }

        Ok(Solved::new(
            label::PRIME_EXPRESSION,
            LatexSolution {
                final_latex: original_latex.clone(),
                original_latex,
            },
        ))
    }
}

impl Solver for AlgebraSolver {
    type Input = ExpressionRequest;
    type Output = LatexSolution;

    fn default_problem_type(&self) -> &'static str {
        label::GENERAL_FACTORING
    }

    fn solve(&self, input: &ExpressionRequest) -> Result<Solved<LatexSolution>> {
        self.analyze(&input.expression)
    }
}

/// Factoring changed nothing: a monomial, or a single irreducible factor
/// with unit content.
fn is_trivial(poly: &Poly, factorization: &Factorization) -> bool {
    poly.term_count() <= 1
        || (factorization.content.is_one()
            && factorization.factors.len() == 1
            && factorization.factors[0].1 == 1)
}

fn classify_factored(poly: &Poly) -> &'static str {
    match poly.term_count() {
        2 => {
            if poly.has_negative_coeff() && poly.has_term(2) {
                label::DIFFERENCE_OF_SQUARES
            } else if poly.has_term(3) {
                label::SUM_OR_DIFFERENCE_OF_CUBES
            } else {
                label::COMMON_FACTOR
            }
        }
        3 => {
            if poly.leading().is_one() {
                label::SIMPLE_TRINOMIAL
            } else {
                label::NON_SIMPLE_TRINOMIAL
            }
        }
        4 => label::GROUPING,
        _ => label::GENERAL_FACTORING,
    }
}

/// Irreducible quadratic: roots by the quadratic formula, or the negative
/// discriminant.
fn quadratic_fallback(poly: &Poly, var: &str) -> Result<(&'static str, String)> {
    let (a, b, c) = (poly.coeff(2), poly.coeff(1), poly.coeff(0));
    let discriminant = &b * &b - number::int(4) * &a * &c;

    if discriminant.is_negative() {
        return Ok((
            label::NEGATIVE_DISCRIMINANT,
            format!("\\Delta = {} < 0", number::rational_plain(&discriminant)),
        ));
    }

    let [first, second] = quadratic_roots(&a, &b, &discriminant)?;
    let var = crate::math::expr::Expr::Symbol(var.to_string()).to_latex();
    Ok((
        label::QUADRATIC_FORMULA,
        format!(
            "\\displaystyle {} = {}, \\quad {} = {}",
            var,
            first.to_latex(),
            var,
            second.to_latex()
        ),
    ))
}

/// `(-b ± sqrt(Δ)) / 2a`, plus sign first.
pub(crate) fn quadratic_roots(
    a: &BigRational,
    b: &BigRational,
    discriminant: &BigRational,
) -> Result<[Radical; 2]> {
    let root = Radical::sqrt_of_rational(discriminant)?;
    let minus_b = Radical::from_rational(-b);
    let scale = (number::int(2) * a).recip();
    Ok([
        (&minus_b + &root).scale(&scale),
        (&minus_b - &root).scale(&scale),
    ])
}
