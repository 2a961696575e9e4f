//! Factoring univariate polynomials over the rationals.
//!
//! Linear factors come from the rational root theorem; remaining parts of
//! degree four or more are searched for quadratic factors whose coefficients
//! are recovered from pairs of numeric roots and then verified by exact
//! division. Whatever is left is reported as irreducible.

use crate::math::number::{self, rational_latex};
use crate::math::poly::Poly;
use crate::math::roots;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Degree bound for the numeric quadratic-factor search.
const MAX_NUMERIC_DEGREE: usize = 16;
/// Largest leading coefficient whose divisors are tried as denominators.
const MAX_LEADING_FOR_SEARCH: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Factorization {
    pub content: BigRational,
    /// Primitive integer polynomials with positive leading coefficient.
    pub factors: Vec<(Poly, u32)>,
}

impl Factorization {
    /// Number of irreducible factors counted with multiplicity.
    pub fn factor_count(&self) -> u32 {
        self.factors.iter().map(|(_, m)| m).sum()
    }

    pub fn expand(&self) -> Poly {
        self.factors
            .iter()
            .fold(Poly::constant(self.content.clone()), |acc, (factor, m)| {
                &acc * &factor.pow(*m)
            })
    }

    /// Renders `2 x \left(x - 1\right)^{2}`, `- \left(x - 1\right) \left(x + 1\right)`
    /// or `\frac{\left(x - 1\right) \left(x + 1\right)}{2}`.
    pub fn to_latex(&self, var: &str) -> String {
        if self.factors.is_empty() {
            return rational_latex(&self.content);
        }

        let body = self
            .factors
            .iter()
            .map(|(factor, multiplicity)| {
                let base = if *factor == Poly::identity() {
                    var.to_string()
                } else {
                    format!("\\left({}\\right)", factor.to_latex(var))
                };
                if *multiplicity > 1 {
                    format!("{}^{{{}}}", base, multiplicity)
                } else {
                    base
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        let sign = if self.content.is_negative() { "- " } else { "" };
        let magnitude = self.content.abs();
        let numer = magnitude.numer();
        let head = if numer.is_one() {
            body
        } else {
            format!("{} {}", numer, body)
        };
        if magnitude.denom().is_one() {
            format!("{}{}", sign, head)
        } else {
            format!("{}\\frac{{{}}}{{{}}}", sign, head, magnitude.denom())
        }
    }
}

/// Factors `poly` into content times irreducible primitive factors.
pub fn factor(poly: &Poly) -> Factorization {
    let (content, primitive) = poly.content_and_primitive();
    if primitive.is_zero() || primitive.is_constant() {
        return Factorization {
            content,
            factors: Vec::new(),
        };
    }

    let zeros = primitive.low_order();
    let mut found: Vec<Poly> = std::iter::repeat(Poly::identity()).take(zeros).collect();

    for (part, multiplicity) in square_free_decomposition(&primitive.shift_down(zeros)) {
        for irreducible in factor_square_free(part) {
            found.extend(std::iter::repeat(irreducible).take(multiplicity as usize));
        }
    }

    Factorization {
        content,
        factors: group_factors(found),
    }
}

/// Yun's algorithm: `poly = a1 * a2^2 * a3^3 * ...` with every `ai`
/// square-free and pairwise coprime. Parts are primitive; constant parts
/// are skipped.
fn square_free_decomposition(poly: &Poly) -> Vec<(Poly, u32)> {
    if poly.is_constant() {
        return Vec::new();
    }

    let derivative = poly.derivative();
    let repeated = poly.gcd(&derivative);
    let (Some(mut b), Some(c)) = (poly.exact_div(&repeated), derivative.exact_div(&repeated)) else {
        return vec![(poly.clone(), 1)];
    };
    let mut d = &c - &b.derivative();

    let mut parts = Vec::new();
    let mut multiplicity = 1;
    while !b.is_constant() {
        let a = b.gcd(&d);
        let (Some(next_b), Some(c)) = (b.exact_div(&a), d.exact_div(&a)) else {
            parts.push((b.content_and_primitive().1, multiplicity));
            break;
        };
        if !a.is_constant() {
            parts.push((a.content_and_primitive().1, multiplicity));
        }
        d = &c - &next_b.derivative();
        b = next_b;
        multiplicity += 1;
    }
    parts
}

/// Splits a square-free primitive polynomial into irreducible factors.
fn factor_square_free(mut rest: Poly) -> Vec<Poly> {
    let mut found = Vec::new();

    while rest.degree() >= 2 {
        match find_rational_root(&rest) {
            Some(linear) => {
                rest = divide_out(&rest, &linear);
                found.push(linear);
            }
            None => break,
        }
    }

    while rest.degree() >= 4 {
        match find_quadratic_factor(&rest) {
            Some(quadratic) => {
                rest = divide_out(&rest, &quadratic);
                found.push(quadratic);
            }
            None => break,
        }
    }

    if rest.degree() >= 1 {
        found.push(rest.content_and_primitive().1);
    }
    found
}

fn divide_out(poly: &Poly, factor: &Poly) -> Poly {
    poly.exact_div(factor)
        .map(|quotient| quotient.content_and_primitive().1)
        .unwrap_or_else(|| poly.clone())
}

fn group_factors(mut found: Vec<Poly>) -> Vec<(Poly, u32)> {
    let identity = Poly::identity();
    found.sort_by(|a, b| {
        a.degree()
            .cmp(&b.degree())
            .then_with(|| (*b == identity).cmp(&(*a == identity)))
            .then_with(|| a.coeffs().cmp(b.coeffs()))
    });

    let mut grouped: Vec<(Poly, u32)> = Vec::new();
    for factor in found {
        match grouped.last_mut() {
            Some((last, multiplicity)) if *last == factor => *multiplicity += 1,
            _ => grouped.push((factor, 1)),
        }
    }
    grouped
}

/// Returns a primitive linear factor `q x - p` for a rational root `p/q`.
fn find_rational_root(poly: &Poly) -> Option<Poly> {
    let constant = poly.coeff(0).to_integer();
    let leading = poly.leading().to_integer();
    if constant.is_zero() {
        return Some(Poly::identity());
    }

    let numerators = number::positive_divisors(&constant)?;
    let denominators = number::positive_divisors(&leading)?;

    for q in &denominators {
        for p in &numerators {
            for candidate_p in [p.clone(), -p] {
                let root = BigRational::new(candidate_p.clone(), q.clone());
                if !root.denom().eq(q) {
                    // already covered by a smaller denominator
                    continue;
                }
                if poly.eval(&root).is_zero() {
                    return Some(Poly::new(vec![
                        BigRational::from_integer(-candidate_p),
                        BigRational::from_integer(q.clone()),
                    ]));
                }
            }
        }
    }
    None
}

fn find_quadratic_factor(poly: &Poly) -> Option<Poly> {
    if poly.degree() > MAX_NUMERIC_DEGREE {
        return None;
    }
    let leading = poly.leading().to_integer().to_u64()?;
    if leading > MAX_LEADING_FOR_SEARCH {
        return None;
    }
    let denominators = number::positive_divisors(&BigInt::from(leading))?;

    let candidates = roots::complex_roots(poly);
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            let sum = candidates[i] + candidates[j];
            let product = candidates[i] * candidates[j];
            if sum.im.abs() > 1e-6 || product.im.abs() > 1e-6 {
                continue;
            }
            for denom in &denominators {
                let denom_f = denom.to_f64().unwrap_or(1.0);
                let (Some(b), Some(c)) = (
                    round_to_denominator(-sum.re, denom_f, denom),
                    round_to_denominator(product.re, denom_f, denom),
                ) else {
                    continue;
                };
                let quadratic = Poly::new(vec![c, b, BigRational::one()]);
                if poly.exact_div(&quadratic).is_some() {
                    return Some(quadratic.content_and_primitive().1);
                }
            }
        }
    }
    None
}

fn round_to_denominator(value: f64, denom_f: f64, denom: &BigInt) -> Option<BigRational> {
    let scaled = value * denom_f;
    let rounded = scaled.round();
    if (scaled - rounded).abs() > 1e-6 * scaled.abs().max(1.0) {
        return None;
    }
    let numer = number::from_f64(rounded).ok()?.to_integer();
    Some(BigRational::new(numer, denom.clone()))
}
