//! Dense univariate polynomials with exact rational coefficients.

use crate::math::number::{self, rational_latex};
use crate::math::radical::Radical;
use crate::utils::error::{MathError, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    // ascending powers, no trailing zeros
    coeffs: Vec<BigRational>,
}

impl Poly {
    pub fn new(mut coeffs: Vec<BigRational>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    pub fn from_ints(coeffs: &[i64]) -> Self {
        Self::new(coeffs.iter().map(|&c| number::int(c)).collect())
    }

    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub fn constant(value: BigRational) -> Self {
        Self::new(vec![value])
    }

    /// The polynomial `x`.
    pub fn identity() -> Self {
        Self::new(vec![BigRational::zero(), BigRational::one()])
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Degree, with the zero polynomial reported as degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn coeff(&self, power: usize) -> BigRational {
        self.coeffs.get(power).cloned().unwrap_or_else(BigRational::zero)
    }

    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    pub fn leading(&self) -> BigRational {
        self.coeffs.last().cloned().unwrap_or_else(BigRational::zero)
    }

    pub fn term_count(&self) -> usize {
        self.coeffs.iter().filter(|c| !c.is_zero()).count()
    }

    pub fn has_term(&self, power: usize) -> bool {
        !self.coeff(power).is_zero()
    }

    pub fn has_negative_coeff(&self) -> bool {
        self.coeffs.iter().any(|c| c.is_negative())
    }

    /// Number of leading zero coefficients, i.e. the power of `x` dividing it.
    pub fn low_order(&self) -> usize {
        self.coeffs.iter().take_while(|c| c.is_zero()).count()
    }

    pub fn scale(&self, factor: &BigRational) -> Self {
        Self::new(self.coeffs.iter().map(|c| c * factor).collect())
    }

    pub fn shift_down(&self, by: usize) -> Self {
        Self::new(self.coeffs.iter().skip(by).cloned().collect())
    }

    pub fn pow(&self, exponent: u32) -> Self {
        let mut result = Self::one();
        for _ in 0..exponent {
            result = &result * self;
        }
        result
    }

    pub fn monic(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        self.scale(&self.leading().recip())
    }

    pub fn derivative(&self) -> Self {
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(power, c)| c * BigRational::from_integer(BigInt::from(power)))
                .collect(),
        )
    }

    /// `self / gcd(self, self')`: the same roots, each with multiplicity one.
    pub fn square_free_part(&self) -> Self {
        if self.is_constant() {
            return self.clone();
        }
        let repeated = self.gcd(&self.derivative());
        self.exact_div(&repeated).unwrap_or_else(|| self.clone())
    }

    pub fn div_rem(&self, divisor: &Poly) -> Result<(Poly, Poly)> {
        if divisor.is_zero() {
            return Err(MathError::domain("polynomial division by zero"));
        }

        let mut remainder = self.coeffs.clone();
        let divisor_degree = divisor.degree();
        let lead_inv = divisor.leading().recip();
        if remainder.len() <= divisor_degree {
            return Ok((Poly::zero(), self.clone()));
        }

        let mut quotient = vec![BigRational::zero(); remainder.len() - divisor_degree];
        for shift in (0..quotient.len()).rev() {
            let coef = &remainder[shift + divisor_degree] * &lead_inv;
            if coef.is_zero() {
                continue;
            }
            for (i, d) in divisor.coeffs.iter().enumerate() {
                remainder[shift + i] -= &coef * d;
            }
            quotient[shift] = coef;
        }

        Ok((Poly::new(quotient), Poly::new(remainder)))
    }

    /// Exact quotient when `divisor` divides `self`.
    pub fn exact_div(&self, divisor: &Poly) -> Option<Poly> {
        let (quotient, remainder) = self.div_rem(divisor).ok()?;
        remainder.is_zero().then_some(quotient)
    }

    /// Monic greatest common divisor.
    pub fn gcd(&self, other: &Poly) -> Poly {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let remainder = match a.div_rem(&b) {
                Ok((_, remainder)) => remainder,
                Err(_) => break,
            };
            a = b;
            b = remainder;
        }
        a.monic()
    }

    pub fn eval(&self, x: &BigRational) -> BigRational {
        self.coeffs
            .iter()
            .rev()
            .fold(BigRational::zero(), |acc, c| acc * x + c)
    }

    pub fn eval_radical(&self, x: &Radical) -> Radical {
        self.coeffs.iter().rev().fold(Radical::zero(), |acc, c| {
            &(&acc * x) + &Radical::from_rational(c.clone())
        })
    }

    pub fn eval_f64(&self, x: f64) -> f64 {
        self.coeffs
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * x + number::to_f64(c))
    }

    pub fn to_f64_coeffs(&self) -> Vec<f64> {
        self.coeffs.iter().map(number::to_f64).collect()
    }

    /// Splits into `content * primitive` where the primitive part has coprime
    /// integer coefficients and a positive leading coefficient.
    pub fn content_and_primitive(&self) -> (BigRational, Poly) {
        if self.is_zero() {
            return (BigRational::zero(), Poly::zero());
        }

        let denom_lcm = number::lcm_of_denominators(self.coeffs.iter());
        let numer_gcd = self
            .coeffs
            .iter()
            .map(|c| (c * BigRational::from_integer(denom_lcm.clone())).to_integer())
            .fold(BigInt::zero(), |acc, n| acc.gcd(&n));

        let mut content = BigRational::new(numer_gcd, denom_lcm);
        if self.leading().is_negative() {
            content = -content;
        }
        let primitive = self.scale(&content.recip());
        (content, primitive)
    }

    pub fn to_latex(&self, var: &str) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let mut out = String::new();
        for (power, coef) in self.coeffs.iter().enumerate().rev() {
            if coef.is_zero() {
                continue;
            }
            let body = monomial_latex(&coef.abs(), power, var);
            if out.is_empty() {
                if coef.is_negative() {
                    out.push_str("- ");
                }
            } else if coef.is_negative() {
                out.push_str(" - ");
            } else {
                out.push_str(" + ");
            }
            out.push_str(&body);
        }
        out
    }
}

fn power_latex(power: usize, var: &str) -> String {
    match power {
        0 => String::new(),
        1 => var.to_string(),
        _ => format!("{}^{{{}}}", var, power),
    }
}

/// `|c| x^k` rendered as `3 x^{2}`, `\frac{x^{2}}{2}` or `\frac{3 x}{4}`.
fn monomial_latex(magnitude: &BigRational, power: usize, var: &str) -> String {
    if power == 0 {
        return rational_latex(magnitude);
    }
    let var_part = power_latex(power, var);
    let numer = magnitude.numer();
    let head = if numer.is_one() {
        var_part
    } else {
        format!("{} {}", numer, var_part)
    };
    if magnitude.denom().is_one() {
        head
    } else {
        format!("\\frac{{{}}}{{{}}}", head, magnitude.denom())
    }
}

impl Add for &Poly {
    type Output = Poly;

    fn add(self, rhs: &Poly) -> Poly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        Poly::new((0..len).map(|i| self.coeff(i) + rhs.coeff(i)).collect())
    }
}

impl Sub for &Poly {
    type Output = Poly;

    fn sub(self, rhs: &Poly) -> Poly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        Poly::new((0..len).map(|i| self.coeff(i) - rhs.coeff(i)).collect())
    }
}

impl Mul for &Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Poly {
        if self.is_zero() || rhs.is_zero() {
            return Poly::zero();
        }
        let mut coeffs = vec![BigRational::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Poly::new(coeffs)
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        Poly::new(self.coeffs.iter().map(|c| -c).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::number::{int, ratio};

    #[test]
    fn test_arithmetic() {
        let a = Poly::from_ints(&[1, 1]); // x + 1
        let b = Poly::from_ints(&[-1, 1]); // x - 1
        assert_eq!(&a * &b, Poly::from_ints(&[-1, 0, 1]));
        assert_eq!(&a - &a, Poly::zero());
        assert_eq!(a.pow(2), Poly::from_ints(&[1, 2, 1]));
    }

    #[test]
    fn test_div_rem() {
        let p = Poly::from_ints(&[-6, 11, -6, 1]); // (x-1)(x-2)(x-3)
        let (q, r) = p.div_rem(&Poly::from_ints(&[-1, 1])).unwrap();
        assert_eq!(q, Poly::from_ints(&[6, -5, 1]));
        assert!(r.is_zero());

        let (_, r) = Poly::from_ints(&[1, 0, 1]).div_rem(&Poly::from_ints(&[-1, 1])).unwrap();
        assert_eq!(r, Poly::from_ints(&[2]));
        assert!(p.div_rem(&Poly::zero()).is_err());
    }

    #[test]
    fn test_gcd_is_monic() {
        let a = Poly::from_ints(&[-2, 0, 2]); // 2(x-1)(x+1)
        let b = Poly::from_ints(&[-3, 3]); // 3(x-1)
        assert_eq!(a.gcd(&b), Poly::from_ints(&[-1, 1]));
    }

    #[test]
    fn test_derivative_and_square_free_part() {
        assert_eq!(Poly::from_ints(&[5, 3, 0, 2]).derivative(), Poly::from_ints(&[3, 0, 6]));
        assert!(Poly::from_ints(&[7]).derivative().is_zero());

        // (x^2 - 2)^3
        let cubed = Poly::from_ints(&[-2, 0, 1]).pow(3);
        assert_eq!(cubed.square_free_part(), Poly::from_ints(&[-2, 0, 1]));
    }

    #[test]
    fn test_content_and_primitive() {
        let p = Poly::new(vec![ratio(-1, 2), int(0), ratio(1, 2)]);
        let (content, primitive) = p.content_and_primitive();
        assert_eq!(content, ratio(1, 2));
        assert_eq!(primitive, Poly::from_ints(&[-1, 0, 1]));

        let p = Poly::from_ints(&[4, -2]);
        let (content, primitive) = p.content_and_primitive();
        assert_eq!(content, int(-2));
        assert_eq!(primitive, Poly::from_ints(&[-2, 1]));
    }

    #[test]
    fn test_latex() {
        assert_eq!(Poly::from_ints(&[2, -3, 1]).to_latex("x"), "x^{2} - 3 x + 2");
        assert_eq!(Poly::from_ints(&[0, 0, -2]).to_latex("x"), "- 2 x^{2}");
        assert_eq!(
            Poly::new(vec![ratio(1, 2), ratio(3, 4), ratio(1, 2)]).to_latex("x"),
            "\\frac{x^{2}}{2} + \\frac{3 x}{4} + \\frac{1}{2}"
        );
        assert_eq!(Poly::zero().to_latex("x"), "0");
    }

    #[test]
    fn test_eval() {
        let p = Poly::from_ints(&[-2, 0, 1]);
        assert_eq!(p.eval(&int(2)), int(2));
        let root = Radical::sqrt_of_rational(&int(2)).unwrap();
        assert!(p.eval_radical(&root).is_zero());
        assert!((p.eval_f64(2f64.sqrt())).abs() < 1e-12);
    }
}
