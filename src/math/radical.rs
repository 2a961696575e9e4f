//! Exact real numbers of the form `q1*sqrt(m1) + q2*sqrt(m2) + ...`.
//!
//! Radicands are kept square-free and coefficients non-zero, so two equal
//! numbers always have the same representation and `==` is exact equality.

use crate::math::number::{self, rational_latex};
use crate::utils::error::{MathError, Result};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Radical {
    // radicand -> coefficient; radicand 1 holds the rational part
    terms: BTreeMap<BigInt, BigRational>,
}

impl Radical {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::from_rational(BigRational::one())
    }

    pub fn from_rational(value: BigRational) -> Self {
        let mut radical = Self::zero();
        radical.push_term(BigInt::one(), value);
        radical
    }

    pub fn from_int(value: i64) -> Self {
        Self::from_rational(number::int(value))
    }

    /// `coef * sqrt(radicand)`; the radicand need not be square-free.
    pub fn term(coef: BigRational, radicand: BigInt) -> Result<Self> {
        let (square, free) = number::square_free_split(&radicand)?;
        let mut radical = Self::zero();
        radical.push_term(free, coef * BigRational::from_integer(square));
        Ok(radical)
    }

    /// Principal square root of a non-negative rational.
    pub fn sqrt_of_rational(value: &BigRational) -> Result<Self> {
        let (coef, radicand) = number::sqrt_rational(value)?;
        let mut radical = Self::zero();
        radical.push_term(radicand, coef);
        Ok(radical)
    }

    fn push_term(&mut self, radicand: BigInt, coef: BigRational) {
        if coef.is_zero() {
            return;
        }
        let entry = self.terms.entry(radicand).or_insert_with(BigRational::zero);
        *entry += coef;
        if entry.is_zero() {
            self.terms.retain(|_, c| !c.is_zero());
        }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The value as a rational when it has no irrational part.
    pub fn as_rational(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => self.terms.get(&BigInt::one()).cloned(),
            _ => None,
        }
    }

    /// Decomposes `a + b*sqrt(d)` when at most one irrational radicand occurs.
    fn as_quadratic(&self) -> Option<(BigRational, BigRational, BigInt)> {
        let mut rational = BigRational::zero();
        let mut irrational: Option<(BigRational, BigInt)> = None;
        for (radicand, coef) in &self.terms {
            if radicand.is_one() {
                rational = coef.clone();
            } else if irrational.is_none() {
                irrational = Some((coef.clone(), radicand.clone()));
            } else {
                return None;
            }
        }
        let (b, d) = irrational?;
        Some((rational, b, d))
    }

    pub fn to_f64(&self) -> f64 {
        self.terms
            .iter()
            .map(|(radicand, coef)| {
                number::to_f64(coef) * radicand.to_f64().unwrap_or(f64::NAN).sqrt()
            })
            .sum()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.to_f64() < 0.0
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    pub fn scale(&self, factor: &BigRational) -> Self {
        let mut result = Self::zero();
        for (radicand, coef) in &self.terms {
            result.push_term(radicand.clone(), coef * factor);
        }
        result
    }

    /// Bit size of the largest term plus the bits needed to count terms,
    /// an upper bound for how much one multiplication grows coefficients.
    pub fn size_bits(&self) -> u64 {
        let widest = self
            .terms
            .iter()
            .map(|(radicand, coef)| number::rational_bits(coef) + radicand.bits())
            .max()
            .unwrap_or(0);
        widest + u64::from(usize::BITS - self.terms.len().leading_zeros())
    }

    pub fn pow(&self, exponent: u32) -> Self {
        let mut result = Self::one();
        for _ in 0..exponent {
            result = &result * self;
        }
        result
    }

    /// Splits into `numerator / denominator` with integer coefficients in the
    /// numerator and a positive integer denominator.
    pub fn numer_denom(&self) -> (Self, BigInt) {
        let denom = number::lcm_of_denominators(self.terms.values());
        let numer = self.scale(&BigRational::from_integer(denom.clone()));
        (numer, denom)
    }

    /// Image under the field automorphism sending `sqrt(prime)` to `-sqrt(prime)`.
    fn conjugate(&self, prime: &BigInt) -> Self {
        let mut result = Self::zero();
        for (radicand, coef) in &self.terms {
            let coef = if (radicand % prime).is_zero() {
                -coef
            } else {
                coef.clone()
            };
            result.push_term(radicand.clone(), coef);
        }
        result
    }

    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(MathError::domain("division by zero"));
        }
        if let Some(value) = self.as_rational() {
            return Ok(Self::from_rational(value.recip()));
        }

        let radicand = self
            .terms
            .keys()
            .find(|radicand| !radicand.is_one())
            .ok_or_else(|| MathError::domain("expected an irrational term"))?;
        let prime = number::smallest_prime_factor(radicand)?;

        // x * conj(x) no longer contains sqrt(prime); recurse on the norm
        let conjugate = self.conjugate(&prime);
        let norm = self * &conjugate;
        Ok(&conjugate * &norm.inverse()?)
    }

    pub fn checked_div(&self, divisor: &Self) -> Result<Self> {
        Ok(self * &divisor.inverse()?)
    }

    /// Principal square root, denesting `sqrt(a + b*sqrt(d))` when possible.
    pub fn sqrt(&self) -> Result<Self> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        if self.is_negative() {
            return Err(MathError::domain(format!(
                "square root of negative value {}",
                self.to_latex()
            )));
        }
        if let Some(value) = self.as_rational() {
            return Self::sqrt_of_rational(&value);
        }

        let not_denestable =
            || MathError::unsupported(format!("cannot simplify \\sqrt{{{}}}", self.to_latex()));

        let (a, b, d) = self.as_quadratic().ok_or_else(not_denestable)?;
        // sqrt(a + b sqrt(d)) = sqrt((a+c)/2) + sign(b) sqrt((a-c)/2), c^2 = a^2 - b^2 d
        let c_squared = &a * &a - &b * &b * BigRational::from_integer(d);
        let c = number::perfect_sqrt(&c_squared).ok_or_else(not_denestable)?;
        let two = number::int(2);
        let left = Self::sqrt_of_rational(&((&a + &c) / &two))?;
        let right = Self::sqrt_of_rational(&((&a - &c) / &two))?;
        let candidate = if b.is_negative() {
            &left - &right
        } else {
            &left + &right
        };

        if &candidate * &candidate == *self {
            Ok(candidate)
        } else {
            Err(not_denestable())
        }
    }

    pub fn to_latex(&self) -> String {
        if let Some(value) = self.as_rational() {
            return rational_latex(&value);
        }

        let mut out = String::new();
        for (index, (radicand, coef)) in self.terms.iter().enumerate() {
            let body = term_latex(&coef.abs(), radicand);
            match (index, coef.is_negative()) {
                (0, true) => {
                    out.push_str("- ");
                    out.push_str(&body);
                }
                (0, false) => out.push_str(&body),
                (_, true) => {
                    out.push_str(" - ");
                    out.push_str(&body);
                }
                (_, false) => {
                    out.push_str(" + ");
                    out.push_str(&body);
                }
            }
        }
        out
    }
}

fn term_latex(magnitude: &BigRational, radicand: &BigInt) -> String {
    if radicand.is_one() {
        return rational_latex(magnitude);
    }

    let root = format!("\\sqrt{{{}}}", radicand);
    let numer = magnitude.numer();
    let head = if numer.is_one() {
        root
    } else {
        format!("{} {}", numer, root)
    };
    if magnitude.denom().is_one() {
        head
    } else {
        format!("\\frac{{{}}}{{{}}}", head, magnitude.denom())
    }
}

fn multiply_terms(lhs: &Radical, rhs: &Radical) -> Radical {
    let mut result = Radical::zero();
    for (m, a) in &lhs.terms {
        for (n, b) in &rhs.terms {
            // sqrt(m) sqrt(n) = g sqrt((m/g)(n/g)), g = gcd(m, n)
            let g = m.gcd(n);
            let radicand = (m / &g) * (n / &g);
            let coef = a * b * BigRational::from_integer(g);
            result.push_term(radicand, coef);
        }
    }
    result
}

impl Add for &Radical {
    type Output = Radical;

    fn add(self, rhs: &Radical) -> Radical {
        let mut result = self.clone();
        for (radicand, coef) in &rhs.terms {
            result.push_term(radicand.clone(), coef.clone());
        }
        result
    }
}

impl Sub for &Radical {
    type Output = Radical;

    fn sub(self, rhs: &Radical) -> Radical {
        self + &(-rhs)
    }
}

impl Mul for &Radical {
    type Output = Radical;

    fn mul(self, rhs: &Radical) -> Radical {
        multiply_terms(self, rhs)
    }
}

impl Neg for &Radical {
    type Output = Radical;

    fn neg(self) -> Radical {
        self.scale(&number::int(-1))
    }
}

impl Neg for Radical {
    type Output = Radical;

    fn neg(self) -> Radical {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::number::{int, ratio};

    fn root(n: i64) -> Radical {
        Radical::term(int(1), BigInt::from(n)).unwrap()
    }

    #[test]
    fn test_term_is_square_free() {
        let r = Radical::term(int(1), BigInt::from(12)).unwrap();
        assert_eq!(r.to_latex(), "2 \\sqrt{3}");
        assert_eq!(Radical::term(int(3), BigInt::from(4)).unwrap(), Radical::from_int(6));
    }

    #[test]
    fn test_products_combine_radicands() {
        assert_eq!(&root(2) * &root(2), Radical::from_int(2));
        assert_eq!(&root(2) * &root(6), Radical::term(int(2), BigInt::from(3)).unwrap());
    }

    #[test]
    fn test_inverse_rationalizes_denominator() {
        // 1/sqrt(2) = sqrt(2)/2
        let inv = root(2).inverse().unwrap();
        assert_eq!(inv.to_latex(), "\\frac{\\sqrt{2}}{2}");

        // 1/(sqrt(6) - sqrt(2)) = (sqrt(6) + sqrt(2))/4
        let x = &root(6) - &root(2);
        let inv = x.inverse().unwrap();
        assert_eq!(&inv * &x, Radical::one());
        assert_eq!(inv.to_latex(), "\\frac{\\sqrt{2}}{4} + \\frac{\\sqrt{6}}{4}");

        assert!(Radical::zero().inverse().is_err());
    }

    #[test]
    fn test_sqrt_denests_quadratic_surds() {
        // sqrt(2 + sqrt(3)) = (sqrt(6) + sqrt(2)) / 2
        let value = &Radical::from_int(2) + &root(3);
        let s = value.sqrt().unwrap();
        assert_eq!(&s * &s, value);
        assert_eq!(s.to_latex(), "\\frac{\\sqrt{2}}{2} + \\frac{\\sqrt{6}}{2}");

        assert_eq!(Radical::from_rational(ratio(1, 4)).sqrt().unwrap(), Radical::from_rational(ratio(1, 2)));
        assert!(Radical::from_int(-4).sqrt().is_err());
        assert!((&Radical::from_int(1) + &root(2)).sqrt().is_err());
    }

    #[test]
    fn test_latex_ordering_and_signs() {
        let value = &Radical::from_rational(ratio(-1, 2)) + &Radical::term(ratio(1, 2), BigInt::from(5)).unwrap();
        assert_eq!(value.to_latex(), "- \\frac{1}{2} + \\frac{\\sqrt{5}}{2}");
        assert_eq!((-root(3)).to_latex(), "- \\sqrt{3}");
        assert_eq!(Radical::zero().to_latex(), "0");
    }

    #[test]
    fn test_numer_denom() {
        let value = Radical::term(ratio(1, 3), BigInt::from(3)).unwrap();
        let (numer, denom) = value.numer_denom();
        assert_eq!(numer, root(3));
        assert_eq!(denom, BigInt::from(3));
    }
}
