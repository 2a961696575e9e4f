//! Evaluation of parsed expressions into exact or approximate numbers.

use crate::math::expr::{Expr, Func};
use crate::math::number::{self, rational_latex};
use crate::math::radical::Radical;
use crate::utils::error::{MathError, Result};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::f64::consts::PI;

const MAX_EXPONENT: i64 = 64;

/// A real number that is either `rational + pi_coeff * pi` or a float.
#[derive(Debug, Clone, PartialEq)]
pub enum PiValue {
    Exact {
        rational: BigRational,
        pi_coeff: BigRational,
    },
    Approx(f64),
}

impl PiValue {
    pub fn rational(value: BigRational) -> Self {
        PiValue::Exact {
            rational: value,
            pi_coeff: BigRational::zero(),
        }
    }

    pub fn pi_multiple(coeff: BigRational) -> Self {
        PiValue::Exact {
            rational: BigRational::zero(),
            pi_coeff: coeff,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            PiValue::Exact { rational, pi_coeff } => {
                number::to_f64(rational) + number::to_f64(pi_coeff) * PI
            }
            PiValue::Approx(value) => *value,
        }
    }

    /// The value as a plain rational (no pi part).
    pub fn as_rational(&self) -> Option<&BigRational> {
        match self {
            PiValue::Exact { rational, pi_coeff } if pi_coeff.is_zero() => Some(rational),
            _ => None,
        }
    }

    /// The coefficient `k` when the value is exactly `k * pi`.
    pub fn as_pi_multiple(&self) -> Option<&BigRational> {
        match self {
            PiValue::Exact { rational, pi_coeff } if rational.is_zero() => Some(pi_coeff),
            _ => None,
        }
    }

    fn add(self, other: Self) -> Self {
        match (self, other) {
            (
                PiValue::Exact { rational: a, pi_coeff: b },
                PiValue::Exact { rational: c, pi_coeff: d },
            ) => PiValue::Exact {
                rational: a + c,
                pi_coeff: b + d,
            },
            (lhs, rhs) => PiValue::Approx(lhs.to_f64() + rhs.to_f64()),
        }
    }

    fn neg(self) -> Self {
        match self {
            PiValue::Exact { rational, pi_coeff } => PiValue::Exact {
                rational: -rational,
                pi_coeff: -pi_coeff,
            },
            PiValue::Approx(value) => PiValue::Approx(-value),
        }
    }

    fn scale(&self, factor: &BigRational) -> Option<Self> {
        match self {
            PiValue::Exact { rational, pi_coeff } => Some(PiValue::Exact {
                rational: rational * factor,
                pi_coeff: pi_coeff * factor,
            }),
            PiValue::Approx(_) => None,
        }
    }

    fn mul(self, other: Self) -> Self {
        if let Some(factor) = other.as_rational() {
            if let Some(product) = self.scale(factor) {
                return product;
            }
        }
        if let Some(factor) = self.as_rational() {
            if let Some(product) = other.scale(factor) {
                return product;
            }
        }
        PiValue::Approx(self.to_f64() * other.to_f64())
    }

    fn div(self, other: Self) -> Result<Self> {
        if other.to_f64() == 0.0 {
            return Err(MathError::domain("division by zero"));
        }
        if let Some(divisor) = other.as_rational() {
            if let Some(quotient) = self.scale(&divisor.recip()) {
                return Ok(quotient);
            }
        }
        if let (Some(numer), Some(denom)) = (self.as_pi_multiple(), other.as_pi_multiple()) {
            return Ok(PiValue::rational(numer / denom));
        }
        Ok(PiValue::Approx(self.to_f64() / other.to_f64()))
    }

    /// LaTeX of `k * pi` (`\frac{7 \pi}{6}`) when exact, otherwise a decimal.
    pub fn to_latex(&self) -> String {
        match self {
            PiValue::Exact { rational, pi_coeff } => {
                let pi_part = pi_multiple_latex(pi_coeff);
                match (rational.is_zero(), pi_coeff.is_zero()) {
                    (true, _) => pi_part,
                    (false, true) => rational_latex(rational),
                    (false, false) => format!("{} + {}", rational_latex(rational), pi_part),
                }
            }
            PiValue::Approx(value) => format!("{}", value),
        }
    }
}

/// `0`, `\pi`, `- \pi`, `2 \pi`, `\frac{\pi}{6}`, `\frac{7 \pi}{6}`.
pub fn pi_multiple_latex(coeff: &BigRational) -> String {
    if coeff.is_zero() {
        return "0".to_string();
    }
    let sign = if coeff < &BigRational::zero() { "- " } else { "" };
    let magnitude = if coeff < &BigRational::zero() {
        -coeff
    } else {
        coeff.clone()
    };
    let numer = magnitude.numer();
    let head = if numer.is_one() {
        "\\pi".to_string()
    } else {
        format!("{} \\pi", numer)
    };
    if magnitude.denom().is_one() {
        format!("{}{}", sign, head)
    } else {
        format!("{}\\frac{{{}}}{{{}}}", sign, head, magnitude.denom())
    }
}

/// Evaluates a closed expression, keeping rational multiples of pi exact.
pub fn eval_pi_value(expr: &Expr) -> Result<PiValue> {
    Ok(match expr {
        Expr::Number(value) => PiValue::rational(value.clone()),
        Expr::Pi => PiValue::pi_multiple(BigRational::one()),
        Expr::Symbol(name) => {
            return Err(MathError::unsupported(format!(
                "free symbol '{}' in a numeric value",
                name
            )))
        }
        Expr::Neg(inner) => eval_pi_value(inner)?.neg(),
        Expr::Add(a, b) => eval_pi_value(a)?.add(eval_pi_value(b)?),
        Expr::Sub(a, b) => eval_pi_value(a)?.add(eval_pi_value(b)?.neg()),
        Expr::Mul(a, b) => eval_pi_value(a)?.mul(eval_pi_value(b)?),
        Expr::Div(a, b) => eval_pi_value(a)?.div(eval_pi_value(b)?)?,
        Expr::Pow(base, exponent) => {
            let base = eval_pi_value(base)?;
            let exponent = eval_pi_value(exponent)?;
            match (base.as_rational(), exponent.as_rational()) {
                (Some(b), Some(e)) if is_small_integer(e) => {
                    let power = e.to_integer().to_i32().unwrap_or(0);
                    if b.is_zero() && power < 0 {
                        return Err(MathError::domain("division by zero"));
                    }
                    number::check_power_bits(
                        number::rational_bits(b),
                        u64::from(power.unsigned_abs()),
                    )?;
                    PiValue::rational(b.pow(power))
                }
                _ => PiValue::Approx(base.to_f64().powf(exponent.to_f64())),
            }
        }
        Expr::Call(Func::Sqrt, arg) => {
            let arg = eval_pi_value(arg)?;
            match arg.as_rational().and_then(number::perfect_sqrt) {
                Some(root) => PiValue::rational(root),
                None => PiValue::Approx(arg.to_f64().sqrt()),
            }
        }
        Expr::Call(func, arg) => PiValue::Approx(func.apply_f64(eval_pi_value(arg)?.to_f64())),
    })
}

fn is_small_integer(value: &BigRational) -> bool {
    value.is_integer() && value.abs() <= BigRational::from_integer(BigInt::from(MAX_EXPONENT))
}

/// Evaluates an expression built from rationals, `+ - * /`, integer powers
/// and square roots into an exact [`Radical`].
pub fn eval_radical(expr: &Expr) -> Result<Radical> {
    match expr {
        Expr::Number(value) => Ok(Radical::from_rational(value.clone())),
        Expr::Neg(inner) => Ok(-eval_radical(inner)?),
        Expr::Add(a, b) => Ok(&eval_radical(a)? + &eval_radical(b)?),
        Expr::Sub(a, b) => Ok(&eval_radical(a)? - &eval_radical(b)?),
        Expr::Mul(a, b) => Ok(&eval_radical(a)? * &eval_radical(b)?),
        Expr::Div(a, b) => eval_radical(a)?.checked_div(&eval_radical(b)?),
        Expr::Pow(base, exponent) => {
            let base = eval_radical(base)?;
            let exponent = eval_radical(exponent)?
                .as_rational()
                .ok_or_else(|| MathError::unsupported("irrational exponent"))?;
            if exponent == number::ratio(1, 2) {
                return base.sqrt();
            }
            if !is_small_integer(&exponent) {
                return Err(MathError::unsupported(format!(
                    "exponent {} is not supported",
                    number::rational_plain(&exponent)
                )));
            }
            let power = exponent.to_integer().to_i64().unwrap_or(0);
            number::check_power_bits(base.size_bits(), power.unsigned_abs())?;
            let raised = base.pow(power.unsigned_abs() as u32);
            if power < 0 {
                raised.inverse()
            } else {
                Ok(raised)
            }
        }
        Expr::Call(Func::Sqrt, arg) => eval_radical(arg)?.sqrt(),
        Expr::Call(Func::Abs, arg) => Ok(eval_radical(arg)?.abs()),
        Expr::Call(func, _) => Err(MathError::unsupported(format!(
            "{} cannot be evaluated exactly",
            func.name()
        ))),
        Expr::Pi => Err(MathError::unsupported("pi is not an algebraic value")),
        Expr::Symbol(name) => Err(MathError::unsupported(format!(
            "free symbol '{}' in a numeric value",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::number::{int, ratio};
    use crate::math::parser::parse;

    fn pi_value(input: &str) -> PiValue {
        eval_pi_value(&parse(input).unwrap()).unwrap()
    }

    #[test]
    fn test_pi_values_stay_exact() {
        assert_eq!(pi_value("2*pi/3"), PiValue::pi_multiple(ratio(2, 3)));
        assert_eq!(pi_value("pi/6 + pi/3"), PiValue::pi_multiple(ratio(1, 2)));
        assert_eq!(pi_value("-450"), PiValue::rational(int(-450)));
        assert_eq!(pi_value("2**3"), PiValue::rational(int(8)));
        assert_eq!(pi_value("pi/pi"), PiValue::rational(int(1)));
    }

    #[test]
    fn test_pi_values_fall_back_to_float() {
        match pi_value("pi*pi") {
            PiValue::Approx(v) => assert!((v - PI * PI).abs() < 1e-12),
            other => panic!("expected approximation, got {:?}", other),
        }
        assert!(eval_pi_value(&parse("1/0").unwrap()).is_err());
        assert!(eval_pi_value(&parse("x + 1").unwrap()).is_err());
    }

    #[test]
    fn test_pi_multiple_latex() {
        assert_eq!(pi_multiple_latex(&ratio(7, 6)), "\\frac{7 \\pi}{6}");
        assert_eq!(pi_multiple_latex(&ratio(1, 6)), "\\frac{\\pi}{6}");
        assert_eq!(pi_multiple_latex(&int(1)), "\\pi");
        assert_eq!(pi_multiple_latex(&int(0)), "0");
        assert_eq!(pi_multiple_latex(&int(-2)), "- 2 \\pi");
    }

    #[test]
    fn test_eval_radical() {
        let value = eval_radical(&parse("sqrt(3)/2").unwrap()).unwrap();
        assert_eq!(value.to_latex(), "\\frac{\\sqrt{3}}{2}");

        let value = eval_radical(&parse("1/sqrt(2)").unwrap()).unwrap();
        assert_eq!(value.to_latex(), "\\frac{\\sqrt{2}}{2}");

        let value = eval_radical(&parse("0.6").unwrap()).unwrap();
        assert_eq!(value, Radical::from_rational(ratio(3, 5)));

        assert!(eval_radical(&parse("sin(1)").unwrap()).is_err());
        assert!(eval_radical(&parse("pi").unwrap()).is_err());
    }

    #[test]
    fn test_nested_powers_hit_the_size_limit() {
        assert_eq!(pi_value("(2**8)**8"), PiValue::rational(int(2).pow(64)));

        for input in ["((10**64)**64)**64", "((((10^64)^64)^64)^64)"] {
            let expr = parse(&crate::utils::sanitize::sanitize_input(input)).unwrap();
            assert!(matches!(
                eval_pi_value(&expr),
                Err(MathError::NumericLimitError { .. })
            ));
        }

        let nested = parse("((sqrt(2) + sqrt(3))**64)**64").unwrap();
        assert!(matches!(
            eval_radical(&nested),
            Err(MathError::NumericLimitError { .. })
        ));
    }
}
