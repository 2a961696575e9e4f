//! Exact trigonometric values on the 15° lattice and recognition of
//! reference angles from a known function value.

use crate::math::number::{self, rational_latex};
use crate::math::radical::Radical;
use crate::utils::error::{MathError, Result};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigFunc {
    Sin,
    Cos,
    Tan,
}

impl TrigFunc {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sin" => Ok(TrigFunc::Sin),
            "cos" => Ok(TrigFunc::Cos),
            "tan" => Ok(TrigFunc::Tan),
            other => Err(MathError::invalid_input(
                "func",
                format!("'{}' is not one of sin, cos, tan", other),
            )),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrigFunc::Sin => "sin",
            TrigFunc::Cos => "cos",
            TrigFunc::Tan => "tan",
        }
    }

    fn inverse_name(self) -> &'static str {
        match self {
            TrigFunc::Sin => "asin",
            TrigFunc::Cos => "acos",
            TrigFunc::Tan => "atan",
        }
    }

    fn inverse_f64(self, value: f64) -> f64 {
        match self {
            TrigFunc::Sin => value.asin(),
            TrigFunc::Cos => value.acos(),
            TrigFunc::Tan => value.atan(),
        }
    }

    /// Sign of the function in quadrant `1..=4` (ASTC rule).
    pub fn sign_in_quadrant(self, quadrant: u8) -> i8 {
        let positive = match self {
            TrigFunc::Sin => matches!(quadrant, 1 | 2),
            TrigFunc::Cos => matches!(quadrant, 1 | 4),
            TrigFunc::Tan => matches!(quadrant, 1 | 3),
        };
        if positive {
            1
        } else {
            -1
        }
    }
}

fn radical(coef: BigRational, radicand: i64) -> Radical {
    // radicands here are small literals, square-free splitting cannot fail
    Radical::term(coef, BigInt::from(radicand)).unwrap_or_default()
}

/// `sin(15° * k)` for `k` in `0..=6`.
fn first_quadrant_sine(step: u32) -> Radical {
    let quarter = number::ratio(1, 4);
    let half = number::ratio(1, 2);
    match step {
        0 => Radical::zero(),
        1 => &radical(quarter.clone(), 6) - &radical(quarter, 2),
        2 => Radical::from_rational(half),
        3 => radical(half, 2),
        4 => radical(half, 3),
        5 => &radical(quarter.clone(), 6) + &radical(quarter, 2),
        _ => Radical::one(),
    }
}

/// Exact sine of an angle in degrees when it is a multiple of 15°.
pub fn exact_sin_degrees(degrees: &BigRational) -> Option<Radical> {
    let fifteen = number::int(15);
    let steps = degrees / &fifteen;
    if !steps.is_integer() {
        return None;
    }
    // 24 steps make a full turn
    let step = number::rem_euclid(&steps, &number::int(24)).to_integer().to_u32()?;
    Some(match step {
        0..=6 => first_quadrant_sine(step),
        7..=12 => first_quadrant_sine(12 - step),
        13..=18 => -first_quadrant_sine(step - 12),
        _ => -first_quadrant_sine(24 - step),
    })
}

pub fn exact_cos_degrees(degrees: &BigRational) -> Option<Radical> {
    exact_sin_degrees(&(degrees + number::int(90)))
}

/// Reference angle in `[0°, 90°]` for `func(angle) = value`, `value >= 0`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceAngle {
    Exact(BigRational),
    Inverse { func: TrigFunc, arg: Radical },
}

impl ReferenceAngle {
    pub fn from_value(func: TrigFunc, value: &Radical) -> Self {
        for step in 0..=6u32 {
            let degrees = number::int(15 * step as i64);
            let candidate = match func {
                TrigFunc::Sin => exact_sin_degrees(&degrees),
                TrigFunc::Cos => exact_cos_degrees(&degrees),
                TrigFunc::Tan => tan_degrees(&degrees),
            };
            if candidate.as_ref() == Some(value) {
                return ReferenceAngle::Exact(degrees);
            }
        }
        ReferenceAngle::Inverse {
            func,
            arg: value.clone(),
        }
    }

    pub fn degrees_f64(&self) -> f64 {
        match self {
            ReferenceAngle::Exact(degrees) => number::to_f64(degrees),
            ReferenceAngle::Inverse { func, arg } => func.inverse_f64(arg.to_f64()).to_degrees(),
        }
    }

    fn inverse_latex(func: TrigFunc, arg: &Radical) -> String {
        format!(
            "\\frac{{180 \\operatorname{{{}}}{{\\left({} \\right)}}}}{{\\pi}}",
            func.inverse_name(),
            arg.to_latex()
        )
    }

    /// The quadrant angle with this reference: θ, 180−θ, 180+θ, 360−θ.
    pub fn angle_in_quadrant(&self, quadrant: u8) -> (String, f64) {
        let (offset, sign) = match quadrant {
            1 => (0i64, 1i64),
            2 => (180, -1),
            3 => (180, 1),
            _ => (360, -1),
        };
        let value = offset as f64 + sign as f64 * self.degrees_f64();

        let latex = match self {
            ReferenceAngle::Exact(degrees) => rational_latex(
                &(number::int(offset) + number::int(sign) * degrees),
            ),
            ReferenceAngle::Inverse { func, arg } => {
                let reference = Self::inverse_latex(*func, arg);
                match (offset, sign) {
                    (0, _) => reference,
                    (_, 1) => format!("{} + {}", reference, offset),
                    _ => format!("{} - {}", offset, reference),
                }
            }
        };
        (latex, value)
    }
}

fn tan_degrees(degrees: &BigRational) -> Option<Radical> {
    let sin = exact_sin_degrees(degrees)?;
    let cos = exact_cos_degrees(degrees)?;
    if cos.is_zero() {
        return None;
    }
    sin.checked_div(&cos).ok()
}

/// Point on the unit circle, `\left( cos, sin \right)`.
pub fn unit_circle_latex(cos: &str, sin: &str) -> String {
    format!("\\left( {}, {} \\right)", cos, sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::number::{int, ratio};

    #[test]
    fn test_special_sines() {
        assert_eq!(exact_sin_degrees(&int(30)), Some(Radical::from_rational(ratio(1, 2))));
        assert_eq!(exact_sin_degrees(&int(210)), Some(Radical::from_rational(ratio(-1, 2))));
        assert_eq!(exact_sin_degrees(&int(-90)), Some(Radical::from_int(-1)));
        assert_eq!(exact_sin_degrees(&int(20)), None);
        assert_eq!(
            exact_sin_degrees(&int(15)).unwrap().to_latex(),
            "- \\frac{\\sqrt{2}}{4} + \\frac{\\sqrt{6}}{4}"
        );
    }

    #[test]
    fn test_special_cosines() {
        assert_eq!(exact_cos_degrees(&int(0)), Some(Radical::one()));
        assert_eq!(exact_cos_degrees(&int(180)), Some(Radical::from_int(-1)));
        assert_eq!(exact_cos_degrees(&int(120)).unwrap().to_latex(), "- \\frac{1}{2}");
        assert_eq!(exact_cos_degrees(&int(90)), Some(Radical::zero()));
    }

    #[test]
    fn test_reference_angle_recognition() {
        let half = Radical::from_rational(ratio(1, 2));
        assert_eq!(ReferenceAngle::from_value(TrigFunc::Sin, &half), ReferenceAngle::Exact(int(30)));
        assert_eq!(ReferenceAngle::from_value(TrigFunc::Cos, &half), ReferenceAngle::Exact(int(60)));
        assert_eq!(ReferenceAngle::from_value(TrigFunc::Tan, &Radical::one()), ReferenceAngle::Exact(int(45)));

        let third = Radical::from_rational(ratio(1, 3));
        let reference = ReferenceAngle::from_value(TrigFunc::Sin, &third);
        let (latex, value) = reference.angle_in_quadrant(2);
        assert_eq!(latex, "180 - \\frac{180 \\operatorname{asin}{\\left(\\frac{1}{3} \\right)}}{\\pi}");
        assert!((value - (180.0 - (1.0f64 / 3.0).asin().to_degrees())).abs() < 1e-9);
    }

    #[test]
    fn test_quadrant_angles_for_exact_reference() {
        let reference = ReferenceAngle::Exact(int(30));
        assert_eq!(reference.angle_in_quadrant(1).0, "30");
        assert_eq!(reference.angle_in_quadrant(2).0, "150");
        assert_eq!(reference.angle_in_quadrant(3).0, "210");
        assert_eq!(reference.angle_in_quadrant(4).0, "330");
    }

    #[test]
    fn test_signs() {
        assert_eq!(TrigFunc::Sin.sign_in_quadrant(3), -1);
        assert_eq!(TrigFunc::Cos.sign_in_quadrant(4), 1);
        assert_eq!(TrigFunc::Tan.sign_in_quadrant(3), 1);
        assert!(TrigFunc::from_name("sec").is_err());
    }
}
