use crate::math::expr::Expr;
use crate::math::number;
use crate::math::poly::Poly;
use crate::utils::error::{MathError, Result};
use num_traits::ToPrimitive;

/// Largest integer exponent expanded symbolically.
const MAX_EXPONENT: i64 = 64;
/// Largest degree of any intermediate numerator or denominator.
pub const MAX_DEGREE: usize = 64;

/// `num / den` in a single variable.
#[derive(Debug, Clone, PartialEq)]
pub struct RationalFunction {
    pub num: Poly,
    pub den: Poly,
}

impl RationalFunction {
    pub fn from_poly(poly: Poly) -> Self {
        Self {
            num: poly,
            den: Poly::one(),
        }
    }

    /// Converts an expression in `var` into a quotient of polynomials.
    pub fn from_expr(expr: &Expr, var: &str) -> Result<Self> {
        match expr {
            Expr::Number(value) => Ok(Self::from_poly(Poly::constant(value.clone()))),
            Expr::Symbol(name) if name == var => Ok(Self::from_poly(Poly::identity())),
            Expr::Symbol(name) => Err(MathError::unsupported(format!(
                "unexpected symbol '{}' in an expression of {}",
                name, var
            ))),
            Expr::Pi => Err(MathError::unsupported(
                "pi is not allowed in a polynomial with rational coefficients",
            )),
            Expr::Neg(inner) => {
                let inner = Self::from_expr(inner, var)?;
                Ok(Self {
                    num: -&inner.num,
                    den: inner.den,
                })
            }
            Expr::Add(a, b) => Self::from_expr(a, var)?
                .add(&Self::from_expr(b, var)?)
                .bounded(),
            Expr::Sub(a, b) => Self::from_expr(a, var)?
                .sub(&Self::from_expr(b, var)?)
                .bounded(),
            Expr::Mul(a, b) => Self::from_expr(a, var)?
                .mul(&Self::from_expr(b, var)?)
                .bounded(),
            Expr::Div(a, b) => Self::from_expr(a, var)?
                .div(&Self::from_expr(b, var)?)?
                .bounded(),
            Expr::Pow(base, exponent) => {
                let exponent = integer_exponent(exponent, var)?;
                Self::from_expr(base, var)?.powi(exponent)
            }
            Expr::Call(func, _) => Err(MathError::unsupported(format!(
                "function '{}' is not polynomial",
                func.name()
            ))),
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.den == other.den {
            return Self {
                num: &self.num + &other.num,
                den: self.den.clone(),
            };
        }
        Self {
            num: &(&self.num * &other.den) + &(&other.num * &self.den),
            den: &self.den * &other.den,
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&Self {
            num: -&other.num,
            den: other.den.clone(),
        })
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self {
            num: &self.num * &other.num,
            den: &self.den * &other.den,
        }
    }

    pub fn div(&self, other: &Self) -> Result<Self> {
        if other.num.is_zero() {
            return Err(MathError::domain("division by zero"));
        }
        Ok(Self {
            num: &self.num * &other.den,
            den: &self.den * &other.num,
        })
    }

    pub fn powi(&self, exponent: i64) -> Result<Self> {
        if exponent.abs() > MAX_EXPONENT {
            return Err(MathError::numeric_limit(format!(
                "exponent {} exceeds {}",
                exponent, MAX_EXPONENT
            )));
        }
        let magnitude = exponent.unsigned_abs() as u32;
        let degree = self.num.degree().max(self.den.degree());
        if degree.saturating_mul(magnitude as usize) > MAX_DEGREE {
            return Err(MathError::numeric_limit(format!(
                "expanded degree would exceed {}",
                MAX_DEGREE
            )));
        }
        let widest = self
            .num
            .coeffs()
            .iter()
            .chain(self.den.coeffs())
            .map(number::rational_bits)
            .max()
            .unwrap_or(0);
        // a degree-d base also grows coefficients by about d bits per factor
        number::check_power_bits(widest + degree as u64, u64::from(magnitude))?;
        let raised = Self {
            num: self.num.pow(magnitude),
            den: self.den.pow(magnitude),
        };
        if exponent >= 0 {
            Ok(raised)
        } else {
            Self::from_poly(Poly::one()).div(&raised)
        }
    }

    fn bounded(self) -> Result<Self> {
        if self.num.degree() > MAX_DEGREE || self.den.degree() > MAX_DEGREE {
            return Err(MathError::numeric_limit(format!(
                "expanded degree exceeds {}",
                MAX_DEGREE
            )));
        }
        Ok(self)
    }

    /// The polynomial value when the denominator is a non-zero constant.
    pub fn into_polynomial(self) -> Result<Poly> {
        if !self.den.is_constant() {
            return Err(MathError::unsupported(
                "expression has a variable in a denominator",
            ));
        }
        let scale = self.den.leading().recip();
        Ok(self.num.scale(&scale))
    }

    /// Numerator with common factors cancelled against the denominator.
    pub fn reduced_numerator(&self) -> Poly {
        let common = self.num.gcd(&self.den);
        if common.is_zero() || common.is_constant() {
            return self.num.clone();
        }
        self.num.exact_div(&common).unwrap_or_else(|| self.num.clone())
    }
}

fn integer_exponent(exponent: &Expr, var: &str) -> Result<i64> {
    let value = RationalFunction::from_expr(exponent, var)
        .ok()
        .filter(|f| f.num.is_constant() && f.den.is_constant())
        .map(|f| f.num.coeff(0) / f.den.coeff(0))
        .ok_or_else(|| MathError::unsupported("exponent must be a constant integer"))?;

    if !value.is_integer() {
        return Err(MathError::unsupported(format!(
            "fractional exponent {} is not polynomial",
            number::rational_plain(&value)
        )));
    }
    value
        .to_integer()
        .to_i64()
        .filter(|e| e.abs() <= MAX_EXPONENT)
        .ok_or_else(|| MathError::numeric_limit("exponent is too large"))
}

/// Convenience for callers that only accept polynomials.
pub fn polynomial_from_expr(expr: &Expr, var: &str) -> Result<Poly> {
    RationalFunction::from_expr(expr, var)?.into_polynomial()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::parser::parse;

    fn rf(input: &str) -> RationalFunction {
        RationalFunction::from_expr(&parse(input).unwrap(), "x").unwrap()
    }

    #[test]
    fn test_polynomial_expansion() {
        let poly = polynomial_from_expr(&parse("(x+1)**2 - 2*x").unwrap(), "x").unwrap();
        assert_eq!(poly, Poly::from_ints(&[1, 0, 1]));

        let poly = polynomial_from_expr(&parse("x**2/2").unwrap(), "x").unwrap();
        assert_eq!(poly.coeff(2), crate::math::number::ratio(1, 2));
    }

    #[test]
    fn test_rational_function() {
        let f = rf("1/x - 2");
        assert_eq!(f.num, Poly::from_ints(&[1, -2]));
        assert_eq!(f.den, Poly::identity());

        let f = rf("x**-2");
        assert_eq!(f.den, Poly::from_ints(&[0, 0, 1]));
    }

    #[test]
    fn test_reduced_numerator() {
        let f = rf("(x**2 - 1)/(x - 1)");
        assert_eq!(f.reduced_numerator(), Poly::from_ints(&[1, 1]));
    }

    #[test]
    fn test_rejections() {
        let x = "x";
        assert!(RationalFunction::from_expr(&parse("x + y").unwrap(), x).is_err());
        assert!(RationalFunction::from_expr(&parse("sin(x)").unwrap(), x).is_err());
        assert!(RationalFunction::from_expr(&parse("x**(1/2)").unwrap(), x).is_err());
        assert!(RationalFunction::from_expr(&parse("x/0").unwrap(), x).is_err());
        assert!(polynomial_from_expr(&parse("1/x").unwrap(), x).is_err());
    }

    #[test]
    fn test_expansion_size_limits() {
        let poly = polynomial_from_expr(&parse("(x+1)**64").unwrap(), "x").unwrap();
        assert_eq!(poly.degree(), 64);

        for input in [
            "((x+1)**64)**64",
            "(((x+1)**64)**64)**64",
            "(x+1)**40 * (x-1)**40",
            "((2**64)**64)**64",
        ] {
            assert!(
                matches!(
                    RationalFunction::from_expr(&parse(input).unwrap(), "x"),
                    Err(MathError::NumericLimitError { .. })
                ),
                "{}",
                input
            );
        }
    }
}
