//! Exact rational helpers shared by the polynomial and radical code.

use crate::utils::error::{MathError, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Trial division bound used when pulling square factors out of radicands.
const TRIAL_DIVISION_LIMIT: u32 = 100_000;

pub fn int(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

pub fn ratio(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Parses an unsigned decimal literal (`12`, `0.75`, `.5`) exactly.
pub fn parse_decimal(text: &str) -> Option<BigRational> {
    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (text, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{}{}", whole, frac);
    let numer: BigInt = digits.parse().ok()?;
    let denom = num_traits::pow(BigInt::from(10), frac.len());
    Some(BigRational::new(numer, denom))
}

/// Exact rational equal to the shortest decimal representation of `value`.
pub fn from_f64(value: f64) -> Result<BigRational> {
    if !value.is_finite() {
        return Err(MathError::numeric_limit(format!("{} is not finite", value)));
    }
    let text = format!("{}", value.abs());
    let magnitude = parse_decimal(&text)
        .ok_or_else(|| MathError::numeric_limit(format!("cannot represent {} exactly", value)))?;
    Ok(if value < 0.0 { -magnitude } else { magnitude })
}

pub fn to_f64(value: &BigRational) -> f64 {
    match (value.numer().to_f64(), value.denom().to_f64()) {
        (Some(n), Some(d)) if n.is_finite() && d.is_finite() => n / d,
        _ => f64::NAN,
    }
}

/// Size budget for the result of `base^exponent`, in bits.
pub const MAX_POWER_BITS: u64 = 4096;

pub fn rational_bits(value: &BigRational) -> u64 {
    value.numer().bits() + value.denom().bits()
}

/// Rejects a power whose result would not fit in [`MAX_POWER_BITS`].
pub fn check_power_bits(base_bits: u64, exponent: u64) -> Result<()> {
    if base_bits.saturating_mul(exponent) > MAX_POWER_BITS {
        return Err(MathError::numeric_limit(format!(
            "power result exceeds {} bits",
            MAX_POWER_BITS
        )));
    }
    Ok(())
}

/// Floor division remainder in `[0, modulus)`.
pub fn rem_euclid(value: &BigRational, modulus: &BigRational) -> BigRational {
    let quotient = (value / modulus).floor();
    value - quotient * modulus
}

/// Renders a rational the way a CAS printer does: `3`, `- \frac{1}{2}`.
pub fn rational_latex(value: &BigRational) -> String {
    let sign = if value.is_negative() { "- " } else { "" };
    let magnitude = value.abs();
    if magnitude.is_integer() {
        if value.is_negative() {
            format!("-{}", magnitude.numer())
        } else {
            magnitude.numer().to_string()
        }
    } else {
        format!(
            "{}\\frac{{{}}}{{{}}}",
            sign,
            magnitude.numer(),
            magnitude.denom()
        )
    }
}

/// Plain text form such as `-3/4`.
pub fn rational_plain(value: &BigRational) -> String {
    if value.is_integer() {
        value.numer().to_string()
    } else {
        format!("{}/{}", value.numer(), value.denom())
    }
}

/// Splits a positive integer into `k^2 * m` with `m` square-free.
pub fn square_free_split(n: &BigInt) -> Result<(BigInt, BigInt)> {
    if !n.is_positive() {
        return Err(MathError::domain(format!(
            "square-free split of non-positive {}",
            n
        )));
    }

    let mut rest = n.clone();
    let mut square = BigInt::one();
    let mut free = BigInt::one();

    let mut p: u32 = 2;
    while p <= TRIAL_DIVISION_LIMIT {
        let prime = BigInt::from(p);
        if &prime * &prime > rest {
            break;
        }
        let mut exponent = 0u32;
        while (&rest % &prime).is_zero() {
            rest /= &prime;
            exponent += 1;
        }
        if exponent > 0 {
            square *= num_traits::pow(prime.clone(), (exponent / 2) as usize);
            if exponent % 2 == 1 {
                free *= &prime;
            }
        }
        p += if p == 2 { 1 } else { 2 };
    }

    if rest > BigInt::one() {
        let root = rest.sqrt();
        let limit = BigInt::from(TRIAL_DIVISION_LIMIT);
        if &root * &root == rest {
            square *= root;
        } else if rest < &limit * &limit {
            // no factor up to the limit, so the leftover is prime
            free *= rest;
        } else {
            return Err(MathError::numeric_limit(format!(
                "radicand {} is too large to factor",
                n
            )));
        }
    }

    Ok((square, free))
}

/// `sqrt(q)` for `q >= 0` as `coef * sqrt(radicand)` with square-free radicand.
pub fn sqrt_rational(value: &BigRational) -> Result<(BigRational, BigInt)> {
    if value.is_negative() {
        return Err(MathError::domain(format!(
            "square root of negative number {}",
            rational_plain(value)
        )));
    }
    if value.is_zero() {
        return Ok((BigRational::zero(), BigInt::one()));
    }

    // sqrt(p/q) = sqrt(p*q)/q
    let product = value.numer() * value.denom();
    let (square, free) = square_free_split(&product)?;
    Ok((BigRational::new(square, value.denom().clone()), free))
}

/// Exact square root when `value` is the square of a rational.
pub fn perfect_sqrt(value: &BigRational) -> Option<BigRational> {
    if value.is_negative() {
        return None;
    }
    let numer = value.numer().sqrt();
    let denom = value.denom().sqrt();
    if &numer * &numer == *value.numer() && &denom * &denom == *value.denom() {
        Some(BigRational::new(numer, denom))
    } else {
        None
    }
}

/// Smallest prime factor found by trial division, or the number itself when
/// it has no small factors.
pub fn smallest_prime_factor(n: &BigInt) -> Result<BigInt> {
    let mut p: u32 = 2;
    while p <= TRIAL_DIVISION_LIMIT {
        let prime = BigInt::from(p);
        if &prime * &prime > *n {
            return Ok(n.clone());
        }
        if (n % &prime).is_zero() {
            return Ok(prime);
        }
        p += if p == 2 { 1 } else { 2 };
    }
    let limit = BigInt::from(TRIAL_DIVISION_LIMIT);
    if *n > &limit * &limit {
        return Err(MathError::numeric_limit(format!(
            "radicand {} is too large to factor",
            n
        )));
    }
    Ok(n.clone())
}

/// Positive divisors of `n`, or `None` when `n` is too large to enumerate.
pub fn positive_divisors(n: &BigInt) -> Option<Vec<BigInt>> {
    let n = n.abs().to_u64()?;
    if n == 0 || n > 1_000_000_000_000 {
        return None;
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1u64;
    while d * d <= n {
        if n % d == 0 {
            small.push(BigInt::from(d));
            if d * d != n {
                large.push(BigInt::from(n / d));
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    Some(small)
}

pub fn lcm_of_denominators<'a>(values: impl IntoIterator<Item = &'a BigRational>) -> BigInt {
    values
        .into_iter()
        .fold(BigInt::one(), |acc, value| acc.lcm(value.denom()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12"), Some(int(12)));
        assert_eq!(parse_decimal("0.75"), Some(ratio(3, 4)));
        assert_eq!(parse_decimal(".5"), Some(ratio(1, 2)));
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal("1a"), None);
    }

    #[test]
    fn test_from_f64_uses_shortest_decimal() {
        assert_eq!(from_f64(57.5).unwrap(), ratio(115, 2));
        assert_eq!(from_f64(-0.25).unwrap(), ratio(-1, 4));
        assert!(from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_rational_latex() {
        assert_eq!(rational_latex(&int(3)), "3");
        assert_eq!(rational_latex(&int(-3)), "-3");
        assert_eq!(rational_latex(&ratio(1, 2)), "\\frac{1}{2}");
        assert_eq!(rational_latex(&ratio(-7, 4)), "- \\frac{7}{4}");
    }

    #[test]
    fn test_square_free_split() {
        let (square, free) = square_free_split(&BigInt::from(72)).unwrap();
        assert_eq!(square, BigInt::from(6));
        assert_eq!(free, BigInt::from(2));

        let (square, free) = square_free_split(&BigInt::from(13)).unwrap();
        assert_eq!(square, BigInt::one());
        assert_eq!(free, BigInt::from(13));

        // 100003 is the first prime past the trial division limit
        let big_prime = BigInt::from(100_003);
        let (square, free) = square_free_split(&(&big_prime * &big_prime * 2)).unwrap();
        assert_eq!(square, big_prime.clone());
        assert_eq!(free, BigInt::from(2));

        let cube = &big_prime * &big_prime * &big_prime;
        assert!(matches!(
            square_free_split(&cube),
            Err(MathError::NumericLimitError { .. })
        ));
    }

    #[test]
    fn test_sqrt_rational() {
        // sqrt(3/4) = sqrt(3)/2
        let (coef, radicand) = sqrt_rational(&ratio(3, 4)).unwrap();
        assert_eq!(coef, ratio(1, 2));
        assert_eq!(radicand, BigInt::from(3));

        // sqrt(8/9) = 2 sqrt(2)/3
        let (coef, radicand) = sqrt_rational(&ratio(8, 9)).unwrap();
        assert_eq!(coef, ratio(2, 3));
        assert_eq!(radicand, BigInt::from(2));

        assert!(sqrt_rational(&int(-1)).is_err());
    }

    #[test]
    fn test_power_bit_budget() {
        assert_eq!(rational_bits(&ratio(3, 4)), 5);
        assert!(check_power_bits(rational_bits(&int(10)), 64).is_ok());
        assert!(check_power_bits(213, 64).is_err());
    }

    #[test]
    fn test_rem_euclid_and_divisors() {
        assert_eq!(rem_euclid(&int(-30), &int(360)), int(330));
        assert_eq!(rem_euclid(&int(720), &int(360)), int(0));
        let divisors = positive_divisors(&BigInt::from(12)).unwrap();
        let expected: Vec<BigInt> = [1, 2, 3, 4, 6, 12].iter().map(|&d| BigInt::from(d)).collect();
        assert_eq!(divisors, expected);
    }
}
