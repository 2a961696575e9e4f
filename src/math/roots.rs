//! Numeric polynomial roots via Durand–Kerner iteration.

use crate::math::poly::Poly;
use num_complex::Complex64;

const MAX_ITERATIONS: usize = 1000;
const TOLERANCE: f64 = 1e-14;
const REAL_TOLERANCE: f64 = 1e-7;

/// All complex roots of `poly` (with multiplicity). Constant input yields none.
pub fn complex_roots(poly: &Poly) -> Vec<Complex64> {
    let degree = poly.degree();
    if poly.is_zero() || degree == 0 {
        return Vec::new();
    }

    let coeffs = poly.to_f64_coeffs();
    let lead = coeffs[degree];
    let monic: Vec<f64> = coeffs.iter().map(|c| c / lead).collect();
    let eval = |z: Complex64| {
        monic
            .iter()
            .rev()
            .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
    };

    // Cauchy bound keeps the initial guesses on a sensible circle
    let radius = 1.0 + monic[..degree].iter().fold(0.0f64, |m, c| m.max(c.abs()));
    let seed = Complex64::new(0.4, 0.9);
    let mut roots: Vec<Complex64> = (0..degree)
        .map(|k| seed.powu(k as u32) * (radius / seed.norm().powi(k as i32)).min(radius))
        .collect();

    for _ in 0..MAX_ITERATIONS {
        let mut max_delta = 0.0f64;
        for i in 0..degree {
            let zi = roots[i];
            let denom = roots
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(Complex64::new(1.0, 0.0), |acc, (_, &zj)| acc * (zi - zj));
            if denom.norm() == 0.0 {
                roots[i] = zi + Complex64::new(1e-8, 1e-8);
                max_delta = f64::INFINITY;
                continue;
            }
            let delta = eval(zi) / denom;
            roots[i] = zi - delta;
            max_delta = max_delta.max(delta.norm());
        }
        if max_delta < TOLERANCE {
            break;
        }
    }

    roots
}

/// Distinct real roots in ascending order, polished with Newton steps.
/// Repeated roots are removed first so iteration converges quadratically.
pub fn real_roots(poly: &Poly) -> Vec<f64> {
    let poly = &poly.square_free_part();
    let derivative: Vec<f64> = poly
        .to_f64_coeffs()
        .iter()
        .enumerate()
        .skip(1)
        .map(|(power, c)| c * power as f64)
        .collect();
    let eval_derivative = |x: f64| derivative.iter().rev().fold(0.0, |acc, c| acc * x + c);

    let mut roots: Vec<f64> = complex_roots(poly)
        .into_iter()
        .filter(|z| z.im.abs() <= REAL_TOLERANCE * z.re.abs().max(1.0))
        .map(|z| {
            let mut x = z.re;
            for _ in 0..8 {
                let slope = eval_derivative(x);
                if slope == 0.0 {
                    break;
                }
                x -= poly.eval_f64(x) / slope;
            }
            x
        })
        .collect();

    roots.sort_by(|a, b| a.total_cmp(b));
    roots.dedup_by(|a, b| (*a - *b).abs() <= REAL_TOLERANCE * b.abs().max(1.0));
    roots
}
