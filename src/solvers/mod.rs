//! Endpoint solvers. Each one sanitizes and parses its input, runs the
//! math core and renders LaTeX for the response.

pub mod algebra;
pub mod angle;
pub mod equation;
pub mod trig_functions;

pub use algebra::AlgebraSolver;
pub use angle::AngleSolver;
pub use equation::EquationSolver;
pub use trig_functions::TrigFunctionSolver;

use crate::math::expr::Expr;
use crate::utils::error::{MathError, Result};
use crate::utils::sanitize::sanitize_input;
use crate::utils::validation::validate_expression;

/// Longest accepted input field, in characters.
pub const MAX_INPUT_LEN: usize = 512;

/// Validates a raw request field and returns its sanitized form.
pub(crate) fn prepare(field: &str, raw: &str) -> Result<String> {
    validate_expression(field, raw, MAX_INPUT_LEN)?;
    Ok(sanitize_input(raw.trim()))
}

/// The single free variable of `exprs`, `x` when there is none.
pub(crate) fn single_variable<'a>(exprs: impl IntoIterator<Item = &'a Expr>) -> Result<String> {
    let mut symbols = std::collections::BTreeSet::new();
    for expr in exprs {
        symbols.extend(expr.symbols());
    }
    match symbols.len() {
        0 => Ok("x".to_string()),
        1 => Ok(symbols.into_iter().next().unwrap_or_else(|| "x".to_string())),
        _ => Err(MathError::unsupported(format!(
            "only one variable is supported, found {}",
            symbols.into_iter().collect::<Vec<_>>().join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::parser::parse;

    #[test]
    fn test_prepare_sanitizes() {
        assert_eq!(prepare("expression", " 2x^2 ").unwrap(), "2*x**2");
        assert!(prepare("expression", "").is_err());
    }

    #[test]
    fn test_single_variable() {
        let a = parse("y**2 - 1").unwrap();
        let b = parse("3").unwrap();
        assert_eq!(single_variable([&a, &b]).unwrap(), "y");
        assert_eq!(single_variable([&b]).unwrap(), "x");

        let c = parse("x + y").unwrap();
        assert!(single_variable([&c]).is_err());
    }
}
