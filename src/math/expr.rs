use crate::math::number::rational_latex;
use num_rational::BigRational;
use num_traits::{One, Signed};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Ln,
    Exp,
    Abs,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sqrt" => Func::Sqrt,
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" | "arcsin" => Func::Asin,
            "acos" | "arccos" => Func::Acos,
            "atan" | "arctan" => Func::Atan,
            "ln" | "log" => Func::Ln,
            "exp" => Func::Exp,
            "abs" => Func::Abs,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Func::Sqrt => "sqrt",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Ln => "log",
            Func::Exp => "exp",
            Func::Abs => "abs",
        }
    }

    pub fn apply_f64(self, x: f64) -> f64 {
        match self {
            Func::Sqrt => x.sqrt(),
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Tan => x.tan(),
            Func::Asin => x.asin(),
            Func::Acos => x.acos(),
            Func::Atan => x.atan(),
            Func::Ln => x.ln(),
            Func::Exp => x.exp(),
            Func::Abs => x.abs(),
        }
    }

    /// `\sin{\left(x \right)}`-style wrapper around already rendered LaTeX.
    pub fn wrap_latex(self, arg: &str) -> String {
        match self {
            Func::Sqrt => format!("\\sqrt{{{}}}", arg),
            Func::Abs => format!("\\left|{}\\right|", arg),
            Func::Exp => format!("e^{{{}}}", arg),
            Func::Sin | Func::Cos | Func::Tan | Func::Ln => {
                format!("\\{}{{\\left({} \\right)}}", self.name(), arg)
            }
            Func::Asin | Func::Acos | Func::Atan => {
                format!("\\operatorname{{{}}}{{\\left({} \\right)}}", self.name(), arg)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(BigRational),
    Symbol(String),
    Pi,
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_POWER: u8 = 3;
const PREC_ATOM: u8 = 4;

impl Expr {
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Symbol(name) => {
                out.insert(name.clone());
            }
            Expr::Number(_) | Expr::Pi => {}
            Expr::Neg(inner) | Expr::Call(_, inner) => inner.collect_symbols(out),
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) | Expr::Pow(a, b) => {
                a.collect_symbols(out);
                b.collect_symbols(out);
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => PREC_SUM,
            Expr::Neg(_) | Expr::Mul(..) | Expr::Div(..) => PREC_PRODUCT,
            Expr::Number(value) if value.is_negative() || !value.is_integer() => PREC_PRODUCT,
            Expr::Pow(..) => PREC_POWER,
            _ => PREC_ATOM,
        }
    }

    pub fn to_latex(&self) -> String {
        match self {
            Expr::Number(value) => rational_latex(value),
            Expr::Symbol(name) => symbol_latex(name),
            Expr::Pi => "\\pi".to_string(),
            Expr::Neg(inner) => format!("- {}", inner.latex_at(PREC_PRODUCT)),
            Expr::Add(a, b) => match b.as_ref() {
                Expr::Neg(inner) => format!("{} - {}", a.to_latex(), inner.latex_at(PREC_PRODUCT)),
                _ => format!("{} + {}", a.to_latex(), b.to_latex()),
            },
            Expr::Sub(a, b) => format!("{} - {}", a.to_latex(), b.latex_at(PREC_PRODUCT)),
            Expr::Mul(a, b) => {
                let separator = if matches!(b.as_ref(), Expr::Number(_)) {
                    " \\cdot "
                } else {
                    " "
                };
                format!(
                    "{}{}{}",
                    a.latex_at(PREC_PRODUCT),
                    separator,
                    b.latex_at(PREC_POWER)
                )
            }
            Expr::Div(a, b) => format!("\\frac{{{}}}{{{}}}", a.to_latex(), b.to_latex()),
            Expr::Pow(base, exponent) => {
                if is_one_half(exponent) {
                    return Func::Sqrt.wrap_latex(&base.to_latex());
                }
                format!("{}^{{{}}}", base.latex_at(PREC_ATOM), exponent.to_latex())
            }
            Expr::Call(func, arg) => func.wrap_latex(&arg.to_latex()),
        }
    }

    /// Renders, adding `\left( \right)` when this node binds looser than `min`.
    fn latex_at(&self, min: u8) -> String {
        if self.precedence() < min {
            format!("\\left({}\\right)", self.to_latex())
        } else {
            self.to_latex()
        }
    }
}

fn is_one_half(expr: &Expr) -> bool {
    match expr {
        Expr::Number(value) => *value == BigRational::new(One::one(), 2.into()),
        Expr::Div(a, b) => {
            matches!((a.as_ref(), b.as_ref()), (Expr::Number(n), Expr::Number(d))
                if n.is_one() && *d == BigRational::from_integer(2.into()))
        }
        _ => false,
    }
}

fn symbol_latex(name: &str) -> String {
    const GREEK: &[&str] = &[
        "alpha", "beta", "gamma", "delta", "epsilon", "theta", "lambda", "mu", "phi", "psi",
        "omega", "sigma", "tau",
    ];
    if GREEK.contains(&name) {
        format!("\\{}", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::parser::parse;

    fn latex(input: &str) -> String {
        parse(input).unwrap().to_latex()
    }

    #[test]
    fn test_sums_and_products() {
        assert_eq!(latex("2*x + 5"), "2 x + 5");
        assert_eq!(latex("x**2 - 3*x + 2"), "x^{2} - 3 x + 2");
        assert_eq!(latex("2*(x + 1)"), "2 \\left(x + 1\\right)");
        assert_eq!(latex("(x+1)*(x-1)"), "\\left(x + 1\\right) \\left(x - 1\\right)");
        assert_eq!(latex("2*3"), "2 \\cdot 3");
    }

    #[test]
    fn test_powers_and_fractions() {
        assert_eq!(latex("(x+1)**2"), "\\left(x + 1\\right)^{2}");
        assert_eq!(latex("1/2*x"), "\\frac{1}{2} x");
        assert_eq!(latex("x**(1/2)"), "\\sqrt{x}");
        assert_eq!(latex("-x**2"), "- x^{2}");
    }

    #[test]
    fn test_functions_and_constants() {
        assert_eq!(latex("2*pi/3"), "\\frac{2 \\pi}{3}");
        assert_eq!(latex("sqrt(3)/2"), "\\frac{\\sqrt{3}}{2}");
        assert_eq!(latex("sin(theta)"), "\\sin{\\left(\\theta \\right)}");
        assert_eq!(latex("asin(1/3)"), "\\operatorname{asin}{\\left(\\frac{1}{3} \\right)}");
    }

    #[test]
    fn test_symbols() {
        let expr = parse("x**2 + y + pi").unwrap();
        let names: Vec<String> = expr.symbols().into_iter().collect();
        assert_eq!(names, vec!["x".to_string(), "y".to_string()]);
    }
}
