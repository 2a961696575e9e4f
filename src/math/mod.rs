//! In-crate computer algebra: exact numbers, expressions, polynomials and
//! the trigonometric tables used by the solvers.

pub mod eval;
pub mod expr;
pub mod factor;
pub mod number;
pub mod parser;
pub mod poly;
pub mod radical;
pub mod ratfunc;
pub mod roots;
pub mod trig;

pub use expr::Expr;
pub use parser::parse;
pub use poly::Poly;
pub use radical::Radical;
