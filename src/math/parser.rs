//! Recursive-descent parser for sanitized, Python-flavoured math input.
//!
//! Grammar:
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary | power)*      adjacent atoms multiply
//! unary   := ('+' | '-') unary | power
//! power   := atom ('**' unary)?                      right associative
//! atom    := number | ident | func '(' sum ')' | func atom | '(' sum ')'
//! ```

use crate::math::expr::{Expr, Func};
use crate::math::number;
use crate::utils::error::{MathError, Result};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    LParen,
    RParen,
    Comma,
    End,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(text) => format!("number '{}'", text),
            Token::Ident(name) => format!("name '{}'", name),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::Power => "'**'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::End => "end of input".to_string(),
        }
    }

    fn starts_atom(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Ident(_) | Token::LParen)
    }
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;
        let token = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                tokens.push((start, Token::Number(chars[start..i].iter().collect())));
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                while i < chars.len() && (chars[i].is_ascii_alphabetic() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push((start, Token::Ident(chars[start..i].iter().collect())));
                continue;
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Token::Power
            }
            '^' => Token::Power,
            '+' => Token::Plus,
            '-' | '−' => Token::Minus,
            '*' | '×' | '·' => Token::Star,
            '/' | '÷' => Token::Slash,
            '(' | '[' => Token::LParen,
            ')' | ']' => Token::RParen,
            ',' => Token::Comma,
            other => {
                return Err(MathError::parse(start, format!("unexpected character '{}'", other)));
            }
        };
        i += 1;
        tokens.push((start, token));
    }

    tokens.push((chars.len(), Token::End));
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    index: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.index.min(self.tokens.len() - 1)].1
    }

    fn position(&self) -> usize {
        self.tokens[self.index.min(self.tokens.len() - 1)].0
    }

    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.index < self.tokens.len() - 1 {
            self.index += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        let position = self.position();
        let found = self.next();
        if found == expected {
            Ok(())
        } else {
            Err(MathError::parse(
                position,
                format!("expected {}, found {}", expected.describe(), found.describe()),
            ))
        }
    }

    fn parse_sum(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_product()?;
        loop {
            match self.peek() {
                Token::Plus => {
                    self.next();
                    let rhs = self.parse_product()?;
                    lhs = Expr::Add(Box::new(lhs), Box::new(rhs));
                }
                Token::Minus => {
                    self.next();
                    let rhs = self.parse_product()?;
                    lhs = Expr::Sub(Box::new(lhs), Box::new(rhs));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn parse_product(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            match self.peek() {
                Token::Star => {
                    self.next();
                    let rhs = self.parse_unary()?;
                    lhs = Expr::Mul(Box::new(lhs), Box::new(rhs));
                }
                Token::Slash => {
                    self.next();
                    let rhs = self.parse_unary()?;
                    lhs = Expr::Div(Box::new(lhs), Box::new(rhs));
                }
                token if token.starts_atom() => {
                    // implicit multiplication: `x(x+1)`, `2 x`
                    let rhs = self.parse_power()?;
                    lhs = Expr::Mul(Box::new(lhs), Box::new(rhs));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        match self.peek() {
            Token::Minus => {
                self.next();
                Ok(Expr::Neg(Box::new(self.parse_unary()?)))
            }
            Token::Plus => {
                self.next();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_atom()?;
        if self.peek() == &Token::Power {
            self.next();
            let exponent = self.parse_unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        let position = self.position();
        match self.next() {
            Token::Number(text) => number::parse_decimal(&text)
                .map(Expr::Number)
                .ok_or_else(|| MathError::parse(position, format!("invalid number '{}'", text))),
            Token::Ident(name) => {
                if name == "pi" {
                    return Ok(Expr::Pi);
                }
                match Func::from_name(&name) {
                    Some(func) => self.parse_call(func),
                    None => Ok(Expr::Symbol(name)),
                }
            }
            Token::LParen => {
                let inner = self.parse_sum()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            other => Err(MathError::parse(
                position,
                format!("unexpected {}", other.describe()),
            )),
        }
    }

    fn parse_call(&mut self, func: Func) -> Result<Expr> {
        if self.peek() == &Token::LParen {
            self.next();
            let arg = self.parse_sum()?;
            if self.peek() == &Token::Comma {
                return Err(MathError::parse(
                    self.position(),
                    format!("{} takes a single argument", func.name()),
                ));
            }
            self.expect(Token::RParen)?;
            return Ok(Expr::Call(func, Box::new(arg)));
        }

        // `sqrt3`, `sin x`
        let arg = self.parse_atom()?;
        Ok(Expr::Call(func, Box::new(arg)))
    }
}

/// Parses a whole expression; trailing tokens are an error.
pub fn parse(input: &str) -> Result<Expr> {
    let tokens = tokenize(input)?;
    if tokens.len() == 1 {
        return Err(MathError::parse(0, "empty expression"));
    }

    let mut parser = Parser { tokens, index: 0 };
    let expr = parser.parse_sum()?;
    if parser.peek() != &Token::End {
        return Err(MathError::parse(
            parser.position(),
            format!("unexpected {}", parser.peek().describe()),
        ));
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::number::int;

    fn num(n: i64) -> Box<Expr> {
        Box::new(Expr::Number(int(n)))
    }

    fn x() -> Box<Expr> {
        Box::new(Expr::Symbol("x".to_string()))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse("1 + 2*x").unwrap(),
            Expr::Add(num(1), Box::new(Expr::Mul(num(2), x())))
        );
        assert_eq!(
            parse("-x**2").unwrap(),
            Expr::Neg(Box::new(Expr::Pow(x(), num(2))))
        );
        assert_eq!(
            parse("2**3**2").unwrap(),
            Expr::Pow(num(2), Box::new(Expr::Pow(num(3), num(2))))
        );
    }

    #[test]
    fn test_implicit_multiplication_and_caret() {
        assert_eq!(parse("x(x+1)").unwrap(), parse("x*(x+1)").unwrap());
        assert_eq!(parse("2 x^2").unwrap(), parse("2*x**2").unwrap());
    }

    #[test]
    fn test_function_without_parentheses() {
        assert_eq!(
            parse("sqrt3").unwrap(),
            Expr::Call(Func::Sqrt, num(3))
        );
        assert_eq!(parse("2*sqrt3").unwrap(), parse("2*sqrt(3)").unwrap());
    }

    #[test]
    fn test_decimal_literals_are_exact() {
        assert_eq!(parse("0.25").unwrap(), Expr::Number(number::ratio(1, 4)));
    }

    #[test]
    fn test_errors_report_position() {
        match parse("2 + * x") {
            Err(MathError::ParseError { position, .. }) => assert_eq!(position, 4),
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(parse("(x + 1").is_err());
        assert!(parse("x $ 2").is_err());
        assert!(parse("").is_err());
        assert!(parse("1.2.3").is_err());
        assert!(parse("x)").is_err());
    }
}
