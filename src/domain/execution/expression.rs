//! Arithmetic expression parser.
//!
//! Recursive descent over `+ - * / ( )`, unary signs and decimal literals.
//! Input is parsed and evaluated, never executed.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := factor (('*' | '/') factor)*
//! factor  := ('+' | '-') factor | primary
//! primary := number | '(' expr ')'
//! ```

use thiserror::Error;

/// Maximum nesting of parentheses and unary signs.
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("expression nested too deeply")]
    TooDeep,
}

/// Keeps only characters that can appear in an arithmetic expression.
/// Whitespace means ASCII whitespace.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| {
            c.is_ascii_digit()
                || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
                || c.is_ascii_whitespace()
        })
        .collect()
}

/// Parses and evaluates an expression.
pub fn evaluate(input: &str) -> Result<f64, ExpressionError> {
    let mut parser = Parser {
        chars: input.chars().collect(),
        pos: 0,
        depth: 0,
    };
    parser.skip_whitespace();
    if parser.peek().is_none() {
        return Err(ExpressionError::Empty);
    }
    let value = parser.expr()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some(found) => Err(ExpressionError::UnexpectedChar {
            found,
            position: parser.pos,
        }),
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Next non-whitespace character, consumed if it is one of `ops`.
    fn eat(&mut self, ops: &[char]) -> Option<char> {
        self.skip_whitespace();
        let c = self.peek().filter(|c| ops.contains(c))?;
        self.pos += 1;
        Some(c)
    }

    fn descend(&mut self) -> Result<(), ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            Err(ExpressionError::TooDeep)
        } else {
            Ok(())
        }
    }

    fn expr(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        while let Some(op) = self.eat(&['+', '-']) {
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.factor()?;
        while let Some(op) = self.eat(&['*', '/']) {
            let rhs = self.factor()?;
            if op == '*' {
                value *= rhs;
            } else if rhs == 0.0 {
                return Err(ExpressionError::DivisionByZero);
            } else {
                value /= rhs;
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, ExpressionError> {
        if let Some(sign) = self.eat(&['+', '-']) {
            self.descend()?;
            let value = self.factor()?;
            self.depth -= 1;
            return Ok(if sign == '-' { -value } else { value });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<f64, ExpressionError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ExpressionError::UnexpectedEnd),
            Some('(') => {
                self.pos += 1;
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.eat(&[')']) {
                    Some(_) => Ok(value),
                    None => match self.peek() {
                        None => Err(ExpressionError::UnexpectedEnd),
                        Some(found) => Err(ExpressionError::UnexpectedChar {
                            found,
                            position: self.pos,
                        }),
                    },
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(found) => Err(ExpressionError::UnexpectedChar {
                found,
                position: self.pos,
            }),
        }
    }

    fn number(&mut self) -> Result<f64, ExpressionError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        if literal == "." || literal.matches('.').count() > 1 {
            return Err(ExpressionError::InvalidNumber(literal));
        }
        literal
            .parse::<f64>()
            .map_err(|_| ExpressionError::InvalidNumber(literal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn respects_precedence_and_parentheses() {
        assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(evaluate("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(evaluate("10 - 4 - 3"), Ok(3.0));
        assert_eq!(evaluate("8 / 4 / 2"), Ok(1.0));
    }

    #[test]
    fn supports_unary_signs_and_decimals() {
        assert_eq!(evaluate("-3 + 5"), Ok(2.0));
        assert_eq!(evaluate("2 * -(1.5 + .5)"), Ok(-4.0));
        assert_eq!(evaluate("--4"), Ok(4.0));
        assert_eq!(evaluate("3."), Ok(3.0));
    }

    #[test]
    fn unicode_spaces_are_not_whitespace() {
        assert_eq!(sanitize("1\u{a0}+\u{2003}2 \t* 3"), "1+2 \t* 3");
        assert!(matches!(
            evaluate("1\u{a0}+ 1"),
            Err(ExpressionError::UnexpectedChar { found: '\u{a0}', .. })
        ));
        assert_eq!(evaluate("1\t+\n1"), Ok(2.0));
    }

    #[test]
    fn reports_malformed_input() {
        assert_eq!(evaluate(""), Err(ExpressionError::Empty));
        assert_eq!(evaluate("   "), Err(ExpressionError::Empty));
        assert_eq!(evaluate("1 +"), Err(ExpressionError::UnexpectedEnd));
        assert_eq!(evaluate("(1 + 2"), Err(ExpressionError::UnexpectedEnd));
        assert!(matches!(evaluate("1 2"), Err(ExpressionError::UnexpectedChar { found: '2', .. })));
        assert!(matches!(evaluate("1..2"), Err(ExpressionError::InvalidNumber(_))));
        assert!(matches!(evaluate("* 3"), Err(ExpressionError::UnexpectedChar { found: '*', .. })));
        assert!(matches!(evaluate("()"), Err(ExpressionError::UnexpectedChar { found: ')', .. })));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(evaluate("1 / 0"), Err(ExpressionError::DivisionByZero));
        assert_eq!(evaluate("1 / (2 - 2)"), Err(ExpressionError::DivisionByZero));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert_eq!(evaluate(&deep), Err(ExpressionError::TooDeep));
        let signs = format!("{}1", "-".repeat(MAX_DEPTH + 1));
        assert_eq!(evaluate(&signs), Err(ExpressionError::TooDeep));
    }

    #[test]
    fn sanitize_strips_everything_but_arithmetic() {
        assert_eq!(sanitize("2 + 2; system('ls')"), "2 + 2 ()");
        assert_eq!(sanitize("pi * 2^3"), " * 23");
    }

    proptest! {
        #[test]
        fn agrees_with_direct_evaluation(a in -1000i32..1000, b in -1000i32..1000, c in 1i32..1000) {
            let (a, b, c) = (f64::from(a), f64::from(b), f64::from(c));
            let text = format!("({}) + ({}) * ({}) - ({}) / ({})", a, b, c, a, c);
            let expected = a + b * c - a / c;
            let actual = evaluate(&text).unwrap();
            prop_assert!((actual - expected).abs() < 1e-9);
        }
    }
}
