//! Arithmetic over number literals: `+ - * /`, unary signs and parentheses, evaluated in `f64`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("division by zero")]
    DivisionByZero,
}

/// Evaluates an arithmetic expression.
pub fn evaluate(expression: &str) -> Result<f64, ExpressionError> {
    let mut parser = Parser {
        chars: expression.char_indices().collect(),
        position: 0,
    };

    let value = parser.sum()?;
    match parser.peek() {
        Some((offset, found)) => Err(ExpressionError::UnexpectedChar { found, offset }),
        None => Ok(value),
    }
}

struct Parser {
    chars: Vec<(usize, char)>,
    position: usize,
}

impl Parser {
    fn peek(&mut self) -> Option<(usize, char)> {
        while let Some(&(_, c)) = self.chars.get(self.position) {
            if !c.is_whitespace() {
                break;
            }
            self.position += 1;
        }
        self.chars.get(self.position).copied()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek().is_some_and(|(_, c)| c == expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    // sum := product (('+' | '-') product)*
    fn sum(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.product()?;
        loop {
            if self.eat('+') {
                value += self.product()?;
            } else if self.eat('-') {
                value -= self.product()?;
            } else {
                return Ok(value);
            }
        }
    }

    // product := unary (('*' | '/') unary)*
    fn product(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.unary()?;
        loop {
            if self.eat('*') {
                value *= self.unary()?;
            } else if self.eat('/') {
                let divisor = self.unary()?;
                if divisor == 0.0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                value /= divisor;
            } else {
                return Ok(value);
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ExpressionError> {
        if self.eat('-') {
            Ok(-self.unary()?)
        } else if self.eat('+') {
            self.unary()
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> Result<f64, ExpressionError> {
        match self.peek() {
            None => Err(ExpressionError::UnexpectedEnd),
            Some((_, '(')) => {
                self.position += 1;
                let value = self.sum()?;
                match self.peek() {
                    Some((_, ')')) => {
                        self.position += 1;
                        Ok(value)
                    }
                    Some((offset, found)) => Err(ExpressionError::UnexpectedChar { found, offset }),
                    None => Err(ExpressionError::UnexpectedEnd),
                }
            }
            Some((_, c)) if c.is_ascii_digit() || c == '.' => Ok(self.number()),
            Some((offset, found)) => Err(ExpressionError::UnexpectedChar { found, offset }),
        }
    }

    fn number(&mut self) -> f64 {
        let mut literal = String::new();
        let mut seen_point = false;
        while let Some(&(_, c)) = self.chars.get(self.position) {
            if c.is_ascii_digit() || (c == '.' && !seen_point) {
                seen_point |= c == '.';
                literal.push(c);
                self.position += 1;
            } else {
                break;
            }
        }

        // "." alone reads as zero
        literal.parse().unwrap_or_default()
    }
}
