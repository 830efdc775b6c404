//! Formula evaluation.
//!
//! Uses a two-stack (values, pending operators) left-to-right pass.
//! "*" and "/" are applied as soon as their right operand is available;
//! "+" and "-" wait until the next additive operator, a ")" or the end of
//! input. Evaluation failures are returned as [`FormulaError`] values.

use std::fmt;

use super::formula::{Formula, Token};
use super::token::Operator;

/// A failed evaluation: division by zero or an undefined variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormulaError {
    pub reason: String,
}

impl FormulaError {
    pub fn new(reason: impl Into<String>) -> FormulaError {
        FormulaError {
            reason: reason.into(),
        }
    }

    pub fn division_by_zero() -> FormulaError {
        FormulaError::new("Division by zero")
    }

    pub fn undefined_variable(name: &str) -> FormulaError {
        FormulaError::new(format!("{} is undefined", name))
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Pending {
    Op(Operator),
    Open,
}

impl Formula {
    /// Evaluate this formula, resolving variables through `lookup`.
    ///
    /// `lookup` receives upper-cased variable names and returns `None` for
    /// any variable without a numeric value.
    pub fn evaluate<F>(&self, lookup: F) -> Result<f64, FormulaError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        let mut values: Vec<f64> = Vec::new();
        let mut pending: Vec<Pending> = Vec::new();

        for token in self.tokens() {
            match token {
                Token::Number(n) => push_operand(*n, &mut values, &mut pending)?,
                Token::Variable(name) => {
                    let value =
                        lookup(name).ok_or_else(|| FormulaError::undefined_variable(name))?;
                    push_operand(value, &mut values, &mut pending)?;
                }
                Token::Operator(op @ (Operator::Add | Operator::Sub)) => {
                    if top_is_additive(&pending) {
                        reduce(&mut values, &mut pending)?;
                    }
                    pending.push(Pending::Op(*op));
                }
                Token::Operator(op) => pending.push(Pending::Op(*op)),
                Token::LeftParen => pending.push(Pending::Open),
                Token::RightParen => {
                    if top_is_additive(&pending) {
                        reduce(&mut values, &mut pending)?;
                    }
                    if pending.pop() != Some(Pending::Open) {
                        return Err(malformed());
                    }
                    if top_is_multiplicative(&pending) {
                        reduce(&mut values, &mut pending)?;
                    }
                }
            }
        }

        while !pending.is_empty() {
            reduce(&mut values, &mut pending)?;
        }
        match values.as_slice() {
            [result] => Ok(*result),
            _ => Err(malformed()),
        }
    }
}

fn push_operand(
    value: f64,
    values: &mut Vec<f64>,
    pending: &mut Vec<Pending>,
) -> Result<(), FormulaError> {
    values.push(value);
    if top_is_multiplicative(pending) {
        reduce(values, pending)?;
    }
    Ok(())
}

fn top_is_additive(pending: &[Pending]) -> bool {
    matches!(
        pending.last(),
        Some(Pending::Op(Operator::Add | Operator::Sub))
    )
}

fn top_is_multiplicative(pending: &[Pending]) -> bool {
    matches!(
        pending.last(),
        Some(Pending::Op(Operator::Mul | Operator::Div))
    )
}

/// Pop the top operator and two values, and push the result.
fn reduce(values: &mut Vec<f64>, pending: &mut Vec<Pending>) -> Result<(), FormulaError> {
    let (Some(Pending::Op(op)), Some(right), Some(left)) =
        (pending.pop(), values.pop(), values.pop())
    else {
        return Err(malformed());
    };
    let result = match op {
        Operator::Add => left + right,
        Operator::Sub => left - right,
        Operator::Mul => left * right,
        Operator::Div => {
            if right == 0.0 {
                return Err(FormulaError::division_by_zero());
            }
            left / right
        }
    };
    values.push(result);
    Ok(())
}

fn malformed() -> FormulaError {
    FormulaError::new("Malformed formula")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_lookup(name: &str) -> Option<f64> {
        match name {
            "A1" => Some(3.0),
            "B1" => Some(5.0),
            _ => None,
        }
    }

    fn eval(text: &str) -> Result<f64, FormulaError> {
        Formula::parse(text).unwrap().evaluate(simple_lookup)
    }

    #[test]
    fn test_single_tokens() {
        assert_eq!(eval("0"), Ok(0.0));
        assert_eq!(eval("A1"), Ok(3.0));
        assert_eq!(eval("a1"), Ok(3.0));
        assert_eq!(eval("1e2"), Ok(100.0));
    }

    #[test]
    fn test_basic_operators() {
        assert_eq!(eval("A1 + 3.0"), Ok(6.0));
        assert_eq!(eval("A1 - 1.0"), Ok(2.0));
        assert_eq!(eval("3.0 * A1"), Ok(9.0));
        assert_eq!(eval("5 / B1"), Ok(1.0));
        assert_eq!(eval("100 - (50 + 50)"), Ok(0.0));
    }

    #[test]
    fn test_precedence_and_left_associativity() {
        assert_eq!(eval("1+1-3*2+3/3"), Ok(-3.0));
        assert_eq!(eval("1-2-3"), Ok(-4.0));
        assert_eq!(eval("8/2/2"), Ok(2.0));
        assert_eq!(eval("2+3*4"), Ok(14.0));
        assert_eq!(eval("(2+3)*5"), Ok(25.0));
        assert_eq!(eval("2*(3+4)*5"), Ok(70.0));
    }

    #[test]
    fn test_nested_parentheses() {
        assert_eq!(eval("1e2 - ((B1 + 95/5 - 4) * (10 + (10))/4) + A1"), Ok(3.0));
        assert_eq!(eval("((((7))))"), Ok(7.0));
    }

    #[test]
    fn test_decimal_subtraction() {
        let value = eval("5.6 - 3.6").unwrap();
        assert!((value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("1/0"), Err(FormulaError::division_by_zero()));
        assert_eq!(eval("1/(2-2)"), Err(FormulaError::division_by_zero()));
        let f = Formula::parse("1/A1").unwrap();
        assert_eq!(f.evaluate(|_| Some(0.0)), Err(FormulaError::division_by_zero()));
    }

    #[test]
    fn test_undefined_variable() {
        let err = eval("C2 + 1").unwrap_err();
        assert_eq!(err, FormulaError::undefined_variable("C2"));
        assert!(err.reason.contains("C2"));
    }

    #[test]
    fn test_lookup_receives_normalized_names() {
        let f = Formula::parse("a1+2").unwrap();
        let value = f.evaluate(|name| if name == "A1" { Some(5.0) } else { None });
        assert_eq!(value, Ok(7.0));
    }

    #[test]
    fn test_no_variables_ignores_lookup() {
        assert_eq!(Formula::parse("3*4").unwrap().evaluate(|_| None), Ok(12.0));
    }
}
