//! Validated arithmetic formulas.
//!
//! A [`Formula`] is built once from text and never mutated. Construction
//! tokenizes the text, checks the grammar in a single left-to-right pass and
//! records the normalized tokens (variables upper-cased, numbers in canonical
//! form). The canonical string is the normalized tokens concatenated with no
//! separators; equality and hashing go through it.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use super::format::format_number;
use super::token::{Operator, RawToken, tokenize};

/// Reasons a formula fails to construct.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaFormatError {
    #[error("The formula can not be empty")]
    Empty,

    #[error("'{0}' is not a valid first token")]
    InvalidFirstToken(String),

    #[error("'{0}' is not a valid last token")]
    InvalidLastToken(String),

    #[error("Expected a number, variable or '(' after '{after}', found '{found}'")]
    ExpectedOperand { after: String, found: String },

    #[error("Expected an operator or ')' after '{after}', found '{found}'")]
    ExpectedOperator { after: String, found: String },

    #[error("Closing parenthesis without a matching opening parenthesis")]
    UnexpectedClosingParen,

    #[error("Unbalanced parentheses: {open} opening, {close} closing")]
    UnbalancedParens { open: usize, close: usize },

    #[error("Number '{0}' is out of range")]
    NumberOutOfRange(String),
}

/// A normalized token of a validated formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    LeftParen,
    RightParen,
    Operator(Operator),
    Variable(String),
    Number(f64),
}

impl Token {
    fn push_canonical(&self, out: &mut String) {
        match self {
            Token::LeftParen => out.push('('),
            Token::RightParen => out.push(')'),
            Token::Operator(op) => out.push(op.as_char()),
            Token::Variable(name) => out.push_str(name),
            Token::Number(n) => out.push_str(&format_number(*n)),
        }
    }
}

/// An immutable, validated infix arithmetic expression.
#[derive(Clone, Debug)]
pub struct Formula {
    tokens: Vec<Token>,
    canonical: String,
}

impl Formula {
    /// Parse and validate formula text (without any leading "=").
    pub fn parse(text: &str) -> Result<Formula, FormulaFormatError> {
        let raw = tokenize(text);
        let Some(first) = raw.first() else {
            return Err(FormulaFormatError::Empty);
        };
        if !first.starts_operand() {
            return Err(FormulaFormatError::InvalidFirstToken(first.to_string()));
        }

        let mut tokens = Vec::with_capacity(raw.len());
        let mut open = 0usize;
        let mut close = 0usize;
        let mut previous: Option<&RawToken<'_>> = None;

        for token in &raw {
            if let Some(prev) = previous {
                if prev.ends_operand() {
                    if !matches!(token, RawToken::Operator(_) | RawToken::RightParen) {
                        return Err(FormulaFormatError::ExpectedOperator {
                            after: prev.to_string(),
                            found: token.to_string(),
                        });
                    }
                } else if !token.starts_operand() {
                    return Err(FormulaFormatError::ExpectedOperand {
                        after: prev.to_string(),
                        found: token.to_string(),
                    });
                }
            }

            tokens.push(normalize(token, &mut open, &mut close)?);
            previous = Some(token);
        }

        if open != close {
            return Err(FormulaFormatError::UnbalancedParens { open, close });
        }
        if let Some(last) = raw.last()
            && !last.ends_operand()
        {
            return Err(FormulaFormatError::InvalidLastToken(last.to_string()));
        }

        let mut canonical = String::with_capacity(text.len());
        for token in &tokens {
            token.push_canonical(&mut canonical);
        }

        Ok(Formula { tokens, canonical })
    }

    /// The distinct (upper-cased) variable names this formula references.
    pub fn variables(&self) -> BTreeSet<String> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Variable(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// The normalized, whitespace-free form of this formula.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Convert a grammatically valid raw token into its normalized form and
/// update the running parenthesis counts.
fn normalize(
    token: &RawToken<'_>,
    open: &mut usize,
    close: &mut usize,
) -> Result<Token, FormulaFormatError> {
    Ok(match token {
        RawToken::LeftParen => {
            *open += 1;
            Token::LeftParen
        }
        RawToken::RightParen => {
            *close += 1;
            if *close > *open {
                return Err(FormulaFormatError::UnexpectedClosingParen);
            }
            Token::RightParen
        }
        RawToken::Operator(op) => Token::Operator(*op),
        RawToken::Variable(name) => Token::Variable(name.to_ascii_uppercase()),
        RawToken::Number(text) => {
            let n = text
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| FormulaFormatError::NumberOutOfRange(text.to_string()))?;
            Token::Number(n)
        }
        // Every position has already been checked against the adjacency
        // rules, which never admit an "other" token.
        RawToken::Other(text) => {
            return Err(FormulaFormatError::InvalidFirstToken(text.to_string()));
        }
    })
}

impl std::str::FromStr for Formula {
    type Err = FormulaFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(text: &str) -> FormulaFormatError {
        Formula::parse(text).unwrap_err()
    }

    #[test]
    fn test_valid_single_tokens() {
        for text in ["1", "a1", "2.0", "2E+10", "2e-10", "(1 + 1)", "((1 + 1))"] {
            assert!(Formula::parse(text).is_ok(), "{text} should parse");
        }
    }

    #[test]
    fn test_empty_formula() {
        assert_eq!(err(""), FormulaFormatError::Empty);
        assert_eq!(err("   "), FormulaFormatError::Empty);
    }

    #[test]
    fn test_invalid_first_token() {
        assert!(matches!(err("A"), FormulaFormatError::InvalidFirstToken(_)));
        assert!(matches!(err(">"), FormulaFormatError::InvalidFirstToken(_)));
        assert!(matches!(err(")"), FormulaFormatError::InvalidFirstToken(_)));
        assert!(matches!(err("+ 1 - 6"), FormulaFormatError::InvalidFirstToken(_)));
        assert!(matches!(err("@+1"), FormulaFormatError::InvalidFirstToken(_)));
    }

    #[test]
    fn test_invalid_last_token() {
        assert!(matches!(err(" 1 + 1 -"), FormulaFormatError::InvalidLastToken(_)));
    }

    #[test]
    fn test_operand_required_after_operator_or_open_paren() {
        assert!(matches!(err(" 9 ++ 9"), FormulaFormatError::ExpectedOperand { .. }));
        assert!(matches!(err("(1 + )"), FormulaFormatError::ExpectedOperand { .. }));
        assert!(matches!(err("()"), FormulaFormatError::ExpectedOperand { .. }));
        assert!(matches!(err("1+a"), FormulaFormatError::ExpectedOperand { .. }));
        assert!(matches!(err("1+@"), FormulaFormatError::ExpectedOperand { .. }));
    }

    #[test]
    fn test_operator_required_after_operand() {
        assert!(matches!(err("1 + 9 9"), FormulaFormatError::ExpectedOperator { .. }));
        assert!(matches!(err("1 + a1 b3"), FormulaFormatError::ExpectedOperator { .. }));
        assert!(matches!(err("a1 (1+1)"), FormulaFormatError::ExpectedOperator { .. }));
        assert!(matches!(err("7 + (1+1) 0"), FormulaFormatError::ExpectedOperator { .. }));
        assert!(matches!(err("1a"), FormulaFormatError::ExpectedOperator { .. }));
        assert!(matches!(err("a2c"), FormulaFormatError::ExpectedOperator { .. }));
        assert!(matches!(err(" 1 + 1 ("), FormulaFormatError::ExpectedOperator { .. }));
    }

    #[test]
    fn test_parenthesis_balance() {
        assert_eq!(err("(2-8))"), FormulaFormatError::UnexpectedClosingParen);
        assert_eq!(err("3 *5 + 7))"), FormulaFormatError::UnexpectedClosingParen);
        assert_eq!(
            err("(3 *5 + 7"),
            FormulaFormatError::UnbalancedParens { open: 1, close: 0 }
        );
    }

    #[test]
    fn test_number_out_of_range() {
        assert!(matches!(err("1e400"), FormulaFormatError::NumberOutOfRange(_)));
    }

    #[test]
    fn test_variables_are_normalized_and_deduplicated() {
        let f = Formula::parse("sImON1 / 4e-9 + abc8 * h9 - simon1").unwrap();
        let vars: Vec<String> = f.variables().into_iter().collect();
        assert_eq!(vars, vec!["ABC8", "H9", "SIMON1"]);

        let f = Formula::parse("4e10 + 100 - 90 - (105 - 6) + 7 + 1").unwrap();
        assert!(f.variables().is_empty());
    }

    #[test]
    fn test_canonical_string() {
        assert_eq!(Formula::parse("8").unwrap().canonical(), "8");
        assert_eq!(
            Formula::parse("( 6+ 7 -9*8   )").unwrap().canonical(),
            "(6+7-9*8)"
        );
        assert_eq!(
            Formula::parse("a1 + Ab2 - Avk99 * 8").unwrap().canonical(),
            "A1+AB2-AVK99*8"
        );
        assert_eq!(
            Formula::parse("4e2 + 3.5E-3 * 7e+5").unwrap().canonical(),
            "400+0.0035*700000"
        );
        assert_eq!(
            Formula::parse("4e-2 + (xyz990/  (78) * 8e1 - 4.5)")
                .unwrap()
                .to_string(),
            "0.04+(XYZ990/(78)*80-4.5)"
        );
    }

    #[test]
    fn test_canonical_round_trip() {
        for text in ["5.0000 + a1", "(x1*2E3)/ (y22 - .5)", "1-5*(9-9)/0+3e7-(abC999)"] {
            let f = Formula::parse(text).unwrap();
            let again = Formula::parse(f.canonical()).unwrap();
            assert_eq!(again.canonical(), f.canonical());
            assert_eq!(again, f);
        }
    }

    #[test]
    fn test_equality_is_by_canonical_string() {
        assert_eq!(Formula::parse("x1+y1").unwrap(), Formula::parse("X1 + Y1").unwrap());
        assert_eq!(
            Formula::parse("1-5*(9-9)/0+3e7-(abC999)").unwrap(),
            Formula::parse("1-5*(9-9)/0+3E7-(AbC999)").unwrap()
        );
        assert_ne!(Formula::parse("1+(2)").unwrap(), Formula::parse("1+2").unwrap());
        assert_ne!(Formula::parse("1").unwrap(), Formula::parse("2").unwrap());
    }

    #[test]
    fn test_equal_formulas_hash_equally() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Formula::parse("a1 * 2.0").unwrap());
        assert!(set.contains(&Formula::parse("A1*2").unwrap()));
    }

    #[test]
    fn test_from_str() {
        let f: Formula = "a1+1".parse().unwrap();
        assert_eq!(f.to_string(), "A1+1");
        assert!("1+".parse::<Formula>().is_err());
    }
}
