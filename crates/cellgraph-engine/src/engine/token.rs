//! Formula tokenizer.
//!
//! Splits formula text into parentheses, operators, variables, numbers and
//! "other" tokens. Whitespace separates tokens and is discarded. Any run of
//! text that matches none of the token patterns is kept as a single
//! [`RawToken::Other`] so the validator can report it.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn as_char(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }
}

/// A token as it appears in the source text.
#[derive(Clone, Debug, PartialEq)]
pub enum RawToken<'a> {
    LeftParen,
    RightParen,
    Operator(Operator),
    Variable(&'a str),
    Number(&'a str),
    Other(&'a str),
}

impl RawToken<'_> {
    /// Number, variable or ")": something an operator may follow.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            RawToken::Number(_) | RawToken::Variable(_) | RawToken::RightParen
        )
    }

    /// Number, variable or "(": something that may follow an operator.
    pub fn starts_operand(&self) -> bool {
        matches!(
            self,
            RawToken::Number(_) | RawToken::Variable(_) | RawToken::LeftParen
        )
    }
}

impl fmt::Display for RawToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawToken::LeftParen => f.write_str("("),
            RawToken::RightParen => f.write_str(")"),
            RawToken::Operator(op) => write!(f, "{}", op.as_char()),
            RawToken::Variable(s) | RawToken::Number(s) | RawToken::Other(s) => f.write_str(s),
        }
    }
}

fn token_re() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?<lp>\() |
            (?<rp>\)) |
            (?<op>[+\-*/]) |
            (?<var>[A-Za-z]+[0-9]+) |
            (?<num>(?:[0-9]+\.[0-9]* | [0-9]*\.[0-9]+ | [0-9]+)(?:[eE][+\-]?[0-9]+)?) |
            (?<space>\s+)",
        )
        .expect("formula token regex must compile")
    })
}

/// Split formula text into tokens, in source order.
pub fn tokenize(formula: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for caps in token_re().captures_iter(formula) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_other(&mut tokens, &formula[last_end..whole.start()]);
        last_end = whole.end();

        if caps.name("lp").is_some() {
            tokens.push(RawToken::LeftParen);
        } else if caps.name("rp").is_some() {
            tokens.push(RawToken::RightParen);
        } else if let Some(m) = caps.name("op") {
            if let Some(op) = m.as_str().chars().next().and_then(Operator::from_char) {
                tokens.push(RawToken::Operator(op));
            }
        } else if let Some(m) = caps.name("var") {
            tokens.push(RawToken::Variable(m.as_str()));
        } else if let Some(m) = caps.name("num") {
            tokens.push(RawToken::Number(m.as_str()));
        }
        // whitespace is dropped
    }
    push_other(&mut tokens, &formula[last_end..]);

    tokens
}

fn push_other<'a>(tokens: &mut Vec<RawToken<'a>>, gap: &'a str) {
    let gap = gap.trim();
    if !gap.is_empty() {
        tokens.push(RawToken::Other(gap));
    }
}
