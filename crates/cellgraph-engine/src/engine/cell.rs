//! Cell data structures.
//!
//! - [`CellContent`] - what the user stored in a cell (text, number or formula)
//! - [`CellValue`] - what the content evaluates to (text, number or error)
//! - [`Cell`] - content plus its cached value

use std::fmt;

use super::eval::FormulaError;
use super::format::format_number;
use super::formula::{Formula, FormulaFormatError};

/// The content stored in a cell. An empty cell holds `Text("")`.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContent {
    Text(String),
    Number(f64),
    Formula(Formula),
}

impl CellContent {
    pub fn empty() -> CellContent {
        CellContent::Text(String::new())
    }

    /// Classify raw cell input.
    /// - Parses as a finite number (ignoring surrounding whitespace) -> Number
    /// - Starts with '=' -> Formula (the rest must be a valid formula)
    /// - Otherwise -> Text, verbatim
    pub fn from_input(input: &str) -> Result<CellContent, FormulaFormatError> {
        if let Ok(n) = input.trim().parse::<f64>()
            && n.is_finite()
        {
            return Ok(CellContent::Number(n));
        }

        if let Some(formula) = input.strip_prefix('=') {
            return Formula::parse(formula).map(CellContent::Formula);
        }

        Ok(CellContent::Text(input.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Text(s) if s.is_empty())
    }

    /// The text that reproduces this content when passed back through
    /// [`CellContent::from_input`].
    pub fn string_form(&self) -> String {
        match self {
            CellContent::Text(s) => s.clone(),
            CellContent::Number(n) => format_number(*n),
            CellContent::Formula(f) => format!("={}", f),
        }
    }

    /// Variables this content depends on (empty unless it is a formula).
    pub fn dependencies(&self) -> Vec<String> {
        match self {
            CellContent::Formula(f) => f.variables().into_iter().collect(),
            _ => Vec::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CellContent::Text(_) => "text",
            CellContent::Number(_) => "number",
            CellContent::Formula(_) => "formula",
        }
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_form())
    }
}

/// The computed value of a cell. An empty cell has the value `Text("")`.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Error(FormulaError),
}

impl CellValue {
    pub fn empty() -> CellValue {
        CellValue::Text(String::new())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Error(e) => write!(f, "#ERR: {}", e),
        }
    }
}

/// A non-empty cell: its content and the cached value of that content.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub contents: CellContent,
    pub value: CellValue,
}

impl Cell {
    /// Create a cell whose value is not yet computed. Text and number cells
    /// are their own value; formula cells start with a placeholder error
    /// until the first recomputation.
    pub fn new(contents: CellContent) -> Cell {
        let value = match &contents {
            CellContent::Text(s) => CellValue::Text(s.clone()),
            CellContent::Number(n) => CellValue::Number(*n),
            CellContent::Formula(_) => CellValue::Error(FormulaError::new("Not yet evaluated")),
        };
        Cell { contents, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_number() {
        assert_eq!(CellContent::from_input("5").unwrap(), CellContent::Number(5.0));
        assert_eq!(CellContent::from_input(" 2.5e1 ").unwrap(), CellContent::Number(25.0));
        assert_eq!(CellContent::from_input("-3").unwrap(), CellContent::Number(-3.0));
    }

    #[test]
    fn test_from_input_formula() {
        let content = CellContent::from_input("=a1 + 2").unwrap();
        assert_eq!(
            content,
            CellContent::Formula(Formula::parse("A1+2").unwrap())
        );
        assert!(CellContent::from_input("=1+").is_err());
        assert!(CellContent::from_input("=").is_err());
    }

    #[test]
    fn test_from_input_text() {
        assert_eq!(
            CellContent::from_input("hello").unwrap(),
            CellContent::Text("hello".to_string())
        );
        assert_eq!(
            CellContent::from_input(" =A1").unwrap(),
            CellContent::Text(" =A1".to_string())
        );
        assert_eq!(
            CellContent::from_input("inf").unwrap(),
            CellContent::Text("inf".to_string())
        );
        assert!(CellContent::from_input("").unwrap().is_empty());
    }

    #[test]
    fn test_string_form_reproduces_content() {
        for input in ["5.0000", "=a1 + 2", "hello", "0.04"] {
            let content = CellContent::from_input(input).unwrap();
            let again = CellContent::from_input(&content.string_form()).unwrap();
            assert_eq!(again, content);
        }
        assert_eq!(CellContent::from_input("5.0000").unwrap().string_form(), "5");
        assert_eq!(CellContent::from_input("=a1 + 2").unwrap().string_form(), "=A1+2");
    }

    #[test]
    fn test_dependencies() {
        let content = CellContent::from_input("=b1 * a1 + b1").unwrap();
        assert_eq!(content.dependencies(), vec!["A1".to_string(), "B1".to_string()]);
        assert!(CellContent::Number(1.0).dependencies().is_empty());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(CellValue::Number(7.0).to_string(), "7");
        assert_eq!(CellValue::Text("x".into()).to_string(), "x");
        assert_eq!(
            CellValue::Error(FormulaError::division_by_zero()).to_string(),
            "#ERR: Division by zero"
        );
    }
}
