//! Cell values
//!
//! A cell arrives either as a plain scalar or, for rich cells, as text with
//! an attached link (smart chip or hyperlinked run). Every read goes through
//! one of the coercing views below so callers never match on the shape.

use serde_json::Value;

/// One spreadsheet cell
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Rich cell: display text plus link target
    Link { text: String, url: String },
}

impl CellValue {
    /// Empty cell or blank text
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Link { text, url } => text.is_empty() && url.is_empty(),
            _ => false,
        }
    }

    /// Text view; integral numbers print without a fractional part
    pub fn text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Link { text, .. } => text.clone(),
        }
    }

    /// Numeric view: numbers, numeric text and numeric link text
    pub fn number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) | CellValue::Link { text: s, .. } => {
                s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// Numeric view with 0 for anything unparseable
    pub fn number_or_zero(&self) -> f64 {
        self.number().unwrap_or(0.0)
    }

    /// Flag view: `true`, `"TRUE"` and `"true"` are set, everything else is not
    pub fn flag(&self) -> bool {
        match self {
            CellValue::Bool(b) => *b,
            CellValue::Text(s) | CellValue::Link { text: s, .. } => s == "TRUE" || s == "true",
            _ => false,
        }
    }

    /// Link target of a rich cell
    pub fn link_url(&self) -> Option<&str> {
        match self {
            CellValue::Link { url, .. } if !url.is_empty() => Some(url),
            _ => None,
        }
    }

    /// JSON form used by the values API
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Empty => Value::String(String::new()),
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(String::new())),
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Link { text, .. } => Value::String(text.clone()),
        }
    }

    /// Inverse of [`CellValue::to_json`] for unformatted value responses
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) if s.is_empty() => CellValue::Empty,
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
            Value::Bool(b) => CellValue::Bool(*b),
            _ => CellValue::Empty,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_view() {
        assert_eq!(CellValue::Number(12000.0).text(), "12000");
        assert_eq!(CellValue::Number(4.5).text(), "4.5");
        assert_eq!(CellValue::Empty.text(), "");
        assert_eq!(
            CellValue::Link {
                text: "Gangnam".into(),
                url: "https://maps.example".into()
            }
            .text(),
            "Gangnam"
        );
    }

    #[test]
    fn test_number_view() {
        assert_eq!(CellValue::Text(" 42 ".into()).number(), Some(42.0));
        assert_eq!(CellValue::Text("abc".into()).number(), None);
        assert_eq!(CellValue::Bool(true).number(), None);
        assert_eq!(CellValue::Empty.number_or_zero(), 0.0);
    }

    #[test]
    fn test_flag_view() {
        assert!(CellValue::Bool(true).flag());
        assert!(CellValue::Text("TRUE".into()).flag());
        assert!(CellValue::Text("true".into()).flag());
        assert!(!CellValue::Text("True".into()).flag());
        assert!(!CellValue::Text("FALSE".into()).flag());
        assert!(!CellValue::Number(1.0).flag());
        assert!(!CellValue::Empty.flag());
    }

    #[test]
    fn test_from_json() {
        assert_eq!(CellValue::from_json(&serde_json::json!("")), CellValue::Empty);
        assert_eq!(CellValue::from_json(&serde_json::json!(3)), CellValue::Number(3.0));
        assert_eq!(CellValue::from_json(&serde_json::json!(false)), CellValue::Bool(false));
        assert_eq!(CellValue::from_json(&serde_json::Value::Null), CellValue::Empty);
    }
}
