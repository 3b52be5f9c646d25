use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value as JsonValue;

lazy_static! {
    /// Plain decimal literal with optional sign and exponent.
    /// Examples: "60", "-2.5", ".5", "5.", "1e3", "+7E-2"
    static ref NUMBER_PATTERN: Regex =
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap();
}

/// A value as it arrives from a form field or a JSON body
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Number(f64),
    Text(String),
    Missing,
}

impl InputValue {
    /// The finite number this value stands for, if any
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            InputValue::Number(n) => *n,
            InputValue::Text(s) => parse_numeric_str(s)?,
            InputValue::Missing => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Parse a numeric string, rejecting words like "NaN" or "inf" that `f64` accepts
pub fn parse_numeric_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if !NUMBER_PATTERN.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Number(value)
    }
}

impl From<f32> for InputValue {
    fn from(value: f32) -> Self {
        InputValue::Number(value as f64)
    }
}

impl From<i32> for InputValue {
    fn from(value: i32) -> Self {
        InputValue::Number(value as f64)
    }
}

impl From<i64> for InputValue {
    fn from(value: i64) -> Self {
        InputValue::Number(value as f64)
    }
}

impl From<u32> for InputValue {
    fn from(value: u32) -> Self {
        InputValue::Number(value as f64)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Text(value)
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(InputValue::Missing, Into::into)
    }
}

impl From<&JsonValue> for InputValue {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Number(n) => n.as_f64().map_or(InputValue::Missing, InputValue::Number),
            JsonValue::String(s) => InputValue::Text(s.clone()),
            _ => InputValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers() {
        assert_eq!(InputValue::from(60).parse(), Some(60.0));
        assert_eq!(InputValue::from(-2.5).parse(), Some(-2.5));
        assert_eq!(InputValue::from(f64::NAN).parse(), None);
        assert_eq!(InputValue::from(f64::INFINITY).parse(), None);
        assert_eq!(InputValue::Missing.parse(), None);
        assert_eq!(InputValue::from(None::<f64>).parse(), None);
        assert_eq!(InputValue::from(Some(3)).parse(), Some(3.0));
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(parse_numeric_str("60"), Some(60.0));
        assert_eq!(parse_numeric_str("  -2.5 "), Some(-2.5));
        assert_eq!(parse_numeric_str(".5"), Some(0.5));
        assert_eq!(parse_numeric_str("5."), Some(5.0));
        assert_eq!(parse_numeric_str("+1e3"), Some(1000.0));
        assert_eq!(parse_numeric_str("7E-2"), Some(0.07));
    }

    #[test]
    fn test_rejected_strings() {
        for s in ["", "   ", "not a number", "NaN", "inf", "-infinity", "0x10", "1,000", "5 kg", "."] {
            assert_eq!(InputValue::from(s).parse(), None, "{:?} should be rejected", s);
        }
        // Overflows to infinity
        assert_eq!(InputValue::from("1e400").parse(), None);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(InputValue::from(&json!(12)), InputValue::Number(12.0));
        assert_eq!(InputValue::from(&json!("12")), InputValue::Text("12".to_string()));
        assert_eq!(InputValue::from(&json!(null)), InputValue::Missing);
        assert_eq!(InputValue::from(&json!(true)), InputValue::Missing);
        assert_eq!(InputValue::from(&json!([1])), InputValue::Missing);
    }
}
