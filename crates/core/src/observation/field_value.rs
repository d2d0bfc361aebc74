//! Classification of raw spot values.
//!
//! Spot `data` is a free-form JSON map whose keys come from the
//! template, not from a fixed schema, so every read goes through
//! [`FieldValue`] instead of assuming a column type. Coercions are
//! lenient: a value that does not fit the requested type reads as
//! missing, never as an error.

use serde_json::Value;

/// A single spot value, classified by its JSON representation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Missing,
}

impl FieldValue {
    /// Classify a raw JSON value. Nulls, arrays and objects are missing.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n.as_f64().map(Self::Number).unwrap_or(Self::Missing),
            Some(Value::String(s)) => Self::Text(s.clone()),
            Some(Value::Bool(b)) => Self::Bool(*b),
            _ => Self::Missing,
        }
    }

    /// Numeric view: numbers directly, strings when parseable as f64.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Truthy view. Accepted encodings: `true`, `"true"`/`"True"`,
    /// `1`, `"1"`, `"yes"`/`"Yes"`. Everything else is falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n == 1.0,
            Self::Text(s) => matches!(s.as_str(), "true" | "True" | "1" | "yes" | "Yes"),
            Self::Missing => false,
        }
    }

    /// Categorical view: the stringified value. Empty strings count as
    /// missing so they never pollute a distribution.
    pub fn as_category(&self) -> Option<String> {
        match self {
            Self::Text(s) if !s.is_empty() => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(value: Value) -> FieldValue {
        FieldValue::from_json(Some(&value))
    }

    #[test]
    fn classifies_json_values() {
        assert_eq!(classify(json!(3.5)), FieldValue::Number(3.5));
        assert_eq!(classify(json!("el_23")), FieldValue::Text("el_23".into()));
        assert_eq!(classify(json!(true)), FieldValue::Bool(true));
        assert_eq!(classify(Value::Null), FieldValue::Missing);
        assert_eq!(classify(json!([1, 2])), FieldValue::Missing);
        assert_eq!(FieldValue::from_json(None), FieldValue::Missing);
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(classify(json!(12)).as_number(), Some(12.0));
        assert_eq!(classify(json!("3.25")).as_number(), Some(3.25));
        assert_eq!(classify(json!(" 7 ")).as_number(), Some(7.0));
        assert_eq!(classify(json!("moderate")).as_number(), None);
        assert_eq!(classify(json!(true)).as_number(), None);
        assert_eq!(FieldValue::Missing.as_number(), None);
    }

    #[test]
    fn truthy_encodings() {
        for v in [json!(true), json!("true"), json!("True"), json!(1), json!("1"), json!("yes"), json!("Yes")] {
            assert!(classify(v.clone()).is_truthy(), "expected truthy: {v}");
        }
        for v in [json!(false), json!("no"), json!(0), json!("TRUE"), json!(2), Value::Null] {
            assert!(!classify(v.clone()).is_truthy(), "expected falsy: {v}");
        }
    }

    #[test]
    fn categorical_stringification() {
        assert_eq!(classify(json!("el_23")).as_category(), Some("el_23".into()));
        assert_eq!(classify(json!(3)).as_category(), Some("3".into()));
        assert_eq!(classify(json!(false)).as_category(), Some("false".into()));
        assert_eq!(classify(json!("")).as_category(), None);
        assert_eq!(FieldValue::Missing.as_category(), None);
    }
}
