//! Numeric fields that are stored and transmitted as text.
//!
//! Expense amounts and study hours travel through the persistence layer as text. The aggregation
//! engine parses them to `f64` at the last moment, and text that does not parse becomes `NaN`
//! rather than an error. Validation, when wanted, happens at the input boundary with
//! [`NumericText::validate`].

use crate::Result;
use anyhow::{ensure, Context};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// The text of a numeric field exactly as it was stored or transmitted.
///
/// # Examples
///
/// ```
/// # use study_tracker::model::NumericText;
/// assert_eq!(NumericText::new("150").value(), 150.0);
/// assert_eq!(NumericText::new(" 1.5 ").value(), 1.5);
/// assert!(NumericText::new("lots").value().is_nan());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NumericText(String);

impl NumericText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the text as a floating-point number. Surrounding whitespace is ignored. Anything
    /// that does not parse, including the empty string, yields `NaN`. So do the spelled-out
    /// forms `inf`, `infinity` and `nan`: a number needs at least one digit.
    pub fn value(&self) -> f64 {
        let text = self.0.trim();
        if !text.bytes().any(|b| b.is_ascii_digit()) {
            return f64::NAN;
        }
        text.parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Checks that the text is a non-negative decimal and returns it.
    pub fn validate(&self) -> Result<Decimal> {
        let value = Decimal::from_str(self.0.trim())
            .with_context(|| format!("'{}' is not a valid number", self.0))?;
        ensure!(
            !value.is_sign_negative() || value.is_zero(),
            "'{}' must not be negative",
            self.0
        );
        Ok(value)
    }
}

impl Display for NumericText {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Decimal> for NumericText {
    fn from(value: Decimal) -> Self {
        Self(value.normalize().to_string())
    }
}

impl From<&str> for NumericText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for NumericText {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// Hosted databases hand numeric columns back as JSON numbers while form input arrives as text,
/// so both are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumeric {
    Text(String),
    Number(f64),
}

impl<'de> Deserialize<'de> for NumericText {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawNumeric::deserialize(deserializer)? {
            RawNumeric::Text(s) => Self(s),
            RawNumeric::Number(n) => Self(n.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_integer() {
        assert_eq!(NumericText::new("500").value(), 500.0);
    }

    #[test]
    fn test_value_decimal_with_whitespace() {
        assert_eq!(NumericText::new("  12.25\n").value(), 12.25);
    }

    #[test]
    fn test_value_malformed_is_nan() {
        assert!(NumericText::new("twelve").value().is_nan());
        assert!(NumericText::new("").value().is_nan());
        assert!(NumericText::new("$5").value().is_nan());
    }

    #[test]
    fn test_value_spelled_out_infinity_is_nan() {
        for text in ["inf", "infinity", "+inf", "-Infinity", " INF ", "NaN"] {
            assert!(NumericText::new(text).value().is_nan(), "{text}");
        }
        assert_eq!(NumericText::new("1e3").value(), 1000.0);
    }

    #[test]
    fn test_validate_accepts_non_negative() {
        let value = NumericText::new("0").validate().unwrap();
        assert!(value.is_zero());
        let value = NumericText::new("19.99").validate().unwrap();
        assert_eq!(value, Decimal::new(1999, 2));
    }

    #[test]
    fn test_validate_rejects_negative() {
        let err = NumericText::new("-3").validate().unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let err = NumericText::new("abc").validate().unwrap_err();
        assert!(err.to_string().contains("not a valid number"));
    }

    #[test]
    fn test_from_decimal_normalizes() {
        let text = NumericText::from(Decimal::new(15000, 2));
        assert_eq!(text.as_str(), "150");
    }

    #[test]
    fn test_deserialize_string() {
        let text: NumericText = serde_json::from_str("\"42.5\"").unwrap();
        assert_eq!(text.as_str(), "42.5");
    }

    #[test]
    fn test_deserialize_number() {
        let text: NumericText = serde_json::from_str("1.5").unwrap();
        assert_eq!(text.value(), 1.5);
        let text: NumericText = serde_json::from_str("150").unwrap();
        assert_eq!(text.value(), 150.0);
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&NumericText::new("7")).unwrap();
        assert_eq!(json, "\"7\"");
    }
}
