//! Product price as entered on the form.
//!
//! A price is either a finite, non-negative amount or explicitly
//! unspecified. The unspecified case is persisted as the string `"NaN"` in
//! the local JSON blob and as `NULL` in the remote table.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const UNSPECIFIED_MARKER: &str = "NaN";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Price {
    Amount(f64),
    #[default]
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    Blank,
    Negative,
}

impl Price {
    /// Parse raw form input.
    ///
    /// Blank input and negative numbers, negative infinity included, are
    /// rejected. Anything else that is not a finite number yields
    /// [`Price::Unspecified`] instead of an error.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Blank);
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value < 0.0 => Err(PriceError::Negative),
            Ok(value) if !value.is_finite() => Ok(Price::Unspecified),
            // normalise -0.0
            Ok(value) => Ok(Price::Amount(value.abs())),
            Err(_) => Ok(Price::Unspecified),
        }
    }

    /// Build from a stored value, mapping anything outside the invariant to
    /// [`Price::Unspecified`].
    pub fn from_stored(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() && v >= 0.0 => Price::Amount(v.abs()),
            _ => Price::Unspecified,
        }
    }

    pub fn amount(&self) -> Option<f64> {
        match self {
            Price::Amount(value) => Some(*value),
            Price::Unspecified => None,
        }
    }

    pub fn at_most(&self, ceiling: f64) -> bool {
        match self {
            Price::Amount(value) => *value <= ceiling,
            Price::Unspecified => false,
        }
    }

    /// Text used to pre-fill an edit form.
    pub fn to_input(&self) -> String {
        match self {
            Price::Amount(value) => value.to_string(),
            Price::Unspecified => UNSPECIFIED_MARKER.to_string(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(value) => write!(f, "{value} zł"),
            Price::Unspecified => f.write_str("Nie określono"),
        }
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Price::Amount(value) => serializer.serialize_f64(*value),
            Price::Unspecified => serializer.serialize_str(UNSPECIFIED_MARKER),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPrice {
    Number(f64),
    Text(String),
    Null(()),
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let price = match StoredPrice::deserialize(deserializer)? {
            StoredPrice::Number(value) => Price::from_stored(Some(value)),
            StoredPrice::Text(text) => Price::from_stored(text.trim().parse::<f64>().ok()),
            StoredPrice::Null(()) => Price::Unspecified,
        };
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_amounts() {
        assert_eq!(Price::parse("3.5"), Ok(Price::Amount(3.5)));
        assert_eq!(Price::parse("  12 "), Ok(Price::Amount(12.0)));
        assert_eq!(Price::parse("0"), Ok(Price::Amount(0.0)));
    }

    #[test]
    fn non_numeric_input_is_unspecified_not_zero() {
        assert_eq!(Price::parse("abc"), Ok(Price::Unspecified));
        assert_eq!(Price::parse("NaN"), Ok(Price::Unspecified));
        assert_eq!(Price::parse("inf"), Ok(Price::Unspecified));
    }

    #[test]
    fn rejects_blank_and_negative() {
        assert_eq!(Price::parse("   "), Err(PriceError::Blank));
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
        assert_eq!(Price::parse("-inf"), Err(PriceError::Negative));
        assert_eq!(Price::parse("-1e400"), Err(PriceError::Negative));
        assert_eq!(Price::parse("-NaN"), Ok(Price::Unspecified));
    }

    #[test]
    fn unspecified_uses_string_marker_on_the_wire() {
        let json = serde_json::to_string(&vec![Price::Amount(3.5), Price::Unspecified]).unwrap();
        assert_eq!(json, r#"[3.5,"NaN"]"#);
    }

    #[test]
    fn decodes_every_stored_shape() {
        let prices: Vec<Price> =
            serde_json::from_str(r#"[2.25, "NaN", "4", null, -3, "junk"]"#).unwrap();
        assert_eq!(
            prices,
            vec![
                Price::Amount(2.25),
                Price::Unspecified,
                Price::Amount(4.0),
                Price::Unspecified,
                Price::Unspecified,
                Price::Unspecified,
            ]
        );
    }

    #[test]
    fn ceiling_never_matches_unspecified() {
        assert!(Price::Amount(5.0).at_most(5.0));
        assert!(!Price::Amount(5.01).at_most(5.0));
        assert!(!Price::Unspecified.at_most(f64::MAX));
    }
}
