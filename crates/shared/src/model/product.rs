use crate::model::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_DESCRIPTION: &str = "Brak opisu";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Time-based token: unix millis followed by a random suffix.
    pub fn generate(now: DateTime<Utc>, suffix: &str) -> Self {
        Self(format!("{}{}", now.timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub price: Price,
    pub store: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub purchased: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

/// Description as entered, or the placeholder when blank.
pub fn description_or_default(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default_description()
    } else {
        trimmed.to_string()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {} – {}", self.name, self.price, self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_legacy_record_without_optional_fields() {
        let json = r#"{"id":"1700000000000","name":"Chleb","price":"NaN","store":"Lidl"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id.as_str(), "1700000000000");
        assert_eq!(product.price, Price::Unspecified);
        assert_eq!(product.description, DEFAULT_DESCRIPTION);
        assert!(!product.purchased);
        assert!(product.owner_id.is_none());
        assert!(product.created_at.is_none());
    }

    #[test]
    fn encodes_camel_case_keys_and_millis() {
        let product = Product {
            id: ProductId::new("42"),
            name: "Mleko".into(),
            price: Price::Amount(3.5),
            store: "Lidl".into(),
            description: DEFAULT_DESCRIPTION.into(),
            purchased: true,
            owner_id: Some("uid-1".into()),
            created_at: DateTime::from_timestamp_millis(1_700_000_000_123),
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["ownerId"], "uid-1");
        assert_eq!(value["createdAt"], 1_700_000_000_123_i64);
        assert_eq!(value["price"], 3.5);
    }

    #[test]
    fn list_row_matches_card_text() {
        let product = Product {
            id: ProductId::new("1"),
            name: "Masło".into(),
            price: Price::Amount(7.99),
            store: "Biedronka".into(),
            description: DEFAULT_DESCRIPTION.into(),
            purchased: false,
            owner_id: None,
            created_at: None,
        };
        assert_eq!(product.to_string(), "Masło – 7.99 zł – Biedronka");

        let unpriced = Product {
            price: Price::Unspecified,
            ..product
        };
        assert_eq!(unpriced.to_string(), "Masło – Nie określono – Biedronka");
    }

    #[test]
    fn blank_description_falls_back_to_placeholder() {
        assert_eq!(description_or_default("   "), DEFAULT_DESCRIPTION);
        assert_eq!(description_or_default(" świeże "), "świeże");
    }
}
