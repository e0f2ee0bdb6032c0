use crate::{
    domain::requests::{FormErrors, collect_field_errors},
    model::{Price, PriceError, Product, description_or_default},
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Raw add/edit form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(custom(function = "not_blank", message = "Nazwa wymagana"))]
    pub name: String,

    #[validate(custom(function = "price_input"))]
    pub price: String,

    #[validate(custom(function = "not_blank", message = "Sklep wymagany"))]
    pub store: String,

    #[serde(default)]
    pub description: String,
}

/// A form that passed validation, with trimmed fields and a parsed price.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    pub store: String,
    pub description: String,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        store: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            store: store.into(),
            description: description.into(),
        }
    }

    /// Pre-filled form for editing an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_input(),
            store: product.store.clone(),
            description: product.description.clone(),
        }
    }

    /// Field name to message for every invalid field. Empty means valid.
    pub fn field_errors(&self) -> FormErrors {
        match self.validate() {
            Ok(()) => FormErrors::new(),
            Err(errors) => collect_field_errors(&errors),
        }
    }

    pub fn into_draft(self) -> Result<ProductDraft, FormErrors> {
        let errors = self.field_errors();
        if !errors.is_empty() {
            return Err(errors);
        }

        let price = Price::parse(&self.price).unwrap_or(Price::Unspecified);

        Ok(ProductDraft {
            name: self.name.trim().to_string(),
            price,
            store: self.store.trim().to_string(),
            description: description_or_default(&self.description),
        })
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn price_input(value: &str) -> Result<(), ValidationError> {
    match Price::parse(value) {
        Ok(_) => Ok(()),
        Err(PriceError::Blank) => {
            Err(ValidationError::new("required").with_message(Cow::Borrowed("Cena wymagana")))
        }
        Err(PriceError::Negative) => Err(ValidationError::new("range")
            .with_message(Cow::Borrowed("Cena musi być liczbą dodatnią"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form_has_no_errors() {
        let form = ProductForm::new("Mleko", "3.5", "Lidl", "");
        assert!(form.field_errors().is_empty());
    }

    #[test]
    fn reports_each_blank_required_field() {
        let errors = ProductForm::new("  ", "", "\t", "opis").field_errors();

        assert_eq!(errors.get("name").map(String::as_str), Some("Nazwa wymagana"));
        assert_eq!(errors.get("price").map(String::as_str), Some("Cena wymagana"));
        assert_eq!(errors.get("store").map(String::as_str), Some("Sklep wymagany"));
        assert!(!errors.contains_key("description"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let errors = ProductForm::new("Mleko", "-2", "Lidl", "").field_errors();
        assert_eq!(
            errors.get("price").map(String::as_str),
            Some("Cena musi być liczbą dodatnią")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn non_numeric_price_passes_and_becomes_unspecified() {
        let draft = ProductForm::new("Mleko", "abc", "Lidl", "").into_draft().unwrap();
        assert_eq!(draft.price, Price::Unspecified);
    }

    #[test]
    fn draft_is_trimmed_and_gets_placeholder_description() {
        let draft = ProductForm::new(" Mleko ", " 3.5 ", " Lidl ", "   ")
            .into_draft()
            .unwrap();

        assert_eq!(draft.name, "Mleko");
        assert_eq!(draft.store, "Lidl");
        assert_eq!(draft.price, Price::Amount(3.5));
        assert_eq!(draft.description, crate::model::DEFAULT_DESCRIPTION);
    }
}
