mod auth;
mod product;

pub use self::auth::{FILL_IN_ALL, LoginRequest, RegisterRequest};
pub use self::product::{ProductDraft, ProductForm};

use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Field name to the message shown under that input.
pub type FormErrors = BTreeMap<String, String>;

pub(crate) fn collect_field_errors(errors: &ValidationErrors) -> FormErrors {
    let mut collected = FormErrors::new();

    for (field, field_errors) in errors.field_errors() {
        let Some(error) = field_errors.first() else {
            continue;
        };
        let message = error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| match error.code.as_ref() {
                "required" => "Pole wymagane".to_string(),
                "email" => "Nieprawidłowy adres email".to_string(),
                "length" => "Nieprawidłowa długość".to_string(),
                "range" => "Wartość poza zakresem".to_string(),
                _ => format!("Nieprawidłowe pole {field}"),
            });
        collected.insert(field.to_string(), message);
    }

    collected
}
