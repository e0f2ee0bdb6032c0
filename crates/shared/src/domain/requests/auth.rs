use crate::domain::requests::{FormErrors, collect_field_errors};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const FILL_IN_ALL: &str = "Proszę wypełnić wszystkie pola";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "filled", message = "Proszę wypełnić wszystkie pola"))]
    pub email: String,

    #[validate(length(min = 1, message = "Proszę wypełnić wszystkie pola"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Nieprawidłowy adres email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Hasło musi mieć co najmniej 6 znaków"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn field_errors(&self) -> FormErrors {
        self.validate()
            .map_or_else(|errors| collect_field_errors(&errors), |()| FormErrors::new())
    }
}

impl RegisterRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// A blank field reports the fill-in message rather than its format
    /// check.
    pub fn field_errors(&self) -> FormErrors {
        let mut errors = self
            .validate()
            .map_or_else(|errors| collect_field_errors(&errors), |()| FormErrors::new());

        let fields = [("email", self.email.trim()), ("password", self.password.as_str())];
        for (field, value) in fields {
            if value.is_empty() {
                errors.insert(field.to_string(), FILL_IN_ALL.to_string());
            }
        }
        errors
    }
}

fn filled(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}
