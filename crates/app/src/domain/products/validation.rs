//! Request body validation for product operations.
//!
//! Each operation checks its fields in a fixed order and reports only the
//! first failure. Unrecognised fields are dropped. `null` is treated the same
//! as an absent field.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::products::{
    data::{NewProduct, ProductDeletion, ProductUpdate},
    records::{Password, ProductStatus},
};

/// The first rule a request body broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

/// Validate a create body: `name`, `description`, `manager`, `password`, then `status`.
///
/// # Errors
///
/// Returns the first failing field's message.
pub fn validate_create(body: &Value) -> Result<NewProduct, ValidationError> {
    let fields = Fields::from_body(body)?;

    Ok(NewProduct {
        name: fields.required_text("name")?,
        description: fields.required_text("description")?,
        manager: fields.required_text("manager")?,
        password: Password::new(fields.required_text("password")?),
        status: fields.optional_status()?.unwrap_or_default(),
    })
}

/// Validate an update body: `password`, then `name`, `description`, `manager`, `status`.
///
/// # Errors
///
/// Returns the first failing field's message.
pub fn validate_update(body: &Value) -> Result<ProductUpdate, ValidationError> {
    let fields = Fields::from_body(body)?;

    Ok(ProductUpdate {
        password: Password::new(fields.required_text("password")?),
        name: fields.optional_text("name")?,
        description: fields.optional_text("description")?,
        manager: fields.optional_text("manager")?,
        status: fields.optional_status()?,
    })
}

/// Validate a delete body. Only `password` is inspected.
///
/// # Errors
///
/// Returns an error when the password is missing, not a string or empty.
pub fn validate_delete(body: &Value) -> Result<ProductDeletion, ValidationError> {
    let fields = Fields::from_body(body)?;

    Ok(ProductDeletion {
        password: Password::new(fields.required_text("password")?),
    })
}

struct Fields<'a> {
    body: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn from_body(body: &'a Value) -> Result<Self, ValidationError> {
        body.as_object()
            .map(|body| Self { body })
            .ok_or_else(|| ValidationError::new("request body must be a JSON object"))
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.body.get(field).filter(|value| !value.is_null())
    }

    fn required_text(&self, field: &str) -> Result<String, ValidationError> {
        self.optional_text(field)?
            .ok_or_else(|| ValidationError::new(format!("{field} is required")))
    }

    fn optional_text(&self, field: &str) -> Result<Option<String>, ValidationError> {
        let Some(value) = self.get(field) else {
            return Ok(None);
        };

        let Some(text) = value.as_str() else {
            return Err(ValidationError::new(format!("{field} must be a string")));
        };

        if text.is_empty() {
            return Err(ValidationError::new(format!("{field} must not be empty")));
        }

        Ok(Some(text.to_owned()))
    }

    fn optional_status(&self) -> Result<Option<ProductStatus>, ValidationError> {
        let Some(value) = self.get("status") else {
            return Ok(None);
        };

        value
            .as_str()
            .and_then(|status| status.parse().ok())
            .map(Some)
            .ok_or_else(|| ValidationError::new("status must be one of FOR_SALE, SOLD_OUT"))
    }
}
