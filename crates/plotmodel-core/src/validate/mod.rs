//! Validation errors and value constraints shared by field descriptors.

pub mod naming;

mod validator;


use crate::{types::TypeSpec, value::Value};
use std::fmt;
use thiserror::Error as ThisError;

pub use validator::Validator;

///
/// ValidationError
///
/// Why one value was rejected by one field.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ValidationError {
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error(transparent)]
    Reference(#[from] ReferenceTypeError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Union(#[from] UnionValidationError),
}

impl ValidationError {
    /// Name of the field that rejected the value.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Constraint(e) => &e.field,
            Self::Reference(e) => &e.field,
            Self::Type(e) => &e.field,
            Self::Union(e) => &e.field,
        }
    }
}

///
/// TypeError
///
/// The value's shape does not match the field's declared type.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("field '{field}' expected {expected}, got {actual}{}", reason_suffix(.reason))]
pub struct TypeError {
    pub field: String,
    pub expected: String,
    pub actual: String,
    pub reason: Option<String>,
}

impl TypeError {
    #[must_use]
    pub fn new(field: &str, expected: &TypeSpec, actual: &Value) -> Self {
        Self {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.tag().label().to_string(),
            reason: None,
        }
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_ref()
        .map(|r| format!(" ({r})"))
        .unwrap_or_default()
}

///
/// UnionValidationError
///
/// None of an `Either`'s alternatives accepted the value.
/// Failures are listed in declaration order.
///

#[derive(Clone, Debug, PartialEq)]
pub struct UnionValidationError {
    pub field: String,
    pub expected: String,
    pub actual: String,
    pub failures: Vec<AlternativeFailure>,
}

impl UnionValidationError {
    /// Tags of the alternatives that were attempted, in order.
    #[must_use]
    pub fn attempted(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.alternative.as_str()).collect()
    }
}

impl fmt::Display for UnionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}' expected {}, got {}: no alternative matched",
            self.field, self.expected, self.actual
        )?;
        for failure in &self.failures {
            write!(f, "; {}: {}", failure.alternative, failure.error)?;
        }

        Ok(())
    }
}

impl std::error::Error for UnionValidationError {}

///
/// AlternativeFailure
///

#[derive(Clone, Debug, PartialEq)]
pub struct AlternativeFailure {
    pub alternative: String,
    pub error: ValidationError,
}

///
/// ReferenceTypeError
///
/// A reference field was given an instance of an unrelated model.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("field '{field}' expects an instance of '{expected}', got an instance of '{actual}'")]
pub struct ReferenceTypeError {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

///
/// ConstraintError
///
/// The value has the right type but a declared validator rejected it.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("field '{field}' violates {constraint}: {message}")]
pub struct ConstraintError {
    pub field: String,
    pub constraint: String,
    pub message: String,
}
