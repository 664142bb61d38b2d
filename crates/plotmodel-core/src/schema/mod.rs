//! Declaration side: field descriptors, mixin includes and model schemas.
//!
//! A schema moves through three states, one way only:
//! `ModelSchemaBuilder` (unbuilt) → `ModelSchema` (built, immutable)
//! → `Arc<ModelSchema>` held by a `SchemaRegistry` (registered).

mod builder;
mod field;
mod include;
mod model;

#[cfg(test)]
mod tests;

use crate::error::ErrorTree;
use derive_more::Display;
use std::fmt;
use thiserror::Error as ThisError;

// re-exports
pub use builder::ModelSchemaBuilder;
pub use field::FieldDescriptor;
pub use include::{Include, include, prefixed_name};
pub use model::ModelSchema;

///
/// SchemaKind
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum SchemaKind {
    /// Declares shared fields for subclasses; never instantiated directly.
    #[display("abstract")]
    Abstract,
    #[default]
    #[display("concrete")]
    Concrete,
    /// Field bundle meant to be pulled into hosts with `Include`.
    #[display("mixin")]
    Mixin,
}

impl SchemaKind {
    #[must_use]
    pub const fn is_instantiable(self) -> bool {
        matches!(self, Self::Concrete)
    }
}

///
/// FieldOrigin
/// Where a resolved field came from; reported on name collisions.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldOrigin {
    Base { model: String },
    Include { prefix: String, group: String },
    Own,
}

impl fmt::Display for FieldOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base { model } => write!(f, "base '{model}'"),
            Self::Include { prefix, group } if prefix.is_empty() => {
                write!(f, "unprefixed include of '{group}'")
            }
            Self::Include { prefix, group } => write!(f, "include '{prefix}' of '{group}'"),
            Self::Own => f.write_str("own declaration"),
        }
    }
}

///
/// DuplicateFieldError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("duplicate field '{field}' in model '{model}': declared by {first} and by {second}")]
pub struct DuplicateFieldError {
    pub model: String,
    pub field: String,
    pub first: FieldOrigin,
    pub second: FieldOrigin,
}

///
/// SchemaError
/// Declaration-time and registry failures.
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("model '{model}' is already registered")]
    AlreadyRegistered { model: String },

    #[error(transparent)]
    DuplicateField(#[from] DuplicateFieldError),

    #[error("invalid declaration of model '{model}': {errors}")]
    InvalidDeclaration { model: String, errors: ErrorTree },

    #[error("{kind} schema '{model}' cannot be registered")]
    NotRegistrable { model: String, kind: SchemaKind },

    #[error("model '{model}' overrides the default of unknown field '{field}'")]
    UnknownOverride { model: String, field: String },

    #[error("model '{model}' is not registered")]
    UnknownModel { model: String },
}
