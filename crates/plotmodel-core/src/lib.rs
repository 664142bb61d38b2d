//! Core runtime for plotmodel: type specs, values, field descriptors, schema
//! aggregation, the schema registry, model instances and their snapshots.
//!
//! In general:
//! - `schema` defines *what exists* (declared once per model class)
//! - `instance` defines *what runs* (per-object values checked on write)

#[macro_use]
pub mod error;

pub mod instance;
pub mod obs;
pub mod registry;
pub mod schema;
pub mod serialize;
pub mod types;
pub mod validate;
pub mod value;

use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Maximum length for model schema identifiers.
pub const MAX_MODEL_NAME_LEN: usize = 64;

/// Maximum length for resolved field identifiers (prefix included).
pub const MAX_FIELD_NAME_LEN: usize = 64;

/// Maximum nesting depth of tuple/union/list type specs.
///
/// Validation recurses once per level, so this bounds the stack used by
/// a single `set`.
pub const MAX_TYPE_DEPTH: usize = 8;

/// Upper bound on encoded snapshot payloads accepted by `Snapshot::from_bytes`.
pub const MAX_SNAPSHOT_BYTES: usize = 1024 * 1024;

///
/// Prelude
///
/// Prelude contains only declaration vocabulary.
/// No serializers, sinks or registry internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        instance::{ModelInstance, Snapshot, SnapshotMode},
        registry::{RegisterPolicy, SchemaRegistry, registry},
        schema::{FieldDescriptor, Include, ModelSchema, ModelSchemaBuilder, SchemaKind},
        types::{Primitive, TypeSpec},
        validate::Validator,
        value::{ModelId, ModelRef, Value},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] instance::ModelError),

    #[error(transparent)]
    Schema(#[from] schema::SchemaError),

    #[error(transparent)]
    Serialize(#[from] serialize::SerializeError),

    #[error(transparent)]
    Snapshot(#[from] instance::SnapshotError),

    #[error(transparent)]
    Validation(#[from] validate::ValidationError),
}

impl Error {
    /// Stable classification independent of message text.
    #[must_use]
    pub const fn class(&self) -> error::ErrorClass {
        use error::ErrorClass;

        match self {
            Self::Model(instance::ModelError::UnknownField(_))
            | Self::Snapshot(instance::SnapshotError::UnknownModel { .. }) => ErrorClass::NotFound,
            Self::Model(_) | Self::Validation(_) => ErrorClass::Validation,
            Self::Schema(schema::SchemaError::AlreadyRegistered { .. }) => ErrorClass::Conflict,
            Self::Schema(schema::SchemaError::UnknownModel { .. }) => ErrorClass::NotFound,
            Self::Schema(_) => ErrorClass::Declaration,
            Self::Serialize(_) => ErrorClass::Serialize,
            Self::Snapshot(_) => ErrorClass::Restore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;

    #[test]
    fn classes_are_stable() {
        let conflict = Error::from(schema::SchemaError::AlreadyRegistered {
            model: "Grid".to_string(),
        });
        let missing = Error::from(instance::ModelError::UnknownField(
            instance::UnknownFieldError {
                model: "Grid".to_string(),
                field: "colour".to_string(),
            },
        ));
        let oversized = Error::from(serialize::SerializeError::TooLarge {
            len: 2,
            max_bytes: 1,
        });

        assert_eq!(conflict.class(), ErrorClass::Conflict);
        assert_eq!(missing.class(), ErrorClass::NotFound);
        assert_eq!(oversized.class().to_string(), "serialize");
    }
}
