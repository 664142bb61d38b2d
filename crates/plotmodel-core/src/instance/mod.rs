//! Runtime side: model instances holding validated values.

mod snapshot;


use crate::{
    obs::sink::{self, SchemaEvent},
    schema::{ModelSchema, SchemaKind},
    types::TypeSpec,
    validate::ValidationError,
    value::{ModelId, ModelRef, Value},
};
use std::{collections::BTreeSet, sync::Arc};
use thiserror::Error as ThisError;

// re-exports
pub use snapshot::{
    FieldSnapshot, RefTable, ReferenceResolver, Snapshot, SnapshotError, SnapshotMode, WireValue,
};

///
/// ModelError
///

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("{kind} model '{model}' cannot be instantiated")]
    NotInstantiable { model: String, kind: SchemaKind },

    #[error("model '{model}' is missing required fields: {}", .fields.join(", "))]
    MissingRequired { model: String, fields: Vec<String> },

    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),

    #[error("invalid value for model '{model}': {source}")]
    Validation {
        model: String,
        source: ValidationError,
    },
}

impl ModelError {
    /// The underlying validation failure, if this is one.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

///
/// UnknownFieldError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("model '{model}' has no field '{field}'")]
pub struct UnknownFieldError {
    pub model: String,
    pub field: String,
}

///
/// Change
/// Old and new value of one field after a successful `set`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Change {
    pub field: String,
    pub old: Value,
    pub new: Value,
}

///
/// FieldEntry
///
/// One row of the serialization boundary: name, current value and the
/// declared type tag, yielded in schema order.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldEntry<'a> {
    pub name: &'a str,
    pub value: &'a Value,
    pub tag: &'a TypeSpec,
}

///
/// ModelInstance
///
/// Validated field values for one object of a concrete model. Every stored
/// value has passed its field's validation; a failed `set` leaves the
/// instance untouched.
///

#[derive(Clone, Debug)]
pub struct ModelInstance {
    id: ModelId,
    schema: Arc<ModelSchema>,
    values: Vec<Value>,
    changed: BTreeSet<usize>,
}

impl ModelInstance {
    /// Construct from named initial values; unset fields take their default.
    pub fn new<K, V>(
        schema: Arc<ModelSchema>,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ModelError>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        Self::with_id(ModelId::next(), schema, values)
    }

    /// Construct with every field at its default.
    pub fn with_defaults(schema: Arc<ModelSchema>) -> Result<Self, ModelError> {
        Self::new(schema, std::iter::empty::<(&str, Value)>())
    }

    pub(crate) fn with_id<K, V>(
        id: ModelId,
        schema: Arc<ModelSchema>,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ModelError>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        if !schema.kind().is_instantiable() {
            return Err(ModelError::NotInstantiable {
                model: schema.name().to_string(),
                kind: schema.kind(),
            });
        }

        let mut instance = Self {
            id,
            values: schema
                .fields()
                .iter()
                .map(|field| field.initial_value())
                .collect(),
            changed: BTreeSet::new(),
            schema,
        };

        for (name, value) in values {
            let index = instance.index_of(name.as_ref())?;
            let value = instance.check(index, &value.into())?;
            instance.values[index] = value;
            instance.changed.insert(index);
        }

        let missing: Vec<String> = instance
            .schema
            .fields()
            .iter()
            .zip(&instance.values)
            .filter(|(field, value)| field.is_required() && value.is_null())
            .map(|(field, _)| field.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ModelError::MissingRequired {
                model: instance.model().to_string(),
                fields: missing,
            });
        }

        sink::record(SchemaEvent::InstanceCreated {
            model: instance.model(),
        });

        Ok(instance)
    }

    //
    // accessors
    //

    #[must_use]
    pub const fn id(&self) -> ModelId {
        self.id
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    #[must_use]
    pub fn model(&self) -> &str {
        self.schema.name()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.index_of(name).map(|i| &self.values[i])
    }

    /// Non-owning handle for use in another instance's reference field.
    #[must_use]
    pub fn to_ref(&self) -> ModelRef {
        ModelRef::new(self.id, Arc::clone(&self.schema))
    }

    /// Every field in schema order with its declared type.
    pub fn fields(&self) -> impl Iterator<Item = FieldEntry<'_>> {
        self.schema
            .fields()
            .iter()
            .zip(&self.values)
            .map(|(field, value)| FieldEntry {
                name: field.name(),
                value,
                tag: field.ty(),
            })
    }

    /// References held anywhere in this instance's values, in schema order.
    #[must_use]
    pub fn references(&self) -> Vec<&ModelRef> {
        fn collect<'a>(value: &'a Value, out: &mut Vec<&'a ModelRef>) {
            match value {
                Value::Ref(r) => out.push(r),
                Value::List(items) | Value::Tuple(items) => {
                    for item in items {
                        collect(item, out);
                    }
                }
                _ => {}
            }
        }

        let mut out = Vec::new();
        for value in &self.values {
            collect(value, &mut out);
        }

        out
    }

    //
    // mutation
    //

    /// Validate and store one value.
    ///
    /// Returns the change when the stored value differs from the previous
    /// one. On error the previous value is kept.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<Option<Change>, ModelError> {
        let index = self.index_of(name)?;
        let value = self.check(index, &value.into())?;

        self.changed.insert(index);
        let old = std::mem::replace(&mut self.values[index], value);
        let changed = old != self.values[index];

        sink::record(SchemaEvent::FieldSet {
            model: self.schema.name(),
            field: name,
            changed,
        });

        Ok(changed.then(|| Change {
            field: name.to_string(),
            old,
            new: self.values[index].clone(),
        }))
    }

    /// Put one field back to its declared default and clear its changed mark.
    pub fn reset(&mut self, name: &str) -> Result<Option<Change>, ModelError> {
        let index = self.index_of(name)?;
        let default = self.schema.fields()[index].initial_value();

        self.changed.remove(&index);
        let old = std::mem::replace(&mut self.values[index], default);

        Ok((old != self.values[index]).then(|| Change {
            field: name.to_string(),
            old,
            new: self.values[index].clone(),
        }))
    }

    //
    // change tracking
    //

    /// True when the field was set explicitly since construction or reset.
    pub fn is_changed(&self, name: &str) -> Result<bool, ModelError> {
        let index = self.index_of(name)?;

        Ok(self.changed.contains(&index))
    }

    /// True when the field currently holds its declared default.
    pub fn is_default(&self, name: &str) -> Result<bool, ModelError> {
        let index = self.index_of(name)?;

        Ok(self.values[index] == self.schema.fields()[index].initial_value())
    }

    /// Explicitly set fields, in schema order.
    #[must_use]
    pub fn changed_fields(&self) -> Vec<&str> {
        self.changed
            .iter()
            .map(|&i| self.schema.fields()[i].name())
            .collect()
    }

    //
    // internals
    //

    fn index_of(&self, name: &str) -> Result<usize, UnknownFieldError> {
        self.schema
            .index_of(name)
            .ok_or_else(|| UnknownFieldError {
                model: self.schema.name().to_string(),
                field: name.to_string(),
            })
    }

    fn check(&self, index: usize, value: &Value) -> Result<Value, ModelError> {
        let field = &self.schema.fields()[index];

        field.validate(value).map_err(|source| {
            sink::record(SchemaEvent::ValidationFailed {
                model: self.schema.name(),
                field: field.name(),
            });

            ModelError::Validation {
                model: self.schema.name().to_string(),
                source,
            }
        })
    }
}

impl PartialEq for ModelInstance {
    /// Same model and same values; ids and change marks are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.model() == other.model() && self.values == other.values
    }
}
