use crate::{
    instance::{ModelError, ModelInstance},
    obs::sink::{self, SchemaEvent},
    registry::SchemaRegistry,
    serialize::{self, SerializeError},
    value::{ModelId, ModelRef, Value},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// SnapshotError
///

#[derive(Debug, ThisError)]
pub enum SnapshotError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("reference {id} resolved to a '{actual}' instance, snapshot recorded '{expected}'")]
    ReferenceModelMismatch {
        id: ModelId,
        expected: String,
        actual: String,
    },

    #[error("snapshot model '{model}' is not registered")]
    UnknownModel { model: String },

    #[error("reference {id} to a '{model}' instance could not be resolved")]
    UnresolvedReference { id: ModelId, model: String },
}

///
/// SnapshotMode
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SnapshotMode {
    /// Every field, in schema order.
    #[default]
    All,
    /// Only fields set explicitly; the rest come back as defaults.
    Changed,
}

///
/// WireValue
///
/// Serializable mirror of `Value`. References are flattened to the
/// target's id and model name; [`Snapshot::restore`] resolves them again.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[remain::sorted]
pub enum WireValue {
    Auto,
    Bool(bool),
    Float(f64),
    Int(i64),
    List(Vec<Self>),
    Null,
    Ref { id: ModelId, model: String },
    Text(String),
    Tuple(Vec<Self>),
}

impl WireValue {
    fn into_value(self, resolver: &dyn ReferenceResolver) -> Result<Value, SnapshotError> {
        let value = match self {
            Self::Auto => Value::Auto,
            Self::Bool(b) => Value::Bool(b),
            Self::Float(f) => Value::Float(f),
            Self::Int(i) => Value::Int(i),
            Self::List(items) => Value::List(resolve_all(items, resolver)?),
            Self::Null => Value::Null,
            Self::Ref { id, model } => Value::Ref(resolve_ref(id, model, resolver)?),
            Self::Text(s) => Value::Text(s),
            Self::Tuple(items) => Value::Tuple(resolve_all(items, resolver)?),
        };

        Ok(value)
    }
}

impl From<&Value> for WireValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Auto => Self::Auto,
            Value::Bool(b) => Self::Bool(*b),
            Value::Float(f) => Self::Float(*f),
            Value::Int(i) => Self::Int(*i),
            Value::List(items) => Self::List(items.iter().map(Self::from).collect()),
            Value::Null => Self::Null,
            Value::Ref(r) => Self::Ref {
                id: r.id(),
                model: r.model().to_string(),
            },
            Value::Text(s) => Self::Text(s.clone()),
            Value::Tuple(items) => Self::Tuple(items.iter().map(Self::from).collect()),
        }
    }
}

fn resolve_all(
    items: Vec<WireValue>,
    resolver: &dyn ReferenceResolver,
) -> Result<Vec<Value>, SnapshotError> {
    items
        .into_iter()
        .map(|item| item.into_value(resolver))
        .collect()
}

fn resolve_ref(
    id: ModelId,
    model: String,
    resolver: &dyn ReferenceResolver,
) -> Result<ModelRef, SnapshotError> {
    let Some(resolved) = resolver.resolve(id) else {
        sink::record(SchemaEvent::ReferenceUnresolved { model: &model });

        return Err(SnapshotError::UnresolvedReference { id, model });
    };

    if resolved.model() != model {
        return Err(SnapshotError::ReferenceModelMismatch {
            id,
            expected: model,
            actual: resolved.model().to_string(),
        });
    }

    Ok(resolved)
}

///
/// FieldSnapshot
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FieldSnapshot {
    pub name: String,
    /// Declared type tag at snapshot time, e.g. `Tuple(Float, Float)`.
    pub tag: String,
    pub value: WireValue,
    pub changed: bool,
}

///
/// Snapshot
///
/// Flat, serde-serializable copy of one instance.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Snapshot {
    pub id: ModelId,
    pub model: String,
    pub fields: Vec<FieldSnapshot>,
}

impl Snapshot {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSnapshot> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Encode as CBOR.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        serialize::serialize(self)
    }

    /// Decode CBOR produced by [`Snapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError> {
        serialize::deserialize(bytes)
    }

    /// Rebuild a live instance against the schemas in `registry`.
    ///
    /// Every value is validated again, so a snapshot taken under an older
    /// schema either fits the current one or fails cleanly.
    pub fn restore(
        &self,
        registry: &SchemaRegistry,
        resolver: &dyn ReferenceResolver,
    ) -> Result<ModelInstance, SnapshotError> {
        let schema = registry
            .get(&self.model)
            .ok_or_else(|| SnapshotError::UnknownModel {
                model: self.model.clone(),
            })?;

        let values = self
            .fields
            .iter()
            .map(|f| {
                f.value
                    .clone()
                    .into_value(resolver)
                    .map(|value| (f.name.as_str(), value))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut instance = ModelInstance::with_id(ModelId::restore(self.id.get()), schema, values)?;

        // construction marks every supplied field; keep only the recorded ones
        let unchanged: Vec<usize> = self
            .fields
            .iter()
            .filter(|f| !f.changed)
            .filter_map(|f| instance.schema.index_of(&f.name))
            .collect();
        for index in unchanged {
            instance.changed.remove(&index);
        }

        sink::record(SchemaEvent::SnapshotRestored {
            model: instance.model(),
        });

        Ok(instance)
    }
}

impl ModelInstance {
    /// Flatten this instance into a [`Snapshot`].
    #[must_use]
    pub fn snapshot(&self, mode: SnapshotMode) -> Snapshot {
        let fields: Vec<FieldSnapshot> = self
            .schema
            .fields()
            .iter()
            .zip(&self.values)
            .enumerate()
            .filter(|(i, _)| mode == SnapshotMode::All || self.changed.contains(i))
            .map(|(i, (field, value))| FieldSnapshot {
                name: field.name().to_string(),
                tag: field.type_tag(),
                value: WireValue::from(value),
                changed: self.changed.contains(&i),
            })
            .collect();

        sink::record(SchemaEvent::SnapshotTaken {
            model: self.model(),
            fields: fields.len(),
        });

        Snapshot {
            id: self.id,
            model: self.model().to_string(),
            fields,
        }
    }
}

///
/// ReferenceResolver
///
/// Maps a flattened reference id back to a live `ModelRef`.
///

pub trait ReferenceResolver {
    fn resolve(&self, id: ModelId) -> Option<ModelRef>;
}

impl<F> ReferenceResolver for F
where
    F: Fn(ModelId) -> Option<ModelRef>,
{
    fn resolve(&self, id: ModelId) -> Option<ModelRef> {
        self(id)
    }
}

///
/// RefTable
/// In-memory resolver keyed by id.
///

#[derive(Clone, Debug, Default)]
pub struct RefTable {
    refs: BTreeMap<ModelId, ModelRef>,
}

impl RefTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, instance: &ModelInstance) {
        self.insert_ref(instance.to_ref());
    }

    pub fn insert_ref(&mut self, model_ref: ModelRef) {
        self.refs.insert(model_ref.id(), model_ref);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

impl ReferenceResolver for RefTable {
    fn resolve(&self, id: ModelId) -> Option<ModelRef> {
        self.refs.get(&id).cloned()
    }
}
