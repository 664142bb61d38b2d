mod tag;

#[cfg(test)]
mod tests;

use crate::schema::ModelSchema;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

// re-exports
pub use tag::ValueTag;

///
/// ModelId
///
/// Process-unique identity of one model instance.
/// Reference fields and snapshots carry this instead of the instance itself.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct ModelId(u64);

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

impl ModelId {
    /// Allocate a fresh id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Rebuild an id read back from a snapshot.
    ///
    /// Later calls to [`ModelId::next`] never hand out this id.
    #[must_use]
    pub fn restore(raw: u64) -> Self {
        NEXT_MODEL_ID.fetch_max(raw.saturating_add(1), Ordering::Relaxed);

        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// ModelRef
///
/// Non-owning identity relation to another model instance: the target's id
/// plus the schema it was created from. Holding a `ModelRef` does not keep
/// the target instance alive.
///

#[derive(Clone)]
pub struct ModelRef {
    id: ModelId,
    schema: Arc<ModelSchema>,
}

impl ModelRef {
    #[must_use]
    pub const fn new(id: ModelId, schema: Arc<ModelSchema>) -> Self {
        Self { id, schema }
    }

    #[must_use]
    pub const fn id(&self) -> ModelId {
        self.id
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// Name of the referenced instance's model.
    #[must_use]
    pub fn model(&self) -> &str {
        self.schema.name()
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRef")
            .field("id", &self.id)
            .field("model", &self.model())
            .finish()
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.model() == other.model()
    }
}

///
/// Value
///
/// Dynamic property value.
///
/// Null  → unset; accepted by every non-required field.
/// Auto  → sentinel meaning "compute automatically" at render time.
///

#[derive(Clone, Debug, PartialEq)]
#[remain::sorted]
pub enum Value {
    Auto,
    Bool(bool),
    Float(f64),
    Int(i64),
    /// Homogeneous, variable-length sequence.
    List(Vec<Self>),
    Null,
    Ref(ModelRef),
    Text(String),
    /// Fixed-arity, positionally typed sequence.
    Tuple(Vec<Self>),
}

impl Value {
    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::canonical_tag(self)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_model_ref(&self) -> Option<&ModelRef> {
        match self {
            Self::Ref(r) => Some(r),
            _ => None,
        }
    }

    /// Elements of a tuple or list.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Build a tuple value from its elements.
    pub fn tuple(items: impl IntoIterator<Item = impl Into<Self>>) -> Self {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Build a list value from its elements.
    pub fn list(items: impl IntoIterator<Item = impl Into<Self>>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<ModelRef> for Value {
    fn from(r: ModelRef) -> Self {
        Self::Ref(r)
    }
}

impl<A, B> From<(A, B)> for Value
where
    A: Into<Self>,
    B: Into<Self>,
{
    fn from((a, b): (A, B)) -> Self {
        Self::Tuple(vec![a.into(), b.into()])
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Self>,
{
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}
