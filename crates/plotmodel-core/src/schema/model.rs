use crate::schema::{FieldDescriptor, FieldOrigin, Include, ModelSchemaBuilder, SchemaKind};
use std::{collections::BTreeMap, iter, sync::Arc};

///
/// ModelSchema
///
/// Immutable, resolved field set of one model class.
/// Resolved order is base fields, then own fields, then each include in
/// declaration order; that order drives construction and serialization.
///

#[derive(Debug)]
pub struct ModelSchema {
    pub(super) name: String,
    pub(super) kind: SchemaKind,
    pub(super) description: Option<String>,
    pub(super) base: Option<Arc<Self>>,
    pub(super) own_fields: Vec<FieldDescriptor>,
    pub(super) includes: Vec<Include>,
    pub(super) fields: Vec<FieldDescriptor>,
    pub(super) origins: Vec<FieldOrigin>,
    pub(super) index: BTreeMap<String, usize>,
}

impl ModelSchema {
    pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
        ModelSchemaBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> SchemaKind {
        self.kind
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn base(&self) -> Option<&Arc<Self>> {
        self.base.as_ref()
    }

    /// Fields declared directly on this model (before flattening).
    #[must_use]
    pub fn own_fields(&self) -> &[FieldDescriptor] {
        &self.own_fields
    }

    #[must_use]
    pub fn includes(&self) -> &[Include] {
        &self.includes
    }

    /// All resolved fields in schema order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldDescriptor::name).collect()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Where a resolved field was declared.
    #[must_use]
    pub fn origin_of(&self, name: &str) -> Option<&FieldOrigin> {
        self.index_of(name).map(|i| &self.origins[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// This schema followed by its base chain, nearest first.
    pub fn ancestry(&self) -> impl Iterator<Item = &Self> {
        iter::successors(Some(self), |schema| schema.base.as_deref())
    }

    /// True when this model is `model` or inherits from it.
    #[must_use]
    pub fn derives_from(&self, model: &str) -> bool {
        self.ancestry().any(|schema| schema.name == model)
    }
}
