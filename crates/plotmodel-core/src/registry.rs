use crate::{
    obs::sink::{self, SchemaEvent},
    schema::{ModelSchema, SchemaError, SchemaKind},
};
use std::{
    collections::BTreeMap,
    sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard},
};

///
/// RegisterPolicy
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RegisterPolicy {
    /// A name may be registered once.
    #[default]
    Reject,
    /// Swap in the new schema; holders of the old `Arc` keep the old one.
    Replace,
}

///
/// SchemaRegistry
///
/// Name-keyed table of built schemas. Writes are serialized by an internal
/// lock; registered schemas are immutable and shared as `Arc`s.
///

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<BTreeMap<String, Arc<ModelSchema>>>,
}

impl SchemaRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            schemas: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register under the schema's own name; fails if the name is taken.
    pub fn register(&self, schema: ModelSchema) -> Result<Arc<ModelSchema>, SchemaError> {
        self.register_with(schema, RegisterPolicy::Reject)
    }

    pub fn register_with(
        &self,
        schema: ModelSchema,
        policy: RegisterPolicy,
    ) -> Result<Arc<ModelSchema>, SchemaError> {
        if schema.kind() == SchemaKind::Mixin {
            sink::record(SchemaEvent::SchemaRejected {
                model: schema.name(),
            });

            return Err(SchemaError::NotRegistrable {
                model: schema.name().to_string(),
                kind: schema.kind(),
            });
        }

        self.insert(schema, policy)
    }

    fn insert(
        &self,
        schema: ModelSchema,
        policy: RegisterPolicy,
    ) -> Result<Arc<ModelSchema>, SchemaError> {
        // Map updates are single inserts, so a poisoned lock still guards a
        // consistent table.
        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);

        let replaced = schemas.contains_key(schema.name());
        if replaced && policy == RegisterPolicy::Reject {
            drop(schemas);
            sink::record(SchemaEvent::SchemaRejected {
                model: schema.name(),
            });

            return Err(SchemaError::AlreadyRegistered {
                model: schema.name().to_string(),
            });
        }

        let schema = Arc::new(schema);
        schemas.insert(schema.name().to_string(), Arc::clone(&schema));
        drop(schemas);

        sink::record(SchemaEvent::SchemaRegistered {
            model: schema.name(),
            replaced,
        });

        Ok(schema)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<ModelSchema>> {
        self.read().get(name).cloned()
    }

    /// Like [`get`](Self::get), but a missing name is an error.
    pub fn require(&self, name: &str) -> Result<Arc<ModelSchema>, SchemaError> {
        self.get(name).ok_or_else(|| SchemaError::UnknownModel {
            model: name.to_string(),
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Registered schemas deriving from `model` (itself included).
    #[must_use]
    pub fn subtypes_of(&self, model: &str) -> Vec<Arc<ModelSchema>> {
        self.read()
            .values()
            .filter(|schema| schema.derives_from(model))
            .cloned()
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Arc<ModelSchema>>> {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner)
    }
}

///
/// REGISTRY
/// the process-wide table
///

static REGISTRY: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::new);

/// The process-wide schema registry.
#[must_use]
pub fn registry() -> &'static SchemaRegistry {
    &REGISTRY
}
