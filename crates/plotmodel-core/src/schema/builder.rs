use crate::{
    error::ErrorTree,
    obs::sink::{self, SchemaEvent},
    schema::{
        DuplicateFieldError, FieldDescriptor, FieldOrigin, Include, ModelSchema, SchemaError,
        SchemaKind, field::normalize_help,
    },
    validate::naming,
    value::Value,
};
use std::{collections::BTreeMap, sync::Arc};

///
/// ModelSchemaBuilder
///
/// Unbuilt schema declaration. `build` consumes it, so a declaration can
/// only ever produce one schema.
///

#[derive(Debug)]
pub struct ModelSchemaBuilder {
    name: String,
    kind: SchemaKind,
    description: Option<String>,
    base: Option<Arc<ModelSchema>>,
    fields: Vec<FieldDescriptor>,
    includes: Vec<Include>,
    overrides: Vec<(String, Value)>,
}

impl ModelSchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SchemaKind::Concrete,
            description: None,
            base: None,
            fields: Vec::new(),
            includes: Vec::new(),
            overrides: Vec::new(),
        }
    }

    #[must_use]
    pub const fn kind(mut self, kind: SchemaKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl AsRef<str>) -> Self {
        self.description = Some(normalize_help(description.as_ref()));
        self
    }

    /// Inherit every resolved field of `base`, ahead of own fields.
    #[must_use]
    pub fn base(mut self, base: Arc<ModelSchema>) -> Self {
        self.base = Some(base);
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn include(mut self, include: Include) -> Self {
        self.includes.push(include);
        self
    }

    /// Replace the default of an inherited or included field.
    #[must_use]
    pub fn override_default(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.push((field.into(), value.into()));
        self
    }

    pub fn build(mut self) -> Result<ModelSchema, SchemaError> {
        // Phase 1: local declaration checks, all reported together.
        let mut errs = ErrorTree::new();
        errs.add_result(naming::validate_model_name(&self.name));
        for field in &mut self.fields {
            let field_errs = field.check_declaration();
            errs.merge_for(field.name().to_string(), field_errs);
        }
        for include in &self.includes {
            if let Err(e) = naming::validate_prefix(include.prefix()) {
                errs.add_for(format!("include of '{}'", include.group().name()), e);
            }
        }
        self.reject(errs)?;

        // Phase 2: flatten base → own → includes, rejecting collisions.
        let mut resolved = Resolved::default();
        if let Some(base) = &self.base {
            let origin = FieldOrigin::Base {
                model: base.name().to_string(),
            };
            for field in base.fields() {
                resolved.push(&self.name, field.clone(), origin.clone())?;
            }
        }
        for field in &self.fields {
            resolved.push(&self.name, field.clone(), FieldOrigin::Own)?;
        }
        for include in &self.includes {
            let origin = FieldOrigin::Include {
                prefix: include.prefix().to_string(),
                group: include.group().name().to_string(),
            };
            for field in include.fields() {
                resolved.push(&self.name, field, origin.clone())?;
            }
        }

        // Phase 3: prefixed names must still be valid identifiers.
        let mut errs = ErrorTree::new();
        for (field, origin) in resolved.fields.iter().zip(&resolved.origins) {
            if matches!(origin, FieldOrigin::Include { .. })
                && let Err(e) = naming::validate_field_name(field.name())
            {
                errs.add_for(field.name().to_string(), e);
            }
        }

        // Phase 4: default overrides.
        for (name, value) in std::mem::take(&mut self.overrides) {
            let Some(&i) = resolved.index.get(&name) else {
                return Err(SchemaError::UnknownOverride {
                    model: self.name,
                    field: name,
                });
            };
            match resolved.fields[i].validate(&value) {
                Ok(normalized) => resolved.fields[i] = resolved.fields[i].with_default(normalized),
                Err(e) => errs.add_for(name, format!("invalid default override: {e}")),
            }
        }
        self.reject(errs)?;

        sink::record(SchemaEvent::SchemaBuilt {
            model: &self.name,
            fields: resolved.fields.len(),
        });

        Ok(ModelSchema {
            name: self.name,
            kind: self.kind,
            description: self.description,
            base: self.base,
            own_fields: self.fields,
            includes: self.includes,
            fields: resolved.fields,
            origins: resolved.origins,
            index: resolved.index,
        })
    }

    fn reject(&self, errors: ErrorTree) -> Result<(), SchemaError> {
        errors
            .result()
            .map_err(|errors| SchemaError::InvalidDeclaration {
                model: self.name.clone(),
                errors,
            })
    }
}

///
/// Resolved
/// Flattened field list under construction.
///

#[derive(Default)]
struct Resolved {
    fields: Vec<FieldDescriptor>,
    origins: Vec<FieldOrigin>,
    index: BTreeMap<String, usize>,
}

impl Resolved {
    fn push(
        &mut self,
        model: &str,
        field: FieldDescriptor,
        origin: FieldOrigin,
    ) -> Result<(), DuplicateFieldError> {
        if let Some(&i) = self.index.get(field.name()) {
            return Err(DuplicateFieldError {
                model: model.to_string(),
                field: field.name().to_string(),
                first: self.origins[i].clone(),
                second: origin,
            });
        }

        self.index.insert(field.name().to_string(), self.fields.len());
        self.fields.push(field);
        self.origins.push(origin);

        Ok(())
    }
}
