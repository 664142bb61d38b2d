use crate::schema::{FieldDescriptor, ModelSchema, field::normalize_help};
use std::sync::Arc;

/// Suffix stripped by [`Include::from_attribute`] to derive a prefix.
const PROPS_SUFFIX: &str = "_props";

/// Placeholder substituted in include help templates.
const HELP_PLACEHOLDER: &str = "%s";

///
/// Include
///
/// Pulls every field of a group schema into a host schema under a prefix,
/// so unrelated models can share a style bundle without inheritance.
///

#[derive(Clone, Debug)]
pub struct Include {
    group: Arc<ModelSchema>,
    prefix: String,
    help: Option<String>,
}

impl Include {
    pub fn new(group: Arc<ModelSchema>, prefix: impl Into<String>) -> Self {
        Self {
            group,
            prefix: prefix.into(),
            help: None,
        }
    }

    /// Include the group's fields under their original names.
    #[must_use]
    pub fn unprefixed(group: Arc<ModelSchema>) -> Self {
        Self::new(group, "")
    }

    /// Derive the prefix from an attribute name: `grid_props` → `grid`.
    #[must_use]
    pub fn from_attribute(attribute: &str, group: Arc<ModelSchema>) -> Self {
        let prefix = attribute.strip_suffix(PROPS_SUFFIX).unwrap_or(attribute);

        Self::new(group, prefix)
    }

    /// Help template applied to every included field; `%s` becomes the
    /// field's human-readable name ("The %s of the Grid lines.").
    #[must_use]
    pub fn help(mut self, template: impl AsRef<str>) -> Self {
        self.help = Some(normalize_help(template.as_ref()));
        self
    }

    #[must_use]
    pub const fn group(&self) -> &Arc<ModelSchema> {
        &self.group
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn help_template(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The prefixed descriptors this include contributes, in group order.
    #[must_use]
    pub fn fields(&self) -> Vec<FieldDescriptor> {
        self.group
            .fields()
            .iter()
            .map(|field| {
                let help = self
                    .help
                    .as_deref()
                    .map(|template| render_help(template, field.name()));

                field.renamed(prefixed_name(&self.prefix, field.name()), help)
            })
            .collect()
    }
}

/// Prefix every field of `group`, keeping type, default, validators and help.
#[must_use]
pub fn include(group: &ModelSchema, prefix: &str) -> Vec<FieldDescriptor> {
    group
        .fields()
        .iter()
        .map(|field| field.renamed(prefixed_name(prefix, field.name()), None))
        .collect()
}

/// `prefix + "_" + name`, or `name` unchanged for an empty prefix.
#[must_use]
pub fn prefixed_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}_{name}")
    }
}

fn render_help(template: &str, field_name: &str) -> String {
    if template.contains(HELP_PLACEHOLDER) {
        template.replace(HELP_PLACEHOLDER, &field_name.replace('_', " "))
    } else {
        template.to_string()
    }
}
