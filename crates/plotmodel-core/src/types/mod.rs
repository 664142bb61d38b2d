//! Declared value types and the per-type validation rules.

mod color;
mod union;


use crate::{
    validate::{ReferenceTypeError, TypeError, ValidationError},
    value::Value,
};
use derive_more::Display;
use std::fmt;

/// String literal accepted as the `Auto` sentinel.
pub const AUTO_LITERAL: &str = "auto";

///
/// Primitive
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum Primitive {
    Bool,
    Float,
    Int,
    String,
}

impl Primitive {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Float | Self::Int)
    }

    // Int → Float widening is the only coercion; everything else is exact.
    #[allow(clippy::cast_precision_loss)]
    fn validate(self, field: &str, spec: &TypeSpec, value: &Value) -> Result<Value, ValidationError> {
        let mismatch = || TypeError::new(field, spec, value);

        match (self, value) {
            (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_))
            | (Self::String, Value::Text(_)) => Ok(value.clone()),
            (Self::Float, Value::Int(i)) => Ok(Value::Float(*i as f64)),
            (Self::Float, Value::Float(f)) if f.is_finite() => Ok(value.clone()),
            (Self::Float, Value::Float(f)) => {
                Err(mismatch().with_reason(format!("{f} is not finite")).into())
            }
            _ => Err(mismatch().into()),
        }
    }
}

///
/// TypeSpec
///
/// Declared type of one field. Composite variants nest; nesting depth is
/// bounded at schema build time.
///

#[derive(Clone, Debug, PartialEq)]
#[remain::sorted]
pub enum TypeSpec {
    /// The `Auto` sentinel (or the literal string `"auto"`).
    Auto,
    /// Named CSS color, `#rgb` / `#rrggbb` / `#rrggbbaa`, or an RGB(A) tuple.
    Color,
    /// One of a fixed set of string literals.
    Enum(Vec<String>),
    List(Box<Self>),
    Primitive(Primitive),
    /// Instance of the named model or of any model deriving from it.
    Reference(String),
    Tuple(Vec<Self>),
    /// Alternatives tried in declaration order ("Either").
    Union(Vec<Self>),
}

impl TypeSpec {
    //
    // constructors
    //

    #[must_use]
    pub const fn bool() -> Self {
        Self::Primitive(Primitive::Bool)
    }

    #[must_use]
    pub const fn int() -> Self {
        Self::Primitive(Primitive::Int)
    }

    #[must_use]
    pub const fn float() -> Self {
        Self::Primitive(Primitive::Float)
    }

    #[must_use]
    pub const fn string() -> Self {
        Self::Primitive(Primitive::String)
    }

    pub fn tuple(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Tuple(elements.into_iter().collect())
    }

    pub fn either(alternatives: impl IntoIterator<Item = Self>) -> Self {
        Self::Union(alternatives.into_iter().collect())
    }

    pub fn enumeration<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::Enum(values.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    pub fn instance(model: impl Into<String>) -> Self {
        Self::Reference(model.into())
    }

    //
    // inspection
    //

    /// Nesting depth; scalars are depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let children = match self {
            Self::List(inner) => inner.depth(),
            Self::Tuple(items) | Self::Union(items) => {
                items.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Auto | Self::Color | Self::Enum(_) | Self::Primitive(_) | Self::Reference(_) => 0,
        };

        children + 1
    }

    /// Model names referenced anywhere inside this type.
    #[must_use]
    pub fn referenced_models(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);

        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Reference(model) => out.push(model),
            Self::List(inner) => inner.collect_references(out),
            Self::Tuple(items) | Self::Union(items) => {
                for item in items {
                    item.collect_references(out);
                }
            }
            Self::Auto | Self::Color | Self::Enum(_) | Self::Primitive(_) => {}
        }
    }

    /// Declaration-time structural problems (empty unions, empty enums...).
    pub(crate) fn check_declaration(&self) -> Result<(), String> {
        match self {
            Self::Enum(values) if values.is_empty() => Err("Enum has no values".to_string()),
            Self::Union(alts) if alts.is_empty() => Err("Either has no alternatives".to_string()),
            Self::Reference(model) if model.is_empty() => {
                Err("Instance has an empty model name".to_string())
            }
            Self::List(inner) => inner.check_declaration(),
            Self::Tuple(items) | Self::Union(items) => {
                items.iter().try_for_each(Self::check_declaration)
            }
            _ => Ok(()),
        }
    }

    //
    // validation
    //

    /// Check `value` against this type, returning its normalized form.
    ///
    /// `Null` is never accepted here; nullability is a property of the
    /// field, not of the type.
    pub fn validate(&self, field: &str, value: &Value) -> Result<Value, ValidationError> {
        match self {
            Self::Auto => match value {
                Value::Auto => Ok(Value::Auto),
                Value::Text(s) if s == AUTO_LITERAL => Ok(Value::Auto),
                _ => Err(TypeError::new(field, self, value).into()),
            },
            Self::Color => color::validate(field, self, value),
            Self::Enum(allowed) => match value {
                Value::Text(s) if allowed.iter().any(|a| a == s) => Ok(value.clone()),
                Value::Text(s) => Err(TypeError::new(field, self, value)
                    .with_reason(format!("'{s}' is not an allowed value"))
                    .into()),
                _ => Err(TypeError::new(field, self, value).into()),
            },
            Self::List(element) => {
                let Some(items) = value.as_slice() else {
                    return Err(TypeError::new(field, self, value).into());
                };
                let items = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        element
                            .validate(field, item)
                            .map_err(|e| element_error(field, self, value, i, &e))
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Value::List(items))
            }
            Self::Primitive(p) => p.validate(field, self, value),
            Self::Reference(target) => match value {
                Value::Ref(r) if r.schema().derives_from(target) => Ok(value.clone()),
                Value::Ref(r) => Err(ReferenceTypeError {
                    field: field.to_string(),
                    expected: target.clone(),
                    actual: r.model().to_string(),
                }
                .into()),
                _ => Err(TypeError::new(field, self, value).into()),
            },
            Self::Tuple(elements) => {
                let Some(items) = value.as_slice() else {
                    return Err(TypeError::new(field, self, value).into());
                };
                if items.len() != elements.len() {
                    return Err(TypeError::new(field, self, value)
                        .with_reason(format!(
                            "expected {} elements, got {}",
                            elements.len(),
                            items.len()
                        ))
                        .into());
                }
                let items = elements
                    .iter()
                    .zip(items)
                    .enumerate()
                    .map(|(i, (spec, item))| {
                        spec.validate(field, item)
                            .map_err(|e| element_error(field, self, value, i, &e))
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Value::Tuple(items))
            }
            Self::Union(alternatives) => union::resolve(field, self, alternatives, value),
        }
    }
}

// Element failures inside a tuple/list surface as a TypeError on the
// containing type, with the inner failure as the reason.
fn element_error(
    field: &str,
    spec: &TypeSpec,
    value: &Value,
    index: usize,
    inner: &ValidationError,
) -> ValidationError {
    TypeError::new(field, spec, value)
        .with_reason(format!("element {index}: {inner}"))
        .into()
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[TypeSpec]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }

            Ok(())
        }

        match self {
            Self::Auto => f.write_str("Auto"),
            Self::Color => f.write_str("Color"),
            Self::Enum(values) => {
                f.write_str("Enum(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{v}'")?;
                }
                f.write_str(")")
            }
            Self::List(inner) => write!(f, "List({inner})"),
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Reference(model) => write!(f, "Instance({model})"),
            Self::Tuple(items) => {
                f.write_str("Tuple(")?;
                join(f, items)?;
                f.write_str(")")
            }
            Self::Union(items) => {
                f.write_str("Either(")?;
                join(f, items)?;
                f.write_str(")")
            }
        }
    }
}
