use crate::value::Value;
use derive_more::Display;

///
/// ValueTag
///
/// Stable value-variant tag used in diagnostics and type-mismatch messages.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ValueTag {
    Auto,
    Bool,
    Float,
    Int,
    List,
    Null,
    Ref,
    Text,
    Tuple,
}

impl ValueTag {
    /// Stable human-readable value kind label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Bool => "Bool",
            Self::Float => "Float",
            Self::Int => "Int",
            Self::List => "List",
            Self::Null => "Null",
            Self::Ref => "Ref",
            Self::Text => "Text",
            Self::Tuple => "Tuple",
        }
    }
}

#[must_use]
pub(super) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Auto => ValueTag::Auto,
        Value::Bool(_) => ValueTag::Bool,
        Value::Float(_) => ValueTag::Float,
        Value::Int(_) => ValueTag::Int,
        Value::List(_) => ValueTag::List,
        Value::Null => ValueTag::Null,
        Value::Ref(_) => ValueTag::Ref,
        Value::Text(_) => ValueTag::Text,
        Value::Tuple(_) => ValueTag::Tuple,
    }
}
