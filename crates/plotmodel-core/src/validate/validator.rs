use crate::{validate::ConstraintError, value::Value};
use std::fmt;

///
/// Validator
///
/// Extra constraint checked after a value passes its type check.
/// Validators ignore values they do not apply to (e.g. a range check sees
/// `Auto` in an `Either(Auto, Float)` field and lets it through).
///

#[derive(Clone, Debug, PartialEq)]
#[remain::sorted]
pub enum Validator {
    /// Text or sequence must have at least one element.
    NonEmpty,
    /// Number must be `>= 0`.
    NonNegative,
    /// Number must lie in `[min, max]`.
    Range { min: f64, max: f64 },
}

impl Validator {
    #[must_use]
    pub const fn range(min: f64, max: f64) -> Self {
        Self::Range { min, max }
    }

    /// Declaration-time sanity check on the validator's own parameters.
    pub(crate) fn check_declaration(&self) -> Result<(), String> {
        match self {
            Self::Range { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(format!("{self} has a non-finite bound"));
                }
                if min > max {
                    return Err(format!("{self} has min greater than max"));
                }

                Ok(())
            }
            Self::NonEmpty | Self::NonNegative => Ok(()),
        }
    }

    pub fn check(&self, field: &str, value: &Value) -> Result<(), ConstraintError> {
        let violation = match self {
            Self::NonEmpty => match value {
                Value::Text(s) if s.is_empty() => Some("must not be empty".to_string()),
                Value::List(items) | Value::Tuple(items) if items.is_empty() => {
                    Some("must not be empty".to_string())
                }
                _ => None,
            },
            Self::NonNegative => value
                .as_f64()
                .filter(|n| *n < 0.0)
                .map(|n| format!("{n} is negative")),
            Self::Range { min, max } => value
                .as_f64()
                .filter(|n| n < min || n > max)
                .map(|n| format!("{n} is outside [{min}, {max}]")),
        };

        match violation {
            Some(message) => Err(ConstraintError {
                field: field.to_string(),
                constraint: self.to_string(),
                message,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonEmpty => f.write_str("non-empty"),
            Self::NonNegative => f.write_str("non-negative"),
            Self::Range { min, max } => write!(f, "range [{min}, {max}]"),
        }
    }
}
