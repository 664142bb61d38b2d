use crate::{
    types::TypeSpec,
    validate::{AlternativeFailure, UnionValidationError, ValidationError},
    value::Value,
};

/// Try each alternative in declaration order; the first that accepts wins.
///
/// Order is significant: with `Either(Auto, Tuple(Float, Float))` the
/// sentinel is matched before any tuple-shaped fallback is considered.
pub(super) fn resolve(
    field: &str,
    spec: &TypeSpec,
    alternatives: &[TypeSpec],
    value: &Value,
) -> Result<Value, ValidationError> {
    let mut failures = Vec::with_capacity(alternatives.len());

    for alternative in alternatives {
        match alternative.validate(field, value) {
            Ok(resolved) => return Ok(resolved),
            Err(error) => failures.push(AlternativeFailure {
                alternative: alternative.to_string(),
                error,
            }),
        }
    }

    Err(UnionValidationError {
        field: field.to_string(),
        expected: spec.to_string(),
        actual: value.tag().label().to_string(),
        failures,
    }
    .into())
}
