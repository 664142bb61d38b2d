use crate::{
    MAX_TYPE_DEPTH,
    error::ErrorTree,
    types::TypeSpec,
    validate::{TypeError, ValidationError, Validator, naming},
    value::Value,
};

///
/// FieldDescriptor
///
/// One typed attribute of a model: name, declared type, default,
/// validators and help text.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    ty: TypeSpec,
    default: Option<Value>,
    required: bool,
    validators: Vec<Validator>,
    help: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeSpec) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            required: false,
            validators: Vec::new(),
            help: None,
        }
    }

    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Reject `Null`; without a default the field must be supplied at
    /// construction.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    #[must_use]
    pub fn help(mut self, help: impl AsRef<str>) -> Self {
        self.help = Some(normalize_help(help.as_ref()));
        self
    }

    //
    // accessors
    //

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn ty(&self) -> &TypeSpec {
        &self.ty
    }

    /// Declared default, or `None` when the field starts unset.
    #[must_use]
    pub const fn declared_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The value an instance starts with when nothing was supplied.
    #[must_use]
    pub fn initial_value(&self) -> Value {
        self.default.clone().unwrap_or(Value::Null)
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Stable textual tag of the declared type, e.g. `Either(Auto, Tuple(Float, Float))`.
    #[must_use]
    pub fn type_tag(&self) -> String {
        self.ty.to_string()
    }

    //
    // validation
    //

    /// Check a candidate value and return its normalized form.
    ///
    /// Validating an already-normalized value returns it unchanged.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        if value.is_null() {
            return if self.required {
                Err(TypeError::new(&self.name, &self.ty, value)
                    .with_reason("field is required")
                    .into())
            } else {
                Ok(Value::Null)
            };
        }

        let value = self.ty.validate(&self.name, value)?;
        for validator in &self.validators {
            validator.check(&self.name, &value)?;
        }

        Ok(value)
    }

    /// Declaration checks; normalizes the default in place when it is valid.
    pub(crate) fn check_declaration(&mut self) -> ErrorTree {
        let mut errs = ErrorTree::new();

        errs.add_result(naming::validate_field_name(&self.name));
        errs.add_result(self.ty.check_declaration());

        let depth = self.ty.depth();
        if depth > MAX_TYPE_DEPTH {
            err!(
                errs,
                "type {} nests {depth} levels deep (max {MAX_TYPE_DEPTH})",
                self.ty
            );
        }

        for validator in &self.validators {
            errs.add_result(validator.check_declaration());
        }

        if let Some(default) = self.default.take() {
            match self.validate(&default) {
                Ok(normalized) => self.default = Some(normalized),
                Err(e) => {
                    err!(errs, "invalid default: {e}");
                    self.default = Some(default);
                }
            }
        }

        errs
    }

    /// Copy under a new name, optionally replacing the help text.
    pub(crate) fn renamed(&self, name: String, help: Option<String>) -> Self {
        Self {
            name,
            help: help.or_else(|| self.help.clone()),
            ..self.clone()
        }
    }

    pub(crate) fn with_default(&self, default: Value) -> Self {
        Self {
            default: Some(default),
            ..self.clone()
        }
    }
}

/// Collapse indented multi-line help into single-spaced prose.
pub(crate) fn normalize_help(help: &str) -> String {
    help.split_whitespace().collect::<Vec<_>>().join(" ")
}
