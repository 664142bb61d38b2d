use super::{BASIC_TICKER, FIXED_TICKER, TICKER};
use plotmodel_core::{
    schema::{FieldDescriptor, ModelSchema, SchemaError, SchemaKind},
    types::TypeSpec,
    validate::Validator,
    value::Value,
};
use std::sync::Arc;

pub(super) fn ticker() -> Result<ModelSchema, SchemaError> {
    ModelSchema::builder(TICKER)
        .kind(SchemaKind::Abstract)
        .description("Computes tick locations along one plot dimension.")
        .field(
            FieldDescriptor::new("num_minor_ticks", TypeSpec::int())
                .default(5)
                .validator(Validator::NonNegative)
                .help("Number of minor ticks between adjacent major ticks."),
        )
        .field(
            FieldDescriptor::new("desired_num_ticks", TypeSpec::int())
                .default(6)
                .validator(Validator::NonNegative)
                .help("A target for the number of major ticks to produce."),
        )
        .build()
}

pub(super) fn basic_ticker(base: Arc<ModelSchema>) -> Result<ModelSchema, SchemaError> {
    ModelSchema::builder(BASIC_TICKER)
        .description("Ticks at multiples of mantissas scaled by powers of a base.")
        .base(base)
        .field(
            FieldDescriptor::new("base", TypeSpec::float())
                .default(10)
                .help("The multiplier between successive tick scales."),
        )
        .field(
            FieldDescriptor::new("mantissas", TypeSpec::list(TypeSpec::float()))
                .default(Value::list([1.0, 2.0, 5.0]))
                .validator(Validator::NonEmpty)
                .help("Acceptable leading values for tick locations."),
        )
        .field(
            FieldDescriptor::new("min_interval", TypeSpec::float())
                .default(0)
                .validator(Validator::NonNegative)
                .help("The smallest allowed interval between adjacent ticks."),
        )
        .build()
}

pub(super) fn fixed_ticker(base: Arc<ModelSchema>) -> Result<ModelSchema, SchemaError> {
    ModelSchema::builder(FIXED_TICKER)
        .description("Ticks at an explicit list of locations.")
        .base(base)
        .field(
            FieldDescriptor::new("ticks", TypeSpec::list(TypeSpec::float()))
                .default(Value::List(Vec::new()))
                .help("Locations of the major ticks, in data units."),
        )
        .build()
}
