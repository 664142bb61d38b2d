use super::{FILL_PROPS, LINE_PROPS};
use plotmodel_core::{
    schema::{FieldDescriptor, ModelSchema, SchemaError, SchemaKind},
    types::TypeSpec,
    validate::Validator,
    value::Value,
};

const LINE_JOINS: [&str; 3] = ["miter", "round", "bevel"];
const LINE_CAPS: [&str; 3] = ["butt", "round", "square"];

/// Stroke properties shared by every line-drawing model.
pub(super) fn line_props() -> Result<ModelSchema, SchemaError> {
    ModelSchema::builder(LINE_PROPS)
        .kind(SchemaKind::Mixin)
        .description("Properties for stroking lines.")
        .field(
            FieldDescriptor::new("line_color", TypeSpec::Color)
                .default("black")
                .help("The line stroke color."),
        )
        .field(
            FieldDescriptor::new("line_width", TypeSpec::float())
                .default(1)
                .validator(Validator::NonNegative)
                .help("The line stroke width, in screen units."),
        )
        .field(
            FieldDescriptor::new("line_alpha", TypeSpec::float())
                .default(1.0)
                .validator(Validator::range(0.0, 1.0))
                .help("The line stroke opacity, from 0 (transparent) to 1 (opaque)."),
        )
        .field(
            FieldDescriptor::new("line_join", TypeSpec::enumeration(LINE_JOINS))
                .default("miter")
                .help("How path segments are joined together."),
        )
        .field(
            FieldDescriptor::new("line_cap", TypeSpec::enumeration(LINE_CAPS))
                .default("butt")
                .help("How path end points are drawn."),
        )
        .field(
            FieldDescriptor::new("line_dash", TypeSpec::list(TypeSpec::int()))
                .default(Value::List(Vec::new()))
                .help(
                    "Alternating on/off lengths of the dash pattern, in screen units. \
                     Empty draws a solid line.",
                ),
        )
        .field(
            FieldDescriptor::new("line_dash_offset", TypeSpec::int())
                .default(0)
                .help("Distance into the dash pattern at which to start drawing."),
        )
        .build()
}

/// Fill properties shared by every area-drawing model.
pub(super) fn fill_props() -> Result<ModelSchema, SchemaError> {
    ModelSchema::builder(FILL_PROPS)
        .kind(SchemaKind::Mixin)
        .description("Properties for filling areas.")
        .field(
            FieldDescriptor::new("fill_color", TypeSpec::Color)
                .default("gray")
                .help("The fill color."),
        )
        .field(
            FieldDescriptor::new("fill_alpha", TypeSpec::float())
                .default(1.0)
                .validator(Validator::range(0.0, 1.0))
                .help("The fill opacity, from 0 (transparent) to 1 (opaque)."),
        )
        .build()
}
