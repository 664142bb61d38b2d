use super::{GRID, TICKER};
use plotmodel_core::{
    schema::{FieldDescriptor, Include, ModelSchema, SchemaError},
    types::TypeSpec,
    validate::Validator,
    value::Value,
};
use std::sync::Arc;

///
/// Grid
///
/// Horizontal or vertical grid lines placed at the locations a `Ticker`
/// supplies, with optional fills between alternating lines.
///

pub(super) fn grid(
    base: Arc<ModelSchema>,
    line_props: Arc<ModelSchema>,
    fill_props: Arc<ModelSchema>,
) -> Result<ModelSchema, SchemaError> {
    ModelSchema::builder(GRID)
        .description(
            "Displays horizontal or vertical grid lines at the locations \
             computed by a supplied ticker.",
        )
        .base(base)
        .field(
            FieldDescriptor::new("dimension", TypeSpec::int())
                .default(0)
                .validator(Validator::range(0.0, 1.0))
                .help(
                    "The dimension the grid lines cross. Dimension 0 is the x-axis \
                     (vertical lines), dimension 1 is the y-axis (horizontal lines).",
                ),
        )
        .field(
            FieldDescriptor::new(
                "bounds",
                TypeSpec::either([
                    TypeSpec::Auto,
                    TypeSpec::tuple([TypeSpec::float(), TypeSpec::float()]),
                ]),
            )
            .default(Value::Auto)
            .help(
                "Start and end of the drawn grid lines, in data units. Auto spans \
                 the whole plot along the grid's dimension.",
            ),
        )
        // both range names matter when grid lines follow a path
        .field(
            FieldDescriptor::new("x_range_name", TypeSpec::string())
                .default("default")
                .help(
                    "Name of the x-range used to map grid locations to the screen. \
                     Unset uses the plot's default x-range.",
                ),
        )
        .field(
            FieldDescriptor::new("y_range_name", TypeSpec::string())
                .default("default")
                .help(
                    "Name of the y-range used to map grid locations to the screen. \
                     Unset uses the plot's default y-range.",
                ),
        )
        .field(
            FieldDescriptor::new("ticker", TypeSpec::instance(TICKER))
                .help("The ticker that computes grid line locations."),
        )
        .include(
            Include::from_attribute("grid_props", line_props).help("The %s of the Grid lines."),
        )
        .include(
            Include::from_attribute("band_props", fill_props)
                .help("The %s of alternating bands between Grid lines."),
        )
        .override_default("grid_line_color", "#e5e5e5")
        .override_default("band_fill_alpha", 0)
        .override_default("band_fill_color", Value::Null)
        .build()
}
