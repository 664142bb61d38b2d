use super::{GUIDE_RENDERER, RENDERER};
use plotmodel_core::{
    schema::{FieldDescriptor, ModelSchema, SchemaError, SchemaKind},
    types::TypeSpec,
};
use std::sync::Arc;

/// Render levels, back to front.
const RENDER_LEVELS: [&str; 6] = ["image", "underlay", "glyph", "annotation", "overlay", "tool"];

pub(super) fn renderer() -> Result<ModelSchema, SchemaError> {
    ModelSchema::builder(RENDERER)
        .kind(SchemaKind::Abstract)
        .description("Base for everything drawn on a plot canvas.")
        .field(
            FieldDescriptor::new("level", TypeSpec::enumeration(RENDER_LEVELS))
                .default("glyph")
                .help("The layer this renderer is drawn in."),
        )
        .field(
            FieldDescriptor::new("visible", TypeSpec::bool())
                .default(true)
                .help("Whether the renderer is drawn at all."),
        )
        .build()
}

/// Axes, grids and other plot furniture; drawn in the overlay level.
pub(super) fn guide_renderer(base: Arc<ModelSchema>) -> Result<ModelSchema, SchemaError> {
    ModelSchema::builder(GUIDE_RENDERER)
        .kind(SchemaKind::Abstract)
        .description("Base for renderers that draw plot guides such as axes and grids.")
        .base(base)
        .override_default("level", "overlay")
        .build()
}
