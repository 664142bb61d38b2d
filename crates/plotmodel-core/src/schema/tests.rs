use crate::{
    schema::{
        FieldDescriptor, FieldOrigin, Include, ModelSchema, SchemaError, SchemaKind, include,
        prefixed_name,
    },
    types::TypeSpec,
    validate::Validator,
    value::Value,
};
use std::sync::Arc;

fn color_group() -> Arc<ModelSchema> {
    Arc::new(
        ModelSchema::builder("ColorProps")
            .kind(SchemaKind::Mixin)
            .field(FieldDescriptor::new("color", TypeSpec::Color).default("gray"))
            .build()
            .unwrap(),
    )
}

fn line_group() -> Arc<ModelSchema> {
    Arc::new(
        ModelSchema::builder("LineProps")
            .kind(SchemaKind::Mixin)
            .field(FieldDescriptor::new("line_color", TypeSpec::Color).default("black"))
            .field(
                FieldDescriptor::new("line_width", TypeSpec::float())
                    .default(1)
                    .validator(Validator::NonNegative),
            )
            .build()
            .unwrap(),
    )
}

fn renderer() -> Arc<ModelSchema> {
    Arc::new(
        ModelSchema::builder("Renderer")
            .kind(SchemaKind::Abstract)
            .field(FieldDescriptor::new("visible", TypeSpec::bool()).default(true))
            .build()
            .unwrap(),
    )
}

///
/// Includes
///

#[test]
fn two_prefixed_includes_of_one_group_stay_distinct() {
    let schema = ModelSchema::builder("Plot")
        .include(Include::new(color_group(), "grid"))
        .include(Include::new(color_group(), "band"))
        .build()
        .unwrap();

    assert_eq!(schema.field_names(), vec!["grid_color", "band_color"]);
    assert_eq!(
        schema.origin_of("band_color"),
        Some(&FieldOrigin::Include {
            prefix: "band".to_string(),
            group: "ColorProps".to_string(),
        })
    );
    assert!(!schema.contains("color"));
}

#[test]
fn included_fields_keep_type_default_and_validators() {
    let schema = ModelSchema::builder("Axis")
        .include(Include::from_attribute("axis_props", line_group()))
        .build()
        .unwrap();

    let width = schema.field("axis_line_width").unwrap();
    assert_eq!(width.ty(), &TypeSpec::float());
    assert_eq!(width.declared_default(), Some(&Value::Float(1.0)));
    assert_eq!(width.validators(), &[Validator::NonNegative]);
}

#[test]
fn help_template_names_the_included_field() {
    let schema = ModelSchema::builder("Grid")
        .include(Include::from_attribute("grid_props", line_group()).help("The %s of the Grid lines."))
        .build()
        .unwrap();

    assert_eq!(
        schema.field("grid_line_color").unwrap().help_text(),
        Some("The line color of the Grid lines.")
    );
}

#[test]
fn unprefixed_include_keeps_names() {
    let schema = ModelSchema::builder("Patch")
        .include(Include::unprefixed(line_group()))
        .build()
        .unwrap();

    assert_eq!(schema.field_names(), vec!["line_color", "line_width"]);
}

#[test]
fn free_include_function_prefixes_descriptors() {
    let fields = include(&line_group(), "minor");
    let names: Vec<_> = fields.iter().map(FieldDescriptor::name).collect();

    assert_eq!(names, vec!["minor_line_color", "minor_line_width"]);
    assert_eq!(prefixed_name("", "x"), "x");
}

///
/// Collisions
///

#[test]
fn own_field_colliding_with_include_is_rejected() {
    let err = ModelSchema::builder("Plot")
        .field(FieldDescriptor::new("grid_color", TypeSpec::string()))
        .include(Include::new(color_group(), "grid"))
        .build()
        .unwrap_err();

    let SchemaError::DuplicateField(dup) = err else {
        panic!("expected a duplicate field error");
    };
    assert_eq!(dup.field, "grid_color");
    assert_eq!(dup.first, FieldOrigin::Own);
    assert!(matches!(dup.second, FieldOrigin::Include { .. }));
}

#[test]
fn same_prefix_twice_is_rejected() {
    let err = ModelSchema::builder("Plot")
        .include(Include::new(color_group(), "grid"))
        .include(Include::new(color_group(), "grid"))
        .build()
        .unwrap_err();

    assert!(matches!(err, SchemaError::DuplicateField(_)));
}

#[test]
fn own_field_shadowing_base_is_rejected() {
    let err = ModelSchema::builder("Glyph")
        .base(renderer())
        .field(FieldDescriptor::new("visible", TypeSpec::bool()))
        .build()
        .unwrap_err();

    let SchemaError::DuplicateField(dup) = err else {
        panic!("expected a duplicate field error");
    };
    assert_eq!(
        dup.first,
        FieldOrigin::Base {
            model: "Renderer".to_string()
        }
    );
}

///
/// Inheritance
///

#[test]
fn base_fields_come_first_then_own_then_includes() {
    let schema = ModelSchema::builder("Grid")
        .base(renderer())
        .field(FieldDescriptor::new("dimension", TypeSpec::int()).default(0))
        .include(Include::new(color_group(), "grid"))
        .build()
        .unwrap();

    assert_eq!(schema.field_names(), vec!["visible", "dimension", "grid_color"]);
    assert_eq!(schema.own_fields().len(), 1);
    assert_eq!(schema.index_of("grid_color"), Some(2));
}

#[test]
fn ancestry_walks_the_base_chain() {
    let guide = Arc::new(
        ModelSchema::builder("GuideRenderer")
            .kind(SchemaKind::Abstract)
            .base(renderer())
            .build()
            .unwrap(),
    );
    let grid = ModelSchema::builder("Grid").base(guide).build().unwrap();

    let names: Vec<_> = grid.ancestry().map(ModelSchema::name).collect();
    assert_eq!(names, vec!["Grid", "GuideRenderer", "Renderer"]);
    assert!(grid.derives_from("Renderer"));
    assert!(!grid.derives_from("Ticker"));
}

///
/// Overrides
///

#[test]
fn override_replaces_inherited_and_included_defaults() {
    let schema = ModelSchema::builder("Grid")
        .base(renderer())
        .include(Include::new(color_group(), "band"))
        .override_default("visible", false)
        .override_default("band_color", Value::Null)
        .build()
        .unwrap();

    assert_eq!(
        schema.field("visible").unwrap().declared_default(),
        Some(&Value::Bool(false))
    );
    assert_eq!(schema.field("band_color").unwrap().initial_value(), Value::Null);
}

#[test]
fn override_of_unknown_field_is_rejected() {
    let err = ModelSchema::builder("Grid")
        .override_default("nope", 1)
        .build()
        .unwrap_err();

    assert!(matches!(err, SchemaError::UnknownOverride { ref field, .. } if field == "nope"));
}

#[test]
fn invalid_override_value_is_a_declaration_error() {
    let err = ModelSchema::builder("Grid")
        .base(renderer())
        .override_default("visible", "yes")
        .build()
        .unwrap_err();

    assert!(matches!(err, SchemaError::InvalidDeclaration { .. }));
}

///
/// Declaration checks
///

#[test]
fn declaration_problems_are_reported_together() {
    let err = ModelSchema::builder("Grid")
        .field(FieldDescriptor::new("Bad", TypeSpec::int()))
        .field(FieldDescriptor::new("dimension", TypeSpec::int()).default("x"))
        .build()
        .unwrap_err();

    let SchemaError::InvalidDeclaration { model, errors } = err else {
        panic!("expected an invalid declaration");
    };
    assert_eq!(model, "Grid");
    assert_eq!(errors.len(), 2);

    let routes: Vec<_> = errors.flatten().into_iter().map(|(route, _)| route).collect();
    assert_eq!(routes, vec!["Bad", "dimension"]);
}

#[test]
fn defaults_are_normalized_at_build() {
    let schema = ModelSchema::builder("Range")
        .field(FieldDescriptor::new("start", TypeSpec::float()).default(0))
        .field(
            FieldDescriptor::new(
                "bounds",
                TypeSpec::either([TypeSpec::Auto, TypeSpec::tuple([TypeSpec::float(), TypeSpec::float()])]),
            )
            .default("auto"),
        )
        .build()
        .unwrap();

    assert_eq!(
        schema.field("start").unwrap().declared_default(),
        Some(&Value::Float(0.0))
    );
    assert_eq!(schema.field("bounds").unwrap().initial_value(), Value::Auto);
}

#[test]
fn overly_nested_types_are_rejected() {
    let mut ty = TypeSpec::int();
    for _ in 0..crate::MAX_TYPE_DEPTH {
        ty = TypeSpec::list(ty);
    }

    let err = ModelSchema::builder("Deep")
        .field(FieldDescriptor::new("values", ty))
        .build()
        .unwrap_err();

    assert!(err.to_string().contains("levels deep"));
}

#[test]
fn prefixed_names_must_remain_valid() {
    let err = ModelSchema::builder("Plot")
        .include(Include::new(color_group(), "Grid"))
        .build()
        .unwrap_err();

    assert!(matches!(err, SchemaError::InvalidDeclaration { .. }));
}

#[test]
fn help_is_collapsed_to_single_spaces() {
    let field = FieldDescriptor::new("dimension", TypeSpec::int()).help(
        "
        Which dimension the Grid lines will
        intersect. 0 is x, 1 is y.
        ",
    );

    assert_eq!(
        field.help_text(),
        Some("Which dimension the Grid lines will intersect. 0 is x, 1 is y.")
    );
    assert_eq!(field.type_tag(), "Int");
}

#[test]
fn schema_kind_labels() {
    assert_eq!(SchemaKind::Mixin.to_string(), "mixin");
    assert!(SchemaKind::default().is_instantiable());
    assert!(!SchemaKind::Abstract.is_instantiable());
}
