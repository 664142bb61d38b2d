use plotmodel::{
    core::{
        instance::{ModelError, RefTable},
        schema::SchemaError,
        validate::ValidationError,
    },
    models::{self, GRID, Models},
    prelude::*,
};
use proptest::prelude::*;
use std::sync::Arc;

fn local() -> (SchemaRegistry, Models) {
    let registry = SchemaRegistry::new();
    let models = models::declare(&registry).unwrap();

    (registry, models)
}

fn grid(models: &Models) -> ModelInstance {
    ModelInstance::with_defaults(Arc::clone(&models.grid)).unwrap()
}

///
/// Schema
///

#[test]
fn grid_field_order_is_base_own_then_includes() {
    let (_, models) = local();

    assert_eq!(
        models.grid.field_names(),
        vec![
            "level",
            "visible",
            "dimension",
            "bounds",
            "x_range_name",
            "y_range_name",
            "ticker",
            "grid_line_color",
            "grid_line_width",
            "grid_line_alpha",
            "grid_line_join",
            "grid_line_cap",
            "grid_line_dash",
            "grid_line_dash_offset",
            "band_fill_color",
            "band_fill_alpha",
        ]
    );
}

#[test]
fn included_help_names_each_field() {
    let (_, models) = local();

    assert_eq!(
        models.grid.field("grid_line_width").unwrap().help_text(),
        Some("The line width of the Grid lines.")
    );
    assert_eq!(
        models.grid.field("band_fill_alpha").unwrap().help_text(),
        Some("The fill alpha of alternating bands between Grid lines.")
    );
}

#[test]
fn bounds_type_tag_is_stable() {
    let (_, models) = local();

    assert_eq!(
        models.grid.field("bounds").unwrap().type_tag(),
        "Either(Auto, Tuple(Float, Float))"
    );
}

#[test]
fn mixins_are_not_registered() {
    let (registry, _) = local();

    assert!(registry.contains(GRID));
    assert!(!registry.contains("LineProps"));
    assert_eq!(registry.len(), 6);
}

#[test]
fn declaring_twice_into_one_registry_conflicts() {
    let (registry, _) = local();

    assert!(matches!(
        models::declare(&registry),
        Err(SchemaError::AlreadyRegistered { .. })
    ));
}

#[test]
fn global_models_are_declared_once() {
    let first = models::models().unwrap();
    let second = models::models().unwrap();

    assert!(Arc::ptr_eq(&first.grid, &second.grid));
    assert!(registry().contains(GRID));
}

///
/// Defaults
///

#[test]
fn omitted_fields_equal_declared_defaults() {
    let (_, models) = local();
    let grid = grid(&models);

    assert_eq!(grid.get("dimension"), Some(&Value::Int(0)));
    assert_eq!(grid.get("x_range_name"), Some(&Value::from("default")));
    assert_eq!(grid.get("y_range_name"), Some(&Value::from("default")));
    assert_eq!(grid.get("bounds"), Some(&Value::Auto));
    assert_eq!(grid.get("ticker"), Some(&Value::Null));
    assert_eq!(grid.get("level"), Some(&Value::from("overlay")));
    assert_eq!(grid.get("grid_line_color"), Some(&Value::from("#e5e5e5")));
    assert_eq!(grid.get("band_fill_color"), Some(&Value::Null));
    assert_eq!(grid.get("band_fill_alpha"), Some(&Value::Float(0.0)));
    assert_eq!(grid.get("grid_line_dash"), Some(&Value::List(Vec::new())));
}

///
/// Editing
///

#[test]
fn grid_and_band_props_are_independent() {
    let (_, models) = local();
    let mut grid = grid(&models);

    grid.set("grid_line_alpha", 0.5).unwrap();
    grid.set("band_fill_color", "lavender").unwrap();
    grid.set("band_fill_alpha", 0.1).unwrap();

    assert_eq!(grid.get("grid_line_alpha"), Some(&Value::Float(0.5)));
    assert_eq!(grid.get("grid_line_color"), Some(&Value::from("#e5e5e5")));
    assert_eq!(grid.get("band_fill_color"), Some(&Value::from("lavender")));
    assert_eq!(
        grid.changed_fields(),
        vec!["grid_line_alpha", "band_fill_color", "band_fill_alpha"]
    );
}

#[test]
fn bounds_accept_auto_or_pair() {
    let (_, models) = local();
    let mut grid = grid(&models);

    grid.set("bounds", (0.0, 100.0)).unwrap();
    assert_eq!(grid.get("bounds"), Some(&Value::tuple([0.0, 100.0])));

    grid.set("bounds", "auto").unwrap();
    assert_eq!(grid.get("bounds"), Some(&Value::Auto));
}

#[test]
fn invalid_bounds_report_every_alternative() {
    let (_, models) = local();
    let mut grid = grid(&models);
    grid.set("bounds", (0.0, 100.0)).unwrap();

    let err = grid.set("bounds", "invalid").unwrap_err();

    let Some(ValidationError::Union(union)) = err.validation() else {
        panic!("expected a union error");
    };
    assert_eq!(union.attempted(), vec!["Auto", "Tuple(Float, Float)"]);
    assert_eq!(grid.get("bounds"), Some(&Value::tuple([0.0, 100.0])));
}

#[test]
fn style_validators_apply_to_included_fields() {
    let (_, models) = local();
    let mut grid = grid(&models);

    assert!(grid.set("grid_line_alpha", 1.5).is_err());
    assert!(grid.set("grid_line_width", -1).is_err());
    assert!(grid.set("grid_line_join", "mitre").is_err());
    assert!(grid.set("dimension", 2).is_err());
    assert!(grid.set("band_fill_color", "not-a-color").is_err());
    assert!(grid.changed_fields().is_empty());
}

#[test]
fn ticker_accepts_any_concrete_ticker() {
    let (_, models) = local();
    let fixed = ModelInstance::new(
        Arc::clone(&models.fixed_ticker),
        [("ticks", Value::list([0, 10, 20]))],
    )
    .unwrap();
    let mut grid = grid(&models);

    grid.set("ticker", fixed.to_ref()).unwrap();

    let model = grid
        .get("ticker")
        .and_then(Value::as_model_ref)
        .map(|r| r.model());
    assert_eq!(model, Some("FixedTicker"));
}

#[test]
fn ticker_rejects_other_models_and_keeps_previous() {
    let (_, models) = local();
    let basic = ModelInstance::with_defaults(Arc::clone(&models.basic_ticker)).unwrap();
    let other = grid(&models);
    let mut grid = grid(&models);
    grid.set("ticker", basic.to_ref()).unwrap();

    let err = grid.set("ticker", other.to_ref()).unwrap_err();

    assert!(matches!(
        err,
        ModelError::Validation {
            source: ValidationError::Reference(_),
            ..
        }
    ));
    assert_eq!(grid.get("ticker"), Some(&Value::Ref(basic.to_ref())));
}

#[test]
fn tickers_cannot_be_instantiated_abstractly() {
    let (_, models) = local();

    assert!(ModelInstance::with_defaults(Arc::clone(&models.ticker)).is_err());
    assert!(ModelInstance::with_defaults(Arc::clone(&models.renderer)).is_err());
}

///
/// Snapshots
///

#[test]
fn grid_round_trips_with_its_ticker() {
    let (registry, models) = local();
    let ticker = ModelInstance::new(
        Arc::clone(&models.basic_ticker),
        [("mantissas", Value::list([1.0, 2.5, 5.0]))],
    )
    .unwrap();
    let grid = ModelInstance::new(
        Arc::clone(&models.grid),
        [
            ("dimension", Value::from(1)),
            ("bounds", Value::from((-1.0, 1.0))),
            ("ticker", Value::from(ticker.to_ref())),
            ("band_fill_color", Value::from("Lavender")),
        ],
    )
    .unwrap();

    let bytes = grid.snapshot(SnapshotMode::Changed).to_bytes().unwrap();
    let mut refs = RefTable::new();
    refs.insert(&ticker);
    let restored = Snapshot::from_bytes(&bytes)
        .unwrap()
        .restore(&registry, &refs)
        .unwrap();

    assert_eq!(restored, grid);
    assert_eq!(restored.get("band_fill_color"), Some(&Value::from("lavender")));
    assert_eq!(restored.changed_fields(), grid.changed_fields());
}

#[test]
fn snapshot_json_shape_lists_fields_in_schema_order() {
    let (_, models) = local();
    let grid = grid(&models);

    let json = serde_json::to_value(grid.snapshot(SnapshotMode::All)).unwrap();
    let names: Vec<_> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(names, models.grid.field_names());
    assert_eq!(json["model"], "Grid");
}

proptest! {
    #[test]
    fn finite_bounds_pairs_are_accepted(
        start in -1.0e12f64..1.0e12,
        end in -1.0e12f64..1.0e12,
    ) {
        let (_, models) = local();
        let mut grid = grid(&models);

        grid.set("bounds", (start, end)).unwrap();
        prop_assert_eq!(grid.get("bounds"), Some(&Value::tuple([start, end])));
    }
}
