use crate::value::{ModelId, Value, ValueTag};

#[test]
fn restored_ids_are_never_reissued() {
    let far = ModelId::next().get() + 1_000;
    let restored = ModelId::restore(far);

    assert_eq!(restored.get(), far);
    assert!(ModelId::next().get() > far);
}

#[test]
fn fresh_ids_are_distinct() {
    let a = ModelId::next();
    let b = ModelId::next();

    assert_ne!(a, b);
}

#[test]
fn conversions_pick_expected_variants() {
    assert_eq!(Value::from(3), Value::Int(3));
    assert_eq!(Value::from(2.5), Value::Float(2.5));
    assert_eq!(Value::from("auto"), Value::Text("auto".to_string()));
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(
        Value::from((0.0, 100.0)),
        Value::Tuple(vec![Value::Float(0.0), Value::Float(100.0)])
    );
    assert_eq!(Value::list([1, 2]), Value::List(vec![Value::Int(1), Value::Int(2)]));
}

#[test]
fn numeric_view_widens_ints() {
    assert_eq!(Value::Int(4).as_f64(), Some(4.0));
    assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
    assert_eq!(Value::Text("4".into()).as_f64(), None);
}

#[test]
fn tags_match_variants() {
    assert_eq!(Value::Auto.tag(), ValueTag::Auto);
    assert_eq!(Value::tuple([1.0, 2.0]).tag().label(), "Tuple");
    assert_eq!(Value::Null.tag().to_string(), "Null");
}
