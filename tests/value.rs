use mergeweave::{Callable, Foreign, Kind, Mapping, Tag, Value};
use serde_json::json;

mod common;
use common::*;

/********************
 * Classification
 ********************/

#[test]
fn test_kind_classification_is_total() {
    assert_eq!(Value::Null.kind(), Kind::Primitive);
    assert_eq!(Value::from(true).kind(), Kind::Primitive);
    assert_eq!(Value::from(1_i64).kind(), Kind::Primitive);
    assert_eq!(Value::from("s").kind(), Kind::Primitive);
    assert_eq!(Value::from(vec![Value::Null]).kind(), Kind::Array);
    assert_eq!(Value::mapping().kind(), Kind::Mapping);
    assert_eq!(Value::callable(|_| Value::Null).kind(), Kind::Invokable);
    assert_eq!(Value::Time(chrono::Utc::now()).kind(), Kind::SpecialBuiltin);
    assert_eq!(Value::foreign(1_u8).kind(), Kind::SpecialBuiltin);
}

#[test]
fn test_mergeable_is_mapping_or_invokable() {
    assert!(Value::mapping().is_mergeable());
    assert!(Value::callable(|_| Value::Null).is_mergeable());

    assert!(!Value::Null.is_mergeable());
    assert!(!Value::from(vec![]).is_mergeable());
    assert!(!Value::Time(chrono::Utc::now()).is_mergeable());
    assert!(!Value::foreign("x").is_mergeable());
}

#[test]
fn test_kind_display_names() {
    assert_eq!(Kind::Mapping.to_string(), "mapping");
    assert_eq!(Kind::SpecialBuiltin.to_string(), "special-builtin");
    assert_eq!(Kind::Invokable.as_str(), "invokable");
}

/********************
 * Conversions & accessors
 ********************/

#[test]
fn test_from_impls_cover_primitives() {
    assert_eq!(Value::from(3_i64), jv(json!(3)));
    assert_eq!(Value::from(3_u64), jv(json!(3)));
    assert_eq!(Value::from(1.5_f64), jv(json!(1.5)));
    assert_eq!(Value::from("s"), jv(json!("s")));
    assert_eq!(Value::from(String::from("s")), jv(json!("s")));
    assert_eq!(Value::from(false), jv(json!(false)));
}

#[test]
fn test_non_finite_floats_collapse_to_null() {
    assert_eq!(Value::from(f64::NAN), Value::Null);
    assert_eq!(Value::from(f64::INFINITY), Value::Null);
}

#[test]
fn test_get_reads_mappings_and_callable_props() {
    let map = jv(json!({"a": 1}));
    assert_eq!(map.get("a"), Some(&Value::from(1_i64)));
    assert_eq!(map.get("missing"), None);

    let callable = Value::Callable(
        Callable::new(|_| Value::Null).with_prop("a", Value::from(1_i64)),
    );
    assert_eq!(callable.get("a"), Some(&Value::from(1_i64)));

    assert_eq!(Value::from(1_i64).get("a"), None);
    assert_eq!(Value::from(vec![]).get("0"), None);
}

#[test]
fn test_as_accessors() {
    let mut map = jv(json!({"a": 1}));
    assert!(map.as_map().is_some());
    assert!(map.as_map_mut().is_some());
    assert!(map.as_array().is_none());

    let arr = jv(json!([1, 2]));
    assert_eq!(arr.as_array().map(<[Value]>::len), Some(2));

    assert_eq!(Value::from("s").as_str(), Some("s"));
    assert!(Value::from("s").as_callable().is_none());
}

/********************
 * Mapping
 ********************/

#[test]
fn test_mapping_entries_iterate_in_key_order() {
    let map = Mapping::from_pairs([
        ("zeta", Value::from(1_i64)),
        ("alpha", Value::from(2_i64)),
        ("mid", Value::from(3_i64)),
    ]);
    let keys: Vec<_> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["alpha", "mid", "zeta"]);
}

#[test]
fn test_mapping_insert_remove() {
    let mut map = Mapping::new();
    assert!(map.is_empty());

    assert_eq!(map.insert("a", Value::from(1_i64)), None);
    assert_eq!(map.insert("a", Value::from(2_i64)), Some(Value::from(1_i64)));
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("a"));

    assert_eq!(map.remove("a"), Some(Value::from(2_i64)));
    assert!(map.is_empty());
}

#[test]
fn test_mapping_with_only_tags_is_not_empty() {
    let mut map = Mapping::new();
    map.set_tag(Tag::new(), Value::from(1_i64));
    assert_eq!(map.len(), 0);
    assert_eq!(map.tag_count(), 1);
    assert!(!map.is_empty());
}

/********************
 * Tag identity
 ********************/

#[test]
fn test_tags_compare_by_identity() {
    let a = Tag::labeled("same");
    let b = Tag::labeled("same");
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
    assert_eq!(a.label(), Some("same"));
    assert_eq!(Tag::new().label(), None);
}

#[test]
fn test_tag_lookup_uses_identity() {
    let a = Tag::labeled("k");
    let imposter = Tag::labeled("k");

    let mut map = Mapping::new();
    map.set_tag(a.clone(), Value::from(1_i64));

    assert_eq!(map.get_tag(&a), Some(&Value::from(1_i64)));
    assert_eq!(map.get_tag(&imposter), None);
}

/********************
 * Callable & Foreign
 ********************/

#[test]
fn test_callable_invocation_and_equality() {
    let double = Callable::new(|args| match args.first() {
        Some(Value::Number(n)) => Value::from(n.as_i64().unwrap_or(0) * 2),
        _ => Value::Null,
    });

    assert_eq!(double.call(&[Value::from(21_i64)]), Value::from(42_i64));
    assert_eq!(double.call(&[]), Value::Null);

    let copy = double.clone();
    assert_eq!(double, copy);
    assert!(Callable::same_handler(&double, &copy));

    // Same behavior, different allocation: not equal.
    let other = marker_callable("x");
    assert_ne!(Value::Callable(other), Value::Callable(marker_callable("x")));
}

#[test]
fn test_callable_prop_divergence_breaks_equality() {
    let base = Callable::new(|_| Value::Null);
    let decorated = base.clone().with_prop("a", Value::from(1_i64));
    assert_ne!(base, decorated);
    assert!(Callable::same_handler(&base, &decorated));
}

#[test]
fn test_foreign_identity_and_downcast() {
    #[derive(Debug)]
    struct Pattern(&'static str);

    let a = Foreign::new(Pattern("^a"));
    let b = a.clone();
    assert_eq!(a, b);
    assert!(Foreign::ptr_eq(&a, &b));
    assert_eq!(a.downcast_ref::<Pattern>().unwrap().0, "^a");
    assert!(a.downcast_ref::<String>().is_none());
    assert!(a.type_name().contains("Pattern"));

    // Equal payloads in separate allocations are distinct values.
    assert_ne!(Foreign::new(Pattern("^a")), Foreign::new(Pattern("^a")));
}
