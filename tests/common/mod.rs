use mergeweave::{Callable, Value};

/// Shorthand for building a [`Value`] from a `json!` literal.
#[allow(dead_code)]
pub fn jv(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// Builds a mapping value from literal pairs.
#[allow(dead_code)]
pub fn map_of<const N: usize>(pairs: [(&str, Value); N]) -> Value {
    Value::from(mergeweave::Mapping::from_pairs(pairs))
}

/// A callable that ignores its arguments and returns a marker string.
#[allow(dead_code)]
pub fn marker_callable(marker: &'static str) -> Callable {
    Callable::new(move |_| Value::from(marker))
}

#[allow(dead_code)]
pub fn assert_entry(value: &Value, key: &str, expected: &Value) {
    assert_eq!(
        value.get(key),
        Some(expected),
        "expected entry '{key}' to equal {expected:?}, got: {:?}",
        value.get(key)
    );
}

#[allow(dead_code)]
pub fn assert_no_entry(value: &Value, key: &str) {
    assert!(
        value.get(key).is_none(),
        "expected no entry '{key}', got: {:?}",
        value.get(key)
    );
}

/// Opt-in tracing output for debugging test runs (RUST_LOG=trace).
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
