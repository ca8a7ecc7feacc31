//! Recursive deep-assign over [`Value`]s.
//!
//! [`merge`] copies the entries of each source into a target, left to
//! right. Nested plain mappings are unioned key by key, arrays are
//! replaced wholesale with deep copies, and everything else is assigned
//! directly with the last write winning. Callables participate through
//! their attached property mappings.
//!
//! Sources are only read; the target (and mappings reachable from it)
//! is the sole thing mutated. Recursion depth is bounded by input depth:
//! the owned value model cannot express cyclic structures, so no visited
//! set is carried.
//!
//! # Examples
//!
//! ```
//! use mergeweave::{merge, Value};
//! use serde_json::json;
//!
//! let mut target = Value::from(json!({"b": {"c": {"d": "e"}}}));
//! merge(&mut target, &[Value::from(json!({"b": {"c": {"f": "g"}}}))]);
//! assert_eq!(target, Value::from(json!({"b": {"c": {"d": "e", "f": "g"}}})));
//! ```

use tracing::{debug, instrument, trace};

use crate::kind::Kind;
use crate::value::{Mapping, Value};

/// Keys never copied from a source. These identifiers manipulate the
/// delegation chain in the environment this data model interoperates
/// with; carrying them would let untrusted input poison shared
/// structure.
pub const UNSAFE_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

fn is_unsafe_key(key: &str) -> bool {
    UNSAFE_KEYS.contains(&key)
}

/// Deep-assigns `sources` into `target`, in place, left to right.
///
/// Target normalization before any merging:
/// - a primitive target adopts the first source as the new effective
///   target (that source is not merged again);
/// - a target that is still primitive afterwards becomes an empty
///   mapping;
/// - array and special-builtin targets cannot carry entries and are left
///   untouched.
///
/// Sources that are neither mappings nor callables are skipped silently.
/// This function never fails; see the module docs for the recursion
/// policy.
///
/// # Examples
///
/// ```
/// use mergeweave::{merge, Value};
/// use serde_json::json;
///
/// // A primitive target adopts the first source.
/// let mut target = Value::from(5_i64);
/// merge(&mut target, &[Value::from(json!({"a": 1}))]);
/// assert_eq!(target, Value::from(json!({"a": 1})));
///
/// // Non-mergeable sources are skipped, not an error.
/// let mut target = Value::from(json!({"a": 1}));
/// merge(&mut target, &[Value::from(5_i64)]);
/// assert_eq!(target, Value::from(json!({"a": 1})));
/// ```
#[instrument(level = "trace", skip_all, fields(sources = sources.len()))]
pub fn merge(target: &mut Value, sources: &[Value]) {
    let mut rest = sources;
    if target.kind() == Kind::Primitive {
        if let Some((first, tail)) = rest.split_first() {
            trace!(adopted = %first.kind(), "primitive target adopts first source");
            *target = first.clone();
            rest = tail;
        }
    }
    if target.kind() == Kind::Primitive {
        *target = Value::mapping();
    }

    let props = match target {
        Value::Map(map) => map,
        Value::Callable(callable) => callable.props_mut(),
        other => {
            trace!(kind = %other.kind(), "target cannot carry entries, left untouched");
            return;
        }
    };

    for source in rest {
        match source {
            Value::Map(map) => merge_mapping(props, map),
            Value::Callable(callable) => merge_mapping(props, callable.props()),
            other => trace!(kind = %other.kind(), "skipping non-mergeable source"),
        }
    }
}

/// Deep-assigns `sources` into a copy of `target` and returns it.
///
/// Identical semantics to [`merge`], without touching the original.
///
/// # Examples
/// ```
/// use mergeweave::{merged, Value};
/// use serde_json::json;
///
/// let base = Value::from(json!({"a": 1}));
/// let out = merged(&base, &[Value::from(json!({"b": 2}))]);
/// assert_eq!(out, Value::from(json!({"a": 1, "b": 2})));
/// assert_eq!(base, Value::from(json!({"a": 1})));
/// ```
#[must_use]
pub fn merged(target: &Value, sources: &[Value]) -> Value {
    let mut out = target.clone();
    merge(&mut out, sources);
    out
}

/// One shallow pass: copies `source`'s entries into `target`, recursing
/// into nested mappings, then copies the tag channel.
fn merge_mapping(target: &mut Mapping, source: &Mapping) {
    for (key, value) in source.iter() {
        if is_unsafe_key(key) {
            debug!(key = key.as_str(), "dropping unsafe key");
            continue;
        }
        match value {
            Value::Map(nested) => merge_into_slot(target, key, nested),
            Value::Array(items) => {
                target.insert(key.clone(), Value::Array(deep_copy_items(items)));
            }
            leaf => {
                target.insert(key.clone(), leaf.clone());
            }
        }
    }

    // Independent of the keyed loop: tagged entries are copied shallowly,
    // last write wins by tag identity.
    for (tag, value) in source.tags() {
        target.set_tag(tag.clone(), value.clone());
    }
}

/// Recurses a nested source mapping into `target[key]`, replacing the
/// slot with a fresh empty mapping first when it cannot receive entries.
fn merge_into_slot(target: &mut Mapping, key: &str, nested: &Mapping) {
    match target.get_mut(key) {
        Some(Value::Map(existing)) => merge_mapping(existing, nested),
        Some(Value::Callable(callable)) => merge_mapping(callable.props_mut(), nested),
        _ => {
            let mut fresh = Mapping::new();
            merge_mapping(&mut fresh, nested);
            target.insert(key.to_string(), Value::Map(fresh));
        }
    }
}

/// Deep copy for array assignment: mapping elements are rebuilt through
/// the merge step (unsafe keys filtered, tags copied), nested arrays are
/// copied recursively, other elements clone as-is.
fn deep_copy_items(items: &[Value]) -> Vec<Value> {
    items
        .iter()
        .map(|item| match item {
            Value::Map(map) => {
                let mut fresh = Mapping::new();
                merge_mapping(&mut fresh, map);
                Value::Map(fresh)
            }
            Value::Array(inner) => Value::Array(deep_copy_items(inner)),
            other => other.clone(),
        })
        .collect()
}
