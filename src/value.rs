//! The dynamic value model operated on by [`merge`](crate::merge::merge).
//!
//! [`Value`] is a closed enum covering everything a merge can encounter:
//! JSON-style primitives, arrays, plain [`Mapping`]s, timestamps, opaque
//! [`Foreign`] payloads, and annotated [`Callable`]s. Mappings carry two
//! channels: ordered string-keyed entries and an identity-keyed [`Tag`]
//! side channel.
//!
//! # Examples
//!
//! ```
//! use mergeweave::{Mapping, Value};
//!
//! let mut profile = Mapping::new();
//! profile.insert("name", Value::from("Alice"));
//! profile.insert("age", Value::from(30_i64));
//!
//! let value = Value::from(profile);
//! assert_eq!(value.get("name"), Some(&Value::from("Alice")));
//! ```

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

/// A dynamic value.
///
/// `Value` is the receiver and payload type for every merge operation.
/// Cloning is deep for structural variants (`Array`, `Map`) and shared for
/// payload variants (`Callable` handlers, `Foreign` payloads), which keep
/// their identity across clones.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absent/empty value. Assigned explicitly during merges, never
    /// treated as "no entry".
    #[default]
    Null,
    /// Boolean primitive.
    Bool(bool),
    /// Numeric primitive (integer or float, see [`serde_json::Number`]).
    Number(Number),
    /// String primitive.
    String(String),
    /// Ordered sequence. Replaced wholesale during merges, never merged
    /// element-by-element.
    Array(Vec<Value>),
    /// Plain mapping: the recursive merge target.
    Map(Mapping),
    /// Annotated callable: a shared handler plus an attached property
    /// mapping. Valid merge target and source.
    Callable(Callable),
    /// Timestamp. Assigned directly as a leaf, never recursed into.
    Time(DateTime<Utc>),
    /// Opaque host payload with reference identity. Assigned directly as
    /// a leaf; clones share the payload.
    Foreign(Foreign),
}

impl Value {
    /// Creates an empty plain mapping value.
    ///
    /// # Examples
    /// ```
    /// use mergeweave::{Kind, Value};
    ///
    /// let v = Value::mapping();
    /// assert_eq!(v.kind(), Kind::Mapping);
    /// ```
    #[must_use]
    pub fn mapping() -> Self {
        Value::Map(Mapping::new())
    }

    /// Wraps a handler into a callable value with no attached properties.
    pub fn callable<F>(handler: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Callable(Callable::new(handler))
    }

    /// Wraps an arbitrary host payload into a foreign value.
    pub fn foreign<T: Any + Send + Sync>(payload: T) -> Self {
        Value::Foreign(Foreign::new(payload))
    }

    /// Looks up a string-keyed entry on a mapping or on a callable's
    /// attached properties. Returns `None` for every other kind.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            Value::Callable(callable) => callable.props().get(key),
            _ => None,
        }
    }

    /// Borrows the underlying mapping, if this value is one.
    #[must_use]
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Mutably borrows the underlying mapping, if this value is one.
    pub fn as_map_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrows the underlying array, if this value is one.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrows the underlying callable, if this value is one.
    #[must_use]
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(callable) => Some(callable),
            _ => None,
        }
    }

    /// Borrows the underlying string, if this value is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no dynamic representation and collapse to
    /// [`Value::Null`].
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Map(map)
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Value::Callable(callable)
    }
}

impl From<Foreign> for Value {
    fn from(foreign: Foreign) -> Self {
        Value::Foreign(foreign)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

/// A plain mapping: ordered string-keyed entries plus an identity-keyed
/// tag side channel.
///
/// String entries iterate in deterministic (lexicographic) key order.
/// The tag channel holds entries keyed by [`Tag`] identity; merges copy
/// it shallowly and never recurse into tagged values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    entries: BTreeMap<String, Value>,
    tags: FxHashMap<Tag, Value>,
}

impl Mapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mapping from `(key, value)` pairs.
    ///
    /// # Examples
    /// ```
    /// use mergeweave::{Mapping, Value};
    ///
    /// let map = Mapping::from_pairs([("a", Value::from(1_i64))]);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.insert(key, value);
        }
        map
    }

    /// Inserts a string-keyed entry, returning the previous value if any.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Removes a string-keyed entry.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of string-keyed entries (tags not included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when both the entry and tag channels are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.tags.is_empty()
    }

    /// Iterates string-keyed entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Iterates string keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Sets a tagged entry, returning the previous value for that tag.
    pub fn set_tag(&mut self, tag: Tag, value: Value) -> Option<Value> {
        self.tags.insert(tag, value)
    }

    /// Looks up a tagged entry by tag identity.
    #[must_use]
    pub fn get_tag(&self, tag: &Tag) -> Option<&Value> {
        self.tags.get(tag)
    }

    /// Iterates the tag channel in unspecified order.
    pub fn tags(&self) -> impl Iterator<Item = (&Tag, &Value)> {
        self.tags.iter()
    }

    /// Number of tagged entries.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// An identity key for the mapping tag channel.
///
/// Each `Tag` created with [`Tag::new`] or [`Tag::labeled`] is unique:
/// two tags compare equal only when one is a clone of the other. The
/// optional label is diagnostic only and does not participate in
/// equality.
///
/// # Examples
/// ```
/// use mergeweave::Tag;
///
/// let a = Tag::labeled("session");
/// let b = Tag::labeled("session");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tag {
    id: Uuid,
    label: Option<String>,
}

impl Tag {
    /// Creates a fresh unlabeled tag.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            label: None,
        }
    }

    /// Creates a fresh tag with a diagnostic label.
    pub fn labeled<S: Into<String>>(label: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: Some(label.into()),
        }
    }

    /// The diagnostic label, if one was given.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Default for Tag {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tag {}

impl std::hash::Hash for Tag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// The handler signature shared by all callables.
pub type Handler = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// An annotated callable: a shared handler plus an attached property
/// mapping.
///
/// Callables participate in merges through their `props` mapping, while
/// the handler itself is opaque: merging attaches or unions properties
/// without touching invocability. Clones share the handler (identity is
/// preserved) and copy the properties.
///
/// # Examples
/// ```
/// use mergeweave::{Callable, Value};
///
/// let double = Callable::new(|args| match args.first() {
///     Some(Value::Number(n)) => Value::from(n.as_i64().unwrap_or(0) * 2),
///     _ => Value::Null,
/// });
/// assert_eq!(double.call(&[Value::from(21_i64)]), Value::from(42_i64));
/// ```
#[derive(Clone)]
pub struct Callable {
    handler: Handler,
    props: Mapping,
}

impl Callable {
    /// Wraps a handler with an empty property mapping.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            props: Mapping::new(),
        }
    }

    /// Invokes the handler.
    #[must_use]
    pub fn call(&self, args: &[Value]) -> Value {
        (self.handler)(args)
    }

    /// Attached properties.
    #[must_use]
    pub fn props(&self) -> &Mapping {
        &self.props
    }

    /// Mutable access to the attached properties.
    pub fn props_mut(&mut self) -> &mut Mapping {
        &mut self.props
    }

    /// Builder-style property attachment.
    ///
    /// # Examples
    /// ```
    /// use mergeweave::{Callable, Value};
    ///
    /// let f = Callable::new(|_| Value::Null).with_prop("name", Value::from("noop"));
    /// assert_eq!(f.props().get("name"), Some(&Value::from("noop")));
    /// ```
    #[must_use]
    pub fn with_prop<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.props.insert(key, value);
        self
    }

    /// True when both callables share the same handler allocation.
    #[must_use]
    pub fn same_handler(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.handler, &b.handler)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler) && self.props == other.props
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

/// An opaque host payload with reference identity.
///
/// `Foreign` wraps values the merge algorithm must carry but never
/// inspect: the analogs of host-environment built-ins and user-defined
/// instances. Clones share the payload; equality is payload identity.
///
/// # Examples
/// ```
/// use mergeweave::Foreign;
///
/// #[derive(Debug)]
/// struct Pattern(String);
///
/// let a = Foreign::new(Pattern("^a".into()));
/// let b = a.clone();
/// assert_eq!(a, b);
/// assert_eq!(a.downcast_ref::<Pattern>().unwrap().0, "^a");
/// ```
#[derive(Clone)]
pub struct Foreign {
    payload: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Foreign {
    /// Wraps a payload, capturing its type name for diagnostics.
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self {
            payload: Arc::new(payload),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Borrows the payload as `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }

    /// Type name of the wrapped payload.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// True when both wrappers share the same payload allocation.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.payload, &b.payload)
    }
}

impl PartialEq for Foreign {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for Foreign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Foreign")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
