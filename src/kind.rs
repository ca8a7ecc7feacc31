//! Closed classification of [`Value`]s as seen by the merge step.
//!
//! Every value falls into exactly one of five kinds; the merge algorithm
//! branches on this classification and nothing else. Keeping the
//! classifier closed and total means new `Value` variants must declare
//! their merge behavior here before they can exist.

use std::fmt;

use crate::value::Value;

/// Merge-relevant classification of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Plain mapping: merged recursively, key by key.
    Mapping,
    /// Ordered sequence: replaced wholesale with a deep copy.
    Array,
    /// Timestamp or foreign payload: assigned directly, never recursed.
    SpecialBuiltin,
    /// Annotated callable: a valid merge destination and source via its
    /// attached properties; assigned directly when it appears as a leaf.
    Invokable,
    /// Null, boolean, number, or string: assigned directly.
    Primitive,
}

impl Kind {
    /// Human-readable name used in diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Mapping => "mapping",
            Kind::Array => "array",
            Kind::SpecialBuiltin => "special-builtin",
            Kind::Invokable => "invokable",
            Kind::Primitive => "primitive",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Classifies this value for merging.
    ///
    /// # Examples
    /// ```
    /// use mergeweave::{Kind, Value};
    ///
    /// assert_eq!(Value::Null.kind(), Kind::Primitive);
    /// assert_eq!(Value::mapping().kind(), Kind::Mapping);
    /// assert_eq!(Value::from(vec![]).kind(), Kind::Array);
    /// assert_eq!(Value::callable(|_| Value::Null).kind(), Kind::Invokable);
    /// ```
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Kind::Primitive,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Mapping,
            Value::Callable(_) => Kind::Invokable,
            Value::Time(_) | Value::Foreign(_) => Kind::SpecialBuiltin,
        }
    }

    /// True for values that can receive merged entries: plain mappings
    /// and callables.
    #[must_use]
    pub fn is_mergeable(&self) -> bool {
        matches!(self.kind(), Kind::Mapping | Kind::Invokable)
    }
}
