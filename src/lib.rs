//! # Mergeweave: Recursive Deep-Assign for Dynamic Values
//!
//! Mergeweave copies the entries of one or more source values into a
//! target value, merging nested plain mappings key by key instead of
//! replacing them wholesale. The merge is deterministic: sources apply
//! left to right and the last write wins on conflicting leaves.
//!
//! ## Core Concepts
//!
//! - **Value**: a closed dynamic value enum — primitives, arrays,
//!   mappings, timestamps, foreign payloads, and annotated callables
//! - **Kind**: the five-way classifier the merge step branches on
//! - **Mapping**: ordered string-keyed entries plus an identity-keyed
//!   tag side channel
//! - **Callable**: a shared handler with an attached property mapping,
//!   valid as both merge destination and source
//! - **merge / merged**: the single operation, in mutating and by-value
//!   forms
//!
//! ## Quick Start
//!
//! ### Merging nested mappings
//!
//! ```
//! use mergeweave::{merged, Value};
//! use serde_json::json;
//!
//! let one = Value::from(json!({"b": {"c": {"d": "e"}}}));
//! let two = Value::from(json!({"b": {"c": {"f": "g", "j": "i"}}}));
//!
//! let out = merged(&Value::mapping(), &[one, two]);
//! assert_eq!(out, Value::from(json!({"b": {"c": {"d": "e", "f": "g", "j": "i"}}})));
//! ```
//!
//! ### Arrays replace, they never merge
//!
//! ```
//! use mergeweave::{merged, Value};
//! use serde_json::json;
//!
//! let one = Value::from(json!({"g": ["b"], "d": "e"}));
//! let two = Value::from(json!({"g": ["a"], "d": "f"}));
//!
//! let out = merged(&Value::mapping(), &[one, two]);
//! assert_eq!(out, Value::from(json!({"g": ["a"], "d": "f"})));
//! ```
//!
//! ### Callables as merge targets
//!
//! ```
//! use mergeweave::{merge, Value};
//! use serde_json::json;
//!
//! let mut target = Value::callable(|_| Value::from("ok"));
//! merge(&mut target, &[Value::from(json!({"b": {"c": {"d": "e"}}}))]);
//!
//! assert_eq!(
//!     target.get("b"),
//!     Some(&Value::from(json!({"c": {"d": "e"}})))
//! );
//! // Invocability is untouched.
//! assert_eq!(target.as_callable().unwrap().call(&[]), Value::from("ok"));
//! ```
//!
//! ## Guarantees
//!
//! - Sources are never mutated; only the target and mappings reachable
//!   from it change.
//! - Non-mergeable sources (primitives, timestamps, foreign payloads,
//!   arrays) are skipped silently, never an error.
//! - The keys `__proto__`, `constructor`, and `prototype` are never
//!   copied from a source (see [`merge::UNSAFE_KEYS`]).
//! - Assigned arrays are deep copies: mutating the result cannot reach
//!   back into a source.
//! - Cyclic inputs are unrepresentable in the owned value model, so
//!   recursion always terminates.
//!
//! ## Module Guide
//!
//! - [`value`] - The [`Value`] enum, [`Mapping`], [`Tag`], [`Callable`],
//!   and [`Foreign`]
//! - [`kind`] - The [`Kind`] classifier
//! - [`merge`] - The deep-assign algorithm
//! - [`convert`] - JSON import/export
//! - [`errors`] - Conversion error types

pub mod convert;
pub mod errors;
pub mod kind;
pub mod merge;
pub mod value;

pub use errors::ConvertError;
pub use kind::Kind;
pub use merge::{merge, merged};
pub use value::{Callable, Foreign, Handler, Mapping, Tag, Value};
