//! Error types for the fallible edges of the crate.
//!
//! Merging itself never fails; the only fallible surface is strict JSON
//! export, which reports the exact path that blocked the conversion.

use miette::Diagnostic;
use thiserror::Error;

use crate::kind::Kind;

/// Errors raised when exporting a [`Value`](crate::Value) to strict JSON.
#[derive(Debug, Error, Diagnostic)]
pub enum ConvertError {
    /// The value at `path` has no JSON representation.
    #[error("value at '{path}' has kind {kind} and no JSON representation")]
    #[diagnostic(code(mergeweave::convert::unrepresentable))]
    Unrepresentable { path: String, kind: Kind },

    /// The mapping at `path` carries tagged entries, which JSON objects
    /// cannot express.
    #[error("mapping at '{path}' carries {count} tagged entries that JSON cannot express")]
    #[diagnostic(code(mergeweave::convert::tagged_entries))]
    TaggedEntries { path: String, count: usize },
}
