//! # protolite-core
//!
//! Helpers for plain structural data: type classification, deep clone,
//! deep diff, tree/list conversion, and list/object/string utilities.
//!
//! Everything operates on [`Value`], a tagged union over the kinds of data
//! a scripting runtime passes around (objects, arrays, strings, numbers,
//! dates, regexps, functions, `null`/`undefined`). The API is a set of
//! free functions; nothing is installed globally.
//!
//! ## Quick start
//!
//! ```rust
//! use protolite_core::{diff, to_list, to_tree, TreeKeys, Value};
//!
//! // Only changed keys survive; the primary key is kept for identity.
//! let new = Value::from_json(r#"{"id":7,"name":"Ada","age":37}"#).unwrap();
//! let old = Value::from_json(r#"{"id":7,"name":"Ada","age":36}"#).unwrap();
//! let changes = diff(&new, &old, "id", &[]).unwrap();
//! assert_eq!(changes.to_json().unwrap(), r#"{"id":7,"age":37}"#);
//!
//! // Flat parent-linked rows → forest → pre-order list.
//! let rows = Value::from_json(r#"[{"id":1},{"id":2,"parent_id":1}]"#).unwrap();
//! let forest = to_tree(rows.as_array().unwrap().clone(), &TreeKeys::default()).unwrap();
//! let ids: Vec<String> = to_list(&forest).iter().map(|node| node.prop("id").to_string()).collect();
//! assert_eq!(ids, ["1", "2"]);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the [`Value`] model and JSON conversions
//! - [`kind`]: [`classify`] and the `is_*` predicates
//! - [`clone`](mod@clone): deep and shallow copies
//! - [`diff`](mod@diff): structural diff and [`apply_diff`]
//! - [`tree`]: forest ⇄ list conversion, keyed indexes, search
//! - [`collection`]: set-like and record-keyed list helpers
//! - [`object`]: merge, trim, leaf mapping, path lookup, guarded dispatch
//! - [`text`]: string formatting helpers
//! - [`limits`]: recursion depth limit
//! - [`error`]: error types

pub mod clone;
pub mod collection;
pub mod diff;
pub mod error;
pub mod kind;
pub mod limits;
pub mod object;
pub mod text;
pub mod tree;
pub mod types;

pub use clone::{clone, clone_single, clone_with};
pub use diff::{apply_diff, array_diff, diff, diff_single, diff_with, DiffOptions};
pub use error::{ProtoError, Result};
pub use kind::{
    classify, is_array, is_boolean, is_component, is_date, is_empty, is_function, is_number,
    is_object, is_promise, is_regexp, is_string, TypeTag,
};
pub use limits::Limits;
pub use tree::{
    find_children, to_hash, to_hash_cloned, to_hash_indexed, to_list, to_list_cloned,
    to_list_cloned_with, to_list_with, to_tree, to_tree_with, TreeKeys,
};
pub use types::{Callable, Map, Value};
