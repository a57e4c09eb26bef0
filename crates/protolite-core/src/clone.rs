//! Deep and shallow copies of nested objects and arrays.
//!
//! Only objects and arrays are copied structurally. Every other value,
//! dates and regexps included, is carried over as it is.

use crate::error::Result;
use crate::limits::Limits;
use crate::types::{Map, Value};

/// Copy an object or an array, cloning each element with [`clone_single`].
///
/// Any other value (null, undefined, scalars, dates, regexps, functions)
/// yields an empty object.
///
/// ```
/// use protolite_core::{clone, Value};
///
/// let original = Value::from_json(r#"{"a":{"b":[1,2]}}"#).unwrap();
/// assert_eq!(clone(&original, true).unwrap(), original);
///
/// let list = Value::from_json(r#"[1,{"a":2}]"#).unwrap();
/// assert_eq!(clone(&list, true).unwrap(), list);
/// assert_eq!(clone(&Value::Null, true).unwrap(), Value::object());
/// ```
pub fn clone(value: &Value, deep: bool) -> Result<Value> {
    clone_with(value, deep, &Limits::default())
}

/// [`clone`] with a caller-supplied depth limit.
pub fn clone_with(value: &Value, deep: bool, limits: &Limits) -> Result<Value> {
    match value {
        Value::Object(map) => clone_object(map, deep, limits, 0),
        Value::Array(items) => clone_array(items, deep, limits, 0),
        _ => Ok(Value::object()),
    }
}

/// Copy any value: objects and arrays are rebuilt, everything else is
/// returned unchanged. With `deep == false` arrays are copied element by
/// element without descending into the elements.
pub fn clone_single(value: &Value, deep: bool) -> Result<Value> {
    clone_value(value, deep, &Limits::default(), 0)
}

pub(crate) fn clone_value(value: &Value, deep: bool, limits: &Limits, depth: usize) -> Result<Value> {
    match value {
        Value::Object(map) => clone_object(map, deep, limits, depth),
        Value::Array(items) => clone_array(items, deep, limits, depth),
        other => Ok(other.clone()),
    }
}

fn clone_object(map: &Map, deep: bool, limits: &Limits, depth: usize) -> Result<Value> {
    limits.check(depth)?;
    let mut copy = Map::with_capacity(map.len());
    for (key, child) in map {
        copy.insert(key.clone(), clone_value(child, deep, limits, depth + 1)?);
    }
    Ok(Value::Object(copy))
}

fn clone_array(items: &[Value], deep: bool, limits: &Limits, depth: usize) -> Result<Value> {
    if !deep {
        return Ok(Value::Array(items.to_vec()));
    }
    limits.check(depth)?;
    items
        .iter()
        .map(|item| clone_value(item, deep, limits, depth + 1))
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}
