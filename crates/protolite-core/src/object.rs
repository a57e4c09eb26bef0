//! Object-level helpers: merging, trimming, leaf mapping, path lookup, and
//! guarded method dispatch.

use crate::types::{Map, Value};

/// Copy every field of `source` that `dest` lacks, except `ignore_keys`.
pub fn include<'d>(dest: &'d mut Map, source: &Map, ignore_keys: &[&str]) -> &'d mut Map {
    for (key, value) in source {
        if dest.get(key).is_none_or(Value::is_undefined) && !ignore_keys.contains(&key.as_str()) {
            dest.insert(key.clone(), value.clone());
        }
    }
    dest
}

/// Copy every field of `source` onto `dest`, overwriting, except `ignore_keys`.
pub fn replace<'d>(dest: &'d mut Map, source: &Map, ignore_keys: &[&str]) -> &'d mut Map {
    for (key, value) in source {
        if !ignore_keys.contains(&key.as_str()) {
            dest.insert(key.clone(), value.clone());
        }
    }
    dest
}

/// [`include`] every source in turn, so earlier sources take precedence.
pub fn merge_missing<'d>(dest: &'d mut Map, sources: &[&Map]) -> &'d mut Map {
    for source in sources {
        include(dest, source, &[]);
    }
    dest
}

/// Trim surrounding whitespace from every string, descending through
/// objects and arrays.
pub fn trim(value: &mut Value) {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
            }
        }
        Value::Object(fields) => fields.values_mut().for_each(trim),
        Value::Array(items) => items.iter_mut().for_each(trim),
        _ => {}
    }
}

pub fn trimmed(value: &Value) -> Value {
    let mut copy = value.clone();
    trim(&mut copy);
    copy
}

/// Replace every leaf (anything that is not an object or an array) with
/// `f(leaf)`.
///
/// ```
/// use protolite_core::object::map_leaves;
/// use protolite_core::Value;
///
/// let mut value = Value::from_json(r#"{"a":1,"b":[2,{"c":3}]}"#).unwrap();
/// map_leaves(&mut value, &mut |leaf| match leaf {
///     Value::Number(n) => Value::Number(n * 10.0),
///     other => other,
/// });
/// assert_eq!(value.to_json().unwrap(), r#"{"a":10,"b":[20,{"c":30}]}"#);
/// ```
pub fn map_leaves<F>(value: &mut Value, f: &mut F)
where
    F: FnMut(Value) -> Value,
{
    match value {
        Value::Object(fields) => fields.values_mut().for_each(|child| map_leaves(child, f)),
        Value::Array(items) => items.iter_mut().for_each(|item| map_leaves(item, f)),
        leaf => *leaf = f(std::mem::take(leaf)),
    }
}

/// Look up a dot-separated path. Numeric segments index into arrays.
///
/// ```
/// use protolite_core::object::get;
/// use protolite_core::Value;
///
/// let data = Value::from_json(r#"{"user":{"tags":["a","b"]}}"#).unwrap();
/// assert_eq!(get(&data, "user.tags.1"), Some(&Value::from("b")));
/// assert_eq!(get(&data, "user.name"), None);
/// ```
pub fn get<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(fields) => fields.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// [`get`], falling back to `default` when the path does not resolve.
pub fn get_or<'a>(data: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    get(data, path).unwrap_or(default)
}

/// Call the callable field `name` of `target` with `args`.
///
/// Returns `None` when there is no such callable or when the call fails;
/// failures are logged at debug level and otherwise absorbed.
pub fn apply(target: &Value, name: &str, args: &[Value]) -> Option<Value> {
    let Value::Function(callable) = target.prop(name) else {
        return None;
    };
    match callable.call(args) {
        Ok(result) => Some(result),
        Err(err) => {
            tracing::debug!(name, error = %err, "absorbed failure from applied method");
            None
        }
    }
}
