//! Set-like and record-keyed helpers for lists.
//!
//! Most helpers come in two forms. The mutating form takes `&mut Vec<T>`,
//! edits it in place and returns it for chaining. The non-mutating form
//! (`added`, `removed`, `added_obj`, ...) leaves its input alone and
//! returns a new list.
//!
//! The `*_obj` helpers treat a list of objects as a table of records keyed
//! by an identity field. Matching compares one field of the list element
//! with one field of the lookup object using strict equality; a field that
//! is missing on both sides counts as a match.
//! `has_obj`, `add_obj` and `remove_obj` compare `element[from_key]` with
//! `obj[to_key]`, while `find_obj` and `replace_obj` compare
//! `obj[from_key]` with `element[to_key]`.

use crate::types::Value;
use indexmap::IndexMap;

pub fn contains<T: PartialEq>(list: &[T], item: &T) -> bool {
    list.contains(item)
}

/// Push `item` unless it is already present.
pub fn add<T: PartialEq>(list: &mut Vec<T>, item: T) -> &mut Vec<T> {
    if !list.contains(&item) {
        list.push(item);
    }
    list
}

pub fn added<T: PartialEq + Clone>(list: &[T], item: T) -> Vec<T> {
    let mut copy = list.to_vec();
    add(&mut copy, item);
    copy
}

/// Remove the first occurrence of `item`, if any.
pub fn remove<'l, T: PartialEq>(list: &'l mut Vec<T>, item: &T) -> &'l mut Vec<T> {
    if let Some(index) = list.iter().position(|candidate| candidate == item) {
        list.remove(index);
    }
    list
}

pub fn removed<T: PartialEq + Clone>(list: &[T], item: &T) -> Vec<T> {
    let mut copy = list.to_vec();
    remove(&mut copy, item);
    copy
}

/// Append every element of `sequences` that the list does not hold yet.
pub fn extend<'l, T: PartialEq + Clone>(list: &'l mut Vec<T>, sequences: &[&[T]]) -> &'l mut Vec<T> {
    for sequence in sequences {
        for item in sequence.iter() {
            if !list.contains(item) {
                list.push(item.clone());
            }
        }
    }
    list
}

pub fn extended<T: PartialEq + Clone>(list: &[T], sequences: &[&[T]]) -> Vec<T> {
    let mut copy = list.to_vec();
    extend(&mut copy, sequences);
    copy
}

/// Split into consecutive chunks of at most `size` elements. A `size` of
/// zero puts everything into one chunk.
///
/// ```
/// use protolite_core::collection::chunk;
///
/// assert_eq!(chunk(&[1, 2, 3, 4, 5], 2), vec![vec![1, 2], vec![3, 4], vec![5]]);
/// assert!(chunk::<i32>(&[], 3).is_empty());
/// ```
pub fn chunk<T: Clone>(list: &[T], size: usize) -> Vec<Vec<T>> {
    if list.is_empty() {
        return Vec::new();
    }
    if size == 0 {
        return vec![list.to_vec()];
    }
    list.chunks(size).map(<[T]>::to_vec).collect()
}

// ── Record helpers ──────────────────────────────────────────────────────────

fn matches_field(element: &Value, element_key: &str, obj: &Value, obj_key: &str) -> bool {
    element.prop(element_key) == obj.prop(obj_key)
}

/// True when some element's `from_key` field equals `obj[to_key]`.
pub fn has_obj(list: &[Value], obj: &Value, from_key: &str, to_key: &str) -> bool {
    list.iter()
        .any(|element| matches_field(element, from_key, obj, to_key))
}

/// First element whose `to_key` field equals `obj[from_key]`.
pub fn find_obj<'a>(list: &'a [Value], obj: &Value, from_key: &str, to_key: &str) -> Option<&'a Value> {
    list.iter()
        .find(|element| matches_field(element, to_key, obj, from_key))
}

/// Push `obj` unless a matching record is already present.
pub fn add_obj<'l>(list: &'l mut Vec<Value>, obj: Value, from_key: &str, to_key: &str) -> &'l mut Vec<Value> {
    if !has_obj(list, &obj, from_key, to_key) {
        list.push(obj);
    }
    list
}

pub fn added_obj(list: &[Value], obj: Value, from_key: &str, to_key: &str) -> Vec<Value> {
    let mut copy = list.to_vec();
    add_obj(&mut copy, obj, from_key, to_key);
    copy
}

/// Replace the first record matching `obj` (as [`find_obj`] matches) with
/// `obj`, or push `obj` when nothing matches.
pub fn replace_obj<'l>(list: &'l mut Vec<Value>, obj: Value, from_key: &str, to_key: &str) -> &'l mut Vec<Value> {
    let wanted = obj.prop(from_key).clone();
    replace_obj_by(
        list,
        obj,
        |element| element.prop(to_key) == &wanted,
        |obj, _| obj,
    )
}

pub fn replaced_obj(list: &[Value], obj: Value, from_key: &str, to_key: &str) -> Vec<Value> {
    let mut copy = list.to_vec();
    replace_obj(&mut copy, obj, from_key, to_key);
    copy
}

/// [`replace_obj`] with a custom matcher and a transform that builds the
/// stored value from `obj` and the record it replaces (if any).
///
/// ```
/// use protolite_core::collection::replace_obj_by;
/// use protolite_core::Value;
///
/// let mut list = vec![Value::from_json(r#"{"id":1,"n":1}"#).unwrap()];
/// let bump = Value::from_json(r#"{"id":1}"#).unwrap();
/// replace_obj_by(
///     &mut list,
///     bump,
///     |element| element.prop("id") == &Value::from(1),
///     |_, existing| {
///         let n = existing.and_then(|e| e.prop("n").as_f64()).unwrap_or(0.0);
///         Value::from_json(&format!(r#"{{"id":1,"n":{}}}"#, n + 1.0)).unwrap()
///     },
/// );
/// assert_eq!(list[0].prop("n"), &Value::from(2));
/// ```
pub fn replace_obj_by<M, F>(list: &mut Vec<Value>, obj: Value, matcher: M, transform: F) -> &mut Vec<Value>
where
    M: FnMut(&Value) -> bool,
    F: FnOnce(Value, Option<&Value>) -> Value,
{
    match list.iter().position(matcher) {
        Some(index) => {
            let replacement = transform(obj, Some(&list[index]));
            list[index] = replacement;
        }
        None => {
            let appended = transform(obj, None);
            list.push(appended);
        }
    }
    list
}

/// Remove the first matching record, or every matching record when
/// `is_any` is set.
pub fn remove_obj<'l>(
    list: &'l mut Vec<Value>,
    obj: &Value,
    from_key: &str,
    to_key: &str,
    is_any: bool,
) -> &'l mut Vec<Value> {
    if is_any {
        list.retain(|element| !matches_field(element, from_key, obj, to_key));
    } else if let Some(index) = list
        .iter()
        .position(|element| matches_field(element, from_key, obj, to_key))
    {
        list.remove(index);
    }
    list
}

pub fn removed_obj(list: &[Value], obj: &Value, from_key: &str, to_key: &str, is_any: bool) -> Vec<Value> {
    let mut copy = list.to_vec();
    remove_obj(&mut copy, obj, from_key, to_key, is_any);
    copy
}

// ── Projections ─────────────────────────────────────────────────────────────

/// Group elements by the string form of their `key` field, keeping the
/// relative order inside each group. Elements without the field land in
/// the `"undefined"` group.
pub fn group_by(list: &[Value], key: &str) -> IndexMap<String, Vec<Value>> {
    let mut groups: IndexMap<String, Vec<Value>> = IndexMap::new();
    for item in list {
        groups
            .entry(item.prop(key).to_string())
            .or_default()
            .push(item.clone());
    }
    groups
}

/// Project a list onto one field. Strings and numbers pass through as they
/// are; objects contribute their `key` field when they have one; anything
/// else is skipped.
pub fn column(list: &[Value], key: &str) -> Vec<Value> {
    list.iter()
        .filter_map(|item| match item {
            Value::String(_) | Value::Number(_) => Some(item.clone()),
            Value::Object(fields) => fields
                .get(key)
                .filter(|field| !field.is_undefined())
                .cloned(),
            _ => None,
        })
        .collect()
}

/// Coerce a value into a list. Only values with a positive length count:
/// non-empty arrays as they are, non-empty strings split on `separator`
/// (into characters when `separator` is empty), and objects whose
/// `length` field is a positive number as a one-element list. Everything
/// else, numbers and booleans included, yields an empty list.
///
/// ```
/// use protolite_core::collection::to_array;
/// use protolite_core::Value;
///
/// assert_eq!(to_array(&Value::from("a,b"), ","), vec![Value::from("a"), Value::from("b")]);
/// assert!(to_array(&Value::from(""), ",").is_empty());
/// assert!(to_array(&Value::from(3), ",").is_empty());
/// ```
pub fn to_array(value: &Value, separator: &str) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::String(text) if text.is_empty() => Vec::new(),
        Value::String(text) if separator.is_empty() => {
            text.chars().map(|c| Value::from(c.to_string())).collect()
        }
        Value::String(text) => text.split(separator).map(Value::from).collect(),
        Value::Object(_) if has_positive_length(value) => vec![value.clone()],
        _ => Vec::new(),
    }
}

fn has_positive_length(value: &Value) -> bool {
    value.prop("length").as_f64().is_some_and(|len| len > 0.0)
}
