//! Structural diff between two values of the same shape.
//!
//! The diff of two objects is an object holding only the keys whose values
//! changed, recursively. Arrays of the same length diff element by element
//! into a *sparse* array: unchanged positions are holes
//! ([`Value::Undefined`]) and the array ends at the last changed index.
//! Arrays whose lengths differ are replaced wholesale.
//!
//! Two knobs shape the result:
//!
//! - **primary key**: this field is never reported as changed; the old
//!   value is copied into the diff so the record stays identifiable. In
//!   arrays, elements are paired by this field instead of by position,
//!   which tolerates reordering.
//! - **ignore keys**: fields skipped entirely, at every depth.
//!
//! Dates compare at second precision, and a date-only string on the old
//! side (`"2024-03-09"`) is read as midnight of that day.

use crate::error::Result;
use crate::limits::Limits;
use crate::types::{Map, Value, UNDEFINED};
use chrono::{NaiveDateTime, SubsecRound};

/// Text layouts accepted for the old side of a date comparison.
const DATE_TEXT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

/// Options for [`diff_with`].
#[derive(Debug, Clone, Default)]
pub struct DiffOptions<'a> {
    /// Identity field; empty means none.
    pub primary_key: &'a str,
    pub ignore_keys: &'a [&'a str],
    pub limits: Limits,
}

impl<'a> DiffOptions<'a> {
    pub fn new(primary_key: &'a str, ignore_keys: &'a [&'a str]) -> Self {
        Self {
            primary_key,
            ignore_keys,
            limits: Limits::default(),
        }
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

/// Diff two objects, returning an object of the changed keys.
///
/// Returns an empty object when `new` is not an object. When `old` is not
/// an object every key of `new` is reported.
///
/// ```
/// use protolite_core::{diff, Value};
///
/// let new = Value::from_json(r#"{"id":1,"name":"b","tags":["x"]}"#).unwrap();
/// let old = Value::from_json(r#"{"id":1,"name":"a","tags":["x"]}"#).unwrap();
/// let changes = diff(&new, &old, "", &[]).unwrap();
/// assert_eq!(changes.to_json().unwrap(), r#"{"name":"b"}"#);
/// ```
pub fn diff(new: &Value, old: &Value, primary_key: &str, ignore_keys: &[&str]) -> Result<Value> {
    diff_with(new, old, &DiffOptions::new(primary_key, ignore_keys))
}

/// [`diff`] driven by a [`DiffOptions`].
pub fn diff_with(new: &Value, old: &Value, options: &DiffOptions<'_>) -> Result<Value> {
    Differ { options }.object(new, old, 0)
}

/// Diff any two values. `None` means unchanged.
pub fn diff_single(
    new: &Value,
    old: &Value,
    primary_key: &str,
    ignore_keys: &[&str],
) -> Result<Option<Value>> {
    let options = DiffOptions::new(primary_key, ignore_keys);
    Differ { options: &options }.single(new, old, 0)
}

/// Diff two arrays into a sparse array of changed elements.
///
/// ```
/// use protolite_core::{array_diff, Value};
///
/// let grown = array_diff(&[1.into(), 2.into(), 3.into()], &[1.into(), 2.into()], "", &[]).unwrap();
/// assert_eq!(grown.to_json().unwrap(), "[1,2,3]");
///
/// let edited = array_diff(&[1.into(), 5.into(), 3.into()], &[1.into(), 2.into(), 3.into()], "", &[]).unwrap();
/// assert_eq!(edited, Value::Array(vec![Value::Undefined, 5.into()]));
/// ```
pub fn array_diff(
    new: &[Value],
    old: &[Value],
    primary_key: &str,
    ignore_keys: &[&str],
) -> Result<Value> {
    let options = DiffOptions::new(primary_key, ignore_keys);
    Differ { options: &options }.array(new, old, 0)
}

struct Differ<'o, 'a> {
    options: &'o DiffOptions<'a>,
}

impl Differ<'_, '_> {
    fn is_primary_key(&self, key: &str) -> bool {
        !self.options.primary_key.is_empty() && key == self.options.primary_key
    }

    fn object(&self, new: &Value, old: &Value, depth: usize) -> Result<Value> {
        let Value::Object(fields) = new else {
            return Ok(Value::object());
        };
        self.options.limits.check(depth)?;

        let mut changes = Map::new();
        for (key, new_value) in fields {
            if self.options.ignore_keys.contains(&key.as_str()) {
                continue;
            }
            let old_value = old.prop(key);
            if self.is_primary_key(key) {
                if !old_value.is_undefined() {
                    changes.insert(key.clone(), old_value.clone());
                }
                continue;
            }
            if let Some(change) = self.single(new_value, old_value, depth + 1)? {
                changes.insert(key.clone(), change);
            }
        }
        Ok(Value::Object(changes))
    }

    fn single(&self, new: &Value, old: &Value, depth: usize) -> Result<Option<Value>> {
        // An undefined new value never counts as a change.
        if new.is_undefined() {
            return Ok(None);
        }
        if old.is_undefined() {
            return Ok(Some(new.clone()));
        }
        if new == old {
            return Ok(None);
        }
        match (new, old) {
            (Value::Object(_), Value::Object(_)) => self.object(new, old, depth).map(Some),
            (Value::Array(new_items), Value::Array(old_items)) => {
                self.array(new_items, old_items, depth).map(Some)
            }
            (Value::Date(date), _) if same_date(date, old) => Ok(None),
            _ => Ok(Some(new.clone())),
        }
    }

    fn array(&self, new: &[Value], old: &[Value], depth: usize) -> Result<Value> {
        if old.is_empty() || old.len() != new.len() {
            return Ok(Value::Array(new.to_vec()));
        }
        self.options.limits.check(depth)?;

        let mut changes: Vec<Value> = Vec::new();
        for (index, new_item) in new.iter().enumerate() {
            let old_item = if self.options.primary_key.is_empty() {
                &old[index]
            } else {
                let key = self.options.primary_key;
                old.iter()
                    .find(|candidate| new_item.prop(key) == candidate.prop(key))
                    .unwrap_or(&UNDEFINED)
            };
            if let Some(change) = self.single(new_item, old_item, depth + 1)? {
                changes.resize(index, Value::Undefined);
                changes.push(change);
            }
        }
        Ok(Value::Array(changes))
    }
}

/// Date equality at second precision against a date or date text.
fn same_date(new: &NaiveDateTime, old: &Value) -> bool {
    let new = new.trunc_subsecs(0);
    match old {
        Value::Date(date) => date.trunc_subsecs(0) == new,
        Value::String(text) => parse_date_text(text).is_some_and(|date| date == new),
        _ => false,
    }
}

/// Parse date text, assuming midnight when there is no time component.
fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    let with_time;
    let text = if text.contains(' ') {
        text
    } else {
        with_time = format!("{text} 00:00:00");
        &with_time
    };
    DATE_TEXT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Patch a diff produced by [`diff`] onto the old value.
///
/// Objects merge key by key, recursing into nested objects. Sparse arrays
/// patch position by position and skip holes; an array diff longer than
/// the target replaces it. Any other value overwrites. Arrays diffed by
/// primary key are patched by position, not by key.
///
/// ```
/// use protolite_core::{apply_diff, diff, Value};
///
/// let new = Value::from_json(r#"{"a":1,"b":{"c":2,"d":3}}"#).unwrap();
/// let mut old = Value::from_json(r#"{"a":0,"b":{"c":2,"d":0}}"#).unwrap();
/// let changes = diff(&new, &old, "", &[]).unwrap();
/// apply_diff(&mut old, &changes).unwrap();
/// assert_eq!(old, new);
/// ```
pub fn apply_diff(target: &mut Value, diff: &Value) -> Result<()> {
    patch(target, diff, &Limits::default(), 0)
}

fn patch(target: &mut Value, diff: &Value, limits: &Limits, depth: usize) -> Result<()> {
    limits.check(depth)?;
    match (target, diff) {
        (Value::Object(current), Value::Object(changes)) => {
            for (key, change) in changes {
                match current.get_mut(key) {
                    Some(slot) if same_container(slot, change) => {
                        patch(slot, change, limits, depth + 1)?
                    }
                    _ => {
                        current.insert(key.clone(), change.clone());
                    }
                }
            }
        }
        (Value::Array(current), Value::Array(changes)) if is_sparse_patch(current.as_slice(), changes) => {
            for (index, change) in changes.iter().enumerate() {
                if change.is_undefined() {
                    continue;
                }
                match current.get_mut(index) {
                    Some(slot) => patch(slot, change, limits, depth + 1)?,
                    None => current.push(change.clone()),
                }
            }
        }
        (slot, change) => *slot = change.clone(),
    }
    Ok(())
}

fn same_container(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_))
    )
}

fn is_sparse_patch(current: &[Value], changes: &[Value]) -> bool {
    changes.len() <= current.len() || changes.iter().any(Value::is_undefined)
}
