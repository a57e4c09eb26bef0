//! Type classification.
//!
//! [`classify`] assigns exactly one [`TypeTag`] to every value. `null` and
//! `undefined` share the `Undefined` tag, so `is_object(&Value::Null)` is
//! false.

use crate::types::Value;
use std::fmt;

/// The semantic kind of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Boolean,
    Number,
    String,
    Function,
    Array,
    Date,
    RegExp,
    Object,
    Undefined,
}

impl TypeTag {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Function => "function",
            TypeTag::Array => "array",
            TypeTag::Date => "date",
            TypeTag::RegExp => "regexp",
            TypeTag::Object => "object",
            TypeTag::Undefined => "undefined",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a value. Total: every value gets a tag.
///
/// ```
/// use protolite_core::{classify, TypeTag, Value};
///
/// assert_eq!(classify(&Value::from(1)), TypeTag::Number);
/// assert_eq!(classify(&Value::Null), TypeTag::Undefined);
/// assert_eq!(classify(&Value::object()).to_string(), "object");
/// ```
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Undefined | Value::Null => TypeTag::Undefined,
        Value::Bool(_) => TypeTag::Boolean,
        Value::Number(_) => TypeTag::Number,
        Value::String(_) => TypeTag::String,
        Value::Function(_) => TypeTag::Function,
        Value::Array(_) => TypeTag::Array,
        Value::Date(_) => TypeTag::Date,
        Value::RegExp(_) => TypeTag::RegExp,
        Value::Object(_) => TypeTag::Object,
    }
}

pub fn is_boolean(value: &Value) -> bool {
    classify(value) == TypeTag::Boolean
}

pub fn is_number(value: &Value) -> bool {
    classify(value) == TypeTag::Number
}

pub fn is_string(value: &Value) -> bool {
    classify(value) == TypeTag::String
}

pub fn is_function(value: &Value) -> bool {
    classify(value) == TypeTag::Function
}

pub fn is_array(value: &Value) -> bool {
    classify(value) == TypeTag::Array
}

pub fn is_date(value: &Value) -> bool {
    classify(value) == TypeTag::Date
}

pub fn is_regexp(value: &Value) -> bool {
    classify(value) == TypeTag::RegExp
}

/// True only for plain objects (mappings).
pub fn is_object(value: &Value) -> bool {
    classify(value) == TypeTag::Object
}

/// True for objects that expose callable `then` and `catch` members.
pub fn is_promise(value: &Value) -> bool {
    is_function(value.prop("then")) && is_function(value.prop("catch"))
}

/// True for object-like values: anything that is not a primitive and not
/// null or undefined.
pub fn is_component(value: &Value) -> bool {
    matches!(
        value,
        Value::Object(_) | Value::Array(_) | Value::Function(_) | Value::Date(_) | Value::RegExp(_)
    )
}

/// True when a value is not object-like, or is object-like with no
/// enumerable keys. Dates, regexps and functions have none.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => true,
    }
}
