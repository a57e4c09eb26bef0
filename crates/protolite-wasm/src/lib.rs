//! WASM bindings for protolite-core.
//!
//! Every export takes and returns JSON strings, so the JavaScript side
//! works with plain `JSON.parse`/`JSON.stringify` data. Errors are thrown
//! as JS strings. Built with `wasm-bindgen-cli`:
//!
//! ```sh
//! cargo build -p protolite-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/protolite_wasm.wasm
//! ```

use protolite_core::collection;
use protolite_core::{Map, ProtoError, Result, TreeKeys, Value};
use wasm_bindgen::prelude::*;

fn to_js(err: ProtoError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_array(json: &str) -> Result<Vec<Value>> {
    match Value::from_json(json)? {
        Value::Array(items) => Ok(items),
        other => Err(ProtoError::InvalidInput(format!(
            "expected a JSON array, got {}",
            protolite_core::classify(&other)
        ))),
    }
}

/// Diff two JSON objects. `ignore_keys` is comma-separated; pass `""` for
/// no primary key or no ignored keys.
#[wasm_bindgen]
pub fn diff(
    new_json: &str,
    old_json: &str,
    primary_key: &str,
    ignore_keys: &str,
) -> std::result::Result<String, JsValue> {
    diff_json(new_json, old_json, primary_key, ignore_keys).map_err(to_js)
}

fn diff_json(new_json: &str, old_json: &str, primary_key: &str, ignore_keys: &str) -> Result<String> {
    let new = Value::from_json(new_json)?;
    let old = Value::from_json(old_json)?;
    let ignore: Vec<&str> = ignore_keys
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .collect();
    protolite_core::diff(&new, &old, primary_key, &ignore)?.to_json()
}

/// Build a forest from parent-linked rows.
#[wasm_bindgen(js_name = "toTree")]
pub fn to_tree(
    list_json: &str,
    id_key: &str,
    parent_key: &str,
    children_key: &str,
) -> std::result::Result<String, JsValue> {
    to_tree_json(list_json, id_key, parent_key, children_key).map_err(to_js)
}

fn to_tree_json(list_json: &str, id_key: &str, parent_key: &str, children_key: &str) -> Result<String> {
    let keys = TreeKeys {
        id: id_key,
        parent_id: parent_key,
        children: children_key,
    };
    let forest = protolite_core::to_tree(parse_array(list_json)?, &keys)?;
    Value::Array(forest).to_json()
}

/// Flatten a forest into a pre-order list.
#[wasm_bindgen(js_name = "toList")]
pub fn to_list(forest_json: &str) -> std::result::Result<String, JsValue> {
    to_list_json(forest_json).map_err(to_js)
}

fn to_list_json(forest_json: &str) -> Result<String> {
    let forest = parse_array(forest_json)?;
    Value::Array(protolite_core::to_list_cloned(&forest)?).to_json()
}

/// Index a forest by a field. With `log_index` each entry is a
/// `[node, index]` pair.
#[wasm_bindgen(js_name = "toHash")]
pub fn to_hash(forest_json: &str, key: &str, log_index: bool) -> std::result::Result<String, JsValue> {
    to_hash_json(forest_json, key, log_index).map_err(to_js)
}

fn to_hash_json(forest_json: &str, key: &str, log_index: bool) -> Result<String> {
    let forest = parse_array(forest_json)?;
    protolite_core::to_hash_cloned(&forest, key, log_index)?.to_json()
}

#[wasm_bindgen(js_name = "groupBy")]
pub fn group_by(list_json: &str, key: &str) -> std::result::Result<String, JsValue> {
    group_by_json(list_json, key).map_err(to_js)
}

fn group_by_json(list_json: &str, key: &str) -> Result<String> {
    let groups: Map = collection::group_by(&parse_array(list_json)?, key)
        .into_iter()
        .map(|(name, members)| (name, Value::Array(members)))
        .collect();
    Value::Object(groups).to_json()
}

#[wasm_bindgen]
pub fn chunk(list_json: &str, size: usize) -> std::result::Result<String, JsValue> {
    chunk_json(list_json, size).map_err(to_js)
}

fn chunk_json(list_json: &str, size: usize) -> Result<String> {
    let chunks = collection::chunk(&parse_array(list_json)?, size)
        .into_iter()
        .map(Value::Array)
        .collect();
    Value::Array(chunks).to_json()
}

/// Classify a JSON document, e.g. `"array"` or `"undefined"` for `null`.
#[wasm_bindgen(js_name = "typeOf")]
pub fn type_of(json: &str) -> std::result::Result<String, JsValue> {
    type_of_json(json).map_err(to_js)
}

fn type_of_json(json: &str) -> Result<String> {
    Ok(protolite_core::classify(&Value::from_json(json)?).to_string())
}
