/// Collection, object and text helper tests for protolite-core.
///
/// Exercises the set-like list helpers, the record-keyed `*_obj` helpers,
/// grouping and projection, and the object merge / lookup helpers against
/// realistic record lists.
use pretty_assertions::assert_eq;
use protolite_core::collection::{
    add, add_obj, added, chunk, column, contains, extended, find_obj, group_by, has_obj,
    remove, remove_obj, removed_obj, replace_obj, replaced_obj, to_array,
};
use protolite_core::object::{get, include, map_leaves, merge_missing};
use protolite_core::text::{display_len, pad, remove_item, ucfirst};
use protolite_core::Value;

fn v(json: &str) -> Value {
    Value::from_json(json).expect("fixture must be valid JSON")
}

fn rows(json: &str) -> Vec<Value> {
    match v(json) {
        Value::Array(items) => items,
        other => panic!("expected array fixture, got {other:?}"),
    }
}

fn orders() -> Vec<Value> {
    rows(
        r#"[
            {"id":1,"status":"open","total":20},
            {"id":2,"status":"paid","total":35},
            {"id":3,"status":"open","total":5},
            {"id":4,"total":0}
        ]"#,
    )
}

// ============================================================================
// 1. Set-like helpers
// ============================================================================

#[test]
fn add_skips_duplicates() {
    let mut tags = vec!["a", "b"];
    add(&mut tags, "b");
    add(&mut tags, "c");
    assert_eq!(tags, ["a", "b", "c"]);
    assert!(contains(&tags, &"c"));
}

#[test]
fn added_and_extended_leave_input_alone() {
    let base = vec![1, 2];
    assert_eq!(added(&base, 3), [1, 2, 3]);
    assert_eq!(extended(&base, &[&[2, 3][..], &[3, 4, 1]]), [1, 2, 3, 4]);
    assert_eq!(base, [1, 2]);
}

#[test]
fn remove_drops_first_occurrence_only() {
    let mut list = vec![1, 2, 1];
    remove(&mut list, &1);
    assert_eq!(list, [2, 1]);
    remove(&mut list, &9);
    assert_eq!(list, [2, 1]);
}

#[test]
fn chunk_splits_into_fixed_sizes() {
    let list: Vec<i32> = (1..=7).collect();
    assert_eq!(chunk(&list, 3), vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    assert_eq!(chunk(&list, 0), vec![list.clone()]);
    assert_eq!(chunk(&list, 10), vec![list]);
}

// ============================================================================
// 2. Record helpers
// ============================================================================

#[test]
fn has_obj_and_find_obj_match_by_field() {
    let list = orders();
    assert!(has_obj(&list, &v(r#"{"id":2}"#), "id", "id"));
    assert!(!has_obj(&list, &v(r#"{"id":"2"}"#), "id", "id"));

    let found = find_obj(&list, &v(r#"{"order_id":3}"#), "order_id", "id").unwrap();
    assert_eq!(found.prop("total"), &Value::from(5));
}

#[test]
fn missing_fields_match_each_other() {
    let list = orders();
    let found = find_obj(&list, &v(r#"{"id":4}"#), "status", "status").unwrap();
    assert_eq!(found.prop("id"), &Value::from(4));
}

#[test]
fn add_obj_skips_known_records() {
    let mut list = orders();
    add_obj(&mut list, v(r#"{"id":1,"status":"dup"}"#), "id", "id");
    assert_eq!(list.len(), 4);
    add_obj(&mut list, v(r#"{"id":5}"#), "id", "id");
    assert_eq!(list.len(), 5);
}

#[test]
fn replace_obj_swaps_or_appends() {
    let list = orders();
    let updated = replaced_obj(&list, v(r#"{"id":2,"status":"refunded"}"#), "id", "id");
    assert_eq!(updated[1], v(r#"{"id":2,"status":"refunded"}"#));
    assert_eq!(updated.len(), 4);
    assert_eq!(list[1].prop("status"), &Value::from("paid"));

    let mut list = list;
    replace_obj(&mut list, v(r#"{"id":9}"#), "id", "id");
    assert_eq!(list.last(), Some(&v(r#"{"id":9}"#)));
}

#[test]
fn remove_obj_first_or_all() {
    let list = orders();
    let open = v(r#"{"status":"open"}"#);
    let first_gone = removed_obj(&list, &open, "status", "status", false);
    assert_eq!(first_gone.iter().map(|o| o.prop("id").to_string()).collect::<Vec<_>>(), ["2", "3", "4"]);

    let mut all_gone = list;
    remove_obj(&mut all_gone, &open, "status", "status", true);
    assert_eq!(all_gone.iter().map(|o| o.prop("id").to_string()).collect::<Vec<_>>(), ["2", "4"]);
}

#[test]
fn remove_obj_on_repeated_ids() {
    let list = rows(r#"[{"id":1},{"id":2},{"id":1}]"#);
    let key = v(r#"{"id":1}"#);

    let mut once = list.clone();
    remove_obj(&mut once, &key, "id", "id", false);
    assert_eq!(once, rows(r#"[{"id":2},{"id":1}]"#));

    let mut every = list;
    remove_obj(&mut every, &key, "id", "id", true);
    assert_eq!(every, rows(r#"[{"id":2}]"#));
}

// ============================================================================
// 3. Projections
// ============================================================================

#[test]
fn group_by_keeps_first_seen_order() {
    let groups = group_by(&orders(), "status");
    assert_eq!(groups.keys().collect::<Vec<_>>(), ["open", "paid", "undefined"]);
    assert_eq!(groups["open"].len(), 2);
    assert_eq!(groups["open"][1].prop("id"), &Value::from(3));
}

#[test]
fn group_by_collects_records_per_tag() {
    let list = rows(r#"[{"t":"a","v":1},{"t":"b","v":2},{"t":"a","v":3}]"#);
    let groups = group_by(&list, "t");
    assert_eq!(groups.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(groups["a"], rows(r#"[{"t":"a","v":1},{"t":"a","v":3}]"#));
    assert_eq!(groups["b"], rows(r#"[{"t":"b","v":2}]"#));
}

#[test]
fn column_projects_field_and_passes_scalars() {
    let mut list = orders();
    list.push(Value::from("loose"));
    list.push(Value::Null);
    let statuses = column(&list, "status");
    assert_eq!(
        statuses,
        [
            Value::from("open"),
            Value::from("paid"),
            Value::from("open"),
            Value::from("loose"),
        ]
    );
}

#[test]
fn to_array_coerces_values() {
    assert_eq!(to_array(&v("[1,2]"), ","), [Value::from(1), Value::from(2)]);
    assert_eq!(to_array(&Value::from("a;b"), ";"), [Value::from("a"), Value::from("b")]);
    assert_eq!(to_array(&Value::from("ab"), ""), [Value::from("a"), Value::from("b")]);
    assert!(to_array(&Value::Null, ",").is_empty());
    assert!(to_array(&Value::from(0), ",").is_empty());
}

#[test]
fn to_array_wraps_only_values_with_positive_length() {
    assert!(to_array(&Value::from(3), ",").is_empty());
    assert!(to_array(&Value::from(true), ",").is_empty());
    assert!(to_array(&v(r#"{"a":1}"#), ",").is_empty());
    assert!(to_array(&v(r#"{"length":0}"#), ",").is_empty());
    assert!(to_array(&v("[]"), ",").is_empty());

    let sized = v(r#"{"length":2,"0":"x","1":"y"}"#);
    assert_eq!(to_array(&sized, ","), [sized.clone()]);
}

// ============================================================================
// 4. Object and text helpers
// ============================================================================

#[test]
fn include_fills_defaults_from_several_sources() {
    let mut settings = v(r#"{"theme":"dark"}"#);
    let user = v(r#"{"theme":"light","lang":"fr"}"#);
    let site = v(r#"{"lang":"en","tz":"UTC","secret":"x"}"#);
    let fields = settings.as_object_mut().unwrap();
    merge_missing(fields, &[user.as_object().unwrap()]);
    include(fields, site.as_object().unwrap(), &["secret"]);
    assert_eq!(settings, v(r#"{"theme":"dark","lang":"fr","tz":"UTC"}"#));
}

#[test]
fn map_leaves_and_get_walk_nested_values() {
    let mut doc = v(r#"{"title":"hi","meta":{"tags":["a","b"],"n":1}}"#);
    map_leaves(&mut doc, &mut |leaf| match leaf {
        Value::String(text) => Value::from(ucfirst(&text)),
        other => other,
    });
    assert_eq!(get(&doc, "meta.tags.0"), Some(&Value::from("A")));
    assert_eq!(get(&doc, "title"), Some(&Value::from("Hi")));
    assert_eq!(get(&doc, "meta.n"), Some(&Value::from(1)));
    assert_eq!(get(&doc, "meta.tags.9"), None);
}

#[test]
fn text_helpers() {
    assert_eq!(pad("42", '0', 5), "00042");
    assert_eq!(display_len("日本x", 2, 1), 5);
    assert_eq!(remove_item("1,2,3", "2", ","), "1,3");
    assert_eq!(ucfirst("ärger"), "Ärger");
}
