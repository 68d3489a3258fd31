//! Record helpers

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::value::as_integer;

/// One row of a raw table: field name to scalar value, in source order.
pub type Record = Map<String, Value>;

/// Returns a copy of `record` with fields in `order` first, then any
/// remaining fields in their original order. Fields are never dropped.
#[must_use]
pub fn order_keys<S: AsRef<str>>(record: &Record, order: &[S]) -> Record {
    let mut out = Record::new();
    for key in order {
        let key = key.as_ref();
        if let Some(value) = record.get(key) {
            out.insert(key.to_string(), value.clone());
        }
    }
    for (key, value) in record {
        if !out.contains_key(key) {
            out.insert(key.clone(), value.clone());
        }
    }
    out
}

/// Indexes records by their integer `id`. Rows without a usable id are
/// skipped; on duplicate ids the later row wins.
pub fn index_by_id<'a, I>(records: I) -> HashMap<i64, &'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut index = HashMap::new();
    for record in records {
        if let Some(id) = record.get("id").and_then(as_integer) {
            index.insert(id, record);
        }
    }
    index
}

/// Groups records by the integer value of `field`, preserving source order
/// within each group. Rows whose `field` is missing or unparseable are left
/// out of every group.
pub fn group_by_field<'a, I>(records: I, field: &str) -> HashMap<i64, Vec<&'a Record>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: HashMap<i64, Vec<&'a Record>> = HashMap::new();
    for record in records {
        if let Some(key) = record.get(field).and_then(as_integer) {
            groups.entry(key).or_default().push(record);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_order_keys_puts_canonical_fields_first() {
        let source = record(json!({
            "name_en": "Bangkok",
            "extra": 1,
            "id": 1,
            "name_th": "กรุงเทพมหานคร"
        }));

        let ordered = order_keys(&source, &["id", "name_th", "name_en", "geography_id"]);
        let keys: Vec<&str> = ordered.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["id", "name_th", "name_en", "extra"]);
        assert_eq!(source.keys().next().map(String::as_str), Some("name_en"));
    }

    #[test]
    fn test_index_by_id_skips_bad_ids_and_keeps_last() {
        let rows = [
            record(json!({"id": 1, "name": "first"})),
            record(json!({"id": "x"})),
            record(json!({"id": "1", "name": "second"})),
            record(json!({"name": "no id"})),
        ];

        let index = index_by_id(rows.iter());

        assert_eq!(index.len(), 1);
        assert_eq!(index[&1]["name"], json!("second"));
    }

    #[test]
    fn test_group_by_field_preserves_source_order() {
        let rows = [
            record(json!({"id": 10, "province_id": 2})),
            record(json!({"id": 11, "province_id": 1})),
            record(json!({"id": 12, "province_id": 2})),
            record(json!({"id": 13, "province_id": null})),
        ];

        let groups = group_by_field(rows.iter(), "province_id");

        let ids: Vec<&Value> = groups[&2].iter().map(|r| &r["id"]).collect();
        assert_eq!(ids, vec![&json!(10), &json!(12)]);
        assert_eq!(groups[&1].len(), 1);
        assert_eq!(groups.len(), 2);
    }
}
