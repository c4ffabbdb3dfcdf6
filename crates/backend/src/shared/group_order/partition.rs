use contracts::domain::a002_document::aggregate::Record;
use contracts::shared::group_sort::UNDEFINED_GROUP_NAME;
use serde_json::{Number, Value};
use std::collections::HashMap;

use super::field_config::FieldConfiguration;

/// Ключ группы: значение поля группировки или «без группы»
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Ungrouped,
    Named(String),
}

impl GroupKey {
    /// Ключ по значению поля.
    ///
    /// `null`, пустая строка и строка-сентинел дают `Ungrouped`;
    /// числа и булевы значения приводятся к строке (`0` и `false` остаются
    /// именованными группами); объекты и массивы сериализуются в JSON
    /// с отсортированными ключами.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => GroupKey::Ungrouped,
            Value::String(s) => Self::from_group_name(s),
            Value::Bool(b) => GroupKey::Named(b.to_string()),
            Value::Number(n) => GroupKey::Named(number_key(n)),
            Value::Array(_) | Value::Object(_) => GroupKey::Named(canonical_json(value)),
        }
    }

    /// Ключ по имени группы из URL / метаданных
    pub fn from_group_name(name: &str) -> Self {
        if name.is_empty() || name == UNDEFINED_GROUP_NAME {
            GroupKey::Ungrouped
        } else {
            GroupKey::Named(name.to_string())
        }
    }

    pub fn of(record: &Record, group_field: &str) -> Self {
        Self::from_value(record.get_field(group_field))
    }

    pub fn as_group_name(&self) -> &str {
        match self {
            GroupKey::Ungrouped => UNDEFINED_GROUP_NAME,
            GroupKey::Named(name) => name,
        }
    }
}

/// Целое значение пишется без дробной части: `3.0` и `3` дают один ключ
fn number_key(n: &Number) -> String {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// JSON с рекурсивно отсортированными ключами объектов
fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let body: Vec<String> = keys
                .into_iter()
                .map(|k| format!("{}:{}", Value::String(k.clone()), canonical_json(&map[k])))
                .collect();
            format!("{{{}}}", body.join(","))
        }
        Value::Array(items) => {
            let body: Vec<String> = items.iter().map(canonical_json).collect();
            format!("[{}]", body.join(","))
        }
        Value::Number(n) => number_key(n),
        other => other.to_string(),
    }
}

/// Устойчивое разбиение записей по значению поля группировки.
///
/// Группы идут в порядке первого появления, записи внутри группы —
/// в исходном порядке. Каждая запись попадает ровно в одну группу.
pub fn partition_by_group(
    records: &[Record],
    config: &FieldConfiguration,
) -> Vec<(GroupKey, Vec<Record>)> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut buckets: Vec<(GroupKey, Vec<Record>)> = Vec::new();

    for record in records {
        let key = GroupKey::of(record, &config.group_field_name);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push((key, Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(record.clone());
    }

    buckets
}

/// Записи одной группы в исходном порядке
pub fn group_members(records: &[Record], config: &FieldConfiguration, key: &GroupKey) -> Vec<Record> {
    records
        .iter()
        .filter(|r| &GroupKey::of(r, &config.group_field_name) == key)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_content_type::aggregate::OrderFieldKind;
    use serde_json::json;

    fn config(group_field: &str) -> FieldConfiguration {
        FieldConfiguration {
            order_field_name: "order".into(),
            group_field_name: group_field.into(),
            kind: OrderFieldKind::Order,
            columns_number: 12,
            row_height: 3.0,
            order2d_direction: None,
        }
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.document_id.as_str()).collect()
    }

    #[test]
    fn test_partition_example() {
        let records = vec![
            Record::new("1").with_field("g", json!("A")),
            Record::new("2").with_field("g", json!("B")),
            Record::new("3").with_field("g", json!("A")),
        ];

        let buckets = partition_by_group(&records, &config("g"));

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].0, GroupKey::Named("A".into()));
        assert_eq!(ids(&buckets[0].1), vec!["1", "3"]);
        assert_eq!(buckets[1].0, GroupKey::Named("B".into()));
        assert_eq!(ids(&buckets[1].1), vec!["2"]);
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let values = [
            json!("A"),
            Value::Null,
            json!(""),
            json!(3),
            json!(true),
            json!({"id": 1, "name": "x"}),
            json!("A"),
            json!([1, 2]),
            json!(3),
        ];
        let mut records: Vec<Record> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Record::new(i.to_string()).with_field("g", v.clone()))
            .collect();
        records.push(Record::new("no-field"));

        let buckets = partition_by_group(&records, &config("g"));

        let mut seen: Vec<&str> = buckets.iter().flat_map(|(_, items)| ids(items)).collect();
        seen.sort();
        let mut expected = ids(&records);
        expected.sort();
        assert_eq!(seen, expected);

        let ungrouped = buckets
            .iter()
            .find(|(k, _)| *k == GroupKey::Ungrouped)
            .unwrap();
        assert_eq!(ids(&ungrouped.1), vec!["1", "2", "no-field"]);

        let numbers = buckets
            .iter()
            .find(|(k, _)| *k == GroupKey::Named("3".into()))
            .unwrap();
        assert_eq!(ids(&numbers.1), vec!["3", "8"]);
    }

    #[test]
    fn test_structured_keys_are_deterministic() {
        let a = GroupKey::from_value(&json!({"b": 1, "a": 2}));
        let b = GroupKey::from_value(&json!({"a": 2, "b": 1}));
        assert_eq!(a, b);
        assert_eq!(a.as_group_name(), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn test_integral_floats_share_group_with_integers() {
        let records = vec![
            Record::new("1").with_field("g", json!(3)),
            Record::new("2").with_field("g", json!(3.0)),
            Record::new("3").with_field("g", json!(3.5)),
            Record::new("4").with_field("g", json!({"size": 2.0, "ids": [1.0, 2]})),
            Record::new("5").with_field("g", json!({"ids": [1, 2.0], "size": 2})),
        ];

        let buckets = partition_by_group(&records, &config("g"));

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].0, GroupKey::Named("3".into()));
        assert_eq!(ids(&buckets[0].1), vec!["1", "2"]);
        assert_eq!(buckets[1].0, GroupKey::Named("3.5".into()));
        assert_eq!(buckets[2].0, GroupKey::Named(r#"{"ids":[1,2],"size":2}"#.into()));
        assert_eq!(ids(&buckets[2].1), vec!["4", "5"]);
        assert_eq!(GroupKey::from_value(&json!(-0.0)), GroupKey::Named("0".into()));
    }

    #[test]
    fn test_zero_and_false_are_named_groups() {
        assert_eq!(GroupKey::from_value(&json!(0)), GroupKey::Named("0".into()));
        assert_eq!(GroupKey::from_value(&json!(false)), GroupKey::Named("false".into()));
        assert_eq!(GroupKey::from_value(&json!("")), GroupKey::Ungrouped);
    }

    #[test]
    fn test_sentinel_roundtrip() {
        assert_eq!(GroupKey::Ungrouped.as_group_name(), UNDEFINED_GROUP_NAME);
        assert_eq!(GroupKey::from_group_name(UNDEFINED_GROUP_NAME), GroupKey::Ungrouped);
        assert_eq!(GroupKey::from_value(&json!(UNDEFINED_GROUP_NAME)), GroupKey::Ungrouped);
    }

    #[test]
    fn test_group_members() {
        let records = vec![
            Record::new("1").with_field("g", json!("A")),
            Record::new("2"),
            Record::new("3").with_field("g", json!("A")),
        ];
        let members = group_members(&records, &config("g"), &GroupKey::Ungrouped);
        assert_eq!(ids(&members), vec!["2"]);
    }
}
