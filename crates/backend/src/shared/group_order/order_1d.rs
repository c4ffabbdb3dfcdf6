use contracts::domain::a002_document::aggregate::Record;
use contracts::shared::group_sort::{OrderUpdate, OrderedItem};
use serde::Deserialize;
use serde_json::json;

/// Нумерация записей без значения порядка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingOrderNumbering {
    /// С `len - 1`, где `len` — размер всей группы (поведение admin-панели)
    #[default]
    Legacy,
    /// Со следующего целого после наибольшего заданного порядка
    AfterLast,
}

/// Канонический порядок 1D-группы.
///
/// Записи с числовым значением сортируются по возрастанию (устойчиво),
/// записи без значения добавляются в конец в исходном порядке.
pub fn order_one_dimensional(
    items: &[Record],
    order_field: &str,
    numbering: MissingOrderNumbering,
) -> Vec<OrderedItem> {
    let mut defined: Vec<OrderedItem> = Vec::with_capacity(items.len());
    let mut missing: Vec<&Record> = Vec::new();

    for record in items {
        match record.order_value(order_field) {
            Some(order) => defined.push(OrderedItem {
                item: record.clone(),
                order,
            }),
            None => missing.push(record),
        }
    }

    defined.sort_by(|a, b| a.order.total_cmp(&b.order));

    let start = match numbering {
        MissingOrderNumbering::Legacy => items.len().saturating_sub(1) as f64,
        MissingOrderNumbering::AfterLast => defined
            .iter()
            .map(|i| i.order)
            .reduce(f64::max)
            .map_or(0.0, |max| max.floor() + 1.0),
    };

    defined.extend(missing.into_iter().enumerate().map(|(i, record)| OrderedItem {
        item: record.clone(),
        order: start + i as f64,
    }));

    defined
}

/// Значения порядка для последовательности, собранной редактором:
/// индекс позиции, начиная с нуля
pub fn apply_one_dimensional_order(document_ids: &[String], order_field: &str) -> Vec<OrderUpdate> {
    document_ids
        .iter()
        .enumerate()
        .map(|(index, document_id)| OrderUpdate {
            document_id: document_id.clone(),
            field: order_field.to_string(),
            value: json!(index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn record(id: &str, order: Option<Value>) -> Record {
        let r = Record::new(id);
        match order {
            Some(v) => r.with_field("order", v),
            None => r,
        }
    }

    fn summary(items: &[OrderedItem]) -> Vec<(String, f64)> {
        items
            .iter()
            .map(|i| (i.item.document_id.clone(), i.order))
            .collect()
    }

    /// Записывает вычисленный порядок обратно в записи
    fn written_back(items: &[OrderedItem]) -> Vec<Record> {
        items
            .iter()
            .map(|i| i.item.clone().with_field("order", json!(i.order)))
            .collect()
    }

    #[test]
    fn test_example_with_legacy_numbering() {
        let items = vec![
            record("1", Some(json!(5))),
            record("2", None),
            record("3", Some(json!(1))),
        ];

        let ordered = order_one_dimensional(&items, "order", MissingOrderNumbering::Legacy);

        assert_eq!(
            summary(&ordered),
            vec![("3".into(), 1.0), ("1".into(), 5.0), ("2".into(), 2.0)]
        );
        // исходные записи не изменяются
        assert_eq!(items[1].get_field("order"), &Value::Null);
    }

    #[test]
    fn test_missing_items_keep_discovery_order() {
        let items = vec![
            record("a", None),
            record("b", Some(json!(0))),
            record("c", Some(json!("7"))),
            record("d", None),
        ];

        let legacy = order_one_dimensional(&items, "order", MissingOrderNumbering::Legacy);
        assert_eq!(
            summary(&legacy),
            vec![
                ("b".into(), 0.0),
                ("a".into(), 3.0),
                ("c".into(), 4.0),
                ("d".into(), 5.0)
            ]
        );

        let after_last = order_one_dimensional(&items, "order", MissingOrderNumbering::AfterLast);
        assert_eq!(
            summary(&after_last),
            vec![
                ("b".into(), 0.0),
                ("a".into(), 1.0),
                ("c".into(), 2.0),
                ("d".into(), 3.0)
            ]
        );
    }

    #[test]
    fn test_ties_are_stable() {
        let items = vec![
            record("x", Some(json!(2))),
            record("y", Some(json!(1))),
            record("z", Some(json!(2))),
        ];
        let ordered = order_one_dimensional(&items, "order", MissingOrderNumbering::Legacy);
        let ids: Vec<_> = ordered.iter().map(|i| i.item.document_id.as_str()).collect();
        assert_eq!(ids, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_empty_group() {
        assert!(order_one_dimensional(&[], "order", MissingOrderNumbering::Legacy).is_empty());
        let only_missing = vec![record("a", None), record("b", None)];
        let ordered = order_one_dimensional(&only_missing, "order", MissingOrderNumbering::AfterLast);
        assert_eq!(summary(&ordered), vec![("a".into(), 0.0), ("b".into(), 1.0)]);
    }

    #[test]
    fn test_idempotent_after_write_back() {
        let fixtures = vec![
            vec![record("1", Some(json!(5))), record("2", None), record("3", Some(json!(1)))],
            vec![record("a", None), record("b", None), record("c", Some(json!(-4)))],
            vec![record("p", Some(json!(2.5))), record("q", Some(json!(2.5))), record("r", None)],
        ];

        for items in fixtures {
            let first = order_one_dimensional(&items, "order", MissingOrderNumbering::AfterLast);
            let second =
                order_one_dimensional(&written_back(&first), "order", MissingOrderNumbering::AfterLast);
            assert_eq!(summary(&first), summary(&second));
        }

        // для плотной нумерации 0..k-1 устаревшая нумерация тоже идемпотентна
        let dense = vec![record("a", Some(json!(1))), record("b", None), record("c", Some(json!(0)))];
        let first = order_one_dimensional(&dense, "order", MissingOrderNumbering::Legacy);
        let second = order_one_dimensional(&written_back(&first), "order", MissingOrderNumbering::Legacy);
        assert_eq!(summary(&first), summary(&second));
    }

    #[test]
    fn test_legacy_numbering_reorders_after_write_back() {
        let items = vec![
            record("1", Some(json!(5))),
            record("2", None),
            record("3", Some(json!(1))),
        ];

        let first = order_one_dimensional(&items, "order", MissingOrderNumbering::Legacy);
        let second = order_one_dimensional(&written_back(&first), "order", MissingOrderNumbering::Legacy);

        // номер 2, выданный по позиции, обгоняет явный номер 5
        let ids = |ordered: &[OrderedItem]| -> Vec<String> {
            ordered.iter().map(|i| i.item.document_id.clone()).collect()
        };
        assert_eq!(ids(&first), vec!["3", "1", "2"]);
        assert_eq!(ids(&second), vec!["3", "2", "1"]);

        let third = order_one_dimensional(&written_back(&second), "order", MissingOrderNumbering::Legacy);
        assert_eq!(summary(&second), summary(&third));
    }

    #[test]
    fn test_apply_order_emits_dense_indices() {
        let ids: Vec<String> = ["c", "a", "b"].iter().map(|s| s.to_string()).collect();
        let updates = apply_one_dimensional_order(&ids, "order");

        assert_eq!(updates.len(), 3);
        for (index, update) in updates.iter().enumerate() {
            assert_eq!(update.document_id, ids[index]);
            assert_eq!(update.field, "order");
            assert_eq!(update.value, json!(index));
        }
    }
}
