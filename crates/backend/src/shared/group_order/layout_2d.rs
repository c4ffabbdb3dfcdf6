use contracts::domain::a002_document::aggregate::{Position2d, Record};
use contracts::shared::group_sort::{OrderUpdate, PlacedItem, PositionEntry};

/// Раскладка 2D-группы на сетке из `columns_number` колонок.
///
/// Записи с сохранённой позицией остаются на месте. Записи без позиции
/// (или с некорректной) размещаются ячейками 1x1 слева направо, сверху вниз,
/// продолжая сетку правее самой правой занятой колонки в самой нижней
/// занятой строке. Порядок результата совпадает с порядком `items`.
pub fn layout_two_dimensional(items: &[Record], order_field: &str, columns_number: u32) -> Vec<PlacedItem> {
    let columns = u64::from(columns_number.max(1));
    let positions: Vec<Option<Position2d>> = items
        .iter()
        .map(|r| r.position_value(order_field))
        .collect();

    let (last_x, last_y) = positions
        .iter()
        .flatten()
        .fold(None, |acc: Option<(u64, u64)>, p| {
            let right = u64::from(p.right());
            let bottom_row = u64::from(p.bottom() - 1);
            Some(match acc {
                Some((x, y)) => (x.max(right), y.max(bottom_row)),
                None => (right, bottom_row),
            })
        })
        .unwrap_or((0, 0));

    let mut next_default: u64 = 0;
    items
        .iter()
        .zip(positions)
        .map(|(record, stored)| {
            let position = stored.unwrap_or_else(|| {
                let slot = next_default + last_x;
                next_default += 1;
                Position2d::cell(
                    to_coord(slot % columns),
                    to_coord(last_y + slot / columns),
                )
            });
            PlacedItem {
                item: record.clone(),
                position,
            }
        })
        .collect()
}

fn to_coord(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Значения позиций для раскладки, собранной редактором
pub fn apply_two_dimensional_order(entries: &[PositionEntry], order_field: &str) -> Vec<OrderUpdate> {
    entries
        .iter()
        .map(|entry| OrderUpdate {
            document_id: entry.document_id.clone(),
            field: order_field.to_string(),
            value: entry.position().to_value(),
        })
        .collect()
}
