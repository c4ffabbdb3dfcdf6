use contracts::domain::a002_document::aggregate::Position2d;
use contracts::shared::group_sort::{Order2dDirection, PlacedItem};

/// Уплотнение 2D-раскладки.
///
/// - `Vertical`: элементы поднимаются вверх по своей колонке;
/// - `Horizontal`: элементы сдвигаются влево по своей строке, при выходе
///   за ширину сетки переносятся на следующую строку;
/// - `None`: раскладка не меняется.
///
/// Элементы обрабатываются в порядке обхода сетки (для `Vertical` строка,
/// затем колонка; для `Horizontal` наоборот), равные позиции разрешаются
/// по исходному порядку. Порядок результата совпадает с порядком `items`.
pub fn compact(
    items: Vec<PlacedItem>,
    direction: Option<Order2dDirection>,
    columns_number: u32,
) -> Vec<PlacedItem> {
    let Some(direction) = direction else {
        return items;
    };

    let mut sequence: Vec<usize> = (0..items.len()).collect();
    match direction {
        Order2dDirection::Vertical => {
            sequence.sort_by_key(|&i| (items[i].position.y, items[i].position.x, i));
        }
        Order2dDirection::Horizontal => {
            sequence.sort_by_key(|&i| (items[i].position.x, items[i].position.y, i));
        }
    }

    let columns = columns_number.max(1);
    let mut placed: Vec<Position2d> = Vec::with_capacity(items.len());
    let mut compacted: Vec<Option<Position2d>> = vec![None; items.len()];

    for index in sequence {
        let position = match direction {
            Order2dDirection::Vertical => compact_vertical(items[index].position, &placed),
            Order2dDirection::Horizontal => {
                compact_horizontal(items[index].position, &placed, columns)
            }
        };
        placed.push(position);
        compacted[index] = Some(position);
    }

    items
        .into_iter()
        .zip(compacted)
        .map(|(mut item, position)| {
            if let Some(position) = position {
                item.position = position;
            }
            item
        })
        .collect()
}

fn first_collision<'a>(position: &Position2d, placed: &'a [Position2d]) -> Option<&'a Position2d> {
    placed.iter().find(|p| p.overlaps(position))
}

fn compact_vertical(mut position: Position2d, placed: &[Position2d]) -> Position2d {
    while position.y > 0 {
        let candidate = Position2d { y: position.y - 1, ..position };
        if first_collision(&candidate, placed).is_some() {
            break;
        }
        position = candidate;
    }

    // исходная позиция могла пересекаться с уже размещёнными
    while let Some(collider) = first_collision(&position, placed) {
        position.y = collider.bottom();
    }
    position
}

fn compact_horizontal(mut position: Position2d, placed: &[Position2d], columns: u32) -> Position2d {
    while position.x > 0 {
        let candidate = Position2d { x: position.x - 1, ..position };
        if first_collision(&candidate, placed).is_some() {
            break;
        }
        position = candidate;
    }

    while let Some(collider) = first_collision(&position, placed) {
        position.x = collider.right();
        if position.right() > columns.max(position.w) {
            position.x = 0;
            position.y += 1;
        }
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_document::aggregate::Record;

    fn item(id: &str, position: Position2d) -> PlacedItem {
        PlacedItem {
            item: Record::new(id),
            position,
        }
    }

    fn positions(items: &[PlacedItem]) -> Vec<(u32, u32)> {
        items.iter().map(|p| (p.position.x, p.position.y)).collect()
    }

    fn assert_no_overlaps(items: &[PlacedItem]) {
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                assert!(
                    !a.position.overlaps(&b.position),
                    "{} overlaps {}",
                    a.item.document_id,
                    b.item.document_id
                );
            }
        }
    }

    #[test]
    fn test_no_direction_keeps_layout() {
        let items = vec![item("a", Position2d::cell(3, 4)), item("b", Position2d::cell(0, 9))];
        let result = compact(items.clone(), None, 12);
        assert_eq!(result, items);
    }

    #[test]
    fn test_vertical_moves_items_up() {
        let items = vec![
            item("a", Position2d::cell(0, 3)),
            item("b", Position2d::cell(1, 5)),
            item("c", Position2d::cell(0, 6)),
        ];
        let result = compact(items, Some(Order2dDirection::Vertical), 2);
        assert_eq!(positions(&result), vec![(0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn test_vertical_stacks_under_tall_item() {
        let items = vec![
            item("tall", Position2d::new(0, 2, 2, 3)),
            item("below", Position2d::cell(1, 8)),
        ];
        let result = compact(items, Some(Order2dDirection::Vertical), 4);
        assert_eq!(result[0].position, Position2d::new(0, 0, 2, 3));
        assert_eq!(result[1].position, Position2d::cell(1, 3));
    }

    #[test]
    fn test_horizontal_moves_items_left() {
        let items = vec![
            item("a", Position2d::cell(3, 0)),
            item("b", Position2d::cell(5, 0)),
            item("c", Position2d::cell(2, 1)),
        ];
        let result = compact(items, Some(Order2dDirection::Horizontal), 6);
        assert_eq!(positions(&result), vec![(0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn test_ties_resolved_by_original_order() {
        let items = vec![item("first", Position2d::cell(0, 2)), item("second", Position2d::cell(0, 2))];

        let vertical = compact(items.clone(), Some(Order2dDirection::Vertical), 3);
        assert_eq!(positions(&vertical), vec![(0, 0), (0, 1)]);

        let horizontal = compact(items, Some(Order2dDirection::Horizontal), 3);
        assert_eq!(positions(&horizontal), vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn test_horizontal_wraps_at_grid_width() {
        let items = vec![
            item("a", Position2d::new(0, 0, 2, 1)),
            item("b", Position2d::new(0, 0, 2, 1)),
        ];
        let result = compact(items, Some(Order2dDirection::Horizontal), 3);
        assert_eq!(result[0].position, Position2d::new(0, 0, 2, 1));
        assert_eq!(result[1].position, Position2d::new(0, 1, 2, 1));
    }

    #[test]
    fn test_compaction_never_overlaps() {
        let layout = vec![
            item("a", Position2d::new(2, 0, 2, 2)),
            item("b", Position2d::cell(2, 1)),
            item("c", Position2d::new(0, 5, 3, 1)),
            item("d", Position2d::cell(1, 1)),
            item("e", Position2d::cell(1, 1)),
            item("f", Position2d::new(3, 7, 1, 4)),
        ];

        for direction in [Order2dDirection::Vertical, Order2dDirection::Horizontal] {
            let result = compact(layout.clone(), Some(direction), 4);
            assert_eq!(result.len(), layout.len());
            let ids: Vec<_> = result.iter().map(|p| p.item.document_id.as_str()).collect();
            assert_eq!(ids, vec!["a", "b", "c", "d", "e", "f"]);
            assert_no_overlaps(&result);
        }
    }
}
