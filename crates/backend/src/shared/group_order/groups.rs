use contracts::domain::a002_document::aggregate::Record;
use contracts::shared::group_sort::{GroupNavLink, GroupResult, GroupResultItem, GroupResultMeta};
use std::collections::{HashMap, HashSet};

use super::field_config::FieldConfiguration;
use super::partition::{group_members, GroupKey};

/// Заголовок ссылки на группу записей без значения поля группировки
pub const UNDEFINED_GROUP_TITLE: &str = "No group";

/// Метаданные всех групп записи, по одной на каждую конфигурацию
fn record_groups(record: &Record, configs: &[FieldConfiguration]) -> Vec<GroupResultMeta> {
    configs
        .iter()
        .map(|config| config.group_meta(&GroupKey::of(record, &config.group_field_name)))
        .collect()
}

/// Каждая запись с метаданными групп, в которые она входит
pub fn items_with_groups(records: &[Record], configs: &[FieldConfiguration]) -> Vec<GroupResultItem> {
    records
        .iter()
        .map(|record| GroupResultItem {
            item: record.clone(),
            groups: record_groups(record, configs),
        })
        .collect()
}

/// Уникальные метаданные групп в порядке первого появления
pub fn list_groups(records: &[Record], configs: &[FieldConfiguration]) -> Vec<GroupResultMeta> {
    let mut seen: HashSet<GroupResultMeta> = HashSet::new();
    let mut groups = Vec::new();

    for record in records {
        for meta in record_groups(record, configs) {
            if seen.insert(meta.clone()) {
                groups.push(meta);
            }
        }
    }

    groups
}

/// Все группы со своими записями; порядок групп как у [`list_groups`]
pub fn groups_with_items(records: &[Record], configs: &[FieldConfiguration]) -> Vec<GroupResult> {
    let mut index: HashMap<GroupResultMeta, usize> = HashMap::new();
    let mut groups: Vec<GroupResult> = Vec::new();

    for record in records {
        for meta in record_groups(record, configs) {
            let slot = match index.get(&meta) {
                Some(&slot) => slot,
                None => {
                    index.insert(meta.clone(), groups.len());
                    groups.push(GroupResult {
                        meta,
                        items: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            groups[slot].items.push(record.clone());
        }
    }

    groups
}

/// Одна группа по ключу; пустая группа не является ошибкой
pub fn find_group(records: &[Record], config: &FieldConfiguration, key: &GroupKey) -> GroupResult {
    GroupResult {
        meta: config.group_meta(key),
        items: group_members(records, config, key),
    }
}

/// Ссылки навигации по группам.
///
/// Группа без значения идёт первой. Имена, встречающиеся у нескольких
/// полей порядка, дополняются именем поля. Остальное сортируется
/// без учёта регистра; `search` фильтрует по префиксу заголовка.
pub fn group_nav_links(groups: &[GroupResultMeta], search: Option<&str>) -> Vec<GroupNavLink> {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for group in groups {
        *occurrences.entry(group.group_name.as_str()).or_default() += 1;
    }

    let search = search.map(str::to_lowercase).filter(|s| !s.is_empty());

    let mut links: Vec<GroupNavLink> = groups
        .iter()
        .map(|group| {
            let place_on_top = group.is_undefined_group();
            let name = if place_on_top {
                UNDEFINED_GROUP_TITLE
            } else {
                group.group_name.as_str()
            };
            let title = if occurrences[group.group_name.as_str()] > 1 {
                format!("{} ({})", name, group.order_field)
            } else {
                name.to_string()
            };
            GroupNavLink {
                title,
                group_name: group.group_name.clone(),
                order_field: group.order_field.clone(),
                place_on_top,
            }
        })
        .filter(|link| match &search {
            Some(prefix) => link.title.to_lowercase().starts_with(prefix.as_str()),
            None => true,
        })
        .collect();

    links.sort_by(|a, b| {
        b.place_on_top
            .cmp(&a.place_on_top)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
    links
}
