use contracts::domain::a001_content_type::aggregate::OrderFieldKind;
use contracts::domain::a002_document::aggregate::Record;
use contracts::shared::form_settings::LocalConfig;
use contracts::shared::group_sort::{
    ArrangedGroup, Arrangement, GroupNavLink, GroupResult, GroupResultItem, GroupResultMeta,
};
use std::sync::Arc;

use crate::domain::a001_content_type::service::ContentTypeRegistry;
use crate::domain::a002_document::service::DocumentStore;
use crate::shared::config;
use crate::shared::group_order::compaction::compact;
use crate::shared::group_order::field_config::resolve_field_configurations;
use crate::shared::group_order::layout_2d::layout_two_dimensional;
use crate::shared::group_order::order_1d::order_one_dimensional;
use crate::shared::group_order::partition::group_members;
use crate::shared::group_order::preview::item_preview;
use crate::shared::group_order::{
    groups, FieldConfiguration, GroupKey, GroupSortError, GroupSortOptions, GroupSortResult,
    RecordStore, SchemaRegistry,
};

/// Группы и порядок записей одного типа контента.
///
/// Хранилища передаются снаружи; сам сервис ничего не кэширует,
/// каждый вызов читает схему и записи заново.
#[derive(Clone)]
pub struct GroupSortService {
    pub(super) schemas: Arc<dyn SchemaRegistry>,
    pub(super) records: Arc<dyn RecordStore>,
    pub(super) options: GroupSortOptions,
}

/// Схема, конфигурации полей порядка и все записи типа контента
pub(super) struct LoadedCollection {
    pub configs: Vec<FieldConfiguration>,
    pub records: Vec<Record>,
}

impl LoadedCollection {
    pub fn config(&self, uid: &str, order_field: &str) -> GroupSortResult<&FieldConfiguration> {
        self.configs
            .iter()
            .find(|c| c.order_field_name == order_field)
            .ok_or_else(|| GroupSortError::OrderFieldNotFound {
                uid: uid.to_string(),
                order_field: order_field.to_string(),
            })
    }
}

impl GroupSortService {
    pub fn new(
        schemas: Arc<dyn SchemaRegistry>,
        records: Arc<dyn RecordStore>,
        options: GroupSortOptions,
    ) -> Self {
        Self {
            schemas,
            records,
            options,
        }
    }

    /// Сервис поверх SQLite-хранилищ с политиками из конфигурации
    pub fn for_database() -> Self {
        Self::new(
            Arc::new(ContentTypeRegistry),
            Arc::new(DocumentStore),
            config::group_sort_options(),
        )
    }

    pub(super) async fn load(&self, uid: &str) -> GroupSortResult<LoadedCollection> {
        let (_, configs) =
            resolve_field_configurations(self.schemas.as_ref(), uid, self.options.group_field_policy)
                .await?;
        let records = self.records.find_many(uid).await?;
        tracing::debug!(
            "Loaded {} records and {} order fields of {}",
            records.len(),
            configs.len(),
            uid
        );
        Ok(LoadedCollection { configs, records })
    }

    /// Одна группа: метаданные и записи в порядке хранения
    pub async fn get_group(
        &self,
        uid: &str,
        order_field: &str,
        group_name: &str,
    ) -> GroupSortResult<GroupResult> {
        let loaded = self.load(uid).await?;
        let config = loaded.config(uid, order_field)?;
        Ok(groups::find_group(
            &loaded.records,
            config,
            &GroupKey::from_group_name(group_name),
        ))
    }

    /// Уникальные метаданные всех групп типа контента
    pub async fn get_group_names(&self, uid: &str) -> GroupSortResult<Vec<GroupResultMeta>> {
        let loaded = self.load(uid).await?;
        Ok(groups::list_groups(&loaded.records, &loaded.configs))
    }

    pub async fn get_groups_with_items(&self, uid: &str) -> GroupSortResult<Vec<GroupResult>> {
        let loaded = self.load(uid).await?;
        Ok(groups::groups_with_items(&loaded.records, &loaded.configs))
    }

    pub async fn get_items_with_groups(&self, uid: &str) -> GroupSortResult<Vec<GroupResultItem>> {
        let loaded = self.load(uid).await?;
        Ok(groups::items_with_groups(&loaded.records, &loaded.configs))
    }

    /// Ссылки навигации по группам
    pub async fn get_group_links(
        &self,
        uid: &str,
        search: Option<&str>,
    ) -> GroupSortResult<Vec<GroupNavLink>> {
        let names = self.get_group_names(uid).await?;
        Ok(groups::group_nav_links(&names, search))
    }

    /// Группа, разложенная для редактора: 1D-порядок или 2D-сетка
    /// (с уплотнением по направлению поля). При переданных настройках
    /// отображения к результату добавляются превью элементов.
    pub async fn get_arranged_group(
        &self,
        uid: &str,
        order_field: &str,
        group_name: &str,
        local_config: Option<&LocalConfig>,
    ) -> GroupSortResult<ArrangedGroup> {
        let loaded = self.load(uid).await?;
        let config = loaded.config(uid, order_field)?;
        let key = GroupKey::from_group_name(group_name);
        let members = group_members(&loaded.records, config, &key);

        let arrangement = match config.kind {
            OrderFieldKind::Order => Arrangement::OneDimensional {
                items: order_one_dimensional(
                    &members,
                    &config.order_field_name,
                    self.options.missing_order_numbering,
                ),
            },
            OrderFieldKind::Order2d => {
                let placed =
                    layout_two_dimensional(&members, &config.order_field_name, config.columns_number);
                Arrangement::TwoDimensional {
                    columns_number: config.columns_number,
                    items: compact(placed, config.order2d_direction, config.columns_number),
                }
            }
        };

        let previews = match local_config {
            Some(local) => members.iter().map(|r| item_preview(r, local)).collect(),
            None => Vec::new(),
        };

        Ok(ArrangedGroup {
            meta: config.group_meta(&key),
            arrangement,
            previews,
        })
    }
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use crate::shared::group_order::ports::memory::{MemoryRecordStore, MemorySchemaRegistry};
    use crate::shared::group_order::{GroupFieldPolicy, MissingOrderNumbering};
    use contracts::domain::a001_content_type::aggregate::{
        AttributeDescriptor, AttributeKind, ContentTypeDescriptor,
    };
    use contracts::domain::a002_document::aggregate::Position2d;
    use contracts::shared::group_sort::{Order2dDirection, UNDEFINED_GROUP_NAME};
    use serde_json::json;

    pub(crate) const UID: &str = "api::product.product";

    pub(crate) fn product_type() -> ContentTypeDescriptor {
        ContentTypeDescriptor::new(UID)
            .with_attribute(AttributeDescriptor::new("title", AttributeKind::String))
            .with_attribute(AttributeDescriptor::new("category", AttributeKind::String))
            .with_attribute(AttributeDescriptor::order_field(
                "order",
                OrderFieldKind::Order,
                json!({ "group": { "groupNameField": "category" } }),
            ))
            .with_attribute(AttributeDescriptor::order_field(
                "cell",
                OrderFieldKind::Order2d,
                json!({ "group": {
                    "groupNameField": "category",
                    "columnsNumber": 3,
                    "order2dDirection": "vertical"
                } }),
            ))
    }

    pub(crate) fn products() -> Vec<Record> {
        vec![
            Record::new("1")
                .with_field("title", json!("Lamp"))
                .with_field("category", json!("A"))
                .with_field("order", json!(5)),
            Record::new("2")
                .with_field("title", json!("Desk"))
                .with_field("category", json!("A")),
            Record::new("3")
                .with_field("title", json!("Chair"))
                .with_field("category", json!("A"))
                .with_field("order", json!(1))
                .with_field("cell", json!({"x": 2, "y": 0, "w": 1, "h": 1})),
            Record::new("4").with_field("title", json!("Rug")),
        ]
    }

    pub(crate) fn service_with(store: Arc<MemoryRecordStore>, options: GroupSortOptions) -> GroupSortService {
        GroupSortService::new(
            Arc::new(MemorySchemaRegistry::new(vec![product_type()])),
            store,
            options,
        )
    }

    fn service() -> GroupSortService {
        service_with(
            Arc::new(MemoryRecordStore::with_records(UID, products())),
            GroupSortOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_unknown_content_type_is_client_error() {
        let err = service().get_group_names("api::missing.missing").await.unwrap_err();
        assert!(matches!(err, GroupSortError::ContentTypeNotFound(ref uid) if uid == "api::missing.missing"));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_unknown_order_field() {
        let err = service().get_group(UID, "title", "A").await.unwrap_err();
        assert!(matches!(err, GroupSortError::OrderFieldNotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_group_and_sentinel() {
        let service = service();

        let group = service.get_group(UID, "order", "A").await.unwrap();
        let ids: Vec<_> = group.items.iter().map(|r| r.document_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(group.meta.group_name, "A");

        let ungrouped = service.get_group(UID, "order", UNDEFINED_GROUP_NAME).await.unwrap();
        assert_eq!(ungrouped.items.len(), 1);
        assert_eq!(ungrouped.items[0].document_id, "4");
    }

    #[tokio::test]
    async fn test_group_names() {
        let names = service().get_group_names(UID).await.unwrap();
        assert_eq!(names.len(), 4);
        assert_eq!(names[0].group_name, "A");
        assert_eq!(names[0].order_field, "order");
        assert_eq!(names[1].order2d_direction, Some(Order2dDirection::Vertical));

        let links = service().get_group_links(UID, None).await.unwrap();
        assert!(links[0].place_on_top && links[1].place_on_top);
        assert_eq!(links[2].title, "A (cell)");
    }

    #[tokio::test]
    async fn test_views_over_all_groups() {
        let service = service();

        let groups = service.get_groups_with_items(UID).await.unwrap();
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].items.len(), 3);

        let items = service.get_items_with_groups(UID).await.unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[3].groups.len(), 2);
        assert!(items[3].groups.iter().all(|g| g.is_undefined_group()));
    }

    #[tokio::test]
    async fn test_arranged_one_dimensional() {
        let arranged = service().get_arranged_group(UID, "order", "A", None).await.unwrap();

        match arranged.arrangement {
            Arrangement::OneDimensional { items } => {
                let summary: Vec<_> = items
                    .iter()
                    .map(|i| (i.item.document_id.as_str(), i.order))
                    .collect();
                assert_eq!(summary, vec![("3", 1.0), ("1", 5.0), ("2", 2.0)]);
            }
            other => panic!("expected 1d arrangement, got {:?}", other),
        }
        assert!(arranged.previews.is_empty());
    }

    #[tokio::test]
    async fn test_arranged_one_dimensional_after_last() {
        let service = service_with(
            Arc::new(MemoryRecordStore::with_records(UID, products())),
            GroupSortOptions {
                group_field_policy: GroupFieldPolicy::Skip,
                missing_order_numbering: MissingOrderNumbering::AfterLast,
            },
        );
        let arranged = service.get_arranged_group(UID, "order", "A", None).await.unwrap();
        let Arrangement::OneDimensional { items } = arranged.arrangement else {
            panic!("expected 1d arrangement");
        };
        assert_eq!(items[2].order, 6.0);
    }

    #[tokio::test]
    async fn test_arranged_two_dimensional_is_compacted() {
        let local = LocalConfig {
            chosen_title_field: "title".into(),
            ..LocalConfig::default()
        };
        let arranged = service()
            .get_arranged_group(UID, "cell", "A", Some(&local))
            .await
            .unwrap();

        let Arrangement::TwoDimensional { columns_number, items } = arranged.arrangement else {
            panic!("expected 2d arrangement");
        };
        assert_eq!(columns_number, 3);

        // "3" хранится в (2,0); "1" и "2" продолжают сетку с (0,1) и (1,1),
        // вертикальное уплотнение поднимает их в первую строку
        let positions: Vec<_> = items
            .iter()
            .map(|p| (p.item.document_id.as_str(), p.position))
            .collect();
        assert_eq!(
            positions,
            vec![
                ("1", Position2d::cell(0, 0)),
                ("2", Position2d::cell(1, 0)),
                ("3", Position2d::cell(2, 0)),
            ]
        );

        let titles: Vec<_> = arranged.previews.iter().map(|p| p.title.as_deref()).collect();
        assert_eq!(titles, vec![Some("Lamp"), Some("Desk"), Some("Chair")]);
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_missing_group_field() {
        let broken = ContentTypeDescriptor::new(UID).with_attribute(AttributeDescriptor::order_field(
            "order",
            OrderFieldKind::Order,
            json!({ "group": { "groupNameField": "category" } }),
        ));
        let service = GroupSortService::new(
            Arc::new(MemorySchemaRegistry::new(vec![broken])),
            Arc::new(MemoryRecordStore::with_records(UID, products())),
            GroupSortOptions {
                group_field_policy: GroupFieldPolicy::Fail,
                missing_order_numbering: MissingOrderNumbering::Legacy,
            },
        );

        let err = service.get_group_names(UID).await.unwrap_err();
        assert!(matches!(err, GroupSortError::GroupFieldNotFound { .. }));
    }
}
