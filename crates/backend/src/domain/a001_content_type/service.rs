use super::repository;
use async_trait::async_trait;
use contracts::domain::a001_content_type::aggregate::{
    ContentTypeDescriptor, CustomFieldInfo, OrderFieldKind,
};

use crate::shared::group_order::field_config::{discover_field_configurations, GroupFieldPolicy};
use crate::shared::group_order::SchemaRegistry;

/// Зарегистрированные пользовательские поля: `order` и `order2d`
pub fn custom_fields() -> Vec<CustomFieldInfo> {
    OrderFieldKind::ALL.iter().copied().map(CustomFieldInfo::from).collect()
}

/// Все типы контента
pub async fn list_all() -> anyhow::Result<Vec<ContentTypeDescriptor>> {
    repository::list_all().await
}

/// Коллекции для навигации (single types не группируются)
pub async fn list_collection_types() -> anyhow::Result<Vec<ContentTypeDescriptor>> {
    let mut items: Vec<ContentTypeDescriptor> = repository::list_all()
        .await?
        .into_iter()
        .filter(|ct| ct.is_collection_type())
        .collect();
    items.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
    });
    Ok(items)
}

pub async fn get_by_uid(uid: &str) -> anyhow::Result<Option<ContentTypeDescriptor>> {
    repository::get_by_uid(uid).await
}

/// Проверка схемы перед сохранением
pub fn validate(descriptor: &ContentTypeDescriptor) -> anyhow::Result<()> {
    if descriptor.uid.trim().is_empty() {
        anyhow::bail!("Content type uid is required");
    }
    let mut names = std::collections::HashSet::new();
    for attribute in &descriptor.attributes {
        if attribute.name.trim().is_empty() {
            anyhow::bail!("Attribute name is required in {}", descriptor.uid);
        }
        if !names.insert(attribute.name.as_str()) {
            anyhow::bail!("Duplicate attribute '{}' in {}", attribute.name, descriptor.uid);
        }
    }
    // опции группировки проверяются тем же разбором, что и при чтении групп
    discover_field_configurations(descriptor, GroupFieldPolicy::Skip)
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    Ok(())
}

/// Создание или замена схемы типа контента
pub async fn upsert(mut descriptor: ContentTypeDescriptor) -> anyhow::Result<()> {
    if descriptor.display_name.trim().is_empty() {
        descriptor.display_name = descriptor.uid.clone();
    }
    validate(&descriptor)?;
    repository::upsert(&descriptor).await?;
    tracing::info!(
        "Content type {} saved ({} attributes)",
        descriptor.uid,
        descriptor.attributes.len()
    );
    Ok(())
}

/// Реестр схем поверх таблицы `content_types`
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentTypeRegistry;

#[async_trait]
impl SchemaRegistry for ContentTypeRegistry {
    async fn content_type(&self, uid: &str) -> anyhow::Result<Option<ContentTypeDescriptor>> {
        repository::get_by_uid(uid).await
    }

    async fn list_content_types(&self) -> anyhow::Result<Vec<ContentTypeDescriptor>> {
        repository::list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_content_type::aggregate::{AttributeDescriptor, AttributeKind};
    use serde_json::json;

    #[test]
    fn test_custom_fields() {
        let fields = custom_fields();
        let uids: Vec<_> = fields.iter().map(|f| f.uid.as_str()).collect();
        assert_eq!(uids, vec!["plugin::group-sort.order", "plugin::group-sort.order2d"]);
        assert_eq!(fields[0].storage_type, AttributeKind::Integer);
        assert_eq!(fields[1].storage_type, AttributeKind::Json);
    }

    #[test]
    fn test_validate() {
        let valid = ContentTypeDescriptor::new("api::article.article")
            .with_attribute(AttributeDescriptor::new("category", AttributeKind::String))
            .with_attribute(AttributeDescriptor::order_field(
                "order",
                OrderFieldKind::Order,
                json!({ "group": { "groupNameField": "category" } }),
            ));
        assert!(validate(&valid).is_ok());

        let duplicate = valid
            .clone()
            .with_attribute(AttributeDescriptor::new("category", AttributeKind::Text));
        assert!(validate(&duplicate).is_err());

        let bad_options = ContentTypeDescriptor::new("api::article.article").with_attribute(
            AttributeDescriptor::order_field(
                "cell",
                OrderFieldKind::Order2d,
                json!({ "group": { "groupNameField": "x", "columnsNumber": 500 } }),
            ),
        );
        assert!(validate(&bad_options).is_err());

        assert!(validate(&ContentTypeDescriptor::new(" ")).is_err());
    }
}
