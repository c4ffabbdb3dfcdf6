//! Capability interfaces of the host system consumed by the group-sort use cases.

use async_trait::async_trait;
use contracts::domain::a001_content_type::aggregate::ContentTypeDescriptor;
use contracts::domain::a002_document::aggregate::Record;
use serde_json::Value;

/// Реестр схем типов контента
#[async_trait]
pub trait SchemaRegistry: Send + Sync {
    async fn content_type(&self, uid: &str) -> anyhow::Result<Option<ContentTypeDescriptor>>;

    async fn list_content_types(&self) -> anyhow::Result<Vec<ContentTypeDescriptor>>;
}

/// Хранилище записей коллекций
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Все записи типа контента в порядке хранения
    async fn find_many(&self, uid: &str) -> anyhow::Result<Vec<Record>>;

    /// Запись одного поля одной записи
    async fn update_field(
        &self,
        uid: &str,
        document_id: &str,
        field: &str,
        value: Value,
    ) -> anyhow::Result<()>;
}
