use super::repository;
use async_trait::async_trait;
use contracts::domain::a002_document::aggregate::Record;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::a001_content_type;
use crate::shared::group_order::RecordStore;

/// Документы типа контента; `None`, если тип не зарегистрирован
pub async fn list(uid: &str) -> anyhow::Result<Option<Vec<Record>>> {
    if a001_content_type::service::get_by_uid(uid).await?.is_none() {
        return Ok(None);
    }
    repository::list_by_content_type(uid).await.map(Some)
}

/// Запись из тела запроса: `documentId` берётся из полей или генерируется
pub fn new_record(mut fields: Map<String, Value>) -> Record {
    let document_id = match fields.remove("documentId") {
        Some(Value::String(id)) if !id.trim().is_empty() => id,
        _ => Uuid::new_v4().to_string(),
    };
    Record {
        document_id,
        fields,
    }
}

/// Создание документа; `None`, если тип не зарегистрирован
pub async fn create(uid: &str, fields: Map<String, Value>) -> anyhow::Result<Option<Record>> {
    if a001_content_type::service::get_by_uid(uid).await?.is_none() {
        return Ok(None);
    }
    let record = new_record(fields);
    repository::insert(uid, &record).await?;
    tracing::info!("Document {} created in {}", record.document_id, uid);
    Ok(Some(record))
}

/// Обновление документа слиянием полей; `None`, если документ не найден
pub async fn update(
    uid: &str,
    document_id: &str,
    patch: Map<String, Value>,
) -> anyhow::Result<Option<Record>> {
    let Some(mut record) = repository::get_by_document_id(uid, document_id).await? else {
        return Ok(None);
    };
    record.merge_fields(patch);
    if !repository::update_fields(uid, &record).await? {
        return Ok(None);
    }
    Ok(Some(record))
}

/// Хранилище записей поверх таблицы `documents`
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentStore;

#[async_trait]
impl RecordStore for DocumentStore {
    async fn find_many(&self, uid: &str) -> anyhow::Result<Vec<Record>> {
        repository::list_by_content_type(uid).await
    }

    async fn update_field(
        &self,
        uid: &str,
        document_id: &str,
        field: &str,
        value: Value,
    ) -> anyhow::Result<()> {
        let mut patch = Map::new();
        patch.insert(field.to_string(), value);
        update(uid, document_id, patch)
            .await?
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("Document not found: {}", document_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_record_keeps_given_id() {
        let mut fields = Map::new();
        fields.insert("documentId".into(), json!("doc-1"));
        fields.insert("title".into(), json!("First"));

        let record = new_record(fields);
        assert_eq!(record.document_id, "doc-1");
        assert_eq!(record.get_field("title"), &json!("First"));
        assert!(!record.fields.contains_key("documentId"));
    }

    #[test]
    fn test_new_record_generates_id() {
        let mut fields = Map::new();
        fields.insert("documentId".into(), json!(""));
        let record = new_record(fields);
        assert!(Uuid::parse_str(&record.document_id).is_ok());
    }
}
