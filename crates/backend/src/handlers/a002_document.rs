use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_document::aggregate::Record;
use serde_json::{Map, Value};

use crate::domain::a002_document;

/// GET /api/group-sort/content-types/:uid/documents
pub async fn list(Path(uid): Path<String>) -> Result<Json<Vec<Record>>, StatusCode> {
    match a002_document::service::list(&uid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to list documents of {}: {}", uid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/group-sort/content-types/:uid/documents
pub async fn create(
    Path(uid): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Record>, StatusCode> {
    match a002_document::service::create(&uid, fields).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to create document in {}: {}", uid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PUT /api/group-sort/content-types/:uid/documents/:document_id
///
/// Обновление одной записи: переданные поля сливаются с сохранёнными.
pub async fn update(
    Path((uid, document_id)): Path<(String, String)>,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<Record>, StatusCode> {
    match a002_document::service::update(&uid, &document_id, patch).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update document {}: {}", document_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
