use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_content_type::aggregate::{ContentTypeDescriptor, CustomFieldInfo};
use serde_json::json;

use crate::domain::a001_content_type;

/// GET /api/group-sort/custom-fields
pub async fn list_custom_fields() -> Json<Vec<CustomFieldInfo>> {
    Json(a001_content_type::service::custom_fields())
}

/// GET /api/group-sort/content-types
pub async fn list_collection_types() -> Result<Json<Vec<ContentTypeDescriptor>>, StatusCode> {
    match a001_content_type::service::list_collection_types().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list content types: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/group-sort/content-types/:uid
pub async fn get_by_uid(Path(uid): Path<String>) -> Result<Json<ContentTypeDescriptor>, StatusCode> {
    match a001_content_type::service::get_by_uid(&uid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load content type {}: {}", uid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PUT /api/group-sort/content-types
pub async fn upsert(
    Json(descriptor): Json<ContentTypeDescriptor>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let uid = descriptor.uid.clone();
    if let Err(e) = a001_content_type::service::validate(&descriptor) {
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }
    match a001_content_type::service::upsert(descriptor).await {
        Ok(()) => Ok(Json(json!({ "uid": uid }))),
        Err(e) => {
            tracing::error!("Failed to save content type {}: {}", uid, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ))
        }
    }
}
