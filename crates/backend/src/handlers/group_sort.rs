use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::shared::form_settings::local_config_key;
use contracts::shared::group_sort::{
    ArrangedGroup, GroupNavLink, GroupResult, GroupResultItem, GroupResultMeta, SaveOrderRequest,
    SaveOrderResponse,
};
use serde::Deserialize;

use crate::handlers::form_settings;
use crate::shared::group_order::GroupSortError;
use crate::usecases::u001_group_sort::GroupSortService;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

/// Ошибки вызывающей стороны — 400, остальное — 500 без подробностей
pub fn error_response(err: GroupSortError) -> (StatusCode, String) {
    if err.is_client_error() {
        tracing::warn!("Bad group-sort request: {}", err);
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        tracing::error!("Group-sort request failed: {:#}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    }
}

fn service() -> GroupSortService {
    GroupSortService::for_database()
}

/// GET /api/group-sort/groups/:uid
pub async fn get_groups_with_items(Path(uid): Path<String>) -> ApiResult<Vec<GroupResult>> {
    service()
        .get_groups_with_items(&uid)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/group-sort/group-names/:uid
pub async fn get_group_names(Path(uid): Path<String>) -> ApiResult<Vec<GroupResultMeta>> {
    service()
        .get_group_names(&uid)
        .await
        .map(Json)
        .map_err(error_response)
}

#[derive(Debug, Deserialize)]
pub struct GroupLinksQuery {
    pub search: Option<String>,
}

/// GET /api/group-sort/group-links/:uid?search=
pub async fn get_group_links(
    Path(uid): Path<String>,
    Query(query): Query<GroupLinksQuery>,
) -> ApiResult<Vec<GroupNavLink>> {
    service()
        .get_group_links(&uid, query.search.as_deref())
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/group-sort/items-with-groups/:uid
pub async fn get_items_with_groups(Path(uid): Path<String>) -> ApiResult<Vec<GroupResultItem>> {
    service()
        .get_items_with_groups(&uid)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/group-sort/groups/:uid/:order_field/:group_name
pub async fn get_group(
    Path((uid, order_field, group_name)): Path<(String, String, String)>,
) -> ApiResult<GroupResult> {
    service()
        .get_group(&uid, &order_field, &group_name)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/group-sort/groups/:uid/:order_field/:group_name/arranged
///
/// Превью добавляются, если для группы сохранены настройки отображения.
pub async fn get_arranged_group(
    Path((uid, order_field, group_name)): Path<(String, String, String)>,
) -> ApiResult<ArrangedGroup> {
    let key = local_config_key(&uid, &order_field, &group_name);
    let local_config = form_settings::load_local_config(&key).await.map_err(|e| {
        tracing::error!("Failed to load local config {}: {}", key, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    })?;

    service()
        .get_arranged_group(&uid, &order_field, &group_name, local_config.as_ref())
        .await
        .map(Json)
        .map_err(error_response)
}

/// PUT /api/group-sort/groups/:uid/:order_field/:group_name/order
pub async fn save_order(
    Path((uid, order_field, group_name)): Path<(String, String, String)>,
    Json(request): Json<SaveOrderRequest>,
) -> ApiResult<SaveOrderResponse> {
    service()
        .save_order(&uid, &order_field, &group_name, &request)
        .await
        .map(Json)
        .map_err(error_response)
}
