use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // CONTENT TYPES & DOCUMENTS (host adapter)
        // ========================================
        .route(
            "/api/group-sort/custom-fields",
            get(handlers::a001_content_type::list_custom_fields),
        )
        .route(
            "/api/group-sort/content-types",
            get(handlers::a001_content_type::list_collection_types)
                .put(handlers::a001_content_type::upsert),
        )
        .route(
            "/api/group-sort/content-types/:uid",
            get(handlers::a001_content_type::get_by_uid),
        )
        .route(
            "/api/group-sort/content-types/:uid/documents",
            get(handlers::a002_document::list).post(handlers::a002_document::create),
        )
        .route(
            "/api/group-sort/content-types/:uid/documents/:document_id",
            put(handlers::a002_document::update),
        )
        // ========================================
        // GROUPS
        // ========================================
        .route(
            "/api/group-sort/groups/:uid",
            get(handlers::group_sort::get_groups_with_items),
        )
        .route(
            "/api/group-sort/groups/:uid/:order_field/:group_name",
            get(handlers::group_sort::get_group),
        )
        .route(
            "/api/group-sort/groups/:uid/:order_field/:group_name/arranged",
            get(handlers::group_sort::get_arranged_group),
        )
        .route(
            "/api/group-sort/groups/:uid/:order_field/:group_name/order",
            put(handlers::group_sort::save_order),
        )
        .route(
            "/api/group-sort/group-names/:uid",
            get(handlers::group_sort::get_group_names),
        )
        .route(
            "/api/group-sort/group-links/:uid",
            get(handlers::group_sort::get_group_links),
        )
        .route(
            "/api/group-sort/items-with-groups/:uid",
            get(handlers::group_sort::get_items_with_groups),
        )
        // ========================================
        // SETTINGS
        // ========================================
        .route(
            "/api/group-sort/settings",
            get(handlers::plugin_settings::get_settings)
                .put(handlers::plugin_settings::update_settings),
        )
        .route(
            "/api/group-sort/local-config/*key",
            get(handlers::form_settings::get_settings).put(handlers::form_settings::save_settings),
        )
}
