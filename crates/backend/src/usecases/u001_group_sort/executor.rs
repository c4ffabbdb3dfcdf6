use contracts::domain::a001_content_type::aggregate::OrderFieldKind;
use contracts::shared::group_sort::{
    ItemSaveResult, ItemSaveStatus, OrderUpdate, SaveOrderRequest, SaveOrderResponse,
};
use std::collections::HashSet;

use super::service::GroupSortService;
use crate::shared::group_order::field_config::FieldConfiguration;
use crate::shared::group_order::layout_2d::apply_two_dimensional_order;
use crate::shared::group_order::order_1d::apply_one_dimensional_order;
use crate::shared::group_order::partition::group_members;
use crate::shared::group_order::{GroupKey, GroupSortError, GroupSortResult};

impl GroupSortService {
    /// Сохранение итогового порядка группы.
    ///
    /// Обновления вычисляются целиком до первой записи и пишутся по одному.
    /// Первая ошибка прерывает сохранение: уже записанные значения остаются,
    /// оставшиеся элементы отмечаются как `skipped`.
    pub async fn save_order(
        &self,
        uid: &str,
        order_field: &str,
        group_name: &str,
        request: &SaveOrderRequest,
    ) -> GroupSortResult<SaveOrderResponse> {
        let loaded = self.load(uid).await?;
        let config = loaded.config(uid, order_field)?;
        let key = GroupKey::from_group_name(group_name);

        let members: HashSet<String> = group_members(&loaded.records, config, &key)
            .into_iter()
            .map(|r| r.document_id)
            .collect();

        let updates = build_updates(config, request)?;
        check_membership(&updates, &members, key.as_group_name())?;

        tracing::info!(
            "Saving order of {} items in {} / {} / {}",
            updates.len(),
            uid,
            order_field,
            key.as_group_name()
        );

        let mut results = Vec::with_capacity(updates.len());
        let mut saved = 0;
        let mut failed = false;

        for update in updates {
            if failed {
                results.push(ItemSaveResult {
                    document_id: update.document_id,
                    status: ItemSaveStatus::Skipped,
                    value: update.value,
                    message: None,
                });
                continue;
            }

            match self
                .records
                .update_field(uid, &update.document_id, &update.field, update.value.clone())
                .await
            {
                Ok(()) => {
                    saved += 1;
                    results.push(ItemSaveResult {
                        document_id: update.document_id,
                        status: ItemSaveStatus::Saved,
                        value: update.value,
                        message: None,
                    });
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to save {} of {} in {}: {}",
                        update.field,
                        update.document_id,
                        uid,
                        e
                    );
                    failed = true;
                    results.push(ItemSaveResult {
                        document_id: update.document_id,
                        status: ItemSaveStatus::Failed,
                        value: update.value,
                        message: Some(e.to_string()),
                    });
                }
            }
        }

        if failed {
            tracing::warn!("Order of {} saved partially: {} of {}", uid, saved, results.len());
        }

        Ok(SaveOrderResponse {
            saved,
            failed,
            results,
        })
    }
}

/// Обновления полей по запросу редактора с проверкой формы запроса
fn build_updates(
    config: &FieldConfiguration,
    request: &SaveOrderRequest,
) -> GroupSortResult<Vec<OrderUpdate>> {
    let invalid = |message: String| GroupSortError::InvalidOrderRequest(message);

    match config.kind {
        OrderFieldKind::Order => {
            if !request.positions.is_empty() {
                return Err(invalid(format!(
                    "'{}' is a 1D order field, send documentIds",
                    config.order_field_name
                )));
            }
            check_unique(request.document_ids.iter().map(String::as_str))?;
            Ok(apply_one_dimensional_order(
                &request.document_ids,
                &config.order_field_name,
            ))
        }
        OrderFieldKind::Order2d => {
            if !request.document_ids.is_empty() {
                return Err(invalid(format!(
                    "'{}' is a 2D order field, send positions",
                    config.order_field_name
                )));
            }
            check_unique(request.positions.iter().map(|p| p.document_id.as_str()))?;
            for entry in &request.positions {
                let position = entry.position();
                if position.w == 0 || position.h == 0 {
                    return Err(invalid(format!(
                        "Empty size of {}",
                        entry.document_id
                    )));
                }
                if position.right() > config.columns_number {
                    return Err(invalid(format!(
                        "{} does not fit into {} columns",
                        entry.document_id, config.columns_number
                    )));
                }
            }
            Ok(apply_two_dimensional_order(
                &request.positions,
                &config.order_field_name,
            ))
        }
    }
}

fn check_unique<'a>(ids: impl Iterator<Item = &'a str>) -> GroupSortResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(GroupSortError::InvalidOrderRequest(format!(
                "Duplicate document {}",
                id
            )));
        }
    }
    Ok(())
}

fn check_membership(
    updates: &[OrderUpdate],
    members: &HashSet<String>,
    group_name: &str,
) -> GroupSortResult<()> {
    match updates.iter().find(|u| !members.contains(&u.document_id)) {
        Some(stranger) => Err(GroupSortError::InvalidOrderRequest(format!(
            "Document {} is not a member of group {}",
            stranger.document_id, group_name
        ))),
        None => Ok(()),
    }
}
