use contracts::domain::a001_content_type::aggregate::{
    AttributeDescriptor, ContentTypeDescriptor, OrderFieldKind,
};
use contracts::shared::group_sort::{GroupResultMeta, Order2dDirection};
use serde::Deserialize;
use serde_json::Value;

use super::error::{GroupSortError, GroupSortResult};
use super::partition::GroupKey;
use super::ports::SchemaRegistry;

pub const DEFAULT_COLUMNS_NUMBER: u32 = 12;
pub const MAX_COLUMNS_NUMBER: u32 = 100;
pub const DEFAULT_ROW_HEIGHT: f64 = 3.0;
pub const MIN_ROW_HEIGHT: f64 = 0.1;
pub const MAX_ROW_HEIGHT: f64 = 100.0;

/// Что делать с полем порядка, чьё поле группировки отсутствует в схеме
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupFieldPolicy {
    /// Пропустить конфигурацию с предупреждением в логе
    #[default]
    Skip,
    /// Вернуть `GroupFieldNotFound`
    Fail,
}

/// Проверенная конфигурация одного поля порядка
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfiguration {
    pub order_field_name: String,
    pub group_field_name: String,
    pub kind: OrderFieldKind,
    pub columns_number: u32,
    pub row_height: f64,
    pub order2d_direction: Option<Order2dDirection>,
}

impl FieldConfiguration {
    /// Метаданные группы с заданным ключом для этой конфигурации
    pub fn group_meta(&self, key: &GroupKey) -> GroupResultMeta {
        GroupResultMeta {
            group_name: key.as_group_name().to_string(),
            order_field: self.order_field_name.clone(),
            order2d_direction: self.order2d_direction,
        }
    }

    /// Разбор `options.group` атрибута.
    ///
    /// `Ok(None)` — атрибут не участвует в группировке.
    pub fn parse(attribute: &AttributeDescriptor) -> GroupSortResult<Option<Self>> {
        let Some(options) = attribute.group_options() else {
            return Ok(None);
        };
        let invalid = |reason: String| GroupSortError::InvalidFieldOptions {
            field: attribute.name.clone(),
            reason,
        };

        let group_field_name = match options.get("groupNameField") {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(s)) if s.is_empty() => return Ok(None),
            Some(Value::String(s)) => s.clone(),
            Some(other) => return Err(invalid(format!("groupNameField must be a string, got {}", other))),
        };

        let Some(kind) = attribute.order_kind() else {
            return Err(invalid(format!(
                "attribute of type {:?} cannot hold an order",
                attribute.kind
            )));
        };

        let columns_number = match options.get("columnsNumber") {
            None | Some(Value::Null) => DEFAULT_COLUMNS_NUMBER,
            Some(v) => {
                let n = v
                    .as_f64()
                    .filter(|n| n.fract() == 0.0)
                    .ok_or_else(|| invalid(format!("columnsNumber must be an integer, got {}", v)))?;
                if n < 1.0 || n > MAX_COLUMNS_NUMBER as f64 {
                    return Err(invalid(format!(
                        "columnsNumber must be within 1..={}, got {}",
                        MAX_COLUMNS_NUMBER, n
                    )));
                }
                n as u32
            }
        };

        let row_height = match options.get("rowHeight") {
            None | Some(Value::Null) => DEFAULT_ROW_HEIGHT,
            Some(v) => {
                let h = v
                    .as_f64()
                    .ok_or_else(|| invalid(format!("rowHeight must be a number, got {}", v)))?;
                if !(MIN_ROW_HEIGHT..=MAX_ROW_HEIGHT).contains(&h) {
                    return Err(invalid(format!(
                        "rowHeight must be within {}..={}, got {}",
                        MIN_ROW_HEIGHT, MAX_ROW_HEIGHT, h
                    )));
                }
                h
            }
        };

        let order2d_direction = match options.get("order2dDirection") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(
                Order2dDirection::from_code(s)
                    .ok_or_else(|| invalid(format!("unknown order2dDirection '{}'", s)))?,
            ),
            Some(other) => {
                return Err(invalid(format!("order2dDirection must be a string, got {}", other)))
            }
        };

        Ok(Some(Self {
            order_field_name: attribute.name.clone(),
            group_field_name,
            kind,
            columns_number,
            row_height,
            order2d_direction,
        }))
    }
}

/// Поиск пар «поле порядка / поле группировки», объявленных в типе контента
pub fn discover_field_configurations(
    content_type: &ContentTypeDescriptor,
    policy: GroupFieldPolicy,
) -> GroupSortResult<Vec<FieldConfiguration>> {
    let mut configs = Vec::new();

    for attribute in &content_type.attributes {
        if attribute.has_foreign_custom_field() {
            continue;
        }

        let Some(config) = FieldConfiguration::parse(attribute)? else {
            continue;
        };

        match content_type.attribute(&config.group_field_name) {
            Some(group) if !group.kind.is_groupable() => {
                return Err(GroupSortError::InvalidFieldOptions {
                    field: config.order_field_name,
                    reason: format!(
                        "group field '{}' of type {:?} cannot be grouped by",
                        group.name, group.kind
                    ),
                })
            }
            Some(_) => {}
            None => match policy {
                GroupFieldPolicy::Fail => {
                    return Err(GroupSortError::GroupFieldNotFound {
                        group_field: config.group_field_name,
                        order_field: config.order_field_name,
                    })
                }
                GroupFieldPolicy::Skip => {
                    tracing::warn!(
                        "Skipping order field '{}' of {}: group field '{}' not found",
                        config.order_field_name,
                        content_type.uid,
                        config.group_field_name
                    );
                    continue;
                }
            },
        }

        configs.push(config);
    }

    Ok(configs)
}

/// Загрузка типа контента из реестра и поиск его конфигураций
pub async fn resolve_field_configurations(
    registry: &dyn SchemaRegistry,
    uid: &str,
    policy: GroupFieldPolicy,
) -> GroupSortResult<(ContentTypeDescriptor, Vec<FieldConfiguration>)> {
    let content_type = registry
        .content_type(uid)
        .await?
        .ok_or_else(|| GroupSortError::ContentTypeNotFound(uid.to_string()))?;
    let configs = discover_field_configurations(&content_type, policy)?;
    Ok((content_type, configs))
}
