use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::a002_document::aggregate::{Position2d, Record};

/// Зарезервированное имя группы для записей без значения поля группировки
pub const UNDEFINED_GROUP_NAME: &str = "__undefined__";

/// Направление уплотнения 2D-раскладки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order2dDirection {
    Horizontal,
    Vertical,
}

impl Order2dDirection {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "horizontal" => Some(Order2dDirection::Horizontal),
            "vertical" => Some(Order2dDirection::Vertical),
            _ => None,
        }
    }
}

// ============================================================================
// Group results
// ============================================================================

/// Метаданные группы
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResultMeta {
    pub group_name: String,
    pub order_field: String,
    pub order2d_direction: Option<Order2dDirection>,
}

impl GroupResultMeta {
    pub fn is_undefined_group(&self) -> bool {
        self.group_name == UNDEFINED_GROUP_NAME
    }
}

/// Метаданные группы и её элементы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResult {
    #[serde(flatten)]
    pub meta: GroupResultMeta,
    pub items: Vec<Record>,
}

/// Элемент и метаданные всех групп, в которые он входит
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResultItem {
    pub item: Record,
    pub groups: Vec<GroupResultMeta>,
}

/// Ссылка навигации по группам
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupNavLink {
    pub title: String,
    pub group_name: String,
    pub order_field: String,
    pub place_on_top: bool,
}

// ============================================================================
// Arranged items
// ============================================================================

/// Элемент 1D-списка с вычисленным порядком
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedItem {
    pub item: Record,
    pub order: f64,
}

/// Элемент 2D-сетки с вычисленной позицией
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub item: Record,
    #[serde(flatten)]
    pub position: Position2d,
}

/// Превью элемента для страницы раскладки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPreview {
    pub document_id: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "orderType")]
pub enum Arrangement {
    #[serde(rename = "1d")]
    OneDimensional { items: Vec<OrderedItem> },
    #[serde(rename = "2d", rename_all = "camelCase")]
    TwoDimensional {
        columns_number: u32,
        items: Vec<PlacedItem>,
    },
}

impl Arrangement {
    pub fn len(&self) -> usize {
        match self {
            Arrangement::OneDimensional { items } => items.len(),
            Arrangement::TwoDimensional { items, .. } => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Группа, разложенная для редактирования порядка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrangedGroup {
    #[serde(flatten)]
    pub meta: GroupResultMeta,
    #[serde(flatten)]
    pub arrangement: Arrangement,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previews: Vec<ItemPreview>,
}

// ============================================================================
// Save-back
// ============================================================================

/// Новое значение поля порядка для одной записи
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub document_id: String,
    pub field: String,
    pub value: Value,
}

/// Позиция одной записи, присланная редактором 2D-сетки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionEntry {
    pub document_id: String,
    pub x: u32,
    pub y: u32,
    #[serde(default = "one")]
    pub w: u32,
    #[serde(default = "one")]
    pub h: u32,
}

fn one() -> u32 {
    1
}

impl PositionEntry {
    pub fn position(&self) -> Position2d {
        Position2d::new(self.x, self.y, self.w, self.h)
    }
}

/// Запрос на сохранение итогового порядка группы.
/// Для 1D передаётся `documentIds`, для 2D — `positions`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOrderRequest {
    #[serde(default)]
    pub document_ids: Vec<String>,
    #[serde(default)]
    pub positions: Vec<PositionEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSaveStatus {
    Saved,
    Failed,
    /// Не записан: сохранение прервано предыдущей ошибкой
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSaveResult {
    pub document_id: String,
    pub status: ItemSaveStatus,
    pub value: Value,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOrderResponse {
    pub saved: usize,
    pub failed: bool,
    pub results: Vec<ItemSaveResult>,
}
