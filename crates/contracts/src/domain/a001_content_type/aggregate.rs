use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Plugin identity
// ============================================================================

/// Идентификатор плагина, под которым регистрируются пользовательские поля
pub const PLUGIN_ID: &str = "group-sort";

/// Вид поля порядка: скалярный индекс или позиция на 2D-сетке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderFieldKind {
    #[serde(rename = "order")]
    Order,
    #[serde(rename = "order2d")]
    Order2d,
}

impl OrderFieldKind {
    pub const ALL: [OrderFieldKind; 2] = [OrderFieldKind::Order, OrderFieldKind::Order2d];

    /// Имя пользовательского поля без префикса плагина
    pub fn name(&self) -> &'static str {
        match self {
            OrderFieldKind::Order => "order",
            OrderFieldKind::Order2d => "order2d",
        }
    }

    /// Тип хранения значения в базе хоста
    pub fn storage_type(&self) -> AttributeKind {
        match self {
            OrderFieldKind::Order => AttributeKind::Integer,
            OrderFieldKind::Order2d => AttributeKind::Json,
        }
    }

    /// Полный UID пользовательского поля, например `plugin::group-sort.order`
    pub fn custom_field_uid(&self) -> String {
        format!("plugin::{}.{}", PLUGIN_ID, self.name())
    }

    pub fn from_custom_field_uid(uid: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.custom_field_uid() == uid)
    }
}

/// Описание зарегистрированного пользовательского поля
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldInfo {
    pub name: String,
    pub plugin: String,
    pub uid: String,
    #[serde(rename = "type")]
    pub storage_type: AttributeKind,
}

impl From<OrderFieldKind> for CustomFieldInfo {
    fn from(kind: OrderFieldKind) -> Self {
        Self {
            name: kind.name().to_string(),
            plugin: PLUGIN_ID.to_string(),
            uid: kind.custom_field_uid(),
            storage_type: kind.storage_type(),
        }
    }
}

// ============================================================================
// Attribute
// ============================================================================

/// Примитивный тип атрибута типа контента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Text,
    Richtext,
    Email,
    Password,
    Uid,
    Enumeration,
    Date,
    Time,
    Datetime,
    Timestamp,
    Number,
    Integer,
    Biginteger,
    Float,
    Decimal,
    Boolean,
    Json,
    Media,
    Relation,
    Component,
    Dynamiczone,
    Blocks,
    #[serde(other)]
    Other,
}

impl AttributeKind {
    /// Типы, которые могут хранить порядок внутри группы
    pub fn is_orderable(&self) -> bool {
        matches!(
            self,
            AttributeKind::Number
                | AttributeKind::Integer
                | AttributeKind::Biginteger
                | AttributeKind::Float
                | AttributeKind::Decimal
                | AttributeKind::Json
        )
    }

    /// Типы, по значению которых допускается группировка
    pub fn is_groupable(&self) -> bool {
        !matches!(
            self,
            AttributeKind::Component
                | AttributeKind::Dynamiczone
                | AttributeKind::Blocks
                | AttributeKind::Other
        )
    }
}

/// Атрибут типа контента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: AttributeKind,

    /// UID пользовательского поля, если атрибут им является
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_field: Option<String>,

    /// Произвольные опции атрибута; настройки группировки лежат в `options.group`
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            custom_field: None,
            options: Value::Null,
        }
    }

    /// Атрибут-поле плагина (`order` или `order2d`)
    pub fn order_field(name: impl Into<String>, kind: OrderFieldKind, options: Value) -> Self {
        Self {
            name: name.into(),
            kind: kind.storage_type(),
            custom_field: Some(kind.custom_field_uid()),
            options,
        }
    }

    /// Атрибут помечен пользовательским полем другого плагина
    pub fn has_foreign_custom_field(&self) -> bool {
        self.custom_field
            .as_deref()
            .is_some_and(|uid| !uid.starts_with(&format!("plugin::{}", PLUGIN_ID)))
    }

    /// Вид поля порядка. Для нативных атрибутов определяется по типу хранения.
    pub fn order_kind(&self) -> Option<OrderFieldKind> {
        match self.custom_field.as_deref() {
            Some(uid) => OrderFieldKind::from_custom_field_uid(uid),
            None if self.kind == AttributeKind::Json => Some(OrderFieldKind::Order2d),
            None if self.kind.is_orderable() => Some(OrderFieldKind::Order),
            None => None,
        }
    }

    /// Блок настроек группировки `options.group`
    pub fn group_options(&self) -> Option<&Value> {
        self.options.get("group").filter(|v| !v.is_null())
    }
}

// ============================================================================
// Content type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ContentTypeKind {
    #[default]
    CollectionType,
    SingleType,
}

impl ContentTypeKind {
    pub fn code(&self) -> &'static str {
        match self {
            ContentTypeKind::CollectionType => "collectionType",
            ContentTypeKind::SingleType => "singleType",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "collectionType" => Some(ContentTypeKind::CollectionType),
            "singleType" => Some(ContentTypeKind::SingleType),
            _ => None,
        }
    }
}

/// Описание типа контента (схема коллекции)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeDescriptor {
    /// UID типа, например `api::article.article`
    pub uid: String,

    #[serde(default)]
    pub kind: ContentTypeKind,

    #[serde(default)]
    pub display_name: String,

    /// Атрибуты в порядке объявления
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
}

impl ContentTypeDescriptor {
    pub fn new(uid: impl Into<String>) -> Self {
        let uid = uid.into();
        Self {
            display_name: uid.clone(),
            uid,
            kind: ContentTypeKind::CollectionType,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn is_collection_type(&self) -> bool {
        self.kind == ContentTypeKind::CollectionType
    }
}
