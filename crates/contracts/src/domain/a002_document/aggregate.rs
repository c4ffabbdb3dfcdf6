use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static NULL_VALUE: Value = Value::Null;

// ============================================================================
// Record
// ============================================================================

/// Запись (документ) коллекции: стабильный идентификатор и произвольные поля.
///
/// Поля читаются только через [`Record::get_field`]; отсутствующее поле
/// неотличимо от `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "documentId")]
    pub document_id: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Значение поля; для отсутствующего поля возвращается `Value::Null`
    pub fn get_field(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&NULL_VALUE)
    }

    /// Числовое значение порядка (1D), если оно задано
    pub fn order_value(&self, field: &str) -> Option<f64> {
        self.get_field(field).as_f64().filter(|v| v.is_finite())
    }

    /// Позиция на сетке (2D), если она задана и корректна
    pub fn position_value(&self, field: &str) -> Option<Position2d> {
        Position2d::from_value(self.get_field(field))
    }

    /// Слияние частичного обновления полей. `documentId` не перезаписывается.
    pub fn merge_fields(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            if key == "documentId" {
                continue;
            }
            self.fields.insert(key, value);
        }
    }
}

// ============================================================================
// 2D position
// ============================================================================

/// Позиция элемента на сетке: колонка, строка, ширина и высота в ячейках
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position2d {
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

impl Position2d {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Ячейка 1x1
    pub fn cell(x: u32, y: u32) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// Разбор сохранённого значения поля `order2d`.
    ///
    /// `x` и `y` обязательны и должны быть неотрицательными целыми;
    /// `w` и `h` по умолчанию равны 1 и должны быть не меньше 1.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let coord = |key: &str, default: Option<u32>| -> Option<u32> {
            match obj.get(key) {
                None | Some(Value::Null) => default,
                Some(v) => v.as_u64().and_then(|n| u32::try_from(n).ok()),
            }
        };

        let position = Self {
            x: coord("x", None)?,
            y: coord("y", None)?,
            w: coord("w", Some(1))?,
            h: coord("h", Some(1))?,
        };
        (position.w >= 1 && position.h >= 1).then_some(position)
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ "x": self.x, "y": self.y, "w": self.w, "h": self.h })
    }

    /// Правая граница (первая свободная колонка справа)
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Нижняя граница (первая свободная строка снизу)
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Пересечение прямоугольников
    pub fn overlaps(&self, other: &Position2d) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
