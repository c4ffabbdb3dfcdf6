//! Группировка и ручной порядок записей.
//!
//! Чистые вычисления над списком записей и метаданными типа контента:
//! поиск пар «поле порядка / поле группировки», разбиение на группы,
//! канонический порядок (1D) и раскладка на сетке (2D), обратное
//! преобразование отредактированного порядка в обновления полей.
//! Доступ к хранилищам передаётся через [`ports`].

pub mod compaction;
pub mod error;
pub mod field_config;
pub mod groups;
pub mod layout_2d;
pub mod order_1d;
pub mod partition;
pub mod ports;
pub mod preview;

pub use error::{GroupSortError, GroupSortResult};
pub use field_config::{FieldConfiguration, GroupFieldPolicy};
pub use order_1d::MissingOrderNumbering;
pub use partition::GroupKey;
pub use ports::{RecordStore, SchemaRegistry};

/// Политики движка, задаются в секции `[group_sort]` конфигурации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupSortOptions {
    pub group_field_policy: GroupFieldPolicy,
    pub missing_order_numbering: MissingOrderNumbering,
}
