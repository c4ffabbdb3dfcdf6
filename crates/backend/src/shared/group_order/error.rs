use thiserror::Error;

/// Ошибки вычисления групп и сохранения порядка
#[derive(Debug, Error)]
pub enum GroupSortError {
    #[error("Content type not found: {0}")]
    ContentTypeNotFound(String),

    #[error("Group field '{group_field}' of order field '{order_field}' not found")]
    GroupFieldNotFound {
        group_field: String,
        order_field: String,
    },

    #[error("Order field '{order_field}' is not configured for grouping in {uid}")]
    OrderFieldNotFound { uid: String, order_field: String },

    #[error("Invalid group options of field '{field}': {reason}")]
    InvalidFieldOptions { field: String, reason: String },

    #[error("Invalid order request: {0}")]
    InvalidOrderRequest(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl GroupSortError {
    /// Ошибка вызывающей стороны (400), а не сбой сервера
    pub fn is_client_error(&self) -> bool {
        !matches!(self, GroupSortError::Store(_))
    }
}

pub type GroupSortResult<T> = Result<T, GroupSortError>;
