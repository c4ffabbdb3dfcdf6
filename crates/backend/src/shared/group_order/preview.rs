use contracts::domain::a002_document::aggregate::Record;
use contracts::shared::form_settings::LocalConfig;
use contracts::shared::group_sort::ItemPreview;
use serde_json::Value;

/// Превью записи по выбранным пользователем полям
pub fn item_preview(record: &Record, config: &LocalConfig) -> ItemPreview {
    ItemPreview {
        document_id: record.document_id.clone(),
        title: config.title_field().and_then(|f| display_text(record.get_field(f))),
        subtitle: config.subtitle_field().and_then(|f| display_text(record.get_field(f))),
        thumbnail_url: config.media_field().and_then(|f| thumbnail_url(record.get_field(f))),
    }
}

fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// URL миниатюры медиа-поля: `formats.thumbnail` > `formats.small` > исходный файл.
/// Для множественного медиа берётся первый файл.
pub fn thumbnail_url(media: &Value) -> Option<String> {
    let media = match media {
        Value::Array(files) => files.first()?,
        other => other,
    };

    let url_at = |path: &[&str]| -> Option<String> {
        path.iter()
            .try_fold(media, |node, key| node.get(*key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    url_at(&["formats", "thumbnail", "url"])
        .or_else(|| url_at(&["formats", "small", "url"]))
        .or_else(|| url_at(&["url"]))
}
