pub mod a001_content_type;
pub mod a002_document;
pub mod form_settings;
pub mod group_sort;
pub mod plugin_settings;
