pub mod form_settings;
pub mod group_sort;
pub mod plugin_settings;
