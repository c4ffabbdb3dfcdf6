pub mod db;
pub mod plugin_store;
