pub mod config;
pub mod data;
pub mod group_order;
