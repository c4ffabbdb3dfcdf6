pub mod executor;
pub mod service;

pub use service::GroupSortService;
