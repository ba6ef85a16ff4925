pub mod config_queries;
pub mod page_queries;
