pub mod page;
pub mod runtime_config;
pub mod shared_config;
pub mod view_model;

pub use page::*;
pub use runtime_config::*;
pub use shared_config::*;
pub use view_model::*;
