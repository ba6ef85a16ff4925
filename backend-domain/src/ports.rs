pub mod view_sink;

pub use view_sink::*;
