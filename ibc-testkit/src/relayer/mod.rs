pub mod context;
pub mod utils;
