pub mod mock;
pub mod transfer;
