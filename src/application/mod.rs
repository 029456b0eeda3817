//! Application services layer.

pub mod backup;
pub mod error;
pub mod store;
