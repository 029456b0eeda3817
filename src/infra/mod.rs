//! Infrastructure adapters and runtime bootstrap.

pub mod backup;
pub mod cache;
pub mod error;
pub mod http;
pub mod memcached;
pub mod telemetry;
