//! Ephemeral TODO lists kept in a volatile key-value cache.
//!
//! Lists and their tasks live under separate cache keys; the store keeps the
//! two consistent using single-key operations only and tolerates entries the
//! cache evicts behind its back.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
