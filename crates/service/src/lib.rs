//! Service layer for the community portal.
//! - `storage`: pluggable blob backends and the JSON document store on top.
//! - `auth`: static-secret gate and password hashing.
//! - `services`: one service per resource (blog, events, teams, mappings, stats, token).

pub mod auth;
pub mod config_store;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use services::Services;
