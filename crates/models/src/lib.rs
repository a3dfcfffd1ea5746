//! Document shapes persisted by the portal plus the relational `documents` table.
//!
//! Every type here serializes to the exact JSON stored by a backend; the API
//! views (`TeamView`, `PlayerMapping`) are derived from the stored records.

pub mod errors;
pub mod db;
pub mod document;
pub mod snowflake;
pub mod blog;
pub mod event;
pub mod team;
pub mod mapping;
pub mod stats;

pub use snowflake::Snowflake;
