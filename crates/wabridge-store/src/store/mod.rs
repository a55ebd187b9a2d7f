//! Store - append-only persistence of message records
//!
//! Records are written once and never updated or deleted. The SQLite
//! backend uses sqlx (embedded, no external service required).

mod sqlite;
mod traits;

#[cfg(test)]
mod tests;

pub use sqlite::{validate_table_name, SqliteMessageStore};
pub use traits::MessageStore;
