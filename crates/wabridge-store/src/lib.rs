//! wabridge Store - append-only message records
//!
//! - Record: the `MessageRecord` written for every outbound send
//! - Store: the `MessageStore` seam and its SQLite implementation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod record;
pub mod store;

pub use error::{Error, Result};
pub use record::{MessageRecord, LOCAL_SENDER};
pub use store::{validate_table_name, MessageStore, SqliteMessageStore};
