//! Trait for message storage backends

use crate::error::Result;
use crate::record::MessageRecord;
use uuid::Uuid;

/// Trait for message storage backends
///
/// Create-only: there is deliberately no update or delete.
#[async_trait::async_trait]
pub trait MessageStore: Send + Sync {
    /// Write a new record. Fails if a record with the same id exists.
    async fn put(&self, record: &MessageRecord) -> Result<()>;

    /// Read a record back by id
    async fn get(&self, id: Uuid) -> Result<Option<MessageRecord>>;

    /// Get the store name (for logging)
    fn name(&self) -> &str;
}
