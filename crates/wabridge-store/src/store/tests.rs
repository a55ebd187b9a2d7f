//! Tests for store module

use super::*;
use crate::error::Error;
use crate::record::MessageRecord;

#[test]
fn test_validate_table_name() {
    assert!(validate_table_name("messages").is_ok());
    assert!(validate_table_name("Message_Table_2").is_ok());
    assert!(validate_table_name("_private").is_ok());

    assert!(validate_table_name("").is_err());
    assert!(validate_table_name("2fast").is_err());
    assert!(validate_table_name("messages; DROP TABLE x").is_err());
    assert!(validate_table_name("my-table").is_err());
}

#[tokio::test]
async fn test_in_memory_store() {
    let store = SqliteMessageStore::in_memory("messages").await.unwrap();
    assert_eq!(store.name(), "sqlite");
    assert_eq!(store.table(), "messages");

    let record = MessageRecord::outbound("+15551234567", "hello");
    store.put(&record).await.unwrap();

    let retrieved = store.get(record.id).await.unwrap().unwrap();
    assert_eq!(retrieved, record);
}

#[tokio::test]
async fn test_get_missing_record() {
    let store = SqliteMessageStore::in_memory("messages").await.unwrap();
    let missing = store.get(uuid::Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_records_are_create_only() {
    let store = SqliteMessageStore::in_memory("messages").await.unwrap();

    let record = MessageRecord::outbound("+15551234567", "first");
    store.put(&record).await.unwrap();

    let mut rewrite = record.clone();
    rewrite.content = "second".to_string();
    let err = store.put(&rewrite).await.unwrap_err();
    assert!(matches!(err, Error::Database(_)));

    let stored = store.get(record.id).await.unwrap().unwrap();
    assert_eq!(stored.content, "first");
}

#[tokio::test]
async fn test_invalid_table_rejected() {
    let result = SqliteMessageStore::in_memory("bad name").await;
    assert!(matches!(result, Err(Error::InvalidTableName(_))));
}

#[tokio::test]
async fn test_from_path_creates_database() {
    let dir = std::env::temp_dir().join(format!("wabridge-store-{}", uuid::Uuid::new_v4()));
    let db_path = dir.join("messages.db");

    let store = SqliteMessageStore::from_path(&db_path, "wa_messages")
        .await
        .unwrap();
    let record = MessageRecord::outbound("+15551234567", "persisted");
    store.put(&record).await.unwrap();

    assert!(db_path.exists());
    assert_eq!(store.get(record.id).await.unwrap().unwrap().content, "persisted");

    drop(store);
    let _ = std::fs::remove_dir_all(&dir);
}
