//! Message record

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sender literal for messages sent by this service
pub const LOCAL_SENDER: &str = "me";

/// An immutable record of a sent message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Record id, generated at creation
    pub id: Uuid,
    /// Sending party
    pub sender: String,
    /// Destination identifier
    pub recipient: String,
    /// Message text
    pub content: String,
    /// Creation time (UTC)
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl MessageRecord {
    /// Create a record of an outbound send with a fresh id and the current time
    /// (millisecond precision, so the record survives a storage round-trip intact)
    #[must_use]
    pub fn outbound(recipient: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: LOCAL_SENDER.to_string(),
            recipient: recipient.into(),
            content: content.into(),
            timestamp: Utc::now().trunc_subsecs(3),
        }
    }

    /// Timestamp in `YYYY-MM-DDTHH:MM:SS.mmmZ` form
    #[must_use]
    pub fn timestamp_iso(&self) -> String {
        iso_millis::format(&self.timestamp)
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix
pub(crate) mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub(crate) fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_record() {
        let record = MessageRecord::outbound("+15551234567", "hello");

        assert_eq!(record.sender, LOCAL_SENDER);
        assert_eq!(record.recipient, "+15551234567");
        assert_eq!(record.content, "hello");
        assert_eq!(record.id.get_version_num(), 4);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = MessageRecord::outbound("a", "x");
        let b = MessageRecord::outbound("a", "x");
        assert_ne!(a.id, b.id);
        assert!(b.timestamp >= a.timestamp);
    }

    #[test]
    fn test_timestamp_serializes_as_iso_millis() {
        let mut record = MessageRecord::outbound("+15551234567", "hello");
        record.timestamp = iso_millis::parse("2024-06-10T12:30:45.123Z").unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["timestamp"], "2024-06-10T12:30:45.123Z");
        assert_eq!(json["sender"], "me");
        assert_eq!(json["id"], record.id.to_string());

        let back: MessageRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
