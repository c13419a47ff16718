/// All entity identifiers are UUIDs (v4 on creation).
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Prices are whole Korean won (currency minor unit), never negative.
pub type Won = i64;
