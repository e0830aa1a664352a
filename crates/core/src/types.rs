/// Catalog primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Transactional entities (incidents, persons) are keyed by the field
/// server that created them, so they carry opaque text identifiers.
pub type SyncId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
