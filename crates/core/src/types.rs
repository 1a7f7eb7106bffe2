/// All database primary keys are UUIDs assigned by Postgres
/// (`gen_random_uuid()`); mobile clients exchange them as opaque strings.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
