use uuid::Uuid;

/// All primary keys are UUIDs assigned by the application when a row is created.
pub type DbId = Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh primary key.
///
/// Uses UUID v7 so keys sort roughly by creation time, which keeps the
/// primary-key index append-mostly.
pub fn new_id() -> DbId {
    Uuid::now_v7()
}
