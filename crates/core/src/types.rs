/// Backend primary keys are 64-bit identity columns.
pub type DbId = i64;

/// Instants (session start/end) are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates without a time zone (work started/finished).
pub type Date = chrono::NaiveDate;

/// A JSON object as sent to or received from the backend.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
