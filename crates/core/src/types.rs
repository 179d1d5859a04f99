/// Question ids are the integer ids authored in the question bank.
pub type QuestionId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
