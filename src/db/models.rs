/// Data models for persisted entities
///
/// `KvEntry` maps to the `kv_store` table. `WordRecord` is the element type of
/// the JSON array stored under the words key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Milliseconds since the Unix epoch. Doubles as a record's identity.
pub type Timestamp = i64;

/// One row of the key-value table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
    pub updated_at: String, // SQLite CURRENT_TIMESTAMP text
}

/// One word-entry event
///
/// Field names and formats match the stored JSON exactly:
/// `{"word": "cat", "date": "2024-01-01", "timestamp": 1704067200000}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    /// Local calendar date at creation, not derived from `timestamp`
    pub date: NaiveDate,
    pub timestamp: Timestamp,
}

impl WordRecord {
    pub fn new(word: impl Into<String>, date: NaiveDate, timestamp: Timestamp) -> Self {
        Self {
            word: word.into(),
            date,
            timestamp,
        }
    }

    /// Date in the stored `YYYY-MM-DD` form
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_record_json_shape() {
        let record = WordRecord::new(
            "cat",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            100,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"word": "cat", "date": "2024-01-01", "timestamp": 100})
        );
    }

    #[test]
    fn test_word_record_reads_browser_export() {
        let raw = r#"[{"word":"Hello","date":"2025-03-09","timestamp":1741500000123}]"#;
        let records: Vec<WordRecord> = serde_json::from_str(raw).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].word, "Hello");
        assert_eq!(records[0].iso_date(), "2025-03-09");
        assert_eq!(records[0].timestamp, 1_741_500_000_123);
    }
}
