// Owns the word list.
//
// Loaded once, held in memory, and written back in full after every change.
// Nothing outside this type touches the stored JSON.

use crate::db::{Database, Timestamp, WordRecord};
use crate::error::{Result, WordCalendarError};
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Published after a mutation has been persisted
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Appended(WordRecord),
    Deleted(Vec<Timestamp>),
}

pub struct WordStore {
    db: Arc<Database>,
    key: String,
    records: Vec<WordRecord>,
    last_timestamp: Timestamp,
    events: broadcast::Sender<StoreEvent>,
}

impl WordStore {
    /// Read the full list stored under `key`.
    ///
    /// A missing key is an empty list. A corrupt value is an error: nothing
    /// is loaded and nothing gets overwritten.
    pub async fn load(db: Arc<Database>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();

        let records: Vec<WordRecord> = match db.get_value(&key).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        debug!(key = %key, count = records.len(), "word list loaded");

        let last_timestamp = records.iter().map(|r| r.timestamp).max().unwrap_or(0);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            db,
            key,
            records,
            last_timestamp,
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Records in insertion order
    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add a word stamped with the current local time
    pub async fn append(&mut self, word: &str) -> Result<WordRecord> {
        self.append_at(word, Local::now()).await
    }

    /// Add a word as if entered at `now`.
    ///
    /// The date comes from the local wall clock, the timestamp from the epoch
    /// instant. Timestamps are kept strictly increasing so two fast entries
    /// never share an identity.
    pub async fn append_at(&mut self, word: &str, now: DateTime<Local>) -> Result<WordRecord> {
        let word = word.trim();
        if word.is_empty() {
            warn!("rejected empty word");
            return Err(WordCalendarError::InvalidWord("empty word".to_string()));
        }

        let next = self.last_timestamp.checked_add(1).ok_or_else(|| {
            WordCalendarError::Generic(format!(
                "no timestamp left after {}; stored list has an out-of-range entry",
                self.last_timestamp
            ))
        })?;
        let timestamp = now.timestamp_millis().max(next);
        let record = WordRecord::new(word, now.date_naive(), timestamp);

        self.records.push(record.clone());
        if let Err(e) = self.persist().await {
            self.records.pop();
            return Err(e);
        }
        self.last_timestamp = timestamp;

        info!(word = %record.word, date = %record.date, timestamp, "word added");
        let _ = self.events.send(StoreEvent::Appended(record.clone()));

        Ok(record)
    }

    /// Remove every record whose timestamp is in `timestamps`.
    ///
    /// Relative order of the survivors is unchanged. Returns how many records
    /// were removed.
    pub async fn delete_batch(&mut self, timestamps: &HashSet<Timestamp>) -> Result<usize> {
        if timestamps.is_empty() {
            warn!("delete requested with empty selection");
            return Err(WordCalendarError::EmptySelection);
        }

        let before = self.records.len();
        self.records.retain(|r| !timestamps.contains(&r.timestamp));
        let removed = before - self.records.len();

        self.persist().await?;

        info!(removed, remaining = self.records.len(), "words deleted");
        let mut deleted: Vec<Timestamp> = timestamps.iter().copied().collect();
        deleted.sort_unstable();
        let _ = self.events.send(StoreEvent::Deleted(deleted));

        Ok(removed)
    }

    /// Overwrite the stored list with the in-memory one
    async fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        self.db.set_value(&self.key, &json).await
    }
}
