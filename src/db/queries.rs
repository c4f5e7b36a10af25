/// SQL query functions for the key-value table
///
/// The word list is one value; callers read it whole and overwrite it whole.

use crate::db::models::*;
use crate::db::Database;
use crate::error::Result;
use tracing::debug;

impl Database {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(None)` - Nothing stored yet
    /// * `Ok(Some(value))` - Raw stored text
    pub async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let entry = sqlx::query_as::<_, KvEntry>("SELECT * FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool())
            .await?;

        Ok(entry.map(|e| e.value))
    }

    /// Overwrite the value stored under `key`
    pub async fn set_value(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(self.pool())
        .await?;

        debug!(key, bytes = value.len(), "value written");
        Ok(())
    }

    /// Full row for `key`, including when it was last written
    pub async fn get_entry(&self, key: &str) -> Result<Option<KvEntry>> {
        let entry = sqlx::query_as::<_, KvEntry>("SELECT * FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool())
            .await?;

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let db = Database::new_test().await.unwrap();

        let value = db.get_value("wordsData").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let db = Database::new_test().await.unwrap();

        db.set_value("wordsData", "[]").await.unwrap();

        let value = db.get_value("wordsData").await.unwrap();
        assert_eq!(value, Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let db = Database::new_test().await.unwrap();

        db.set_value("k", "first").await.unwrap();
        db.set_value("k", "second").await.unwrap();

        assert_eq!(db.get_value("k").await.unwrap(), Some("second".to_string()));
        assert_eq!(db.stats().await.unwrap().total_keys, 1);
    }
}
