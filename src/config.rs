// Runtime configuration, read from the environment.

use crate::error::{Result, WordCalendarError};
use std::path::PathBuf;

pub const DEFAULT_STORAGE_KEY: &str = "wordsData";
const DEFAULT_LOG_LEVEL: &str = "warn";
const DATA_DIR_NAME: &str = ".word-calendar";
const DB_FILE_NAME: &str = "words.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let data_dir = match std::env::var("WORD_CALENDAR_HOME") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => dirs::home_dir()
                .ok_or_else(|| {
                    WordCalendarError::Config("Could not determine home directory".to_string())
                })?
                .join(DATA_DIR_NAME),
        };

        let storage_key = std::env::var("WORD_CALENDAR_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            data_dir,
            storage_key,
            log_level,
        })
    }

    /// Config rooted at an explicit directory, defaults for everything else.
    pub fn with_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_data_dir_defaults() {
        let config = Config::with_data_dir("/tmp/wc");
        assert_eq!(config.storage_key, "wordsData");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/wc/words.db"));
    }
}
