/// Error types for word-calendar
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for word-calendar operations
#[derive(Error, Debug)]
pub enum WordCalendarError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored word list could not be parsed or written as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Word input rejected before a record was created
    #[error("Invalid word: {0}")]
    InvalidWord(String),

    /// Delete pressed with nothing selected
    #[error("Nothing selected: pick at least one word before deleting")]
    EmptySelection,

    /// List view opened without a date
    #[error("No date specified")]
    MissingDate,

    /// Date or month argument that doesn't parse
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for word-calendar operations
pub type Result<T> = std::result::Result<T, WordCalendarError>;

impl WordCalendarError {
    /// Validation errors leave all state untouched and the user can just retry.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WordCalendarError::InvalidWord(_)
                | WordCalendarError::EmptySelection
                | WordCalendarError::MissingDate
                | WordCalendarError::InvalidDate(_)
        )
    }

    /// Convert to a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            WordCalendarError::Database(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            WordCalendarError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            WordCalendarError::Serialization(e) => {
                format!("Stored word list is corrupt and could not be read: {}", e)
            }
            WordCalendarError::InvalidWord(_) => "Please enter a word!".to_string(),
            WordCalendarError::EmptySelection => {
                "Select at least one word first, then press delete.".to_string()
            }
            WordCalendarError::MissingDate => "Error: no date specified.".to_string(),
            WordCalendarError::InvalidDate(value) => {
                format!("'{}' is not a valid date (expected YYYY-MM-DD)", value)
            }
            WordCalendarError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            WordCalendarError::Generic(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = WordCalendarError::InvalidDate("2024-13-01".to_string());
        assert!(err.user_message().contains("2024-13-01"));

        let err = WordCalendarError::EmptySelection;
        assert!(err.user_message().contains("Select at least one word"));
    }

    #[test]
    fn test_error_display() {
        let err = WordCalendarError::InvalidWord("empty word".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Invalid word"));
    }

    #[test]
    fn test_validation_classification() {
        assert!(WordCalendarError::EmptySelection.is_validation());
        assert!(WordCalendarError::MissingDate.is_validation());
        assert!(!WordCalendarError::Generic("boom".to_string()).is_validation());
    }
}
