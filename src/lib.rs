/// word-calendar library
///
/// Core functionality for a personal vocabulary log: a persisted word list,
/// derived views (ranking, A-Z index, calendar heatmap) and list selection.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod intelligence;
pub mod logging;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::{Result, WordCalendarError};
