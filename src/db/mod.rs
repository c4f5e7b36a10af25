/// Database module for word-calendar
///
/// The persistence collaborator: a SQLite key-value table behind sqlx.
/// Implements connection pooling for performance.

pub mod connection;
pub mod models;
pub mod queries;

pub use connection::Database;
pub use models::*;
