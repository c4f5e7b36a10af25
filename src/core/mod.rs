/// Core functionality modules
///
/// The word store, list selection, and the list page controller that
/// combines them.

pub mod selection;
pub mod session;
pub mod store;

pub use selection::{DeletionPrompt, Selection, SelectionState};
pub use session::{DeletionOutcome, ListSession};
pub use store::{StoreEvent, WordStore};
