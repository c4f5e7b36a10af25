// List page controller
//
// Ties the store, the date being viewed and the selection together, and runs
// the confirm-then-delete protocol.

use crate::core::selection::{Selection, SelectionState};
use crate::core::store::WordStore;
use crate::db::Timestamp;
use crate::error::Result;
use crate::intelligence::{ranking_rows, ListPage, RankingRow};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Result of pressing the delete control with something selected
#[derive(Debug, Clone, PartialEq)]
pub enum DeletionOutcome {
    /// User backed out; store and selection untouched
    Cancelled,
    /// Words removed and both views recomputed
    Deleted {
        removed: usize,
        page: ListPage,
        ranking: Vec<RankingRow>,
    },
}

pub struct ListSession {
    store: WordStore,
    date: Option<NaiveDate>,
    selection: Selection,
}

impl ListSession {
    pub fn new(store: WordStore, date: Option<NaiveDate>) -> Self {
        Self {
            store,
            date,
            selection: Selection::new(),
        }
    }

    pub fn store(&self) -> &WordStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Redraw the list. Any selection is dropped.
    pub fn render(&mut self) -> ListPage {
        self.selection.reset();
        ListPage::build(self.store.records(), self.date)
    }

    pub fn ranking(&self) -> Vec<RankingRow> {
        ranking_rows(self.store.records())
    }

    pub fn click(&mut self, timestamp: Timestamp, multi: bool) -> SelectionState {
        let state = self.selection.click(timestamp, multi);
        debug!(?state, label = %self.selection.button_label(), "selection changed");
        state
    }

    pub fn button_label(&self) -> String {
        self.selection.button_label()
    }

    /// Delete the selection after `confirm` approves the prompt message.
    ///
    /// Nothing selected is a validation error and `confirm` is never called.
    /// The redraw runs only after the confirmation step has returned and the
    /// task has yielded once.
    pub async fn delete_selected<F>(&mut self, confirm: F) -> Result<DeletionOutcome>
    where
        F: FnOnce(&str) -> bool,
    {
        let prompt = self.selection.prompt(self.store.records())?;

        if !confirm(&prompt.message) {
            debug!("deletion cancelled");
            return Ok(DeletionOutcome::Cancelled);
        }

        let removed = self.store.delete_batch(&prompt.targets).await?;
        self.selection.reset();
        info!(removed, "selection deleted");

        tokio::task::yield_now().await;

        Ok(DeletionOutcome::Deleted {
            removed,
            page: self.render(),
            ranking: self.ranking(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::error::WordCalendarError;
    use chrono::{Local, TimeZone};
    use std::sync::Arc;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    async fn setup() -> (ListSession, Vec<Timestamp>) {
        let db = Arc::new(Database::new_test().await.unwrap());
        let mut store = WordStore::load(db, "wordsData").await.unwrap();

        let noon = Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().unwrap();
        let mut stamps = Vec::new();
        for word in ["dog", "cat", "dog", "ant"] {
            stamps.push(store.append_at(word, noon).await.unwrap().timestamp);
        }

        (ListSession::new(store, Some(day())), stamps)
    }

    #[tokio::test]
    async fn test_render_resets_selection() {
        let (mut session, stamps) = setup().await;

        session.click(stamps[0], false);
        assert_eq!(session.button_label(), "Delete selected (1)");

        let page = session.render();
        assert!(session.selection().is_empty());
        assert_eq!(session.button_label(), "Delete selected");

        let words: Vec<&str> = page.records().iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["ant", "cat", "dog", "dog"]);
    }

    #[tokio::test]
    async fn test_delete_with_nothing_selected() {
        let (mut session, _) = setup().await;
        let mut asked = false;

        let result = session
            .delete_selected(|_| {
                asked = true;
                true
            })
            .await;

        match result {
            Err(WordCalendarError::EmptySelection) => {}
            _ => panic!("Expected EmptySelection error"),
        }
        assert!(!asked);
        assert_eq!(session.store().len(), 4);
    }

    #[tokio::test]
    async fn test_delete_cancelled() {
        let (mut session, stamps) = setup().await;
        session.click(stamps[1], false);

        let outcome = session.delete_selected(|_| false).await.unwrap();

        assert_eq!(outcome, DeletionOutcome::Cancelled);
        assert_eq!(session.store().len(), 4);
        assert_eq!(session.selection().state(), SelectionState::Single(stamps[1]));
    }

    #[tokio::test]
    async fn test_delete_single_confirmed() {
        let (mut session, stamps) = setup().await;
        session.click(stamps[1], false);

        let mut shown = String::new();
        let outcome = session
            .delete_selected(|message| {
                shown = message.to_string();
                true
            })
            .await
            .unwrap();

        assert_eq!(shown, "Delete the selected word \"cat\"?");
        match outcome {
            DeletionOutcome::Deleted { removed, page, ranking } => {
                assert_eq!(removed, 1);
                let words: Vec<&str> = page.records().iter().map(|r| r.word.as_str()).collect();
                assert_eq!(words, vec!["ant", "dog", "dog"]);
                assert_eq!(ranking[0].word, "dog");
                assert_eq!(ranking[0].count, 2);
            }
            DeletionOutcome::Cancelled => panic!("Expected deletion"),
        }
        assert_eq!(session.selection().state(), SelectionState::Idle);
    }

    #[tokio::test]
    async fn test_delete_multi_confirmed() {
        let (mut session, stamps) = setup().await;
        session.click(stamps[0], true);
        session.click(stamps[2], true);

        let mut shown = String::new();
        let outcome = session
            .delete_selected(|message| {
                shown = message.to_string();
                true
            })
            .await
            .unwrap();

        assert_eq!(shown, "Delete the selected 2 words?");
        assert!(matches!(outcome, DeletionOutcome::Deleted { removed: 2, .. }));
        assert!(session.store().records().iter().all(|r| r.word != "dog"));
    }

    #[tokio::test]
    async fn test_missing_date_page() {
        let db = Arc::new(Database::new_test().await.unwrap());
        let store = WordStore::load(db, "wordsData").await.unwrap();
        let mut session = ListSession::new(store, None);

        let page = session.render();
        assert_eq!(page, ListPage::Missing);
        assert_eq!(page.header(), "Error: no date specified.");
    }
}
