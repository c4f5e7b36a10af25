/// View models
///
/// What each screen needs from the aggregations, already shaped for drawing.
/// The terminal front-end prints these; nothing here knows about output.

use crate::db::WordRecord;
use crate::intelligence::aggregation::{
    group_by_first_letter, group_records_by_first_letter, rank_by_frequency, unique_words,
    word_stats, words_on, LetterIndex, WordCount, WordStats,
};
use crate::intelligence::calendar::{CalendarMonth, DayCell};
use chrono::NaiveDate;
use serde::Serialize;

const DEFINITION_BASE_URL: &str = "https://translate.google.com/?sl=auto&tl=zh-CN&text=";

/// Translator link opened when a word is activated
pub fn definition_url(word: &str) -> String {
    format!("{}{}", DEFINITION_BASE_URL, urlencoding::encode(word))
}

/// Ranking row with its 1-based position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub word: String,
    pub count: usize,
}

pub fn ranking_rows(records: &[WordRecord]) -> Vec<RankingRow> {
    rank_by_frequency(records)
        .into_iter()
        .enumerate()
        .map(|(i, WordCount { word, count })| RankingRow {
            rank: i + 1,
            word,
            count,
        })
        .collect()
}

/// Entry page: everything, newest first
#[derive(Debug, Clone, Serialize)]
pub struct RecentView {
    pub records: Vec<WordRecord>,
}

impl RecentView {
    pub fn build(records: &[WordRecord]) -> Self {
        let mut records = records.to_vec();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-date list page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ListPage {
    /// Opened without a date; header shows an error and the body is empty
    Missing,
    /// Nothing entered that day
    Empty(NaiveDate),
    Groups(NaiveDate, LetterIndex<WordRecord>),
}

impl ListPage {
    pub fn build(records: &[WordRecord], date: Option<NaiveDate>) -> Self {
        let Some(date) = date else {
            return ListPage::Missing;
        };

        let on_date = words_on(records, date);
        if on_date.is_empty() {
            ListPage::Empty(date)
        } else {
            ListPage::Groups(date, group_records_by_first_letter(&on_date))
        }
    }

    pub fn header(&self) -> String {
        match self {
            ListPage::Missing => "Error: no date specified.".to_string(),
            ListPage::Empty(date) | ListPage::Groups(date, _) => {
                format!("{} words (A-Z)", date.format("%Y-%m-%d"))
            }
        }
    }

    /// Records in display order, the order the user picks from
    pub fn records(&self) -> Vec<&WordRecord> {
        match self {
            ListPage::Groups(_, groups) => groups.values().flatten().collect(),
            _ => Vec::new(),
        }
    }
}

/// All-words page: counters, A-Z index of distinct words, global ranking
#[derive(Debug, Clone, Serialize)]
pub struct AllWordsView {
    pub stats: WordStats,
    pub index: LetterIndex<String>,
    pub ranking: Vec<RankingRow>,
}

impl AllWordsView {
    pub fn build(records: &[WordRecord]) -> Self {
        Self {
            stats: word_stats(records),
            index: group_by_first_letter(&unique_words(records)),
            ranking: ranking_rows(records),
        }
    }
}

/// Calendar page for one month
#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub month: CalendarMonth,
    pub leading_blanks: u32,
    pub cells: Vec<DayCell>,
}

impl CalendarView {
    pub fn build(records: &[WordRecord], month: CalendarMonth, today: NaiveDate) -> Self {
        Self {
            month,
            leading_blanks: month.leading_blanks(),
            cells: month.cells(records, today),
        }
    }
}
