/// Derived views over the word list
///
/// Frequency ranking, A-Z grouping, per-day counts, the calendar heatmap and
/// the view models built from them.

pub mod aggregation;
pub mod calendar;
pub mod views;

pub use aggregation::{
    counts_by_date, group_by_first_letter, group_records_by_first_letter, letter_key,
    rank_by_frequency, unique_words, word_stats, words_on, LetterIndex, WordCount, WordStats,
    RANKING_LIMIT,
};
pub use calendar::{color_level, CalendarMonth, DayCell, COLOR_THRESHOLDS};
pub use views::{
    definition_url, ranking_rows, AllWordsView, CalendarView, ListPage, RankingRow, RecentView,
};
