/// Aggregations over the word list
///
/// Pure functions: each takes the current records and derives one view
/// (frequency ranking, A-Z grouping, per-day counts). No hidden state, so
/// calling them again after every change is always safe.

use crate::db::WordRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Ranking shows at most this many words
pub const RANKING_LIMIT: usize = 15;

/// Groups keyed by uppercase first letter, iterated A-Z
pub type LetterIndex<T> = BTreeMap<String, Vec<T>>;

/// A word and how many times it was entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Counters shown above the A-Z index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordStats {
    pub total: usize,
    pub unique: usize,
}

/// Most frequent words, highest count first, at most `RANKING_LIMIT`.
///
/// Words are compared exactly (case-sensitive). Equal counts keep the order
/// in which each word first appeared.
pub fn rank_by_frequency(records: &[WordRecord]) -> Vec<WordCount> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for record in records {
        match position.get(record.word.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                position.insert(&record.word, counts.len());
                counts.push(WordCount {
                    word: record.word.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable: ties stay in first-occurrence order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(RANKING_LIMIT);
    counts
}

/// Distinct words in first-seen order, exact string match
pub fn unique_words(records: &[WordRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.word.as_str()))
        .map(|r| r.word.clone())
        .collect()
}

pub fn word_stats(records: &[WordRecord]) -> WordStats {
    WordStats {
        total: records.len(),
        unique: unique_words(records).len(),
    }
}

/// Group key for a word: its first character, uppercased.
///
/// Uppercasing can expand ("ß" becomes "SS"), so the key is a string.
pub fn letter_key(word: &str) -> String {
    word.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

fn compare_case_insensitive(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// A-Z index of the distinct words.
///
/// Display keeps the original case; ordering inside a group ignores it.
pub fn group_by_first_letter(words: &[String]) -> LetterIndex<String> {
    let mut distinct: Vec<String> = Vec::with_capacity(words.len());
    let mut seen = HashSet::new();
    for word in words {
        if seen.insert(word.as_str()) {
            distinct.push(word.clone());
        }
    }
    distinct.sort_by(|a, b| compare_case_insensitive(a, b));

    let mut index: LetterIndex<String> = BTreeMap::new();
    for word in distinct {
        index.entry(letter_key(&word)).or_default().push(word);
    }
    index
}

/// Same grouping, but over records so each entry keeps its timestamp.
///
/// Repeats are kept: the same word entered twice on a day shows up twice.
pub fn group_records_by_first_letter(records: &[WordRecord]) -> LetterIndex<WordRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_case_insensitive(&a.word, &b.word));

    let mut index: LetterIndex<WordRecord> = BTreeMap::new();
    for record in sorted {
        index.entry(letter_key(&record.word)).or_default().push(record);
    }
    index
}

/// Records entered on `date`, in insertion order
pub fn words_on(records: &[WordRecord], date: NaiveDate) -> Vec<WordRecord> {
    records.iter().filter(|r| r.date == date).cloned().collect()
}

/// Number of entries per day. Repeated words each count.
pub fn counts_by_date(records: &[WordRecord]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.date).or_insert(0) += 1;
    }
    counts
}
