// core/src/search.rs
//
// Ranking search over the word list: tiered scoring (exact > prefix >
// substring > fuzzy) for the single best match, plus the prefix/substring
// listing shown as a result dropdown.

use std::num::NonZeroUsize;
use std::ops::Range;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::within_distance;
use crate::entry::{Entry, WordList};

/// Default maximum edit distance for the fuzzy tier.
pub const DEFAULT_MAX_DISTANCE: usize = 3;

/// Default cap on the number of listed hits.
pub const DEFAULT_RESULT_LIMIT: usize = 50;

/// Best-scoring entry for a query. Transient, never retained by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub index: usize,
    pub score: f64,
}

/// One row of the result listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Index of the entry in the word list
    pub index: usize,
    pub word: String,
    /// Byte ranges of `word` that match the query
    pub highlights: Vec<Range<usize>>,
}

/// Normalize raw user input into a query: NFC, trimmed, lower-cased.
pub fn normalize_query(raw: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    raw.nfc().collect::<String>().trim().to_lowercase()
}

/// Score one candidate word against a normalized query.
///
/// Returns `f64::NEG_INFINITY` when the word is excluded.
pub fn score_word(word: &str, query: &str, max_distance: usize) -> f64 {
    let word = word.to_lowercase();
    if word == query {
        return f64::INFINITY;
    }

    let ratio = || query.chars().count() as f64 / word.chars().count().max(1) as f64;
    if word.starts_with(query) {
        100.0 + ratio()
    } else if word.contains(query) {
        10.0 + ratio()
    } else if let Some(distance) = within_distance(&word, query, max_distance) {
        1.0 + 1.0 / (distance as f64 + 1.0)
    } else {
        f64::NEG_INFINITY
    }
}

/// Find the single best entry for `query`.
///
/// `query` must already be normalized (see [`normalize_query`]). Ties keep
/// the earliest index. An empty query matches nothing.
pub fn best_match(query: &str, entries: &[Entry], max_distance: usize) -> Option<MatchResult> {
    if query.is_empty() {
        return None;
    }

    let mut best: Option<MatchResult> = None;
    for (index, entry) in entries.iter().enumerate() {
        let score = score_word(&entry.word, query, max_distance);
        if score == f64::NEG_INFINITY {
            continue;
        }
        // strict greater-than: first encountered wins ties
        if best.map_or(true, |b| score > b.score) {
            best = Some(MatchResult { index, score });
        }
    }
    best
}

/// List entries for the result dropdown.
///
/// Prefix matches in sequence order; when there are none, substring matches.
/// At most `limit` hits.
pub fn search_hits(query: &str, entries: &[Entry], limit: usize) -> Vec<SearchHit> {
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let collect = |pred: &dyn Fn(&str) -> bool| -> Vec<SearchHit> {
        entries
            .iter()
            .enumerate()
            .filter(|(_, e)| pred(&e.word.to_lowercase()))
            .take(limit)
            .map(|(index, e)| SearchHit {
                index,
                word: e.word.clone(),
                highlights: highlight_ranges(&e.word, query),
            })
            .collect()
    };

    let hits = collect(&|w: &str| w.starts_with(query));
    if !hits.is_empty() {
        return hits;
    }
    collect(&|w: &str| w.contains(query))
}

/// Byte ranges of non-overlapping, case-insensitive occurrences of `query`
/// in `word`.
pub fn highlight_ranges(word: &str, query: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    // Every folded char remembers the byte range of the source char it came
    // from; a char that folds to several chars contributes several entries.
    let hay: Vec<(Range<usize>, char)> = word
        .char_indices()
        .flat_map(|(i, c)| {
            let source = i..i + c.len_utf8();
            c.to_lowercase().map(move |f| (source.clone(), f))
        })
        .collect();

    let mut out: Vec<Range<usize>> = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        let window = &hay[i..i + needle.len()];
        let matched = window.iter().zip(&needle).all(|((_, h), n)| h == n);
        let start = window[0].0.start;
        let end = window[needle.len() - 1].0.end;
        // a match inside an already highlighted char would overlap
        let overlaps = out.last().is_some_and(|prev| start < prev.end);
        if matched && !overlaps {
            out.push(start..end);
            i += needle.len();
        } else {
            i += 1;
        }
    }
    out
}

/// Ranking search with an LRU cache of query → best match.
///
/// The cache assumes the word list it is queried with does not change; call
/// [`Searcher::clear_cache`] when switching lists.
#[derive(Debug)]
pub struct Searcher {
    max_distance: usize,
    result_limit: usize,
    cache: LruCache<String, Option<MatchResult>>,
    cache_hits: usize,
    cache_misses: usize,
}

impl Searcher {
    pub fn new(max_distance: usize, result_limit: usize, cache_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            max_distance,
            result_limit,
            cache: LruCache::new(capacity),
            cache_hits: 0,
            cache_misses: 0,
        }
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    pub fn result_limit(&self) -> usize {
        self.result_limit
    }

    /// Best match for a normalized query.
    pub fn best_match(&mut self, query: &str, words: &WordList) -> Option<MatchResult> {
        if let Some(cached) = self.cache.get(query) {
            self.cache_hits += 1;
            return *cached;
        }
        self.cache_misses += 1;

        let result = best_match(query, words.entries(), self.max_distance);
        debug!(query, ?result, "ranked word list");
        self.cache.put(query.to_string(), result);
        result
    }

    /// Dropdown listing for a normalized query.
    pub fn hits(&self, query: &str, words: &WordList) -> Vec<SearchHit> {
        search_hits(query, words.entries(), self.result_limit)
    }

    /// Returns (hits, misses).
    pub fn cache_stats(&self) -> (usize, usize) {
        (self.cache_hits, self.cache_misses)
    }

    /// Hit rate as a percentage, `None` before the first lookup.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            None
        } else {
            Some(self.cache_hits as f32 / total as f32 * 100.0)
        }
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.cap().get()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.cache_hits = 0;
        self.cache_misses = 0;
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE, DEFAULT_RESULT_LIMIT, 256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(words: &[&str]) -> Vec<Entry> {
        words.iter().map(|w| Entry::new(*w, "", "")).collect()
    }

    #[test]
    fn exact_match_beats_everything() {
        let e = entries(&["cats", "category", "cat", "dog"]);
        let m = best_match("cat", &e, 3).unwrap();
        assert_eq!(m.index, 2);
        assert!(m.score.is_infinite() && m.score > 0.0);
    }

    #[test]
    fn exact_match_ignores_word_case() {
        let e = entries(&["Catalog", "CAT"]);
        assert_eq!(best_match("cat", &e, 3).unwrap().index, 1);
    }

    #[test]
    fn equal_prefix_scores_keep_first() {
        // "cats" and "cars" both score 100.5
        let e = entries(&["cats", "cars", "dog"]);
        assert_eq!(best_match("ca", &e, 3).unwrap().index, 0);
    }

    #[test]
    fn shorter_prefix_word_scores_higher() {
        let e = entries(&["cats", "car", "dog"]);
        let m = best_match("ca", &e, 3).unwrap();
        assert_eq!(m.index, 1);
        assert!((m.score - (100.0 + 2.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn prefix_beats_substring() {
        let e = entries(&["scatter", "catapult"]);
        assert_eq!(best_match("cat", &e, 3).unwrap().index, 1);
    }

    #[test]
    fn substring_beats_fuzzy() {
        let e = entries(&["cot", "bobcat"]);
        let m = best_match("cat", &e, 3).unwrap();
        assert_eq!(m.index, 1);
        assert!((m.score - 10.5).abs() < 1e-9);
    }

    #[test]
    fn fuzzy_prefers_closer_words() {
        let e = entries(&["hoose", "house"]);
        // hoose is one substitution away, house is a transposition (two edits)
        let m = best_match("huose", &e, 3).unwrap();
        assert_eq!(m.index, 0);
        assert!((m.score - 1.5).abs() < 1e-9);
    }

    #[test]
    fn nothing_close_enough() {
        let e = entries(&["cat", "dog", "bird"]);
        assert_eq!(best_match("xyz123", &e, 3), None);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let e = entries(&["cat"]);
        assert_eq!(best_match("", &e, 3), None);
        assert!(search_hits("", &e, 50).is_empty());
    }

    #[test]
    fn hits_prefer_prefix_then_substring() {
        let e = entries(&["scatter", "Catalog", "cat", "bobcat"]);
        let hits = search_hits("cat", &e, 50);
        let idx: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(idx, vec![1, 2]);

        let hits = search_hits("att", &e, 50);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].word, "scatter");
    }

    #[test]
    fn hits_are_capped() {
        let words: Vec<String> = (0..80).map(|i| format!("word{i}")).collect();
        let e: Vec<Entry> = words.iter().map(|w| Entry::new(w.as_str(), "", "")).collect();
        assert_eq!(search_hits("word", &e, 50).len(), 50);
        assert_eq!(search_hits("word", &e, 50)[49].index, 49);
    }

    #[test]
    fn highlight_is_case_insensitive() {
        assert_eq!(highlight_ranges("BanANa", "an"), vec![1..3, 3..5]);
        assert_eq!(highlight_ranges("café", "fé"), vec![2..5]);
        assert!(highlight_ranges("dog", "cat").is_empty());
    }

    #[test]
    fn highlight_covers_multi_char_folds() {
        // 'İ' (2 bytes) lower-cases to 'i' plus a combining dot
        let query = normalize_query("İst");
        assert_eq!(highlight_ranges("İstanbul", &query), vec![0..4]);

        let e = entries(&["İstanbul", "Ankara"]);
        let hits = search_hits(&normalize_query("İstanbul"), &e, 50);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].highlights, vec![0..9]);
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_query("  CaT \n"), "cat");
        // decomposed e + combining acute becomes the precomposed form
        assert_eq!(normalize_query("Cafe\u{301}"), "caf\u{e9}");
    }

    #[test]
    fn searcher_caches_results() {
        let words = WordList::from_words(["cat", "dog"]).unwrap();
        let mut s = Searcher::new(3, 50, 2);
        assert_eq!(s.cache_hit_rate(), None);
        assert_eq!(s.best_match("dog", &words).unwrap().index, 1);
        assert_eq!(s.best_match("dog", &words).unwrap().index, 1);
        assert_eq!(s.cache_stats(), (1, 1));
        assert_eq!(s.cache_hit_rate(), Some(50.0));

        s.best_match("zzzzzzzz", &words);
        s.best_match("cat", &words);
        assert_eq!(s.cache_size(), 2);
        assert_eq!(s.cache_capacity(), 2);

        s.clear_cache();
        assert_eq!(s.cache_size(), 0);
        assert_eq!(s.cache_stats(), (0, 0));
    }
}
