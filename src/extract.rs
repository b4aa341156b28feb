//! Keyword and entity extraction.
//!
//! Used in two places: building a search query from the whole input when
//! the caller supplied no knowledge context, and judging similarity between
//! a suspect segment and a candidate corpus passage. Everything here is a
//! pure function of its input; repeated calls return identical results.

use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::lexicon::Lexicon;

/// Minimum token length (exclusive) for significant words.
const SIGNIFICANT_MIN_LEN: usize = 2;

/// Minimum token length (exclusive) for query keywords. Stricter than the
/// similarity path; both thresholds affect results and are fixed.
const KEYWORD_MIN_LEN: usize = 3;

/// Lower-cased, punctuation-stripped tokens longer than two characters,
/// minus the profile's stop words.
pub fn significant_words(text: &str, lexicon: &Lexicon) -> HashSet<String> {
    tokens(text)
        .filter(|w| w.chars().count() > SIGNIFICANT_MIN_LEN && !lexicon.stop_words.contains(w.as_str()))
        .collect()
}

/// The `top_n` most frequent tokens longer than three characters, stop
/// words removed. Ties are broken alphabetically so the ranking is stable.
pub fn keywords(text: &str, top_n: usize, lexicon: &Lexicon) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in tokens(text) {
        if word.chars().count() > KEYWORD_MIN_LEN && !lexicon.stop_words.contains(word.as_str()) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);
    ranked.into_iter().map(|(word, _)| word).collect()
}

/// Coarse named entities: date-like spans, capitalized-token runs not at
/// sentence start, and percentage literals. Entity strings are lower-cased
/// except percentages.
pub fn entities(text: &str, lexicon: &Lexicon) -> HashSet<String> {
    let mut found = HashSet::new();

    for pattern in &lexicon.date_patterns {
        for m in pattern.find_iter(text) {
            found.insert(m.as_str().to_lowercase());
        }
    }

    // Proper-noun heuristic: runs of capitalized tokens, skipped when the
    // run opens a sentence.
    let proper_run = Regex::new(r"\b[A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*\b").unwrap();
    for m in proper_run.find_iter(text) {
        if !at_sentence_start(text, m.start()) {
            found.insert(m.as_str().to_lowercase());
        }
    }

    let percent = Regex::new(r"(\d{1,3}(?:,\d{3})*|\d+)(?:\.\d+)?\s*%").unwrap();
    for m in percent.find_iter(text) {
        found.insert(m.as_str().to_string());
    }

    found
}

/// Lower-cased tokens with punctuation replaced by whitespace.
/// Underscores count as word characters, matching `\w` semantics.
fn tokens(text: &str) -> impl Iterator<Item = String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .map(str::to_string)
        .collect::<Vec<_>>()
        .into_iter()
}

/// True when `pos` begins a sentence: only whitespace back to the previous
/// terminator or the start of the text.
fn at_sentence_start(text: &str, pos: usize) -> bool {
    for c in text[..pos].chars().rev() {
        if c.is_whitespace() {
            continue;
        }
        return matches!(c, '.' | '!' | '?');
    }
    true
}
