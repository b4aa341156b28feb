//! Rewrites unresolved segments into hedged, defensible phrasing.
//!
//! Corrections are template substitutions chosen by inspecting the segment
//! text, applied as a single linear splice over the original text. Segments
//! are taken in descending start order so earlier edits never invalidate
//! later offsets; a segment overlapping an already-accepted edit is dropped.

use regex::Regex;

use crate::lexicon::Lexicon;
use crate::types::SuspectSegment;

/// Rewrite every unresolved segment and splice the results back in place.
///
/// Spans must satisfy `text == original[start..end]`; the output is built
/// in one pass over a fresh buffer, never by repeated in-place mutation.
pub fn correct(original: &str, unresolved: &[SuspectSegment], lexicon: &Lexicon) -> String {
    let mut ordered: Vec<&SuspectSegment> = unresolved.iter().collect();
    ordered.sort_by(|a, b| b.span.0.cmp(&a.span.0));

    // Collect accepted edits highest-offset first, dropping overlaps.
    let mut edits: Vec<(usize, usize, String)> = Vec::new();
    let mut limit = original.len();
    for segment in ordered {
        let (start, end) = segment.span;
        if start >= end || end > limit {
            continue;
        }
        edits.push((start, end, rewrite(&segment.text, lexicon)));
        limit = start;
    }

    edits.reverse();

    let mut corrected = String::with_capacity(original.len() + edits.len() * 16);
    let mut cursor = 0;
    for (start, end, replacement) in edits {
        corrected.push_str(&original[cursor..start]);
        corrected.push_str(&replacement);
        cursor = end;
    }
    corrected.push_str(&original[cursor..]);
    corrected
}

/// Pick a rewrite by inspecting the segment text, in priority order:
/// percentage, temporal year, source attribution, generic hedge.
fn rewrite(text: &str, lexicon: &Lexicon) -> String {
    let rules = &lexicon.corrections;

    if text.contains('%') {
        let (pattern, replacement) = &rules.percent;
        return pattern.replace_all(text, *replacement).into_owned();
    }

    if Regex::new(r"\d{4}").unwrap().is_match(text) {
        let (decade, decade_replacement) = &rules.decade;
        if decade.is_match(text) {
            return decade.replace_all(text, *decade_replacement).into_owned();
        }
        let (year, year_replacement) = &rules.year;
        return year.replace_all(text, *year_replacement).into_owned();
    }

    let lower = text.to_lowercase();
    for (lead, pattern, replacement) in &rules.attributions {
        if lower.starts_with(lead) {
            return pattern.replace(text, *replacement).into_owned();
        }
    }

    format!("{}{}", rules.hedge_prefix, text)
}
