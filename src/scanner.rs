//! Lexical scanning for suspect patterns and hedging language.
//!
//! The scanner is a pure function of the input text: it applies the
//! profile's ordered suspect patterns and its uncertainty markers, and
//! records a clamped context window around every match.

use crate::lexicon::Lexicon;
use crate::types::{SuspectSegment, UncertainSegment};

/// Context window radius around a suspect match, in characters.
const SUSPECT_WINDOW: usize = 50;

/// Context window radius around an uncertainty marker, in characters.
const UNCERTAIN_WINDOW: usize = 30;

/// Apply every suspect pattern and uncertainty marker to `text`.
pub fn scan(text: &str, lexicon: &Lexicon) -> (Vec<SuspectSegment>, Vec<UncertainSegment>) {
    let mut suspects = Vec::new();
    for (kind, pattern) in &lexicon.suspect_patterns {
        for m in pattern.find_iter(text) {
            suspects.push(SuspectSegment::new(
                m.as_str(),
                context_window(text, m.start(), m.end(), SUSPECT_WINDOW),
                (m.start(), m.end()),
                *kind,
            ));
        }
    }

    let mut uncertain = Vec::new();
    for marker in &lexicon.uncertainty_markers {
        for m in marker.find_iter(text) {
            uncertain.push(UncertainSegment::new(
                m.as_str(),
                context_window(text, m.start(), m.end(), UNCERTAIN_WINDOW),
                (m.start(), m.end()),
            ));
        }
    }

    (suspects, uncertain)
}

/// Slice `window` characters either side of `[start, end)`, clamped to the
/// text bounds and kept on char boundaries.
fn context_window(text: &str, start: usize, end: usize, window: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(window - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text[end..]
        .char_indices()
        .nth(window)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    text[from..to].to_string()
}
