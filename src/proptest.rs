//! Property-based tests for the scoring and correction invariants.
//!
//! These validate the behavioural guarantees that hold for arbitrary
//! inputs rather than hand-picked examples:
//!
//! - Scoring is monotonic: adding unresolved segments never raises the
//!   confidence score, and the score stays within its floors.
//! - Correction never panics on overlapping or adjacent spans and leaves
//!   everything outside the flagged spans untouched.
//! - Extraction is a pure function of its input.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::corrector::correct;
    use crate::extract::{entities, keywords};
    use crate::lexicon::Lexicon;
    use crate::scoring::confidence_score;
    use crate::types::{PatternKind, SuspectSegment};

    // Strategy for plain ASCII sentences, so byte offsets equal char
    // offsets and spans can be generated freely.
    fn ascii_text() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[a-zA-Z0-9 .,%]{50,200}").unwrap()
    }

    // Strategy for a list of spans within a text of the given length.
    fn spans(len: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
        proptest::collection::vec((0..len.saturating_sub(1), 1usize..12), 0..8).prop_map(
            move |raw| {
                raw.into_iter()
                    .map(|(start, width)| (start, (start + width).min(len)))
                    .filter(|(start, end)| start < end)
                    .collect()
            },
        )
    }

    // Clamps generated spans to the text so every segment satisfies the
    // `text == source[start..end]` invariant.
    fn segments_for(text: &str, spans: &[(usize, usize)]) -> Vec<SuspectSegment> {
        spans
            .iter()
            .filter_map(|&(start, end)| {
                let end = end.min(text.len());
                if start >= end {
                    return None;
                }
                Some(SuspectSegment::new(
                    &text[start..end],
                    &text[start..end],
                    (start, end),
                    PatternKind::BarePercentage,
                ))
            })
            .collect()
    }

    proptest! {
        /// Adding segments to the unresolved set never raises the score.
        #[test]
        fn score_is_monotonic_under_subsets(
            text in ascii_text(),
            extra in 1usize..6,
        ) {
            let total = text.chars().count();
            let base: Vec<SuspectSegment> = (0..extra + 3)
                .map(|i| {
                    let start = (i * 7) % (total - 5);
                    SuspectSegment::new(
                        &text[start..start + 5],
                        &text[start..start + 5],
                        (start, start + 5),
                        PatternKind::BarePercentage,
                    )
                })
                .collect();

            // Every prefix is a subset of the next larger prefix.
            let mut previous = confidence_score(&base[..0], total);
            for cut in 1..=base.len() {
                let score = confidence_score(&base[..cut], total);
                prop_assert!(
                    score <= previous,
                    "score {} rose above {} when a segment was added",
                    score,
                    previous
                );
                previous = score;
            }
        }

        /// The score stays within [0.1, 1.0], and is exactly 1.0 only for
        /// the empty set.
        #[test]
        fn score_respects_floors(
            text in ascii_text(),
            raw_spans in spans(60),
        ) {
            let unresolved = segments_for(&text, &raw_spans);
            let score = confidence_score(&unresolved, text.chars().count());

            prop_assert!(score >= 0.1 && score <= 1.0);
            if !unresolved.is_empty() {
                prop_assert!(score < 1.0);
            }
        }

        /// Correction never panics, whatever the span overlap, and returns
        /// the input unchanged for an empty segment list.
        #[test]
        fn correction_is_offset_safe(
            text in ascii_text(),
            raw_spans in spans(60),
        ) {
            let lexicon = Lexicon::english();
            let unresolved = segments_for(&text, &raw_spans);

            let corrected = correct(&text, &unresolved, &lexicon);
            prop_assert!(!corrected.is_empty());

            if unresolved.is_empty() {
                prop_assert_eq!(corrected, text);
            }
        }

        /// Text before the first span and after the last span survives
        /// correction verbatim.
        #[test]
        fn correction_preserves_unflagged_extremes(
            text in ascii_text(),
            start in 10usize..30,
            width in 1usize..8,
        ) {
            let lexicon = Lexicon::english();
            let end = start + width;
            let segment = SuspectSegment::new(
                &text[start..end],
                &text[start..end],
                (start, end),
                PatternKind::BarePercentage,
            );

            let corrected = correct(&text, &[segment], &lexicon);
            prop_assert!(corrected.starts_with(&text[..start]));
            prop_assert!(corrected.ends_with(&text[end..]));
        }

        /// Extraction output is identical across calls.
        #[test]
        fn extraction_is_deterministic(text in ascii_text()) {
            let lexicon = Lexicon::english();
            prop_assert_eq!(entities(&text, &lexicon), entities(&text, &lexicon));
            prop_assert_eq!(
                keywords(&text, 10, &lexicon),
                keywords(&text, 10, &lexicon)
            );
        }
    }
}
