//! Two-tier corroboration of suspect segments against a knowledge context.
//!
//! Each segment is tried against the cache, then for a verbatim occurrence
//! in the supplied corpus, then against sections and journal entries
//! retrieved from the collaborator, judged by keyword/entity similarity.
//! Retrieval failures leave the segment unresolved; they are logged and
//! never propagated.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{CachedVerdict, Fingerprint, VerificationCache};
use crate::extract::{entities, significant_words};
use crate::lexicon::Lexicon;
use crate::retrieval::{KnowledgeContext, KnowledgeStore};
use crate::types::{SuspectSegment, VerifiedFact};

/// Minimum similarity for a corpus passage to corroborate a segment.
pub(crate) const SIMILARITY_THRESHOLD: f64 = 0.4;

/// Similarity bonus per shared entity.
pub(crate) const ENTITY_BOOST: f64 = 0.1;

/// Passages requested per collaborator search during fallback verification.
const FALLBACK_SEARCH_LIMIT: usize = 3;

/// Source attributed to verdicts replayed from the cache.
const CACHE_SOURCE: &str = "cache";

/// Source attributed to verbatim corpus matches.
const EXACT_MATCH_SOURCE: &str = "knowledge base (exact match)";

/// Outcome of verifying a batch of suspect segments.
#[derive(Debug, Default)]
pub struct Verification {
    /// Segments corroborated by the corpus, flags and sources applied
    pub verified: Vec<SuspectSegment>,
    /// Segments that found no corroboration
    pub unresolved: Vec<SuspectSegment>,
    /// One fact per verified segment, carrying the match confidence
    pub facts: Vec<VerifiedFact>,
}

/// Resolves suspect segments to verified or unresolved.
pub struct ContextVerifier {
    store: Arc<dyn KnowledgeStore>,
    cache: VerificationCache,
    lexicon: Arc<Lexicon>,
}

impl ContextVerifier {
    pub fn new(
        store: Arc<dyn KnowledgeStore>,
        cache: VerificationCache,
        lexicon: Arc<Lexicon>,
    ) -> Self {
        Self {
            store,
            cache,
            lexicon,
        }
    }

    /// Verify each segment against `context`, consulting and updating the
    /// verdict cache.
    pub async fn verify(
        &self,
        segments: Vec<SuspectSegment>,
        context: &KnowledgeContext,
    ) -> Verification {
        let corpus = context.corpus();
        let mut outcome = Verification::default();

        for mut segment in segments {
            let fingerprint = Fingerprint::new(&segment.text, context);

            if let Some(verdict) = self.cache.get(&fingerprint).await {
                debug!("Cache hit for segment fingerprint {}", fingerprint);
                if verdict.verified {
                    segment.verified = true;
                    segment.verification_source = Some(CACHE_SOURCE.to_string());
                    outcome.facts.push(VerifiedFact::new(
                        &segment.text,
                        verdict.confidence,
                        Some(CACHE_SOURCE.to_string()),
                    ));
                    outcome.verified.push(segment);
                } else {
                    outcome.unresolved.push(segment);
                }
                continue;
            }

            if !corpus.is_empty() && corpus.contains(&segment.text) {
                segment.verified = true;
                segment.verification_source = Some(EXACT_MATCH_SOURCE.to_string());
                self.cache
                    .put(fingerprint, CachedVerdict::verified(EXACT_MATCH_SOURCE, 1.0))
                    .await;
                outcome.facts.push(VerifiedFact::new(
                    &segment.text,
                    1.0,
                    Some(EXACT_MATCH_SOURCE.to_string()),
                ));
                outcome.verified.push(segment);
                continue;
            }

            match self.corroborate(&segment).await {
                Some((source, score)) => {
                    debug!("Segment corroborated by {} (score {:.2})", source, score);
                    segment.verified = true;
                    segment.verification_source = Some(source.clone());
                    self.cache
                        .put(fingerprint, CachedVerdict::verified(source.clone(), score))
                        .await;
                    outcome
                        .facts
                        .push(VerifiedFact::new(&segment.text, score, Some(source)));
                    outcome.verified.push(segment);
                }
                None => {
                    self.cache.put(fingerprint, CachedVerdict::unverified()).await;
                    outcome.unresolved.push(segment);
                }
            }
        }

        outcome
    }

    /// Search sections then journal entries for a passage similar enough to
    /// corroborate the segment. The segment's context window is the query.
    async fn corroborate(&self, segment: &SuspectSegment) -> Option<(String, f64)> {
        match self
            .store
            .search_relevant_sections(&segment.context, FALLBACK_SEARCH_LIMIT)
            .await
        {
            Ok(sections) => {
                for section in sections {
                    let score = similarity(&segment.text, section.text(), &self.lexicon);
                    if score >= SIMILARITY_THRESHOLD {
                        return Some((format!("section: {}", section.title), score));
                    }
                }
            }
            Err(e) => warn!("Section search failed during verification: {}", e),
        }

        match self
            .store
            .search_relevant_journal(&segment.context, FALLBACK_SEARCH_LIMIT)
            .await
        {
            Ok(entries) => {
                for entry in entries {
                    let score = similarity(&segment.text, &entry.content, &self.lexicon);
                    if score >= SIMILARITY_THRESHOLD {
                        return Some((format!("journal: {}", entry.date), score));
                    }
                }
            }
            Err(e) => warn!("Journal search failed during verification: {}", e),
        }

        None
    }
}

/// Share of `a`'s significant words that also occur in `b`, boosted by 0.1
/// per shared entity and clamped to 1.0. Zero when `a` has no significant
/// words.
pub fn similarity(a: &str, b: &str, lexicon: &Lexicon) -> f64 {
    let words_a = significant_words(a, lexicon);
    if words_a.is_empty() {
        return 0.0;
    }
    let words_b = significant_words(b, lexicon);
    let common = words_a.intersection(&words_b).count();
    let mut score = common as f64 / words_a.len() as f64;

    let entities_a = entities(a, lexicon);
    let entities_b = entities(b, lexicon);
    score += ENTITY_BOOST * entities_a.intersection(&entities_b).count() as f64;

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::retrieval::{JournalPassage, SectionPassage};
    use crate::types::PatternKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EmptyStore {
        section_calls: AtomicUsize,
        journal_calls: AtomicUsize,
    }

    impl EmptyStore {
        fn new() -> Self {
            Self {
                section_calls: AtomicUsize::new(0),
                journal_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl KnowledgeStore for EmptyStore {
        async fn search_relevant_sections(
            &self,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<SectionPassage>> {
            self.section_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn search_relevant_journal(
            &self,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<JournalPassage>> {
            self.journal_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    struct SectionStore {
        passages: Vec<SectionPassage>,
        section_calls: AtomicUsize,
    }

    #[async_trait]
    impl KnowledgeStore for SectionStore {
        async fn search_relevant_sections(
            &self,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<SectionPassage>> {
            self.section_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.passages.clone())
        }

        async fn search_relevant_journal(
            &self,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<JournalPassage>> {
            Ok(Vec::new())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl KnowledgeStore for FailingStore {
        async fn search_relevant_sections(
            &self,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<SectionPassage>> {
            Err(Error::retrieval("section backend unavailable"))
        }

        async fn search_relevant_journal(
            &self,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<JournalPassage>> {
            Err(Error::retrieval("journal backend unavailable"))
        }
    }

    fn segment(text: &str) -> SuspectSegment {
        SuspectSegment::new(text, text, (0, text.len()), PatternKind::TemporalYear)
    }

    fn verifier(store: Arc<dyn KnowledgeStore>) -> ContextVerifier {
        ContextVerifier::new(store, VerificationCache::new(), Arc::new(Lexicon::english()))
    }

    #[test]
    fn test_similarity_counts_shared_words() {
        let lex = Lexicon::english();
        // All three significant words of `a` occur in `b`.
        let score = similarity(
            "harvest began early autumn",
            "records say the harvest began in early autumn that season",
            &lex,
        );
        assert!(score >= 0.9);
    }

    #[test]
    fn test_similarity_zero_without_significant_words() {
        let lex = Lexicon::english();
        assert_eq!(similarity("of 12", "anything at all here", &lex), 0.0);
    }

    #[test]
    fn test_similarity_entity_boost() {
        let lex = Lexicon::english();
        let without = similarity("output rose sharply", "the output figure rose", &lex);
        let with = similarity(
            "output rose sharply in March 2009",
            "the output figure rose during March 2009",
            &lex,
        );
        assert!(with > without);
    }

    #[tokio::test]
    async fn test_exact_match_verifies_with_full_confidence() {
        let store = Arc::new(EmptyStore::new());
        let verifier = verifier(store.clone());
        let context = KnowledgeContext {
            sections: vec![SectionPassage::new(
                "History",
                "The mill closed in 1907 after the flood.",
            )],
            journal_entries: Vec::new(),
        };

        let outcome = verifier.verify(vec![segment("in 1907")], &context).await;

        assert_eq!(outcome.verified.len(), 1);
        assert!(outcome.unresolved.is_empty());
        assert_eq!(
            outcome.verified[0].verification_source.as_deref(),
            Some(EXACT_MATCH_SOURCE)
        );
        assert_eq!(outcome.facts[0].confidence, 1.0);
        // The exact tier never touches the collaborator.
        assert_eq!(store.section_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_section_similarity_verifies_segment() {
        let store = Arc::new(SectionStore {
            passages: vec![SectionPassage::preview(
                "Foundation",
                "Company records from the year 2015 describe the initiative.",
            )],
            section_calls: AtomicUsize::new(0),
        });
        let verifier = ContextVerifier::new(
            store.clone(),
            VerificationCache::new(),
            Arc::new(Lexicon::english()),
        );

        let outcome = verifier
            .verify(vec![segment("during the year 2015")], &KnowledgeContext::default())
            .await;

        assert_eq!(outcome.verified.len(), 1);
        assert_eq!(
            outcome.verified[0].verification_source.as_deref(),
            Some("section: Foundation")
        );
        let confidence = outcome.facts[0].confidence;
        assert!((SIMILARITY_THRESHOLD..=1.0).contains(&confidence));
    }

    #[tokio::test]
    async fn test_unresolved_segment_is_cached_negative() {
        let store = Arc::new(EmptyStore::new());
        let cache = VerificationCache::new();
        let verifier = ContextVerifier::new(
            store.clone(),
            cache.clone(),
            Arc::new(Lexicon::english()),
        );
        let context = KnowledgeContext::default();

        let outcome = verifier.verify(vec![segment("in 1907")], &context).await;
        assert_eq!(outcome.unresolved.len(), 1);
        assert_eq!(cache.len().await, 1);

        // Second pass answers from the cache without new collaborator calls.
        let calls_before = store.section_calls.load(Ordering::SeqCst);
        let outcome = verifier.verify(vec![segment("in 1907")], &context).await;
        assert_eq!(outcome.unresolved.len(), 1);
        assert_eq!(store.section_calls.load(Ordering::SeqCst), calls_before);
    }

    #[tokio::test]
    async fn test_cached_positive_verdict_reports_cache_source() {
        let store = Arc::new(SectionStore {
            passages: vec![SectionPassage::preview(
                "Foundation",
                "Company records from the year 2015 describe the initiative.",
            )],
            section_calls: AtomicUsize::new(0),
        });
        let verifier = ContextVerifier::new(
            store.clone(),
            VerificationCache::new(),
            Arc::new(Lexicon::english()),
        );
        let context = KnowledgeContext::default();

        let first = verifier
            .verify(vec![segment("during the year 2015")], &context)
            .await;
        let second = verifier
            .verify(vec![segment("during the year 2015")], &context)
            .await;

        assert_eq!(first.verified[0].verification_source.as_deref(), Some("section: Foundation"));
        assert_eq!(second.verified[0].verification_source.as_deref(), Some(CACHE_SOURCE));
        // Confidence is replayed, not recomputed.
        assert_eq!(first.facts[0].confidence, second.facts[0].confidence);
        assert_eq!(store.section_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retrieval_failure_leaves_segment_unresolved() {
        let verifier = verifier(Arc::new(FailingStore));
        let outcome = verifier
            .verify(vec![segment("in 1907")], &KnowledgeContext::default())
            .await;

        assert!(outcome.verified.is_empty());
        assert_eq!(outcome.unresolved.len(), 1);
        assert!(!outcome.unresolved[0].verified);
    }
}
