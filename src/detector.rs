//! The verification pipeline: scan, corroborate, score, correct.
//!
//! [`HallucinationDetector`] is the only unit exposed to callers. It owns
//! its verdict cache and run statistics, and is constructed with the
//! retrieval collaborator injected so independent instances can coexist
//! and tests can substitute fakes.

use chrono::{DateTime, Utc};
use futures::future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::cache::VerificationCache;
use crate::corrector;
use crate::extract;
use crate::lexicon::Lexicon;
use crate::retrieval::{KnowledgeContext, KnowledgeStore};
use crate::scanner;
use crate::scoring;
use crate::types::{CheckResult, DetectorStatus, Improvement};
use crate::verifier::ContextVerifier;

/// Inputs shorter than this many characters are trivially non-hallucinatory.
const MIN_CONTENT_CHARS: usize = 50;

/// Keywords taken from the whole input when building an implicit context.
const AUTO_QUERY_KEYWORDS: usize = 10;

/// Sections retrieved for an implicit context.
const AUTO_CONTEXT_SECTIONS: usize = 5;

/// Journal entries retrieved for an implicit context.
const AUTO_CONTEXT_JOURNAL_ENTRIES: usize = 10;

#[derive(Debug, Clone, Default)]
struct RunStats {
    suspects_seen: u64,
    suspects_verified: u64,
    last_run_time: Option<DateTime<Utc>>,
}

/// Detects and corrects unsupported statements in generated content.
pub struct HallucinationDetector {
    store: Arc<dyn KnowledgeStore>,
    lexicon: Arc<Lexicon>,
    cache: VerificationCache,
    verifier: ContextVerifier,
    stats: RwLock<RunStats>,
}

impl HallucinationDetector {
    /// Create a detector over the given knowledge store, using the English
    /// lexicon.
    pub fn new(store: Arc<dyn KnowledgeStore>) -> Self {
        Self::with_lexicon(store, Lexicon::default())
    }

    /// Create a detector with a specific language profile.
    pub fn with_lexicon(store: Arc<dyn KnowledgeStore>, lexicon: Lexicon) -> Self {
        let lexicon = Arc::new(lexicon);
        let cache = VerificationCache::new();
        let verifier = ContextVerifier::new(store.clone(), cache.clone(), lexicon.clone());
        Self {
            store,
            lexicon,
            cache,
            verifier,
            stats: RwLock::new(RunStats::default()),
        }
    }

    /// Check `content` for unsupported statements.
    ///
    /// When `context` is absent, one is built by querying the knowledge
    /// store with keywords from the whole input; a failure there degrades
    /// to an empty context rather than failing the check. This method
    /// always returns a result, never an error.
    #[instrument(skip(self, content, context), fields(lexicon = self.lexicon.name()))]
    pub async fn check(&self, content: &str, context: Option<KnowledgeContext>) -> CheckResult {
        let started = Instant::now();

        if content.chars().count() < MIN_CONTENT_CHARS {
            debug!("Content below scan threshold, skipping verification");
            self.note_run(0, 0).await;
            let mut result = CheckResult::clean(content);
            result.latency_ms = started.elapsed().as_millis() as u64;
            return result;
        }

        let (suspects, uncertain_segments) = scanner::scan(content, &self.lexicon);
        debug!(
            "Lexical scan found {} suspect and {} uncertain segments",
            suspects.len(),
            uncertain_segments.len()
        );

        let context = match context {
            Some(ctx) => ctx,
            None => self.build_context(content).await,
        };

        let verification = self.verifier.verify(suspects, &context).await;
        let unresolved = verification.unresolved;
        let has_hallucinations = !unresolved.is_empty();

        let confidence_score = scoring::confidence_score(&unresolved, content.chars().count());

        let corrected_content = if has_hallucinations {
            corrector::correct(content, &unresolved, &self.lexicon)
        } else {
            content.to_string()
        };

        let verified_count = verification.verified.len();
        let mut suspect_segments = verification.verified;
        suspect_segments.extend(unresolved);
        suspect_segments.sort_by_key(|s| s.span);

        self.note_run(suspect_segments.len() as u64, verified_count as u64)
            .await;

        info!(
            "Check complete: {} suspects, {} verified, confidence {:.2}",
            suspect_segments.len(),
            verified_count,
            confidence_score
        );

        CheckResult {
            has_hallucinations,
            confidence_score,
            suspect_segments,
            verified_facts: verification.facts,
            uncertain_segments,
            corrected_content,
            completed_at: Utc::now(),
            latency_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Check `content` and return the corrected text directly.
    pub async fn improve(&self, content: &str) -> Improvement {
        let result = self.check(content, None).await;
        let suspect_count = result
            .suspect_segments
            .iter()
            .filter(|s| !s.verified)
            .count();

        Improvement {
            improved_content: result.corrected_content,
            changes_made: result.has_hallucinations,
            confidence_score: result.confidence_score,
            suspect_count,
            verified_count: result.verified_facts.len(),
        }
    }

    /// Operational statistics for this detector instance.
    pub async fn status(&self) -> DetectorStatus {
        let stats = self.stats.read().await.clone();
        let verified_ratio = if stats.suspects_seen == 0 {
            1.0
        } else {
            stats.suspects_verified as f64 / stats.suspects_seen as f64
        };

        DetectorStatus {
            cache_size: self.cache.len().await,
            verified_ratio,
            last_run_time: stats.last_run_time,
        }
    }

    /// Drop every cached verdict.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Build a context by querying the store with keywords from the input.
    /// Any failure degrades to an empty context.
    async fn build_context(&self, content: &str) -> KnowledgeContext {
        let keywords = extract::keywords(content, AUTO_QUERY_KEYWORDS, &self.lexicon);
        if keywords.is_empty() {
            return KnowledgeContext::default();
        }
        let query = keywords.join(" ");
        debug!("Building implicit context with query: {}", query);

        let (sections, journal_entries) = future::join(
            self.store.search_relevant_sections(&query, AUTO_CONTEXT_SECTIONS),
            self.store
                .search_relevant_journal(&query, AUTO_CONTEXT_JOURNAL_ENTRIES),
        )
        .await;

        match (sections, journal_entries) {
            (Ok(sections), Ok(journal_entries)) => KnowledgeContext {
                sections,
                journal_entries,
            },
            (Err(e), _) | (_, Err(e)) => {
                warn!("Implicit context construction failed, proceeding without corpus: {}", e);
                KnowledgeContext::default()
            }
        }
    }

    async fn note_run(&self, suspects: u64, verified: u64) {
        let mut stats = self.stats.write().await;
        stats.suspects_seen += suspects;
        stats.suspects_verified += verified;
        stats.last_run_time = Some(Utc::now());
    }
}
