//! Core types for content verification.
//!
//! Everything here is created and consumed within a single pipeline
//! invocation; only the verdict cache ([`crate::cache::VerificationCache`])
//! outlives a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which suspect-pattern matcher fired on a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Academic-style attributed citation ("according to Smith et al., 2019")
    AttributedCitation,
    /// Reference to an unspecified study ("a study has shown...")
    VagueStudy,
    /// Reference to unspecified statistics ("according to statistics...")
    VagueStatistics,
    /// A bare numeric percentage
    BarePercentage,
    /// A 4-digit year inside a temporal phrase
    TemporalYear,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AttributedCitation => write!(f, "attributed_citation"),
            Self::VagueStudy => write!(f, "vague_study"),
            Self::VagueStatistics => write!(f, "vague_statistics"),
            Self::BarePercentage => write!(f, "bare_percentage"),
            Self::TemporalYear => write!(f, "temporal_year"),
        }
    }
}

/// A text span matched by a suspect pattern.
///
/// `span` is a half-open byte range into the source text, so
/// `text == source[span.0..span.1]` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspectSegment {
    /// The matched text
    pub text: String,
    /// Surrounding context window (clamped to the text bounds)
    pub context: String,
    /// Half-open byte span in the source text
    pub span: (usize, usize),
    /// Which matcher fired
    pub pattern_kind: PatternKind,
    /// Whether the segment was corroborated against the corpus
    pub verified: bool,
    /// Where the corroboration came from, when verified
    pub verification_source: Option<String>,
}

impl SuspectSegment {
    /// Create an unverified segment.
    pub fn new(
        text: impl Into<String>,
        context: impl Into<String>,
        span: (usize, usize),
        pattern_kind: PatternKind,
    ) -> Self {
        Self {
            text: text.into(),
            context: context.into(),
            span,
            pattern_kind,
            verified: false,
            verification_source: None,
        }
    }
}

/// A hedging-language marker found in the text.
///
/// These are evidence the author already signalled uncertainty; they are
/// reported but never corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertainSegment {
    /// The matched marker text
    pub text: String,
    /// Surrounding context window
    pub context: String,
    /// Half-open byte span in the source text
    pub span: (usize, usize),
}

impl UncertainSegment {
    pub fn new(text: impl Into<String>, context: impl Into<String>, span: (usize, usize)) -> Self {
        Self {
            text: text.into(),
            context: context.into(),
            span,
        }
    }
}

/// A suspect segment that was corroborated by the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedFact {
    /// The corroborated text
    pub text: String,
    /// How strongly it was corroborated: 1.0 for an exact match, the
    /// similarity score otherwise
    pub confidence: f64,
    /// Where the corroboration came from
    pub source: Option<String>,
}

impl VerifiedFact {
    pub fn new(text: impl Into<String>, confidence: f64, source: Option<String>) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
            source,
        }
    }
}

/// Outcome of a content check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether any suspect segment remained unresolved
    pub has_hallucinations: bool,
    /// Aggregate confidence in the content, in [0, 1]
    pub confidence_score: f64,
    /// Every suspect segment found, with verification flags applied
    pub suspect_segments: Vec<SuspectSegment>,
    /// Segments corroborated by the corpus
    pub verified_facts: Vec<VerifiedFact>,
    /// Hedging-language markers found
    pub uncertain_segments: Vec<UncertainSegment>,
    /// The content with unresolved segments rewritten; equal to the input
    /// when nothing was flagged
    pub corrected_content: String,
    /// When the check completed
    pub completed_at: DateTime<Utc>,
    /// Wall-clock duration of the check in milliseconds
    pub latency_ms: u64,
}

impl CheckResult {
    /// Result for content that needed no verification.
    pub fn clean(content: &str) -> Self {
        Self {
            has_hallucinations: false,
            confidence_score: 1.0,
            suspect_segments: Vec::new(),
            verified_facts: Vec::new(),
            uncertain_segments: Vec::new(),
            corrected_content: content.to_string(),
            completed_at: Utc::now(),
            latency_ms: 0,
        }
    }
}

/// Operational statistics exposed by the detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorStatus {
    /// Number of cached verdicts
    pub cache_size: usize,
    /// Lifetime share of suspect segments that were corroborated, in [0, 1];
    /// 1.0 before any segment has been seen
    pub verified_ratio: f64,
    /// When `check` last completed
    pub last_run_time: Option<DateTime<Utc>>,
}

/// Outcome of an improve pass: a check followed by automatic correction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Improvement {
    /// The corrected content, or the input when nothing was flagged
    pub improved_content: String,
    /// Whether any rewrite was applied
    pub changes_made: bool,
    /// Aggregate confidence from the underlying check
    pub confidence_score: f64,
    /// Number of segments that stayed unresolved
    pub suspect_count: usize,
    /// Number of segments corroborated by the corpus
    pub verified_count: usize,
}
