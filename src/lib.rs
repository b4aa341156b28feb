//! # verite-core
//!
//! Corpus-grounded verification and correction of generated text. The
//! engine inspects assistant output for statements a known corpus cannot
//! support (unverifiable citations, invented statistics, vague source
//! references, suspiciously precise facts), assigns a confidence score,
//! separates verified claims from unverifiable ones, and rewrites the
//! latter into hedged, defensible language.
//!
//! ## Core Components
//!
//! - **Scanner**: fixed suspect-pattern and uncertainty-marker matchers
//! - **Extract**: keyword and coarse named-entity extraction
//! - **Cache**: fingerprint-keyed verdict store shared across runs
//! - **Verifier**: exact-match then similarity corroboration per segment
//! - **Scoring**: confidence from count and character-concentration
//! - **Corrector**: span-local template rewrites with offset-safe splicing
//! - **Detector**: the pipeline orchestrating all of the above
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use verite_core::{HallucinationDetector, KnowledgeStore};
//!
//! // `store` implements KnowledgeStore over your section and journal
//! // repositories.
//! let detector = HallucinationDetector::new(Arc::new(store));
//!
//! let result = detector.check(draft, None).await;
//! if result.has_hallucinations {
//!     println!("confidence {:.2}", result.confidence_score);
//!     println!("{}", result.corrected_content);
//! }
//! ```

pub mod cache;
pub mod corrector;
pub mod detector;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod retrieval;
pub mod scanner;
pub mod scoring;
pub mod types;
pub mod verifier;

#[cfg(test)]
mod proptest;

// Re-exports for convenience
pub use cache::{CachedVerdict, Fingerprint, VerificationCache};
pub use corrector::correct;
pub use detector::HallucinationDetector;
pub use error::{Error, Result};
pub use extract::{entities, keywords, significant_words};
pub use lexicon::Lexicon;
pub use retrieval::{JournalPassage, KnowledgeContext, KnowledgeStore, SectionPassage};
pub use scanner::scan;
pub use scoring::confidence_score;
pub use types::{
    CheckResult, DetectorStatus, Improvement, PatternKind, SuspectSegment, UncertainSegment,
    VerifiedFact,
};
pub use verifier::{similarity, ContextVerifier, Verification};
