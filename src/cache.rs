//! Memoized verification verdicts keyed by content fingerprint.
//!
//! The cache is the only state that outlives a pipeline invocation. It has
//! no eviction policy; `clear` is the only way to bound its memory, and
//! callers are responsible for invoking it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::retrieval::KnowledgeContext;

/// Characters of the serialized context that participate in the key.
const CONTEXT_PREFIX_CHARS: usize = 500;

/// Fingerprint of a (segment text, corpus snapshot) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub String);

impl Fingerprint {
    /// Hash a segment against the corpus snapshot it is tested under.
    ///
    /// Only the first 500 characters of the serialized context participate,
    /// so corpora that differ only beyond that prefix share verdicts.
    pub fn new(segment_text: &str, context: &KnowledgeContext) -> Self {
        // Serializing plain owned data cannot fail.
        let serialized = serde_json::to_string(context).unwrap_or_default();
        let prefix: String = serialized.chars().take(CONTEXT_PREFIX_CHARS).collect();

        let mut hasher = Sha256::new();
        hasher.update(segment_text.as_bytes());
        hasher.update(b"\n");
        hasher.update(prefix.as_bytes());
        Fingerprint(format!("{:x}", hasher.finalize()))
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.0[..16]) // Short form for display
    }
}

/// Cached outcome of verifying one segment against one corpus snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedVerdict {
    /// Whether the segment was corroborated
    pub verified: bool,
    /// Where the corroboration came from
    pub verification_source: Option<String>,
    /// Confidence observed at verification time, replayed on cache hits
    pub confidence: f64,
}

impl CachedVerdict {
    /// A positive verdict.
    pub fn verified(source: impl Into<String>, confidence: f64) -> Self {
        Self {
            verified: true,
            verification_source: Some(source.into()),
            confidence,
        }
    }

    /// A negative verdict.
    pub fn unverified() -> Self {
        Self {
            verified: false,
            verification_source: None,
            confidence: 0.0,
        }
    }
}

/// Fingerprint-keyed verdict store, safe for concurrent pipeline runs.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct VerificationCache {
    entries: Arc<RwLock<HashMap<Fingerprint, CachedVerdict>>>,
}

impl VerificationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a verdict.
    pub async fn get(&self, key: &Fingerprint) -> Option<CachedVerdict> {
        self.entries.read().await.get(key).cloned()
    }

    /// Store a verdict.
    pub async fn put(&self, key: Fingerprint, verdict: CachedVerdict) {
        self.entries.write().await.insert(key, verdict);
    }

    /// Drop every verdict.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of cached verdicts.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no verdicts.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
