//! Knowledge retrieval collaborator interface.
//!
//! The storage layer that supplies candidate known-good text lives outside
//! this crate; the verifier only needs the two search operations below.
//! Implementations may fail or return nothing; both outcomes are treated
//! as "no corroboration found", never as fatal errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A corpus section passage.
///
/// Caller-supplied context usually carries full `content`; search results
/// may only carry a `content_preview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPassage {
    /// Section title, reported as the verification source
    pub title: String,
    /// Full section text, when available
    pub content: Option<String>,
    /// Shortened text returned by search, when full content is absent
    pub content_preview: Option<String>,
}

impl SectionPassage {
    /// A passage with full content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Some(content.into()),
            content_preview: None,
        }
    }

    /// A passage carrying only a search preview.
    pub fn preview(title: impl Into<String>, preview: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: None,
            content_preview: Some(preview.into()),
        }
    }

    /// Best available text for this passage.
    pub fn text(&self) -> &str {
        self.content
            .as_deref()
            .or(self.content_preview.as_deref())
            .unwrap_or("")
    }
}

/// A journal entry passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalPassage {
    /// Entry date, reported as the verification source
    pub date: String,
    /// Entry text
    pub content: String,
}

impl JournalPassage {
    pub fn new(date: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            content: content.into(),
        }
    }
}

/// The set of corpus passages used to corroborate suspect segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeContext {
    pub sections: Vec<SectionPassage>,
    pub journal_entries: Vec<JournalPassage>,
}

impl KnowledgeContext {
    /// Whether the context holds no passages at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.journal_entries.is_empty()
    }

    /// Concatenation of all passage text, used by the exact-match tier.
    pub fn corpus(&self) -> String {
        let mut corpus = String::new();
        for section in &self.sections {
            let text = section.text();
            if !text.is_empty() {
                corpus.push_str(text);
                corpus.push_str("\n\n");
            }
        }
        for entry in &self.journal_entries {
            if !entry.content.is_empty() {
                corpus.push_str(&entry.content);
                corpus.push_str("\n\n");
            }
        }
        corpus
    }
}

/// Asynchronous access to the external section and journal repositories.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Sections most relevant to `query`, best first, at most `limit`.
    async fn search_relevant_sections(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SectionPassage>>;

    /// Journal entries most relevant to `query`, best first, at most `limit`.
    async fn search_relevant_journal(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<JournalPassage>>;
}
