//! Language profiles for lexical scanning and correction.
//!
//! A [`Lexicon`] bundles everything language-specific: the suspect-pattern
//! matchers, the uncertainty markers, the stop-word list used by keyword
//! extraction, the month names used by date-entity detection, and the
//! correction templates. The English profile is the default; the French
//! profile covers French-language drafts.

use regex::Regex;
use std::collections::HashSet;

use crate::types::PatternKind;

/// Numeric percentage literal, capturing the integer part only.
/// Shared between the scanner, the entity detector, and the corrector.
const PERCENT_PATTERN: &str = r"(\d{1,3}(?:,\d{3})*|\d+)(?:\.\d+)?\s*%";

const ENGLISH_MONTHS: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";

const FRENCH_MONTHS: &str =
    "janvier|février|mars|avril|mai|juin|juillet|août|septembre|octobre|novembre|décembre";

/// Rewrite rules applied by the corrector, in its priority order.
#[derive(Debug)]
pub(crate) struct CorrectionRules {
    /// Numeric percentage to an approximate phrasing. The replacement keeps
    /// the integer part only.
    pub percent: (Regex, &'static str),
    /// Decade-style temporal phrase to a hedged period.
    pub decade: (Regex, &'static str),
    /// Specific-year temporal phrase to an approximate year.
    pub year: (Regex, &'static str),
    /// Attribution leads with their generalizing rewrites. The first element
    /// is the lower-cased lead checked against the start of the segment.
    pub attributions: Vec<(&'static str, Regex, &'static str)>,
    /// Prefix for segments no other rule claims.
    pub hedge_prefix: &'static str,
}

/// A language profile for scanning, extraction, and correction.
#[derive(Debug)]
pub struct Lexicon {
    name: &'static str,
    pub(crate) suspect_patterns: Vec<(PatternKind, Regex)>,
    pub(crate) uncertainty_markers: Vec<Regex>,
    pub(crate) stop_words: HashSet<&'static str>,
    pub(crate) date_patterns: Vec<Regex>,
    pub(crate) corrections: CorrectionRules,
}

impl Lexicon {
    /// The English profile.
    pub fn english() -> Self {
        Self {
            name: "english",
            suspect_patterns: vec![
                (
                    PatternKind::AttributedCitation,
                    re(r"(?i)\b(?:according to|as reported by) \w+ et al\.,? \d{4}"),
                ),
                (
                    PatternKind::VagueStudy,
                    re(r"(?i)\b(?:a|an|one|the) (?:\w+ )?(?:study|survey|research|analysis)[^.]{0,80}?\b(?:has |have |had )?(?:shown|demonstrated|proved|proven|suggested|indicated|found|revealed)\b"),
                ),
                (
                    PatternKind::VagueStatistics,
                    re(r"(?i)\b(?:according to|based on) (?:the |recent |official )?(?:statistics|figures|data)\b"),
                ),
                (PatternKind::BarePercentage, re(PERCENT_PATTERN)),
                (
                    PatternKind::TemporalYear,
                    re(r"(?i)\b(?:in|during|since) (?:the years? )?\d{4}\b"),
                ),
            ],
            uncertainty_markers: markers(&[
                "probably",
                "perhaps",
                "possibly",
                "presumably",
                "it is possible that",
                "it seems that",
                "it would appear that",
                "one could argue that",
                "one might assume that",
                "generally",
                "typically",
                "as a general rule",
            ]),
            stop_words: [
                "the", "and", "are", "was", "were", "for", "with", "that", "this", "these",
                "those", "from", "into", "has", "have", "had", "his", "her", "its", "their",
                "our", "your", "but", "not", "all", "any", "can", "will", "would", "could",
                "she", "him", "they", "them", "you", "who", "what", "when", "where", "which",
                "there", "here", "been", "being", "than", "then", "some", "such", "one", "about",
                "after", "before", "over", "under", "out", "each", "other", "more", "most",
                "very", "just", "only", "both", "while", "during", "between", "through",
            ]
            .into_iter()
            .collect(),
            date_patterns: date_patterns(ENGLISH_MONTHS),
            corrections: CorrectionRules {
                percent: (re(PERCENT_PATTERN), "approximately ${1}%"),
                decade: (
                    re(r"(?i)\b(in|during|since) the years \d{4}\b"),
                    "${1} this period",
                ),
                year: (
                    re(r"(?i)\b(?:in|during|since) (?:the year )?(\d{4})\b"),
                    "around ${1}",
                ),
                attributions: vec![
                    (
                        "according to",
                        re(r"(?i)according to\s+[^,.]+"),
                        "according to certain sources",
                    ),
                    (
                        "based on",
                        re(r"(?i)based on\s+[^,.]+"),
                        "based on certain analyses",
                    ),
                ],
                hedge_prefix: "it would seem that ",
            },
        }
    }

    /// The French profile.
    pub fn french() -> Self {
        Self {
            name: "french",
            suspect_patterns: vec![
                (
                    PatternKind::AttributedCitation,
                    re(r"(?:en|selon|d'après) \w+ et al\., \d{4}"),
                ),
                (
                    PatternKind::VagueStudy,
                    re(r"(?:une|des|l[ae]s?) (?:étude|recherche|analyse).{1,80}?(?:a|ont) (?:démontré|montré|prouvé|suggéré|indiqué)"),
                ),
                (
                    PatternKind::VagueStatistics,
                    re(r"(?:selon|d'après) (?:les|des) (?:statistiques|chiffres|données)"),
                ),
                (PatternKind::BarePercentage, re(PERCENT_PATTERN)),
                (
                    PatternKind::TemporalYear,
                    re(r"(?:en|durant|pendant|depuis) (?:les années|l'année) \d{4}"),
                ),
            ],
            uncertainty_markers: markers(&[
                "probablement",
                "peut-être",
                "possiblement",
                "il est possible que",
                "il semble que",
                "on pourrait dire que",
                "on peut supposer que",
                "généralement",
                "typiquement",
                "en règle générale",
            ]),
            stop_words: [
                "le", "la", "les", "un", "une", "des", "et", "ou", "a", "à", "de", "du", "en",
                "est", "ce", "que", "qui", "dans", "par", "pour", "sur", "avec", "sans", "il",
                "elle", "ils", "elles", "nous", "vous", "je", "tu",
            ]
            .into_iter()
            .collect(),
            date_patterns: date_patterns(FRENCH_MONTHS),
            corrections: CorrectionRules {
                percent: (re(PERCENT_PATTERN), "environ ${1}%"),
                decade: (
                    re(r"\b(en|durant|pendant|depuis) les années \d{4}"),
                    "${1} cette période",
                ),
                year: (
                    re(r"(?:en|durant|pendant|depuis) l'année (\d{4})"),
                    "vers ${1}",
                ),
                attributions: vec![
                    ("selon", re(r"selon\s+[^,.]+"), "selon certaines sources"),
                    (
                        "d'après",
                        re(r"d'après\s+[^,.]+"),
                        "d'après certaines analyses",
                    ),
                ],
                hedge_prefix: "il semblerait que ",
            },
        }
    }

    /// Profile name ("english" or "french").
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

fn re(pattern: &str) -> Regex {
    // All patterns are literals validated by the tests below.
    Regex::new(pattern).unwrap()
}

/// Compile uncertainty markers as whole-word, case-insensitive matchers.
fn markers(phrases: &[&str]) -> Vec<Regex> {
    phrases
        .iter()
        .map(|p| re(&format!(r"(?i)\b{}\b", regex::escape(p))))
        .collect()
}

/// Date-entity detectors: day+month+year, month+year, bare 4-digit year.
fn date_patterns(months: &str) -> Vec<Regex> {
    vec![
        re(&format!(
            r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)? (?:{months}) \d{{4}}\b"
        )),
        re(&format!(r"(?i)\b(?:{months}) \d{{4}}\b")),
        re(r"\b\d{4}\b"),
    ]
}
