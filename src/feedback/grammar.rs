use serde::{Deserialize, Serialize};

use crate::transcript::text::{contains_phrase, phrase_runs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarErrorKind {
    Tense,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GrammarError {
    pub kind: GrammarErrorKind,
    pub original: String,
    pub correction: String,
    pub explanation: String,
}

struct Pattern {
    phrase: &'static [&'static str],
    kind: GrammarErrorKind,
    correction: &'static str,
    explanation: &'static str,
}

const PATTERNS: &[Pattern] = &[Pattern {
    phrase: &["did", "went"],
    kind: GrammarErrorKind::Tense,
    correction: "went",
    explanation: "Use simple past tense, not past with auxiliary",
}];

/// Find known mistakes in `text` by phrase lookup. Matching is
/// case-insensitive, on whole words separated only by whitespace, and reports each phrase at most once.
pub fn detect_grammar_errors(text: &str) -> Vec<GrammarError> {
    let runs = phrase_runs(text);

    PATTERNS
        .iter()
        .filter(|p| contains_phrase(&runs, p.phrase))
        .map(|p| GrammarError {
            kind: p.kind,
            original: p.phrase.join(" "),
            correction: p.correction.to_string(),
            explanation: p.explanation.to_string(),
        })
        .collect()
}
