use serde::{Deserialize, Serialize};

/// Final scores for one session. Every value is in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ScoreSet {
    pub fluency: u8,
    pub grammar: u8,
    pub clarity: u8,
    pub vocabulary: u8,
    pub relevance: u8,
    pub confidence: u8,
    pub overall: u8,
}

impl ScoreSet {
    /// The six sub-scores, all present.
    pub fn sub_scores(&self) -> SubScores {
        SubScores {
            fluency: Some(self.fluency),
            grammar: Some(self.grammar),
            clarity: Some(self.clarity),
            vocabulary: Some(self.vocabulary),
            relevance: Some(self.relevance),
            confidence: Some(self.confidence),
        }
    }

    /// `(label, value)` pairs in display order, overall last.
    pub fn labeled(&self) -> [(&'static str, u8); 7] {
        [
            ("Fluency", self.fluency),
            ("Grammar", self.grammar),
            ("Clarity", self.clarity),
            ("Vocabulary", self.vocabulary),
            ("Relevance", self.relevance),
            ("Confidence", self.confidence),
            ("Overall", self.overall),
        ]
    }
}

/// Sub-scores that may be partially computed. Input to the overall score,
/// where missing entries drop out of the weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SubScores {
    pub fluency: Option<u8>,
    pub grammar: Option<u8>,
    pub clarity: Option<u8>,
    pub vocabulary: Option<u8>,
    pub relevance: Option<u8>,
    pub confidence: Option<u8>,
}

impl SubScores {
    pub fn uniform(value: u8) -> Self {
        Self {
            fluency: Some(value),
            grammar: Some(value),
            clarity: Some(value),
            vocabulary: Some(value),
            relevance: Some(value),
            confidence: Some(value),
        }
    }
}
