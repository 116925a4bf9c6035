use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::transcript::text::{boundary_tokens, words_longer_than};

const POSITIVE_WORDS: &[&str] = &["excited", "happy", "great", "excellent", "wonderful", "amazing"];
const NEGATIVE_WORDS: &[&str] = &["difficult", "challenge", "problem", "issue", "concern"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct VocabularyStats {
    pub unique_words: usize,
    /// Unique words as a percentage of all qualifying words
    pub complex_word_usage: u8,
    pub repetition_rate: u8,
}

/// Summarize word variety over words longer than three characters.
pub fn analyze_vocabulary(text: &str) -> VocabularyStats {
    let words = words_longer_than(text, 3);
    if words.is_empty() {
        return VocabularyStats::default();
    }
    let unique = words.iter().collect::<BTreeSet<_>>().len();
    let share = unique as f64 / words.len() as f64;

    VocabularyStats {
        unique_words: unique,
        complex_word_usage: (share * 100.0).round() as u8,
        repetition_rate: ((1.0 - share) * 100.0).round() as u8,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Enthusiastic,
    Hesitant,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    High,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmotionalAnalysis {
    pub overall_tone: Tone,
    pub engagement: u8,
    pub energy_level: EnergyLevel,
}

/// Rough tone estimate from counts of positive and negative keywords.
pub fn analyze_emotion(text: &str) -> EmotionalAnalysis {
    let tokens = boundary_tokens(text);
    let positive = tokens
        .iter()
        .filter(|t| POSITIVE_WORDS.contains(&t.as_str()))
        .count();
    let negative = tokens
        .iter()
        .filter(|t| NEGATIVE_WORDS.contains(&t.as_str()))
        .count();

    let overall_tone = match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Tone::Enthusiastic,
        std::cmp::Ordering::Less => Tone::Hesitant,
        std::cmp::Ordering::Equal => Tone::Neutral,
    };

    EmotionalAnalysis {
        overall_tone,
        engagement: ((positive + negative) * 10 + 50).min(100) as u8,
        energy_level: if positive > 3 {
            EnergyLevel::High
        } else {
            EnergyLevel::Moderate
        },
    }
}
