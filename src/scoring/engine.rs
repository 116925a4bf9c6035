use std::collections::BTreeSet;

use serde::Serialize;

use super::config::{ScoringConfig, Weights, DEFAULT_IDEAL_WPM};
use super::score_set::{ScoreSet, SubScores};
use super::tiers::{apply_first_match, Bound, Effect, Tier};
use crate::feedback::GrammarError;
use crate::transcript::text::{raw_word_count, sentence_count, word_frequencies, words_longer_than};
use crate::transcript::{AudioMetadata, SessionType, TranscriptEntry};

const WPM_DEVIATION: &[Tier] = &[
    Tier::above(50.0, -30.0),
    Tier::above(30.0, -20.0),
    Tier::above(15.0, -10.0),
];

const FLUENCY_PAUSE_RATE: &[Tier] = &[
    Tier::above(0.15, -20.0),
    Tier::above(0.10, -10.0),
    Tier::above(0.05, -5.0),
];

const FLUENCY_FILLER_RATE: &[Tier] = &[
    Tier::above(0.10, -25.0),
    Tier::above(0.05, -15.0),
    Tier::above(0.03, -5.0),
];

const GRAMMAR_ERROR_RATE: &[Tier] = &[
    Tier::new(Bound::Above(0.10), Effect::Set(40.0)),
    Tier::new(Bound::Above(0.05), Effect::Set(60.0)),
    Tier::new(Bound::Above(0.03), Effect::Set(75.0)),
    Tier::new(Bound::Above(0.01), Effect::Set(85.0)),
    Tier::new(Bound::Any, Effect::Set(95.0)),
];

const SENTENCE_LENGTH: &[Tier] = &[
    Tier::new(Bound::Outside(5.0, 30.0), Effect::Add(-20.0)),
    Tier::new(Bound::Outside(8.0, 25.0), Effect::Add(-10.0)),
];

const CLARITY_WPM: &[Tier] = &[Tier::new(Bound::Outside(100.0, 180.0), Effect::Add(-15.0))];

const REPETITIVE_WORDS: &[Tier] = &[Tier::above(5.0, -15.0)];

const LEXICAL_DIVERSITY: &[Tier] = &[
    Tier::above(0.6, 25.0),
    Tier::above(0.5, 20.0),
    Tier::above(0.4, 15.0),
    Tier::above(0.3, 10.0),
];

const COMPLEX_WORDS: &[Tier] = &[
    Tier::above(0.2, 25.0),
    Tier::above(0.15, 20.0),
    Tier::above(0.1, 15.0),
    Tier::above(0.05, 10.0),
];

const TOPIC_MATCH: &[Tier] = &[
    Tier::above(0.7, 40.0),
    Tier::above(0.5, 30.0),
    Tier::above(0.3, 20.0),
    Tier::above(0.1, 10.0),
];

const SENTENCE_BONUS: &[Tier] = &[Tier::new(Bound::AtLeast(3.0), Effect::Add(10.0))];

const CONFIDENCE_PAUSE_RATE: &[Tier] = &[
    Tier::above(0.15, -30.0),
    Tier::above(0.10, -20.0),
    Tier::above(0.05, -10.0),
];

const PAUSE_DURATION: &[Tier] = &[Tier::above(3.0, -20.0), Tier::above(2.0, -10.0)];

const CONFIDENCE_FILLER_RATE: &[Tier] = &[Tier::above(0.10, -25.0), Tier::above(0.05, -15.0)];

const RECOGNITION_CONFIDENCE: &[Tier] = &[Tier::below(0.7, -15.0), Tier::below(0.8, -10.0)];

/// Words that never count as complex vocabulary.
const COMMON_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "it", "for", "not", "on", "with",
    "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say", "her",
    "she", "or", "will", "my", "one", "all", "would", "there", "their", "what", "so",
];

/// Qualifying words must be longer than this.
const MIN_WORD_LEN: usize = 3;
/// Complex words must be longer than this.
const COMPLEX_WORD_LEN: usize = 6;
/// A word repeated more often than this counts as repetitive.
const REPEAT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Pause rate"
    pub description: String, // e.g. "0.12 matched '>0.1' -> -10"
    pub before: f64,
    pub after: f64,
}

/// One sub-score together with the factors that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentScore {
    pub name: &'static str,
    pub score: u8,
    pub base: f64,
    pub factors: Vec<FactorContribution>,
}

/// All scores plus the per-component trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub scores: ScoreSet,
    pub components: Vec<ComponentScore>,
}

/// Everything the engine needs to score a session.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    /// The speaker's own words, joined
    pub transcript: &'a str,
    pub audio_metadata: &'a AudioMetadata,
    pub topic: &'a str,
    pub session_type: SessionType,
    pub grammar_errors: &'a [GrammarError],
    /// Entries whose recognition confidence feeds the confidence score
    pub entries: &'a [TranscriptEntry],
}

/// Clamp to `[0, 100]` and round to the nearest integer.
pub fn clamp_score(score: f64) -> u8 {
    score.clamp(0.0, 100.0).round() as u8
}

fn ratio(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64
    } else {
        0.0
    }
}

/// Running score that records every tier that fired.
struct Trail {
    name: &'static str,
    base: f64,
    score: f64,
    factors: Vec<FactorContribution>,
}

impl Trail {
    fn start(name: &'static str, base: f64) -> Self {
        Self {
            name,
            base,
            score: base,
            factors: Vec::new(),
        }
    }

    fn apply(&mut self, label: &str, value: f64, tiers: &[Tier]) {
        let before = self.score;
        let result = apply_first_match(self.score, value, tiers);
        if let Some(tier) = result.matched {
            self.score = result.score;
            self.factors.push(FactorContribution {
                label: label.to_string(),
                description: format!("{:.2} matched '{}' -> {}", value, tier.bound, tier.effect),
                before,
                after: self.score,
            });
        }
    }

    fn finish(self) -> ComponentScore {
        ComponentScore {
            name: self.name,
            score: clamp_score(self.score),
            base: self.base,
            factors: self.factors,
        }
    }
}

pub fn explain_fluency(meta: &AudioMetadata, ideal_wpm: f64) -> ComponentScore {
    let mut trail = Trail::start("fluency", 100.0);
    trail.apply(
        "WPM deviation",
        (meta.words_per_minute - ideal_wpm).abs(),
        WPM_DEVIATION,
    );
    trail.apply("Pause rate", meta.pause_rate(), FLUENCY_PAUSE_RATE);
    trail.apply("Filler rate", meta.filler_rate(), FLUENCY_FILLER_RATE);
    trail.finish()
}

pub fn compute_fluency_score(meta: &AudioMetadata) -> u8 {
    explain_fluency(meta, DEFAULT_IDEAL_WPM).score
}

pub fn explain_grammar<E>(transcript: &str, errors: &[E]) -> ComponentScore {
    let word_count = raw_word_count(transcript);
    if word_count == 0 {
        return ComponentScore {
            name: "grammar",
            score: 0,
            base: 0.0,
            factors: Vec::new(),
        };
    }
    let mut trail = Trail::start("grammar", 100.0);
    trail.apply(
        "Error rate",
        ratio(errors.len(), word_count),
        GRAMMAR_ERROR_RATE,
    );
    trail.finish()
}

/// Score grammar from the number of detected errors per word. The score is
/// picked from fixed bands rather than penalized; an empty transcript
/// scores 0.
pub fn compute_grammar_score<E>(transcript: &str, errors: &[E]) -> u8 {
    explain_grammar(transcript, errors).score
}

pub fn explain_clarity(transcript: &str, meta: &AudioMetadata) -> ComponentScore {
    let mut trail = Trail::start("clarity", 100.0);

    let sentences = sentence_count(transcript);
    let avg_words = ratio(meta.total_words as usize, sentences);
    trail.apply("Words per sentence", avg_words, SENTENCE_LENGTH);

    trail.apply("Speaking rate", meta.words_per_minute, CLARITY_WPM);

    let repetitive = word_frequencies(words_longer_than(transcript, MIN_WORD_LEN))
        .values()
        .filter(|&&count| count > REPEAT_LIMIT)
        .count();
    trail.apply("Repetitive words", repetitive as f64, REPETITIVE_WORDS);

    trail.finish()
}

pub fn compute_clarity_score(transcript: &str, meta: &AudioMetadata) -> u8 {
    explain_clarity(transcript, meta).score
}

pub fn explain_vocabulary(transcript: &str) -> ComponentScore {
    let words = words_longer_than(transcript, MIN_WORD_LEN);
    if words.is_empty() {
        return ComponentScore {
            name: "vocabulary",
            score: 0,
            base: 0.0,
            factors: Vec::new(),
        };
    }

    let unique: BTreeSet<&str> = words.iter().map(String::as_str).collect();
    let complex = words
        .iter()
        .filter(|w| w.chars().count() > COMPLEX_WORD_LEN && !COMMON_WORDS.contains(&w.as_str()))
        .count();

    let mut trail = Trail::start("vocabulary", 50.0);
    trail.apply(
        "Lexical diversity",
        ratio(unique.len(), words.len()),
        LEXICAL_DIVERSITY,
    );
    trail.apply("Complex words", ratio(complex, words.len()), COMPLEX_WORDS);
    trail.finish()
}

pub fn compute_vocabulary_score(transcript: &str) -> u8 {
    explain_vocabulary(transcript).score
}

/// `session_type` does not affect the score yet.
pub fn explain_relevance(transcript: &str, topic: &str, _session_type: SessionType) -> ComponentScore {
    let transcript_lower = transcript.to_lowercase();
    let topic_lower = topic.to_lowercase();
    let topic_words: Vec<&str> = topic_lower.split_whitespace().collect();

    let matches = topic_words
        .iter()
        .filter(|w| w.chars().count() > MIN_WORD_LEN && transcript_lower.contains(**w))
        .count();

    let mut trail = Trail::start("relevance", 50.0);
    trail.apply(
        "Topic match",
        ratio(matches, topic_words.len()),
        TOPIC_MATCH,
    );
    trail.apply(
        "Sentences",
        sentence_count(transcript) as f64,
        SENTENCE_BONUS,
    );
    trail.finish()
}

pub fn compute_relevance_score(transcript: &str, topic: &str, session_type: SessionType) -> u8 {
    explain_relevance(transcript, topic, session_type).score
}

/// Mean recognition confidence, counting a missing value as fully confident.
pub fn mean_confidence(entries: &[TranscriptEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let sum: f64 = entries.iter().map(|e| e.confidence.unwrap_or(1.0)).sum();
    Some(sum / entries.len() as f64)
}

pub fn explain_confidence(meta: &AudioMetadata, entries: &[TranscriptEntry]) -> ComponentScore {
    let mut trail = Trail::start("confidence", 100.0);
    trail.apply("Pause rate", meta.pause_rate(), CONFIDENCE_PAUSE_RATE);
    trail.apply(
        "Average pause",
        meta.average_pause_duration,
        PAUSE_DURATION,
    );
    trail.apply("Filler rate", meta.filler_rate(), CONFIDENCE_FILLER_RATE);
    if let Some(mean) = mean_confidence(entries) {
        trail.apply("Recognition confidence", mean, RECOGNITION_CONFIDENCE);
    }
    trail.finish()
}

pub fn compute_confidence_score(meta: &AudioMetadata, entries: &[TranscriptEntry]) -> u8 {
    explain_confidence(meta, entries).score
}

/// Weighted mean of the sub-scores that are present.
///
/// Missing sub-scores are left out of both the sum and the weight total, so
/// the remaining weights are renormalized. Returns 0 when nothing is present.
pub fn compute_overall_score(scores: &SubScores) -> u8 {
    compute_overall_score_with(scores, &Weights::default())
}

pub fn compute_overall_score_with(scores: &SubScores, weights: &Weights) -> u8 {
    let weighted = [
        (scores.fluency, weights.fluency),
        (scores.grammar, weights.grammar),
        (scores.clarity, weights.clarity),
        (scores.relevance, weights.relevance),
        (scores.confidence, weights.confidence),
        (scores.vocabulary, weights.vocabulary),
    ];

    let mut sum = 0.0;
    let mut total = 0.0;
    for (score, weight) in weighted {
        if let Some(score) = score {
            sum += score as f64 * weight;
            total += weight;
        }
    }

    if total > 0.0 {
        clamp_score(sum / total)
    } else {
        0
    }
}

/// Score a session with the built-in defaults.
pub fn calculate_scores(input: &ScoreInput) -> ScoreSet {
    calculate_scores_with(input, &ScoringConfig::default())
}

pub fn calculate_scores_with(input: &ScoreInput, config: &ScoringConfig) -> ScoreSet {
    calculate_scores_explained(input, config).scores
}

/// Score a session and keep the per-factor trail of every sub-score.
pub fn calculate_scores_explained(input: &ScoreInput, config: &ScoringConfig) -> ScoreReport {
    let fluency = explain_fluency(input.audio_metadata, config.ideal_wpm());
    let grammar = explain_grammar(input.transcript, input.grammar_errors);
    let clarity = explain_clarity(input.transcript, input.audio_metadata);
    let vocabulary = explain_vocabulary(input.transcript);
    let relevance = explain_relevance(input.transcript, input.topic, input.session_type);
    let confidence = explain_confidence(input.audio_metadata, input.entries);

    let sub_scores = SubScores {
        fluency: Some(fluency.score),
        grammar: Some(grammar.score),
        clarity: Some(clarity.score),
        vocabulary: Some(vocabulary.score),
        relevance: Some(relevance.score),
        confidence: Some(confidence.score),
    };
    let overall = compute_overall_score_with(&sub_scores, &config.weights());

    ScoreReport {
        scores: ScoreSet {
            fluency: fluency.score,
            grammar: grammar.score,
            clarity: clarity.score,
            vocabulary: vocabulary.score,
            relevance: relevance.score,
            confidence: confidence.score,
            overall,
        },
        components: vec![fluency, grammar, clarity, vocabulary, relevance, confidence],
    }
}
