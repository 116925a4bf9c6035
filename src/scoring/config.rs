use serde::{Deserialize, Serialize};

/// Speaking rate the fluency score is centered on, in words per minute.
pub const DEFAULT_IDEAL_WPM: f64 = 155.0;

/// Scoring configuration.
///
/// Every field is optional. Anything left out falls back to the built-in
/// defaults, so an empty section scores exactly like no config at all.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   ideal_wpm: 150
///   weights:
///     fluency: 0.3
///     vocabulary: 0.05
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Center of the fluency speaking-rate bands (default: 155)
    #[serde(default)]
    pub ideal_wpm: Option<f64>,

    /// Per-score weights for the overall score
    #[serde(default)]
    pub weights: Option<WeightConfig>,
}

impl ScoringConfig {
    pub fn ideal_wpm(&self) -> f64 {
        self.ideal_wpm.unwrap_or(DEFAULT_IDEAL_WPM)
    }

    /// Weights with unset entries filled from the defaults.
    pub fn weights(&self) -> Weights {
        self.weights
            .as_ref()
            .map(WeightConfig::resolve)
            .unwrap_or_default()
    }
}

/// Optional overrides for individual sub-score weights.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeightConfig {
    #[serde(default)]
    pub fluency: Option<f64>,
    #[serde(default)]
    pub grammar: Option<f64>,
    #[serde(default)]
    pub clarity: Option<f64>,
    #[serde(default)]
    pub relevance: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub vocabulary: Option<f64>,
}

impl WeightConfig {
    pub fn resolve(&self) -> Weights {
        let d = Weights::default();
        Weights {
            fluency: self.fluency.unwrap_or(d.fluency),
            grammar: self.grammar.unwrap_or(d.grammar),
            clarity: self.clarity.unwrap_or(d.clarity),
            relevance: self.relevance.unwrap_or(d.relevance),
            confidence: self.confidence.unwrap_or(d.confidence),
            vocabulary: self.vocabulary.unwrap_or(d.vocabulary),
        }
    }

    /// Configured entries as `(name, value)` pairs, for validation messages.
    pub fn entries(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("fluency", self.fluency),
            ("grammar", self.grammar),
            ("clarity", self.clarity),
            ("relevance", self.relevance),
            ("confidence", self.confidence),
            ("vocabulary", self.vocabulary),
        ]
    }
}

/// Resolved weights used by the overall score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub fluency: f64,
    pub grammar: f64,
    pub clarity: f64,
    pub relevance: f64,
    pub confidence: f64,
    pub vocabulary: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            fluency: 0.25,
            grammar: 0.20,
            clarity: 0.20,
            relevance: 0.15,
            confidence: 0.10,
            vocabulary: 0.10,
        }
    }
}

impl Weights {
    pub fn total(&self) -> f64 {
        self.fluency + self.grammar + self.clarity + self.relevance + self.confidence + self.vocabulary
    }
}
