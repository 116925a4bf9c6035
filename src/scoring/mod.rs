pub mod config;
pub mod engine;
pub mod score_set;
pub mod tiers;
pub mod validation;

pub use config::*;
pub use engine::{
    calculate_scores, calculate_scores_explained, calculate_scores_with, compute_clarity_score,
    compute_confidence_score, compute_fluency_score, compute_grammar_score,
    compute_overall_score, compute_overall_score_with, compute_relevance_score,
    compute_vocabulary_score, ComponentScore, FactorContribution, ScoreInput, ScoreReport,
};
pub use score_set::{ScoreSet, SubScores};
pub use tiers::{Bound, Effect, Tier};
pub use validation::validate_scoring;
