pub mod grammar;
pub mod language;
pub mod report;
pub mod rules;

pub use grammar::{detect_grammar_errors, GrammarError, GrammarErrorKind};
pub use language::{
    analyze_emotion, analyze_vocabulary, EmotionalAnalysis, EnergyLevel, Tone, VocabularyStats,
};
pub use report::{build_feedback, suggest_improvements, user_text, FeedbackInput, FeedbackReport};
pub use rules::*;
