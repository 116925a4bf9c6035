use serde::{Deserialize, Serialize};

use super::grammar::{detect_grammar_errors, GrammarError};
use super::language::{analyze_emotion, analyze_vocabulary, EmotionalAnalysis, VocabularyStats};
use super::rules::{
    analyze_clarity, analyze_fluency, analyze_relevance, generate_recommendations,
    generate_summary, generate_tips, identify_strengths, identify_weaknesses, FluencyAnalysis,
    Improvement, Recommendations, Strength, Tip,
};
use crate::scoring::ScoreSet;
use crate::transcript::{AudioMetadata, SessionType, TranscriptEntry};

/// How many recurring weaknesses [`suggest_improvements`] reports.
const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct FeedbackInput<'a> {
    pub scores: &'a ScoreSet,
    pub entries: &'a [TranscriptEntry],
    pub audio_metadata: &'a AudioMetadata,
    pub topic: &'a str,
    pub session_type: SessionType,
}

/// Rule-based feedback for a finished session.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedbackReport {
    pub strengths: Vec<Strength>,
    pub areas_for_improvement: Vec<Improvement>,
    pub tips: Vec<Tip>,
    pub overall_summary: String,
    pub fluency_analysis: FluencyAnalysis,
    pub clarity_analysis: String,
    pub relevance_analysis: String,
    pub grammar_errors: Vec<GrammarError>,
    pub vocabulary_stats: VocabularyStats,
    pub emotional_analysis: EmotionalAnalysis,
    pub recommendations: Recommendations,
}

/// The user's lines of a transcript, joined by single spaces.
pub fn user_text(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .filter(|e| e.is_user())
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn build_feedback(input: &FeedbackInput) -> FeedbackReport {
    let scores = input.scores;
    let text = user_text(input.entries);

    FeedbackReport {
        strengths: identify_strengths(scores),
        areas_for_improvement: identify_weaknesses(scores),
        tips: generate_tips(scores, input.session_type),
        overall_summary: generate_summary(scores, input.topic, input.session_type),
        fluency_analysis: analyze_fluency(scores.fluency, input.audio_metadata),
        clarity_analysis: analyze_clarity(scores.clarity).to_string(),
        relevance_analysis: analyze_relevance(scores.relevance).to_string(),
        grammar_errors: detect_grammar_errors(&text),
        vocabulary_stats: analyze_vocabulary(&text),
        emotional_analysis: analyze_emotion(&text),
        recommendations: generate_recommendations(scores),
    }
}

/// Point out the weaknesses that keep coming back across recent reports.
///
/// Titles are ranked by how many reports list them; ties keep the order in
/// which they were first seen.
pub fn suggest_improvements(recent: &[FeedbackReport]) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for report in recent {
        for area in &report.areas_for_improvement {
            match counts.iter_mut().find(|(title, _)| *title == area.title) {
                Some((_, count)) => *count += 1,
                None => counts.push((area.title.as_str(), 1)),
            }
        }
    }

    // stable sort keeps first-seen order for ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let suggestions: Vec<String> = counts
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(title, count)| {
            format!("Focus on: {} (appeared in {} recent sessions)", title, count)
        })
        .collect();

    if suggestions.is_empty() {
        vec!["Keep practicing regularly to maintain your progress".to_string()]
    } else {
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Tone;
    use crate::transcript::Speaker;

    fn entry(speaker: Speaker, message: &str) -> TranscriptEntry {
        TranscriptEntry {
            speaker,
            message: message.to_string(),
            confidence: None,
            duration: None,
            timestamp: None,
        }
    }

    fn scores(value: u8) -> ScoreSet {
        ScoreSet {
            fluency: value,
            grammar: value,
            clarity: value,
            vocabulary: value,
            relevance: value,
            confidence: value,
            overall: value,
        }
    }

    fn report_for(value: u8) -> FeedbackReport {
        let s = scores(value);
        build_feedback(&FeedbackInput {
            scores: &s,
            entries: &[],
            audio_metadata: &AudioMetadata::default(),
            topic: "topic",
            session_type: SessionType::Communication,
        })
    }

    #[test]
    fn test_user_text_skips_other_speakers() {
        let entries = vec![
            entry(Speaker::Ai, "Tell me about yourself."),
            entry(Speaker::User, "I did went to school."),
            entry(Speaker::System, "Session paused"),
            entry(Speaker::User, "It was great."),
        ];
        assert_eq!(user_text(&entries), "I did went to school. It was great.");
    }

    #[test]
    fn test_build_feedback_uses_user_lines() {
        let entries = vec![
            entry(Speaker::Ai, "What was a difficult problem you solved?"),
            entry(Speaker::User, "I did went to the excellent team and it was great."),
        ];
        let s = scores(85);
        let meta = AudioMetadata {
            words_per_minute: 150.0,
            pause_count: 2,
            ..Default::default()
        };
        let report = build_feedback(&FeedbackInput {
            scores: &s,
            entries: &entries,
            audio_metadata: &meta,
            topic: "teamwork",
            session_type: SessionType::Interview,
        });

        assert_eq!(report.strengths.len(), 5);
        assert!(report.areas_for_improvement.is_empty());
        // general + interview
        assert_eq!(report.tips.len(), 2);
        assert_eq!(report.grammar_errors.len(), 1);
        // the AI's "difficult problem" is not the user's tone
        assert_eq!(report.emotional_analysis.overall_tone, Tone::Enthusiastic);
        assert_eq!(report.fluency_analysis.smoothness, 85);
        assert!(report.overall_summary.contains("\"teamwork\""));
    }

    #[test]
    fn test_feedback_report_serializes() {
        let json = serde_json::to_value(report_for(50)).unwrap();
        assert!(json["areas_for_improvement"].is_array());
        assert_eq!(json["emotional_analysis"]["overall_tone"], "neutral");
    }

    #[test]
    fn test_suggest_improvements_ranks_by_count() {
        let mut fluency_only = report_for(90);
        fluency_only.areas_for_improvement = report_for(10)
            .areas_for_improvement
            .into_iter()
            .filter(|a| a.title == "Improve Fluency")
            .collect();

        let reports = vec![report_for(10), fluency_only.clone(), fluency_only];
        let suggestions = suggest_improvements(&reports);
        assert_eq!(suggestions.len(), 3);
        assert_eq!(
            suggestions[0],
            "Focus on: Improve Fluency (appeared in 3 recent sessions)"
        );
        // ties keep first-seen order
        assert_eq!(
            suggestions[1],
            "Focus on: Grammar Enhancement (appeared in 1 recent sessions)"
        );
        assert_eq!(
            suggestions[2],
            "Focus on: Enhance Clarity (appeared in 1 recent sessions)"
        );
    }

    #[test]
    fn test_suggest_improvements_fallback() {
        assert_eq!(
            suggest_improvements(&[report_for(95)]),
            vec!["Keep practicing regularly to maintain your progress"]
        );
        assert_eq!(suggest_improvements(&[]).len(), 1);
    }
}
