use serde::{Deserialize, Serialize};

use crate::scoring::ScoreSet;
use crate::transcript::{AudioMetadata, SessionType};

/// Sub-scores at or above this are called out as strengths.
pub const STRENGTH_THRESHOLD: u8 = 80;
/// Sub-scores below this are listed as areas for improvement.
pub const WEAKNESS_THRESHOLD: u8 = 60;
/// Sub-scores below this get a targeted tip and practice area.
pub const TIP_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Strength {
    pub title: String,
    pub description: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Improvement {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TipCategory {
    General,
    Fluency,
    Grammar,
    Content,
    Confidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tip {
    pub category: TipCategory,
    pub tip: String,
    pub is_actionable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FluencyAnalysis {
    pub words_per_minute: f64,
    pub pause_frequency: Frequency,
    pub filler_word_count: u32,
    pub smoothness: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource {
    pub title: String,
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Recommendations {
    pub next_steps: Vec<String>,
    pub practice_areas: Vec<String>,
    pub resources: Vec<Resource>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn strength(title: &str, description: &str, examples: &[&str]) -> Strength {
    Strength {
        title: title.to_string(),
        description: description.to_string(),
        examples: strings(examples),
    }
}

fn improvement(title: &str, description: &str, priority: Priority, examples: &[&str]) -> Improvement {
    Improvement {
        title: title.to_string(),
        description: description.to_string(),
        priority,
        examples: strings(examples),
    }
}

fn tip(category: TipCategory, text: &str) -> Tip {
    Tip {
        category,
        tip: text.to_string(),
        is_actionable: true,
    }
}

/// Strengths for every sub-score at or above [`STRENGTH_THRESHOLD`].
/// Relevance is not considered. Never empty: a generic entry stands in when
/// nothing qualifies.
pub fn identify_strengths(scores: &ScoreSet) -> Vec<Strength> {
    let mut strengths = Vec::new();

    if scores.fluency >= STRENGTH_THRESHOLD {
        strengths.push(strength(
            "Excellent Fluency",
            "Your speech flows naturally with minimal hesitation.",
            &["Smooth delivery", "Natural pace", "Minimal filler words"],
        ));
    }
    if scores.grammar >= STRENGTH_THRESHOLD {
        strengths.push(strength(
            "Strong Grammar",
            "You demonstrate excellent command of grammatical structures.",
            &["Correct sentence formation", "Proper tense usage"],
        ));
    }
    if scores.clarity >= STRENGTH_THRESHOLD {
        strengths.push(strength(
            "Clear Communication",
            "Your ideas are well-organized and easy to understand.",
            &["Logical structure", "Clear articulation"],
        ));
    }
    if scores.vocabulary >= STRENGTH_THRESHOLD {
        strengths.push(strength(
            "Rich Vocabulary",
            "You use diverse and appropriate vocabulary.",
            &["Varied word choice", "Context-appropriate language"],
        ));
    }
    if scores.confidence >= STRENGTH_THRESHOLD {
        strengths.push(strength(
            "Confident Delivery",
            "You speak with assurance and conviction.",
            &["Steady voice", "Minimal hesitation"],
        ));
    }

    if strengths.is_empty() {
        strengths.push(strength(
            "Good Effort",
            "You completed the session and showed engagement.",
            &["Active participation"],
        ));
    }
    strengths
}

/// Areas for improvement for every sub-score below [`WEAKNESS_THRESHOLD`].
pub fn identify_weaknesses(scores: &ScoreSet) -> Vec<Improvement> {
    let mut weaknesses = Vec::new();

    if scores.fluency < WEAKNESS_THRESHOLD {
        weaknesses.push(improvement(
            "Improve Fluency",
            "Work on reducing pauses and filler words to speak more smoothly.",
            Priority::High,
            &["Practice speaking without interruption", "Reduce \"um\" and \"uh\""],
        ));
    }
    if scores.grammar < WEAKNESS_THRESHOLD {
        weaknesses.push(improvement(
            "Grammar Enhancement",
            "Focus on improving grammatical accuracy in your responses.",
            Priority::High,
            &["Review verb tenses", "Practice sentence structure"],
        ));
    }
    if scores.clarity < WEAKNESS_THRESHOLD {
        weaknesses.push(improvement(
            "Enhance Clarity",
            "Organize your thoughts better before speaking.",
            Priority::Medium,
            &["Use clear topic sentences", "Provide examples"],
        ));
    }
    if scores.vocabulary < WEAKNESS_THRESHOLD {
        weaknesses.push(improvement(
            "Expand Vocabulary",
            "Work on using more varied and precise vocabulary.",
            Priority::Medium,
            &["Learn industry-specific terms", "Use synonyms"],
        ));
    }
    if scores.confidence < WEAKNESS_THRESHOLD {
        weaknesses.push(improvement(
            "Build Confidence",
            "Practice more to reduce hesitation and speak with more assurance.",
            Priority::High,
            &["Practice regularly", "Record yourself speaking"],
        ));
    }

    weaknesses
}

pub fn generate_tips(scores: &ScoreSet, session_type: SessionType) -> Vec<Tip> {
    let mut tips = vec![tip(
        TipCategory::General,
        "Practice speaking daily for at least 10-15 minutes to build consistency.",
    )];

    if scores.fluency < TIP_THRESHOLD {
        tips.push(tip(
            TipCategory::Fluency,
            "Read aloud regularly to improve your speaking rhythm and reduce hesitation.",
        ));
    }
    if scores.grammar < TIP_THRESHOLD {
        tips.push(tip(
            TipCategory::Grammar,
            "Review common grammar patterns and practice constructing sentences.",
        ));
    }
    if scores.clarity < TIP_THRESHOLD {
        tips.push(tip(
            TipCategory::Content,
            "Use the STAR method (Situation, Task, Action, Result) to structure your responses.",
        ));
    }
    if scores.confidence < TIP_THRESHOLD {
        tips.push(tip(
            TipCategory::Confidence,
            "Practice with a mirror or record yourself to become more comfortable speaking.",
        ));
    }
    if session_type == SessionType::Interview {
        tips.push(tip(
            TipCategory::General,
            "Research common interview questions and prepare structured answers.",
        ));
    }

    tips
}

/// Rounded mean of fluency, grammar, clarity, relevance and confidence.
/// Vocabulary is left out.
pub fn summary_average(scores: &ScoreSet) -> u8 {
    let sum = scores.fluency as u32
        + scores.grammar as u32
        + scores.clarity as u32
        + scores.relevance as u32
        + scores.confidence as u32;
    (sum as f64 / 5.0).round() as u8
}

pub fn performance_label(average: u8) -> &'static str {
    match average {
        80.. => "excellent",
        70..=79 => "very good",
        60..=69 => "good",
        _ => "needs improvement",
    }
}

pub fn generate_summary(scores: &ScoreSet, topic: &str, session_type: SessionType) -> String {
    let average = summary_average(scores);
    let closing = if average >= TIP_THRESHOLD {
        "Keep up the good work and continue practicing regularly."
    } else {
        "Focus on the improvement areas highlighted and practice consistently."
    };
    format!(
        "You completed a {} session on \"{}\" with {} performance. Your average score was {}/100. {}",
        session_type,
        topic,
        performance_label(average),
        average,
        closing
    )
}

pub fn analyze_fluency(score: u8, meta: &AudioMetadata) -> FluencyAnalysis {
    let pause_frequency = match meta.pause_count {
        11.. => Frequency::High,
        6..=10 => Frequency::Medium,
        _ => Frequency::Low,
    };
    FluencyAnalysis {
        words_per_minute: meta.words_per_minute,
        pause_frequency,
        filler_word_count: meta.filler_words,
        smoothness: score,
    }
}

pub fn analyze_clarity(score: u8) -> &'static str {
    match score {
        80.. => "Your communication is clear and well-structured. Ideas flow logically.",
        60..=79 => "Your communication is generally clear but could be more organized.",
        _ => "Work on organizing your thoughts before speaking to improve clarity.",
    }
}

pub fn analyze_relevance(score: u8) -> &'static str {
    match score {
        80.. => "Your responses were highly relevant and on-topic throughout.",
        60..=79 => "Most of your responses were relevant, but some could be more focused.",
        _ => "Focus more on staying on topic and addressing the questions directly.",
    }
}

pub fn generate_recommendations(scores: &ScoreSet) -> Recommendations {
    let practice_areas = [
        ("fluency", scores.fluency),
        ("grammar", scores.grammar),
        ("confidence", scores.confidence),
    ]
    .into_iter()
    .filter(|(_, score)| *score < TIP_THRESHOLD)
    .map(|(area, _)| area.to_string())
    .collect();

    Recommendations {
        next_steps: strings(&[
            "Schedule regular practice sessions (3-4 times per week)",
            "Record yourself and review to identify improvement areas",
            "Practice with different types of questions and scenarios",
        ]),
        practice_areas,
        resources: vec![
            Resource {
                title: "Speaking Practice Tips".to_string(),
                kind: "article".to_string(),
                url: "/resources/speaking-tips".to_string(),
            },
            Resource {
                title: "Interview Questions Guide".to_string(),
                kind: "article".to_string(),
                url: "/resources/interview-guide".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_strengths_all_high() {
        let strengths = identify_strengths(&scores(85));
        assert_eq!(strengths.len(), 5);
        assert_eq!(strengths[0].title, "Excellent Fluency");
        assert_eq!(strengths[4].title, "Confident Delivery");
    }

    #[test]
    fn test_strengths_fallback() {
        let strengths = identify_strengths(&scores(79));
        assert_eq!(strengths.len(), 1);
        assert_eq!(strengths[0].title, "Good Effort");
    }

    #[test]
    fn test_strengths_ignore_relevance() {
        let mut s = scores(50);
        s.relevance = 100;
        assert_eq!(identify_strengths(&s)[0].title, "Good Effort");
    }

    #[test]
    fn test_weaknesses() {
        assert!(identify_weaknesses(&scores(60)).is_empty());

        let mut s = scores(90);
        s.clarity = 59;
        s.confidence = 10;
        let weaknesses = identify_weaknesses(&s);
        assert_eq!(weaknesses.len(), 2);
        assert_eq!(weaknesses[0].title, "Enhance Clarity");
        assert_eq!(weaknesses[0].priority, Priority::Medium);
        assert_eq!(weaknesses[1].title, "Build Confidence");
        assert_eq!(weaknesses[1].priority, Priority::High);
    }

    #[test]
    fn test_priority_levels() {
        let p: Priority = serde_saphyr::from_str("medium").unwrap();
        assert_eq!(p, Priority::Medium);
        let result: Result<Priority, _> = serde_saphyr::from_str("low");
        assert!(result.is_err());
    }

    #[test]
    fn test_tips() {
        let tips = generate_tips(&scores(90), SessionType::Communication);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].category, TipCategory::General);

        let tips = generate_tips(&scores(69), SessionType::Interview);
        let categories: Vec<_> = tips.iter().map(|t| t.category).collect();
        assert_eq!(
            categories,
            vec![
                TipCategory::General,
                TipCategory::Fluency,
                TipCategory::Grammar,
                TipCategory::Content,
                TipCategory::Confidence,
                TipCategory::General,
            ]
        );
    }

    #[test]
    fn test_summary_average_excludes_vocabulary() {
        let mut s = scores(80);
        s.vocabulary = 0;
        assert_eq!(summary_average(&s), 80);
    }

    #[test]
    fn test_performance_labels() {
        assert_eq!(performance_label(95), "excellent");
        assert_eq!(performance_label(80), "excellent");
        assert_eq!(performance_label(75), "very good");
        assert_eq!(performance_label(65), "good");
        assert_eq!(performance_label(59), "needs improvement");
    }

    #[test]
    fn test_summary_text() {
        let summary = generate_summary(&scores(72), "teamwork", SessionType::Interview);
        assert_eq!(
            summary,
            "You completed a interview session on \"teamwork\" with very good performance. \
             Your average score was 72/100. Keep up the good work and continue practicing regularly."
        );

        let summary = generate_summary(&scores(40), "teamwork", SessionType::GroupDiscussion);
        assert!(summary.contains("group_discussion session"));
        assert!(summary.contains("needs improvement"));
        assert!(summary.ends_with("practice consistently."));
    }

    #[test]
    fn test_analyze_fluency_pause_frequency() {
        let mut meta = AudioMetadata {
            words_per_minute: 140.0,
            filler_words: 3,
            ..Default::default()
        };
        assert_eq!(analyze_fluency(90, &meta).pause_frequency, Frequency::Low);
        meta.pause_count = 6;
        assert_eq!(analyze_fluency(90, &meta).pause_frequency, Frequency::Medium);
        meta.pause_count = 11;
        let analysis = analyze_fluency(90, &meta);
        assert_eq!(analysis.pause_frequency, Frequency::High);
        assert_eq!(analysis.filler_word_count, 3);
        assert_eq!(analysis.smoothness, 90);
    }

    #[test]
    fn test_clarity_and_relevance_bands() {
        assert!(analyze_clarity(80).starts_with("Your communication is clear"));
        assert!(analyze_clarity(60).contains("generally clear"));
        assert!(analyze_clarity(59).starts_with("Work on"));
        assert!(analyze_relevance(85).contains("highly relevant"));
        assert!(analyze_relevance(70).starts_with("Most of"));
        assert!(analyze_relevance(0).starts_with("Focus more"));
    }

    #[test]
    fn test_recommendations() {
        let mut s = scores(90);
        s.grammar = 50;
        s.clarity = 10;
        let recs = generate_recommendations(&s);
        assert_eq!(recs.practice_areas, vec!["grammar"]);
        assert_eq!(recs.next_steps.len(), 3);
        assert_eq!(recs.resources.len(), 2);
    }
}
