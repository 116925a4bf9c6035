use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::feedback::{EnergyLevel, FeedbackReport, Frequency, Priority, TipCategory, Tone};
use crate::scoring::{ComponentScore, ScoreSet};
use crate::transcript::AudioMetadata;

/// Width of the label column in tables ("Confidence" plus padding)
const LABEL_WIDTH: usize = 12;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Colour a 0-100 score by band: green for strong, yellow for fair,
/// red for weak.
fn paint_score(score: u8, use_colors: bool) -> String {
    let text = format!("{:>3}", score);
    if !use_colors {
        return text;
    }
    if score >= 80 {
        text.green().to_string()
    } else if score >= 60 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// Format scores as a two-column table, overall last and separated.
pub fn format_score_table(scores: &ScoreSet, use_colors: bool) -> String {
    let mut lines = Vec::new();
    for (label, value) in scores.labeled() {
        if label == "Overall" {
            lines.push("-".repeat(LABEL_WIDTH + 3));
            let label = format!("{:<width$}", label, width = LABEL_WIDTH);
            if use_colors {
                lines.push(format!("{}{}", label.bold(), paint_score(value, true).bold()));
            } else {
                lines.push(format!("{}{}", label, paint_score(value, false)));
            }
        } else {
            lines.push(format!(
                "{:<width$}{}",
                label,
                paint_score(value, use_colors),
                width = LABEL_WIDTH
            ));
        }
    }
    lines.join("\n")
}

/// Format scores as tab-separated `name<TAB>score` lines for scripting
/// (no headers, no colors)
pub fn format_tsv(scores: &ScoreSet) -> String {
    scores
        .labeled()
        .iter()
        .map(|(label, value)| format!("{}\t{}", label.to_lowercase(), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON for any serializable result.
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}

/// Per-factor breakdown of each sub-score, for verbose mode.
///
/// One block per component:
/// ```text
/// Fluency: 70 (base 100)
///   WPM deviation: 55.00 matched '>50' -> -30 (100 -> 70)
/// ```
pub fn format_breakdown(components: &[ComponentScore]) -> String {
    components
        .iter()
        .map(|component| {
            let mut block = format!(
                "{}: {} (base {})",
                capitalize(component.name),
                component.score,
                component.base
            );
            if component.factors.is_empty() {
                block.push_str("\n  no adjustments");
            }
            for factor in &component.factors {
                block.push_str(&format!(
                    "\n  {}: {} ({} -> {})",
                    factor.label, factor.description, factor.before, factor.after
                ));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn metadata_rows(meta: &AudioMetadata) -> [(&'static str, String); 5] {
    [
        ("words_per_minute", format!("{}", meta.words_per_minute)),
        ("total_words", meta.total_words.to_string()),
        ("filler_words", meta.filler_words.to_string()),
        ("pause_count", meta.pause_count.to_string()),
        ("average_pause_duration", format!("{}", meta.average_pause_duration)),
    ]
}

/// Audio statistics as an aligned key/value table.
pub fn format_metadata(meta: &AudioMetadata, use_colors: bool) -> String {
    metadata_rows(meta)
        .iter()
        .map(|(key, value)| {
            let key = format!("{:<24}", key);
            if use_colors {
                format!("{}{}", key.cyan(), value)
            } else {
                format!("{}{}", key, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Audio statistics as `key<TAB>value` lines.
pub fn format_metadata_tsv(meta: &AudioMetadata) -> String {
    metadata_rows(meta)
        .iter()
        .map(|(key, value)| format!("{}\t{}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "high",
        Priority::Medium => "medium",
    }
}

fn category_label(category: TipCategory) -> &'static str {
    match category {
        TipCategory::General => "general",
        TipCategory::Fluency => "fluency",
        TipCategory::Grammar => "grammar",
        TipCategory::Content => "content",
        TipCategory::Confidence => "confidence",
    }
}

fn frequency_label(frequency: Frequency) -> &'static str {
    match frequency {
        Frequency::High => "high",
        Frequency::Medium => "medium",
        Frequency::Low => "low",
    }
}

fn tone_label(tone: Tone) -> &'static str {
    match tone {
        Tone::Enthusiastic => "enthusiastic",
        Tone::Hesitant => "hesitant",
        Tone::Neutral => "neutral",
    }
}

fn energy_label(energy: EnergyLevel) -> &'static str {
    match energy {
        EnergyLevel::High => "high",
        EnergyLevel::Moderate => "moderate",
    }
}

fn heading(title: &str, use_colors: bool) -> String {
    if use_colors {
        title.bold().underline().to_string()
    } else {
        title.to_string()
    }
}

/// Format a feedback report as readable sections. Empty sections are
/// left out.
pub fn format_feedback(report: &FeedbackReport, use_colors: bool) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push(format!(
        "{}\n{}",
        heading("Summary", use_colors),
        report.overall_summary
    ));

    if !report.strengths.is_empty() {
        let items: Vec<String> = report
            .strengths
            .iter()
            .map(|s| {
                let title = if use_colors {
                    s.title.green().to_string()
                } else {
                    s.title.clone()
                };
                format!("  + {}: {}", title, s.description)
            })
            .collect();
        sections.push(format!("{}\n{}", heading("Strengths", use_colors), items.join("\n")));
    }

    if !report.areas_for_improvement.is_empty() {
        let items: Vec<String> = report
            .areas_for_improvement
            .iter()
            .map(|a| {
                let title = if use_colors {
                    a.title.yellow().to_string()
                } else {
                    a.title.clone()
                };
                format!(
                    "  - [{}] {}: {}",
                    priority_label(a.priority),
                    title,
                    a.description
                )
            })
            .collect();
        sections.push(format!(
            "{}\n{}",
            heading("Areas for improvement", use_colors),
            items.join("\n")
        ));
    }

    if !report.tips.is_empty() {
        let items: Vec<String> = report
            .tips
            .iter()
            .map(|t| format!("  * ({}) {}", category_label(t.category), t.tip))
            .collect();
        sections.push(format!("{}\n{}", heading("Tips", use_colors), items.join("\n")));
    }

    let fluency = &report.fluency_analysis;
    sections.push(format!(
        "{}\n  Words per minute: {}\n  Pause frequency: {}\n  Filler words: {}\n  Smoothness: {}",
        heading("Fluency", use_colors),
        fluency.words_per_minute,
        frequency_label(fluency.pause_frequency),
        fluency.filler_word_count,
        fluency.smoothness
    ));

    sections.push(format!(
        "{}\n  {}",
        heading("Clarity", use_colors),
        report.clarity_analysis
    ));
    sections.push(format!(
        "{}\n  {}",
        heading("Relevance", use_colors),
        report.relevance_analysis
    ));

    if !report.grammar_errors.is_empty() {
        let items: Vec<String> = report
            .grammar_errors
            .iter()
            .map(|e| format!("  \"{}\" -> \"{}\": {}", e.original, e.correction, e.explanation))
            .collect();
        sections.push(format!("{}\n{}", heading("Grammar", use_colors), items.join("\n")));
    }

    let vocab = &report.vocabulary_stats;
    sections.push(format!(
        "{}\n  Unique words: {}\n  Complex word usage: {}%\n  Repetition rate: {}%",
        heading("Vocabulary", use_colors),
        vocab.unique_words,
        vocab.complex_word_usage,
        vocab.repetition_rate
    ));

    let emotion = &report.emotional_analysis;
    sections.push(format!(
        "{}\n  Tone: {}\n  Engagement: {}\n  Energy: {}",
        heading("Delivery", use_colors),
        tone_label(emotion.overall_tone),
        emotion.engagement,
        energy_label(emotion.energy_level)
    ));

    let recs = &report.recommendations;
    let mut lines: Vec<String> = recs.next_steps.iter().map(|s| format!("  > {}", s)).collect();
    if !recs.practice_areas.is_empty() {
        lines.push(format!("  Practice: {}", recs.practice_areas.join(", ")));
    }
    for resource in &recs.resources {
        lines.push(format!("  {} ({}): {}", resource.title, resource.kind, resource.url));
    }
    sections.push(format!(
        "{}\n{}",
        heading("Next steps", use_colors),
        lines.join("\n")
    ));

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{build_feedback, FeedbackInput};
    use crate::scoring::FactorContribution;
    use crate::transcript::{SessionType, Speaker, TranscriptEntry};

    fn sample_scores() -> ScoreSet {
        ScoreSet {
            fluency: 85,
            grammar: 100,
            clarity: 70,
            vocabulary: 55,
            relevance: 90,
            confidence: 40,
            overall: 78,
        }
    }

    #[test]
    fn test_format_score_table_plain() {
        let result = format_score_table(&sample_scores(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Fluency      85");
        assert_eq!(lines[1], "Grammar     100");
        assert_eq!(lines[6], "---------------");
        assert_eq!(lines[7], "Overall      78");
    }

    #[test]
    fn test_format_score_table_no_escape_codes_without_colors() {
        let result = format_score_table(&sample_scores(), false);
        assert!(!result.contains('\u{1b}'));
    }

    #[test]
    fn test_format_score_table_colored() {
        let result = format_score_table(&sample_scores(), true);
        assert!(result.contains('\u{1b}'));
        assert!(result.contains("Fluency"));
    }

    #[test]
    fn test_format_tsv() {
        let result = format_tsv(&sample_scores());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "fluency\t85");
        assert_eq!(lines[6], "overall\t78");
        assert!(lines.iter().all(|l| l.split('\t').count() == 2));
    }

    #[test]
    fn test_format_json_scores() {
        let json = format_json(&sample_scores()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fluency"], 85);
        assert_eq!(value["overall"], 78);
    }

    #[test]
    fn test_format_breakdown() {
        let components = vec![
            ComponentScore {
                name: "fluency",
                score: 70,
                base: 100.0,
                factors: vec![FactorContribution {
                    label: "WPM deviation".to_string(),
                    description: "55.00 matched '>50' -> -30".to_string(),
                    before: 100.0,
                    after: 70.0,
                }],
            },
            ComponentScore {
                name: "grammar",
                score: 100,
                base: 100.0,
                factors: vec![],
            },
        ];
        let result = format_breakdown(&components);
        assert_eq!(
            result,
            "Fluency: 70 (base 100)\n  WPM deviation: 55.00 matched '>50' -> -30 (100 -> 70)\n\
             Grammar: 100 (base 100)\n  no adjustments"
        );
    }

    #[test]
    fn test_format_metadata() {
        let meta = AudioMetadata {
            words_per_minute: 140.0,
            pause_count: 3,
            filler_words: 2,
            total_words: 90,
            average_pause_duration: 1.5,
        };
        let table = format_metadata(&meta, false);
        assert!(table.contains("words_per_minute        140"));
        assert!(table.contains("average_pause_duration  1.5"));

        let tsv = format_metadata_tsv(&meta);
        assert_eq!(
            tsv,
            "words_per_minute\t140\ntotal_words\t90\nfiller_words\t2\npause_count\t3\naverage_pause_duration\t1.5"
        );
    }

    #[test]
    fn test_format_feedback_sections() {
        let entries = vec![TranscriptEntry {
            speaker: Speaker::User,
            message: "I did went to a great team.".to_string(),
            confidence: None,
            duration: None,
            timestamp: None,
        }];
        let scores = sample_scores();
        let report = build_feedback(&FeedbackInput {
            scores: &scores,
            entries: &entries,
            audio_metadata: &AudioMetadata::default(),
            topic: "teamwork",
            session_type: SessionType::Interview,
        });

        let result = format_feedback(&report, false);
        assert!(result.starts_with("Summary\n"));
        assert!(result.contains("Strengths\n"));
        assert!(result.contains("Areas for improvement\n"));
        assert!(result.contains("\"did went\" -> \"went\""));
        assert!(result.contains("Tone: enthusiastic"));
        assert!(!result.contains('\u{1b}'));
    }
}
