use serde::{Deserialize, Serialize};

use super::text::{count_phrase, phrase_runs, raw_word_count};

/// Disfluencies counted by [`analyze_transcription`]. Multi-word entries
/// match consecutive words.
pub const FILLER_WORDS: &[&str] = &[
    "um",
    "uh",
    "like",
    "you know",
    "actually",
    "basically",
    "literally",
    "sort of",
    "kind of",
];

const PAUSE_MARKS: &[char] = &[',', '.', '!', '?', ';', ':'];

/// Statistics derived from one transcribed utterance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct TranscriptionStats {
    pub word_count: u32,
    pub words_per_minute: u32,
    pub filler_word_count: u32,
    /// Estimated from punctuation
    pub pause_count: u32,
    /// Seconds, rounded to one decimal
    pub average_pause_duration: f64,
}

/// Analyze transcribed text recorded over `duration_secs` seconds.
pub fn analyze_transcription(text: &str, duration_secs: f64) -> TranscriptionStats {
    let word_count = raw_word_count(text) as u32;

    let minutes = duration_secs / 60.0;
    let words_per_minute = if minutes > 0.0 {
        (word_count as f64 / minutes).round() as u32
    } else {
        0
    };

    let pause_count = text.chars().filter(|c| PAUSE_MARKS.contains(c)).count() as u32;
    let average_pause_duration = if pause_count > 0 {
        (duration_secs / pause_count as f64 * 10.0).round() / 10.0
    } else {
        0.0
    };

    TranscriptionStats {
        word_count,
        words_per_minute,
        filler_word_count: count_fillers(text),
        pause_count,
        average_pause_duration,
    }
}

fn count_fillers(text: &str) -> u32 {
    let runs = phrase_runs(text);
    FILLER_WORDS
        .iter()
        .map(|filler| {
            let phrase: Vec<&str> = filler.split(' ').collect();
            count_phrase(&runs, &phrase) as u32
        })
        .sum()
}
