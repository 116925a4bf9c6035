use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::TranscriptionStats;

/// Speech statistics for one session, as produced by transcription.
///
/// Counts are unsigned so negative input cannot be represented. Float fields
/// are expected to be non-negative but are not validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioMetadata {
    #[serde(alias = "wordsPerMinute")]
    pub words_per_minute: f64,
    #[serde(alias = "pauseCount")]
    pub pause_count: u32,
    #[serde(alias = "fillerWords")]
    pub filler_words: u32,
    #[serde(alias = "totalWords")]
    pub total_words: u32,
    /// Seconds
    #[serde(alias = "averagePauseDuration")]
    pub average_pause_duration: f64,
}

impl AudioMetadata {
    /// Build metadata from a single transcription result.
    pub fn from_stats(stats: &TranscriptionStats) -> Self {
        Self {
            words_per_minute: stats.words_per_minute as f64,
            pause_count: stats.pause_count,
            filler_words: stats.filler_word_count,
            total_words: stats.word_count,
            average_pause_duration: stats.average_pause_duration,
        }
    }

    /// Fold another transcribed utterance's word and filler counts into the
    /// running totals. Pause fields are untouched; see
    /// [`AudioMetadata::accumulate_pauses`]. Words per minute is left alone;
    /// call [`AudioMetadata::with_duration`] once the session length is known.
    pub fn accumulate(&mut self, stats: &TranscriptionStats) {
        self.total_words += stats.word_count;
        self.filler_words += stats.filler_word_count;
    }

    /// Fold in the punctuation-based pause estimate of an utterance. The
    /// average pause duration is weighted by each side's pause count.
    pub fn accumulate_pauses(&mut self, stats: &TranscriptionStats) {
        let pauses = self.pause_count + stats.pause_count;
        if pauses > 0 {
            let weighted = self.average_pause_duration * self.pause_count as f64
                + stats.average_pause_duration * stats.pause_count as f64;
            self.average_pause_duration = weighted / pauses as f64;
        }
        self.pause_count = pauses;
    }

    /// Recompute words per minute from the total word count and the session
    /// duration in seconds. A zero (or negative) duration yields 0.
    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        let minutes = duration_secs / 60.0;
        self.words_per_minute = if minutes > 0.0 {
            (self.total_words as f64 / minutes).round()
        } else {
            0.0
        };
        self
    }

    /// Pauses per word, 0 when no words were spoken.
    pub fn pause_rate(&self) -> f64 {
        ratio(self.pause_count, self.total_words)
    }

    /// Filler words per word, 0 when no words were spoken.
    pub fn filler_rate(&self) -> f64 {
        ratio(self.filler_words, self.total_words)
    }
}

fn ratio(count: u32, total: u32) -> f64 {
    if total > 0 {
        count as f64 / total as f64
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Ai,
    System,
}

/// One line of a session transcript.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub message: String,
    /// Speech recognition confidence in [0, 1], if the recognizer gave one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Length of the recorded audio for this line, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TranscriptEntry {
    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Interview,
    GroupDiscussion,
    #[default]
    Communication,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Interview => "interview",
            SessionType::GroupDiscussion => "group_discussion",
            SessionType::Communication => "communication",
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(words: u32, fillers: u32, pauses: u32, avg_pause: f64) -> TranscriptionStats {
        TranscriptionStats {
            word_count: words,
            words_per_minute: 0,
            filler_word_count: fillers,
            pause_count: pauses,
            average_pause_duration: avg_pause,
        }
    }

    #[test]
    fn test_rates_zero_words() {
        let meta = AudioMetadata {
            pause_count: 10,
            filler_words: 5,
            ..Default::default()
        };
        assert_eq!(meta.pause_rate(), 0.0);
        assert_eq!(meta.filler_rate(), 0.0);
    }

    #[test]
    fn test_rates() {
        let meta = AudioMetadata {
            pause_count: 10,
            filler_words: 5,
            total_words: 100,
            ..Default::default()
        };
        assert_eq!(meta.pause_rate(), 0.1);
        assert_eq!(meta.filler_rate(), 0.05);
    }

    #[test]
    fn test_accumulate_sums_words_and_fillers_only() {
        let mut meta = AudioMetadata::default();
        meta.accumulate(&stats(20, 1, 2, 3.0));
        meta.accumulate(&stats(30, 2, 6, 1.0));
        assert_eq!(meta.total_words, 50);
        assert_eq!(meta.filler_words, 3);
        assert_eq!(meta.pause_count, 0);
        assert_eq!(meta.average_pause_duration, 0.0);
    }

    #[test]
    fn test_accumulate_pauses_weighted() {
        let mut meta = AudioMetadata::default();
        meta.accumulate_pauses(&stats(20, 1, 2, 3.0));
        meta.accumulate_pauses(&stats(30, 2, 6, 1.0));
        assert_eq!(meta.pause_count, 8);
        // (3.0 * 2 + 1.0 * 6) / 8
        assert_eq!(meta.average_pause_duration, 1.5);
        assert_eq!(meta.total_words, 0);
    }

    #[test]
    fn test_from_stats() {
        let mut s = stats(120, 4, 10, 0.5);
        s.words_per_minute = 144;
        let meta = AudioMetadata::from_stats(&s);
        assert_eq!(meta.words_per_minute, 144.0);
        assert_eq!(meta.total_words, 120);
        assert_eq!(meta.filler_words, 4);
        assert_eq!(meta.pause_count, 10);
        assert_eq!(meta.average_pause_duration, 0.5);
    }

    #[test]
    fn test_accumulate_pauses_without_pauses_keeps_average() {
        let mut meta = AudioMetadata::default();
        meta.accumulate_pauses(&stats(10, 0, 0, 0.0));
        assert_eq!(meta.average_pause_duration, 0.0);
        assert_eq!(meta.pause_count, 0);
    }

    #[test]
    fn test_with_duration() {
        let meta = AudioMetadata {
            total_words: 150,
            ..Default::default()
        }
        .with_duration(60.0);
        assert_eq!(meta.words_per_minute, 150.0);

        let meta = AudioMetadata {
            total_words: 100,
            ..Default::default()
        }
        .with_duration(45.0);
        // 100 / 0.75 = 133.33
        assert_eq!(meta.words_per_minute, 133.0);
    }

    #[test]
    fn test_with_zero_duration() {
        let meta = AudioMetadata {
            total_words: 100,
            words_per_minute: 120.0,
            ..Default::default()
        }
        .with_duration(0.0);
        assert_eq!(meta.words_per_minute, 0.0);
    }

    #[test]
    fn test_audio_metadata_camel_case_alias() {
        let yaml = r#"
wordsPerMinute: 140
pauseCount: 3
fillerWords: 2
totalWords: 90
averagePauseDuration: 1.5
"#;
        let meta: AudioMetadata = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(meta.words_per_minute, 140.0);
        assert_eq!(meta.pause_count, 3);
        assert_eq!(meta.filler_words, 2);
        assert_eq!(meta.total_words, 90);
        assert_eq!(meta.average_pause_duration, 1.5);
    }

    #[test]
    fn test_audio_metadata_partial_defaults() {
        let meta: AudioMetadata = serde_saphyr::from_str("total_words: 12").unwrap();
        assert_eq!(meta.total_words, 12);
        assert_eq!(meta.words_per_minute, 0.0);
    }

    #[test]
    fn test_transcript_entry_parse() {
        let yaml = r#"
speaker: user
message: "Hello there."
confidence: 0.92
"#;
        let entry: TranscriptEntry = serde_saphyr::from_str(yaml).unwrap();
        assert!(entry.is_user());
        assert_eq!(entry.confidence, Some(0.92));
        assert!(entry.duration.is_none());
        assert!(entry.timestamp.is_none());
    }

    #[test]
    fn test_session_type_names() {
        let st: SessionType = serde_saphyr::from_str("group_discussion").unwrap();
        assert_eq!(st, SessionType::GroupDiscussion);
        assert_eq!(SessionType::Interview.to_string(), "interview");
    }
}
