use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::feedback::{user_text, FeedbackInput, GrammarError};
use crate::scoring::{ScoreInput, ScoreSet};
use crate::transcript::{analyze_transcription, AudioMetadata, SessionType, TranscriptEntry};

/// Session length as written in a session file: plain seconds or a
/// humantime string such as `"2m 30s"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SessionDuration {
    Seconds(f64),
    Text(String),
}

impl SessionDuration {
    pub fn as_secs(&self) -> Result<f64> {
        match self {
            SessionDuration::Seconds(secs) => {
                if !secs.is_finite() || *secs < 0.0 {
                    bail!("duration must be a non-negative number of seconds, got {}", secs);
                }
                Ok(*secs)
            }
            SessionDuration::Text(text) => humantime::parse_duration(text.trim())
                .map(|d| d.as_secs_f64())
                .with_context(|| format!("invalid duration '{}'", text)),
        }
    }
}

/// A finished practice session, as handed over by whatever recorded it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionRecord {
    pub topic: String,
    #[serde(default)]
    pub session_type: SessionType,
    #[serde(default)]
    pub duration: Option<SessionDuration>,
    #[serde(default)]
    pub transcript: Vec<TranscriptEntry>,
    /// Precomputed statistics. Derived from the transcript when absent.
    #[serde(default)]
    pub audio_metadata: Option<AudioMetadata>,
}

impl SessionRecord {
    /// Check everything that deserialization alone cannot.
    /// Returns all problems at once, like config validation does.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(ref duration) = self.duration {
            if let Err(e) = duration.as_secs() {
                errors.push(format!("duration: {:#}", e));
            }
        }

        for (i, entry) in self.transcript.iter().enumerate() {
            if let Some(confidence) = entry.confidence {
                if !(0.0..=1.0).contains(&confidence) {
                    errors.push(format!(
                        "transcript[{}].confidence: must be between 0 and 1, got {}",
                        i, confidence
                    ));
                }
            }
            if let Some(duration) = entry.duration {
                if !duration.is_finite() || duration < 0.0 {
                    errors.push(format!(
                        "transcript[{}].duration: must be non-negative, got {}",
                        i, duration
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn user_entries(&self) -> Vec<TranscriptEntry> {
        self.transcript.iter().filter(|e| e.is_user()).cloned().collect()
    }

    /// Session length in seconds: the declared duration, else the sum of the
    /// user's utterance durations.
    pub fn duration_secs(&self) -> Result<f64> {
        match self.duration {
            Some(ref duration) => duration.as_secs(),
            None => Ok(self
                .transcript
                .iter()
                .filter(|e| e.is_user())
                .filter_map(|e| e.duration)
                .sum()),
        }
    }

    /// Audio statistics for scoring. Uses `audio_metadata` when given,
    /// otherwise analyzes each user line and folds in its word and filler
    /// counts. Pause estimates are only folded in when `options.count_pauses`
    /// is set.
    pub fn resolve_audio_metadata(&self, options: &PrepareOptions) -> Result<AudioMetadata> {
        if let Some(meta) = self.audio_metadata {
            return Ok(meta);
        }
        let mut meta = AudioMetadata::default();
        for entry in self.transcript.iter().filter(|e| e.is_user()) {
            let stats = analyze_transcription(&entry.message, entry.duration.unwrap_or(0.0));
            meta.accumulate(&stats);
            if options.count_pauses {
                meta.accumulate_pauses(&stats);
            }
        }
        Ok(meta.with_duration(self.duration_secs()?))
    }

    /// Resolve everything the scorer needs with default options.
    pub fn prepare(&self) -> Result<PreparedSession<'_>> {
        self.prepare_with(&PrepareOptions::default())
    }

    pub fn prepare_with(&self, options: &PrepareOptions) -> Result<PreparedSession<'_>> {
        Ok(PreparedSession {
            record: self,
            text: user_text(&self.transcript),
            audio_metadata: self.resolve_audio_metadata(options)?,
            user_entries: self.user_entries(),
            options: *options,
        })
    }
}

/// Opt-in extras for deriving scoring inputs from a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareOptions {
    /// Treat punctuation in user lines as pauses when deriving metadata
    pub count_pauses: bool,
    /// Let the user lines' recognition confidence feed the confidence score
    pub entry_confidence: bool,
}

/// A session with its derived inputs computed.
#[derive(Debug, Clone)]
pub struct PreparedSession<'a> {
    pub record: &'a SessionRecord,
    /// The user's lines, joined
    pub text: String,
    pub audio_metadata: AudioMetadata,
    pub user_entries: Vec<TranscriptEntry>,
    pub options: PrepareOptions,
}

impl<'a> PreparedSession<'a> {
    pub fn score_input<'b>(&'b self, grammar_errors: &'b [GrammarError]) -> ScoreInput<'b> {
        ScoreInput {
            transcript: &self.text,
            audio_metadata: &self.audio_metadata,
            topic: &self.record.topic,
            session_type: self.record.session_type,
            grammar_errors,
            entries: if self.options.entry_confidence {
                &self.user_entries[..]
            } else {
                &[]
            },
        }
    }

    pub fn feedback_input<'b>(&'b self, scores: &'b ScoreSet) -> FeedbackInput<'b> {
        FeedbackInput {
            scores,
            entries: &self.record.transcript,
            audio_metadata: &self.audio_metadata,
            topic: &self.record.topic,
            session_type: self.record.session_type,
        }
    }
}
