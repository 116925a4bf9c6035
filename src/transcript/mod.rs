pub mod analysis;
pub mod text;
pub mod types;

pub use analysis::{analyze_transcription, TranscriptionStats, FILLER_WORDS};
pub use types::{AudioMetadata, SessionType, Speaker, TranscriptEntry};
