//! Decoder boundary
//!
//! Binary decoding sits behind the [`RecordingDecoder`] capability so the
//! ingest pipeline can run against a test double. The [`decode_file`]
//! adapter owns the file handle for the duration of one call and never
//! lets a fault escape: format errors, I/O errors, and open failures all
//! collapse into [`DecodeOutcome::Failed`].

use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Decoder errors
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Input does not conform to the expected recording format
    #[error("Invalid EDF data: {0}")]
    Format(String),

    /// I/O error while reading the input stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structured header fields produced by a decoder
#[derive(Debug, Clone, Default)]
pub struct DecodedRecording {
    pub recording_id: String,
    pub start_date: String,
    pub start_time: String,
    pub subject_id: String,
    pub channel_labels: Vec<String>,
    pub transducer_types: Vec<String>,
    pub record_count: i64,
    pub record_duration_secs: f64,
    /// Annotation texts, absent when the recording has no annotation signal
    pub annotations: Option<Vec<String>>,
}

/// Result shape consumed by the ingest pipeline: success payload or
/// failure reason, never a raised fault
#[derive(Debug, Clone)]
pub enum DecodeOutcome {
    Decoded(DecodedRecording),
    Failed { reason: String },
}

/// Capability interface for the binary decoder
pub trait RecordingDecoder: Send + Sync {
    fn decode(&self, input: &mut dyn Read) -> Result<DecodedRecording, DecodeError>;
}

/// Open `path`, run the decoder against its contents, and fold every
/// failure mode into the outcome. The file handle lives only for this
/// call and is released on every exit path.
pub fn decode_file(decoder: &dyn RecordingDecoder, path: &Path) -> DecodeOutcome {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("IO error reading file: {} - {}", file_name, e);
            return DecodeOutcome::Failed {
                reason: format!("Cannot open file: {}", e),
            };
        }
    };

    match decoder.decode(&mut file) {
        Ok(decoded) => DecodeOutcome::Decoded(decoded),
        Err(DecodeError::Format(msg)) => {
            tracing::error!("Error at parsing of file: {} - {}", file_name, msg);
            DecodeOutcome::Failed {
                reason: format!("Invalid EDF data: {}", msg),
            }
        }
        Err(DecodeError::Io(e)) => {
            tracing::error!("IO error reading file: {} - {}", file_name, e);
            DecodeOutcome::Failed {
                reason: format!("I/O error: {}", e),
            }
        }
    }
}
