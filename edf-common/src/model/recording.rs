//! The per-file aggregate: one decoded (or failed) EDF source file

use chrono::NaiveDateTime;

use super::{ChannelInfo, PatientIdentity, RecordingMetrics, RecordingWindow, NAME_NOT_AVAILABLE};

/// Metadata of one successfully decoded recording
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecording {
    /// Recording identifier from the header, trimmed
    pub recording_id: String,
    /// Parsed start moment, absent when the header date/time did not
    /// match the expected pattern
    pub window: Option<RecordingWindow>,
    pub patient: PatientIdentity,
    pub channels: Vec<ChannelInfo>,
    pub metrics: RecordingMetrics,
    pub annotation_count: usize,
}

/// One scanned EDF file, either fully decoded or explicitly invalid.
///
/// The two shapes are disjoint: an invalid file carries nothing but its
/// name and the failure reason, so stale valid-looking metadata cannot
/// leak out of it. All metadata accessors report empty or zero values
/// for the invalid shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingFile {
    Valid {
        file_name: String,
        recording: ValidRecording,
    },
    Invalid {
        file_name: String,
        error_reason: String,
    },
}

impl RecordingFile {
    /// Build the record for a file that failed to decode, carrying the
    /// failure reason verbatim.
    pub fn invalid(file_name: impl Into<String>, error_reason: impl Into<String>) -> RecordingFile {
        let file_name = file_name.into();
        tracing::warn!("Creating invalid EDF record for file: {}", file_name);
        RecordingFile::Invalid {
            file_name,
            error_reason: error_reason.into(),
        }
    }

    /// Build the record for a successfully decoded file from the raw
    /// header fields.
    #[allow(clippy::too_many_arguments)]
    pub fn valid(
        file_name: impl Into<String>,
        recording_id: &str,
        start_date: &str,
        start_time: &str,
        subject_id: Option<&str>,
        channel_labels: &[String],
        transducer_types: &[String],
        record_count: i64,
        record_duration_secs: f64,
        annotation_count: usize,
    ) -> RecordingFile {
        RecordingFile::Valid {
            file_name: file_name.into(),
            recording: ValidRecording {
                recording_id: recording_id.trim().to_string(),
                window: RecordingWindow::from_raw(start_date, start_time),
                patient: PatientIdentity::from_subject_id(subject_id),
                channels: ChannelInfo::from_lists(channel_labels, transducer_types),
                metrics: RecordingMetrics::new(record_count, record_duration_secs),
                annotation_count,
            },
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            RecordingFile::Valid { file_name, .. } => file_name,
            RecordingFile::Invalid { file_name, .. } => file_name,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, RecordingFile::Valid { .. })
    }

    pub fn error_reason(&self) -> Option<&str> {
        match self {
            RecordingFile::Valid { .. } => None,
            RecordingFile::Invalid { error_reason, .. } => Some(error_reason),
        }
    }

    pub fn recording_id(&self) -> Option<&str> {
        match self {
            RecordingFile::Valid { recording, .. } => Some(&recording.recording_id),
            RecordingFile::Invalid { .. } => None,
        }
    }

    /// Parsed recording start moment, `None` for invalid files and for
    /// valid files whose header date did not parse
    pub fn recording_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            RecordingFile::Valid { recording, .. } => {
                recording.window.as_ref().map(|w| w.timestamp)
            }
            RecordingFile::Invalid { .. } => None,
        }
    }

    pub fn patient_name(&self) -> &str {
        match self {
            RecordingFile::Valid { recording, .. } => &recording.patient.display_name,
            RecordingFile::Invalid { .. } => NAME_NOT_AVAILABLE,
        }
    }

    pub fn channels(&self) -> &[ChannelInfo] {
        match self {
            RecordingFile::Valid { recording, .. } => &recording.channels,
            RecordingFile::Invalid { .. } => &[],
        }
    }

    /// Total recording length in seconds, zero for invalid files
    pub fn total_length_secs(&self) -> f64 {
        match self {
            RecordingFile::Valid { recording, .. } => recording.metrics.total_length_secs(),
            RecordingFile::Invalid { .. } => 0.0,
        }
    }

    pub fn annotation_count(&self) -> usize {
        match self {
            RecordingFile::Valid { recording, .. } => recording.annotation_count,
            RecordingFile::Invalid { .. } => 0,
        }
    }
}
