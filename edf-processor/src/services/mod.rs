//! Services for the EDF metadata pipeline

pub mod cache;
pub mod decoder;
pub mod edf_parser;
pub mod file_scanner;
pub mod ingest;
pub mod query;

pub use cache::{Snapshot, SnapshotCache};
pub use decoder::{decode_file, DecodeError, DecodeOutcome, DecodedRecording, RecordingDecoder};
pub use edf_parser::EdfParser;
pub use file_scanner::{is_edf_file, FileScanner, ScanError};
pub use ingest::IngestService;
pub use query::RecordingQuery;
