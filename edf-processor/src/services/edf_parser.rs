//! EDF header parser
//!
//! Production [`RecordingDecoder`] for the European Data Format. EDF
//! stores its metadata as fixed-width ASCII fields: a 256-byte fixed
//! header followed by 256 bytes per signal. Signal samples are 2-byte
//! little-endian integers; this parser only reads the data records when
//! an `EDF Annotations` signal is present, to collect the annotation
//! texts from its TAL blocks.

use std::io::Read;

use super::decoder::{DecodeError, DecodedRecording, RecordingDecoder};

/// Label of the EDF+ annotation signal
const ANNOTATION_LABEL: &str = "EDF Annotations";

/// TAL field separator (ASCII DC4)
const TAL_FIELD_SEP: u8 = 0x14;

/// EDF header parser
pub struct EdfParser;

impl EdfParser {
    pub fn new() -> EdfParser {
        EdfParser
    }
}

impl Default for EdfParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDecoder for EdfParser {
    fn decode(&self, input: &mut dyn Read) -> Result<DecodedRecording, DecodeError> {
        let version = read_field(input, 8)?;
        if version.trim() != "0" {
            return Err(DecodeError::Format(format!(
                "unsupported version field: {:?}",
                version.trim()
            )));
        }

        let subject_id = read_field(input, 80)?;
        let recording_id = read_field(input, 80)?;
        let start_date = read_field(input, 8)?;
        let start_time = read_field(input, 8)?;
        let header_bytes = parse_int(&read_field(input, 8)?, "header byte count")?;
        let _reserved = read_field(input, 44)?;
        let record_count = parse_int(&read_field(input, 8)?, "number of data records")?;
        let record_duration_secs = parse_float(&read_field(input, 8)?, "record duration")?;
        let signal_count = parse_int(&read_field(input, 4)?, "number of signals")?;

        if signal_count < 0 {
            return Err(DecodeError::Format(format!(
                "negative signal count: {}",
                signal_count
            )));
        }
        let ns = signal_count as usize;

        if header_bytes != (256 + 256 * ns) as i64 {
            return Err(DecodeError::Format(format!(
                "header byte count {} does not match {} signals",
                header_bytes, ns
            )));
        }

        let channel_labels = read_field_list(input, 16, ns)?;
        let transducer_types = read_field_list(input, 80, ns)?;
        let _physical_dimensions = read_field_list(input, 8, ns)?;
        let _physical_minimums = read_field_list(input, 8, ns)?;
        let _physical_maximums = read_field_list(input, 8, ns)?;
        let _digital_minimums = read_field_list(input, 8, ns)?;
        let _digital_maximums = read_field_list(input, 8, ns)?;
        let _prefilterings = read_field_list(input, 80, ns)?;
        let samples_per_record = read_int_list(input, 8, ns, "samples per record")?;
        let _signal_reserved = read_field_list(input, 32, ns)?;

        let annotation_signal = channel_labels
            .iter()
            .position(|label| label.trim() == ANNOTATION_LABEL);

        let annotations = match annotation_signal {
            Some(index) => Some(read_annotations(
                input,
                &samples_per_record,
                index,
                record_count,
            )?),
            None => None,
        };

        Ok(DecodedRecording {
            recording_id,
            start_date,
            start_time,
            subject_id,
            channel_labels,
            transducer_types,
            record_count,
            record_duration_secs,
            annotations,
        })
    }
}

/// Read one fixed-width ASCII field, with the trailing space padding
/// stripped.
fn read_field(input: &mut dyn Read, width: usize) -> Result<String, DecodeError> {
    let mut buf = vec![0u8; width];
    input.read_exact(&mut buf).map_err(map_eof)?;

    let text = String::from_utf8(buf)
        .map_err(|_| DecodeError::Format("header contains non-ASCII data".to_string()))?;
    Ok(text.trim_end().to_string())
}

fn read_field_list(
    input: &mut dyn Read,
    width: usize,
    count: usize,
) -> Result<Vec<String>, DecodeError> {
    (0..count).map(|_| read_field(input, width)).collect()
}

fn read_int_list(
    input: &mut dyn Read,
    width: usize,
    count: usize,
    what: &str,
) -> Result<Vec<i64>, DecodeError> {
    read_field_list(input, width, count)?
        .iter()
        .map(|field| {
            let value = parse_int(field, what)?;
            if value < 0 {
                return Err(DecodeError::Format(format!("negative {}: {}", what, value)));
            }
            Ok(value)
        })
        .collect()
}

fn parse_int(field: &str, what: &str) -> Result<i64, DecodeError> {
    field
        .trim()
        .parse()
        .map_err(|_| DecodeError::Format(format!("invalid {}: {:?}", what, field.trim())))
}

fn parse_float(field: &str, what: &str) -> Result<f64, DecodeError> {
    field
        .trim()
        .parse()
        .map_err(|_| DecodeError::Format(format!("invalid {}: {:?}", what, field.trim())))
}

fn map_eof(e: std::io::Error) -> DecodeError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        DecodeError::Format("unexpected end of input".to_string())
    } else {
        DecodeError::Io(e)
    }
}

/// Collect annotation texts from the annotation signal's TAL blocks.
///
/// Each data record carries `samples × 2` bytes per signal; the
/// annotation signal's bytes hold zero-terminated TALs of the form
/// `onset[\x15duration]\x14text\x14...\x00`. The per-record timekeeping
/// TAL has an empty text and is not counted.
fn read_annotations(
    input: &mut dyn Read,
    samples_per_record: &[i64],
    annotation_signal: usize,
    record_count: i64,
) -> Result<Vec<String>, DecodeError> {
    let mut annotations = Vec::new();

    for _ in 0..record_count.max(0) {
        for (signal, samples) in samples_per_record.iter().enumerate() {
            let byte_count = (*samples as usize) * 2;
            if signal == annotation_signal {
                let mut buf = vec![0u8; byte_count];
                input.read_exact(&mut buf).map_err(map_eof)?;
                collect_annotation_texts(&buf, &mut annotations);
            } else {
                skip_bytes(input, byte_count)?;
            }
        }
    }

    Ok(annotations)
}

fn collect_annotation_texts(block: &[u8], out: &mut Vec<String>) {
    for tal in block.split(|b| *b == 0) {
        if tal.is_empty() {
            continue;
        }
        // First field is the onset (and optional duration); the rest are texts.
        for text in tal.split(|b| *b == TAL_FIELD_SEP).skip(1) {
            if !text.is_empty() {
                out.push(String::from_utf8_lossy(text).into_owned());
            }
        }
    }
}

fn skip_bytes(input: &mut dyn Read, count: usize) -> Result<(), DecodeError> {
    let copied = std::io::copy(&mut (&mut *input).take(count as u64), &mut std::io::sink())?;
    if copied != count as u64 {
        return Err(DecodeError::Format(
            "unexpected end of data records".to_string(),
        ));
    }
    Ok(())
}
