//! Recording listing and rescan endpoints
//!
//! The JSON field names are the contract the frontend consumes; invalid
//! files are returned alongside valid ones, differentiated by `validEdf`.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use edf_common::model::RecordingFile;

use crate::error::ApiResult;
use crate::AppState;

/// One channel as served to the frontend
#[derive(Debug, Clone, Serialize)]
pub struct ChannelDto {
    pub name: String,
    #[serde(rename = "type")]
    pub transducer_type: String,
}

/// One recording file as served to the frontend
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingDto {
    pub file_name: String,
    pub valid_edf: bool,
    pub error_message: Option<String>,
    #[serde(rename = "recordingID")]
    pub recording_id: Option<String>,
    pub recording_date: Option<NaiveDateTime>,
    pub patient_name: String,
    pub channels: Vec<ChannelDto>,
    pub number_of_channels: usize,
    pub recording_length: f64,
    pub number_of_annotations: usize,
}

impl RecordingDto {
    fn from_record(record: &RecordingFile) -> RecordingDto {
        RecordingDto {
            file_name: record.file_name().to_string(),
            valid_edf: record.is_valid(),
            error_message: record.error_reason().map(str::to_string),
            recording_id: record.recording_id().map(str::to_string),
            recording_date: record.recording_timestamp(),
            patient_name: record.patient_name().to_string(),
            channels: record
                .channels()
                .iter()
                .map(|c| ChannelDto {
                    name: c.label.clone(),
                    transducer_type: c.transducer_type.clone(),
                })
                .collect(),
            number_of_channels: record.channels().len(),
            recording_length: record.total_length_secs(),
            number_of_annotations: record.annotation_count(),
        }
    }
}

fn to_dtos<'a>(records: impl IntoIterator<Item = &'a RecordingFile>) -> Vec<RecordingDto> {
    records.into_iter().map(RecordingDto::from_record).collect()
}

/// GET /api/edfs
///
/// All scanned files in snapshot order, valid and invalid together.
pub async fn get_all_edfs(State(state): State<AppState>) -> Json<Vec<RecordingDto>> {
    tracing::debug!("Fetching all EDF files");
    Json(to_dtos(state.query.list_all().iter()))
}

/// GET /api/edfs/sorted
///
/// All scanned files sorted by recording date, most recent first;
/// files without a date at the end.
pub async fn get_all_edfs_sorted(State(state): State<AppState>) -> Json<Vec<RecordingDto>> {
    tracing::debug!("Fetching all EDF files sorted by recording date");
    Json(to_dtos(state.query.list_sorted_by_recording_date().iter()))
}

#[derive(Debug, Deserialize)]
pub struct RescanParams {
    #[serde(default)]
    pub sorted: bool,
}

/// POST /api/edfs/rescan?sorted=<bool>
///
/// Reload all files from the source directory, then return the requested
/// view. A missing source directory maps to 404 and leaves the previous
/// snapshot in place.
pub async fn rescan_source(
    State(state): State<AppState>,
    Query(params): Query<RescanParams>,
) -> ApiResult<Json<Vec<RecordingDto>>> {
    tracing::debug!("Rescanning EDF source directory");
    state.ingest.rescan()?;

    let records = if params.sorted {
        state.query.list_sorted_by_recording_date()
    } else {
        state.query.list_all().as_ref().clone()
    };
    Ok(Json(to_dtos(records.iter())))
}

/// Build recording routes
pub fn recording_routes() -> Router<AppState> {
    Router::new()
        .route("/api/edfs", get(get_all_edfs))
        .route("/api/edfs/sorted", get(get_all_edfs_sorted))
        .route("/api/edfs/rescan", post(rescan_source))
}
