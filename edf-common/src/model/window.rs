//! Recording start date/time from the EDF header

use chrono::NaiveDateTime;

/// Pattern the combined `"<date> <time>"` header string must match
/// (`dd.MM.yy HH.mm.ss`).
const DATE_TIME_FORMAT: &str = "%d.%m.%y %H.%M.%S";

/// Parsed recording start moment together with the raw header strings
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingWindow {
    pub start_date: String,
    pub start_time: String,
    pub timestamp: NaiveDateTime,
}

impl RecordingWindow {
    /// Combine the raw start date and time fields and parse them.
    ///
    /// Returns `None` when the combined string (each part trimmed,
    /// joined by a single space) does not match the header pattern.
    /// An unparseable date is not an error; the recording simply has
    /// no window.
    pub fn from_raw(start_date: &str, start_time: &str) -> Option<RecordingWindow> {
        let combined = format!("{} {}", start_date.trim(), start_time.trim());

        match NaiveDateTime::parse_from_str(&combined, DATE_TIME_FORMAT) {
            Ok(timestamp) => Some(RecordingWindow {
                start_date: start_date.to_string(),
                start_time: start_time.to_string(),
                timestamp,
            }),
            Err(_) => {
                tracing::warn!("Failed to parse recording date: {} {}", start_date, start_time);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn parses_header_date_and_time() {
        let window = RecordingWindow::from_raw("03.03.22", "10.30.00").unwrap();
        assert_eq!(
            window.timestamp,
            NaiveDate::from_ymd_opt(2022, 3, 3)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(10, 30, 0).unwrap())
        );
        assert_eq!(window.start_date, "03.03.22");
        assert_eq!(window.start_time, "10.30.00");
    }

    #[test]
    fn trims_raw_fields_before_parsing() {
        let window = RecordingWindow::from_raw(" 03.03.22 ", " 10.30.00").unwrap();
        assert_eq!(window.timestamp.format("%H.%M.%S").to_string(), "10.30.00");
    }

    #[test]
    fn wrong_separators_yield_no_window() {
        assert!(RecordingWindow::from_raw("03-03-22", "10.30.00").is_none());
        assert!(RecordingWindow::from_raw("03.03.22", "10:30:00").is_none());
    }

    #[test]
    fn out_of_range_values_yield_no_window() {
        assert!(RecordingWindow::from_raw("45.13.22", "10.30.00").is_none());
        assert!(RecordingWindow::from_raw("03.03.22", "25.61.00").is_none());
    }

    #[test]
    fn blank_fields_yield_no_window() {
        assert!(RecordingWindow::from_raw("", "").is_none());
        assert!(RecordingWindow::from_raw("03.03.22", "").is_none());
    }
}
