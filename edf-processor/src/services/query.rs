//! Query views over the current snapshot

use std::cmp::Ordering;
use std::sync::Arc;

use super::cache::{Snapshot, SnapshotCache};

/// Read-only views over the cached snapshot
pub struct RecordingQuery {
    cache: Arc<SnapshotCache>,
}

impl RecordingQuery {
    pub fn new(cache: Arc<SnapshotCache>) -> RecordingQuery {
        RecordingQuery { cache }
    }

    /// All records in snapshot order (scan enumeration order)
    pub fn list_all(&self) -> Arc<Snapshot> {
        self.cache.current()
    }

    /// All records sorted by recording timestamp, most recent first.
    ///
    /// The sort is stable: records without a parsed timestamp (invalid
    /// files, or valid files with an unparseable header date) keep their
    /// snapshot order after all the dated ones.
    pub fn list_sorted_by_recording_date(&self) -> Snapshot {
        let mut records: Snapshot = self.cache.current().as_ref().clone();
        records.sort_by(
            |a, b| match (a.recording_timestamp(), b.recording_timestamp()) {
                (Some(ta), Some(tb)) => tb.cmp(&ta),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        );
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edf_common::model::RecordingFile;

    fn valid(file_name: &str, start_date: &str, start_time: &str) -> RecordingFile {
        RecordingFile::valid(
            file_name, "id", start_date, start_time, None, &[], &[], 0, 0.0, 0,
        )
    }

    fn query_over(snapshot: Snapshot) -> RecordingQuery {
        let cache = Arc::new(SnapshotCache::new());
        cache.replace(snapshot);
        RecordingQuery::new(cache)
    }

    #[test]
    fn list_all_preserves_snapshot_order() {
        let query = query_over(vec![
            valid("b.edf", "03.03.22", "10.30.00"),
            valid("a.edf", "04.03.22", "10.30.00"),
        ]);

        let all = query.list_all();
        assert_eq!(all[0].file_name(), "b.edf");
        assert_eq!(all[1].file_name(), "a.edf");
    }

    #[test]
    fn sorted_view_is_descending_with_undated_last() {
        let query = query_over(vec![
            valid("old.edf", "01.01.20", "08.00.00"),
            RecordingFile::invalid("broken-1.edf", "bad header"),
            valid("new.edf", "03.03.22", "10.30.00"),
            valid("undated.edf", "junk", "junk"),
            RecordingFile::invalid("broken-2.edf", "bad header"),
            valid("mid.edf", "15.06.21", "12.00.00"),
        ]);

        let sorted = query.list_sorted_by_recording_date();
        let names: Vec<_> = sorted.iter().map(|r| r.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "new.edf",
                "mid.edf",
                "old.edf",
                // Undated records keep their snapshot order at the end.
                "broken-1.edf",
                "undated.edf",
                "broken-2.edf",
            ]
        );
    }

    #[test]
    fn sorted_view_does_not_mutate_the_snapshot() {
        let query = query_over(vec![
            valid("b.edf", "03.03.22", "10.30.00"),
            valid("a.edf", "04.03.22", "10.30.00"),
        ]);

        let _sorted = query.list_sorted_by_recording_date();
        assert_eq!(query.list_all()[0].file_name(), "b.edf");
    }
}
