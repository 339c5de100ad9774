//! Metadata enrichment for scan entries.
//!
//! Each pass consumes an [`Entries`] value and returns the annotated value,
//! so call sites rebind instead of relying on mutation through a reference.
//! Passes are independent and compose in any order; none of them re-walks a
//! directory. A path that cannot be stat'ed is reported as a warning and the
//! corresponding field stays unset.

use std::fs::{self, Metadata};
use std::time::{SystemTime, UNIX_EPOCH};

use filekeeper_common::{base_name, file_extension, Reporter};

use crate::entry::{Entries, Entry};

/// Annotate file entries with their size in bytes.
///
/// Directory entries keep `size` unset.
pub fn annotate_size(entries: Entries, reporter: &dyn Reporter) -> Entries {
    entries.map_entries(|entry| annotate_entry_size(entry, reporter))
}

/// Size pass for a single entry.
pub fn annotate_entry_size(mut entry: Entry, reporter: &dyn Reporter) -> Entry {
    if let Some(meta) = stat(&entry.path, reporter) {
        if meta.is_file() {
            entry.size = Some(meta.len());
        }
    }
    entry
}

/// Annotate file entries with their lower-cased extension.
///
/// Directory entries keep `extension` unset, as do files whose basename has
/// no extension.
pub fn annotate_extension(entries: Entries, reporter: &dyn Reporter) -> Entries {
    entries.map_entries(|entry| annotate_entry_extension(entry, reporter))
}

/// Extension pass for a single entry.
pub fn annotate_entry_extension(mut entry: Entry, reporter: &dyn Reporter) -> Entry {
    if let Some(meta) = stat(&entry.path, reporter) {
        if meta.is_file() {
            entry.extension = file_extension(&entry.path);
        }
    }
    entry
}

/// Annotate every entry with its basename.
///
/// Purely lexical, so it applies to directories and to paths that no longer
/// exist.
pub fn annotate_name(entries: Entries) -> Entries {
    entries.map_entries(annotate_entry_name)
}

/// Name pass for a single entry.
pub fn annotate_entry_name(mut entry: Entry) -> Entry {
    entry.name = Some(base_name(&entry.path).to_string());
    entry
}

/// Annotate every entry with its modification time in epoch microseconds.
pub fn annotate_modified(entries: Entries, reporter: &dyn Reporter) -> Entries {
    entries.map_entries(|entry| annotate_entry_modified(entry, reporter))
}

/// Modification-time pass for a single entry.
pub fn annotate_entry_modified(mut entry: Entry, reporter: &dyn Reporter) -> Entry {
    if let Some(meta) = stat(&entry.path, reporter) {
        match meta.modified() {
            Ok(time) => entry.modified_us = Some(system_time_to_micros(time)),
            Err(err) => {
                reporter.warning(&format!("No modification time for {}: {err}", entry.path));
            }
        }
    }
    entry
}

fn stat(path: &str, reporter: &dyn Reporter) -> Option<Metadata> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta),
        Err(err) => {
            reporter.warning(&format!("{path} not found: {err}"));
            None
        }
    }
}

/// Microseconds since the Unix epoch, negative for earlier timestamps.
fn system_time_to_micros(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_micros() as i64,
        Err(earlier) => -(earlier.duration().as_micros() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ScanResult;
    use filekeeper_common::{report_fn, NoopReporter};
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, String, String) {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Notes.TXT");
        fs::write(&file, b"0123456789").unwrap();
        let dir = temp.path().join("folder");
        fs::create_dir(&dir).unwrap();
        (
            temp,
            file.to_string_lossy().into_owned(),
            dir.to_string_lossy().into_owned(),
        )
    }

    #[test]
    fn test_annotate_size_files_only() {
        let (_temp, file, dir) = fixture();
        let enriched = annotate_size(
            Entries::from(ScanResult::from_paths([file, dir])),
            &NoopReporter,
        )
        .into_vec();

        assert_eq!(enriched[0].size, Some(10));
        assert_eq!(enriched[1].size, None);
    }

    #[test]
    fn test_annotate_extension_lowercases_and_skips_dirs() {
        let (_temp, file, dir) = fixture();
        let enriched = annotate_extension(
            Entries::from(ScanResult::from_paths([file, dir])),
            &NoopReporter,
        )
        .into_vec();

        assert_eq!(enriched[0].extension, Some("txt".to_string()));
        assert_eq!(enriched[1].extension, None);
    }

    #[test]
    fn test_annotate_name_applies_everywhere() {
        let (_temp, file, dir) = fixture();
        let enriched =
            annotate_name(Entries::from(ScanResult::from_paths([file, dir]))).into_vec();

        assert_eq!(enriched[0].name, Some("Notes.TXT".to_string()));
        assert_eq!(enriched[1].name, Some("folder".to_string()));
    }

    #[test]
    fn test_annotate_modified_sets_recent_timestamp() {
        let (_temp, file, _dir) = fixture();
        let enriched = annotate_modified(Entries::single(file), &NoopReporter).into_vec();

        let modified = enriched[0].modified_us.unwrap();
        let now_us = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_micros() as i64;
        assert!(modified > 0);
        assert!(modified <= now_us);
    }

    #[test]
    fn test_missing_path_warns_and_leaves_fields_unset() {
        let warnings: Mutex<Vec<String>> = Mutex::new(Vec::new());
        let reporter = report_fn(|_severity, message| {
            warnings.lock().unwrap().push(message.to_string());
        });

        let enriched =
            annotate_size(Entries::single("/gone/away.txt"), &reporter).into_vec();

        assert_eq!(enriched[0].size, None);
        assert!(warnings
            .lock()
            .unwrap()
            .iter()
            .any(|message| message.contains("/gone/away.txt")));
    }

    #[test]
    fn test_passes_compose_in_any_order() {
        let (_temp, file, _dir) = fixture();

        let size_first = annotate_name(annotate_size(
            Entries::single(file.clone()),
            &NoopReporter,
        ))
        .into_vec();
        let name_first = annotate_size(
            annotate_name(Entries::single(file)),
            &NoopReporter,
        )
        .into_vec();

        assert_eq!(size_first, name_first);
        assert!(size_first[0].size.is_some());
        assert!(size_first[0].name.is_some());
    }

    #[test]
    fn test_single_shape_is_preserved() {
        let (_temp, file, _dir) = fixture();
        let enriched = annotate_size(Entries::single(file), &NoopReporter);
        assert!(matches!(enriched, Entries::Single(ref entry) if entry.size == Some(10)));
    }
}
