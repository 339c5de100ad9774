//! Text file content retrieval.

use std::fs;

use crate::error::FileSystemError;

/// Read a text file as its lines, without trailing line terminators.
///
/// # Errors
/// `FileUnreadable` when the file is missing, unreadable, or not valid
/// UTF-8.
pub fn read_lines(path: &str) -> Result<Vec<String>, FileSystemError> {
    let text: String = fs::read_to_string(path).map_err(|err| FileSystemError::FileUnreadable {
        path: path.to_string(),
        message: err.to_string(),
    })?;
    Ok(text.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_lines_strips_terminators() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "first\nsecond\r\nthird").unwrap();

        let lines = read_lines(&path.to_string_lossy()).unwrap();
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_read_lines_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        assert!(read_lines(&path.to_string_lossy()).unwrap().is_empty());
    }

    #[test]
    fn test_read_lines_missing_file() {
        let err = read_lines("/absent/file.txt").unwrap_err();
        match err {
            FileSystemError::FileUnreadable { path, .. } => {
                assert_eq!(path, "/absent/file.txt");
            }
            other => panic!("expected FileUnreadable, got {other:?}"),
        }
    }

    #[test]
    fn test_read_lines_rejects_binary() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob.bin");
        fs::write(&path, [0u8, 159, 146, 150]).unwrap();

        assert!(matches!(
            read_lines(&path.to_string_lossy()),
            Err(FileSystemError::FileUnreadable { .. })
        ));
    }
}
