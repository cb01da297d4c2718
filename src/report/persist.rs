//! Report persistence

use crate::report::ReportError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes the report text to `destination`, replacing any existing file
///
/// The text goes to a temporary file in the destination's directory, which
/// is then renamed over `destination`. A failed write leaves the previous
/// report untouched.
///
/// # Arguments
///
/// * `text` - The report body, written as UTF-8
/// * `destination` - Path of the report file
///
/// # Returns
///
/// * `Ok(())` - The whole report was written
/// * `Err(ReportError::Persist)` - The file could not be created, written or moved into place
pub fn persist(text: &str, destination: &Path) -> Result<(), ReportError> {
    let persist_error = |source| ReportError::Persist {
        path: destination.display().to_string(),
        source,
    };

    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory).map_err(persist_error)?;
    file.write_all(text.as_bytes()).map_err(persist_error)?;
    file.flush().map_err(persist_error)?;
    file.persist(destination).map_err(|e| persist_error(e.error))?;

    tracing::info!("Report saved to {}", destination.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_persist_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");

        persist("Résumé of the site", &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Résumé of the site");
    }

    #[test]
    fn test_persist_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");

        persist("a much longer first report", &path).unwrap();
        persist("second", &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_persist_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("report.txt");

        let err = persist("text", &path).unwrap_err();
        assert!(matches!(err, ReportError::Persist { .. }));
        assert!(err.to_string().contains("no-such-dir"));
    }

    #[test]
    fn test_persist_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");

        persist("first", &path).unwrap();
        persist("second", &path).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("report.txt")]);
    }

    #[test]
    fn test_failed_replace_keeps_existing_destination() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        // a non-empty directory cannot be replaced by a file
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("previous.txt"), "previous report").unwrap();

        let err = persist("new report", &path).unwrap_err();

        assert!(matches!(err, ReportError::Persist { .. }));
        assert_eq!(
            std::fs::read_to_string(path.join("previous.txt")).unwrap(),
            "previous report"
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
