//! File Sink

use crate::codec::{from_json, to_json};
use crate::SinkError;
use rule_engine::RuleDocument;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes rule documents to a single JSON file.
///
/// The document is written to a hidden sibling file first and then renamed
/// over the target, so readers never see a partial document.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate and persist `document`, replacing any previous one
    pub fn write(&self, document: &RuleDocument) -> Result<(), SinkError> {
        document.validate()?;
        let json = to_json(document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))?;
        }

        let staging = self.staging_path();
        fs::write(&staging, json.as_bytes()).map_err(|e| self.io_error(&staging, e))?;
        debug!("Staged {} bytes at {}", json.len(), staging.display());

        fs::rename(&staging, &self.path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            self.io_error(&self.path, e)
        })?;

        info!("Wrote {} version {}", self.path.display(), document.version());
        Ok(())
    }

    /// Load the currently persisted document
    pub fn read(&self) -> Result<RuleDocument, SinkError> {
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(&self.path, e))?;
        from_json(&text)
    }

    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "rules.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn io_error(&self, path: &Path, err: std::io::Error) -> SinkError {
        SinkError::IoError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rule_engine::{build_rules, seed_rules};

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("arb.json"));

        let doc = build_rules(
            &[21.0, 23.5, 26.0, 29.0],
            &[48.0, 41.0, 37.5],
            &[],
            DateTime::from_timestamp(1_714_557_600, 0).unwrap(),
        );
        sink.write(&doc).unwrap();

        assert_eq!(sink.read().unwrap(), doc);
        assert!(!dir.path().join(".arb.json.tmp").exists());
    }

    #[test]
    fn test_written_bytes_match_codec() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("arb.json"));
        let doc = seed_rules(DateTime::from_timestamp(42, 0).unwrap());
        sink.write(&doc).unwrap();

        let on_disk = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(on_disk, to_json(&doc).unwrap());
        assert!(on_disk.starts_with("{\n  \"version\": 42,"));
        assert!(!on_disk.ends_with('\n'));
    }

    #[test]
    fn test_overwrites_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("arb.json"));

        sink.write(&seed_rules(DateTime::from_timestamp(100, 0).unwrap()))
            .unwrap();
        sink.write(&seed_rules(DateTime::from_timestamp(200, 0).unwrap()))
            .unwrap();

        assert_eq!(sink.read().unwrap().version(), 200);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("rules").join("current").join("arb.json"));
        sink.write(&seed_rules(DateTime::from_timestamp(1, 0).unwrap()))
            .unwrap();
        assert!(sink.path().exists());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("missing.json"));
        assert!(matches!(sink.read(), Err(SinkError::IoError { .. })));
    }
}
