//! Email recall: one locally persisted key-value record.
//!
//! The contact-capture modal pre-fills the agent's email from the previous
//! session. Read and write failures are swallowed; losing the recall record
//! only costs the user a few keystrokes.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "leadform";
const RECALL_FILE: &str = "recall.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecallRecord {
    email: String,
    updated_at: DateTime<Utc>,
}

pub struct RecallStore {
    path: PathBuf,
}

impl Default for RecallStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecallStore {
    /// Store rooted in the platform data directory.
    pub fn new() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join(APP_DIR).join(RECALL_FILE),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Previously remembered email, if one is stored and readable.
    pub fn last_email(&self) -> Option<String> {
        let data = fs::read_to_string(&self.path).ok()?;
        let record: RecallRecord = serde_json::from_str(&data).ok()?;
        Some(record.email)
    }

    /// Remembers the email for the next session. Failures are logged at
    /// debug level and otherwise ignored.
    pub fn remember_email(&self, email: &str) {
        let record = RecallRecord {
            email: email.trim().to_string(),
            updated_at: Utc::now(),
        };
        if let Err(err) = self.write_record(&record) {
            tracing::debug!(path = %self.path.display(), error = %err, "email recall write failed");
        }
    }

    fn write_record(&self, record: &RecallRecord) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record).map_err(std::io::Error::from)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecallStore::with_path(dir.path().join("recall.json"));
        assert_eq!(store.last_email(), None);
    }

    #[test]
    fn remember_then_recall_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecallStore::with_path(dir.path().join("recall.json"));

        store.remember_email("  dana@example.com ");
        assert_eq!(store.last_email().as_deref(), Some("dana@example.com"));

        store.remember_email("riley@example.com");
        assert_eq!(store.last_email().as_deref(), Some("riley@example.com"));
    }

    #[test]
    fn corrupt_record_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recall.json");
        fs::write(&path, "{not json").unwrap();
        let store = RecallStore::with_path(path);
        assert_eq!(store.last_email(), None);
    }

    #[test]
    fn unwritable_path_is_swallowed() {
        let store = RecallStore::with_path(PathBuf::from("/proc/definitely/not/writable.json"));
        store.remember_email("dana@example.com");
        assert_eq!(store.last_email(), None);
    }
}
