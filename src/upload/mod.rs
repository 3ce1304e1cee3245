//! Create/replace/delete lifecycle for remotely stored media.
//!
//! Media-upload steps hand files to an [`UploadCoordinator`], which generates
//! session-scoped storage keys, performs the put through an injected
//! [`ObjectStore`], and returns the [`UploadRecord`] the step keeps in its
//! form-state slice. Replacement never deletes the previous object until the
//! new one is safely stored.

mod store;

pub use store::{ObjectStore, S3HttpStore};

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::UploadError;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
const FALLBACK_FILENAME: &str = "upload";

/// Remotely stored media referenced by a form-state slice.
///
/// When a slice holds a list of records, array position is the user-assigned
/// display rank: index 0 is the lead photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: Uuid,
    #[serde(rename = "s3Key")]
    pub s3_key: String,
    #[serde(rename = "s3Url")]
    pub s3_url: String,
    #[serde(rename = "originalFilename", skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}

/// A file handed over by a media-upload step.
pub struct UploadSource<'a> {
    pub file_name: &'a str,
    pub bytes: &'a [u8],
    pub content_type: Option<&'a str>,
}

/// Manages uploads for one wizard session.
///
/// The storage backend is injected at construction, so tests run against a
/// fake store and nothing lives in module scope.
pub struct UploadCoordinator {
    store: Arc<dyn ObjectStore>,
    namespace: String,
    owner_id: OnceCell<String>,
}

impl UploadCoordinator {
    pub fn new(store: Arc<dyn ObjectStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            owner_id: OnceCell::new(),
        }
    }

    /// Per-session storage prefix, generated lazily on first use so every
    /// upload in the session lands under the same owner segment.
    pub fn owner_id(&self) -> &str {
        self.owner_id.get_or_init(|| shorthand(Uuid::new_v4()))
    }

    /// Uploads a file and returns its record. When `previous_key` is given
    /// (a replace), the old object is deleted only after the new put
    /// succeeds, so a failed replace leaves the user with the prior file.
    pub fn upload(
        &self,
        source: &UploadSource<'_>,
        previous_key: Option<&str>,
    ) -> Result<UploadRecord, UploadError> {
        if source.bytes.is_empty() {
            return Err(UploadError::EmptyFile);
        }

        let id = Uuid::new_v4();
        let key = format!(
            "{}/{}/{}-{}",
            self.namespace,
            self.owner_id(),
            shorthand(id),
            sanitize_filename(source.file_name)
        );
        let content_type = source.content_type.unwrap_or(FALLBACK_CONTENT_TYPE);
        let url = self.store.put(&key, source.bytes, content_type)?;
        tracing::info!(key = %key, "upload stored");

        if let Some(previous) = previous_key {
            self.delete(previous);
        }

        Ok(UploadRecord {
            id,
            s3_key: key,
            s3_url: url,
            original_filename: Some(source.file_name.to_string()),
        })
    }

    /// Best-effort remote delete. A failure only leaves an orphaned object,
    /// so it is logged and the caller drops the record regardless.
    pub fn delete(&self, key: &str) {
        if let Err(err) = self.store.delete(key) {
            tracing::warn!(key = %key, error = %err, "best-effort storage delete failed");
        }
    }
}

/// Maps whitespace to `_` and drops anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_filename(name: &str) -> String {
    let mut sanitized = String::new();
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            sanitized.push(ch);
        } else if ch.is_whitespace() {
            sanitized.push('_');
        }
    }
    if sanitized.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        sanitized
    }
}

fn shorthand(id: Uuid) -> String {
    let mut compact = id.simple().to_string();
    compact.truncate(8);
    compact
}

/// Moves the element at `from` to `to`, shifting the rest. Out-of-range
/// indices leave the list untouched. The resulting order is the canonical
/// user-assigned rank.
pub fn reorder<T>(list: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= list.len() || to >= list.len() {
        return;
    }
    let item = list.remove(from);
    list.insert(to, item);
}

/// Tracks concurrently running uploads by temporary ticket so per-file state
/// never collides. Steps disable "add more" and submission while any ticket
/// is outstanding; unrelated field edits stay open.
#[derive(Debug, Default)]
pub struct UploadTracker {
    in_flight: Mutex<HashSet<Uuid>>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn tickets(&self) -> std::sync::MutexGuard<'_, HashSet<Uuid>> {
        // A poisoned lock only means a panicking test thread; the set itself
        // is still coherent.
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers an upload that just started and returns its ticket.
    pub fn begin(&self) -> Uuid {
        let ticket = Uuid::new_v4();
        self.tickets().insert(ticket);
        ticket
    }

    /// Marks an upload as finished, whatever its outcome.
    pub fn finish(&self, ticket: Uuid) {
        self.tickets().remove(&ticket);
    }

    pub fn in_flight(&self) -> usize {
        self.tickets().len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight() == 0
    }
}

/// Validity rule for a photo-gallery step: enough photos and nothing still
/// uploading.
pub fn gallery_ready(records: &[UploadRecord], tracker: &UploadTracker, min_photos: usize) -> bool {
    records.len() >= min_photos && tracker.is_idle()
}
