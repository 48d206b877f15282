use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::GistError;

/// Filename -> text content. Filenames are bare (no path separators).
pub type FileSet = BTreeMap<String, String>;

/// What the caller wants the gist to look like after an update.
#[derive(Debug, Clone, Default)]
pub struct UpdateIntent {
    /// Replacement description. `None` leaves it untouched; an empty
    /// string clears it.
    pub description: Option<String>,
    /// Files to add or overwrite.
    pub files: FileSet,
    /// Filenames to remove explicitly.
    pub remove: BTreeSet<String>,
    /// Remove remote files absent from `files` (only when `files` is
    /// non-empty).
    pub sync: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePatch {
    pub content: String,
}

/// The minimal PATCH body for one update call. A `None` file entry is a
/// tombstone and serializes to JSON `null`, which the API reads as delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub files: BTreeMap<String, Option<FilePatch>>,
}

impl UpdatePayload {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.files.is_empty()
    }
}

/// Compute the minimal update payload for `intent` against the remote
/// file set. Pure; does no I/O and never looks at the network.
///
/// Unchanged files are skipped (exact string equality, no line-ending
/// normalization). Explicit removals win over staged content for the same
/// filename. Sync-removals only trigger when the intent carries a
/// non-empty file set.
pub fn reconcile(remote: &FileSet, intent: &UpdateIntent) -> Result<UpdatePayload, GistError> {
    let mut files: BTreeMap<String, Option<FilePatch>> = BTreeMap::new();

    for (name, content) in &intent.files {
        match remote.get(name) {
            Some(existing) if existing == content => {}
            _ => {
                files.insert(name.clone(), Some(FilePatch { content: content.clone() }));
            }
        }
    }

    for name in &intent.remove {
        if remote.contains_key(name) {
            files.insert(name.clone(), None);
        }
    }

    if intent.sync && !intent.files.is_empty() {
        for name in remote.keys() {
            if !intent.files.contains_key(name) && !files.contains_key(name) {
                files.insert(name.clone(), None);
            }
        }
    }

    let payload = UpdatePayload {
        description: intent.description.clone(),
        files,
    };
    if payload.is_empty() {
        return Err(GistError::NoOpUpdate);
    }
    Ok(payload)
}
