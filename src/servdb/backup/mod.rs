//! Backup storage.
//!
//! Before any destructive write the current on-disk file is copied into a
//! backup store keyed by its logical path; the latest entry per path is the
//! rollback point a write is validated against. The store is used twice per
//! lifecycle: right after a successful load (protect pristine input) and
//! right before bytes are overwritten.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub mod fs;

/// One snapshot of a logical path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupEntry {
    pub id: Uuid,
    /// Logical path the snapshot was taken from.
    pub logical: PathBuf,
    /// Snapshot filename inside the backup root.
    pub file: String,
    pub created_at: DateTime<Utc>,
}

impl BackupEntry {
    pub fn new(logical: &Path, file: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            logical: logical.to_path_buf(),
            file,
            created_at: Utc::now(),
        }
    }
}

pub trait BackupStore {
    /// Snapshot the current contents at `logical`. Always creates a new
    /// "latest" entry; fails if the source cannot be read.
    fn backup(&mut self, logical: &Path) -> Result<()>;

    /// Location of the most recent snapshot for `logical`, or `None` if the
    /// path was never backed up.
    fn latest_backup(&self, logical: &Path) -> Option<PathBuf>;
}
