use super::{BackupEntry, BackupStore};
use crate::error::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const INDEX_FILENAME: &str = "index.json";

/// File-based backup store.
///
/// Snapshots live flat under the backup root as `bak-{uuid}.{ext}`; the
/// logical-path to snapshot mapping is kept in `index.json` so history
/// survives restarts.
pub struct FileBackupStore {
    root: PathBuf,
}

impl FileBackupStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn load_index(&self) -> Result<HashMap<String, Vec<BackupEntry>>> {
        let index_file = self.root.join(INDEX_FILENAME);
        if !index_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(index_file)?;
        let index = serde_json::from_str(&content)?;
        Ok(index)
    }

    fn save_index(&self, index: &HashMap<String, Vec<BackupEntry>>) -> Result<()> {
        let content = serde_json::to_string_pretty(index)?;
        fs::write(self.root.join(INDEX_FILENAME), content)?;
        Ok(())
    }

    fn index_key(logical: &Path) -> String {
        logical.to_string_lossy().into_owned()
    }

    fn snapshot_filename(logical: &Path, id: &uuid::Uuid) -> String {
        match logical.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("bak-{}.{}", id, ext),
            None => format!("bak-{}", id),
        }
    }

    /// All entries, oldest first per logical path.
    pub fn list(&self) -> Result<Vec<BackupEntry>> {
        let index = self.load_index()?;
        let mut entries: Vec<BackupEntry> = index.into_values().flatten().collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(entries)
    }

    /// Write every snapshot into a gzipped tar archive.
    pub fn export<W: Write>(&self, writer: W) -> Result<usize> {
        let entries = self.list()?;

        let enc = GzEncoder::new(writer, Compression::default());
        let mut tar = tar::Builder::new(enc);

        for entry in &entries {
            let snapshot = self.root.join(&entry.file);
            if !snapshot.is_file() {
                continue;
            }
            let content = fs::read(&snapshot)?;

            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();

            let entry_name = format!("backups/{}", entry.file);
            tar.append_data(&mut header, entry_name, content.as_slice())?;
        }

        tar.finish()?;
        Ok(entries.len())
    }
}

impl BackupStore for FileBackupStore {
    fn backup(&mut self, logical: &Path) -> Result<()> {
        self.ensure_root()?;

        // Read first so a missing source never leaves a dangling index entry.
        let content = fs::read(logical)?;

        let mut index = self.load_index()?;
        let entry = BackupEntry::new(logical, String::new());
        let filename = Self::snapshot_filename(logical, &entry.id);
        fs::write(self.root.join(&filename), content)?;

        let entry = BackupEntry { file: filename, ..entry };
        index.entry(Self::index_key(logical)).or_default().push(entry);
        self.save_index(&index)
    }

    fn latest_backup(&self, logical: &Path) -> Option<PathBuf> {
        let index = self.load_index().ok()?;
        let entries = index.get(&Self::index_key(logical))?;
        let last = entries.last()?;
        Some(self.root.join(&last.file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_and_latest() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("item_db.txt");
        fs::write(&source, "1,Apple\n").unwrap();

        let mut store = FileBackupStore::new(dir.path().join("backups"));
        assert_eq!(store.latest_backup(&source), None);

        store.backup(&source).unwrap();
        let latest = store.latest_backup(&source).unwrap();
        assert_eq!(fs::read_to_string(latest).unwrap(), "1,Apple\n");
    }

    #[test]
    fn test_latest_is_most_recent() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("mob_db.txt");
        let mut store = FileBackupStore::new(dir.path().join("backups"));

        fs::write(&source, "old").unwrap();
        store.backup(&source).unwrap();
        fs::write(&source, "new").unwrap();
        store.backup(&source).unwrap();

        let latest = store.latest_backup(&source).unwrap();
        assert_eq!(fs::read_to_string(latest).unwrap(), "new");
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_backup_missing_source_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBackupStore::new(dir.path().join("backups"));

        let missing = dir.path().join("absent.txt");
        assert!(store.backup(&missing).is_err());
        assert_eq!(store.latest_backup(&missing), None);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("item_db.conf");
        fs::write(&source, "{}").unwrap();

        let mut store = FileBackupStore::new(dir.path().join("backups"));
        store.backup(&source).unwrap();

        let latest = store.latest_backup(&source).unwrap();
        assert_eq!(latest.extension().unwrap(), "conf");
    }

    #[test]
    fn test_export_produces_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("item_db.txt");
        fs::write(&source, "1,Apple\n").unwrap();

        let mut store = FileBackupStore::new(dir.path().join("backups"));
        store.backup(&source).unwrap();

        let mut buf = Vec::new();
        let count = store.export(&mut buf).unwrap();
        assert_eq!(count, 1);
        // Gzip magic
        assert_eq!(buf[0], 0x1f);
        assert_eq!(buf[1], 0x8b);
    }
}
