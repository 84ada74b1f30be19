use crate::backup::fs::FileBackupStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use chrono::Utc;
use std::fs::File;
use std::path::{Path, PathBuf};

pub fn list(store: &FileBackupStore) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.backups = store.list()?;

    if result.backups.is_empty() {
        result.add_message(CmdMessage::info("No backups recorded yet."));
    }

    Ok(result)
}

/// Export every snapshot into a tar.gz archive. A missing `output` picks a
/// timestamped filename in the current directory.
pub fn export(store: &FileBackupStore, output: Option<&Path>) -> Result<CmdResult> {
    let filename = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!(
            "servdb-backups-{}.tar.gz",
            Utc::now().format("%Y-%m-%d_%H-%M-%S")
        )),
    };

    let file = File::create(&filename)?;
    let count = store.export(file)?;

    let mut result = CmdResult::default();
    if count == 0 {
        result.add_message(CmdMessage::info("No backups to export."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Exported {} backups to {}",
            count,
            filename.display()
        )));
    }
    Ok(result)
}
