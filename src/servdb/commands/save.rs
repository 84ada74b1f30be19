use crate::backup::BackupStore;
use crate::commands::load::load_dataset;
use crate::commands::{CmdMessage, CmdResult, WriteReport};
use crate::controller::WriteDecision;
use crate::error::{Result, ServdbError};
use crate::model::{FileType, ServerDialect};
use crate::resolver::PathResolver;
use crate::sources;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub out_root: PathBuf,
    pub sub_path: String,
    pub dialect: ServerDialect,
    pub requested: Option<FileType>,
    /// Treat the table as modified even when nothing changed, forcing a full
    /// re-serialization instead of the direct-copy path.
    pub force: bool,
}

pub fn run<R, B>(resolver: &R, backups: &mut B, name: &str, opts: &SaveOptions) -> Result<CmdResult>
where
    R: PathResolver,
    B: BackupStore,
{
    let source =
        sources::find(name).ok_or_else(|| ServdbError::UnknownDataset(name.to_string()))?;

    let mut result = CmdResult::default();
    let Some(mut loaded) = load_dataset(resolver, backups, source)? else {
        result.add_message(CmdMessage::error(format!("File not found '{}'.", name)));
        return Ok(result);
    };

    if loaded.report.aborted {
        result.add_message(CmdMessage::error(format!(
            "Load of '{}' was aborted, refusing to save.",
            name
        )));
        return Ok(result);
    }

    if opts.force {
        loaded.table.mark_modified();
    }

    let decision = loaded.controller.write(
        &loaded.table,
        resolver,
        backups,
        &opts.out_root,
        &opts.sub_path,
        opts.dialect,
        opts.requested,
    )?;

    let message = match decision {
        WriteDecision::Proceed => {
            let path = loaded
                .controller
                .file_path()
                .ok_or_else(|| ServdbError::Store("write target not resolved".to_string()))?;
            fs::write(path, loaded.table.to_text())?;
            CmdMessage::success(format!("Wrote {}", path.display()))
        }
        WriteDecision::SkippedUnchanged => {
            CmdMessage::info(format!("'{}' is unchanged, copied source as-is.", name))
        }
        WriteDecision::Denied => {
            CmdMessage::warning(format!("Write of '{}' was denied, nothing touched.", name))
        }
    };
    result.add_message(message);

    if let Some(path) = loaded.controller.file_path() {
        result.write = Some(WriteReport {
            dataset: name.to_string(),
            path: path.to_path_buf(),
            decision,
            is_renewal: loaded.controller.is_renewal(),
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::fs::FileBackupStore;
    use crate::resolver::SearchRoots;
    use std::path::Path;

    fn options(out: &Path) -> SaveOptions {
        SaveOptions {
            out_root: out.to_path_buf(),
            sub_path: "pre-re".to_string(),
            dialect: ServerDialect::RAthena,
            requested: None,
            force: false,
        }
    }

    fn fixture(dir: &Path) -> (SearchRoots, FileBackupStore) {
        (
            SearchRoots::new(vec![dir.to_path_buf()], vec![]),
            FileBackupStore::new(dir.join(".backups")),
        )
    }

    #[test]
    fn test_unmodified_save_copies_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let content = "1000,quest A\n// trailing comment preserved\n";
        fs::write(dir.path().join("quest_db.txt"), content).unwrap();
        let (resolver, mut backups) = fixture(dir.path());
        let out = dir.path().join("out");

        let result = run(&resolver, &mut backups, "quest_db", &options(&out)).unwrap();

        let report = result.write.unwrap();
        assert_eq!(report.decision, WriteDecision::SkippedUnchanged);
        // Comments survive because the file was copied, not re-serialized.
        assert_eq!(
            fs::read_to_string(out.join("quest_db.txt")).unwrap(),
            content
        );
    }

    #[test]
    fn test_forced_save_serializes_records() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("quest_db.txt"),
            "1000,quest A\n// comment\n1001,quest B\n",
        )
        .unwrap();
        let (resolver, mut backups) = fixture(dir.path());
        let out = dir.path().join("out");

        let mut opts = options(&out);
        opts.force = true;
        let result = run(&resolver, &mut backups, "quest_db", &opts).unwrap();

        let report = result.write.unwrap();
        assert_eq!(report.decision, WriteDecision::Proceed);
        // Re-serialization keeps records only.
        assert_eq!(
            fs::read_to_string(out.join("quest_db.txt")).unwrap(),
            "1000,quest A\n1001,quest B\n"
        );
    }

    #[test]
    fn test_save_missing_dataset_reports() {
        let dir = tempfile::tempdir().unwrap();
        let (resolver, mut backups) = fixture(dir.path());

        let result = run(
            &resolver,
            &mut backups,
            "quest_db",
            &options(&dir.path().join("out")),
        )
        .unwrap();
        assert!(result.write.is_none());
    }

    #[test]
    fn test_save_unsupported_format_is_denied() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("quest_db.txt"), "1000,quest A\n").unwrap();
        let (resolver, mut backups) = fixture(dir.path());
        let out = dir.path().join("out");

        let mut opts = options(&out);
        opts.requested = Some(FileType::Conf);
        let result = run(&resolver, &mut backups, "quest_db", &opts).unwrap();

        let report = result.write;
        assert!(report.is_none() || !report.unwrap().decision.should_serialize());
        assert!(!out.exists());
    }
}
