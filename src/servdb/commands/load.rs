use crate::backup::BackupStore;
use crate::commands::{CmdMessage, CmdResult, LoadReport};
use crate::controller::DatasetFileController;
use crate::diagnostics::{DiagnosticsLog, Severity};
use crate::error::{Result, ServdbError};
use crate::model::{DatasetSource, FileType};
use crate::resolver::PathResolver;
use crate::sources;
use crate::table::{Record, RecordTable};
use std::fs;

/// A dataset loaded into memory, ready for editing or writing back.
pub struct LoadedDataset {
    pub controller: DatasetFileController,
    pub table: RecordTable,
    pub diagnostics: DiagnosticsLog,
    pub report: LoadReport,
}

pub fn run<R, B>(resolver: &R, backups: &mut B, name: &str) -> Result<CmdResult>
where
    R: PathResolver,
    B: BackupStore,
{
    let source =
        sources::find(name).ok_or_else(|| ServdbError::UnknownDataset(name.to_string()))?;

    let mut result = CmdResult::default();
    match load_dataset(resolver, backups, source)? {
        Some(loaded) => {
            for diag in &loaded.diagnostics.entries {
                let message = match diag.severity {
                    Severity::Error => CmdMessage::warning(&diag.message),
                    Severity::Critical => CmdMessage::error(&diag.message),
                };
                result.add_message(message);
            }
            if !loaded.report.aborted {
                result.add_message(CmdMessage::success(format!(
                    "Loaded {} records from {}",
                    loaded.report.records,
                    loaded.report.path.display()
                )));
            }
            result.load = Some(loaded.report);
        }
        None => {
            result.add_message(CmdMessage::error(format!("File not found '{}'.", name)));
        }
    }
    Ok(result)
}

/// Resolve, snapshot and parse one dataset. `None` means the file could not
/// be located; parse failures inside the file are absorbed by the error
/// budget and show up in the returned diagnostics.
pub fn load_dataset<R, B>(
    resolver: &R,
    backups: &mut B,
    source: &DatasetSource,
) -> Result<Option<LoadedDataset>>
where
    R: PathResolver,
    B: BackupStore,
{
    let mut controller = DatasetFileController::new(source.clone());
    let mut diagnostics = DiagnosticsLog::new();

    if !controller.load(resolver, backups, &mut diagnostics) {
        return Ok(None);
    }
    let Some(path) = controller.file_path().map(|p| p.to_path_buf()) else {
        return Ok(None);
    };

    let content = fs::read_to_string(&path)?;
    let raw_records = match controller.file_type() {
        Some(FileType::Conf) => conf_records(&content),
        _ => txt_records(&content),
    };

    let mut table = RecordTable::new();
    let mut skipped = 0;
    let mut aborted = false;

    for raw in raw_records {
        let keep_going = match record_key(&raw) {
            Some(key) => {
                let record = Record {
                    key: key.to_string(),
                    raw: raw.clone(),
                };
                let key = record.key.clone();
                if table.insert(record) {
                    continue;
                }
                skipped += 1;
                controller.report_record(&mut diagnostics, &key)
            }
            None => {
                skipped += 1;
                controller.report_error(
                    &mut diagnostics,
                    &format!("Unrecoverable record: '{}'", truncate(&raw)),
                )
            }
        };

        if !keep_going {
            aborted = true;
            break;
        }
    }

    let report = LoadReport {
        dataset: source.name.to_string(),
        path,
        file_type: controller.file_type(),
        records: table.len(),
        skipped,
        aborted,
    };

    Ok(Some(LoadedDataset {
        controller,
        table,
        diagnostics,
        report,
    }))
}

/// Candidate records of a comma-separated txt database: one per line,
/// comments and blank lines dropped.
fn txt_records(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim_start().is_empty() && !line.trim_start().starts_with("//"))
        .map(|line| line.to_string())
        .collect()
}

/// Candidate records of a libconfig-style conf database: top-level brace
/// blocks. This is a record splitter, not a full parser; field structure
/// inside a block is left to the caller.
fn conf_records(content: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if depth == 0 && (trimmed.is_empty() || trimmed.starts_with("//")) {
            continue;
        }

        if trimmed.contains('{') {
            depth += trimmed.matches('{').count();
        }
        if depth > 0 {
            current.push_str(line);
            current.push('\n');
        }
        if trimmed.contains('}') {
            let closing = trimmed.matches('}').count();
            depth = depth.saturating_sub(closing);
            if depth == 0 && !current.is_empty() {
                records.push(current.trim_end().to_string());
                current.clear();
            }
        }
    }

    if !current.is_empty() {
        records.push(current.trim_end().to_string());
    }
    records
}

/// Key of a raw record: first comma field for txt lines, the `Id:` field for
/// conf blocks. `None` marks the record unrecoverable.
fn record_key(raw: &str) -> Option<&str> {
    if raw.contains('{') {
        for line in raw.lines() {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix("Id:") {
                let id = rest.trim().trim_end_matches(',').trim();
                if !id.is_empty() {
                    return Some(id);
                }
            }
        }
        return None;
    }

    let key = raw.split(',').next().unwrap_or("").trim();
    if key.is_empty() || !raw.contains(',') {
        return None;
    }
    Some(key)
}

fn truncate(raw: &str) -> String {
    raw.chars().take(60).collect()
}
