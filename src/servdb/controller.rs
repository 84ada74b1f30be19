//! Per-dataset file-lifecycle controller.
//!
//! One controller exists per loaded dataset and reconciles the independent
//! sources of truth behind a file operation: logical dataset identity,
//! physical location, prior backup, in-memory modification state and the
//! target server dialect. Collaborators (resolver, backup store, diagnostics,
//! table) are passed explicitly per call; the controller keeps no hidden
//! process-wide state across reload cycles.

use crate::backup::BackupStore;
use crate::budget::ErrorBudget;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::model::{DatasetSource, FileType, ServerDialect};
use crate::negotiate::negotiate;
use crate::resolver::PathResolver;
use crate::table::Table;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of the write decision.
///
/// Only `Proceed` asks the caller to serialize; the other two mean the
/// operation is already complete or was denied. All deny conditions are
/// expected control-flow outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// Caller must serialize the table to `file_path()` now.
    Proceed,
    /// Unmodified table, matching extension: the source bytes were copied
    /// verbatim to the target, nothing left to do.
    SkippedUnchanged,
    /// Negotiation failed, backup lineage is missing, or the dataset is
    /// disabled; nothing was written.
    Denied,
}

impl WriteDecision {
    /// The original boolean contract: `true` means "serialize and persist".
    pub fn should_serialize(self) -> bool {
        self == WriteDecision::Proceed
    }
}

pub struct DatasetFileController {
    source: DatasetSource,
    budget: ErrorBudget,
    file_path: Option<PathBuf>,
    old_path: Option<PathBuf>,
    file_type: Option<FileType>,
    sub_path: Option<String>,
    is_renewal: bool,
    missing_file_fatal: bool,
}

impl DatasetFileController {
    pub fn new(source: DatasetSource) -> Self {
        Self {
            source,
            budget: ErrorBudget::new(),
            file_path: None,
            old_path: None,
            file_type: None,
            sub_path: None,
            is_renewal: false,
            missing_file_fatal: false,
        }
    }

    /// Report missing files as fatal diagnostics instead of failing silently.
    pub fn with_missing_file_fatal(mut self, fatal: bool) -> Self {
        self.missing_file_fatal = fatal;
        self
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn old_path(&self) -> Option<&Path> {
        self.old_path.as_deref()
    }

    pub fn file_type(&self) -> Option<FileType> {
        self.file_type
    }

    pub fn sub_path(&self) -> Option<&str> {
        self.sub_path.as_deref()
    }

    pub fn is_renewal(&self) -> bool {
        self.is_renewal
    }

    pub fn error_budget(&self) -> &ErrorBudget {
        &self.budget
    }

    /// Resolve the dataset's file and snapshot it before the user can touch
    /// anything. Returns `true` when the dataset is ready for record loading.
    pub fn load<R, B, D>(&mut self, resolver: &R, backups: &mut B, diags: &mut D) -> bool
    where
        R: PathResolver,
        B: BackupStore,
        D: Diagnostics,
    {
        let Some(path) = resolver.detect_path(&self.source) else {
            if self.missing_file_fatal {
                diags.fatal(&format!("File not found '{}'.", self.source.name));
            }
            return false;
        };

        self.file_type = FileType::from_path(&path);
        self.file_path = Some(path.clone());

        // Protect the pristine input. A file that vanished between detection
        // and snapshot must not kill the load.
        if let Err(e) = backups.backup(&path) {
            diags.load_error(&format!("Backup of '{}' failed: {}", path.display(), e));
        }

        true
    }

    /// Report a tolerated load failure; `false` aborts the load.
    pub fn report_error<D: Diagnostics>(&mut self, diags: &mut D, message: &str) -> bool {
        self.budget.report(diags, message)
    }

    /// Report a tolerated load failure attributed to a record identity.
    pub fn report_record<D: Diagnostics>(&mut self, diags: &mut D, record: &str) -> bool {
        self.budget.report_record(diags, record)
    }

    /// Decide whether and where the dataset should be written.
    ///
    /// On `Proceed` the caller serializes the table to `file_path()`; the
    /// logical source has already been backed up at that point. Backup
    /// failure on this path is an error and denies the write.
    #[allow(clippy::too_many_arguments)]
    pub fn write<T, R, B>(
        &mut self,
        table: &T,
        resolver: &R,
        backups: &mut B,
        out_root: &Path,
        sub_path: &str,
        dialect: ServerDialect,
        requested: Option<FileType>,
    ) -> Result<WriteDecision>
    where
        T: Table,
        R: PathResolver,
        B: BackupStore,
    {
        self.sub_path = Some(sub_path.to_string());

        let Some(target) = negotiate(&self.source, requested, dialect) else {
            return Ok(WriteDecision::Denied);
        };
        self.file_type = Some(target.file_type);

        self.is_renewal = false;
        let file_path = if self.source.uses_sub_path {
            if sub_path == "re" {
                self.is_renewal = true;
            }
            out_root.join(sub_path).join(target.file_name())
        } else {
            out_root.join(target.file_name())
        };
        self.file_path = Some(file_path.clone());

        // Re-resolve the logical source for backup lineage; without an
        // existing rollback point the dataset must never be overwritten.
        let Some(logical) = resolver.detect_path(&self.source) else {
            self.old_path = None;
            return Ok(WriteDecision::Denied);
        };
        self.old_path = backups.latest_backup(&logical);
        match &self.old_path {
            Some(old) if old.exists() => {}
            _ => return Ok(WriteDecision::Denied),
        }

        if table.attached_flag("IsEnabled") == Some(false) {
            return Ok(WriteDecision::Denied);
        }

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !table.is_modified() && extensions_match(&logical, &file_path) {
            backups.backup(&logical)?;
            // Byte-for-byte copy: re-serializing an untouched file risks
            // silent reformatting.
            fs::copy(&logical, &file_path)?;
            return Ok(WriteDecision::SkippedUnchanged);
        }

        backups.backup(&logical)?;
        Ok(WriteDecision::Proceed)
    }
}

fn extensions_match(a: &Path, b: &Path) -> bool {
    match (
        a.extension().and_then(|e| e.to_str()),
        b.extension().and_then(|e| e.to_str()),
    ) {
        (Some(ea), Some(eb)) => ea.eq_ignore_ascii_case(eb),
        _ => false,
    }
}
