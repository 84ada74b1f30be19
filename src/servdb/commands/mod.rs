use crate::backup::BackupEntry;
use crate::config::ServdbConfig;
use crate::controller::WriteDecision;
use crate::model::{FileType, FileTypeSet};
use std::path::PathBuf;

pub mod backups;
pub mod config;
pub mod list;
pub mod load;
pub mod save;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Resolution status of one catalog entry, as shown by `servdb list`.
#[derive(Debug, Clone)]
pub struct SourceStatus {
    pub name: &'static str,
    pub supported: FileTypeSet,
    pub path: Option<PathBuf>,
}

/// Summary of one load operation.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub dataset: String,
    pub path: PathBuf,
    pub file_type: Option<FileType>,
    pub records: usize,
    pub skipped: usize,
    pub aborted: bool,
}

/// Summary of one write decision.
#[derive(Debug, Clone)]
pub struct WriteReport {
    pub dataset: String,
    pub path: PathBuf,
    pub decision: WriteDecision,
    pub is_renewal: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub sources: Vec<SourceStatus>,
    pub load: Option<LoadReport>,
    pub write: Option<WriteReport>,
    pub backups: Vec<BackupEntry>,
    pub config: Option<ServdbConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}
