//! API facade.
//!
//! Thin entry point over the command layer: every UI (the bundled CLI, a
//! future GUI) talks to [`ServdbApi`] and gets structured `CmdResult`s back,
//! never formatted output. Generic over the [`PathResolver`] seam so tests
//! can pin resolution without touching the filesystem layout.

use crate::backup::fs::FileBackupStore;
use crate::commands;
use crate::commands::config::ConfigAction;
use crate::commands::save::SaveOptions;
use crate::error::Result;
use crate::resolver::PathResolver;
use std::path::{Path, PathBuf};

pub use crate::commands::{
    CmdMessage, CmdResult, LoadReport, MessageLevel, SourceStatus, WriteReport,
};
pub use crate::controller::WriteDecision;

pub struct ServdbApi<R: PathResolver> {
    resolver: R,
    backups: FileBackupStore,
    config_dir: PathBuf,
}

impl<R: PathResolver> ServdbApi<R> {
    pub fn new(resolver: R, backups: FileBackupStore, config_dir: PathBuf) -> Self {
        Self {
            resolver,
            backups,
            config_dir,
        }
    }

    pub fn list_sources(&self) -> Result<CmdResult> {
        commands::list::run(&self.resolver)
    }

    pub fn load_dataset(&mut self, name: &str) -> Result<CmdResult> {
        commands::load::run(&self.resolver, &mut self.backups, name)
    }

    pub fn save_dataset(&mut self, name: &str, opts: &SaveOptions) -> Result<CmdResult> {
        commands::save::run(&self.resolver, &mut self.backups, name, opts)
    }

    pub fn list_backups(&self) -> Result<CmdResult> {
        commands::backups::list(&self.backups)
    }

    pub fn export_backups(&self, output: Option<&Path>) -> Result<CmdResult> {
        commands::backups::export(&self.backups, output)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}
