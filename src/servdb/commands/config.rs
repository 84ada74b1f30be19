use crate::commands::{CmdMessage, CmdResult};
use crate::config::ServdbConfig;
use crate::error::Result;
use crate::model::ServerDialect;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    SetDialect(ServerDialect),
    AddRoot(PathBuf),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = ServdbConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::SetDialect(dialect) => {
            config.dialect = dialect;
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!("dialect = {}", dialect)));
        }
        ConfigAction::AddRoot(root) => {
            if !config.search_roots.contains(&root) {
                config.search_roots.push(root.clone());
                config.save(config_dir)?;
            }
            result.add_message(CmdMessage::success(format!(
                "search root {}",
                root.display()
            )));
        }
    }

    result.config = Some(config);
    Ok(result)
}
