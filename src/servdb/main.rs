use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use servdb::api::{CmdMessage, CmdResult, MessageLevel, ServdbApi, SourceStatus};
use servdb::backup::fs::FileBackupStore;
use servdb::commands::config::ConfigAction;
use servdb::commands::save::SaveOptions;
use servdb::config::ServdbConfig;
use servdb::error::{Result, ServdbError};
use servdb::resolver::SearchRoots;
use std::path::PathBuf;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: ServdbApi<SearchRoots>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Load { dataset }) => handle_load(&mut ctx, &dataset),
        Some(Commands::Save {
            dataset,
            out,
            sub_path,
            dialect,
            format,
            force,
        }) => handle_save(&mut ctx, &dataset, out, sub_path, dialect, format, force),
        Some(Commands::Backups { export, output }) => handle_backups(&ctx, export, output),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_dir = cwd.join(".servdb");

    let config = ServdbConfig::load(&project_dir).unwrap_or_default();

    let mut roots = cli.root.clone();
    roots.extend(config.search_roots.iter().cloned());
    let resolver = SearchRoots::new(roots, config.sub_paths.clone());

    // Backups go next to the project config when one exists, otherwise into
    // the user-wide data directory.
    let backup_root = if project_dir.is_dir() {
        project_dir.join("backups")
    } else {
        let proj_dirs = ProjectDirs::from("com", "servdb", "servdb")
            .ok_or_else(|| ServdbError::Store("Could not determine data dir".to_string()))?;
        proj_dirs.data_dir().join("backups")
    };
    let backups = FileBackupStore::new(backup_root);

    let api = ServdbApi::new(resolver, backups, project_dir);
    Ok(AppContext { api })
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_sources()?;
    print_sources(&result.sources);
    print_messages(&result.messages);
    Ok(())
}

fn handle_load(ctx: &mut AppContext, dataset: &str) -> Result<()> {
    let result = ctx.api.load_dataset(dataset)?;
    print_messages(&result.messages);
    if let Some(report) = &result.load {
        if report.skipped > 0 {
            println!(
                "{}",
                format!("{} records skipped.", report.skipped).yellow()
            );
        }
    }
    Ok(())
}

fn handle_save(
    ctx: &mut AppContext,
    dataset: &str,
    out: PathBuf,
    sub_path: String,
    dialect: Option<String>,
    format: Option<String>,
    force: bool,
) -> Result<()> {
    let config_dialect = ctx.api.config(ConfigAction::ShowAll)?.config;
    let dialect = match dialect {
        Some(s) => s.parse()?,
        None => config_dialect.map(|c| c.dialect).unwrap_or_default(),
    };
    let requested = format.map(|s| s.parse()).transpose()?;

    let opts = SaveOptions {
        out_root: out,
        sub_path,
        dialect,
        requested,
        force,
    };
    let result = ctx.api.save_dataset(dataset, &opts)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_backups(ctx: &AppContext, export: bool, output: Option<PathBuf>) -> Result<()> {
    let result = if export {
        ctx.api.export_backups(output.as_deref())?
    } else {
        let result = ctx.api.list_backups()?;
        print_backups(&result);
        result
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.as_deref(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some("dialect"), Some(v)) => ConfigAction::SetDialect(v.parse()?),
        (Some("add-root"), Some(v)) => ConfigAction::AddRoot(PathBuf::from(v)),
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
            return Ok(());
        }
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        println!("dialect = {}", config.dialect);
        for root in &config.search_roots {
            println!("root    = {}", root.display());
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_sources(sources: &[SourceStatus]) {
    for status in sources {
        let formats: Vec<&str> = status.supported.iter().map(|t| t.extension()).collect();
        let formats = formats.join("|");

        match &status.path {
            Some(path) => println!(
                "{:<16} {:<9} {}",
                status.name.bold(),
                formats,
                path.display().to_string().dimmed()
            ),
            None => println!(
                "{:<16} {:<9} {}",
                status.name.normal(),
                formats,
                "not found".dimmed()
            ),
        }
    }
}

fn print_backups(result: &CmdResult) {
    for entry in &result.backups {
        println!(
            "{}  {}  {}",
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.file.dimmed(),
            entry.logical.display()
        );
    }
}
