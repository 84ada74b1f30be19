//! # Servdb Architecture
//!
//! Servdb is a **UI-agnostic editor core** for game server database files
//! (item, mob, skill and quest tables in rAthena/Hercules layouts). The CLI
//! is just one client of the library.
//!
//! ## Layers
//!
//! ```text
//! CLI (main.rs, args.rs)          terminal I/O only
//!         │
//! API (api.rs)                    facade, structured results
//!         │
//! Commands (commands/*.rs)        business logic, no I/O assumptions
//!         │
//! Core (controller, negotiate,    per-dataset file lifecycle
//!       budget, resolver,
//!       backup, table)
//! ```
//!
//! ## The file lifecycle
//!
//! Every dataset goes through one [`controller::DatasetFileController`]:
//!
//! 1. **Load** — resolve the physical file across the configured search
//!    roots, snapshot the pristine input into the backup store, then parse
//!    records under an error budget that tolerates a bounded number of
//!    malformed entries before abandoning the load.
//! 2. **Write** — negotiate the output format for the target dialect,
//!    verify a rollback backup exists, then either hand the serialization to
//!    the caller or, when nothing changed and the extension matches, copy
//!    the source bytes verbatim so an untouched file is never reformatted.
//!
//! Collaborators are traits at the seams: [`resolver::PathResolver`],
//! [`backup::BackupStore`], [`diagnostics::Diagnostics`] and
//! [`table::Table`], each with one production implementation and test fakes
//! where the tests need them.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`controller`]: The per-dataset file-lifecycle controller
//! - [`negotiate`]: File-type negotiation for writes
//! - [`budget`]: Error budget for malformed records
//! - [`resolver`]: Physical path detection
//! - [`backup`]: Backup store with archive export
//! - [`table`]: In-memory record table
//! - [`sources`]: Built-in dataset catalog
//! - [`model`]: Core data types
//! - [`diagnostics`]: Load-error reporting sink
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod backup;
pub mod budget;
pub mod commands;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod negotiate;
pub mod resolver;
pub mod sources;
pub mod table;
