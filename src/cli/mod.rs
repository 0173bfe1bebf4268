//! CLI routing and command dispatch.

use crate::core::config_file;
use crate::core::paths::ProjectPaths;
use crate::models::config::ProjectConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod credentials;
pub mod doctor;
pub mod init;
pub mod secret;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub paths: ProjectPaths,
    pub config: ProjectConfig,
    pub non_interactive: bool,
}

impl CliContext {
    /// Resolve an explicit path argument, falling back to a configured one.
    pub fn source_path(&self, arg: Option<PathBuf>, configured: PathBuf) -> PathBuf {
        arg.unwrap_or(configured)
    }
}

#[derive(Parser, Debug)]
#[command(name = "credfile", version, about = "Load secrets from git-ignored files")]
pub struct Cli {
    /// Project root (default: nearest directory with credfile.toml or .git)
    #[arg(long, global = true, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Run in non-interactive mode (no prompts, suitable for automation)
    #[arg(long, global = true, env = "CREDFILE_NON_INTERACTIVE")]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let paths = ProjectPaths::resolve(self.root)?;
        let config = config_file::load(&paths.config_file)?;
        tracing::debug!(root = %paths.root.display(), "resolved project");

        let ctx = CliContext {
            paths,
            config,
            non_interactive: self.non_interactive,
        };

        match self.command {
            Commands::Read(args) => secret::run_read(&ctx, args),
            Commands::Show(args) => credentials::run_show(&ctx, args),
            Commands::Get(args) => credentials::run_get(&ctx, args),
            Commands::Doctor(args) => doctor::run(&ctx, args),
            Commands::Init(args) => init::run(&ctx, args),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a plain-text secret and show a masked preview
    Read(secret::ReadArgs),
    /// List services and fields of a YAML credential file
    Show(credentials::ShowArgs),
    /// Look up one field of a YAML credential file
    Get(credentials::GetArgs),
    /// Check that secret files exist, are private, and are git-ignored (read-only)
    Doctor(doctor::DoctorArgs),
    /// Create template secret files and ignore them
    Init(init::InitArgs),
}
