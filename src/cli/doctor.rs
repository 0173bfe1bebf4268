//! Read-only diagnostics for the project's secret files.

use crate::cli::CliContext;
use crate::core::ignore_list::IgnoreList;
use crate::core::{credential_file, secret_file};
use crate::util::{fs as cred_fs, path};
use anyhow::Result;
use clap::Args;
use std::fmt;
use std::path::Path;

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Skip the .gitignore check
    #[arg(long)]
    pub no_ignore_check: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Warn,
    Fail,
    Info,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Pass => "PASS",
            Status::Warn => "WARN",
            Status::Fail => "FAIL",
            Status::Info => "INFO",
        };
        write!(f, "[{}]", label)
    }
}

#[derive(Debug, Clone)]
pub struct Check {
    pub status: Status,
    pub message: String,
}

impl Check {
    fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SourceKind {
    Secret,
    Credentials,
}

pub fn run(ctx: &CliContext, args: DoctorArgs) -> Result<()> {
    println!("Doctor: {}", ctx.paths);
    let checks = collect(ctx, !args.no_ignore_check)?;

    let mut ok = 0u32;
    let mut warn = 0u32;
    let mut fail = 0u32;
    for check in &checks {
        println!("  {} {}", check.status, check.message);
        match check.status {
            Status::Pass => ok += 1,
            Status::Warn => warn += 1,
            Status::Fail => fail += 1,
            Status::Info => {}
        }
    }

    println!();
    println!("Doctor summary: {} pass, {} warn, {} fail", ok, warn, fail);
    if fail > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Run every check without printing.
pub fn collect(ctx: &CliContext, check_ignore: bool) -> Result<Vec<Check>> {
    let mut checks = Vec::new();

    if ctx.paths.config_file.is_file() {
        checks.push(Check::new(
            Status::Info,
            format!("config: {}", ctx.paths.config_file.display()),
        ));
    } else {
        checks.push(Check::new(Status::Info, "config: defaults (no credfile.toml)"));
    }

    let ignore = if check_ignore {
        Some(IgnoreList::load(&ctx.paths.gitignore)?)
    } else {
        None
    };

    let sources = [
        (SourceKind::Secret, ctx.paths.secret_file(&ctx.config)),
        (SourceKind::Credentials, ctx.paths.credentials_file(&ctx.config)),
    ];
    for (kind, file) in sources {
        check_source(ctx, kind, &file, &mut checks);
        if let Some(ignore) = &ignore {
            checks.push(check_ignored(ctx, ignore, &file));
        }
    }
    Ok(checks)
}

fn check_source(ctx: &CliContext, kind: SourceKind, file: &Path, checks: &mut Vec<Check>) {
    if !file.is_file() {
        checks.push(Check::new(
            Status::Warn,
            format!("missing: {} (run: credfile init)", file.display()),
        ));
        return;
    }

    match kind {
        SourceKind::Secret => match secret_file::read_secret(file) {
            Ok(secret) if secret.is_empty() => checks.push(Check::new(
                Status::Warn,
                format!("empty secret: {}", file.display()),
            )),
            Ok(secret) => checks.push(Check::new(
                Status::Pass,
                format!(
                    "secret loads: {} (sha256:{})",
                    file.display(),
                    secret.fingerprint()
                ),
            )),
            Err(e) => checks.push(Check::new(Status::Fail, e.to_string())),
        },
        SourceKind::Credentials => match credential_file::read_credentials(file) {
            Ok(set) => checks.push(Check::new(
                Status::Pass,
                format!("credentials parse: {} ({} services)", file.display(), set.len()),
            )),
            Err(e) => checks.push(Check::new(Status::Fail, e.to_string())),
        },
    }

    if let Some(mode) = cred_fs::file_mode(file) {
        let max = ctx.config.policy.max_file_mode;
        if ctx.config.policy.mode_allowed(mode) {
            checks.push(Check::new(
                Status::Pass,
                format!("mode ok: {:04o} {}", mode, file.display()),
            ));
        } else {
            checks.push(Check::new(
                Status::Fail,
                format!(
                    "mode too open: {:04o} {} (expected at most {:04o}; run: chmod {:o} {})",
                    mode,
                    file.display(),
                    max,
                    max,
                    file.display()
                ),
            ));
        }
    }
}

fn check_ignored(ctx: &CliContext, ignore: &IgnoreList, file: &Path) -> Check {
    let Some(rel) = path::relative_slash(file, &ctx.paths.root) else {
        return Check::new(
            Status::Info,
            format!("outside project, not checked: {}", file.display()),
        );
    };
    if ignore.is_ignored(&rel) {
        return Check::new(Status::Pass, format!("git-ignored: {}", rel));
    }
    let status = if ctx.config.policy.require_ignored {
        Status::Fail
    } else {
        Status::Warn
    };
    Check::new(
        status,
        format!(
            "not in {}: {} (run: credfile init)",
            ctx.paths.gitignore.display(),
            rel
        ),
    )
}
