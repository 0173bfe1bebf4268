use crate::cli::CliContext;
use crate::constants;
use crate::core::config_file;
use crate::core::ignore_list::{self, IgnoreList};
use crate::util::{fs as cred_fs, path};
use anyhow::{Context, Result};
use clap::Args;
use dialoguer::Confirm;
use std::path::PathBuf;

const SECRET_TEMPLATE: &str = "REPLACE_WITH_YOUR_API_KEY\n";

const CREDENTIALS_TEMPLATE: &str = "\
# One block per service; keep this file out of version control.
example_service:
    consumer_key: REPLACE_ME
    consumer_secret: REPLACE_ME
";

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Also write a credfile.toml with the default settings
    #[arg(long)]
    pub config: bool,

    /// Append .gitignore entries without asking
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(ctx: &CliContext, args: InitArgs) -> Result<()> {
    if args.config {
        let written = cred_fs::create_new(
            &ctx.paths.config_file,
            &config_file::template()?,
            0o644,
        )?;
        report(&ctx.paths.config_file, written);
    }

    for (file, written) in create_templates(ctx)? {
        report(&file, written);
    }

    let entries = missing_ignore_entries(ctx)?;
    if entries.is_empty() {
        println!("{} already covers the secret files", ctx.paths.gitignore.display());
        return Ok(());
    }

    let approved = args.yes
        || ctx.non_interactive
        || Confirm::new()
            .with_prompt(format!(
                "Append {} to {}?",
                entries.join(", "),
                ctx.paths.gitignore.display()
            ))
            .default(true)
            .interact()
            .context("read confirmation")?;
    if !approved {
        println!("Left {} unchanged", ctx.paths.gitignore.display());
        return Ok(());
    }

    cred_fs::append_lines(&ctx.paths.gitignore, &entries)?;
    for entry in &entries {
        println!("Ignored {}", entry);
    }
    Ok(())
}

fn report(file: &std::path::Path, written: bool) {
    if written {
        println!("Wrote {}", file.display());
    } else {
        println!("Kept existing {}", file.display());
    }
}

/// Write placeholder secret files that do not exist yet.
pub fn create_templates(ctx: &CliContext) -> Result<Vec<(PathBuf, bool)>> {
    let mut out = Vec::new();
    let secret = ctx.paths.secret_file(&ctx.config);
    let written = cred_fs::create_new(&secret, SECRET_TEMPLATE, constants::SECRET_FILE_MODE)?;
    out.push((secret, written));

    let creds = ctx.paths.credentials_file(&ctx.config);
    let written = cred_fs::create_new(&creds, CREDENTIALS_TEMPLATE, constants::SECRET_FILE_MODE)?;
    out.push((creds, written));
    Ok(out)
}

/// Ignore entries needed for secret files inside the project root.
pub fn missing_ignore_entries(ctx: &CliContext) -> Result<Vec<String>> {
    let ignore = IgnoreList::load(&ctx.paths.gitignore)?;
    let mut entries = Vec::new();
    for file in [
        ctx.paths.secret_file(&ctx.config),
        ctx.paths.credentials_file(&ctx.config),
    ] {
        if let Some(rel) = path::relative_slash(&file, &ctx.paths.root) {
            let entry = ignore_list::entry_for(&rel);
            if !ignore.is_ignored(&rel) && !entries.contains(&entry) {
                entries.push(entry);
            }
        }
    }
    Ok(entries)
}
