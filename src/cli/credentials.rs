use crate::cli::CliContext;
use crate::core::credential_file;
use crate::models::credential_set::CredentialSet;
use crate::util::mask;
use anyhow::{bail, Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Credential file (default: sources.credentials_file from credfile.toml)
    pub path: Option<PathBuf>,

    /// Only show this service
    #[arg(long)]
    pub service: Option<String>,

    /// Output format: table|json
    #[arg(long, default_value = "table")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Service name, e.g. twitter
    pub service: String,

    /// Field name, e.g. consumer_key
    pub field: String,

    /// Credential file (default: sources.credentials_file from credfile.toml)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Print the raw value to stdout (dangerous)
    #[arg(long)]
    pub confirm: bool,
}

fn load(ctx: &CliContext, arg: Option<PathBuf>) -> Result<(PathBuf, CredentialSet)> {
    let path = ctx.source_path(arg, ctx.paths.credentials_file(&ctx.config));
    let set = credential_file::read_credentials(&path)
        .with_context(|| format!("load credentials {}", path.display()))?;
    Ok((path, set))
}

pub fn run_show(ctx: &CliContext, args: ShowArgs) -> Result<()> {
    if args.format != "table" && args.format != "json" {
        bail!("invalid format: {} (use table|json)", args.format);
    }
    let (path, set) = load(ctx, args.path)?;

    let rows: Vec<(String, &str)> = set
        .flatten()
        .into_iter()
        .filter(|(key, _)| match &args.service {
            Some(svc) => {
                key == svc
                    || key.starts_with(&format!("{}.", svc))
                    || key.starts_with(&format!("{}[", svc))
            }
            None => true,
        })
        .collect();

    if let Some(svc) = &args.service {
        if rows.is_empty() && set.entry(svc).is_none() {
            bail!("no credentials for service '{}' in {}", svc, path.display());
        }
    }

    if args.format == "json" {
        let masked = set.masked();
        let json = match &args.service {
            Some(svc) => serde_json::to_string_pretty(&masked.entry(svc)),
            None => serde_json::to_string_pretty(&masked),
        }
        .context("serialize credentials")?;
        println!("{}", json);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No credentials found in {}", path.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Value Preview").add_attribute(Attribute::Bold),
        Cell::new("Fingerprint").add_attribute(Attribute::Bold),
    ]);
    for (key, value) in &rows {
        table.add_row(vec![
            Cell::new(key),
            Cell::new(mask::mask_value(value)),
            Cell::new(mask::fingerprint(value)),
        ]);
    }

    println!("{}", table);
    println!(
        "\n{} services, {} values in {}",
        set.len(),
        rows.len(),
        path.display()
    );
    Ok(())
}

pub fn run_get(ctx: &CliContext, args: GetArgs) -> Result<()> {
    let (path, set) = load(ctx, args.file)?;
    let value = set
        .field(&args.service, &args.field)
        .with_context(|| format!("lookup in {}", path.display()))?;

    if !args.confirm {
        println!("{}.{}: {}", args.service, args.field, mask::mask_value(value));
        println!("(use --confirm to print the raw value)");
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    stdout.write_all(value.as_bytes()).context("write to stdout")?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}
