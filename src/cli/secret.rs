use crate::cli::CliContext;
use crate::core::secret_file;
use anyhow::{bail, Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Secret file (default: sources.secret_file from credfile.toml)
    pub path: Option<PathBuf>,

    /// Print the raw secret to stdout (dangerous)
    #[arg(long)]
    pub confirm: bool,
}

pub fn run_read(ctx: &CliContext, args: ReadArgs) -> Result<()> {
    let path = ctx.source_path(args.path, ctx.paths.secret_file(&ctx.config));
    let secret = secret_file::load_secret(&path)
        .with_context(|| format!("load secret {}", path.display()))?;

    let Some(secret) = secret else {
        // the loader already logged the missing file
        if ctx.non_interactive {
            bail!("secret file not found: {}", path.display());
        }
        println!("No secret loaded from {}", path.display());
        return Ok(());
    };

    if args.confirm {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(secret.expose().as_bytes())
            .context("write to stdout")?;
        stdout.flush().context("flush stdout")?;
        return Ok(());
    }

    println!("file:        {}", path.display());
    println!("length:      {}", secret.len());
    println!("preview:     {}", secret.masked());
    println!("fingerprint: sha256:{}", secret.fingerprint());
    if secret.is_empty() {
        println!("warning: secret is empty");
    }
    Ok(())
}
