use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    credfile::util::logging::init();
    let cli = credfile::cli::Cli::parse();
    cli.run()
}
