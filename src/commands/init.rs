use super::Host;
use crate::config::{CONFIG_FILE_NAME, Config};
use anyhow::{Result, bail};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Where to write the configuration
    #[arg(long, short, value_name = "PATH", default_value = CONFIG_FILE_NAME)]
    pub output: PathBuf,

    /// Replace the file if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!("'{}' already exists, pass --force to replace it", args.output.display());
    }

    Config::save_default(&args.output)?;
    writeln!(host.output(), "Wrote the default configuration to '{}'", args.output.display())?;

    Ok(())
}
