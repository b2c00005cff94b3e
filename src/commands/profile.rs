use super::common::Session;
use super::{GlobalArgs, Host};
use crate::misc::OutputFormat;
use crate::portfolio::fetch_user;
use crate::reports::{console, json};
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// GitHub login of the user
    #[arg(value_name = "USERNAME")]
    pub username: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,
}

pub async fn show_profile<H: Host>(host: &mut H, global: &GlobalArgs, args: &ProfileArgs) -> Result<()> {
    let session = Session::new(global)?;

    let profile = fetch_user(&session.client, &session.endpoints, &args.username).await;
    session.finish();
    let profile = profile.with_context(|| format!("fetching the profile of '{}'", args.username))?;

    let mut out = host.output();
    let written = match args.format {
        OutputFormat::Console => console::profile(&mut out, &profile, session.use_colors),
        OutputFormat::Json => json::profile(&mut out, &profile),
    };
    written.context("writing the profile")
}
