use super::common::Session;
use super::{GlobalArgs, Host};
use crate::contributions::{ContributionSettings, collect_contributions};
use crate::misc::OutputFormat;
use crate::reports::{console, json};
use anyhow::{Context, Result, bail};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ContributionsArgs {
    /// GitHub login of the user whose contributions are collected
    #[arg(value_name = "USERNAME")]
    pub username: String,

    /// Maximum number of repositories reported [default: from configuration]
    #[arg(long, value_name = "N")]
    pub cap: Option<usize>,

    /// Also count public events other than pushes, pull requests, issues, creates, forks, and stars
    #[arg(long)]
    pub all_events: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,
}

pub async fn show_contributions<H: Host>(host: &mut H, global: &GlobalArgs, args: &ContributionsArgs) -> Result<()> {
    if args.cap == Some(0) {
        bail!("--cap must be at least 1");
    }

    let session = Session::new(global)?;

    let mut settings = ContributionSettings::from(&session.config);
    if let Some(cap) = args.cap {
        settings.aggregate.cap = cap;
    }
    if args.all_events {
        settings.aggregate.include_other_events = true;
    }

    let report = {
        let _guard = session.progress.start_visibility_checking();
        collect_contributions(&session.client, &session.endpoints, &session.pacing, &settings, &args.username).await
    };
    session.finish();

    let mut out = host.output();
    let written = match args.format {
        OutputFormat::Console => console::contributions(&mut out, &report, session.use_colors),
        OutputFormat::Json => json::contributions(&mut out, &report),
    };
    written.context("writing the contribution report")
}
