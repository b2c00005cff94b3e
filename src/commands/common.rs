use super::{ContributionsArgs, InitArgs, LOG_TARGET, ProfileArgs, ReposArgs};
use super::{init_config, show_contributions, show_profile, show_repositories};
use crate::config::Config;
use crate::github::{Endpoints, FixedPause, GithubClient, RequestTracker};
use crate::misc::{ColorMode, ProgressReporter};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use core::time::Duration;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// How long a run must take before the progress bar is drawn.
const PROGRESS_DELAY: Duration = Duration::from_secs(1);

/// The process environment a command runs in.
///
/// Commands never touch stdout, stderr, or the exit code directly, so tests can substitute
/// in-memory buffers.
pub trait Host {
    fn output(&mut self) -> impl Write;
    fn error(&mut self) -> impl Write;
    fn exit(&mut self, code: i32);
}

#[derive(Debug, Parser)]
#[command(name = "gh-portfolio", version)]
#[command(about = "Collect a GitHub user's repositories and outside contributions")]
#[command(
    long_about = "gh-portfolio reads a GitHub user's public data through the REST API: their own \
repositories, their profile, and the pull requests, issues, and events they contributed to \
repositories owned by others."
)]
#[command(after_long_help = "EXAMPLES
    Summarize the repositories a user contributed to:
        $ gh-portfolio contributions octocat

    Same, as JSON:
        $ gh-portfolio contributions octocat --format json

    List a user's Rust repositories by stars:
        $ gh-portfolio repos octocat --language rust --sort stars

    Write the default configuration file:
        $ gh-portfolio init

ENVIRONMENT VARIABLES
    GITHUB_TOKEN    Personal access token, raising the API quota
    RUST_LOG        Log filter, e.g. `debug` or `github=debug`
")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub struct GlobalArgs {
    /// Path to the configuration file [default: gh-portfolio.toml in the current directory]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GitHub access token; anonymous requests are heavily rate limited
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// When to color console output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarize contributions to repositories owned by others
    Contributions(ContributionsArgs),

    /// List a user's own public repositories
    Repos(ReposArgs),

    /// Show a user's public profile
    Profile(ProfileArgs),

    /// Write the default configuration to a file
    Init(InitArgs),
}

/// Parse `args` and run the selected command.
///
/// Usage errors and command failures are reported on the host's error stream and end with
/// exit code 1.
pub async fn run<H, I, T>(host: &mut H, args: I)
where
    H: Host,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            if e.use_stderr() {
                let _ = write!(host.error(), "{}", e.render());
                host.exit(1);
            } else {
                // --help and --version
                let _ = write!(host.output(), "{}", e.render());
                host.exit(0);
            }
            return;
        }
    };

    let result = match &cli.command {
        Command::Contributions(args) => show_contributions(host, &cli.global, args).await,
        Command::Repos(args) => show_repositories(host, &cli.global, args).await,
        Command::Profile(args) => show_profile(host, &cli.global, args).await,
        Command::Init(args) => init_config(host, args),
    };

    if let Err(e) = result {
        log::debug!(target: LOG_TARGET, "Command failed: {e:?}");
        let _ = writeln!(host.error(), "Error: {e:#}");
        host.exit(1);
    }
}

/// Everything a network-bound command needs: configuration, an API client, and progress display.
#[derive(Debug)]
pub(super) struct Session {
    pub config: Config,
    pub client: GithubClient,
    pub endpoints: Endpoints,
    pub pacing: FixedPause,
    pub progress: ProgressReporter,
    pub use_colors: bool,
}

impl Session {
    pub fn new(global: &GlobalArgs) -> Result<Self> {
        let dir = std::env::current_dir().context("determining the current directory")?;
        let config = Config::load(&dir, global.config.as_deref())?;

        let progress = ProgressReporter::new(PROGRESS_DELAY);
        progress.set_prefix("Fetching");
        let tracker = RequestTracker::new(progress.clone());

        let client = GithubClient::new(&config, global.token.as_deref(), tracker)?;
        let endpoints = Endpoints::new(config.api_base_url.clone())?;
        let pacing = FixedPause(config.page_pause);

        Ok(Self {
            config,
            client,
            endpoints,
            pacing,
            progress,
            use_colors: global.color.enabled(),
        })
    }

    /// Clear the progress bar and log how many requests each endpoint family took.
    pub fn finish(&self) {
        self.progress.finish_and_clear();

        for (category, counts) in self.client.tracker().snapshot() {
            log::info!(target: LOG_TARGET, "{category}: {} requests issued, {} completed", counts.issued, counts.completed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gh-portfolio", "profile", "octocat", "--color", "never", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.global.color, ColorMode::Never);
        assert_eq!(cli.global.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Command::Profile(_)));
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["gh-portfolio"]).is_err());
    }
}
