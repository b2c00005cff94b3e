use super::common::Session;
use super::{GlobalArgs, Host, LOG_TARGET};
use crate::github::types::RepositoryDetail;
use crate::misc::OutputFormat;
use crate::portfolio::{
    LanguageShare, RepoSort, RepositoryFilter, RepositoryOptions, available_languages, breakdown_or_primary, fetch_languages,
    fetch_repositories, language_stats, repository_totals,
};
use crate::reports::{RepositoriesReport, console, json};
use anyhow::{Context, Result};
use clap::Args;
use futures::future::join_all;
use std::collections::BTreeMap;

#[derive(Args, Debug, Clone)]
pub struct ReposArgs {
    /// GitHub login of the repository owner
    #[arg(value_name = "USERNAME")]
    pub username: String,

    /// Only show repositories whose name, description, or topics contain this text
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Only show repositories with this primary language
    #[arg(long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Order of the listing
    #[arg(long, value_enum, default_value_t = RepoSort::Updated)]
    pub sort: RepoSort,

    /// Fetch the per-language breakdown of every listed repository
    #[arg(long)]
    pub languages: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,
}

pub async fn show_repositories<H: Host>(host: &mut H, global: &GlobalArgs, args: &ReposArgs) -> Result<()> {
    let session = Session::new(global)?;
    let options = RepositoryOptions::from(&session.config);

    let report = {
        let _guard = session.progress.start_visibility_checking();
        build_report(&session, &options, args).await
    };
    session.finish();
    let report = report?;

    let mut out = host.output();
    let written = match args.format {
        OutputFormat::Console => console::repositories(&mut out, &report, session.use_colors),
        OutputFormat::Json => json::repositories(&mut out, &report),
    };
    written.context("writing the repository listing")
}

async fn build_report(session: &Session, options: &RepositoryOptions, args: &ReposArgs) -> Result<RepositoriesReport> {
    let listing = fetch_repositories(&session.client, &session.endpoints, &args.username, options)
        .await
        .with_context(|| format!("listing the repositories of '{}'", args.username))?;

    let filter = RepositoryFilter {
        query: args.query.clone(),
        language: args.language.clone(),
        sort: args.sort,
    };
    let repositories = filter.apply(&listing.repositories);
    log::debug!(
        target: LOG_TARGET,
        "{} of {} repositories match; languages available: {:?}",
        repositories.len(),
        listing.repositories.len(),
        available_languages(&listing.repositories)
    );

    let breakdowns = if args.languages && !listing.is_example {
        breakdowns(session, &repositories).await
    } else {
        BTreeMap::new()
    };

    Ok(RepositoriesReport {
        username: args.username.clone(),
        total: listing.repositories.len(),
        is_example: listing.is_example,
        totals: repository_totals(&listing.repositories),
        language_stats: language_stats(&listing.repositories),
        repositories,
        breakdowns,
    })
}

/// Fetch language breakdowns concurrently. A repository whose languages cannot be fetched is shown
/// with its primary language only.
async fn breakdowns(session: &Session, repositories: &[RepositoryDetail]) -> BTreeMap<String, Vec<LanguageShare>> {
    let fetches = repositories.iter().map(|repo| async move {
        let result = fetch_languages(&session.client, &session.endpoints, &repo.owner.login, &repo.name).await;
        (repo, result)
    });

    join_all(fetches)
        .await
        .into_iter()
        .map(|(repo, result)| (repo.name.clone(), breakdown_or_primary(repo, result)))
        .collect()
}
