//! Human-readable terminal output.

use super::RepositoriesReport;
use super::language_colors::language_color;
use crate::contributions::{ContributionItem, ContributionReport, EnrichedContributionRecord};
use crate::github::types::{RepositoryDetail, UserProfile};
use crate::portfolio::LanguageStat;
use core::fmt::Display;
use owo_colors::{OwoColorize, Style};
use std::io::{self, Write};

/// Items listed per repository; older ones are summarized in a single line.
const MAX_LISTED_ITEMS: usize = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy)]
struct Painter {
    enabled: bool,
}

impl Painter {
    fn paint(self, text: impl Display, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn language(self, language: &str) -> String {
        let (r, g, b) = language_color(language);
        format!("{} {language}", self.paint("●", Style::new().truecolor(r, g, b)))
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Write a contribution report as one card per repository.
pub fn contributions<W: Write>(writer: &mut W, report: &ContributionReport, use_colors: bool) -> io::Result<()> {
    let painter = Painter { enabled: use_colors };

    writeln!(writer, "{}", painter.paint(format!("Contributions of {}", report.username), Style::new().bold()))?;
    if report.is_example {
        writeln!(
            writer,
            "{}",
            painter.paint(
                "No contributions to other people's repositories were found; showing example data.",
                Style::new().yellow()
            )
        )?;
    }
    writeln!(writer)?;

    for record in &report.records {
        contribution_card(writer, painter, record)?;
        writeln!(writer)?;
    }

    writeln!(
        writer,
        "{}",
        painter.paint(
            format!(
                "{} • {} total",
                plural(report.records.len(), "repository", "repositories"),
                plural(report.total_contributions(), "contribution", "contributions")
            ),
            Style::new().bold()
        )
    )?;

    let counts = report.source_counts;
    writeln!(
        writer,
        "{}",
        painter.paint(
            format!(
                "Fetched {}, {}, and {}",
                plural(counts.pull_requests, "pull request", "pull requests"),
                plural(counts.issues, "issue", "issues"),
                plural(counts.events, "event", "events"),
            ),
            Style::new().dimmed()
        )
    )?;

    if !report.failures.is_empty() {
        writeln!(
            writer,
            "{}",
            painter.paint(
                format!(
                    "{} skipped because their details could not be fetched",
                    plural(report.failures.len(), "repository", "repositories")
                ),
                Style::new().yellow()
            )
        )?;
    }

    Ok(())
}

fn contribution_card<W: Write>(writer: &mut W, painter: Painter, record: &EnrichedContributionRecord) -> io::Result<()> {
    let repo = &record.repository;
    let summary = &record.summary;

    writeln!(
        writer,
        "{}  by {}",
        painter.paint(&repo.full_name, Style::new().bold().cyan()),
        repo.owner.login
    )?;
    writeln!(writer, "  {}", repo.description.as_deref().unwrap_or("No description available"))?;
    writeln!(writer, "  {}", repository_stats(painter, repo))?;

    let mut badges = Vec::new();
    if summary.pull_requests() > 0 {
        badges.push(plural(summary.pull_requests(), "PR", "PRs"));
    }
    if summary.issues() > 0 {
        badges.push(plural(summary.issues(), "issue", "issues"));
    }
    if summary.other() > 0 {
        badges.push(format!("{} other", summary.other()));
    }
    writeln!(
        writer,
        "  {}: {}",
        plural(summary.total_contributions, "contribution", "contributions"),
        badges.join(", ")
    )?;

    let kinds: Vec<_> = summary.kinds.iter().map(ToString::to_string).collect();
    writeln!(
        writer,
        "  Last activity: {}  Kinds: {}",
        summary.last_activity.format(DATE_FORMAT),
        kinds.join(", ")
    )?;

    let mut items: Vec<&ContributionItem> = summary.items.iter().collect();
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    for item in items.iter().take(MAX_LISTED_ITEMS) {
        write!(
            writer,
            "    {} {}",
            painter.paint(format!("[{}]", item.kind), Style::new().magenta()),
            item.timestamp.format(DATE_FORMAT)
        )?;
        if let Some(title) = &item.title {
            write!(writer, " {title}")?;
        }
        if let Some(state) = item.state {
            write!(writer, " ({state})")?;
        }
        if let Some(link) = &item.link {
            write!(writer, " {}", painter.paint(link, Style::new().dimmed()))?;
        }
        writeln!(writer)?;
    }

    if items.len() > MAX_LISTED_ITEMS {
        writeln!(writer, "    ... and {} more", items.len() - MAX_LISTED_ITEMS)?;
    }

    Ok(())
}

fn repository_stats(painter: Painter, repo: &RepositoryDetail) -> String {
    let mut stats = format!("★ {}  ⑂ {}", repo.stargazers_count, repo.forks_count);
    if let Some(language) = &repo.language {
        stats.push_str("  ");
        stats.push_str(&painter.language(language));
    }
    stats
}

/// Write a repository listing followed by language statistics.
pub fn repositories<W: Write>(writer: &mut W, report: &RepositoriesReport, use_colors: bool) -> io::Result<()> {
    let painter = Painter { enabled: use_colors };

    writeln!(writer, "{}", painter.paint(format!("Repositories of {}", report.username), Style::new().bold()))?;
    if report.is_example {
        writeln!(
            writer,
            "{}",
            painter.paint("The GitHub API is unavailable; showing sample repositories.", Style::new().yellow())
        )?;
    }
    writeln!(writer, "Showing {} of {}", report.repositories.len(), plural(report.total, "repository", "repositories"))?;

    let totals = &report.totals;
    let mut line = format!(
        "★ {} total  {}",
        totals.total_stars,
        plural(totals.language_count, "language", "languages")
    );
    if let Some(updated) = totals.last_update {
        line.push_str(&format!("  last update {}", updated.format(DATE_FORMAT)));
    }
    writeln!(writer, "{}", painter.paint(line, Style::new().dimmed()))?;
    writeln!(writer)?;

    if report.repositories.is_empty() {
        writeln!(writer, "No repositories match the current filters.")?;
        writeln!(writer)?;
    }

    for repo in &report.repositories {
        writeln!(writer, "{}", painter.paint(&repo.name, Style::new().bold().cyan()))?;
        writeln!(writer, "  {}", repo.description.as_deref().unwrap_or("No description available"))?;

        let mut line = repository_stats(painter, repo);
        if let Some(updated) = repo.updated_at {
            line.push_str(&format!("  updated {}", updated.format(DATE_FORMAT)));
        }
        writeln!(writer, "  {line}")?;

        if let Some(shares) = report.breakdowns.get(&repo.name) {
            let parts: Vec<_> = shares.iter().map(|s| format!("{} {:.1}%", s.language, s.percentage)).collect();
            writeln!(writer, "  {}", parts.join(", "))?;
        }

        writeln!(writer, "  {}", painter.paint(&repo.html_url, Style::new().dimmed()))?;
        writeln!(writer)?;
    }

    language_table(writer, painter, &report.language_stats)
}

fn language_table<W: Write>(writer: &mut W, painter: Painter, stats: &[LanguageStat]) -> io::Result<()> {
    if stats.is_empty() {
        return Ok(());
    }

    writeln!(writer, "{}", painter.paint("Languages", Style::new().bold()))?;
    let width = stats.iter().map(|s| s.language.chars().count()).max().unwrap_or(0);
    for stat in stats {
        let (r, g, b) = language_color(&stat.language);
        writeln!(
            writer,
            "  {} {:<width$}  {:>3}  {:>5.1}%",
            painter.paint("●", Style::new().truecolor(r, g, b)),
            stat.language,
            stat.count,
            stat.percentage
        )?;
    }

    Ok(())
}

/// Write a user's profile summary.
pub fn profile<W: Write>(writer: &mut W, profile: &UserProfile, use_colors: bool) -> io::Result<()> {
    let painter = Painter { enabled: use_colors };

    match &profile.name {
        Some(name) => writeln!(writer, "{} ({})", painter.paint(name, Style::new().bold()), profile.login)?,
        None => writeln!(writer, "{}", painter.paint(&profile.login, Style::new().bold()))?,
    }

    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        writeln!(writer, "  {bio}")?;
    }

    writeln!(
        writer,
        "  {}  {}  {} following",
        plural(usize::try_from(profile.public_repos).unwrap_or(usize::MAX), "public repository", "public repositories"),
        plural(usize::try_from(profile.followers).unwrap_or(usize::MAX), "follower", "followers"),
        profile.following
    )?;

    if let Some(url) = &profile.html_url {
        writeln!(writer, "  {}", painter.paint(url, Style::new().dimmed()))?;
    }

    Ok(())
}
