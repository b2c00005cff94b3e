//! Machine-readable output.

use super::RepositoriesReport;
use crate::contributions::{ContributionItem, ContributionKind, ContributionReport, EnrichedContributionRecord, SourceCounts};
use crate::github::types::{RepositoryDetail, UserProfile};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
struct ContributionsView<'a> {
    username: &'a str,
    is_example: bool,
    source_counts: SourceCounts,
    repositories_discovered: usize,
    total_contributions: usize,
    repositories: Vec<RecordView<'a>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<FailureView>,
}

#[derive(Debug, Serialize)]
struct RecordView<'a> {
    repository: &'a RepositoryDetail,
    total_contributions: usize,
    pull_requests: usize,
    issues: usize,
    other: usize,
    kinds: &'a [ContributionKind],
    last_activity: DateTime<Utc>,
    items: &'a [ContributionItem],
}

impl<'a> From<&'a EnrichedContributionRecord> for RecordView<'a> {
    fn from(record: &'a EnrichedContributionRecord) -> Self {
        let summary = &record.summary;
        Self {
            repository: &record.repository,
            total_contributions: summary.total_contributions,
            pull_requests: summary.pull_requests(),
            issues: summary.issues(),
            other: summary.other(),
            kinds: &summary.kinds,
            last_activity: summary.last_activity,
            items: &summary.items,
        }
    }
}

#[derive(Debug, Serialize)]
struct FailureView {
    repository: String,
    error: String,
}

fn finish<W: Write>(writer: &mut W, result: serde_json::Result<()>) -> io::Result<()> {
    result.map_err(io::Error::from)?;
    writeln!(writer)
}

/// Write a contribution report as pretty-printed JSON.
pub fn contributions<W: Write>(writer: &mut W, report: &ContributionReport) -> io::Result<()> {
    let view = ContributionsView {
        username: &report.username,
        is_example: report.is_example,
        source_counts: report.source_counts,
        repositories_discovered: report.repositories_discovered,
        total_contributions: report.total_contributions(),
        repositories: report.records.iter().map(RecordView::from).collect(),
        failures: report
            .failures
            .iter()
            .map(|f| FailureView {
                repository: f.key.to_string(),
                error: f.source.to_string(),
            })
            .collect(),
    };

    let result = serde_json::to_writer_pretty(&mut *writer, &view);
    finish(writer, result)
}

/// Write a repository listing as pretty-printed JSON.
pub fn repositories<W: Write>(writer: &mut W, report: &RepositoriesReport) -> io::Result<()> {
    let result = serde_json::to_writer_pretty(&mut *writer, report);
    finish(writer, result)
}

/// Write a user profile as pretty-printed JSON.
pub fn profile<W: Write>(writer: &mut W, profile: &UserProfile) -> io::Result<()> {
    let result = serde_json::to_writer_pretty(&mut *writer, profile);
    finish(writer, result)
}
