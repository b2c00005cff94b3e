//! Renderers for the data the commands collect.
//!
//! Every renderer writes into a caller-supplied [`std::io::Write`], so the same code serves the
//! terminal and tests.

pub mod console;
pub mod json;
mod language_colors;

use crate::github::types::RepositoryDetail;
use crate::portfolio::{LanguageShare, LanguageStat, RepositoryTotals};
use serde::Serialize;
use std::collections::BTreeMap;

/// A user's repositories as shown by the `repos` command.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoriesReport {
    pub username: String,

    /// Repositories left after filtering, in display order.
    pub repositories: Vec<RepositoryDetail>,

    /// Repositories before filtering.
    pub total: usize,

    pub is_example: bool,

    /// Stars, distinct languages, and latest update over all repositories, before filtering.
    #[serde(flatten)]
    pub totals: RepositoryTotals,

    /// Primary language statistics over all repositories, before filtering.
    pub language_stats: Vec<LanguageStat>,

    /// Per-repository language breakdowns, keyed by repository name, when requested.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub breakdowns: BTreeMap<String, Vec<LanguageShare>>,
}
