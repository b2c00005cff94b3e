//! The contribution aggregation pipeline.
//!
//! Pull requests, issues, and public events authored by a user are merged per foreign repository
//! by [`aggregate`], ranked by recency, capped, and then decorated with repository details by
//! [`enrich`]. [`collect_contributions`] runs the whole sequence against a [`JsonFetcher`].
//!
//! [`JsonFetcher`]: crate::github::JsonFetcher

mod aggregator;
mod enricher;
mod example_data;
mod item;
mod pipeline;
mod record;

pub use aggregator::{AggregateOptions, aggregate};
pub use enricher::{ContributionSummary, EnrichError, EnrichedContributionRecord, EnrichmentOutcome, enrich};
pub use example_data::example_contributions;
pub use item::{ContributionItem, ContributionKind, ItemState};
pub use pipeline::{ContributionReport, ContributionSettings, SourceCounts, collect_contributions};
pub use record::RepositoryContributionRecord;

/// Log target for the contribution pipeline
pub(crate) const LOG_TARGET: &str = "contributions";
