//! Startup directory harvesting.
//!
//! The run is an ordered fallback chain: probe candidate data endpoints,
//! extract from the first one that answers, fall back to scrolling the
//! rendered listing in a browser when that is not enough, then visit each
//! company page to recover founders and look up their profiles. Each step
//! tolerates failure and the run always ends with a best-effort write.
//!
//! - [`probe::EndpointProber`]: first candidate endpoint answering 200
//! - [`api::ApiExtractor`]: GraphQL or REST payloads into [`Record`]s
//! - [`listing::ListingExtractor`]: scroll-and-parse over the rendered listing
//! - [`enrich::Enricher`] and [`profile::ProfileLookup`]: founder recovery
//! - [`writer`]: CSV output (primary and secondary copy)
//! - [`pipeline::Harvester`]: sequences the stages
//!
//! [`Record`]: scout_common::Record
pub mod api;
pub mod enrich;
pub mod fields;
pub mod listing;
pub mod parse;
pub mod pipeline;
pub mod probe;
pub mod profile;
pub mod summary;
pub mod writer;

pub use pipeline::{HarvestOutcome, Harvester, Stage};
pub use summary::Summary;
pub use writer::{write_records, WrittenOutput};

use std::time::Duration;

/// Fixed courtesy pause; zero durations return immediately.
pub(crate) async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
