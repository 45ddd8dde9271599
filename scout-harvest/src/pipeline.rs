//! The acquisition run: probe, API, rendered listing, enrichment, write.
use crate::api::ApiExtractor;
use crate::enrich::Enricher;
use crate::listing::ListingExtractor;
use crate::probe::EndpointProber;
use crate::profile::ProfileLookup;
use crate::summary::Summary;
use crate::writer::{self, WrittenOutput};
use scout_common::{Record, Result, ScoutError};
use scout_config::ScoutConfig;
use scout_drivers::BrowserSession;
use scout_http::HttpClient;
use std::fmt;
use std::time::{Duration, Instant};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Probing,
    ApiExtracting,
    PageExtracting,
    Enriching,
    Writing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Probing => "probing",
            Stage::ApiExtracting => "api_extracting",
            Stage::PageExtracting => "page_extracting",
            Stage::Enriching => "enriching",
            Stage::Writing => "writing",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct HarvestOutcome {
    pub records: Vec<Record>,
    pub output: Option<WrittenOutput>,
    pub elapsed: Duration,
    /// Stages entered, in order.
    pub stages: Vec<Stage>,
}

impl HarvestOutcome {
    pub fn summary(&self) -> Summary<'_> {
        Summary {
            records: &self.records,
            elapsed: self.elapsed,
            output: self.output.as_ref(),
        }
    }
}

/// Owns the run's configuration, HTTP client and (optional) browser session.
///
/// Without a browser the run is API-only.
pub struct Harvester<B: BrowserSession> {
    config: ScoutConfig,
    http: HttpClient,
    browser: Option<B>,
    site: Url,
}

impl<B: BrowserSession> Harvester<B> {
    pub fn new(config: ScoutConfig, http: HttpClient, browser: Option<B>) -> Result<Self> {
        let site = Url::parse(&config.site_url)
            .map_err(|e| ScoutError::Config(format!("site_url {:?}: {e}", config.site_url)))?;
        Ok(Self {
            config,
            http,
            browser,
            site,
        })
    }

    /// Run every stage, always ending the browser session and attempting
    /// a write with whatever was collected.
    pub async fn run(mut self) -> HarvestOutcome {
        tracing::info!(
            target: "harvest",
            target_count = self.config.target,
            browser = self.browser.is_some(),
            "Starting YC startup harvest"
        );
        let started = Instant::now();
        let mut records = Vec::new();
        let mut stages = Vec::new();

        if let Err(e) = self.acquire(&mut records, &mut stages).await {
            tracing::error!(target: "harvest", error = %e, collected = records.len(), "Scraping failed");
        }

        if let Some(browser) = self.browser.as_mut() {
            if let Err(e) = browser.quit().await {
                tracing::warn!(target: "harvest", error = %e, "browser.quit.failed");
            }
        }

        enter(&mut stages, Stage::Writing);
        let output = match writer::write_records(&records, &self.config.output) {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(target: "harvest", error = %e, "write.failed");
                None
            }
        };

        enter(&mut stages, Stage::Done);
        HarvestOutcome {
            records,
            output,
            elapsed: started.elapsed(),
            stages,
        }
    }

    async fn acquire(&mut self, records: &mut Vec<Record>, stages: &mut Vec<Stage>) -> Result<()> {
        let target = self.config.target;

        enter(stages, Stage::Probing);
        let endpoint = EndpointProber::new(
            &self.http,
            &self.config.endpoints,
            self.config.probe_timeout(),
        )
        .probe()
        .await;

        if let Some(endpoint) = endpoint {
            enter(stages, Stage::ApiExtracting);
            ApiExtractor::new(&self.http, self.config.api_timeout())
                .extract(&endpoint, target, records)
                .await;
        }

        if records.len() >= target {
            tracing::info!(target: "harvest", count = records.len(), "target met; skipping rendered listing");
        } else if let Some(browser) = self.browser.as_mut() {
            enter(stages, Stage::PageExtracting);
            tracing::info!(
                target: "harvest",
                have = records.len(),
                "Using the rendered listing for the remaining companies"
            );
            ListingExtractor::new(
                &self.config.listing_url,
                &self.site,
                target,
                &self.config.pacing,
            )
            .run(browser, records)
            .await
            .map_err(ScoutError::Driver)?;
        } else {
            tracing::warn!(target: "harvest", "no browser session; skipping rendered listing");
        }

        if records.is_empty() {
            return Ok(());
        }
        match self.browser.as_mut() {
            Some(browser) => {
                enter(stages, Stage::Enriching);
                let lookup =
                    ProfileLookup::new(&self.config.search_url, self.config.pacing.search_settle());
                Enricher::new(&self.config.pacing, lookup)
                    .enrich_all(browser, records)
                    .await;
            }
            None => {
                tracing::warn!(target: "harvest", "no browser session; skipping founder enrichment");
            }
        }
        Ok(())
    }
}

fn enter(stages: &mut Vec<Stage>, stage: Stage) {
    tracing::info!(target: "harvest", %stage, "harvest.stage");
    stages.push(stage);
}
