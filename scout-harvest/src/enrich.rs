//! Founder enrichment from company detail pages.
use crate::parse::{is_founder_candidate, scan_name_like, FALLBACK_NAME_LIMIT};
use crate::pause;
use crate::profile::ProfileLookup;
use anyhow::Result;
use scout_common::{Record, MAX_FOUNDERS};
use scout_config::Pacing;
use scout_drivers::{BrowserSession, By, PageElement};

/// Structural and textual hints for founder names, tried in order.
pub const FOUNDER_STRATEGIES: [&str; 4] = [
    "//*[contains(text(), 'Founder') or contains(text(), 'Co-founder') or contains(text(), 'CEO')]/following-sibling::div",
    "//h3[contains(text(), 'Team') or contains(text(), 'Founder')]/following::div",
    "//*[contains(@class, 'founder')]",
    "//*[contains(@class, 'team-member')]",
];

/// Matches read per strategy.
const PER_STRATEGY: usize = 3;

const PROGRESS_EVERY: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub visited: usize,
    pub with_founders: usize,
    pub failed: usize,
}

pub struct Enricher<'a> {
    pacing: &'a Pacing,
    lookup: ProfileLookup<'a>,
}

impl<'a> Enricher<'a> {
    pub fn new(pacing: &'a Pacing, lookup: ProfileLookup<'a>) -> Self {
        Self { pacing, lookup }
    }

    /// Visit every record that has a company URL but no founders yet.
    pub async fn enrich_all<B: BrowserSession>(
        &self,
        browser: &mut B,
        records: &mut [Record],
    ) -> EnrichReport {
        let total = records.len();
        tracing::info!(target: "harvest.enrich", total, "enrich.start");
        let mut report = EnrichReport::default();

        for (i, record) in records.iter_mut().enumerate() {
            if i % PROGRESS_EVERY == 0 {
                tracing::info!(target: "harvest.enrich", step = i + 1, total, "enrich.progress");
            }
            if !record.needs_enrichment() {
                continue;
            }

            report.visited += 1;
            match self.enrich_one(browser, record).await {
                Ok(()) if record.has_founders() => report.with_founders += 1,
                Ok(()) => {}
                Err(e) => {
                    report.failed += 1;
                    tracing::debug!(
                        target: "harvest.enrich",
                        company = %record.name,
                        error = %e,
                        "could not enrich company"
                    );
                }
            }
            pause(self.pacing.courtesy()).await;
        }

        tracing::info!(
            target: "harvest.enrich",
            visited = report.visited,
            with_founders = report.with_founders,
            failed = report.failed,
            "enrich.done"
        );
        report
    }

    /// Recover founders for one record from its detail page.
    ///
    /// Names are read off the page before any profile search navigates away.
    pub async fn enrich_one<B: BrowserSession>(
        &self,
        browser: &mut B,
        record: &mut Record,
    ) -> Result<()> {
        browser.goto(&record.company_url).await?;
        pause(self.pacing.detail_settle()).await;

        let names = collect_founder_names(browser).await;

        if names.is_empty() {
            let body = browser.body_text().await?;
            for name in scan_name_like(&body, FALLBACK_NAME_LIMIT) {
                record.push_founder(name);
            }
            return Ok(());
        }

        let company = record.name.clone();
        for name in names {
            if !record.push_founder(name.as_str()) {
                continue;
            }
            if let Some(url) = self.lookup.find(browser, &name, &company).await {
                record.linkedin_urls.push(url);
            }
        }
        Ok(())
    }
}

/// Distinct founder-like texts from the detail page, at most [`MAX_FOUNDERS`].
pub async fn collect_founder_names<B: BrowserSession>(browser: &B) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for strategy in FOUNDER_STRATEGIES {
        let elements = match browser.find_all(&By::xpath(strategy)).await {
            Ok(elements) => elements,
            Err(e) => {
                tracing::debug!(target: "harvest.enrich", %strategy, error = %e, "enrich.strategy.failed");
                continue;
            }
        };

        for element in elements.iter().take(PER_STRATEGY) {
            let Ok(text) = element.text().await else {
                continue;
            };
            let text = text.trim();
            if is_founder_candidate(text) && !names.iter().any(|n| n == text) {
                names.push(text.to_string());
            }
        }

        if names.len() >= MAX_FOUNDERS {
            names.truncate(MAX_FOUNDERS);
            break;
        }
    }
    names
}
